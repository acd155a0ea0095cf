//! Content-hash cache busting for static assets.
//!
//! Every matched file is copied (or moved) to a name carrying the MD5 of its
//! content, a meta hash is derived from all file hashes, and templates have
//! their asset references and the meta hash placeholder rewritten.
//!
//! ```ignore
//! use cache_bust_meta::{FileGroup, Job, bust};
//!
//! let job = Job {
//!     workdir: "/srv/site".into(),
//!     groups: vec![FileGroup::new("tmp", ["css/*.css", "js/*.js"])],
//!     ..Job::default()
//! };
//! let report = bust(&job)?;
//! println!("{}", report.meta_hash);
//! ```

pub mod asset;
pub mod cli;
pub mod config;
pub mod error;
pub mod logger;
pub mod pipeline;
pub mod rewrite;
pub mod utils;

pub use asset::{FileGroup, HashOptions, HashRun, PathMapping, SkipReason};
pub use error::{AssetError, BustError, RewriteError};
pub use pipeline::{BustReport, Job, bust};
pub use rewrite::{Destination, ReplaceOptions, RewriteOutcome};
