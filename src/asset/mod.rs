//! Asset hashing: resolve file groups, fingerprint each file and place it
//! under its hashed name.

mod group;
mod mapping;
mod name;
mod process;
mod scan;

// Types
pub use group::FileGroup;
pub use mapping::{HashRun, PathMapping, SkipReason, SkippedFile, meta_hash};
pub use process::HashOptions;

// Resolution (pure functions)
pub use scan::{ResolvedGroup, resolve_group};

// Naming
pub use name::{hashed_file_name, hashed_path, split_extension};

// Processing (side effects)
pub use process::{digest_file, hash_group, hash_groups};
