//! Path utilities.
//!
//! Pure functions for path manipulation. No side effects.
//!
//! - [`fs`]: Lexical normalization and relative paths (`normalize_path`, `relative_path`)

pub mod fs;

pub use fs::{absolute, normalize_path, relative_path, resolve_path, to_slash, trim_trailing_separators};
