//! Configuration section definitions.
//!
//! | Module    | TOML Section  | Purpose                               |
//! |-----------|---------------|---------------------------------------|
//! | `options` | `[options]`   | Hashing and template rewriting        |
//!
//! `[[files]]` entries deserialize straight into [`FileGroup`].
//!
//! [`FileGroup`]: crate::asset::FileGroup

mod options;

pub use options::{OptionsConfig, ReplaceDest};
