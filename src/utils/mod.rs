//! Utility modules shared by the hasher and the rewriter.

pub mod glob;
pub mod hash;
pub mod path;
mod plural;

pub use plural::plural_count;
