//! Command-line interface module.

mod args;
pub mod digest;
pub mod run;

pub use args::{Cli, Commands, DigestArgs, RunArgs};
