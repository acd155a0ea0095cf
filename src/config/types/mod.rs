//! Configuration utility types.
//!
//! | Module   | Purpose                                      |
//! |----------|----------------------------------------------|
//! | `error`  | Configuration error types and diagnostics    |
//! | `field`  | Field paths named by diagnostics             |

mod error;
mod field;

pub use error::{ConfigDiagnostic, ConfigDiagnostics, ConfigError};
pub use field::FieldPath;
