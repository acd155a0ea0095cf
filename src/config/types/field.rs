//! Type-safe config field path.

use owo_colors::OwoColorize;
use std::fmt;

/// A config field path such as `options.separator`.
///
/// Diagnostics name the field they are about with one of these, so the
/// same spelling is used everywhere a field is reported.
///
/// # Example
///
/// ```ignore
/// const SEPARATOR: FieldPath = FieldPath::new("options.separator");
/// diag.error(SEPARATOR, "must not contain a path separator");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldPath(pub &'static str);

impl FieldPath {
    #[inline]
    pub const fn new(path: &'static str) -> Self {
        Self(path)
    }

    #[inline]
    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_args!("`{}`", self.0).bright_blue())
    }
}
