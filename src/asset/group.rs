//! Source file groups.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// A set of source patterns resolved relative to a base directory.
///
/// ```toml
/// [[files]]
/// cwd = "tmp"
/// expand = true
/// src = ["css/style.min.css", "js/*.js"]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGroup {
    /// Directory the patterns are relative to. Empty means the working root.
    #[serde(rename = "cwd", alias = "base_dir")]
    pub base_dir: PathBuf,

    /// Patterns may already carry the `cwd` prefix; strip it before
    /// re-rooting them.
    pub expand: bool,

    /// Glob patterns, `!` prefix excludes.
    #[serde(rename = "src", alias = "patterns")]
    pub patterns: Vec<String>,
}

impl FileGroup {
    pub fn new(base_dir: impl Into<PathBuf>, patterns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            base_dir: base_dir.into(),
            expand: false,
            patterns: patterns.into_iter().map(Into::into).collect(),
        }
    }

    /// Builder-style `expand` flag.
    pub fn expanded(mut self, expand: bool) -> Self {
        self.expand = expand;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_from_toml() {
        let group: FileGroup =
            toml::from_str("cwd = \"tmp\"\nexpand = true\nsrc = [\"css/*.css\"]").unwrap();
        assert_eq!(
            group,
            FileGroup::new("tmp", ["css/*.css"]).expanded(true)
        );
    }

    #[test]
    fn test_group_aliases_and_defaults() {
        let group: FileGroup = toml::from_str("patterns = [\"a.js\"]").unwrap();
        assert_eq!(group.base_dir, PathBuf::new());
        assert!(!group.expand);
        assert_eq!(group.patterns, vec!["a.js"]);
    }
}
