//! `[options]` section configuration.
//!
//! Controls how files are hashed and which templates get rewritten.
//!
//! # Example
//!
//! ```toml
//! [options]
//! delete_originals = false              # Move instead of copy
//! separator = "."                       # basename<sep>hash.ext
//! hash_length = 8                       # 8..=32 hex chars
//! replace_src = ["tmp/index.html"]      # Templates (globs allowed)
//! replace_dest = "tmp/index.hashed.html" # false, a path, a list, or "dir/"
//! meta_hash_placeholder = "@@metaHash"
//! parallel = false
//! ```
//!
//! Every key also accepts its camelCase spelling (`hashLength`, ...).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::asset::HashOptions;
use crate::config::{ConfigDiagnostics, FieldPath};
use crate::rewrite::{DEFAULT_PLACEHOLDER, Destination};
use crate::utils::glob::is_glob;
use crate::utils::hash;
use crate::utils::path::resolve_path;

const SEPARATOR: FieldPath = FieldPath::new("options.separator");
const HASH_LENGTH: FieldPath = FieldPath::new("options.hash_length");
const REPLACE_SRC: FieldPath = FieldPath::new("options.replace_src");
const REPLACE_DEST: FieldPath = FieldPath::new("options.replace_dest");
const PLACEHOLDER: FieldPath = FieldPath::new("options.meta_hash_placeholder");

/// Hashing and rewriting options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptionsConfig {
    /// Move files to their hashed name instead of copying them.
    #[serde(alias = "deleteOriginals")]
    pub delete_originals: bool,

    /// Joins the basename and the hash.
    pub separator: String,

    /// Requested hash length, clamped to `8..=32`.
    #[serde(alias = "hashLength")]
    pub hash_length: usize,

    /// Templates to rewrite. Empty skips rewriting.
    #[serde(alias = "replaceSrc")]
    pub replace_src: Vec<String>,

    /// Where rewritten templates go.
    #[serde(alias = "replaceDest")]
    pub replace_dest: ReplaceDest,

    /// Token replaced by the meta hash.
    #[serde(alias = "metaHashPlaceholder")]
    pub meta_hash_placeholder: String,

    /// Compute digests within a group on the rayon pool.
    pub parallel: bool,
}

impl Default for OptionsConfig {
    fn default() -> Self {
        let hash = HashOptions::default();
        Self {
            delete_originals: hash.delete_originals,
            separator: hash.separator,
            hash_length: hash.hash_length,
            replace_src: Vec::new(),
            replace_dest: ReplaceDest::default(),
            meta_hash_placeholder: DEFAULT_PLACEHOLDER.into(),
            parallel: hash.parallel,
        }
    }
}

/// `replace_dest` as written in TOML: `false`, one path, or a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReplaceDest {
    Flag(bool),
    One(PathBuf),
    Many(Vec<PathBuf>),
}

impl Default for ReplaceDest {
    fn default() -> Self {
        Self::Flag(false)
    }
}

impl ReplaceDest {
    /// Build from repeated CLI values. `None` when nothing was given.
    pub fn from_args(paths: &[PathBuf]) -> Option<Self> {
        match paths {
            [] => None,
            [one] => Some(Self::One(one.clone())),
            many => Some(Self::Many(many.to_vec())),
        }
    }

    /// Interpret against the project root.
    ///
    /// A single path names a directory when it ends with a separator or
    /// already exists as one.
    pub fn destination(&self, root: &Path) -> Destination {
        match self {
            Self::Flag(_) => Destination::InPlace,
            Self::One(path) if names_directory(root, path) => Destination::Directory(path.clone()),
            Self::One(path) => Destination::Files(vec![path.clone()]),
            Self::Many(paths) => Destination::Files(paths.clone()),
        }
    }
}

fn names_directory(root: &Path, path: &Path) -> bool {
    let text = path.to_string_lossy();
    text.ends_with('/') || text.ends_with(std::path::MAIN_SEPARATOR) || resolve_path(root, path).is_dir()
}

impl OptionsConfig {
    pub fn hash_options(&self) -> HashOptions {
        HashOptions {
            delete_originals: self.delete_originals,
            separator: self.separator.clone(),
            hash_length: self.hash_length,
            parallel: self.parallel,
        }
    }

    /// Check option values, collecting problems into `diag`.
    pub fn validate(&self, root: &Path, diag: &mut ConfigDiagnostics) {
        if self.separator.contains(['/', '\\']) {
            diag.error_with_hint(
                SEPARATOR,
                format!("`{}` contains a path separator", self.separator),
                "hashed files must stay in the directory of their source",
            );
        }

        if self.hash_length > hash::MAX_LEN {
            diag.hint(
                HASH_LENGTH,
                format!("{} exceeds the digest length, using {}", self.hash_length, hash::MAX_LEN),
            );
        } else if self.hash_length < hash::MIN_LEN {
            diag.hint(
                HASH_LENGTH,
                format!("{} is below the minimum, using {}", self.hash_length, hash::MIN_LEN),
            );
        }

        if self.meta_hash_placeholder.is_empty() {
            diag.error_with_hint(
                PLACEHOLDER,
                "placeholder must not be empty",
                format!("remove the key to use `{DEFAULT_PLACEHOLDER}`"),
            );
        }

        self.validate_replace(root, diag);
    }

    fn validate_replace(&self, root: &Path, diag: &mut ConfigDiagnostics) {
        if self.replace_dest == ReplaceDest::Flag(true) {
            diag.error_with_hint(
                REPLACE_DEST,
                "`true` is not a destination",
                "use `false` to rewrite in place, or give a path",
            );
            return;
        }

        if self.replace_src.is_empty() {
            if self.replace_dest != ReplaceDest::Flag(false) {
                diag.warn(REPLACE_DEST, "set without `replace_src`, nothing will be written");
            }
            return;
        }

        // glob counts are only known after expansion
        if self.replace_src.iter().any(|src| is_glob(src) || src.starts_with('!')) {
            return;
        }

        if let Destination::Files(outputs) = self.replace_dest.destination(root)
            && outputs.len() != self.replace_src.len()
        {
            diag.error_with_hint(
                REPLACE_DEST,
                format!(
                    "{} destination(s) for {} template(s)",
                    outputs.len(),
                    self.replace_src.len()
                ),
                format!("list one destination per entry of {REPLACE_SRC}, or end a single path with `/`"),
            );
        }
    }
}
