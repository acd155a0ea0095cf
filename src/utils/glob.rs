//! Glob expansion for source and template patterns.
//!
//! Patterns are expanded in order against a root directory:
//! - a pattern without glob metacharacters is a literal path and is kept even
//!   if nothing exists there
//! - a glob pattern matches files under the root, sorted by path
//! - a pattern starting with `!` drops earlier matches
//!
//! A path matched by several patterns keeps its first position.

use std::path::{Path, PathBuf};

use globset::{GlobBuilder, GlobMatcher};
use jwalk::WalkDir;
use rustc_hash::FxHashSet;
use thiserror::Error;

use crate::utils::path::{relative_path, resolve_path, to_slash};

/// A pattern that `globset` refused to compile.
#[derive(Debug, Error)]
#[error("invalid pattern `{pattern}`")]
pub struct PatternError {
    pub pattern: String,
    #[source]
    pub source: globset::Error,
}

/// Whether a pattern needs matching rather than being a plain path.
#[inline]
pub fn is_glob(pattern: &str) -> bool {
    pattern.contains(['*', '?', '[', '{'])
}

/// Expand `patterns` against `root` into absolute paths, in pattern order.
pub fn expand<S: AsRef<str>>(root: &Path, patterns: &[S]) -> Result<Vec<PathBuf>, PatternError> {
    let mut seen = FxHashSet::default();
    let mut out: Vec<PathBuf> = Vec::new();

    for pattern in patterns {
        let pattern = pattern.as_ref();

        if let Some(negated) = pattern.strip_prefix('!') {
            let matcher = compile(negated)?;
            let absolute = Path::new(negated).is_absolute();
            out.retain(|path| {
                let key = if absolute {
                    to_slash(path)
                } else {
                    to_slash(&relative_path(root, path))
                };
                let keep = !matcher.is_match(key);
                if !keep {
                    seen.remove(path);
                }
                keep
            });
            continue;
        }

        let found = if is_glob(pattern) {
            walk_matches(root, pattern)?
        } else {
            vec![resolve_path(root, Path::new(pattern))]
        };

        for path in found {
            if seen.insert(path.clone()) {
                out.push(path);
            }
        }
    }

    Ok(out)
}

/// Walk the literal head of a glob and match the rest against each file.
fn walk_matches(root: &Path, pattern: &str) -> Result<Vec<PathBuf>, PatternError> {
    let (head, tail) = split_glob(pattern);
    let matcher = compile(tail)?;
    let dir = if head.is_empty() {
        resolve_path(root, Path::new("."))
    } else {
        resolve_path(root, Path::new(head))
    };

    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let dotfiles = tail.starts_with('.') || tail.contains("/.");

    // hidden entries are filtered relative to `dir`, so a hidden root still walks
    let mut files: Vec<_> = WalkDir::new(&dir)
        .skip_hidden(false)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .map(|e| e.path())
        .filter(|path| {
            path.strip_prefix(&dir).is_ok_and(|rel| {
                (dotfiles || !is_hidden(rel)) && matcher.is_match(to_slash(rel))
            })
        })
        .collect();
    files.sort();

    Ok(files)
}

fn is_hidden(rel: &Path) -> bool {
    rel.components()
        .any(|c| c.as_os_str().to_string_lossy().starts_with('.'))
}

/// Split a pattern at the first component containing a metacharacter.
///
/// `css/vendor/**/*.css` → (`css/vendor`, `**/*.css`)
fn split_glob(pattern: &str) -> (&str, &str) {
    let mut offset = 0;
    for comp in pattern.split('/') {
        if is_glob(comp) {
            let head = pattern[..offset].trim_end_matches('/');
            // keep the root of an absolute pattern
            let head = if head.is_empty() && offset > 0 { "/" } else { head };
            return (head, &pattern[offset..]);
        }
        offset += comp.len() + 1;
    }
    (pattern, "")
}

fn compile(pattern: &str) -> Result<GlobMatcher, PatternError> {
    GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .map(|glob| glob.compile_matcher())
        .map_err(|source| PatternError {
            pattern: pattern.to_string(),
            source,
        })
}
