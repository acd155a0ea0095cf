//! Group resolution (pure, no side effects besides reading directories).

use std::path::{Path, PathBuf};

use crate::utils::glob::{self, PatternError};
use crate::utils::path::{normalize_path, resolve_path, to_slash, trim_trailing_separators};

use super::FileGroup;

/// A group after its patterns were expanded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedGroup {
    /// Absolute group root; mappings are relative to it.
    pub root: PathBuf,
    /// Candidate files in resolution order. They may not exist.
    pub files: Vec<PathBuf>,
}

/// Resolve a group's patterns against `workdir`.
///
/// A relative `base_dir` is taken relative to `workdir`. With `expand` set,
/// a pattern that still carries the `base_dir` prefix is re-rooted without
/// it, so `tmp/css/a.css` under base `tmp` becomes `<root>/css/a.css`.
pub fn resolve_group(workdir: &Path, group: &FileGroup) -> Result<ResolvedGroup, PatternError> {
    let base = base_prefix(&group.base_dir);
    let root = resolve_path(workdir, Path::new(&base));

    let patterns: Vec<String> = group
        .patterns
        .iter()
        .map(|pattern| rebase_pattern(pattern, &base, group.expand))
        .collect();

    let files = glob::expand(&root, &patterns)?;
    Ok(ResolvedGroup { root, files })
}

/// Normalized base directory without trailing separators.
fn base_prefix(base_dir: &Path) -> String {
    let normalized = to_slash(&normalize_path(base_dir));
    trim_trailing_separators(&normalized).to_string()
}

/// Normalize a pattern and strip the base prefix when the group is expanded.
fn rebase_pattern(pattern: &str, base: &str, expand: bool) -> String {
    let (negation, body) = match pattern.strip_prefix('!') {
        Some(body) => ("!", body),
        None => ("", pattern),
    };
    let body = to_slash(&normalize_path(Path::new(body)));

    if expand && !base.is_empty() {
        let prefix = format!("{base}/");
        if let Some(rest) = body.strip_prefix(&prefix) {
            return format!("{negation}{rest}");
        }
    }
    format!("{negation}{body}")
}
