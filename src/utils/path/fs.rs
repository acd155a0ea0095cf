//! Lexical path helpers.
//!
//! Nothing here touches the filesystem except reading the current directory:
//! hashed names and mappings must be derived from the paths as written, so
//! symlinks are never resolved.

use std::path::{Component, Path, PathBuf};

/// Normalize a path lexically, collapsing `.` and `..` components.
///
/// Leading `..` components of a relative path are kept, everything else is
/// folded away. An empty result becomes `.`.
///
/// # Example
/// ```ignore
/// normalize_path(Path::new("tmp/./css/../js/app.js")) // -> "tmp/js/app.js"
/// ```
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut parts: Vec<Component<'_>> = Vec::new();

    for comp in path.components() {
        match comp {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                // `/..` stays at the root
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => parts.push(comp),
            },
            _ => parts.push(comp),
        }
    }

    if parts.is_empty() {
        return PathBuf::from(".");
    }
    parts.iter().collect()
}

/// Resolve a path to absolute form against `base`, without touching the disk.
///
/// `base` itself is made absolute against the current directory first.
#[inline]
pub fn resolve_path(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        return normalize_path(path);
    }
    normalize_path(&absolute(base).join(path))
}

/// Make a path absolute against the current directory (lexically).
pub fn absolute(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return normalize_path(path);
    }
    std::env::current_dir().map_or_else(
        |_| normalize_path(path),
        |cwd| normalize_path(&cwd.join(path)),
    )
}

/// Strip every trailing `/` (and `\` on Windows) from a path string.
pub fn trim_trailing_separators(path: &str) -> &str {
    let trimmed = path.trim_end_matches(|c| std::path::is_separator(c));
    // Keep a lone root intact
    if trimmed.is_empty() && !path.is_empty() {
        &path[..1]
    } else {
        trimmed
    }
}

/// Compute the path of `target` relative to `base`.
///
/// Both paths should be absolute and normalized. Walks up with `..` when
/// `target` is not below `base`. Identical paths yield an empty path.
pub fn relative_path(base: &Path, target: &Path) -> PathBuf {
    let base: Vec<_> = base.components().collect();
    let target: Vec<_> = target.components().collect();

    let common = base
        .iter()
        .zip(target.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut rel = PathBuf::new();
    for _ in common..base.len() {
        rel.push("..");
    }
    for comp in &target[common..] {
        rel.push(comp.as_os_str());
    }
    rel
}

/// Render a path with `/` separators, as it appears in templates and globs.
pub fn to_slash(path: &Path) -> String {
    path.to_string_lossy().replace(std::path::MAIN_SEPARATOR, "/")
}
