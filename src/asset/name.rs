//! Hashed filename derivation.

use std::path::{Path, PathBuf};

/// Split a file name into basename and extension.
///
/// The extension starts at the last `.`; a leading dot (dotfiles) does not
/// count. `style.min.css` → (`style.min`, `.css`), `.htaccess` → (`.htaccess`, ``).
pub fn split_extension(file_name: &str) -> (&str, &str) {
    match file_name.rfind('.') {
        None | Some(0) => (file_name, ""),
        Some(idx) => file_name.split_at(idx),
    }
}

/// `basename<separator>hash<extension>`
pub fn hashed_file_name(file_name: &str, separator: &str, hash: &str) -> String {
    let (basename, extension) = split_extension(file_name);
    format!("{basename}{separator}{hash}{extension}")
}

/// Hashed sibling of `path`, in the same directory.
pub fn hashed_path(path: &Path, separator: &str, hash: &str) -> PathBuf {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy())
        .unwrap_or_default();
    path.with_file_name(hashed_file_name(&file_name, separator, hash))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_extension() {
        assert_eq!(split_extension("style.min.css"), ("style.min", ".css"));
        assert_eq!(split_extension("app.js"), ("app", ".js"));
        assert_eq!(split_extension("LICENSE"), ("LICENSE", ""));
        assert_eq!(split_extension(".htaccess"), (".htaccess", ""));
        assert_eq!(split_extension(".eslintrc.json"), (".eslintrc", ".json"));
    }

    #[test]
    fn test_hashed_path_keeps_directory() {
        let hashed = hashed_path(Path::new("/site/css/style.min.css"), ".", "1a2b3c4d");
        assert_eq!(hashed, PathBuf::from("/site/css/style.min.1a2b3c4d.css"));
    }

    #[test]
    fn test_hashed_file_name_custom_separator() {
        assert_eq!(hashed_file_name("app.js", "-", "deadbeef"), "app-deadbeef.js");
        assert_eq!(hashed_file_name("LICENSE", "_", "deadbeef"), "LICENSE_deadbeef");
    }
}
