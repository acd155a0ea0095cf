//! Configuration utility functions.

use std::path::{Path, PathBuf};

/// Find config file by searching upward from `start`.
///
/// Walks up parent directories until `config_name` exists.
///
/// # Example
/// ```text
/// /home/user/site/assets/css/  ← start
/// /home/user/site/cachebust.toml ← found!
/// ```
pub fn find_config_file(start: &Path, config_name: &Path) -> Option<PathBuf> {
    if config_name.is_absolute() {
        return config_name.is_file().then(|| config_name.to_path_buf());
    }

    start
        .ancestors()
        .map(|dir| dir.join(config_name))
        .find(|candidate| candidate.is_file())
}

// ============================================================================
// tests
// ============================================================================
