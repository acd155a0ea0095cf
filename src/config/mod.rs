//! Project configuration management for `cachebust.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   └── options    # [options]
//! ├── types/         # Utility types
//! │   ├── error      # ConfigError, ConfigDiagnostics
//! │   └── field      # FieldPath
//! └── mod.rs         # CacheBustConfig (this file)
//! ```
//!
//! # Sections
//!
//! | Section       | Purpose                                          |
//! |---------------|--------------------------------------------------|
//! | `[options]`   | Separator, hash length, templates, destinations  |
//! | `[[files]]`   | File groups: `cwd`, `expand`, `src` patterns     |
//!
//! Relative paths anywhere in the file, and on the command line, resolve
//! against the project root: the directory holding the config file, or the
//! working directory when there is none.

pub mod section;
pub mod types;
mod util;

use util::find_config_file;

pub use section::{OptionsConfig, ReplaceDest};
pub use types::{ConfigDiagnostic, ConfigDiagnostics, ConfigError, FieldPath};

use crate::asset::FileGroup;
use crate::cli::{Cli, RunArgs};
use crate::pipeline::Job;
use crate::rewrite::ReplaceOptions;
use crate::utils::path::normalize_path;
use crate::{debug, log};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs, io,
    path::{Path, PathBuf},
};

/// Config file looked up when `--config` is not given.
pub const DEFAULT_CONFIG: &str = "cachebust.toml";

const FILES: FieldPath = FieldPath::new("files");

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing cachebust.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CacheBustConfig {
    /// Absolute path to the config file, if one was found (internal use only)
    #[serde(skip)]
    pub config_path: Option<PathBuf>,

    /// Project root directory (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Hashing and rewriting options
    #[serde(default)]
    pub options: OptionsConfig,

    /// File groups, hashed in order
    #[serde(default)]
    pub files: Vec<FileGroup>,
}

impl CacheBustConfig {
    /// Load configuration for a `run` invocation.
    ///
    /// Searches upward from cwd for the config file. A missing default
    /// config is fine when sources come from the command line; a missing
    /// `--config` file is an error.
    pub fn load(cli: &Cli, args: &RunArgs) -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to get current working directory")?;

        let mut config = match &cli.config {
            Some(name) => {
                let path = find_config_file(&cwd, name).ok_or_else(|| {
                    ConfigError::Io(
                        name.clone(),
                        io::Error::new(io::ErrorKind::NotFound, "config file not found"),
                    )
                })?;
                Self::from_path(&path)?
            }
            None => match find_config_file(&cwd, Path::new(DEFAULT_CONFIG)) {
                Some(path) => Self::from_path(&path)?,
                None => Self::default(),
            },
        };

        let root = config
            .config_path
            .as_deref()
            .and_then(Path::parent)
            .map_or(cwd, Path::to_path_buf);
        config.set_root(&root);
        debug!("config"; "project root {}", config.root.display());

        config.apply_run_args(args);
        config.validate()?;

        Ok(config)
    }

    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (mut config, ignored) = Self::parse_with_ignored(&content)
            .with_context(|| format!("failed to parse {}", path.display()))?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        config.config_path = Some(normalize_path(path));
        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields. They are ignored, not fatal.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    /// Set the root directory path
    pub fn set_root(&mut self, path: &Path) {
        self.root = normalize_path(path);
    }

    /// Build the run description handed to the pipeline.
    pub fn job(&self) -> Job {
        Job {
            workdir: self.root.clone(),
            groups: self.files.clone(),
            hash: self.options.hash_options(),
            replace: ReplaceOptions {
                templates: self.options.replace_src.clone(),
                destination: self.options.replace_dest.destination(&self.root),
                placeholder: self.options.meta_hash_placeholder.clone(),
            },
        }
    }

    // ========================================================================
    // cli configuration updates
    // ========================================================================

    /// Apply `run` arguments on top of the file values.
    ///
    /// Positional sources become one more group after the configured ones.
    fn apply_run_args(&mut self, args: &RunArgs) {
        let options = &mut self.options;
        Self::update_option(&mut options.delete_originals, args.delete_originals.as_ref());
        Self::update_option(&mut options.separator, args.separator.as_ref());
        Self::update_option(&mut options.hash_length, args.hash_length.as_ref());
        Self::update_option(&mut options.meta_hash_placeholder, args.placeholder.as_ref());
        Self::update_option(&mut options.parallel, args.parallel.as_ref());
        Self::update_option(
            &mut options.replace_dest,
            ReplaceDest::from_args(&args.replace_dest).as_ref(),
        );

        if !args.replace_src.is_empty() {
            options.replace_src = args.replace_src.clone();
        }

        if !args.src.is_empty() {
            let base_dir = args.cwd.clone().unwrap_or_default();
            self.files
                .push(FileGroup::new(base_dir, args.src.iter().cloned()).expanded(args.expand));
        }
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate configuration.
    ///
    /// Collects all validation errors and returns them at once.
    pub fn validate(&self) -> Result<()> {
        let mut diag = ConfigDiagnostics::new();

        self.options.validate(&self.root, &mut diag);
        self.validate_files(&mut diag);

        diag.print_warnings();

        diag.into_result()
            .map_err(|e| ConfigError::Diagnostics(e).into())
    }

    fn validate_files(&self, diag: &mut ConfigDiagnostics) {
        for (idx, group) in self.files.iter().enumerate() {
            if group.is_empty() {
                diag.warn(FILES, format!("[{idx}] has no `src` patterns"));
            }
        }

        if self.files.iter().all(FileGroup::is_empty) {
            diag.error_with_hint(
                FILES,
                "no source files configured",
                "add a [[files]] group or pass SRC patterns to `run`",
            );
        }
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config, panicking on unknown fields (to catch typos in tests).
#[cfg(test)]
pub fn test_parse_config(content: &str) -> CacheBustConfig {
    let (parsed, ignored) = CacheBustConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rewrite::Destination;
    use clap::Parser;
    use tempfile::TempDir;

    const SAMPLE: &str = r#"
[options]
separator = "-"
hash_length = 10
replace_src = ["tmp/index.html"]
replace_dest = "tmp/index.hashed.html"

[[files]]
cwd = "tmp"
expand = true
src = ["tmp/css/style.min.css", "tmp/js/script.js"]
"#;

    fn run_args(argv: &[&str]) -> RunArgs {
        let mut full = vec!["cache-bust-meta", "run"];
        full.extend_from_slice(argv);
        match Cli::parse_from(full).command {
            crate::cli::Commands::Run { args } => args,
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_from_str_invalid_toml() {
        assert!(CacheBustConfig::from_str("[options\nseparator = \".\"").is_err());
    }

    #[test]
    fn test_parse_sample() {
        let config = test_parse_config(SAMPLE);
        assert_eq!(config.options.separator, "-");
        assert_eq!(config.options.hash_length, 10);
        assert_eq!(config.files.len(), 1);
        assert!(config.files[0].expand);
        assert_eq!(config.files[0].base_dir, PathBuf::from("tmp"));
        assert_eq!(config.files[0].patterns[1], "tmp/js/script.js");
    }

    #[test]
    fn test_unknown_fields_detected() {
        let content = "[options]\nseperator = \"-\"\n[unknown_section]\nfield = 1";
        let (config, ignored) = CacheBustConfig::parse_with_ignored(content).unwrap();

        // still parses, with defaults where the typo was
        assert_eq!(config.options.separator, ".");
        assert!(ignored.iter().any(|f| f.contains("seperator")));
        assert!(ignored.iter().any(|f| f.contains("unknown_section")));
    }

    #[test]
    fn test_from_path_records_location() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG);
        fs::write(&path, SAMPLE).unwrap();

        let config = CacheBustConfig::from_path(&path).unwrap();
        assert_eq!(config.config_path, Some(normalize_path(&path)));
    }

    #[test]
    fn test_from_path_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = CacheBustConfig::from_path(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::Io(..))
        ));
    }

    #[test]
    fn test_cli_overrides_file() {
        let mut config = test_parse_config(SAMPLE);
        config.set_root(Path::new("/project"));
        config.apply_run_args(&run_args(&[
            "--separator",
            "_",
            "--hash-length",
            "12",
            "--delete-originals",
            "--replace-dest",
            "a.html",
            "--replace-dest",
            "b.html",
            "--cwd",
            "public",
            "js/*.js",
        ]));

        assert_eq!(config.options.separator, "_");
        assert_eq!(config.options.hash_length, 12);
        assert!(config.options.delete_originals);
        assert_eq!(
            config.options.replace_dest,
            ReplaceDest::Many(vec!["a.html".into(), "b.html".into()])
        );
        // file groups come first
        assert_eq!(config.files.len(), 2);
        assert_eq!(config.files[1], FileGroup::new("public", ["js/*.js"]));
    }

    #[test]
    fn test_cli_without_values_keeps_file() {
        let mut config = test_parse_config(SAMPLE);
        config.apply_run_args(&run_args(&[]));
        assert_eq!(config.options.separator, "-");
        assert_eq!(
            config.options.replace_dest,
            ReplaceDest::One("tmp/index.hashed.html".into())
        );
        assert_eq!(config.files.len(), 1);
    }

    #[test]
    fn test_job_from_config() {
        let mut config = test_parse_config(SAMPLE);
        config.set_root(Path::new("/project"));
        let job = config.job();

        assert_eq!(job.workdir, PathBuf::from("/project"));
        assert_eq!(job.groups, config.files);
        assert_eq!(job.hash.separator, "-");
        assert_eq!(job.hash.hash_length, 10);
        assert_eq!(job.replace.templates, vec!["tmp/index.html"]);
        assert_eq!(
            job.replace.destination,
            Destination::Files(vec!["tmp/index.hashed.html".into()])
        );
        assert_eq!(job.replace.placeholder, "@@metaHash");
    }

    #[test]
    fn test_validate_requires_sources() {
        let config = test_parse_config("[options]\nseparator = \".\"");
        let err = config.validate().unwrap_err();
        let Some(ConfigError::Diagnostics(diag)) = err.downcast_ref::<ConfigError>() else {
            panic!("expected diagnostics, got {err}");
        };
        assert_eq!(diag.errors()[0].field, FILES);
    }

    #[test]
    fn test_validate_collects_all_errors() {
        let config = test_parse_config(
            "[options]\nseparator = \"/\"\nmeta_hash_placeholder = \"\"\n[[files]]\nsrc = [\"a.css\"]",
        );
        let err = config.validate().unwrap_err();
        let Some(ConfigError::Diagnostics(diag)) = err.downcast_ref::<ConfigError>() else {
            panic!("expected diagnostics, got {err}");
        };
        assert_eq!(diag.len(), 2);
    }

    #[test]
    fn test_validate_sample() {
        let mut config = test_parse_config(SAMPLE);
        config.set_root(Path::new("/nonexistent-project"));
        assert!(config.validate().is_ok());
    }
}
