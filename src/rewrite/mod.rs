//! Reference rewriting: replace original asset paths and the meta hash
//! placeholder inside templates.
//!
//! Runs once, after every file has been hashed. All mappings are applied to
//! every template in accumulated order, with the placeholder mapping last.

mod replace;
mod target;

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::asset::PathMapping;
use crate::error::RewriteError;
use crate::log;
use crate::utils::path::resolve_path;
use crate::utils::plural_count;

pub use replace::replace_all;
pub use target::{Destination, Target, plan, resolve_templates};

/// Token replaced by the meta hash unless configured otherwise.
pub const DEFAULT_PLACEHOLDER: &str = "@@metaHash";

/// Which templates to rewrite and where the results go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplaceOptions {
    /// Template paths or globs. Empty skips rewriting entirely.
    pub templates: Vec<String>,
    pub destination: Destination,
    /// Literal token replaced by the meta hash.
    pub placeholder: String,
}

impl Default for ReplaceOptions {
    fn default() -> Self {
        Self {
            templates: Vec::new(),
            destination: Destination::InPlace,
            placeholder: DEFAULT_PLACEHOLDER.into(),
        }
    }
}

impl ReplaceOptions {
    pub fn is_enabled(&self) -> bool {
        !self.templates.is_empty()
    }
}

/// Result of rewriting one template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RewriteOutcome {
    pub template: PathBuf,
    pub output: PathBuf,
    pub replacements: usize,
}

/// Resolve the configured templates against `workdir` and rewrite them.
pub fn rewrite_templates(
    workdir: &Path,
    options: &ReplaceOptions,
    mappings: &[PathMapping],
    meta_hash: &str,
) -> Result<Vec<RewriteOutcome>, RewriteError> {
    let templates = resolve_templates(workdir, &options.templates)?;
    let destination = match &options.destination {
        Destination::InPlace => Destination::InPlace,
        Destination::Files(files) => Destination::Files(
            files
                .iter()
                .map(|file| resolve_path(workdir, file))
                .collect(),
        ),
        Destination::Directory(dir) => Destination::Directory(resolve_path(workdir, dir)),
    };
    rewrite(&templates, mappings, meta_hash, &options.placeholder, &destination)
}

/// Rewrite `templates` with `mappings` plus `placeholder → meta_hash`.
///
/// Destinations are checked before anything is written.
pub fn rewrite(
    templates: &[PathBuf],
    mappings: &[PathMapping],
    meta_hash: &str,
    placeholder: &str,
    destination: &Destination,
) -> Result<Vec<RewriteOutcome>, RewriteError> {
    let targets = plan(templates, destination)?;

    let mut replacements = mappings.to_vec();
    replacements.push(PathMapping::new(placeholder, meta_hash));

    targets
        .iter()
        .map(|target| rewrite_one(target, &replacements))
        .collect()
}

fn rewrite_one(target: &Target, mappings: &[PathMapping]) -> Result<RewriteOutcome, RewriteError> {
    let content = fs::read(&target.template)
        .map_err(|err| RewriteError::io(&target.template, err))?;

    let (rewritten, count) = replace_all(&content, mappings);

    if let Some(parent) = target.output.parent() {
        fs::create_dir_all(parent).map_err(|err| RewriteError::io(parent, err))?;
    }
    fs::write(&target.output, rewritten).map_err(|err| RewriteError::io(&target.output, err))?;

    log!(
        "replace";
        "{} ({})",
        display_name(&target.output),
        plural_count(count, "replacement")
    );

    Ok(RewriteOutcome {
        template: target.template.clone(),
        output: target.output.clone(),
        replacements: count,
    })
}

fn display_name(path: &Path) -> String {
    std::env::current_dir()
        .ok()
        .and_then(|cwd| path.strip_prefix(cwd).ok().map(Path::to_path_buf))
        .unwrap_or_else(|| path.to_path_buf())
        .display()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn mappings() -> Vec<PathMapping> {
        vec![
            PathMapping::new("css/style.min.css", "css/style.min.1a2b3c4d.css"),
            PathMapping::new("js/script.js", "js/script.5e6f7a8b.js"),
        ]
    }

    const TEMPLATE: &str = r#"<link href="css/style.min.css"><script src="js/script.js"></script><meta name="v" content="@@metaHash">"#;

    #[test]
    fn test_rewrite_in_place() {
        let dir = TempDir::new().unwrap();
        let template = dir.path().join("index.html");
        fs::write(&template, TEMPLATE).unwrap();

        let outcomes = rewrite(
            &[template.clone()],
            &mappings(),
            "cafebabe",
            DEFAULT_PLACEHOLDER,
            &Destination::InPlace,
        )
        .unwrap();

        assert_eq!(
            fs::read_to_string(&template).unwrap(),
            r#"<link href="css/style.min.1a2b3c4d.css"><script src="js/script.5e6f7a8b.js"></script><meta name="v" content="cafebabe">"#
        );
        assert_eq!(outcomes[0].replacements, 3);
        assert_eq!(outcomes[0].output, template);
    }

    #[test]
    fn test_rewrite_to_destination_keeps_template() {
        let dir = TempDir::new().unwrap();
        let template = dir.path().join("index.html");
        let output = dir.path().join("out/index.hashed.html");
        fs::write(&template, TEMPLATE).unwrap();

        rewrite(
            &[template.clone()],
            &mappings(),
            "cafebabe",
            DEFAULT_PLACEHOLDER,
            &Destination::Files(vec![output.clone()]),
        )
        .unwrap();

        assert_eq!(fs::read_to_string(&template).unwrap(), TEMPLATE);
        let rewritten = fs::read_to_string(&output).unwrap();
        assert!(rewritten.contains("css/style.min.1a2b3c4d.css"));
        assert!(rewritten.contains(r#"content="cafebabe""#));
    }

    #[test]
    fn test_custom_placeholder() {
        let dir = TempDir::new().unwrap();
        let template = dir.path().join("sw.js");
        fs::write(&template, "const VERSION = '__HASH__'; // @@metaHash").unwrap();

        rewrite(&[template.clone()], &[], "0123abcd", "__HASH__", &Destination::InPlace).unwrap();

        assert_eq!(
            fs::read_to_string(&template).unwrap(),
            "const VERSION = '0123abcd'; // @@metaHash"
        );
    }

    #[test]
    fn test_rewrite_non_utf8_template() {
        let dir = TempDir::new().unwrap();
        let template = dir.path().join("legacy.html");
        fs::write(&template, b"<p>caf\xe9</p><link href=\"css/style.min.css\"> @@metaHash").unwrap();

        let outcomes = rewrite(
            &[template.clone()],
            &mappings(),
            "cafebabe",
            DEFAULT_PLACEHOLDER,
            &Destination::InPlace,
        )
        .unwrap();

        assert_eq!(outcomes[0].replacements, 2);
        assert_eq!(
            fs::read(&template).unwrap(),
            b"<p>caf\xe9</p><link href=\"css/style.min.1a2b3c4d.css\"> cafebabe".to_vec()
        );
    }

    #[test]
    fn test_mismatch_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let a = dir.path().join("a.html");
        let b = dir.path().join("b.html");
        fs::write(&a, TEMPLATE).unwrap();
        fs::write(&b, TEMPLATE).unwrap();
        let out = dir.path().join("out.html");

        let err = rewrite(
            &[a.clone(), b],
            &mappings(),
            "cafebabe",
            DEFAULT_PLACEHOLDER,
            &Destination::Files(vec![out.clone()]),
        )
        .unwrap_err();

        assert!(matches!(err, RewriteError::DestinationMismatch { .. }));
        assert!(!out.exists());
        assert_eq!(fs::read_to_string(&a).unwrap(), TEMPLATE);
    }

    #[test]
    fn test_rewrite_templates_resolves_against_workdir() {
        let dir = TempDir::new().unwrap();
        let work = dir.path();
        fs::create_dir_all(work.join("tmp")).unwrap();
        fs::write(work.join("tmp/index.html"), TEMPLATE).unwrap();

        let options = ReplaceOptions {
            templates: vec!["tmp/*.html".into()],
            destination: Destination::Directory(PathBuf::from("dist")),
            ..ReplaceOptions::default()
        };
        let outcomes = rewrite_templates(work, &options, &mappings(), "cafebabe").unwrap();

        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].output, work.join("dist/index.html"));
        assert!(work.join("dist/index.html").exists());
    }
}
