//! Template discovery and output pairing.

use std::path::{Path, PathBuf};

use crate::error::RewriteError;
use crate::utils::glob;

/// Where rewritten templates go.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Destination {
    /// Overwrite each template.
    #[default]
    InPlace,
    /// One output file per template, paired by position.
    Files(Vec<PathBuf>),
    /// Each template is written into this directory under its own name.
    Directory(PathBuf),
}

/// A template and the file its rewritten content goes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub template: PathBuf,
    pub output: PathBuf,
}

/// Expand template patterns against `workdir`.
///
/// Literal entries must exist; globs may match nothing.
pub fn resolve_templates<S: AsRef<str>>(
    workdir: &Path,
    patterns: &[S],
) -> Result<Vec<PathBuf>, RewriteError> {
    let templates = glob::expand(workdir, patterns)?;

    // glob matches are files already, only literals can be missing
    if let Some(missing) = templates.iter().find(|t| !t.is_file()) {
        return Err(RewriteError::MissingTemplate(missing.clone()));
    }

    Ok(templates)
}

/// Pair every template with its output path.
pub fn plan(templates: &[PathBuf], destination: &Destination) -> Result<Vec<Target>, RewriteError> {
    match destination {
        Destination::InPlace => Ok(templates
            .iter()
            .map(|template| Target {
                template: template.clone(),
                output: template.clone(),
            })
            .collect()),
        Destination::Files(outputs) => {
            if outputs.len() != templates.len() {
                return Err(RewriteError::DestinationMismatch {
                    templates: templates.len(),
                    destinations: outputs.len(),
                });
            }
            Ok(templates
                .iter()
                .zip(outputs)
                .map(|(template, output)| Target {
                    template: template.clone(),
                    output: output.clone(),
                })
                .collect())
        }
        Destination::Directory(dir) => Ok(templates
            .iter()
            .map(|template| Target {
                template: template.clone(),
                output: template
                    .file_name()
                    .map_or_else(|| dir.clone(), |name| dir.join(name)),
            })
            .collect()),
    }
}
