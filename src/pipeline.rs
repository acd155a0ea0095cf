//! One cache-busting pass.
//!
//! Pipeline phases:
//! - **Hash** - resolve every group, fingerprint and place every file
//! - **Meta** - digest the ordered hash list
//! - **Rewrite** - substitute paths and the placeholder in templates (only
//!   when templates are configured)
//!
//! Hashing finishes completely before rewriting starts. Renames are not
//! rolled back if rewriting fails.

use std::path::PathBuf;

use serde::Serialize;

use crate::asset::{FileGroup, HashOptions, HashRun, hash_groups};
use crate::error::BustError;
use crate::rewrite::{ReplaceOptions, RewriteOutcome, rewrite_templates};
use crate::utils::plural_count;
use crate::{debug, log};

/// Everything a run needs, independent of where it came from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Job {
    /// Relative group directories and templates resolve against this.
    pub workdir: PathBuf,
    pub groups: Vec<FileGroup>,
    pub hash: HashOptions,
    pub replace: ReplaceOptions,
}

/// What a run produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BustReport {
    #[serde(flatten)]
    pub run: HashRun,
    pub meta_hash: String,
    pub rewritten: Vec<RewriteOutcome>,
}

/// Hash all groups, then rewrite the templates.
pub fn bust(job: &Job) -> Result<BustReport, BustError> {
    debug!("bust"; "{} group(s) from {}", job.groups.len(), job.workdir.display());

    let run = hash_groups(&job.workdir, &job.groups, &job.hash)?;
    let meta_hash = run.meta_hash(job.hash.hash_length);
    debug!("bust"; "meta hash {} over {}", meta_hash, plural_count(run.hashes.len(), "digest"));

    let rewritten = if job.replace.is_enabled() {
        rewrite_templates(&job.workdir, &job.replace, &run.mappings, &meta_hash)?
    } else {
        Vec::new()
    };

    let skipped = run.skipped.len();
    if skipped > 0 {
        log!("warning"; "{} skipped", plural_count(skipped, "file"));
    }

    Ok(BustReport {
        run,
        meta_hash,
        rewritten,
    })
}
