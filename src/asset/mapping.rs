//! Run accumulator: mappings, hashes and skipped files in discovery order.

use std::path::PathBuf;

use serde::Serialize;

use crate::utils::hash;

/// A literal replacement: `from` is rewritten to `to` in templates.
///
/// For hashed files both sides are paths relative to the group root, with `/`
/// separators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathMapping {
    pub from: String,
    pub to: String,
}

impl PathMapping {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// Why a candidate produced no mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Nothing (or not a regular file) at the resolved path.
    MissingSource,
    /// Copy or move returned, but the hashed file is not there.
    WriteFailure,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: SkipReason,
}

/// Everything the hasher produced, threaded through the fold over groups
/// and files.
///
/// `hashes[i]` belongs to `mappings[i]`; both are in discovery order, which
/// the meta hash depends on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HashRun {
    pub mappings: Vec<PathMapping>,
    pub hashes: Vec<String>,
    pub skipped: Vec<SkippedFile>,
}

impl HashRun {
    /// Append a successfully hashed file.
    pub fn record(mut self, hash: String, mapping: PathMapping) -> Self {
        self.hashes.push(hash);
        self.mappings.push(mapping);
        self
    }

    /// Append a candidate that produced nothing.
    pub fn skip(mut self, path: impl Into<PathBuf>, reason: SkipReason) -> Self {
        self.skipped.push(SkippedFile {
            path: path.into(),
            reason,
        });
        self
    }

    /// Digest over all hashes joined with `-`, in discovery order.
    pub fn meta_hash(&self, hash_length: usize) -> String {
        meta_hash(&self.hashes, hash_length)
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }
}

/// Meta hash of an ordered hash list.
///
/// Reordering the list changes the result.
pub fn meta_hash<S: AsRef<str>>(hashes: &[S], hash_length: usize) -> String {
    let joined = hashes
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join("-");
    hash::fingerprint(&joined, hash_length)
}
