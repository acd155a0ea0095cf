//! Digest command implementation.
//!
//! Prints the hash each file would get, and the meta hash of the list in
//! the given order. Nothing is renamed, copied or written.

use std::path::PathBuf;

use anyhow::{Context, Result};
use rayon::prelude::*;
use serde::Serialize;

use crate::asset::{digest_file, meta_hash};
use crate::cli::DigestArgs;
use crate::debug;

/// Hash of a single file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileDigest {
    pub path: PathBuf,
    pub hash: String,
}

/// Hashes of all listed files plus their meta hash
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DigestReport {
    pub files: Vec<FileDigest>,
    pub meta_hash: String,
}

pub fn run_digest(args: &DigestArgs) -> Result<()> {
    let report = digest_paths(&args.paths, args.hash_length)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    for file in &report.files {
        println!("{}  {}", file.hash, file.path.display());
    }
    println!("{}  (meta)", report.meta_hash);

    Ok(())
}

/// Digest `paths` in order. Unreadable files are an error here.
pub fn digest_paths(paths: &[PathBuf], hash_length: usize) -> Result<DigestReport> {
    debug!("digest"; "{} path(s), length {}", paths.len(), hash_length);

    let files = paths
        .par_iter()
        .map(|path| -> Result<FileDigest> {
            let hash = digest_file(path, hash_length)
                .with_context(|| format!("failed to digest {}", path.display()))?;
            Ok(FileDigest {
                path: path.clone(),
                hash,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let hashes: Vec<&str> = files.iter().map(|f| f.hash.as_str()).collect();
    let meta_hash = meta_hash(&hashes, hash_length);

    Ok(DigestReport { files, meta_hash })
}
