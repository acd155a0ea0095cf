//! Error types for the hasher and the rewriter.
//!
//! Per-file problems (missing sources, hashed files that never appeared) are
//! not errors: they are recorded in the run report and logged. What ends up
//! here aborts the run and is handed to the caller.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub use crate::utils::glob::PatternError;

/// Errors raised while resolving and hashing file groups.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error(transparent)]
    Pattern(#[from] PatternError),

    #[error("IO error on `{}`", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl AssetError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Errors raised while rewriting templates.
#[derive(Debug, Error)]
pub enum RewriteError {
    #[error("template `{}` not found", .0.display())]
    MissingTemplate(PathBuf),

    #[error("{templates} template(s) but {destinations} destination(s)")]
    DestinationMismatch {
        templates: usize,
        destinations: usize,
    },

    #[error(transparent)]
    Pattern(#[from] PatternError),

    #[error("IO error on `{}`", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl RewriteError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Any error that aborts a cache-busting run.
#[derive(Debug, Error)]
pub enum BustError {
    #[error("hashing failed")]
    Asset(#[from] AssetError),

    #[error("rewriting templates failed")]
    Rewrite(#[from] RewriteError),
}
