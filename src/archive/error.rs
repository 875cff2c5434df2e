//! Error types for export discovery.

use std::path::PathBuf;

use thiserror::Error;

use crate::scanner::ScanError;

/// Errors that can occur while opening an export or collecting its videos.
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// The path is neither a directory nor a readable zip file.
    #[error(
        "{path} is not a directory or zip file: {reason}\n  Suggestion: pass the extracted export folder or the downloaded .zip"
    )]
    InvalidInput {
        /// The path that was supplied.
        path: PathBuf,
        /// Why the path was rejected.
        reason: String,
    },

    /// The zip opened but an entry could not be extracted.
    #[error("failed to extract {archive} into {dest}: {source}")]
    Extraction {
        /// The zip being extracted.
        archive: PathBuf,
        /// The extraction directory.
        dest: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// A category file could not be scanned.
    #[error(transparent)]
    Scan(#[from] ScanError),
}

impl ArchiveError {
    /// Creates an `InvalidInput` error.
    #[must_use]
    pub fn invalid_input(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
