//! Error types for export file scanning.

use std::path::PathBuf;

use thiserror::Error;

use crate::record::RecordError;

/// Errors that can occur while scanning an export file.
///
/// A missing file is not an error; see [`scan_file`](super::scan_file).
#[derive(Debug, Error)]
pub enum ScanError {
    /// The file exists but could not be read.
    #[error("failed to read export file {path}: {source}")]
    Io {
        /// The file that failed to read.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// A completed Date/Link pair failed record construction.
    #[error("malformed record in {origin} at line {line}: {source}")]
    Malformed {
        /// Where the text came from (file path or `<text>`).
        origin: String,
        /// 1-based line that completed the pair.
        line: usize,
        /// The underlying record error.
        #[source]
        source: RecordError,
    },
}
