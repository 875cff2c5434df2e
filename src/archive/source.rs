//! Resolving the user-supplied export path to a directory.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tracing::{debug, info, instrument, warn};

use super::ArchiveError;

/// An export laid out on disk, ready for scanning.
///
/// A zip export is extracted into a temporary directory that is removed when
/// this value is dropped.
#[derive(Debug)]
pub enum ExportSource {
    /// The user passed an already extracted export.
    Directory(PathBuf),
    /// The user passed a zip, extracted for the lifetime of this value.
    Extracted {
        /// The original zip file.
        archive: PathBuf,
        /// Temporary extraction directory.
        dir: TempDir,
    },
}

impl ExportSource {
    /// Opens an export from a directory or zip file path.
    ///
    /// # Errors
    ///
    /// Returns [`ArchiveError::InvalidInput`] if `path` is neither an existing
    /// directory nor a readable zip, and [`ArchiveError::Extraction`] if the
    /// zip cannot be fully extracted.
    #[instrument(fields(path = %path.display()))]
    pub fn open(path: &Path) -> Result<Self, ArchiveError> {
        if path.is_dir() {
            debug!("Using export directory as-is");
            return Ok(Self::Directory(path.to_path_buf()));
        }

        if !path.is_file() {
            return Err(ArchiveError::invalid_input(path, "path does not exist"));
        }

        let dir = TempDir::new().map_err(|source| ArchiveError::Extraction {
            archive: path.to_path_buf(),
            dest: std::env::temp_dir(),
            source,
        })?;
        let extracted = extract_zip(path, dir.path())?;
        info!(entries = extracted, dest = %dir.path().display(), "Extracted export archive");

        Ok(Self::Extracted {
            archive: path.to_path_buf(),
            dir,
        })
    }

    /// Root directory of the export layout.
    #[must_use]
    pub fn root(&self) -> &Path {
        match self {
            Self::Directory(path) => path,
            Self::Extracted { dir, .. } => dir.path(),
        }
    }

    /// Returns true when the export was extracted from a zip.
    #[must_use]
    pub fn is_extracted(&self) -> bool {
        matches!(self, Self::Extracted { .. })
    }
}

/// Extracts every safe entry of `archive_path` under `dest`. Returns the number of files written.
fn extract_zip(archive_path: &Path, dest: &Path) -> Result<usize, ArchiveError> {
    let file = File::open(archive_path)
        .map_err(|e| ArchiveError::invalid_input(archive_path, e.to_string()))?;
    let mut archive = zip::ZipArchive::new(file)
        .map_err(|e| ArchiveError::invalid_input(archive_path, format!("not a zip file ({e})")))?;

    let extraction_error = |source: io::Error| ArchiveError::Extraction {
        archive: archive_path.to_path_buf(),
        dest: dest.to_path_buf(),
        source,
    };

    let mut written = 0;
    for index in 0..archive.len() {
        let mut entry = archive
            .by_index(index)
            .map_err(|e| extraction_error(io::Error::other(e.to_string())))?;

        let Some(relative) = entry.enclosed_name().map(Path::to_path_buf) else {
            warn!(entry = entry.name(), "Skipping zip entry with unsafe path");
            continue;
        };
        let target = dest.join(relative);

        if entry.is_dir() {
            fs::create_dir_all(&target).map_err(extraction_error)?;
            continue;
        }

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(extraction_error)?;
        }
        let mut out = File::create(&target).map_err(extraction_error)?;
        io::copy(&mut entry, &mut out).map_err(extraction_error)?;
        written += 1;
    }

    Ok(written)
}
