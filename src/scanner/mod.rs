//! Line-oriented scanner for export category files.
//!
//! Export files are loosely formatted plain text where each record is a block
//! of lines, two of which matter:
//!
//! ```text
//! Date: 2020-08-12 02:16:22
//! Video Link: https://www.tiktokv.com/share/video/6859/
//! ```
//!
//! [`RecordScanner`] holds one pending slot for each of these lines. A line
//! with a known prefix overwrites its slot, even when its value is empty; an
//! empty timestamp then fails as malformed. Once both slots are filled a
//! [`Video`] is emitted and both slots are cleared. The two lines may come in
//! either order. A stray line carries over into the next block, and a repeated
//! prefix replaces the earlier value (last value wins).

mod error;

pub use error::ScanError;

use std::io::ErrorKind;
use std::path::Path;

use tracing::{debug, instrument};

use crate::record::{RecordError, Video};

/// Prefix of the line carrying a record timestamp.
pub const DATE_PREFIX: &str = "Date: ";

/// Prefix of the line carrying a record link.
pub const LINK_PREFIX: &str = "Video Link:";

/// Two-slot state machine pairing `Date:` and `Video Link:` lines.
#[derive(Debug, Default)]
pub struct RecordScanner {
    pending_timestamp: Option<String>,
    pending_link: Option<String>,
}

impl RecordScanner {
    /// Creates a scanner with both slots unset.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one line (without its terminator) to the scanner.
    ///
    /// Returns `Ok(Some(video))` when this line completed a pair.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError`] if the completed pair has a malformed timestamp.
    /// Both slots are cleared either way.
    pub fn feed_line(&mut self, line: &str) -> Result<Option<Video>, RecordError> {
        if line.starts_with(DATE_PREFIX) {
            self.pending_timestamp = Some(value_after_colon(line));
        } else if line.starts_with(LINK_PREFIX) {
            self.pending_link = Some(value_after_colon(line));
        }

        if self.pending_timestamp.is_none() || self.pending_link.is_none() {
            return Ok(None);
        }

        let timestamp = self.pending_timestamp.take().unwrap_or_default();
        let link = self.pending_link.take().unwrap_or_default();
        Video::new(&link, &timestamp).map(Some)
    }

    /// Returns true when a half-filled record is waiting for its partner line.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.pending_timestamp.is_some() || self.pending_link.is_some()
    }
}

/// Everything after the first colon, trimmed.
fn value_after_colon(line: &str) -> String {
    line.split_once(':')
        .map(|(_, value)| value.trim().to_string())
        .unwrap_or_default()
}

/// Scans in-memory export text and returns its videos in file order.
///
/// # Errors
///
/// Returns [`ScanError::Malformed`] on the first record with a bad timestamp.
pub fn scan_str(content: &str) -> Result<Vec<Video>, ScanError> {
    scan_with_origin(content, "<text>")
}

/// Scans an export file and returns its videos in file order.
///
/// A file that does not exist yields an empty list: the user simply has no
/// videos in that category.
///
/// # Errors
///
/// Returns [`ScanError::Io`] if the file exists but cannot be read, and
/// [`ScanError::Malformed`] on the first record with a bad timestamp.
#[instrument(fields(path = %path.display()))]
pub fn scan_file(path: &Path) -> Result<Vec<Video>, ScanError> {
    if !path.is_file() {
        debug!("Export file not present");
        return Ok(Vec::new());
    }

    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(source) => {
            return Err(ScanError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let videos = scan_with_origin(&content, &path.display().to_string())?;
    debug!(videos = videos.len(), "Scanned export file");
    Ok(videos)
}

fn scan_with_origin(content: &str, origin: &str) -> Result<Vec<Video>, ScanError> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut scanner = RecordScanner::new();
    let mut videos = Vec::new();

    for (index, line) in content.lines().enumerate() {
        let emitted = scanner
            .feed_line(line)
            .map_err(|source| ScanError::Malformed {
                origin: origin.to_string(),
                line: index + 1,
                source,
            })?;
        if let Some(video) = emitted {
            videos.push(video);
        }
    }

    if scanner.has_pending() {
        debug!(origin, "Export text ended with an unpaired Date/Link line");
    }

    Ok(videos)
}
