//! Video records recovered from a data export.
//!
//! A [`Video`] pairs a link with the timestamp the export associated with it.
//! Both fields are normalized on construction:
//!
//! - the link has every whitespace character removed
//! - the timestamp is re-rendered as timezone-naive ISO-8601 (`2020-08-12T02:16:22`)
//!
//! Normalization is idempotent, so a canonical value passes through unchanged.
//!
//! # Example
//!
//! ```
//! use archiver_core::record::Video;
//!
//! let video = Video::new(" https://example.com/v/1/\n", "2020-08-12 02:16:22").unwrap();
//! assert_eq!(video.link(), "https://example.com/v/1/");
//! assert_eq!(video.timestamp(), "2020-08-12T02:16:22");
//! ```

mod error;

pub use error::{EXPORT_TIMESTAMP_FORMAT, RecordError};

use std::fmt;

use chrono::NaiveDateTime;
use serde::Serialize;

/// Layout of a normalized timestamp.
const CANONICAL_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// A single archived video reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Video {
    link: String,
    timestamp: String,
}

impl Video {
    /// Builds a video from raw export fields.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::MalformedTimestamp`] if `raw_timestamp` is not a
    /// `YYYY-MM-DD HH:MM:SS` value. No partial record is produced.
    pub fn new(raw_link: &str, raw_timestamp: &str) -> Result<Self, RecordError> {
        let timestamp = normalize_timestamp(raw_timestamp)?;
        Ok(Self {
            link: normalize_link(raw_link),
            timestamp,
        })
    }

    /// The video URL.
    #[must_use]
    pub fn link(&self) -> &str {
        &self.link
    }

    /// The canonical ISO-8601 timestamp.
    #[must_use]
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }
}

impl fmt::Display for Video {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.link, self.timestamp)
    }
}

/// Strips every whitespace character, including embedded newlines, from a link.
#[must_use]
pub fn normalize_link(raw: &str) -> String {
    raw.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Parses an export timestamp and renders it in canonical form.
///
/// Accepts the export layout (`2020-08-12 02:16:22`) and the canonical layout
/// (`2020-08-12T02:16:22`), surrounded by any whitespace.
///
/// # Errors
///
/// Returns [`RecordError::MalformedTimestamp`] when neither layout matches.
pub fn normalize_timestamp(raw: &str) -> Result<String, RecordError> {
    let trimmed = raw.trim();
    let parsed = NaiveDateTime::parse_from_str(trimmed, EXPORT_TIMESTAMP_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(trimmed, CANONICAL_TIMESTAMP_FORMAT))
        .map_err(|e| RecordError::malformed_timestamp(trimmed, e.to_string()))?;
    Ok(parsed.format(CANONICAL_TIMESTAMP_FORMAT).to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_video_new_normalizes_both_fields() {
        let video = Video::new(" https://example.com/v/1/\n", " 2020-08-12 02:16:22\n").unwrap();
        assert_eq!(video.link(), "https://example.com/v/1/");
        assert_eq!(video.timestamp(), "2020-08-12T02:16:22");
    }

    #[test]
    fn test_normalize_link_removes_embedded_whitespace() {
        assert_eq!(
            normalize_link("https://www.tiktokv.com/share/ video/\n6859/\r\n"),
            "https://www.tiktokv.com/share/video/6859/"
        );
    }

    #[test]
    fn test_normalize_link_is_idempotent() {
        let once = normalize_link(" https://example.com/a b\tc\n");
        assert_eq!(normalize_link(&once), once);
    }

    #[test]
    fn test_normalize_timestamp_is_idempotent() {
        let once = normalize_timestamp("2020-08-13 10:00:00").unwrap();
        assert_eq!(once, "2020-08-13T10:00:00");
        assert_eq!(normalize_timestamp(&once).unwrap(), once);
    }

    #[test]
    fn test_video_new_rejects_malformed_timestamp() {
        let err = Video::new("https://example.com/v/1/", "not-a-date").unwrap_err();
        assert!(matches!(err, RecordError::MalformedTimestamp { .. }));
        assert_eq!(err.raw_value(), "not-a-date");
    }

    #[test]
    fn test_video_new_rejects_date_without_time() {
        assert!(Video::new("https://example.com/v/1/", "2020-08-12").is_err());
    }

    #[test]
    fn test_video_new_rejects_out_of_range_month() {
        assert!(Video::new("https://example.com/v/1/", "2020-13-12 02:16:22").is_err());
    }

    #[test]
    fn test_video_display_shows_link_and_timestamp() {
        let video = Video::new("https://example.com/v/1/", "2020-08-12 02:16:22").unwrap();
        assert_eq!(video.to_string(), "https://example.com/v/1/ (2020-08-12T02:16:22)");
    }

    #[test]
    fn test_video_serializes_with_canonical_fields() {
        let video = Video::new("https://example.com/v/1/", "2020-08-12 02:16:22").unwrap();
        let json = serde_json::to_string(&video).unwrap();
        assert_eq!(
            json,
            r#"{"link":"https://example.com/v/1/","timestamp":"2020-08-12T02:16:22"}"#
        );
    }
}
