//! Error types for record construction.

use thiserror::Error;

/// Expected layout of a raw export timestamp.
pub const EXPORT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Errors that can occur while building a [`Video`](super::Video) from raw fields.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// The timestamp does not match `YYYY-MM-DD HH:MM:SS`.
    #[error(
        "malformed timestamp '{raw}': {reason}\n  Suggestion: export timestamps look like 2020-08-12 02:16:22"
    )]
    MalformedTimestamp {
        /// The raw value as read from the export.
        raw: String,
        /// Why parsing failed.
        reason: String,
    },
}

impl RecordError {
    /// Creates a `MalformedTimestamp` error.
    #[must_use]
    pub fn malformed_timestamp(raw: &str, reason: impl Into<String>) -> Self {
        Self::MalformedTimestamp {
            raw: raw.to_string(),
            reason: reason.into(),
        }
    }

    /// Returns the offending raw value.
    #[must_use]
    pub fn raw_value(&self) -> &str {
        match self {
            Self::MalformedTimestamp { raw, .. } => raw,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_timestamp_message_contains_raw_value() {
        let err =
            RecordError::malformed_timestamp("not-a-date", "input contains invalid characters");
        let msg = err.to_string();
        assert!(msg.contains("not-a-date"), "should contain raw value");
        assert!(msg.contains("invalid characters"), "should contain reason");
        assert!(msg.contains("Suggestion"), "should carry a suggestion");
        assert_eq!(err.raw_value(), "not-a-date");
    }
}
