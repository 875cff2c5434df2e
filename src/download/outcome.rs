//! Per-item results and batch totals.

use crate::record::Video;

/// Result of one fetch attempt.
///
/// `error_summary` is present exactly when the attempt failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadOutcome {
    video: Video,
    error_summary: Option<String>,
}

impl DownloadOutcome {
    /// A successful attempt.
    #[must_use]
    pub fn success(video: Video) -> Self {
        Self {
            video,
            error_summary: None,
        }
    }

    /// A failed attempt with its one-line diagnostic.
    #[must_use]
    pub fn failure(video: Video, summary: impl Into<String>) -> Self {
        Self {
            video,
            error_summary: Some(summary.into()),
        }
    }

    /// The video this outcome belongs to.
    #[must_use]
    pub fn video(&self) -> &Video {
        &self.video
    }

    /// Whether the fetch tool reported success.
    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.error_summary.is_none()
    }

    /// The failure diagnostic, if the attempt failed.
    #[must_use]
    pub fn error_summary(&self) -> Option<&str> {
        self.error_summary.as_deref()
    }

    /// Consumes the outcome, returning its video.
    #[must_use]
    pub fn into_video(self) -> Video {
        self.video
    }
}

/// Totals for one orchestrator run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    succeeded: usize,
    failed: usize,
}

impl BatchSummary {
    /// Number of successful attempts.
    #[must_use]
    pub fn succeeded(&self) -> usize {
        self.succeeded
    }

    /// Number of failed attempts.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.failed
    }

    /// Number of attempts made.
    #[must_use]
    pub fn total(&self) -> usize {
        self.succeeded + self.failed
    }

    /// Counts one outcome.
    pub fn record(&mut self, outcome: &DownloadOutcome) {
        if outcome.succeeded() {
            self.succeeded += 1;
        } else {
            self.failed += 1;
        }
    }

    /// Adds another summary's totals to this one.
    pub fn merge(&mut self, other: BatchSummary) {
        self.succeeded += other.succeeded;
        self.failed += other.failed;
    }
}
