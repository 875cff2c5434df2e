//! Human-readable progress lines for a fetch batch.
//!
//! The reporter is the single consumer of outcomes, so its counter needs no
//! synchronization: it numbers outcomes in the order they arrive, which is
//! completion order rather than input order.
//!
//! ```text
//! Downloading 2 videos to /home/me/tiktok/likes
//! Downloading (1/2) https://example.com/v/2/	DONE ✅
//! Downloading (2/2) https://example.com/v/1/	FAILED ❌: ERROR: Unable to download webpage
//! Finished likes: 1 succeeded, 1 failed (2 total)
//! ```

use std::io::{self, Write};
use std::path::Path;

use crate::download::{BatchSummary, DownloadOutcome};

/// Marker appended to successful lines.
pub const DONE_MARKER: &str = "DONE ✅";

/// Marker appended to failed lines, before the diagnostic.
pub const FAILED_MARKER: &str = "FAILED ❌";

/// Writes one line per outcome with a running `(completed/total)` counter.
#[derive(Debug)]
pub struct Reporter<W: Write> {
    out: W,
    total: usize,
    completed: usize,
    summary: BatchSummary,
}

impl<W: Write> Reporter<W> {
    /// Creates a reporter for a batch of `total` items.
    pub fn new(out: W, total: usize) -> Self {
        Self {
            out,
            total,
            completed: 0,
            summary: BatchSummary::default(),
        }
    }

    /// Writes the batch header naming the destination directory.
    ///
    /// # Errors
    ///
    /// Returns the underlying write error.
    pub fn header(&mut self, output_dir: &Path) -> io::Result<()> {
        writeln!(
            self.out,
            "Downloading {} videos to {}",
            self.total,
            output_dir.display()
        )
    }

    /// Counts `outcome` and writes its progress line.
    ///
    /// The counter advances even if the write fails.
    ///
    /// # Errors
    ///
    /// Returns the underlying write error.
    pub fn report(&mut self, outcome: &DownloadOutcome) -> io::Result<()> {
        self.completed += 1;
        self.summary.record(outcome);
        let line = format_outcome_line(self.completed, self.total, outcome);
        writeln!(self.out, "{line}")?;
        self.out.flush()
    }

    /// Writes the closing summary line for `label`.
    ///
    /// # Errors
    ///
    /// Returns the underlying write error.
    pub fn finish(&mut self, label: &str) -> io::Result<()> {
        writeln!(
            self.out,
            "Finished {label}: {} succeeded, {} failed ({} total)",
            self.summary.succeeded(),
            self.summary.failed(),
            self.summary.total()
        )?;
        self.out.flush()
    }

    /// Number of outcomes reported so far.
    #[must_use]
    pub fn completed(&self) -> usize {
        self.completed
    }

    /// Totals of the outcomes reported so far.
    #[must_use]
    pub fn summary(&self) -> BatchSummary {
        self.summary
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Renders the progress line for the `completed`-th outcome of `total`.
#[must_use]
pub fn format_outcome_line(completed: usize, total: usize, outcome: &DownloadOutcome) -> String {
    let link = outcome.video().link();
    match outcome.error_summary() {
        None => format!("Downloading ({completed}/{total}) {link}\t{DONE_MARKER}"),
        Some(error) => {
            format!("Downloading ({completed}/{total}) {link}\t{FAILED_MARKER}: {error}")
        }
    }
}
