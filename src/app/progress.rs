//! Progress bar for a category batch, and the writer the reporter prints through.
//!
//! When a bar is active, report lines go through `ProgressBar::println` so they
//! scroll above the bar instead of tearing it.

use std::io::{self, Write};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Optional bar tracking completed fetches for one category.
pub(crate) struct CategoryProgress {
    bar: Option<ProgressBar>,
}

impl CategoryProgress {
    /// Creates the bar when `enabled`, otherwise a no-op tracker.
    pub(crate) fn new(enabled: bool, total: usize, label: &str) -> Self {
        if !enabled {
            return Self { bar: None };
        }
        let bar = ProgressBar::new(total as u64);
        bar.set_style(
            ProgressStyle::with_template("{spinner} {msg} [{bar:30}] {pos}/{len}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        bar.set_message(format!("Downloading {label}"));
        bar.enable_steady_tick(Duration::from_millis(120));
        Self { bar: Some(bar) }
    }

    /// Writer for report lines that cooperates with the bar.
    pub(crate) fn writer(&self) -> ProgressWriter {
        match &self.bar {
            Some(bar) => ProgressWriter::Bar {
                bar: bar.clone(),
                pending: Vec::new(),
            },
            None => ProgressWriter::Plain(io::stderr()),
        }
    }

    /// Marks one more fetch as complete.
    pub(crate) fn advance(&self) {
        if let Some(bar) = &self.bar {
            bar.inc(1);
        }
    }

    /// Removes the bar from the terminal.
    pub(crate) fn finish(&self) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }
}

/// Line sink for the reporter: plain stderr, or printed above a progress bar.
pub(crate) enum ProgressWriter {
    Plain(io::Stderr),
    Bar { bar: ProgressBar, pending: Vec<u8> },
}

impl Write for ProgressWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Self::Plain(stderr) => stderr.write(buf),
            Self::Bar { bar, pending } => {
                pending.extend_from_slice(buf);
                while let Some(newline) = pending.iter().position(|b| *b == b'\n') {
                    let line: Vec<u8> = pending.drain(..=newline).collect();
                    let text = String::from_utf8_lossy(&line[..line.len() - 1]);
                    bar.println(text);
                }
                Ok(buf.len())
            }
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Self::Plain(stderr) => stderr.flush(),
            Self::Bar { .. } => Ok(()),
        }
    }
}
