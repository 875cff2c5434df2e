//! Error types for fetch tool invocations.

use thiserror::Error;

/// Why a single fetch invocation failed.
///
/// These never escape the download orchestrator; each one becomes a failed
/// [`DownloadOutcome`](crate::download::DownloadOutcome) carrying [`FetchError::summary`].
#[derive(Debug, Error)]
pub enum FetchError {
    /// The fetch tool could not be started at all.
    #[error("failed to launch {program}: {source}")]
    Launch {
        /// The program that was invoked.
        program: String,
        /// The underlying spawn error.
        #[source]
        source: std::io::Error,
    },

    /// The fetch tool ran but exited unsuccessfully.
    #[error("{program} exited with {}", describe_exit_code(.code))]
    NonZeroExit {
        /// The program that was invoked.
        program: String,
        /// Exit code, `None` when the process was killed by a signal.
        code: Option<i32>,
        /// First line of captured standard error, if any.
        stderr_head: Option<String>,
    },

    /// The fetch tool exceeded the configured per-invocation timeout and was killed.
    #[error("{program} timed out after {secs}s")]
    TimedOut {
        /// The program that was invoked.
        program: String,
        /// The timeout that elapsed.
        secs: u64,
    },

    /// The task running the invocation died before reporting.
    #[error("fetch task aborted: {reason}")]
    Aborted {
        /// Panic or cancellation message.
        reason: String,
    },
}

impl FetchError {
    /// One-line diagnostic for progress reporting.
    ///
    /// For a non-zero exit this is the first line of the tool's standard
    /// error; otherwise it is a synthesized message.
    #[must_use]
    pub fn summary(&self) -> String {
        match self {
            Self::NonZeroExit {
                stderr_head: Some(line),
                ..
            } => line.clone(),
            other => other.to_string(),
        }
    }
}

#[allow(clippy::ref_option)]
fn describe_exit_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit status {code}"),
        None => "no exit status (terminated by signal)".to_string(),
    }
}

/// Returns the first line of captured output, or `None` when it is blank.
#[must_use]
pub fn first_line(output: &[u8]) -> Option<String> {
    let text = String::from_utf8_lossy(output);
    let line = text.lines().next()?.trim_end();
    if line.trim().is_empty() {
        None
    } else {
        Some(line.to_string())
    }
}
