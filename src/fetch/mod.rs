//! The seam between the orchestrator and the external fetch tool.
//!
//! [`Fetcher`] is the trait the orchestrator drives; [`CommandFetcher`] is
//! the production implementation that runs a `youtube-dl`-compatible program
//! once per video:
//!
//! ```text
//! youtube-dl --write-info-json --ignore-errors --output <dir>/%(id)s.%(ext)s <link>
//! ```
//!
//! Output streams are captured, never streamed live. Exit status zero is
//! success; anything else is a [`FetchError`].

mod error;

pub use error::{FetchError, first_line};

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, instrument};

use crate::record::Video;

/// Fetch tool used when none is configured.
pub const DEFAULT_FETCH_TOOL: &str = "youtube-dl";

/// Output template handed to the fetch tool; it fills in the id and extension.
pub const OUTPUT_TEMPLATE: &str = "%(id)s.%(ext)s";

/// Retrieves one video into an output directory.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &str;

    /// Fetches `video` into `output_dir`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] when the video could not be retrieved.
    async fn fetch(&self, video: &Video, output_dir: &Path) -> Result<(), FetchError>;
}

/// Builds the fetch tool arguments for one video. The link is always last.
#[must_use]
pub fn fetch_args(video: &Video, output_dir: &Path) -> Vec<OsString> {
    vec![
        OsString::from("--write-info-json"),
        OsString::from("--ignore-errors"),
        OsString::from("--output"),
        output_dir.join(OUTPUT_TEMPLATE).into_os_string(),
        OsString::from(video.link()),
    ]
}

/// Runs an external `youtube-dl`-compatible program per video.
#[derive(Debug, Clone)]
pub struct CommandFetcher {
    program: OsString,
    timeout: Option<Duration>,
}

impl Default for CommandFetcher {
    fn default() -> Self {
        Self::new(DEFAULT_FETCH_TOOL)
    }
}

impl CommandFetcher {
    /// Creates a fetcher that invokes `program` with no timeout.
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            timeout: None,
        }
    }

    /// Kills an invocation that runs longer than `timeout`.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// The configured program.
    #[must_use]
    pub fn program(&self) -> &std::ffi::OsStr {
        &self.program
    }

    /// The configured per-invocation timeout.
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Looks the program up on `PATH` (or checks it directly if it is a path).
    #[must_use]
    pub fn resolve_program(&self) -> Option<PathBuf> {
        which::which(&self.program).ok()
    }

    fn program_label(&self) -> String {
        self.program.to_string_lossy().into_owned()
    }
}

#[async_trait]
impl Fetcher for CommandFetcher {
    fn name(&self) -> &str {
        "command"
    }

    #[instrument(skip(self), fields(link = %video.link(), program = ?self.program))]
    async fn fetch(&self, video: &Video, output_dir: &Path) -> Result<(), FetchError> {
        let child = Command::new(&self.program)
            .args(fetch_args(video, output_dir))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| FetchError::Launch {
                program: self.program_label(),
                source,
            })?;

        let waited = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, child.wait_with_output())
                .await
                .map_err(|_| FetchError::TimedOut {
                    program: self.program_label(),
                    secs: limit.as_secs(),
                })?,
            None => child.wait_with_output().await,
        };

        let output = waited.map_err(|source| FetchError::Launch {
            program: self.program_label(),
            source,
        })?;

        if output.status.success() {
            debug!("Fetch tool finished");
            return Ok(());
        }

        Err(FetchError::NonZeroExit {
            program: self.program_label(),
            code: output.status.code(),
            stderr_head: first_line(&output.stderr),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn video() -> Video {
        Video::new("https://example.com/v/1/", "2020-08-12 02:16:22").unwrap()
    }

    #[test]
    fn test_fetch_args_shape() {
        let args = fetch_args(&video(), Path::new("/out/likes"));
        assert_eq!(
            args,
            vec![
                OsString::from("--write-info-json"),
                OsString::from("--ignore-errors"),
                OsString::from("--output"),
                OsString::from("/out/likes/%(id)s.%(ext)s"),
                OsString::from("https://example.com/v/1/"),
            ]
        );
    }

    #[test]
    fn test_command_fetcher_defaults() {
        let fetcher = CommandFetcher::default();
        assert_eq!(fetcher.program(), DEFAULT_FETCH_TOOL);
        assert!(fetcher.timeout().is_none());
    }

    #[test]
    fn test_resolve_program_missing_binary_is_none() {
        let fetcher = CommandFetcher::new("definitely-not-a-fetch-tool-xyz");
        assert!(fetcher.resolve_program().is_none());
    }

    #[tokio::test]
    async fn test_fetch_missing_program_is_launch_error() {
        let fetcher = CommandFetcher::new("definitely-not-a-fetch-tool-xyz");
        let err = fetcher
            .fetch(&video(), Path::new("/tmp"))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Launch { .. }), "got {err:?}");
        assert!(err.summary().contains("definitely-not-a-fetch-tool-xyz"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_fetch_zero_exit_is_success() {
        let fetcher = CommandFetcher::new("true");
        assert!(fetcher.fetch(&video(), Path::new("/tmp")).await.is_ok());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_fetch_non_zero_exit_without_stderr_synthesizes_summary() {
        let fetcher = CommandFetcher::new("false");
        let err = fetcher
            .fetch(&video(), Path::new("/tmp"))
            .await
            .unwrap_err();
        match &err {
            FetchError::NonZeroExit {
                code, stderr_head, ..
            } => {
                assert_eq!(*code, Some(1));
                assert!(stderr_head.is_none());
            }
            other => panic!("expected non-zero exit, got {other:?}"),
        }
        assert_eq!(err.summary(), "false exited with exit status 1");
    }
}
