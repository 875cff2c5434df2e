//! CLI entry point for the archiver tool.

use std::process::ExitCode;

mod app;
mod cli;

/// Process exit outcome.
///
/// - `Success` (0): every attempted download succeeded, or nothing was attempted
/// - `Partial` (1): some downloads failed
/// - `Failure` (2): every download failed, or the run could not start
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ProcessExit {
    Success,
    Partial,
    Failure,
}

impl ProcessExit {
    fn code(self) -> u8 {
        match self {
            Self::Success => 0,
            Self::Partial => 1,
            Self::Failure => 2,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    match app::runtime::run_archiver().await {
        Ok(exit) => ExitCode::from(exit.code()),
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::from(ProcessExit::Failure.code())
        }
    }
}
