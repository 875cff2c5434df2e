//! Parallel download orchestration.
//!
//! [`DownloadOrchestrator`] fans a list of videos out to a fixed pool of
//! workers, each invoking a [`Fetcher`](crate::fetch::Fetcher), and fans the
//! per-item [`DownloadOutcome`]s back in through a single channel.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use std::sync::Arc;
//! use archiver_core::download::DownloadOrchestrator;
//! use archiver_core::fetch::CommandFetcher;
//! use archiver_core::record::Video;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let engine = DownloadOrchestrator::new(Arc::new(CommandFetcher::default()), 20)?;
//! let videos = vec![Video::new("https://example.com/v/1/", "2020-08-12 02:16:22")?];
//! let summary = engine
//!     .run(videos, Path::new("./likes"), |outcome| println!("{}", outcome.video()))
//!     .await;
//! println!("{} of {} succeeded", summary.succeeded(), summary.total());
//! # Ok(())
//! # }
//! ```

mod engine;
mod outcome;

pub use engine::{DEFAULT_PARALLEL, DownloadOrchestrator, EngineError};
pub use outcome::{BatchSummary, DownloadOutcome};
