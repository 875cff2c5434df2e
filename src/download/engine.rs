//! Bounded worker pool running one fetch per video.
//!
//! # Concurrency Model
//!
//! - Videos are fed into a bounded job queue by a feeder task
//! - A fixed set of `workers` tasks pull from the queue until it is drained
//! - Each fetch runs in its own task, so a panic becomes a failed outcome
//! - Outcomes flow through a single channel drained by the caller, in completion order
//!
//! There is no retry: one failed invocation is one failed outcome.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::{Mutex, mpsc};
use tracing::{debug, info, instrument, warn};

use super::{BatchSummary, DownloadOutcome};
use crate::fetch::{FetchError, Fetcher};
use crate::record::Video;

/// Minimum allowed worker count.
const MIN_WORKERS: usize = 1;

/// Default number of concurrent fetch invocations.
pub const DEFAULT_PARALLEL: usize = 20;

/// Error type for orchestrator construction.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Invalid worker count provided.
    #[error("invalid worker count {value}: must be at least {MIN_WORKERS}")]
    InvalidWorkerCount {
        /// The invalid value that was provided.
        value: usize,
    },
}

/// Runs a [`Fetcher`] over a list of videos with at most `workers` invocations in flight.
///
/// Individual failures never fail the batch. Every input video yields exactly
/// one [`DownloadOutcome`].
#[derive(Clone)]
pub struct DownloadOrchestrator {
    fetcher: Arc<dyn Fetcher>,
    workers: usize,
}

impl fmt::Debug for DownloadOrchestrator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DownloadOrchestrator")
            .field("fetcher", &self.fetcher.name())
            .field("workers", &self.workers)
            .finish()
    }
}

impl DownloadOrchestrator {
    /// Creates an orchestrator around `fetcher` with a fixed worker count.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidWorkerCount`] if `workers` is zero.
    pub fn new(fetcher: Arc<dyn Fetcher>, workers: usize) -> Result<Self, EngineError> {
        if workers < MIN_WORKERS {
            return Err(EngineError::InvalidWorkerCount { value: workers });
        }
        debug!(workers, fetcher = fetcher.name(), "creating download orchestrator");
        Ok(Self { fetcher, workers })
    }

    /// Returns the configured worker count.
    #[must_use]
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Fetches every video into `output_dir`, handing each outcome to
    /// `on_outcome` as soon as it completes.
    ///
    /// `on_outcome` runs on the caller's task, one outcome at a time.
    #[instrument(
        skip(self, videos, on_outcome),
        fields(items = videos.len(), output_dir = %output_dir.display())
    )]
    pub async fn run<F>(
        &self,
        videos: Vec<Video>,
        output_dir: &Path,
        mut on_outcome: F,
    ) -> BatchSummary
    where
        F: FnMut(DownloadOutcome),
    {
        let mut summary = BatchSummary::default();
        if videos.is_empty() {
            debug!("nothing to fetch");
            return summary;
        }

        let worker_count = self.workers.min(videos.len());
        let output_dir = Arc::new(output_dir.to_path_buf());
        let (job_tx, job_rx) = mpsc::channel::<Video>(worker_count);
        let job_rx = Arc::new(Mutex::new(job_rx));
        let (result_tx, mut result_rx) = mpsc::unbounded_channel::<DownloadOutcome>();

        info!(workers = worker_count, "starting fetch batch");

        let mut handles = Vec::with_capacity(worker_count);
        for worker_id in 0..worker_count {
            handles.push(tokio::spawn(worker_loop(
                worker_id,
                Arc::clone(&job_rx),
                result_tx.clone(),
                Arc::clone(&self.fetcher),
                Arc::clone(&output_dir),
            )));
        }
        // Workers hold the only remaining senders; the drain below ends when they exit.
        drop(result_tx);

        let feeder = tokio::spawn(async move {
            for video in videos {
                if job_tx.send(video).await.is_err() {
                    break;
                }
            }
        });

        while let Some(outcome) = result_rx.recv().await {
            summary.record(&outcome);
            on_outcome(outcome);
        }

        if let Err(e) = feeder.await {
            warn!(error = %e, "job feeder task panicked");
        }
        for handle in handles {
            if let Err(e) = handle.await {
                warn!(error = %e, "fetch worker panicked");
            }
        }

        info!(
            succeeded = summary.succeeded(),
            failed = summary.failed(),
            total = summary.total(),
            "fetch batch complete"
        );
        summary
    }

    /// Runs the batch and returns every outcome in completion order.
    pub async fn collect(&self, videos: Vec<Video>, output_dir: &Path) -> Vec<DownloadOutcome> {
        let mut outcomes = Vec::with_capacity(videos.len());
        self.run(videos, output_dir, |outcome| outcomes.push(outcome))
            .await;
        outcomes
    }
}

async fn worker_loop(
    worker_id: usize,
    jobs: Arc<Mutex<mpsc::Receiver<Video>>>,
    results: mpsc::UnboundedSender<DownloadOutcome>,
    fetcher: Arc<dyn Fetcher>,
    output_dir: Arc<PathBuf>,
) {
    loop {
        let next = jobs.lock().await.recv().await;
        let Some(video) = next else {
            break;
        };

        debug!(worker_id, link = %video.link(), "fetch starting");
        let outcome = attempt(Arc::clone(&fetcher), video, Arc::clone(&output_dir)).await;
        if results.send(outcome).is_err() {
            debug!(worker_id, "outcome receiver closed");
            break;
        }
    }
}

/// One fetch invocation, isolated in its own task.
async fn attempt(
    fetcher: Arc<dyn Fetcher>,
    video: Video,
    output_dir: Arc<PathBuf>,
) -> DownloadOutcome {
    let task_video = video.clone();
    let handle = tokio::spawn(async move { fetcher.fetch(&task_video, &output_dir).await });

    let result = match handle.await {
        Ok(result) => result,
        Err(e) => Err(FetchError::Aborted {
            reason: e.to_string(),
        }),
    };

    match result {
        Ok(()) => DownloadOutcome::success(video),
        Err(e) => {
            warn!(link = %video.link(), error = %e, "fetch failed");
            DownloadOutcome::failure(video, e.summary())
        }
    }
}
