//! Archiver Core Library
//!
//! This library provides the core functionality for the archiver tool, which
//! reads the video lists out of a TikTok personal data export and downloads
//! every referenced video with an external fetch tool, in parallel.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`record`] - The `Video` value type and its normalization
//! - [`scanner`] - Line-oriented scanner for export category files
//! - [`archive`] - Export opening (directory or zip) and per-category collection
//! - [`fetch`] - The external fetch tool seam
//! - [`download`] - Bounded-concurrency download orchestrator
//! - [`report`] - Progress and result lines

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod archive;
pub mod download;
pub mod fetch;
pub mod record;
pub mod report;
pub mod scanner;

// Re-export commonly used types
pub use archive::{ArchiveError, ArchiveVideoSet, Category, ExportSource, collect_videos};
pub use download::{
    BatchSummary, DEFAULT_PARALLEL, DownloadOrchestrator, DownloadOutcome, EngineError,
};
pub use fetch::{CommandFetcher, DEFAULT_FETCH_TOOL, FetchError, Fetcher};
pub use record::{RecordError, Video};
pub use report::Reporter;
pub use scanner::{RecordScanner, ScanError, scan_file, scan_str};
