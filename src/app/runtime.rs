//! Top-level run: open the export, collect videos, download each selected category.

use std::io::{self, IsTerminal};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use archiver_core::{
    BatchSummary, Category, CommandFetcher, DownloadOrchestrator, ExportSource, Reporter, Video,
    collect_videos,
};
use tracing::{debug, info, warn};

use crate::ProcessExit;
use crate::app::progress::CategoryProgress;
use crate::app::{config, dry_run, exit_handler, terminal};

pub(crate) async fn run_archiver() -> Result<ProcessExit> {
    let (cli, cli_sources) = config::parse_cli_with_sources();
    let file_config = config::load_default_file_config()?;
    let args = config::apply_config_defaults(cli, &cli_sources, file_config.as_ref());

    let default_level = config::resolve_default_log_level(&args);
    terminal::init_tracing(default_level, terminal::is_no_color_requested(&args));

    debug!(?args, "CLI arguments parsed");
    info!("Archiver starting");

    let source = ExportSource::open(&args.archive_path)
        .with_context(|| format!("Cannot open export '{}'", args.archive_path.display()))?;
    let videos = collect_videos(source.root()).context("Failed to read export video lists")?;

    let selected = args.selected_categories();

    if args.dry_run {
        let categories = if selected.is_empty() {
            Category::ALL.to_vec()
        } else {
            selected
        };
        let mut stdout = io::stdout().lock();
        dry_run::write_preview(&mut stdout, &videos, &categories, args.json)?;
        return Ok(ProcessExit::Success);
    }

    if selected.is_empty() {
        for (category, list) in videos.iter() {
            info!(%category, videos = list.len(), "Found category");
        }
        info!(
            total = videos.total(),
            "No categories selected. Pass --save <favourites|likes|uploads|history> to download."
        );
        return Ok(ProcessExit::Success);
    }

    let timeout = (args.timeout > 0).then(|| Duration::from_secs(args.timeout));
    let fetcher = CommandFetcher::new(&args.fetch_tool).with_timeout(timeout);
    match fetcher.resolve_program() {
        Some(path) => debug!(path = %path.display(), "Resolved fetch tool"),
        None => warn!(
            tool = %args.fetch_tool,
            "Fetch tool not found on PATH; every download will fail"
        ),
    }

    let engine = DownloadOrchestrator::new(Arc::new(fetcher), usize::from(args.parallel))
        .context("invalid download configuration")?;

    let use_bar = terminal::should_use_progress_bar(
        io::stderr().is_terminal(),
        args.quiet,
        terminal::is_dumb_terminal(),
    );

    let mut totals = BatchSummary::default();
    for category in selected {
        let list = videos.get(category);
        if list.is_empty() {
            info!(%category, "No videos in category, skipping");
            continue;
        }

        let output_dir = args.output_path.join(category.as_str());
        let summary =
            download_category(&engine, category, list.to_vec(), &output_dir, use_bar).await;
        totals.merge(summary);
    }

    info!(
        succeeded = totals.succeeded(),
        failed = totals.failed(),
        total = totals.total(),
        "Archive run complete"
    );

    Ok(exit_handler::determine_exit_outcome(
        totals.succeeded(),
        totals.failed(),
    ))
}

async fn download_category(
    engine: &DownloadOrchestrator,
    category: Category,
    videos: Vec<Video>,
    output_dir: &Path,
    use_bar: bool,
) -> BatchSummary {
    let display_dir = std::path::absolute(output_dir).unwrap_or_else(|_| output_dir.to_path_buf());
    let progress = CategoryProgress::new(use_bar, videos.len(), category.as_str());
    let mut reporter = Reporter::new(progress.writer(), videos.len());

    if let Err(e) = reporter.header(&display_dir) {
        warn!(error = %e, "Failed to write progress header");
    }

    let summary = engine
        .run(videos, output_dir, |outcome| {
            progress.advance();
            if let Err(e) = reporter.report(&outcome) {
                warn!(error = %e, "Failed to write progress line");
            }
        })
        .await;

    if let Err(e) = reporter.finish(category.as_str()) {
        warn!(error = %e, "Failed to write category summary");
    }
    progress.finish();

    summary
}
