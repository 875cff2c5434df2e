//! Integration tests driving the orchestrator with a real subprocess fetcher.

#![cfg(unix)]

mod support;

use std::sync::Arc;
use std::time::Duration;

use archiver_core::{CommandFetcher, DownloadOrchestrator, Reporter, Video};
use tempfile::TempDir;

fn video(link: &str) -> Video {
    Video::new(link, "2020-08-12 02:16:22").unwrap()
}

#[tokio::test]
async fn test_command_fetcher_batch_reports_each_outcome() {
    let work = TempDir::new().unwrap();
    let tool = support::write_fake_fetch_tool(work.path());
    let engine = DownloadOrchestrator::new(Arc::new(CommandFetcher::new(&tool)), 2).unwrap();
    let videos = vec![
        video("https://example.com/v/1/"),
        video("https://example.com/v/broken-2/"),
        video("https://example.com/v/3/"),
    ];

    let mut reporter = Reporter::new(Vec::new(), videos.len());
    let summary = engine
        .run(videos, &work.path().join("likes"), |outcome| {
            reporter.report(&outcome).unwrap();
        })
        .await;

    assert_eq!(summary.succeeded(), 2);
    assert_eq!(summary.failed(), 1);
    assert_eq!(reporter.completed(), 3);

    let text = String::from_utf8(reporter.into_inner()).unwrap();
    assert_eq!(text.lines().count(), 3);
    assert!(text.contains("(3/3)"));
    assert!(
        text.contains("broken-2/\tFAILED ❌: ERROR: Unsupported URL"),
        "{text}"
    );
    assert_eq!(text.matches("DONE ✅").count(), 2);
}

#[tokio::test]
async fn test_command_fetcher_missing_tool_fails_every_item() {
    let work = TempDir::new().unwrap();
    let fetcher = CommandFetcher::new(work.path().join("no-such-tool"));
    let engine = DownloadOrchestrator::new(Arc::new(fetcher), 4).unwrap();

    let outcomes = engine
        .collect(
            vec![video("https://example.com/v/1/"), video("https://example.com/v/2/")],
            work.path(),
        )
        .await;

    assert_eq!(outcomes.len(), 2);
    for outcome in &outcomes {
        assert!(!outcome.succeeded());
        assert!(outcome.error_summary().unwrap().contains("failed to launch"));
    }
}

#[tokio::test]
async fn test_command_fetcher_timeout_kills_slow_tool() {
    use std::os::unix::fs::PermissionsExt;

    let work = TempDir::new().unwrap();
    let tool = work.path().join("slow-fetch");
    std::fs::write(&tool, "#!/bin/sh\nsleep 30\n").unwrap();
    std::fs::set_permissions(&tool, std::fs::Permissions::from_mode(0o755)).unwrap();

    let fetcher = CommandFetcher::new(&tool).with_timeout(Some(Duration::from_millis(200)));
    let engine = DownloadOrchestrator::new(Arc::new(fetcher), 1).unwrap();

    let outcomes = engine
        .collect(vec![video("https://example.com/v/1/")], work.path())
        .await;

    assert_eq!(outcomes.len(), 1);
    assert!(outcomes[0].error_summary().unwrap().contains("timed out"));
}
