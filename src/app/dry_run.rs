//! Dry-run listing of discovered videos.

use std::io::Write;

use anyhow::Result;
use archiver_core::{ArchiveVideoSet, Category, Video};
use serde::Serialize;

#[derive(Serialize)]
struct PreviewEntry<'a> {
    category: &'a str,
    #[serde(flatten)]
    video: &'a Video,
}

/// Writes the videos of `categories` to `out`, as text or JSON lines.
pub(crate) fn write_preview<W: Write>(
    out: &mut W,
    set: &ArchiveVideoSet,
    categories: &[Category],
    json: bool,
) -> Result<()> {
    for category in categories {
        let videos = set.get(*category);
        if json {
            for video in videos {
                let entry = PreviewEntry {
                    category: category.as_str(),
                    video,
                };
                writeln!(out, "{}", serde_json::to_string(&entry)?)?;
            }
            continue;
        }

        writeln!(out, "{category}: {} videos", videos.len())?;
        for video in videos {
            writeln!(out, "  {}\t{}", video.timestamp(), video.link())?;
        }
    }

    if !json {
        writeln!(out, "Dry run - no videos downloaded")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set() -> ArchiveVideoSet {
        ArchiveVideoSet {
            likes: vec![
                Video::new("https://example.com/v/1/", "2020-08-12 02:16:22").unwrap(),
                Video::new("https://example.com/v/2/", "2020-08-13 10:00:00").unwrap(),
            ],
            ..ArchiveVideoSet::default()
        }
    }

    #[test]
    fn test_write_preview_text_lists_counts_and_links() {
        let mut out = Vec::new();
        write_preview(&mut out, &set(), &[Category::Favourites, Category::Likes], false).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("favourites: 0 videos"));
        assert!(text.contains("likes: 2 videos"));
        assert!(text.contains("  2020-08-12T02:16:22\thttps://example.com/v/1/"));
        assert!(text.ends_with("Dry run - no videos downloaded\n"));
    }

    #[test]
    fn test_write_preview_json_lines() {
        let mut out = Vec::new();
        write_preview(&mut out, &set(), &[Category::Likes], true).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 2);
        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["category"], "likes");
        assert_eq!(first["link"], "https://example.com/v/1/");
        assert_eq!(first["timestamp"], "2020-08-12T02:16:22");
    }
}
