//! Export discovery: opening an export and collecting its video lists.
//!
//! A data export keeps one text file per category at a fixed location:
//!
//! | Category     | File                                   |
//! |--------------|----------------------------------------|
//! | `favourites` | `Activity/Favorite Videos.txt`         |
//! | `likes`      | `Activity/Like List.txt`               |
//! | `uploads`    | `Videos/Videos.txt`                    |
//! | `history`    | `Activity/Video Browsing History.txt`  |
//!
//! [`collect_videos`] scans each of them. A missing file yields an empty list.

mod category;
mod error;
mod source;

pub use category::Category;
pub use error::ArchiveError;
pub use source::ExportSource;

use std::path::Path;

use tracing::{info, instrument};

use crate::record::Video;
use crate::scanner::scan_file;

/// The videos of an export, grouped by category.
///
/// Each list keeps file order and is empty (never absent) when its file is missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArchiveVideoSet {
    /// Favourited videos.
    pub favourites: Vec<Video>,
    /// Liked videos.
    pub likes: Vec<Video>,
    /// Uploaded videos.
    pub uploads: Vec<Video>,
    /// Watch history.
    pub history: Vec<Video>,
}

impl ArchiveVideoSet {
    /// Returns the list for a category.
    #[must_use]
    pub fn get(&self, category: Category) -> &[Video] {
        match category {
            Category::Favourites => &self.favourites,
            Category::Likes => &self.likes,
            Category::Uploads => &self.uploads,
            Category::History => &self.history,
        }
    }

    /// Total number of videos across all categories.
    #[must_use]
    pub fn total(&self) -> usize {
        self.iter().map(|(_, videos)| videos.len()).sum()
    }

    /// Iterates over `(category, videos)` in processing order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, &[Video])> {
        Category::ALL.into_iter().map(|c| (c, self.get(c)))
    }

    fn slot_mut(&mut self, category: Category) -> &mut Vec<Video> {
        match category {
            Category::Favourites => &mut self.favourites,
            Category::Likes => &mut self.likes,
            Category::Uploads => &mut self.uploads,
            Category::History => &mut self.history,
        }
    }
}

/// Scans the four category files of an extracted export.
///
/// # Errors
///
/// Returns [`ArchiveError::Scan`] if a present file is unreadable or holds a
/// malformed record. Missing files are not errors.
#[instrument(fields(root = %root.display()))]
pub fn collect_videos(root: &Path) -> Result<ArchiveVideoSet, ArchiveError> {
    let mut set = ArchiveVideoSet::default();
    for category in Category::ALL {
        *set.slot_mut(category) = scan_file(&category.file_in(root))?;
    }

    info!(
        favourites = set.favourites.len(),
        likes = set.likes.len(),
        uploads = set.uploads.len(),
        history = set.history.len(),
        "Discovered export videos"
    );
    Ok(set)
}
