//! Export categories and their file locations.

use std::fmt;
use std::path::{Path, PathBuf};

/// One of the video lists a data export can contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    /// Videos the user marked as favourite.
    Favourites,
    /// Videos the user liked.
    Likes,
    /// Videos the user uploaded.
    Uploads,
    /// Videos the user watched.
    History,
}

impl Category {
    /// Every category, in processing order.
    pub const ALL: [Self; 4] = [Self::Favourites, Self::Likes, Self::Uploads, Self::History];

    /// Returns the stable lowercase label (also the output subdirectory name).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Favourites => "favourites",
            Self::Likes => "likes",
            Self::Uploads => "uploads",
            Self::History => "history",
        }
    }

    /// Path components of the category file, relative to the export root.
    #[must_use]
    pub fn relative_components(self) -> [&'static str; 2] {
        match self {
            Self::Favourites => ["Activity", "Favorite Videos.txt"],
            Self::Likes => ["Activity", "Like List.txt"],
            Self::Uploads => ["Videos", "Videos.txt"],
            Self::History => ["Activity", "Video Browsing History.txt"],
        }
    }

    /// Location of the category file under `root`.
    #[must_use]
    pub fn file_in(self, root: &Path) -> PathBuf {
        self.relative_components()
            .iter()
            .fold(root.to_path_buf(), |path, part| path.join(part))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
