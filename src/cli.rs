//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use archiver_core::{Category, DEFAULT_FETCH_TOOL, DEFAULT_PARALLEL};
use clap::{Parser, ValueEnum};

/// Download the videos referenced by a TikTok data export.
///
/// Reads the favourites, likes, uploads, and watch history lists out of an
/// export (a folder or the downloaded .zip) and fetches each selected list
/// with youtube-dl, in parallel.
#[derive(Parser, Debug, Clone)]
#[command(name = "tiktok-archiver")]
#[command(author, version, about)]
pub struct Args {
    /// Path to the data export: an extracted folder or the .zip file
    pub archive_path: PathBuf,

    /// Directory that receives one subfolder per saved category
    pub output_path: PathBuf,

    /// Category to download (repeatable)
    #[arg(long = "save", value_enum)]
    pub save: Vec<CategoryArg>,

    /// Number of fetch tool instances run in parallel
    #[arg(
        short = 'p',
        long,
        default_value_t = DEFAULT_PARALLEL as u16,
        value_parser = clap::value_parser!(u16).range(1..)
    )]
    pub parallel: u16,

    /// youtube-dl compatible program used to fetch each video
    #[arg(long, default_value = DEFAULT_FETCH_TOOL)]
    pub fetch_tool: String,

    /// Kill a fetch that runs longer than this many seconds (0 to disable)
    #[arg(long, default_value_t = 0)]
    pub timeout: u64,

    /// List discovered videos without downloading anything
    #[arg(long)]
    pub dry_run: bool,

    /// With --dry-run, print one JSON object per video
    #[arg(long, requires = "dry_run")]
    pub json: bool,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored log output
    #[arg(long)]
    pub no_color: bool,
}

/// CLI spelling of [`Category`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CategoryArg {
    Favourites,
    Likes,
    Uploads,
    History,
}

impl From<CategoryArg> for Category {
    fn from(value: CategoryArg) -> Self {
        match value {
            CategoryArg::Favourites => Self::Favourites,
            CategoryArg::Likes => Self::Likes,
            CategoryArg::Uploads => Self::Uploads,
            CategoryArg::History => Self::History,
        }
    }
}

impl Args {
    /// Selected categories in processing order, without duplicates.
    pub fn selected_categories(&self) -> Vec<Category> {
        Category::ALL
            .into_iter()
            .filter(|category| self.save.iter().any(|arg| Category::from(*arg) == *category))
            .collect()
    }
}
