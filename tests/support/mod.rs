//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const LIKES: &str = "Date: 2020-08-12 02:16:22\n\
Video Link: https://www.tiktokv.com/share/video/6860000000000000001/\n\
\n\
Date: 2020-08-13 10:00:00\n\
Video Link: https://www.tiktokv.com/share/video/broken-6860000000000000002/\n";

pub const FAVOURITES: &str = "Date: 2021-01-02 03:04:05\n\
Video Link: https://www.tiktokv.com/share/video/6900000000000000001/\n";

/// Writes `content` to `root/relative`, creating parent directories.
pub fn write_export_file(root: &Path, relative: &str, content: &str) -> PathBuf {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    path
}

/// Builds an export folder with likes and favourites lists.
pub fn write_export_dir(root: &Path) {
    write_export_file(root, "Activity/Like List.txt", LIKES);
    write_export_file(root, "Activity/Favorite Videos.txt", FAVOURITES);
}

/// Builds an export zip at `path` holding the given `(entry, content)` pairs.
pub fn write_export_zip(path: &Path, entries: &[(&str, &str)]) {
    let file = fs::File::create(path).unwrap();
    let mut zip = zip::ZipWriter::new(file);
    let options =
        zip::write::FileOptions::default().compression_method(zip::CompressionMethod::Stored);
    for (name, content) in entries {
        zip.start_file(*name, options).unwrap();
        zip.write_all(content.as_bytes()).unwrap();
    }
    zip.finish().unwrap();
}

/// Writes an executable stand-in for the fetch tool.
///
/// It succeeds unless the last argument (the video link) contains `broken`.
#[cfg(unix)]
pub fn write_fake_fetch_tool(dir: &Path) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join("fake-fetch");
    let script = "#!/bin/sh\n\
for last; do :; done\n\
case \"$last\" in\n\
  *broken*) echo \"ERROR: Unsupported URL: $last\" >&2; exit 1 ;;\n\
esac\n\
exit 0\n";
    fs::write(&path, script).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}
