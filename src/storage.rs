//! Filesystem access for the cached bundle.
//!
//! The updater stats and replaces exactly one file. [`Filesystem`] is the
//! seam; [`LocalFilesystem`] writes to a sibling temp file and renames it
//! over the target so readers never observe a partially written bundle.

use chrono::{DateTime, Utc};
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Stat and replace operations on the cached bundle.
pub trait Filesystem {
    /// Last modification time of the regular file at `path`.
    ///
    /// `None` if the file is missing, is not a regular file, or its
    /// timestamp cannot be read.
    fn modified(&self, path: &Path) -> Option<DateTime<Utc>>;

    /// Replace the contents of `path` in a single step.
    fn write_atomic(&self, path: &Path, contents: &[u8]) -> io::Result<()>;
}

/// The host filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFilesystem;

impl Filesystem for LocalFilesystem {
    fn modified(&self, path: &Path) -> Option<DateTime<Utc>> {
        let metadata = fs::metadata(path).ok()?;
        if !metadata.is_file() {
            return None;
        }
        metadata.modified().ok().map(DateTime::<Utc>::from)
    }

    fn write_atomic(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        if let Some(dir) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }

        let temp_path = temp_path_for(path);
        let result = fs::write(&temp_path, contents).and_then(|_| fs::rename(&temp_path, path));

        if result.is_err() {
            let _ = fs::remove_file(&temp_path);
        }

        result
    }
}

/// Sibling temp file used while replacing `path`.
pub fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("cacert"));
    name.push(".tmp");
    path.with_file_name(name)
}
