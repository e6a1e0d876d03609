//! Filesystem collaborator and path helpers.
//!
//! Mapping never walks the filesystem itself: every directory query goes
//! through the `DirectoryLister` seam so tests can run without real I/O.

use std::fs;
use std::path::{Path, PathBuf};

/// Read-only directory-listing collaborator.
pub trait DirectoryLister {
    /// List the immediate entries of `path`.
    ///
    /// `None` means the path was not queried or is unknown; callers treat
    /// it as empty.
    fn list(&self, path: &Path) -> Option<Vec<PathBuf>>;
}

/// A `DirectoryLister` backed by the real filesystem.
///
/// Entries come back sorted so discovery output is deterministic across
/// platforms and readdir orderings.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsDirectoryLister;

impl DirectoryLister for OsDirectoryLister {
    fn list(&self, path: &Path) -> Option<Vec<PathBuf>> {
        let entries = fs::read_dir(path).ok()?;
        let mut paths: Vec<PathBuf> = entries
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry.path()),
                Err(e) => {
                    tracing::warn!("skipping unreadable entry under {}: {}", path.display(), e);
                    None
                }
            })
            .collect();
        paths.sort();
        Some(paths)
    }
}

/// Turn a directory path into a recursive glob pattern (`<path>/**`).
pub fn recursive_glob(path: &Path) -> String {
    format!("{}/**", path.display())
}

/// Check whether a path carries an extension (a file-like entry) as opposed
/// to a bare directory name.
pub fn has_extension(path: &Path) -> bool {
    path.extension().is_some()
}

/// Check whether a path names a public native-library header.
pub fn is_header(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == crate::core::HEADER_EXTENSION)
        .unwrap_or(false)
}
