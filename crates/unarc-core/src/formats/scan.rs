//! Recursive folder scan for archive files.
//!
//! Supports folder-drop style features where a caller hands over a
//! directory and wants every archive inside it. The scan is advisory:
//! unreadable subtrees are logged and skipped rather than failing the
//! whole enumeration. That lenient policy applies only here, never to
//! the actual archive read/write path.

use std::path::Path;
use std::path::PathBuf;

use walkdir::WalkDir;

use crate::Result;
use crate::formats::detect::is_archive_path;

/// Recursively finds all archive files under `dir`.
///
/// Entries are returned in directory-walk order. Subdirectories that
/// cannot be read (permissions, races) are skipped with a warning.
///
/// # Errors
///
/// Returns an I/O error only if `dir` itself is not a readable
/// directory.
pub fn scan_for_archives<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();

    // Fail up front if the root itself is unusable.
    std::fs::read_dir(dir)?;

    let mut archives = Vec::new();
    for entry in WalkDir::new(dir).follow_links(false) {
        match entry {
            Ok(entry) => {
                if entry.file_type().is_file() && is_archive_path(entry.path()) {
                    archives.push(entry.path().to_path_buf());
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "skipping unreadable directory entry during scan");
            }
        }
    }

    tracing::info!(count = archives.len(), dir = %dir.display(), "archive scan complete");
    Ok(archives)
}
