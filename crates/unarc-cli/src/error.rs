//! Error conversion utilities for CLI.
//!
//! Converts unarc-core's typed errors (thiserror) into user-friendly
//! contextual errors (anyhow) with actionable guidance.

use anyhow::Result;
use anyhow::anyhow;
use std::path::Path;
use unarc_core::ArchiveError;

/// Converts `ArchiveError` to a user-friendly anyhow error with context.
pub fn convert_archive_error(err: ArchiveError, archive: &Path) -> anyhow::Error {
    match err {
        ArchiveError::UnsupportedFormat { path } => {
            anyhow!(
                "Archive format not supported: {}\n\
                 HINT: Supported extensions: .zip, .7z, .tar, .tar.gz, .gz\n\
                 HINT: RAR archives are recognized but cannot be extracted or created.",
                path.display()
            )
        }
        ArchiveError::CorruptArchive { path, reason } => {
            anyhow!(
                "Invalid archive '{}': {reason}\n\
                 HINT: The archive may be corrupted or truncated.",
                path.display()
            )
        }
        ArchiveError::EmptySourceList => {
            anyhow!(
                "No source files given for '{}'\n\
                 HINT: Pass at least one file to add to the archive.",
                archive.display()
            )
        }
        ArchiveError::SourceNotFound { path } => {
            anyhow!(
                "Source file not found: {}\n\
                 HINT: Only regular files can be added to an archive.",
                path.display()
            )
        }
        ArchiveError::EntryRead {
            archive,
            entry,
            reason,
        } => {
            if entry.is_empty() {
                anyhow!("Failed while reading '{}': {reason}", archive.display())
            } else {
                anyhow!(
                    "Failed on entry '{entry}' in '{}': {reason}",
                    archive.display()
                )
            }
        }
        ArchiveError::ArchiveWrite { archive, reason } => {
            anyhow!("Failed to write '{}': {reason}", archive.display())
        }
        ArchiveError::Io(io_err) => {
            anyhow!(
                "I/O error while processing '{}': {io_err}",
                archive.display()
            )
        }
        ArchiveError::ProgressPanicked => anyhow::Error::from(err),
    }
}

/// Attaches archive context to a core result.
pub fn add_archive_context<T>(
    result: Result<T, ArchiveError>,
    archive: &Path,
) -> anyhow::Result<T> {
    result.map_err(|e| convert_archive_error(e, archive))
}
