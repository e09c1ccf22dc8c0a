//! Error types for archive operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `ArchiveError`.
pub type Result<T> = std::result::Result<T, ArchiveError>;

/// Errors that can occur during archive processing.
#[derive(Error, Debug)]
pub enum ArchiveError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Archive format is unrecognized, or no codec is available for it.
    #[error("unsupported archive format: {path}")]
    UnsupportedFormat {
        /// The path whose format could not be handled.
        path: PathBuf,
    },

    /// A creation request was submitted with no source files.
    #[error("creation request contains no source files")]
    EmptySourceList,

    /// A source file named in a creation request does not exist.
    #[error("source file not found: {path}")]
    SourceNotFound {
        /// The missing source path.
        path: PathBuf,
    },

    /// The archive container cannot be parsed.
    #[error("corrupt archive {path}: {reason}")]
    CorruptArchive {
        /// Path to the unreadable archive.
        path: PathBuf,
        /// Parser diagnostic.
        reason: String,
    },

    /// An entry's data could not be read from an otherwise-open archive.
    #[error("failed to read entry '{entry}' from {archive}: {reason}")]
    EntryRead {
        /// Path to the archive being read.
        archive: PathBuf,
        /// Archive-internal name of the failing entry.
        entry: String,
        /// Decoder diagnostic.
        reason: String,
    },

    /// The archive container being created could not be written.
    #[error("failed to write archive {archive}: {reason}")]
    ArchiveWrite {
        /// Path to the archive being written.
        archive: PathBuf,
        /// Encoder diagnostic.
        reason: String,
    },

    /// The caller-supplied progress sink panicked mid-job.
    #[error("progress sink panicked; extraction aborted")]
    ProgressPanicked,
}

impl ArchiveError {
    /// Returns `true` if this error is an input-validation failure.
    ///
    /// Validation errors are rejected before any I/O begins, so no
    /// partial output exists when one is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use unarc_core::ArchiveError;
    ///
    /// assert!(ArchiveError::EmptySourceList.is_validation());
    /// assert!(!ArchiveError::ProgressPanicked.is_validation());
    /// ```
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::EmptySourceList | Self::SourceNotFound { .. }
        )
    }

    /// Returns the archive path this error is attached to, if any.
    #[must_use]
    pub fn archive_path(&self) -> Option<&PathBuf> {
        match self {
            Self::UnsupportedFormat { path }
            | Self::SourceNotFound { path }
            | Self::CorruptArchive { path, .. } => Some(path),
            Self::EntryRead { archive, .. } | Self::ArchiveWrite { archive, .. } => Some(archive),
            _ => None,
        }
    }
}
