//! Operation reports returned by extraction and creation.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Report of an archive extraction.
///
/// `files_written` holds paths relative to the destination directory, in
/// extraction order, so a collaborator can present a listing or build a
/// secondary bundle from the output.
#[derive(Debug, Clone, Default)]
pub struct ExtractionReport {
    /// Relative paths of files written to the destination.
    pub files_written: Vec<PathBuf>,

    /// Number of directories created.
    pub directories_created: usize,

    /// Total bytes written to disk.
    pub bytes_written: u64,

    /// Duration of the extraction.
    pub duration: Duration,
}

impl ExtractionReport {
    /// Creates a new empty extraction report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of files written.
    #[must_use]
    pub fn files_extracted(&self) -> usize {
        self.files_written.len()
    }
}

/// Non-fatal warning attached to a creation report.
///
/// Capability warnings tell the caller that a requested feature was not
/// honored, so they never believe the output has a property it lacks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CapabilityWarning {
    /// A password was requested but the selected format's writer has no
    /// encryption support; the archive was written unprotected.
    PasswordUnsupported {
        /// Name of the format that lacks encryption support.
        format: &'static str,
    },
}

impl fmt::Display for CapabilityWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PasswordUnsupported { format } => write!(
                f,
                "password protection is not supported by the {format} writer; \
                 the archive was written WITHOUT protection"
            ),
        }
    }
}

/// Report of an archive creation.
#[derive(Debug, Clone, Default)]
pub struct CreationReport {
    /// Number of files added to the archive.
    pub files_added: usize,

    /// Total uncompressed bytes read from the sources.
    pub bytes_written: u64,

    /// Duration of the creation.
    pub duration: Duration,

    /// Capability warnings raised while writing.
    pub warnings: Vec<CapabilityWarning>,
}

impl CreationReport {
    /// Creates a new empty creation report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a capability warning.
    pub fn add_warning(&mut self, warning: CapabilityWarning) {
        self.warnings.push(warning);
    }

    /// Returns whether any warnings were raised.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}
