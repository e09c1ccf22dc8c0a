//! Archive creation.
//!
//! Creation is flat: each source file lands at the archive root under
//! its base name, regardless of where it came from on disk. Requests
//! are validated before the target file is touched, so a rejected
//! request never leaves a partial archive behind.

mod zip;

use std::path::Path;
use std::path::PathBuf;

use crate::ArchiveError;
use crate::Result;
use crate::formats::ArchiveKind;
use crate::formats::detect;
use crate::report::CreationReport;

/// A request to build a new archive from a list of source files.
///
/// The archive kind is derived from the target path's extension when
/// the request is executed.
#[derive(Debug, Clone)]
pub struct CreationRequest {
    target: PathBuf,
    sources: Vec<PathBuf>,
    password: Option<String>,
}

impl CreationRequest {
    /// Creates a request targeting the given archive path.
    #[must_use]
    pub fn new(target: impl Into<PathBuf>) -> Self {
        Self {
            target: target.into(),
            sources: Vec::new(),
            password: None,
        }
    }

    /// Appends a source file to the request.
    ///
    /// A path already in the request is dropped; the list keeps the
    /// first occurrence and its position.
    #[must_use]
    pub fn add_source(mut self, source: impl Into<PathBuf>) -> Self {
        let source = source.into();
        if !self.sources.contains(&source) {
            self.sources.push(source);
        }
        self
    }

    /// Appends every path in `sources` to the request, with the same
    /// duplicate handling as [`add_source`](Self::add_source).
    #[must_use]
    pub fn add_sources<I, P>(mut self, sources: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        for source in sources {
            self = self.add_source(source);
        }
        self
    }

    /// Requests password protection for the archive.
    ///
    /// Formats without protection support still produce an archive; the
    /// unmet request surfaces as a warning on the report.
    #[must_use]
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// The target archive path.
    #[must_use]
    pub fn target(&self) -> &Path {
        &self.target
    }

    /// The source files, in request order with duplicates removed.
    #[must_use]
    pub fn sources(&self) -> &[PathBuf] {
        &self.sources
    }

    pub(crate) fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }

    /// Rejects empty requests and requests naming missing sources.
    fn validate(&self) -> Result<()> {
        if self.sources.is_empty() {
            return Err(ArchiveError::EmptySourceList);
        }
        for source in &self.sources {
            if !source.is_file() {
                return Err(ArchiveError::SourceNotFound {
                    path: source.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Builds the archive described by `request`.
///
/// Validation runs first: an empty source list or a missing source
/// fails the request before the target file is created. The target's
/// parent directories are created as needed.
///
/// # Errors
///
/// Returns [`ArchiveError::EmptySourceList`] or
/// [`ArchiveError::SourceNotFound`] on validation failure,
/// [`ArchiveError::UnsupportedFormat`] when the target extension names
/// a kind the engine cannot write, or an I/O error from writing.
pub fn create_archive(request: &CreationRequest) -> Result<CreationReport> {
    request.validate()?;

    let kind = detect(&request.target)?;
    tracing::debug!(
        target = %request.target.display(),
        kind = kind.name(),
        sources = request.sources.len(),
        "creating archive"
    );

    match kind {
        ArchiveKind::Zip => {
            if let Some(parent) = request.target.parent()
                && !parent.as_os_str().is_empty()
            {
                std::fs::create_dir_all(parent)?;
            }
            zip::write_zip(request)
        }
        // No write-side codec for these kinds: fail closed before
        // touching the target.
        ArchiveKind::Rar
        | ArchiveKind::SevenZip
        | ArchiveKind::Tar
        | ArchiveKind::TarGz
        | ArchiveKind::Gz => Err(ArchiveError::UnsupportedFormat {
            path: request.target.clone(),
        }),
    }
}
