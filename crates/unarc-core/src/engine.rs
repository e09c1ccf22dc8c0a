//! The extraction engine.
//!
//! An [`ExtractionJob`] binds one source archive to one destination
//! directory. The archive kind is fixed when the job is prepared and is
//! never re-derived afterwards, so renaming the source mid-job cannot
//! change how it is decoded.
//!
//! Extraction runs in two passes over the archive: a counting pass that
//! fixes the progress denominator, then a content pass that writes
//! entries to disk. Existing destination files are overwritten without
//! prompting. A failure mid-pass leaves the entries written so far on
//! disk; the engine does not roll back partial output.

use std::fs::File;
use std::io::Read;
use std::panic::AssertUnwindSafe;
use std::panic::catch_unwind;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;
use std::time::Instant;

use crate::ArchiveError;
use crate::Result;
use crate::copy::CopyBuffer;
use crate::copy::CopyError;
use crate::copy::copy_streaming;
use crate::formats::ArchiveKind;
use crate::formats::detect;
use crate::progress::PercentTracker;
use crate::progress::ProgressSink;
use crate::reader::ArchiveEntry;
use crate::reader::ArchiveReader;
use crate::reader::open_reader;
use crate::report::ExtractionReport;

/// Lifecycle state of an extraction job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobStatus {
    /// Prepared but not yet run.
    Pending,
    /// Currently extracting.
    Running,
    /// Finished successfully.
    Completed,
    /// Aborted by an error; partial output may remain on disk.
    Failed,
}

/// One extraction of one archive into one destination directory.
#[derive(Debug)]
pub struct ExtractionJob {
    source: PathBuf,
    destination: PathBuf,
    kind: ArchiveKind,
    status: JobStatus,
    total_entries: usize,
    processed_entries: usize,
    last_error: Option<String>,
}

impl ExtractionJob {
    /// Prepares a job, deriving the archive kind from the source path.
    ///
    /// The kind derived here stays fixed for the life of the job. No
    /// file I/O happens until [`run`](Self::run).
    ///
    /// # Errors
    ///
    /// Returns [`ArchiveError::UnsupportedFormat`] when the source path
    /// does not carry a recognized archive extension.
    pub fn prepare(source: impl Into<PathBuf>, destination: impl Into<PathBuf>) -> Result<Self> {
        let source = source.into();
        let kind = detect(&source)?;
        Ok(Self {
            source,
            destination: destination.into(),
            kind,
            status: JobStatus::Pending,
            total_entries: 0,
            processed_entries: 0,
            last_error: None,
        })
    }

    /// Runs the extraction, reporting progress through `sink`.
    ///
    /// Progress values are whole percentages, strictly increasing, with
    /// `100` delivered exactly once at completion. A sink that panics
    /// aborts the job with [`ArchiveError::ProgressPanicked`].
    ///
    /// # Errors
    ///
    /// Any reader, I/O, or sink failure marks the job
    /// [`JobStatus::Failed`] and is returned; entries written before
    /// the failure remain on disk.
    pub fn run(&mut self, sink: &mut dyn ProgressSink) -> Result<ExtractionReport> {
        self.status = JobStatus::Running;
        tracing::info!(
            source = %self.source.display(),
            destination = %self.destination.display(),
            kind = self.kind.name(),
            "starting extraction"
        );

        match self.execute(sink) {
            Ok(report) => {
                self.status = JobStatus::Completed;
                tracing::info!(
                    source = %self.source.display(),
                    files = report.files_extracted(),
                    bytes = report.bytes_written,
                    "extraction completed"
                );
                Ok(report)
            }
            Err(e) => {
                self.status = JobStatus::Failed;
                self.last_error = Some(e.to_string());
                tracing::error!(
                    source = %self.source.display(),
                    error = %e,
                    "extraction failed"
                );
                Err(e)
            }
        }
    }

    fn execute(&mut self, sink: &mut dyn ProgressSink) -> Result<ExtractionReport> {
        let start = Instant::now();
        std::fs::create_dir_all(&self.destination)?;

        let reader = open_reader(&self.source, self.kind)?;
        let total = reader.count_entries()?;
        self.total_entries = total;
        self.processed_entries = 0;

        let mut tracker = PercentTracker::new(total);
        let mut report = ExtractionReport::new();

        let source = self.source.clone();
        let destination = self.destination.clone();
        let mut buffer = CopyBuffer::new();

        let walk_result = reader.for_each_entry(&mut |entry, stream| {
            write_entry(&source, &destination, entry, stream, &mut buffer, &mut report)?;
            if let Some(percent) = tracker.advance() {
                emit(sink, percent)?;
            }
            Ok(())
        });
        self.processed_entries = tracker.processed();
        walk_result?;

        if let Some(percent) = tracker.finish() {
            emit(sink, percent)?;
        }

        report.duration = start.elapsed();
        Ok(report)
    }

    /// The source archive path.
    #[must_use]
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// The destination directory.
    #[must_use]
    pub fn destination(&self) -> &Path {
        &self.destination
    }

    /// The archive kind fixed at preparation.
    #[must_use]
    pub const fn kind(&self) -> ArchiveKind {
        self.kind
    }

    /// The job's current lifecycle state.
    #[must_use]
    pub const fn status(&self) -> JobStatus {
        self.status
    }

    /// Entries counted in the source archive; 0 before the job runs.
    #[must_use]
    pub const fn total_entries(&self) -> usize {
        self.total_entries
    }

    /// Entries handled so far in the content pass.
    #[must_use]
    pub const fn processed_entries(&self) -> usize {
        self.processed_entries
    }

    /// Message of the error that failed the job, if any.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}

/// Resolves an entry name beneath the destination directory.
///
/// Entry names come straight out of attacker-controlled archive
/// headers, so this is the single gate every codec's entries pass
/// through before anything touches the filesystem: absolute names and
/// names with `..` components are rejected outright rather than
/// resolved.
fn resolve_entry_path(destination: &Path, name: &str) -> Option<PathBuf> {
    let relative = Path::new(name);
    if relative
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
    {
        Some(destination.join(relative))
    } else {
        None
    }
}

/// Writes one entry beneath the destination directory.
fn write_entry(
    source: &Path,
    destination: &Path,
    entry: &ArchiveEntry,
    stream: &mut dyn Read,
    buffer: &mut CopyBuffer,
    report: &mut ExtractionReport,
) -> Result<()> {
    let out_path = resolve_entry_path(destination, &entry.name).ok_or_else(|| {
        ArchiveError::EntryRead {
            archive: source.to_path_buf(),
            entry: entry.name.clone(),
            reason: "entry path escapes the destination directory".to_string(),
        }
    })?;

    if entry.is_directory {
        std::fs::create_dir_all(&out_path)?;
        report.directories_created += 1;
        return Ok(());
    }

    if let Some(parent) = out_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    // Overwrite-always: File::create truncates an existing file.
    let mut file = File::create(&out_path)?;
    let written = copy_streaming(stream, &mut file, buffer).map_err(|e| match e {
        CopyError::Read(err) => ArchiveError::EntryRead {
            archive: source.to_path_buf(),
            entry: entry.name.clone(),
            reason: format!("failed to read entry content: {err}"),
        },
        CopyError::Write(err) => ArchiveError::Io(err),
    })?;

    report.bytes_written += written;
    report.files_written.push(PathBuf::from(&entry.name));
    Ok(())
}

/// Forwards one percentage to the sink, converting a sink panic into an
/// error so a faulty callback cannot unwind through the engine.
fn emit(sink: &mut dyn ProgressSink, percent: u8) -> Result<()> {
    catch_unwind(AssertUnwindSafe(|| sink.on_progress(percent)))
        .map_err(|_| ArchiveError::ProgressPanicked)
}

/// Extracts `source` into `destination` in one call.
///
/// Convenience wrapper over [`ExtractionJob`] for callers that do not
/// need job state.
///
/// # Errors
///
/// Same failure modes as [`ExtractionJob::run`].
pub fn extract_archive(
    source: impl Into<PathBuf>,
    destination: impl Into<PathBuf>,
    sink: &mut dyn ProgressSink,
) -> Result<ExtractionReport> {
    let mut job = ExtractionJob::prepare(source, destination)?;
    job.run(sink)
}
