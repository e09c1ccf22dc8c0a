//! Archive processing engine: detection, extraction, and creation.
//!
//! `unarc-core` turns a file path into a typed archive kind, extracts
//! archives into a destination directory with whole-percent progress
//! reporting, and builds flat ZIP archives from file lists. The engine
//! is synchronous and stateless between calls; concurrent operations on
//! different archives are independent.
//!
//! # Examples
//!
//! ```no_run
//! use unarc_core::NoopProgress;
//! use unarc_core::extract_archive;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let report = extract_archive("bundle.tar.gz", "/output/dir", &mut NoopProgress)?;
//! println!("extracted {} files", report.files_extracted());
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod copy;
pub mod creation;
pub mod engine;
pub mod error;
pub mod formats;
pub mod progress;
pub mod reader;
pub mod report;

pub mod test_utils;

// Re-export main API types
pub use creation::CreationRequest;
pub use creation::create_archive;
pub use engine::ExtractionJob;
pub use engine::JobStatus;
pub use engine::extract_archive;
pub use error::ArchiveError;
pub use error::Result;
pub use formats::ArchiveKind;
pub use formats::RECOGNIZED_EXTENSIONS;
pub use formats::detect;
pub use formats::is_archive_path;
pub use formats::scan_for_archives;
pub use progress::NoopProgress;
pub use progress::PercentTracker;
pub use progress::ProgressSink;
pub use reader::ArchiveEntry;
pub use reader::ArchiveReader;
pub use reader::open_reader;
pub use report::CapabilityWarning;
pub use report::CreationReport;
pub use report::ExtractionReport;
