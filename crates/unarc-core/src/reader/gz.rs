//! Bare gzip reading via `flate2`.
//!
//! A `.gz` file that is not a `.tar.gz` holds exactly one compressed
//! byte stream, so the reader presents a single pseudo-entry named after
//! the file stem (`notes.txt.gz` extracts to `notes.txt`).

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::path::PathBuf;

use flate2::read::GzDecoder;

use crate::Result;
use crate::formats::ArchiveKind;

use super::ArchiveEntry;
use super::ArchiveReader;
use super::EntryVisitor;

/// Bare gzip reader with one pseudo-entry.
#[derive(Debug)]
pub struct GzReader {
    path: PathBuf,
    entry_name: String,
}

impl GzReader {
    /// Opens a gzip file.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be opened. An invalid
    /// gzip header surfaces when the pseudo-entry's stream is read.
    pub fn open(path: &Path) -> Result<Self> {
        File::open(path)?;

        let entry_name = path
            .file_stem()
            .map_or_else(|| "extracted".to_string(), |s| s.to_string_lossy().to_string());

        Ok(Self {
            path: path.to_path_buf(),
            entry_name,
        })
    }
}

impl ArchiveReader for GzReader {
    fn kind(&self) -> ArchiveKind {
        ArchiveKind::Gz
    }

    fn count_entries(&self) -> Result<usize> {
        Ok(1)
    }

    fn for_each_entry(&self, visit: &mut EntryVisitor<'_>) -> Result<()> {
        let file = File::open(&self.path)?;
        let mut decoder = GzDecoder::new(BufReader::new(file));

        // The gzip trailer's size field is untrustworthy before
        // decompression, so the pseudo-entry reports 0.
        let meta = ArchiveEntry {
            name: self.entry_name.clone(),
            is_directory: false,
            size: 0,
        };
        visit(&meta, &mut decoder)
    }
}
