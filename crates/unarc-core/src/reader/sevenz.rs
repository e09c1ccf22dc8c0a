//! 7z reading via the `sevenz-rust2` codec.
//!
//! The archive metadata is parsed once at open time to cache the entry
//! list; the content pass goes through the crate's extract-callback API
//! so entry bytes stream through the visitor without an intermediate
//! extraction directory.

use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::path::PathBuf;

use sevenz_rust2::Password;

use crate::ArchiveError;
use crate::Result;
use crate::formats::ArchiveKind;

use super::ArchiveEntry;
use super::ArchiveReader;
use super::EntryVisitor;

/// 7z archive reader.
#[derive(Debug)]
pub struct SevenZReader {
    path: PathBuf,
    entries: Vec<ArchiveEntry>,
}

impl SevenZReader {
    /// Opens a 7z archive and caches its entry metadata.
    ///
    /// # Errors
    ///
    /// Returns [`ArchiveError::CorruptArchive`] when the header does not
    /// parse. Encrypted archives are reported as corrupt with a reason
    /// naming the password requirement.
    pub fn open(path: &Path) -> Result<Self> {
        let mut file = File::open(path)?;
        let password = Password::empty();
        let archive = sevenz_rust2::Archive::read(&mut file, &password).map_err(|e| {
            let err_str = e.to_string().to_lowercase();
            let reason = if err_str.contains("encrypt") || err_str.contains("password") {
                "archive is password-protected; encrypted 7z archives are not supported"
                    .to_string()
            } else {
                format!("failed to open 7z archive: {e}")
            };
            ArchiveError::CorruptArchive {
                path: path.to_path_buf(),
                reason,
            }
        })?;

        let entries = archive
            .files
            .iter()
            .map(|f| ArchiveEntry {
                name: f.name.replace('\\', "/").trim_end_matches('/').to_string(),
                is_directory: f.is_directory(),
                size: f.size,
            })
            .collect();

        Ok(Self {
            path: path.to_path_buf(),
            entries,
        })
    }
}

impl ArchiveReader for SevenZReader {
    fn kind(&self) -> ArchiveKind {
        ArchiveKind::SevenZip
    }

    fn count_entries(&self) -> Result<usize> {
        Ok(self.entries.len())
    }

    fn for_each_entry(&self, visit: &mut EntryVisitor<'_>) -> Result<()> {
        let mut file = File::open(&self.path)?;

        // The callback cannot return our error type, so the first
        // visitor failure is parked here and re-surfaced afterwards.
        let mut visitor_error: Option<ArchiveError> = None;

        let extract_fn = |entry: &sevenz_rust2::ArchiveEntry,
                          reader: &mut dyn Read,
                          _dest: &PathBuf|
         -> std::result::Result<bool, sevenz_rust2::Error> {
            let meta = ArchiveEntry {
                name: entry.name.replace('\\', "/").trim_end_matches('/').to_string(),
                is_directory: entry.is_directory(),
                size: entry.size,
            };

            let outcome = if meta.is_directory {
                visit(&meta, &mut std::io::empty())
            } else {
                visit(&meta, reader)
            };

            match outcome {
                Ok(()) => Ok(true),
                Err(e) => {
                    visitor_error = Some(e);
                    Err(sevenz_rust2::Error::Other("entry visitor failed".into()))
                }
            }
        };

        let result =
            sevenz_rust2::decompress_with_extract_fn(&mut file, Path::new("."), extract_fn);

        if let Some(e) = visitor_error {
            return Err(e);
        }
        result.map_err(|e| ArchiveError::EntryRead {
            archive: self.path.clone(),
            entry: String::new(),
            reason: format!("7z decompression failed: {e}"),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_rejects_garbage() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("garbage.7z");
        std::fs::write(&path, b"definitely not a 7z archive").unwrap();

        let result = SevenZReader::open(&path);
        assert!(matches!(result, Err(ArchiveError::CorruptArchive { .. })));
    }
}
