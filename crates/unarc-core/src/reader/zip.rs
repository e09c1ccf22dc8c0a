//! ZIP reading via the in-process `zip` decoder.

use std::fs::File;
use std::path::Path;
use std::path::PathBuf;

use crate::ArchiveError;
use crate::Result;
use crate::formats::ArchiveKind;

use super::ArchiveEntry;
use super::ArchiveReader;
use super::EntryVisitor;

/// ZIP archive reader.
///
/// Entries are visited in central-directory order. Entry paths that
/// would escape the destination (absolute paths, `..` components) are
/// rejected rather than sanitized.
#[derive(Debug)]
pub struct ZipReader {
    path: PathBuf,
}

impl ZipReader {
    /// Opens a ZIP archive, verifying the central directory parses.
    ///
    /// # Errors
    ///
    /// Returns [`ArchiveError::CorruptArchive`] when the container is
    /// not a readable ZIP file.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        zip::ZipArchive::new(file).map_err(|e| ArchiveError::CorruptArchive {
            path: path.to_path_buf(),
            reason: format!("failed to open ZIP archive: {e}"),
        })?;
        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    fn reopen(&self) -> Result<zip::ZipArchive<File>> {
        let file = File::open(&self.path)?;
        zip::ZipArchive::new(file).map_err(|e| ArchiveError::CorruptArchive {
            path: self.path.clone(),
            reason: format!("failed to open ZIP archive: {e}"),
        })
    }
}

impl ArchiveReader for ZipReader {
    fn kind(&self) -> ArchiveKind {
        ArchiveKind::Zip
    }

    fn count_entries(&self) -> Result<usize> {
        Ok(self.reopen()?.len())
    }

    fn for_each_entry(&self, visit: &mut EntryVisitor<'_>) -> Result<()> {
        let mut archive = self.reopen()?;

        for index in 0..archive.len() {
            let mut entry =
                archive
                    .by_index(index)
                    .map_err(|e| ArchiveError::EntryRead {
                        archive: self.path.clone(),
                        entry: format!("#{index}"),
                        reason: format!("failed to read ZIP entry: {e}"),
                    })?;

            // Reject names that would land outside the destination.
            if entry.enclosed_name().is_none() {
                return Err(ArchiveError::EntryRead {
                    archive: self.path.clone(),
                    entry: entry.name().to_string(),
                    reason: "entry path escapes the destination directory".to_string(),
                });
            }

            let name = entry
                .name()
                .replace('\\', "/")
                .trim_end_matches('/')
                .to_string();
            let meta = ArchiveEntry {
                name,
                is_directory: entry.is_dir(),
                size: entry.size(),
            };

            if meta.is_directory {
                visit(&meta, &mut std::io::empty())?;
            } else {
                visit(&meta, &mut entry)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_utils::write_test_zip;
    use std::io::Read;
    use tempfile::TempDir;

    #[test]
    fn test_open_rejects_garbage() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("garbage.zip");
        std::fs::write(&path, b"this is not a zip file").unwrap();

        let result = ZipReader::open(&path);
        assert!(matches!(result, Err(ArchiveError::CorruptArchive { .. })));
    }

    #[test]
    fn test_count_matches_entries() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("three.zip");
        write_test_zip(&path, &[("a.txt", b"1"), ("b.txt", b"2"), ("c.txt", b"3")]);

        let reader = ZipReader::open(&path).unwrap();
        assert_eq!(reader.count_entries().unwrap(), 3);

        let mut visited = 0;
        reader
            .for_each_entry(&mut |_, _| {
                visited += 1;
                Ok(())
            })
            .unwrap();
        assert_eq!(visited, 3);
    }

    #[test]
    fn test_entry_metadata_and_content() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("one.zip");
        write_test_zip(&path, &[("dir/file.txt", b"hello zip")]);

        let reader = ZipReader::open(&path).unwrap();
        let mut seen = Vec::new();
        reader
            .for_each_entry(&mut |entry, stream| {
                let mut content = Vec::new();
                stream.read_to_end(&mut content)?;
                seen.push((entry.clone(), content));
                Ok(())
            })
            .unwrap();

        assert_eq!(seen.len(), 1);
        let (entry, content) = &seen[0];
        assert_eq!(entry.name, "dir/file.txt");
        assert!(!entry.is_directory);
        assert_eq!(entry.size, 9);
        assert_eq!(content, b"hello zip");
    }

    #[test]
    fn test_restartable_passes() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("two.zip");
        write_test_zip(&path, &[("a.txt", b"a"), ("b.txt", b"b")]);

        let reader = ZipReader::open(&path).unwrap();
        // Count, then walk twice: the sequence must repeat.
        assert_eq!(reader.count_entries().unwrap(), 2);
        for _ in 0..2 {
            let mut names = Vec::new();
            reader
                .for_each_entry(&mut |entry, _| {
                    names.push(entry.name.clone());
                    Ok(())
                })
                .unwrap();
            assert_eq!(names, vec!["a.txt", "b.txt"]);
        }
    }

    #[test]
    fn test_visitor_error_stops_walk() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("two.zip");
        write_test_zip(&path, &[("a.txt", b"a"), ("b.txt", b"b")]);

        let reader = ZipReader::open(&path).unwrap();
        let mut visited = 0;
        let result = reader.for_each_entry(&mut |_, _| {
            visited += 1;
            Err(ArchiveError::ProgressPanicked)
        });
        assert!(result.is_err());
        assert_eq!(visited, 1);
    }
}
