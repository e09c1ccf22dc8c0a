//! TAR and TAR.GZ reading via the `tar` crate, with `flate2` stacked on
//! top for the gzip-compressed variant.

use std::fs::File;
use std::io::BufReader;
use std::io::Read;
use std::path::Path;
use std::path::PathBuf;

use flate2::read::GzDecoder;

use crate::ArchiveError;
use crate::Result;
use crate::formats::ArchiveKind;

use super::ArchiveEntry;
use super::ArchiveReader;
use super::EntryVisitor;

/// TAR archive reader, optionally gzip-compressed.
///
/// TAR is stream-oriented, so every pass re-reads the file from the
/// start; restartability comes from holding only the path.
#[derive(Debug)]
pub struct TarReader {
    path: PathBuf,
    kind: ArchiveKind,
}

impl TarReader {
    /// Opens a TAR archive.
    ///
    /// `kind` must be [`ArchiveKind::Tar`] or [`ArchiveKind::TarGz`];
    /// it selects whether a gzip decoder is stacked on the file.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be opened. Structural
    /// corruption surfaces on the first entry walk.
    pub fn open(path: &Path, kind: ArchiveKind) -> Result<Self> {
        debug_assert!(matches!(kind, ArchiveKind::Tar | ArchiveKind::TarGz));
        File::open(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            kind,
        })
    }

    fn open_archive(&self) -> Result<tar::Archive<Box<dyn Read>>> {
        let file = File::open(&self.path)?;
        let reader = BufReader::new(file);
        let stream: Box<dyn Read> = if self.kind == ArchiveKind::TarGz {
            Box::new(GzDecoder::new(reader))
        } else {
            Box::new(reader)
        };
        Ok(tar::Archive::new(stream))
    }

    /// Shared walk used by both passes so they present identical
    /// sequences. Entry kinds TAR cannot express as file or directory
    /// (symlinks, hardlinks, specials) are skipped in both passes.
    fn walk(&self, visit: &mut EntryVisitor<'_>) -> Result<()> {
        let mut archive = self.open_archive()?;
        let entries = archive
            .entries()
            .map_err(|e| ArchiveError::CorruptArchive {
                path: self.path.clone(),
                reason: format!("failed to read TAR entries: {e}"),
            })?;

        for entry_result in entries {
            let mut entry = entry_result.map_err(|e| ArchiveError::CorruptArchive {
                path: self.path.clone(),
                reason: format!("failed to read TAR entry header: {e}"),
            })?;

            let entry_type = entry.header().entry_type();
            let is_directory = entry_type.is_dir();
            if !is_directory && entry_type != tar::EntryType::Regular {
                tracing::warn!(
                    archive = %self.path.display(),
                    kind = ?entry_type,
                    "skipping TAR entry type the engine cannot extract"
                );
                continue;
            }

            let name = entry
                .path()
                .map_err(|e| ArchiveError::CorruptArchive {
                    path: self.path.clone(),
                    reason: format!("invalid TAR entry path: {e}"),
                })?
                .to_string_lossy()
                .trim_end_matches('/')
                .to_string();

            let meta = ArchiveEntry {
                name,
                is_directory,
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

impl ArchiveReader for TarReader {
    fn kind(&self) -> ArchiveKind {
        self.kind
    }

    fn count_entries(&self) -> Result<usize> {
        let mut count = 0;
        self.walk(&mut |_, _| {
            count += 1;
            Ok(())
        })?;
        Ok(count)
    }

    fn for_each_entry(&self, visit: &mut EntryVisitor<'_>) -> Result<()> {
        self.walk(visit)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_utils::TarFixture;
    use std::io::Read;
    use tempfile::TempDir;

    #[test]
    fn test_count_and_walk_plain_tar() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("data.tar");
        TarFixture::new()
            .file("a.txt", b"alpha")
            .dir("sub/")
            .file("sub/b.txt", b"beta")
            .write_plain(&path);

        let reader = TarReader::open(&path, ArchiveKind::Tar).unwrap();
        assert_eq!(reader.count_entries().unwrap(), 3);

        let mut names = Vec::new();
        reader
            .for_each_entry(&mut |entry, stream| {
                let mut content = Vec::new();
                stream.read_to_end(&mut content)?;
                names.push((entry.name.clone(), entry.is_directory, content));
                Ok(())
            })
            .unwrap();

        assert_eq!(names[0], ("a.txt".to_string(), false, b"alpha".to_vec()));
        assert_eq!(names[1], ("sub".to_string(), true, Vec::new()));
        assert_eq!(names[2], ("sub/b.txt".to_string(), false, b"beta".to_vec()));
    }

    #[test]
    fn test_tar_gz_roundtrip_read() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("data.tar.gz");
        TarFixture::new().file("f.txt", b"gzipped").write_gz(&path);

        let reader = TarReader::open(&path, ArchiveKind::TarGz).unwrap();
        assert_eq!(reader.count_entries().unwrap(), 1);

        let mut content = Vec::new();
        reader
            .for_each_entry(&mut |_, stream| {
                stream.read_to_end(&mut content)?;
                Ok(())
            })
            .unwrap();
        assert_eq!(content, b"gzipped");
    }

    #[test]
    fn test_symlinks_skipped_in_both_passes() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("links.tar");
        TarFixture::new()
            .file("real.txt", b"content")
            .symlink("link.txt", "real.txt")
            .write_plain(&path);

        let reader = TarReader::open(&path, ArchiveKind::Tar).unwrap();
        // The symlink is excluded from the count and from the walk.
        assert_eq!(reader.count_entries().unwrap(), 1);

        let mut names = Vec::new();
        reader
            .for_each_entry(&mut |entry, _| {
                names.push(entry.name.clone());
                Ok(())
            })
            .unwrap();
        assert_eq!(names, vec!["real.txt"]);
    }

    #[test]
    fn test_truncated_tar_surfaces_corrupt_archive() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("cut.tar");
        let data = TarFixture::new()
            .file("a.txt", b"0123456789")
            .file("b.txt", b"0123456789")
            .build_plain();
        // Cut inside the second entry's header block.
        std::fs::write(&path, &data[..600]).unwrap();

        let reader = TarReader::open(&path, ArchiveKind::Tar).unwrap();
        let result = reader.count_entries();
        assert!(result.is_err());
    }
}
