//! Test fixtures for archive reading and extraction tests.
//!
//! Helpers here write small archives to disk so tests exercise the same
//! file-backed paths production code uses.
//!
//! # Panics
//!
//! All helpers panic on I/O errors; they are intended for test use only.

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::io::Cursor;
use std::io::Write;
use std::path::Path;

use flate2::Compression;
use flate2::write::GzEncoder;

/// Writes a ZIP archive containing the given (path, content) entries.
///
/// Files are stored uncompressed with mode 0o644.
pub fn write_test_zip(path: &Path, entries: &[(&str, &[u8])]) {
    use zip::write::SimpleFileOptions;
    use zip::write::ZipWriter;

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Stored)
        .unix_permissions(0o644);

    for (name, data) in entries {
        zip.start_file(*name, options).unwrap();
        zip.write_all(data).unwrap();
    }

    let buffer = zip.finish().unwrap().into_inner();
    std::fs::write(path, buffer).unwrap();
}

/// Writes a bare gzip file compressing the given bytes.
pub fn write_test_gz(path: &Path, content: &[u8]) {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(content).unwrap();
    std::fs::write(path, encoder.finish().unwrap()).unwrap();
}

/// Builder for TAR test archives with files, directories, and symlinks.
pub struct TarFixture {
    builder: tar::Builder<Vec<u8>>,
}

impl TarFixture {
    /// Creates an empty fixture.
    #[must_use]
    pub fn new() -> Self {
        Self {
            builder: tar::Builder::new(Vec::new()),
        }
    }

    /// Adds a regular file with mode 0o644.
    #[must_use]
    pub fn file(mut self, path: &str, data: &[u8]) -> Self {
        let mut header = tar::Header::new_gnu();
        header.set_size(data.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        self.builder.append_data(&mut header, path, data).unwrap();
        self
    }

    /// Adds a directory entry.
    #[must_use]
    pub fn dir(mut self, path: &str) -> Self {
        let mut header = tar::Header::new_gnu();
        header.set_size(0);
        header.set_mode(0o755);
        header.set_entry_type(tar::EntryType::Directory);
        header.set_cksum();
        self.builder
            .append_data(&mut header, path, std::io::empty())
            .unwrap();
        self
    }

    /// Adds a symlink entry.
    #[must_use]
    pub fn symlink(mut self, path: &str, target: &str) -> Self {
        let mut header = tar::Header::new_gnu();
        header.set_size(0);
        header.set_mode(0o777);
        header.set_entry_type(tar::EntryType::Symlink);
        header.set_link_name(target).unwrap();
        header.set_cksum();
        self.builder
            .append_data(&mut header, path, std::io::empty())
            .unwrap();
        self
    }

    /// Returns the raw TAR bytes without writing a file.
    #[must_use]
    pub fn build_plain(self) -> Vec<u8> {
        self.builder.into_inner().unwrap()
    }

    /// Writes the archive to `path` uncompressed.
    pub fn write_plain(self, path: &Path) {
        let data = self.build_plain();
        std::fs::write(path, data).unwrap();
    }

    /// Writes the archive to `path` gzip-compressed.
    pub fn write_gz(self, path: &Path) {
        let data = self.build_plain();
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&data).unwrap();
        std::fs::write(path, encoder.finish().unwrap()).unwrap();
    }
}

impl Default for TarFixture {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_test_zip_produces_readable_archive() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("fixture.zip");
        write_test_zip(&path, &[("file.txt", b"hello")]);

        let file = std::fs::File::open(&path).unwrap();
        let archive = zip::ZipArchive::new(file).unwrap();
        assert_eq!(archive.len(), 1);
    }

    #[test]
    fn test_tar_fixture_entries() {
        let data = TarFixture::new()
            .file("file.txt", b"content")
            .dir("dir/")
            .symlink("link", "file.txt")
            .build_plain();
        assert!(!data.is_empty());
        assert_eq!(data.len() % 512, 0);
    }
}
