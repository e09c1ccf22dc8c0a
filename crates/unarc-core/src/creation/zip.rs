//! ZIP writing via the in-process `zip` encoder.

use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::time::Instant;

use zip::write::SimpleFileOptions;
use zip::write::ZipWriter;

use crate::ArchiveError;
use crate::Result;
use crate::copy::CopyBuffer;
use crate::copy::copy_streaming;
use crate::report::CapabilityWarning;
use crate::report::CreationReport;

use super::CreationRequest;

/// Writes a flat ZIP archive from the request's sources.
///
/// Each source lands at the archive root under its base name. When two
/// sources share a base name, the first one wins and later ones are
/// skipped. A password request produces a [`CapabilityWarning`]: this
/// ZIP writer has no encryption support, and pretending otherwise would
/// be worse than saying so.
pub(super) fn write_zip(request: &CreationRequest) -> Result<CreationReport> {
    let start = Instant::now();
    let mut report = CreationReport::new();

    if request.password().is_some() {
        tracing::warn!(
            target = %request.target().display(),
            "password requested but the zip writer has no encryption support; \
             writing unprotected archive"
        );
        report.add_warning(CapabilityWarning::PasswordUnsupported { format: "zip" });
    }

    let file = File::create(request.target())?;
    let mut writer = ZipWriter::new(file);
    let options = SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Deflated)
        .unix_permissions(0o644);

    let mut used_names: HashSet<String> = HashSet::new();
    let mut buffer = CopyBuffer::new();

    for source in request.sources() {
        let name = source
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .ok_or_else(|| ArchiveError::SourceNotFound {
                path: source.clone(),
            })?;

        if !used_names.insert(name.clone()) {
            tracing::warn!(
                source = %source.display(),
                name = %name,
                "skipping source whose base name is already in the archive"
            );
            continue;
        }

        writer
            .start_file(name.as_str(), options)
            .map_err(|e| ArchiveError::ArchiveWrite {
                archive: request.target().to_path_buf(),
                reason: format!("failed to start entry '{name}': {e}"),
            })?;

        let mut reader = BufReader::new(File::open(source)?);
        let copied = copy_streaming(&mut reader, &mut writer, &mut buffer)
            .map_err(|e| ArchiveError::Io(e.into_io()))?;

        report.files_added += 1;
        report.bytes_written += copied;
    }

    writer.finish().map_err(|e| ArchiveError::ArchiveWrite {
        archive: request.target().to_path_buf(),
        reason: format!("failed to finalize archive: {e}"),
    })?;

    report.duration = start.elapsed();
    tracing::info!(
        target = %request.target().display(),
        files = report.files_added,
        bytes = report.bytes_written,
        "archive created"
    );
    Ok(report)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::creation::create_archive;
    use crate::reader::ArchiveReader;
    use std::io::Read;
    use tempfile::TempDir;

    fn read_entry_names(path: &std::path::Path) -> Vec<String> {
        let file = File::open(path).unwrap();
        let mut archive = zip::ZipArchive::new(file).unwrap();
        (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect()
    }

    #[test]
    fn test_sources_flattened_to_base_names() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir_all(temp.path().join("deep/nested")).unwrap();
        let a = temp.path().join("a.txt");
        let b = temp.path().join("deep/nested/b.txt");
        std::fs::write(&a, b"alpha").unwrap();
        std::fs::write(&b, b"beta").unwrap();

        let target = temp.path().join("out.zip");
        let request = CreationRequest::new(&target).add_sources([&a, &b]);
        let report = create_archive(&request).unwrap();

        assert_eq!(report.files_added, 2);
        assert_eq!(report.bytes_written, 9);
        assert!(!report.has_warnings());
        assert_eq!(read_entry_names(&target), vec!["a.txt", "b.txt"]);
    }

    #[test]
    fn test_duplicate_base_names_first_wins() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir_all(temp.path().join("other")).unwrap();
        let first = temp.path().join("same.txt");
        let second = temp.path().join("other/same.txt");
        std::fs::write(&first, b"first").unwrap();
        std::fs::write(&second, b"second").unwrap();

        let target = temp.path().join("out.zip");
        let request = CreationRequest::new(&target).add_sources([&first, &second]);
        let report = create_archive(&request).unwrap();
        assert_eq!(report.files_added, 1);

        let file = File::open(&target).unwrap();
        let mut archive = zip::ZipArchive::new(file).unwrap();
        let mut content = String::new();
        archive
            .by_name("same.txt")
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        assert_eq!(content, "first");
    }

    #[test]
    fn test_password_request_produces_warning_not_encryption() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("secret.txt");
        std::fs::write(&source, b"contents").unwrap();

        let target = temp.path().join("out.zip");
        let request = CreationRequest::new(&target)
            .add_source(&source)
            .with_password("hunter2");
        let report = create_archive(&request).unwrap();

        assert_eq!(
            report.warnings,
            vec![CapabilityWarning::PasswordUnsupported { format: "zip" }]
        );

        // The archive opens without any password.
        let file = File::open(&target).unwrap();
        let mut archive = zip::ZipArchive::new(file).unwrap();
        let mut content = String::new();
        archive
            .by_name("secret.txt")
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        assert_eq!(content, "contents");
    }

    #[test]
    fn test_roundtrip_with_reader() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("data.txt");
        std::fs::write(&source, b"roundtrip").unwrap();

        let target = temp.path().join("out.zip");
        create_archive(&CreationRequest::new(&target).add_source(&source)).unwrap();

        let reader = crate::reader::ZipReader::open(&target).unwrap();
        let mut seen = Vec::new();
        reader
            .for_each_entry(&mut |entry, stream| {
                let mut content = Vec::new();
                stream.read_to_end(&mut content)?;
                seen.push((entry.name.clone(), content));
                Ok(())
            })
            .unwrap();
        assert_eq!(seen, vec![("data.txt".to_string(), b"roundtrip".to_vec())]);
    }
}
