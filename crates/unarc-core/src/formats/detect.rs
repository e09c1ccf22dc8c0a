//! Archive format detection.

use std::path::Path;

use crate::ArchiveError;
use crate::Result;

/// Archive extensions recognized by the engine, lowercase.
///
/// This exact set is the contract surface that external upload filters
/// and file pickers mirror. `.tar.gz` is listed before `.gz` because the
/// double extension takes precedence during detection.
pub const RECOGNIZED_EXTENSIONS: [&str; 6] = [".zip", ".rar", ".7z", ".tar", ".tar.gz", ".gz"];

/// Supported archive kinds.
///
/// A kind is derived purely from the path string at job creation and is
/// never re-derived mid-operation; callers must treat the source file as
/// immutable for the duration of a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArchiveKind {
    /// ZIP archive.
    Zip,
    /// RAR archive.
    Rar,
    /// 7z archive.
    SevenZip,
    /// Tar archive (uncompressed).
    Tar,
    /// Bare gzip-compressed file.
    Gz,
    /// Gzip-compressed tar archive.
    TarGz,
}

impl ArchiveKind {
    /// Returns a short human-readable name for this kind.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Zip => "zip",
            Self::Rar => "rar",
            Self::SevenZip => "7z",
            Self::Tar => "tar",
            Self::Gz => "gz",
            Self::TarGz => "tar.gz",
        }
    }
}

/// Detects the archive kind from a file path.
///
/// Detection is pure string inspection: the file does not need to exist.
/// Extensions are matched case-insensitively, and the `.tar.gz` double
/// extension is checked before the single-extension `.gz` fallback.
///
/// # Errors
///
/// Returns [`ArchiveError::UnsupportedFormat`] when the extension matches
/// none of the recognized suffixes.
///
/// # Examples
///
/// ```
/// use unarc_core::formats::detect::{ArchiveKind, detect};
/// use std::path::Path;
///
/// assert_eq!(detect(Path::new("a.tar.gz")).unwrap(), ArchiveKind::TarGz);
/// assert_eq!(detect(Path::new("a.gz")).unwrap(), ArchiveKind::Gz);
/// assert!(detect(Path::new("a.xyz")).is_err());
/// ```
pub fn detect(path: &Path) -> Result<ArchiveKind> {
    let lower = path.to_string_lossy().to_ascii_lowercase();

    // Double extension outranks the single-extension dispatch below.
    if lower.ends_with(".tar.gz") {
        return Ok(ArchiveKind::TarGz);
    }

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .ok_or_else(|| ArchiveError::UnsupportedFormat {
            path: path.to_path_buf(),
        })?;

    match extension.to_ascii_lowercase().as_str() {
        "zip" => Ok(ArchiveKind::Zip),
        "rar" => Ok(ArchiveKind::Rar),
        "7z" => Ok(ArchiveKind::SevenZip),
        "tar" => Ok(ArchiveKind::Tar),
        "gz" => Ok(ArchiveKind::Gz),
        _ => Err(ArchiveError::UnsupportedFormat {
            path: path.to_path_buf(),
        }),
    }
}

/// Returns `true` if the path carries a recognized archive extension.
///
/// Convenience wrapper over [`detect`] for upload filters and folder
/// scans that only need a yes/no answer.
#[must_use]
pub fn is_archive_path(path: &Path) -> bool {
    detect(path).is_ok()
}
