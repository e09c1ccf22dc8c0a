//! Archive format detection and discovery.

pub mod detect;
pub mod scan;

pub use detect::ArchiveKind;
pub use detect::RECOGNIZED_EXTENSIONS;
pub use detect::detect;
pub use detect::is_archive_path;
pub use scan::scan_for_archives;
