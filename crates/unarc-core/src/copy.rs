//! Streaming copy with a reusable 64 KB buffer.
//!
//! Extraction and creation both move entry content through this helper
//! so one buffer serves a whole operation instead of allocating per
//! entry. Failures keep track of which side of the copy broke: a bad
//! source stream is not the same problem as a full disk.

use std::io::Read;
use std::io::Write;
use std::io::{self};

const COPY_BUFFER_SIZE: usize = 64 * 1024;

/// Reusable buffer for streaming entry content.
#[derive(Debug)]
pub struct CopyBuffer {
    buf: Vec<u8>,
}

impl CopyBuffer {
    /// Creates a buffer of the standard copy size.
    #[must_use]
    pub fn new() -> Self {
        Self {
            buf: vec![0u8; COPY_BUFFER_SIZE],
        }
    }
}

impl Default for CopyBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Which side of a streaming copy failed.
#[derive(Debug)]
pub enum CopyError {
    /// Reading from the source stream failed.
    Read(io::Error),
    /// Writing to the destination failed.
    Write(io::Error),
}

impl CopyError {
    /// Unwraps the underlying I/O error regardless of side.
    #[must_use]
    pub fn into_io(self) -> io::Error {
        match self {
            Self::Read(e) | Self::Write(e) => e,
        }
    }
}

/// Copies everything from `reader` to `writer` through `buffer`,
/// returning the number of bytes moved. Interrupted reads are retried.
///
/// # Errors
///
/// Returns [`CopyError::Read`] for the first source failure and
/// [`CopyError::Write`] for the first destination failure.
pub fn copy_streaming<R: Read + ?Sized, W: Write>(
    reader: &mut R,
    writer: &mut W,
    buffer: &mut CopyBuffer,
) -> Result<u64, CopyError> {
    let mut total: u64 = 0;

    loop {
        let bytes_read = match reader.read(&mut buffer.buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(CopyError::Read(e)),
        };

        writer
            .write_all(&buffer.buf[..bytes_read])
            .map_err(CopyError::Write)?;
        total = total.saturating_add(bytes_read as u64);
    }

    Ok(total)
}
