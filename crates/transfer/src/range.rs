//! Part-range arithmetic and bounded range reads.

use std::io::SeekFrom;
use std::path::Path;

use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncSeekExt};

use crate::TransferError;

/// A reader bounded to exactly the declared range length.
pub type BoundedReader = tokio::io::Take<File>;

/// Inclusive byte range of one part within a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartRange {
    /// First byte of the part.
    pub start: u64,
    /// Last byte of the part (inclusive).
    pub end: u64,
    /// `end - start + 1`.
    pub length: u64,
}

/// Computes the byte range of 1-based `part_number` for a file of
/// `file_size` bytes split into `part_size`-byte parts.
///
/// The final part carries the remainder and may be shorter than
/// `part_size`. A part starting at or past end-of-file has length 0.
pub fn part_range(part_number: u32, part_size: u64, file_size: u64) -> PartRange {
    let start = u64::from(part_number - 1) * part_size;
    if file_size == 0 || start >= file_size {
        return PartRange {
            start,
            end: start,
            length: 0,
        };
    }
    let end = (u64::from(part_number) * part_size - 1).min(file_size - 1);
    PartRange {
        start,
        end,
        length: end - start + 1,
    }
}

/// Opens `path` positioned at `start`, bounded to `length` bytes.
///
/// Fails with [`TransferError::ShortFile`] if the file cannot supply
/// the full range. The returned reader yields at most `length` bytes
/// and then signals end-of-data regardless of how much of the file
/// remains, so memory use stays bounded by the consumer's buffer.
pub async fn open_range(
    path: &Path,
    start: u64,
    length: u64,
) -> Result<BoundedReader, TransferError> {
    let mut file = File::open(path).await?;
    let file_size = file.metadata().await?.len();
    if start + length > file_size {
        return Err(TransferError::ShortFile {
            start,
            length,
            file_size,
        });
    }
    file.seek(SeekFrom::Start(start)).await?;
    Ok(file.take(length))
}

/// Reads the entire file into one contiguous buffer, verifying the
/// byte count against the file's reported size.
///
/// The full-buffer read is deliberate: direct-transfer destinations
/// sign the exact content length, so the body must match the reported
/// size byte-for-byte.
pub async fn read_whole(path: &Path) -> Result<Vec<u8>, TransferError> {
    let expected = tokio::fs::metadata(path).await?.len();
    let bytes = tokio::fs::read(path).await?;
    if bytes.len() as u64 != expected {
        return Err(TransferError::SizeMismatch {
            expected,
            actual: bytes.len() as u64,
        });
    }
    Ok(bytes)
}
