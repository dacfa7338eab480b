//! Byte-exact file readers for artifact transfer.
//!
//! The upload destinations validate content length against a signed
//! value, so every read here is length-checked: a whole-file read must
//! match the file's reported size, and a range read must be able to
//! supply the full declared range or fail, never silently shorten.

mod range;

pub use range::{BoundedReader, PartRange, open_range, part_range, read_whole};

/// Errors produced by file reads.
#[derive(Debug, thiserror::Error)]
pub enum TransferError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("file ends at byte {file_size}, range needs bytes {start}..{}", .start + .length)]
    ShortFile {
        start: u64,
        length: u64,
        file_size: u64,
    },

    #[error("file read mismatch: expected {expected} bytes, read {actual}")]
    SizeMismatch { expected: u64, actual: u64 },
}
