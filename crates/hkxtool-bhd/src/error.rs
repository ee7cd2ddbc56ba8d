//! Error types for the BHD crate.

use thiserror::Error;

/// Errors that can occur when working with BHF3 binder archives.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Common library error.
    #[error("{0}")]
    Common(#[from] hkxtool_common::Error),

    /// Declared entry table extends past the end of the file.
    #[error("entry table truncated: {count} entries need {needed} bytes, file has {available}")]
    TruncatedTable {
        count: u32,
        needed: usize,
        available: usize,
    },

    /// Entry data range lies outside the archive.
    #[error("entry {index} out of bounds: {offset}+{size} exceeds archive size {archive_size}")]
    EntryOutOfBounds {
        index: usize,
        offset: u64,
        size: u64,
        archive_size: u64,
    },

    /// Entry name offset points outside the archive.
    #[error("entry {index} name offset {offset} outside archive of size {archive_size}")]
    NameOutOfBounds {
        index: usize,
        offset: u64,
        archive_size: u64,
    },

    /// Entry index past the end of the table.
    #[error("entry index {index} out of range (archive has {count} entries)")]
    IndexOutOfRange { index: usize, count: usize },
}

/// Result type for BHD operations.
pub type Result<T> = std::result::Result<T, Error>;
