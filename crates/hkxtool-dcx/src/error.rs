//! Error types for the DCX crate.

use thiserror::Error;

/// Errors that can occur when decoding DCX envelopes.
#[derive(Debug, Error)]
pub enum Error {
    /// Common library error.
    #[error("{0}")]
    Common(#[from] hkxtool_common::Error),

    /// Unsupported compression method id.
    #[error("unsupported DCX compression method: {}", String::from_utf8_lossy(.0))]
    UnsupportedMethod([u8; 4]),

    /// Declared compressed size extends past the actual payload.
    #[error("DCX payload truncated: declared {declared} bytes, {available} available")]
    TruncatedPayload { declared: usize, available: usize },

    /// Decompressed output does not match the declared size.
    #[error("DCX size mismatch: declared {declared} bytes, produced {produced}")]
    SizeMismatch { declared: usize, produced: usize },

    /// Inflate error from the underlying codec.
    #[error("inflate error: {0}")]
    Inflate(String),
}

/// Result type for DCX operations.
pub type Result<T> = std::result::Result<T, Error>;
