//! Error types for the HKX crate.

use thiserror::Error;

/// Errors that can occur when working with HKX containers.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Common library error.
    #[error("{0}")]
    Common(#[from] hkxtool_common::Error),

    /// Buffer is not an HKX tag container.
    #[error("not an HKX container: missing TAG0 at offset 4")]
    NotHkx,
}

/// Result type for HKX operations.
pub type Result<T> = std::result::Result<T, Error>;
