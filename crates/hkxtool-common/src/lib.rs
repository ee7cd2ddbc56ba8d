//! Common utilities for hkxtool.
//!
//! This crate provides the foundational types used across all hkxtool crates:
//!
//! - [`BinaryReader`] - Bounds-checked binary reading from byte slices,
//!   with both little- and big-endian accessors
//! - [`Error`] / [`Result`] - Shared error type for parsing failures

mod error;
mod reader;

pub use error::{Error, Result};
pub use reader::BinaryReader;

/// Re-export zerocopy traits for convenience
pub use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};
