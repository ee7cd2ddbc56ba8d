//! hkxtool - FromSoftware havok container reading library.
//!
//! This crate provides a unified interface to the hkxtool crates for
//! listing, dumping and extracting hkx / hkxbhd game files.
//!
//! # Crates
//!
//! - [`hkxtool_common`] - Bounds-checked binary reading and shared errors
//! - [`hkxtool_bhd`] - BHF3 binder archive reading
//! - [`hkxtool_dcx`] - DCX compressed-stream envelope decoding
//! - [`hkxtool_hkx`] - Tag-container chunk walking and geometry extraction
//!
//! # Example
//!
//! ```no_run
//! use hkxtool::prelude::*;
//!
//! let archive = BhdArchive::open("m10_00_00_00.hkxbhd")?;
//! let mut geometry = HkxGeometry::new();
//!
//! for entry in archive.iter() {
//!     let raw = archive.read(&entry)?;
//!     let data = hkxtool::dcx::decompress(raw)?;
//!     hkxtool::hkx::walk(&data, |chunk| {
//!         geometry.ingest(chunk.tag, chunk.payload);
//!     });
//! }
//!
//! geometry.write_obj_file("m10_00_00_00.hkxbhd.obj")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// Re-export all sub-crates
pub use hkxtool_bhd as bhd;
pub use hkxtool_common as common;
pub use hkxtool_dcx as dcx;
pub use hkxtool_hkx as hkx;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use hkxtool_bhd::{BhdArchive, BhdEntry};
    pub use hkxtool_common::BinaryReader;
    pub use hkxtool_dcx::{decompress, is_dcx};
    pub use hkxtool_hkx::{dump_chunks, is_hkx, walk, Chunk, HkxGeometry, WalkReport};
}

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
