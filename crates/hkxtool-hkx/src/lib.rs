//! HKX tag-container handling.
//!
//! HKX files are havok binary containers: an 8-byte header ending in
//! `"TAG0"`, then a flat stream of length-prefixed tagged chunks. This
//! crate walks that stream, renders chunks as hexdumps, and decodes
//! geometry-bearing chunks into an accumulated mesh for OBJ export.
//!
//! It is deliberately not a havok object model: bones, animations and
//! physics shapes are left alone, only the chunk layer and the collision
//! geometry records are understood.
//!
//! # Example
//!
//! ```no_run
//! use hkxtool_hkx::{walk, HkxGeometry};
//!
//! let data = std::fs::read("c2500.hkx")?;
//! let mut geometry = HkxGeometry::new();
//! let report = walk(&data, |chunk| {
//!     geometry.ingest(chunk.tag, chunk.payload);
//! });
//! if !report.is_consistent() {
//!     eprintln!("warning: {} of {} bytes walked", report.cursor, report.len);
//! }
//! geometry.write_obj_file("c2500.hkx.obj")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod chunk;
mod dump;
mod error;
mod geometry;

pub use chunk::{
    is_hkx, walk, Chunk, WalkReport, CHUNK_HEADER_SIZE, CHUNK_SIZE_MASK, CONTAINER_HEADER_SIZE,
    TAG0,
};
pub use dump::{dump_chunks, dump_mem};
pub use error::{Error, Result};
pub use geometry::{HkxGeometry, GEOM_TAG};
