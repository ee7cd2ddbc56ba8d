//! DCX compressed-stream envelope decoding.
//!
//! DCX is FromSoftware's generic compression wrapper: a big-endian header
//! declaring compressed and decompressed sizes plus a method id, followed
//! by the compressed payload. Only the methods seen in hkx binders are
//! supported (`DFLT` zlib and `NONE` stored); anything else is rejected.
//!
//! # Example
//!
//! ```no_run
//! let raw = std::fs::read("c2500.hkx.dcx")?;
//! let hkx = hkxtool_dcx::decompress(&raw)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod decompress;
mod error;

pub use decompress::{decompress, is_dcx, DCX_MAGIC};
pub use error::{Error, Result};
