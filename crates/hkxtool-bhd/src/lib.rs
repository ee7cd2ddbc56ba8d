//! BHF3 binder archive reading.
//!
//! FromSoftware ships havok collision data as `*.hkxbhd` binders: a "BHF3"
//! header, a table of fixed-size file records, an embedded name region,
//! and the member data (each member a DCX-compressed HKX container).
//!
//! # Example
//!
//! ```no_run
//! use hkxtool_bhd::BhdArchive;
//!
//! let archive = BhdArchive::open("m10_00_00_00.hkxbhd")?;
//! for entry in archive.iter() {
//!     let raw = archive.read(&entry)?;
//!     println!("{:>8} {}", raw.len(), entry.name);
//! }
//! # Ok::<(), hkxtool_bhd::Error>(())
//! ```

mod archive;
mod error;
mod header;

pub use archive::{BhdArchive, BhdEntry};
pub use error::{Error, Result};
pub use header::{BhdHeader, BhdRecord};
