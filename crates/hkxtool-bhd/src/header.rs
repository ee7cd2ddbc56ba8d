//! BHF3 header structures.
//!
//! BHF3 is a BND3-family binder: a small little-endian header, a table of
//! fixed-size file records, and a name region of NUL-terminated strings.
//! In hkxbhd files the member data lives in the same file, addressed by
//! each record's offset field.

use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

/// BHF3 header (without the 4-byte magic, which is read separately).
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
pub struct BhdHeader {
    /// Version string, e.g. "07D7R6\0\0" (informational, not validated)
    pub version: [u8; 8],
    /// Binder format flags
    pub format: u32,
    /// Number of file records in the table
    pub file_count: u32,
    /// Reserved, zero in every observed file
    pub reserved: [u8; 12],
}

impl BhdHeader {
    /// BHF3 magic bytes at offset 0.
    pub const MAGIC: [u8; 4] = *b"BHF3";

    /// Offset of the first file record.
    pub const TABLE_OFFSET: usize = 4 + std::mem::size_of::<Self>();
}

/// A single file record in the BHF3 table.
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
pub struct BhdRecord {
    /// Record flags (0x40 in every observed file)
    pub flags: u32,
    /// Size of the member's raw (still compressed) data in bytes
    pub size: u32,
    /// Offset of the member data within the archive
    pub offset: u32,
    /// Numeric member id
    pub id: u32,
    /// Offset of the member's NUL-terminated name within the archive
    pub name_offset: u32,
}

impl BhdRecord {
    /// Size of one record on disk.
    pub const SIZE: usize = std::mem::size_of::<Self>();
}
