//! BHF3 binder archive reader.
//!
//! The whole archive is memory-mapped and the record table is parsed up
//! front, so every entry handed out is already validated against the
//! file's actual size. Member data is returned as a borrowed slice of the
//! mapping; dropping the archive unmaps the file.

use std::fs::File;
use std::path::Path;

use memmap2::Mmap;
use hkxtool_common::BinaryReader;

use crate::header::{BhdHeader, BhdRecord};
use crate::{Error, Result};

/// A single validated archive member.
#[derive(Debug, Clone, Copy)]
pub struct BhdEntry<'a> {
    /// Position in the record table
    pub index: usize,
    /// Numeric member id from the record table
    pub id: u32,
    /// Member file name resolved from the embedded name region
    pub name: &'a str,
    /// Offset of the raw (still compressed) data within the archive
    pub offset: u64,
    /// Size of the raw data in bytes
    pub size: u64,
}

/// BHF3 archive reader over a memory-mapped file.
pub struct BhdArchive {
    /// Memory-mapped file data
    mmap: Mmap,
    /// Archive file name
    name: String,
    /// Entry metadata, validated at open time
    entries: Vec<BhdEntryCompact>,
}

/// Owned entry metadata.
#[derive(Debug, Clone)]
struct BhdEntryCompact {
    name: String,
    id: u32,
    offset: u32,
    size: u32,
}

impl BhdArchive {
    /// Open a BHF3 archive and parse its full record table.
    ///
    /// Fails if the magic is wrong, the declared table extends past the
    /// file, or any record's data range or name offset lies out of bounds.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let mmap = unsafe { Mmap::map(&file)? };

        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown")
            .to_string();

        let entries = Self::parse_entries(&mmap)?;

        Ok(Self {
            mmap,
            name,
            entries,
        })
    }

    /// Get the archive name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the number of entries.
    #[inline]
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Iterate over entries.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = BhdEntry<'_>> + '_ {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, e)| self.entry_ref(i, e))
    }

    /// Get entry by index.
    #[inline]
    pub fn get(&self, index: usize) -> Option<BhdEntry<'_>> {
        self.entries.get(index).map(|e| self.entry_ref(index, e))
    }

    /// Read an entry's raw bytes (still DCX-compressed for hkxbhd members).
    pub fn read(&self, entry: &BhdEntry<'_>) -> Result<&[u8]> {
        self.read_range(entry.index, entry.offset, entry.size)
    }

    /// Read entry by index.
    pub fn read_index(&self, index: usize) -> Result<&[u8]> {
        let entry = self.entries.get(index).ok_or(Error::IndexOutOfRange {
            index,
            count: self.entries.len(),
        })?;

        self.read_range(index, u64::from(entry.offset), u64::from(entry.size))
    }

    #[inline]
    fn entry_ref<'a>(&'a self, index: usize, entry: &'a BhdEntryCompact) -> BhdEntry<'a> {
        BhdEntry {
            index,
            id: entry.id,
            name: &entry.name,
            offset: u64::from(entry.offset),
            size: u64::from(entry.size),
        }
    }

    fn read_range(&self, index: usize, offset: u64, size: u64) -> Result<&[u8]> {
        let end = offset.checked_add(size).filter(|&e| e <= self.mmap.len() as u64);
        match end {
            Some(end) => Ok(&self.mmap[offset as usize..end as usize]),
            None => Err(Error::EntryOutOfBounds {
                index,
                offset,
                size,
                archive_size: self.mmap.len() as u64,
            }),
        }
    }

    /// Parse and validate the header and record table.
    fn parse_entries(data: &[u8]) -> Result<Vec<BhdEntryCompact>> {
        let mut reader = BinaryReader::new(data);
        reader.expect_magic(&BhdHeader::MAGIC)?;

        let header: BhdHeader = reader.read_struct()?;
        let count = header.file_count;

        let table_size = count as usize * BhdRecord::SIZE;
        if BhdHeader::TABLE_OFFSET + table_size > data.len() {
            return Err(Error::TruncatedTable {
                count,
                needed: BhdHeader::TABLE_OFFSET + table_size,
                available: data.len(),
            });
        }

        let mut entries = Vec::with_capacity(count as usize);

        for index in 0..count as usize {
            let record: BhdRecord = reader.read_struct()?;

            let end = u64::from(record.offset) + u64::from(record.size);
            if end > data.len() as u64 {
                return Err(Error::EntryOutOfBounds {
                    index,
                    offset: u64::from(record.offset),
                    size: u64::from(record.size),
                    archive_size: data.len() as u64,
                });
            }

            if record.name_offset as usize >= data.len() {
                return Err(Error::NameOutOfBounds {
                    index,
                    offset: u64::from(record.name_offset),
                    archive_size: data.len() as u64,
                });
            }

            let mut name_reader = BinaryReader::new_at(data, record.name_offset as usize);
            let name = name_reader.read_cstring()?.to_string();

            entries.push(BhdEntryCompact {
                name,
                id: record.id,
                offset: record.offset,
                size: record.size,
            });
        }

        Ok(entries)
    }
}

impl std::fmt::Debug for BhdArchive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BhdArchive")
            .field("name", &self.name)
            .field("entries", &self.entries.len())
            .finish()
    }
}
