//! HKX tagged-chunk walking.
//!
//! A tag container starts with an 8-byte header (big-endian size word plus
//! `"TAG0"`), then a flat sequence of chunks. Each chunk is a big-endian
//! u32 length field, a 4-byte tag and the payload. Only the low 24 bits of
//! the length field are the chunk size (header included); the top byte
//! carries flags and must be masked off, or large containers misparse.

/// Inner container tag at bytes 4..8 of every HKX file.
pub const TAG0: [u8; 4] = *b"TAG0";

/// Size of the container-level header skipped before the first chunk.
pub const CONTAINER_HEADER_SIZE: usize = 8;

/// Size of a chunk's own header (length field + tag).
pub const CHUNK_HEADER_SIZE: usize = 8;

/// Mask selecting the numeric part of a chunk length field.
pub const CHUNK_SIZE_MASK: u32 = 0x00ff_ffff;

/// Check whether a buffer is an HKX tag container.
#[inline]
pub fn is_hkx(data: &[u8]) -> bool {
    data.len() >= CONTAINER_HEADER_SIZE && data[4..8] == TAG0
}

/// One chunk of a tag container, borrowed from the decompressed buffer.
#[derive(Debug, Clone, Copy)]
pub struct Chunk<'a> {
    /// 4-byte chunk tag (not necessarily printable)
    pub tag: [u8; 4],
    /// Offset of the chunk's length field within the buffer
    pub offset: usize,
    /// Payload bytes (chunk contents after the 8-byte tag header)
    pub payload: &'a [u8],
}

/// Outcome of a chunk walk.
///
/// The walk never aborts: a chunk that would overrun the buffer simply
/// ends it, and the report says where the cursor stopped. A cursor that
/// does not land exactly on the buffer end is a consistency warning for
/// the caller, not an error; every chunk already visited remains valid.
#[derive(Debug, Clone, Copy)]
pub struct WalkReport {
    /// Number of chunks visited
    pub chunks: usize,
    /// Final cursor position
    pub cursor: usize,
    /// Total buffer length
    pub len: usize,
}

impl WalkReport {
    /// Whether the walk consumed the buffer exactly.
    #[inline]
    pub fn is_consistent(&self) -> bool {
        self.cursor == self.len
    }
}

/// Walk the chunks of a tag container, invoking `visit` for each.
///
/// The container-level header is skipped; iteration advances by each
/// chunk's masked total length. All reads are bounds-checked against the
/// buffer, so a corrupted length field can never cause an out-of-range
/// access, only an early stop reflected in the [`WalkReport`].
pub fn walk<F>(data: &[u8], mut visit: F) -> WalkReport
where
    F: FnMut(&Chunk<'_>),
{
    let mut offset = CONTAINER_HEADER_SIZE;
    let mut chunks = 0;

    while offset + CHUNK_HEADER_SIZE <= data.len() {
        let size_word = u32::from_be_bytes([
            data[offset],
            data[offset + 1],
            data[offset + 2],
            data[offset + 3],
        ]);
        let size = (size_word & CHUNK_SIZE_MASK) as usize;

        // A size below the 8-byte header or past the buffer end cannot be
        // stepped over; stop and let the report show the shortfall.
        if size < CHUNK_HEADER_SIZE || offset + size > data.len() {
            break;
        }

        let chunk = Chunk {
            tag: [
                data[offset + 4],
                data[offset + 5],
                data[offset + 6],
                data[offset + 7],
            ],
            offset,
            payload: &data[offset + 8..offset + size],
        };
        visit(&chunk);
        chunks += 1;

        offset += size;
    }

    WalkReport {
        chunks,
        cursor: offset,
        len: data.len(),
    }
}

/// Build a tag container from (tag, payload) pairs. Test helper shared by
/// the walker, dump and geometry tests.
#[cfg(test)]
pub(crate) fn build_container(chunks: &[(&[u8; 4], &[u8])]) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(&[0u8; 4]); // container size word, placeholder
    out.extend_from_slice(&TAG0);

    for (tag, payload) in chunks {
        let size = (payload.len() + 8) as u32;
        out.extend_from_slice(&size.to_be_bytes());
        out.extend_from_slice(*tag);
        out.extend_from_slice(payload);
    }

    let total = (out.len() as u32) | 0x4000_0000;
    out[..4].copy_from_slice(&total.to_be_bytes());
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visits_all_chunks_in_order() {
        let data = build_container(&[
            (b"SDKV", b"20150100"),
            (b"DATA", b"\x01\x02\x03"),
            (b"INDX", b""),
        ]);

        let mut seen = Vec::new();
        let report = walk(&data, |c| seen.push((c.tag, c.payload.to_vec())));

        assert_eq!(report.chunks, 3);
        assert!(report.is_consistent());
        assert_eq!(seen[0], (*b"SDKV", b"20150100".to_vec()));
        assert_eq!(seen[1], (*b"DATA", b"\x01\x02\x03".to_vec()));
        assert_eq!(seen[2], (*b"INDX", Vec::new()));
    }

    #[test]
    fn test_flag_byte_is_masked() {
        let mut data = build_container(&[(b"DATA", b"abcd")]);
        // Set flag bits in the chunk's length field top byte.
        data[8] = 0x40;

        let mut seen = 0;
        let report = walk(&data, |c| {
            assert_eq!(c.payload, b"abcd");
            seen += 1;
        });

        assert_eq!(seen, 1);
        assert!(report.is_consistent());
    }

    #[test]
    fn test_overrunning_chunk_stops_walk() {
        let mut data = build_container(&[(b"AAAA", b"one"), (b"BBBB", b"two")]);
        // Corrupt the second chunk's length to overrun the buffer.
        let second = CONTAINER_HEADER_SIZE + 8 + 3;
        data[second..second + 4].copy_from_slice(&0x00ff_0000u32.to_be_bytes());

        let mut seen = Vec::new();
        let report = walk(&data, |c| seen.push(c.tag));

        assert_eq!(seen, vec![*b"AAAA"]);
        assert_eq!(report.chunks, 1);
        assert!(!report.is_consistent());
        assert_eq!(report.cursor, second);
    }

    #[test]
    fn test_empty_container() {
        let data = build_container(&[]);
        let report = walk(&data, |_| panic!("no chunks expected"));

        assert_eq!(report.chunks, 0);
        assert!(report.is_consistent());
    }

    #[test]
    fn test_trailing_bytes_reported() {
        let mut data = build_container(&[(b"DATA", b"xy")]);
        data.extend_from_slice(&[0xaa; 3]);

        let report = walk(&data, |_| {});
        assert_eq!(report.chunks, 1);
        assert!(!report.is_consistent());
        assert_eq!(report.len - report.cursor, 3);
    }

    #[test]
    fn test_is_hkx() {
        assert!(is_hkx(&build_container(&[])));
        assert!(!is_hkx(b"BHF3\0\0\0\0"));
        assert!(!is_hkx(b"TAG0"));
    }
}
