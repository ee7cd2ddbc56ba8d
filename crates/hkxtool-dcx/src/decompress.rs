//! DCX envelope decoding.
//!
//! A DCX file is a big-endian wrapper around one compressed blob:
//!
//! - `"DCX\0"`, u32 version
//! - four u32 block offsets (DCS, DCP, DCP params, DCA)
//! - `"DCS\0"`, u32 decompressed size, u32 compressed size
//! - `"DCP\0"`, 4-byte method id (`"DFLT"` = zlib, `"NONE"` = stored),
//!   method parameter words
//! - `"DCA\0"`, u32 DCA block size; the payload follows the DCA block
//!
//! The declared decompressed size is authoritative: producing any other
//! length is corruption, not something to round off.

use std::io::Read;

use flate2::read::ZlibDecoder;
use hkxtool_common::BinaryReader;

use crate::{Error, Result};

/// DCX magic bytes at offset 0.
pub const DCX_MAGIC: [u8; 4] = *b"DCX\0";

/// Check whether a buffer carries a DCX envelope.
#[inline]
pub fn is_dcx(data: &[u8]) -> bool {
    data.len() >= 4 && data[..4] == DCX_MAGIC
}

/// Decode a DCX envelope into its decompressed payload.
///
/// Buffers without the DCX magic are treated as already decompressed and
/// returned as an owned copy: hkxbhd members are normally DCX-wrapped but
/// loose `.hkx` files on disk are not, and callers must not have to care.
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    if !is_dcx(data) {
        return Ok(data.to_vec());
    }

    let mut reader = BinaryReader::new(data);
    reader.expect_magic(&DCX_MAGIC)?;
    let _version = reader.read_u32_be()?;

    let dcs_offset = reader.read_u32_be()? as usize;
    let dcp_offset = reader.read_u32_be()? as usize;
    let _dcp_params_offset = reader.read_u32_be()?;
    let dca_offset = reader.read_u32_be()? as usize;

    reader.seek(dcs_offset);
    reader.expect_magic(b"DCS\0")?;
    let decompressed_size = reader.read_u32_be()? as usize;
    let compressed_size = reader.read_u32_be()? as usize;

    reader.seek(dcp_offset);
    reader.expect_magic(b"DCP\0")?;
    let method = reader.read_tag()?;

    reader.seek(dca_offset);
    reader.expect_magic(b"DCA\0")?;
    let dca_size = reader.read_u32_be()? as usize;

    let payload_start = dca_offset + dca_size;
    if payload_start + compressed_size > data.len() {
        return Err(Error::TruncatedPayload {
            declared: compressed_size,
            available: data.len().saturating_sub(payload_start),
        });
    }
    let payload = &data[payload_start..payload_start + compressed_size];

    let output = match &method {
        b"DFLT" => inflate_sized(payload, decompressed_size)?,
        b"NONE" => payload.to_vec(),
        _ => return Err(Error::UnsupportedMethod(method)),
    };

    if output.len() != decompressed_size {
        return Err(Error::SizeMismatch {
            declared: decompressed_size,
            produced: output.len(),
        });
    }

    Ok(output)
}

/// Inflate zlib data with a known output size.
fn inflate_sized(data: &[u8], expected_size: usize) -> Result<Vec<u8>> {
    let mut decoder = ZlibDecoder::new(data);
    let mut output = Vec::with_capacity(expected_size);

    decoder
        .read_to_end(&mut output)
        .map_err(|e| Error::Inflate(e.to_string()))?;

    Ok(output)
}
