//! Chunk-structure hexdump rendering for the `dump` mode.

use std::io::Write;

use crate::chunk::{self, WalkReport};
use crate::Result;

/// Render every chunk of a tag container as a hexdump.
///
/// Prints a banner with the file name, then one block per chunk with its
/// offset, tag and payload length, followed by a 16-bytes-per-row hex and
/// ASCII rendering of the payload.
pub fn dump_chunks<W: Write>(data: &[u8], filename: &str, out: &mut W) -> Result<WalkReport> {
    writeln!(
        out,
        "============================================================================="
    )?;
    writeln!(out, "== {}", filename)?;
    writeln!(
        out,
        "============================================================================="
    )?;

    let mut io_err = None;
    let report = chunk::walk(data, |c| {
        if io_err.is_some() {
            return;
        }
        let result = (|| -> std::io::Result<()> {
            writeln!(out)?;
            writeln!(
                out,
                "{:08x} {} len={} (0x{:x})",
                c.offset,
                printable_tag(&c.tag),
                c.payload.len(),
                c.payload.len()
            )?;
            dump_mem(c.payload, out)
        })();
        if let Err(e) = result {
            io_err = Some(e);
        }
    });

    if let Some(e) = io_err {
        return Err(e.into());
    }

    writeln!(out)?;
    Ok(report)
}

/// Render a byte slice as hex + ASCII, 16 bytes per row.
pub fn dump_mem<W: Write>(data: &[u8], out: &mut W) -> std::io::Result<()> {
    for (row, bytes) in data.chunks(16).enumerate() {
        write!(out, "{:08x}  ", row * 16)?;

        for i in 0..16 {
            match bytes.get(i) {
                Some(b) => write!(out, "{:02x} ", b)?,
                None => write!(out, "   ")?,
            }
            if i == 7 {
                write!(out, " ")?;
            }
        }

        write!(out, " |")?;
        for &b in bytes {
            let c = if (0x20..0x7f).contains(&b) { b as char } else { '.' };
            write!(out, "{}", c)?;
        }
        writeln!(out, "|")?;
    }
    Ok(())
}

/// Replace non-printable tag bytes with '.' for display.
fn printable_tag(tag: &[u8; 4]) -> String {
    tag.iter()
        .map(|&b| if (0x20..0x7f).contains(&b) { b as char } else { '.' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dump_mem_row_format() {
        let mut out = Vec::new();
        dump_mem(b"ABCDEFGHIJKLMNOPQ", &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("00000000  41 42 43 44"));
        assert!(lines[0].ends_with("|ABCDEFGHIJKLMNOP|"));
        assert!(lines[1].starts_with("00000010  51"));
        assert!(lines[1].ends_with("|Q|"));
    }

    #[test]
    fn test_dump_chunks_banner_and_tags() {
        let data = crate::chunk::build_container(&[(b"SDKV", b"2015")]);

        let mut out = Vec::new();
        let report = dump_chunks(&data, "test.hkx", &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(report.is_consistent());
        assert!(text.contains("== test.hkx"));
        assert!(text.contains("00000008 SDKV len=4 (0x4)"));
    }
}
