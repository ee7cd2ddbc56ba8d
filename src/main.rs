//! hkxtool CLI - list, dump and extract hkx / hkxbhd game files.
//!
//! This is the main entry point for the hkxtool command-line application.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use hkxtool::prelude::*;

/// hkxtool - havok container listing and collision mesh extraction
#[derive(Parser)]
#[command(name = "hkxtool")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List member files with their sizes
    List {
        /// Input .hkx or .hkxbhd file
        input: PathBuf,
    },

    /// Hexdump the chunk structure of every member
    Dump {
        /// Input .hkx or .hkxbhd file
        input: PathBuf,
    },

    /// Extract collision geometry into one OBJ mesh
    Extract {
        /// Input .hkx or .hkxbhd file
        input: PathBuf,

        /// Output OBJ path (defaults to <input>.obj)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    List,
    Dump,
    Extract,
}

/// Top-level input formats distinguished by the first 8 bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputFormat {
    Archive,
    SingleFile,
    Unknown,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::List { input } => run(&input, Mode::List, None),
        Commands::Dump { input } => run(&input, Mode::Dump, None),
        Commands::Extract { input, output } => run(&input, Mode::Extract, output),
    }
}

fn run(input: &Path, mode: Mode, output: Option<PathBuf>) -> Result<()> {
    let mut header = [0u8; 8];
    File::open(input)
        .and_then(|mut f| f.read_exact(&mut header))
        .with_context(|| format!("can't open '{}'", input.display()))?;

    match detect_format(&header) {
        InputFormat::Archive => process_bhd(input, mode, output),
        InputFormat::SingleFile => process_single_file(input, mode, output),
        InputFormat::Unknown => bail!("unknown format in '{}'", input.display()),
    }
}

/// Detect the input format: BHF3 magic at offset 0 means a binder archive,
/// TAG0 at bytes 4..8 a loose tag container. Anything else is rejected
/// before any parsing is attempted.
fn detect_format(header: &[u8; 8]) -> InputFormat {
    if header[..4] == hkxtool::bhd::BhdHeader::MAGIC {
        InputFormat::Archive
    } else if is_hkx(header) {
        InputFormat::SingleFile
    } else {
        InputFormat::Unknown
    }
}

fn process_single_file(input: &Path, mode: Mode, output: Option<PathBuf>) -> Result<()> {
    let raw = std::fs::read(input).with_context(|| format!("can't open '{}'", input.display()))?;
    let data = decompress(&raw).with_context(|| format!("can't inflate '{}'", input.display()))?;

    let name = input.display().to_string();
    let mut geometry = HkxGeometry::new();
    process_hkx(&data, &name, mode, &mut geometry);

    if mode == Mode::Extract {
        flush_geometry(&geometry, input, output)?;
    }
    Ok(())
}

fn process_bhd(input: &Path, mode: Mode, output: Option<PathBuf>) -> Result<()> {
    let archive = BhdArchive::open(input)
        .with_context(|| format!("can't open '{}'", input.display()))?;

    let mut geometry = HkxGeometry::new();

    for index in 0..archive.entry_count() {
        let Some(entry) = archive.get(index) else {
            continue;
        };

        // One corrupt member is skipped, the run continues.
        let raw = match archive.read(&entry) {
            Ok(raw) => raw,
            Err(e) => {
                eprintln!("can't read '{}': {}", entry.name, e);
                continue;
            }
        };
        let data = match decompress(raw) {
            Ok(data) => data,
            Err(e) => {
                eprintln!("can't inflate '{}': {}", entry.name, e);
                continue;
            }
        };

        process_hkx(&data, entry.name, mode, &mut geometry);
    }

    if mode == Mode::Extract {
        flush_geometry(&geometry, input, output)?;
    }
    Ok(())
}

fn process_hkx(data: &[u8], name: &str, mode: Mode, geometry: &mut HkxGeometry) {
    match mode {
        // No chunk walk is needed for a listing.
        Mode::List => println!("{:>8} {}", data.len(), name),

        Mode::Dump => {
            let mut stdout = std::io::stdout().lock();
            match dump_chunks(data, name, &mut stdout) {
                Ok(report) => warn_inconsistent(&report, name),
                Err(e) => eprintln!("can't dump '{}': {}", name, e),
            }
        }

        Mode::Extract => {
            let report = walk(data, |chunk| {
                geometry.ingest(chunk.tag, chunk.payload);
            });
            warn_inconsistent(&report, name);
        }
    }
}

fn warn_inconsistent(report: &WalkReport, name: &str) {
    if !report.is_consistent() {
        eprintln!(
            "warning: '{}': chunk walk stopped at {:#x} of {:#x} bytes",
            name, report.cursor, report.len
        );
    }
}

fn flush_geometry(geometry: &HkxGeometry, input: &Path, output: Option<PathBuf>) -> Result<()> {
    let path = output.unwrap_or_else(|| {
        let mut os = input.as_os_str().to_os_string();
        os.push(".obj");
        PathBuf::from(os)
    });

    if geometry.is_empty() {
        eprintln!("note: no geometry found in '{}'", input.display());
    }

    geometry
        .write_obj_file(&path)
        .with_context(|| format!("can't write '{}'", path.display()))?;

    println!(
        "{}: {} vertices, {} faces",
        path.display(),
        geometry.vertex_count(),
        geometry.face_count()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_archive() {
        assert_eq!(detect_format(b"BHF307D7"), InputFormat::Archive);
    }

    #[test]
    fn test_detect_single_file() {
        assert_eq!(detect_format(b"\x40\x00\x00\x50TAG0"), InputFormat::SingleFile);
    }

    #[test]
    fn test_detect_unknown() {
        // Neither magic present: rejected before any parsing.
        assert_eq!(detect_format(b"XXXXYYYY"), InputFormat::Unknown);
        assert_eq!(detect_format(b"DCX\0\x01\x00\x00\x00"), InputFormat::Unknown);
    }
}
