//! Collision geometry accumulation and OBJ export.
//!
//! Geometry-bearing chunks carry a big-endian record: vertex count, index
//! count, `count * 3` f32 positions, then u16 indices forming triangles.
//! One [`HkxGeometry`] accumulates across every file of a run (a single
//! hkx file or a whole binder) and is written out once at the end.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use hkxtool_common::BinaryReader;

use crate::Result;

/// Tag of geometry-bearing chunks.
pub const GEOM_TAG: [u8; 4] = *b"GEOM";

/// Accumulated mesh geometry.
///
/// Faces always index into the accumulated vertex list: when a new chunk
/// is ingested its local indices are rebased past the vertices already
/// present, so the arrays stay internally consistent across merges.
#[derive(Debug, Default)]
pub struct HkxGeometry {
    vertices: Vec<[f32; 3]>,
    faces: Vec<[u32; 3]>,
}

impl HkxGeometry {
    /// Create an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of accumulated vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of accumulated triangle faces.
    #[inline]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Whether nothing has been accumulated.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() && self.faces.is_empty()
    }

    /// Accumulated vertex positions.
    #[inline]
    pub fn vertices(&self) -> &[[f32; 3]] {
        &self.vertices
    }

    /// Accumulated triangle faces (0-based indices into [`Self::vertices`]).
    #[inline]
    pub fn faces(&self) -> &[[u32; 3]] {
        &self.faces
    }

    /// Ingest one chunk.
    ///
    /// Non-geometry tags are ignored. A malformed geometry payload is
    /// absorbed: it contributes nothing, nothing partial is appended, and
    /// no error escapes, so one bad chunk cannot abort its siblings.
    /// Returns whether the chunk contributed geometry.
    pub fn ingest(&mut self, tag: [u8; 4], payload: &[u8]) -> bool {
        if tag != GEOM_TAG {
            return false;
        }

        let Some((vertices, faces)) = decode_geometry(payload) else {
            return false;
        };

        let base = self.vertices.len() as u32;
        self.vertices.extend_from_slice(&vertices);
        self.faces
            .extend(faces.iter().map(|f| [f[0] + base, f[1] + base, f[2] + base]));
        true
    }

    /// Write the accumulated mesh as Wavefront OBJ text.
    ///
    /// The accumulator is not consumed, so a failed write can be retried.
    pub fn write_obj<W: Write>(&self, out: &mut W) -> Result<()> {
        for v in &self.vertices {
            writeln!(out, "v {} {} {}", v[0], v[1], v[2])?;
        }
        for f in &self.faces {
            // OBJ indices are 1-based.
            writeln!(out, "f {} {} {}", f[0] + 1, f[1] + 1, f[2] + 1)?;
        }
        Ok(())
    }

    /// Write the accumulated mesh to an OBJ file at `path`.
    pub fn write_obj_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut out = BufWriter::new(File::create(path)?);
        self.write_obj(&mut out)?;
        out.flush()?;
        Ok(())
    }
}

/// Decode one geometry payload into local vertex and face arrays.
///
/// Returns `None` on any inconsistency: counts that overrun the payload,
/// an index count that does not form whole triangles, or an index past the
/// vertex count.
fn decode_geometry(payload: &[u8]) -> Option<(Vec<[f32; 3]>, Vec<[u32; 3]>)> {
    let mut reader = BinaryReader::new(payload);

    let vertex_count = reader.read_u32_be().ok()? as usize;
    let index_count = reader.read_u32_be().ok()? as usize;

    if index_count % 3 != 0 {
        return None;
    }
    let needed = vertex_count
        .checked_mul(12)?
        .checked_add(index_count.checked_mul(2)?)?;
    if reader.remaining() < needed {
        return None;
    }

    let mut vertices = Vec::with_capacity(vertex_count);
    for _ in 0..vertex_count {
        let x = reader.read_f32_be().ok()?;
        let y = reader.read_f32_be().ok()?;
        let z = reader.read_f32_be().ok()?;
        vertices.push([x, y, z]);
    }

    let mut faces = Vec::with_capacity(index_count / 3);
    let mut triple = [0u32; 3];
    for i in 0..index_count {
        let index = reader.read_u16_be().ok()? as u32;
        if index as usize >= vertex_count {
            return None;
        }
        triple[i % 3] = index;
        if i % 3 == 2 {
            faces.push(triple);
        }
    }

    Some((vertices, faces))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build a geometry chunk payload from vertices and triangle indices.
    pub(crate) fn build_geometry(vertices: &[[f32; 3]], indices: &[u16]) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(&(vertices.len() as u32).to_be_bytes());
        out.extend_from_slice(&(indices.len() as u32).to_be_bytes());
        for v in vertices {
            for c in v {
                out.extend_from_slice(&c.to_be_bytes());
            }
        }
        for i in indices {
            out.extend_from_slice(&i.to_be_bytes());
        }
        out
    }

    const TRI: [[f32; 3]; 3] = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];

    #[test]
    fn test_ingest_single_chunk() {
        let mut g = HkxGeometry::new();
        assert!(g.ingest(GEOM_TAG, &build_geometry(&TRI, &[0, 1, 2])));

        assert_eq!(g.vertex_count(), 3);
        assert_eq!(g.face_count(), 1);
        assert_eq!(g.faces()[0], [0, 1, 2]);
    }

    #[test]
    fn test_merge_rebases_indices() {
        let quad = [
            [0.0, 0.0, 1.0],
            [1.0, 0.0, 1.0],
            [1.0, 1.0, 1.0],
            [0.0, 1.0, 1.0],
        ];

        let mut g = HkxGeometry::new();
        g.ingest(GEOM_TAG, &build_geometry(&TRI, &[0, 1, 2]));
        g.ingest(GEOM_TAG, &build_geometry(&quad, &[0, 1, 2, 0, 2, 3]));

        assert_eq!(g.vertex_count(), 3 + 4);
        assert_eq!(g.face_count(), 3);
        // Second chunk's indices offset by the 3 vertices already present.
        assert_eq!(g.faces()[1], [3, 4, 5]);
        assert_eq!(g.faces()[2], [3, 5, 6]);
        for f in g.faces() {
            for &i in f {
                assert!((i as usize) < g.vertex_count());
            }
        }
    }

    #[test]
    fn test_non_geometry_tag_is_noop() {
        let mut g = HkxGeometry::new();
        assert!(!g.ingest(*b"SDKV", b"20150100"));
        assert!(g.is_empty());
    }

    #[test]
    fn test_malformed_chunk_contributes_nothing() {
        let mut g = HkxGeometry::new();
        g.ingest(GEOM_TAG, &build_geometry(&TRI, &[0, 1, 2]));

        // Truncated payload.
        let mut short = build_geometry(&TRI, &[0, 1, 2]);
        short.truncate(short.len() - 2);
        assert!(!g.ingest(GEOM_TAG, &short));

        // Index count not a multiple of 3.
        assert!(!g.ingest(GEOM_TAG, &build_geometry(&TRI, &[0, 1])));

        // Dangling index.
        assert!(!g.ingest(GEOM_TAG, &build_geometry(&TRI, &[0, 1, 3])));

        assert_eq!(g.vertex_count(), 3);
        assert_eq!(g.face_count(), 1);
    }

    #[test]
    fn test_obj_output() {
        let mut g = HkxGeometry::new();
        g.ingest(GEOM_TAG, &build_geometry(&TRI, &[0, 1, 2]));

        let mut out = Vec::new();
        g.write_obj(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(text, "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n");
    }

    #[test]
    fn test_write_obj_file() {
        let mut g = HkxGeometry::new();
        g.ingest(GEOM_TAG, &build_geometry(&TRI, &[0, 1, 2]));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mesh.obj");
        g.write_obj_file(&path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("v 0 0 0\n"));
        assert!(text.ends_with("f 1 2 3\n"));
    }
}
