//! STL mesh loading, ASCII and binary with automatic detection.
//!
//! ASCII files start with `solid`; binary files carry an 80-byte header,
//! a little-endian triangle count, and 50-byte triangle records (normal,
//! three vertices, attribute count). Some binary exporters also write
//! `solid` into the header, so detection additionally checks for the null
//! bytes a text header never contains.

use crate::error::{ConvertError, ConvertResult};
use crate::mesh::{self, Triangle, TriangleMesh};
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

/// Binary STL header size in bytes.
const HEADER_SIZE: usize = 80;

/// Size of one binary triangle record (normal + 3 vertices + attribute).
const RECORD_SIZE: usize = 50;

/// Load an STL file as a triangle soup.
pub fn load_stl(path: &Path) -> ConvertResult<TriangleMesh> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);

    let mut head = [0u8; HEADER_SIZE + 4];
    let read = read_up_to(&mut reader, &mut head)?;
    if read < 6 {
        return Err(ConvertError::invalid_mesh("file too small to be valid STL"));
    }

    let head_text = String::from_utf8_lossy(&head[..read.min(HEADER_SIZE)]);
    let looks_ascii =
        head_text.trim_start().starts_with("solid") && !head[..read.min(HEADER_SIZE)].contains(&0);

    if looks_ascii {
        // Re-read from the start, the header probe consumed the first lines.
        let reader = BufReader::new(File::open(path)?);
        parse_ascii(reader)
    } else {
        parse_binary(&head[..read], reader)
    }
}

/// Read until the buffer is full or the stream ends; returns bytes read.
fn read_up_to<R: Read>(reader: &mut R, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        let n = reader.read(&mut buf[filled..])?;
        if n == 0 {
            break;
        }
        filled += n;
    }
    Ok(filled)
}

/// Parse binary STL given the already-read head bytes.
fn parse_binary<R: Read>(head: &[u8], mut reader: R) -> ConvertResult<TriangleMesh> {
    if head.len() < HEADER_SIZE + 4 {
        return Err(ConvertError::invalid_mesh("binary STL header truncated"));
    }

    let face_count = u32::from_le_bytes([
        head[HEADER_SIZE],
        head[HEADER_SIZE + 1],
        head[HEADER_SIZE + 2],
        head[HEADER_SIZE + 3],
    ]) as usize;

    let mut triangle_mesh = TriangleMesh::with_capacity(face_count);
    let mut record = [0u8; RECORD_SIZE];
    for loaded in 0..face_count {
        let n = read_up_to(&mut reader, &mut record)?;
        if n < RECORD_SIZE {
            return Err(ConvertError::InvalidMesh(format!(
                "binary STL truncated: expected {face_count} triangles, got {loaded}"
            )));
        }

        // The 12-byte normal is skipped; vertex data starts at offset 12.
        let tri: Triangle = [
            read_vertex(&record[12..24]),
            read_vertex(&record[24..36]),
            read_vertex(&record[36..48]),
        ];
        triangle_mesh.push_triangle(tri)?;
    }

    Ok(triangle_mesh)
}

/// Read a vertex from 12 bytes (3 little-endian f32 values).
fn read_vertex(buf: &[u8]) -> [f64; 3] {
    let x = f32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]);
    let y = f32::from_le_bytes([buf[4], buf[5], buf[6], buf[7]]);
    let z = f32::from_le_bytes([buf[8], buf[9], buf[10], buf[11]]);
    [f64::from(x), f64::from(y), f64::from(z)]
}

/// Parse ASCII STL facet records.
fn parse_ascii<R: BufRead>(reader: R) -> ConvertResult<TriangleMesh> {
    let mut triangle_mesh = TriangleMesh::new();
    let mut in_loop = false;
    let mut face_vertices: Vec<[f64; 3]> = Vec::with_capacity(3);

    for line in reader.lines() {
        let line = line?;
        let mut parts = line.split_whitespace();
        let Some(keyword) = parts.next() else {
            continue;
        };

        match keyword.to_ascii_lowercase().as_str() {
            "outer" => {
                in_loop = true;
                face_vertices.clear();
            }
            "vertex" if in_loop => {
                face_vertices.push(mesh::parse_coords(&mut parts, "vertex")?);
            }
            "endloop" => {
                in_loop = false;
            }
            "endfacet" => {
                if face_vertices.len() != 3 {
                    return Err(ConvertError::InvalidMesh(format!(
                        "STL facet has {} vertices, expected 3",
                        face_vertices.len()
                    )));
                }
                triangle_mesh
                    .push_triangle([face_vertices[0], face_vertices[1], face_vertices[2]])?;
                face_vertices.clear();
            }
            "endsolid" => break,
            _ => {}
        }
    }

    Ok(triangle_mesh)
}
