//! Minimal OBJ mesh loading: vertex and face records only.
//!
//! Texture coordinates, normals, groups, and materials are ignored. Faces
//! with more than three vertices are fan-triangulated from the first
//! vertex, preserving file order in the resulting triangle soup.

use crate::error::{ConvertError, ConvertResult};
use crate::mesh::{self, TriangleMesh};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Load an OBJ file as a triangle soup.
pub fn load_obj(path: &Path) -> ConvertResult<TriangleMesh> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let mut vertices: Vec<[f64; 3]> = Vec::new();
    let mut triangle_mesh = TriangleMesh::new();

    for line in reader.lines() {
        let line = line?;
        let mut parts = line.split_whitespace();
        match parts.next() {
            Some("v") => {
                vertices.push(mesh::parse_coords(&mut parts, "v")?);
            }
            Some("f") => {
                let mut face: Vec<[f64; 3]> = Vec::with_capacity(4);
                for token in parts {
                    let index = resolve_index(token, vertices.len())?;
                    face.push(vertices[index]);
                }
                if face.len() < 3 {
                    return Err(ConvertError::InvalidMesh(format!(
                        "OBJ face has {} vertices, expected at least 3",
                        face.len()
                    )));
                }
                for i in 1..face.len() - 1 {
                    triangle_mesh.push_triangle([face[0], face[i], face[i + 1]])?;
                }
            }
            _ => {}
        }
    }

    Ok(triangle_mesh)
}

/// Resolve a face token (`7`, `7/1`, `7//3`, `-1`) to a vertex index.
/// OBJ indices are 1-based; negative indices count back from the most
/// recently declared vertex.
fn resolve_index(token: &str, vertex_count: usize) -> ConvertResult<usize> {
    let index_part = token.split('/').next().unwrap_or("");
    let raw: i64 = index_part.parse().map_err(|_| {
        ConvertError::InvalidMesh(format!("OBJ face index is not an integer: {token}"))
    })?;

    let resolved = if raw > 0 {
        raw as usize - 1
    } else if raw < 0 {
        let back = raw.unsigned_abs() as usize;
        if back > vertex_count {
            return Err(ConvertError::InvalidMesh(format!(
                "OBJ face index {raw} out of range for {vertex_count} vertices"
            )));
        }
        vertex_count - back
    } else {
        return Err(ConvertError::invalid_mesh("OBJ face index 0 is not valid"));
    };

    if resolved >= vertex_count {
        return Err(ConvertError::InvalidMesh(format!(
            "OBJ face index {raw} out of range for {vertex_count} vertices"
        )));
    }
    Ok(resolved)
}
