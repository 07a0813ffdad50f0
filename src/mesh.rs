/// Triangle soup mesh types and input format dispatch
use crate::error::{ConvertError, ConvertResult};
use crate::obj;
use crate::stl;
use std::path::Path;

/// A single mesh triangle as three vertex positions.
pub type Triangle = [[f64; 3]; 3];

/// Area of a triangle from the cross product of its edge vectors.
pub fn triangle_area(tri: &Triangle) -> f64 {
    let e1 = sub(tri[1], tri[0]);
    let e2 = sub(tri[2], tri[0]);
    0.5 * norm(cross(e1, e2))
}

pub(crate) fn sub(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

pub(crate) fn cross(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

pub(crate) fn norm(v: [f64; 3]) -> f64 {
    (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt()
}

/// Ordered triangle collection loaded from a mesh file.
/// Triangle order follows the source file; degenerate triangles are kept
/// and simply carry zero sampling weight.
#[derive(Debug, Clone)]
pub struct TriangleMesh {
    pub triangles: Vec<Triangle>,
}

impl TriangleMesh {
    /// Create an empty mesh
    pub fn new() -> Self {
        Self {
            triangles: Vec::new(),
        }
    }

    /// Create an empty mesh with preallocated triangle storage
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            triangles: Vec::with_capacity(capacity),
        }
    }

    /// Append a triangle, rejecting non-finite vertex coordinates.
    pub fn push_triangle(&mut self, tri: Triangle) -> ConvertResult<()> {
        for vertex in &tri {
            for coord in vertex {
                if !coord.is_finite() {
                    return Err(ConvertError::invalid_mesh(
                        "vertex coordinate is not finite",
                    ));
                }
            }
        }
        self.triangles.push(tri);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Total surface area summed in triangle order
    pub fn total_area(&self) -> f64 {
        self.triangles.iter().map(triangle_area).sum()
    }
}

/// Load a mesh file, dispatching on the file extension.
/// Supports .stl (ASCII or binary) and .obj inputs.
pub fn load_mesh(path: &Path) -> ConvertResult<TriangleMesh> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("stl") => stl::load_stl(path),
        Some("obj") => obj::load_obj(path),
        Some(other) => Err(ConvertError::UnsupportedFormat(other.to_string())),
        None => Err(ConvertError::UnsupportedFormat(
            path.display().to_string(),
        )),
    }
}

/// Parse three whitespace-separated floating point coordinates.
pub(crate) fn parse_coords<'a>(
    parts: &mut impl Iterator<Item = &'a str>,
    record: &str,
) -> ConvertResult<[f64; 3]> {
    let mut coords = [0.0; 3];
    for coord in &mut coords {
        let token = parts.next().ok_or_else(|| {
            ConvertError::InvalidMesh(format!("{record} record is missing a coordinate"))
        })?;
        *coord = token.parse().map_err(|_| {
            ConvertError::InvalidMesh(format!("{record} coordinate is not a number: {token}"))
        })?;
    }
    Ok(coords)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_right_triangle_area() {
        let tri: Triangle = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];
        assert!((triangle_area(&tri) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn degenerate_triangle_has_zero_area() {
        let tri: Triangle = [[1.0, 2.0, 3.0], [1.0, 2.0, 3.0], [1.0, 2.0, 3.0]];
        assert_eq!(triangle_area(&tri), 0.0);

        let collinear: Triangle = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [2.0, 0.0, 0.0]];
        assert_eq!(triangle_area(&collinear), 0.0);
    }

    #[test]
    fn total_area_sums_in_order() {
        let mut mesh = TriangleMesh::new();
        mesh.push_triangle([[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]])
            .unwrap();
        mesh.push_triangle([[0.0, 0.0, 0.0], [2.0, 0.0, 0.0], [0.0, 2.0, 0.0]])
            .unwrap();
        assert!((mesh.total_area() - 2.5).abs() < 1e-12);
    }

    #[test]
    fn non_finite_vertex_rejected() {
        let mut mesh = TriangleMesh::new();
        let result =
            mesh.push_triangle([[0.0, 0.0, 0.0], [f64::NAN, 0.0, 0.0], [0.0, 1.0, 0.0]]);
        assert!(matches!(result, Err(ConvertError::InvalidMesh(_))));
        assert!(mesh.is_empty());
    }

    #[test]
    fn unsupported_extension_rejected() {
        let result = load_mesh(Path::new("model.ply"));
        assert!(matches!(result, Err(ConvertError::UnsupportedFormat(f)) if f == "ply"));

        let result = load_mesh(Path::new("model"));
        assert!(matches!(result, Err(ConvertError::UnsupportedFormat(_))));
    }

    #[test]
    fn parse_coords_reports_bad_tokens() {
        let mut parts = "1.0 2.0".split_whitespace();
        let result = parse_coords(&mut parts, "vertex");
        assert!(matches!(result, Err(ConvertError::InvalidMesh(_))));

        let mut parts = "1.0 abc 3.0".split_whitespace();
        let result = parse_coords(&mut parts, "vertex");
        assert!(matches!(result, Err(ConvertError::InvalidMesh(_))));

        let mut parts = "1.0 -2.5 3e2".split_whitespace();
        let coords = parse_coords(&mut parts, "vertex").unwrap();
        assert_eq!(coords, [1.0, -2.5, 300.0]);
    }
}
