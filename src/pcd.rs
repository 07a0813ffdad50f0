/// Binary PCD v0.7 point cloud serialisation
use crate::error::ConvertResult;
use std::fs;
use std::path::Path;

/// Render the fixed ASCII header for a cloud of `count` points.
/// WIDTH and POINTS both carry the record count; the field layout matches
/// what the Three.js PCDLoader expects.
pub fn pcd_header(count: usize) -> String {
    format!(
        "# .PCD v0.7 - Point Cloud Data file format\n\
         VERSION 0.7\n\
         FIELDS x y z\n\
         SIZE 4 4 4\n\
         TYPE F F F\n\
         COUNT 1 1 1\n\
         WIDTH {count}\n\
         HEIGHT 1\n\
         VIEWPOINT 0 0 0 1 0 0 0\n\
         POINTS {count}\n\
         DATA binary\n"
    )
}

/// Serialise a cloud to PCD bytes: the ASCII header followed immediately
/// by one 12-byte record per point, three little-endian f32 values each.
/// Points are truncated from f64 to f32 here, at write time.
pub fn pcd_bytes(points: &[[f64; 3]]) -> Vec<u8> {
    let header = pcd_header(points.len());
    let mut out = Vec::with_capacity(header.len() + points.len() * 12);
    out.extend_from_slice(header.as_bytes());

    for p in points {
        out.extend_from_slice(&(p[0] as f32).to_le_bytes());
        out.extend_from_slice(&(p[1] as f32).to_le_bytes());
        out.extend_from_slice(&(p[2] as f32).to_le_bytes());
    }

    out
}

/// Write a cloud to disk, creating or overwriting the destination.
/// A failure mid-write leaves a truncated file behind; no recovery is
/// attempted.
pub fn write_pcd(path: &Path, points: &[[f64; 3]]) -> ConvertResult<()> {
    fs::write(path, pcd_bytes(points))?;
    Ok(())
}
