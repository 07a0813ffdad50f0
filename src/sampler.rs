/// Area-weighted surface sampling and point cloud normalisation
use crate::constants::REDUCTION_CHUNK_SIZE;
use crate::error::{ConvertError, ConvertResult};
use crate::mesh::{self, Triangle, TriangleMesh, triangle_area};
use rand::Rng;
use rayon::prelude::*;

/// Precomputed cumulative-area distribution over a mesh's triangles.
/// Triangles are weighted by surface area, so a large triangle receives
/// proportionally more samples than a small one; zero-area triangles
/// receive no samples at all.
pub struct SurfaceSampler<'a> {
    triangles: &'a [Triangle],
    cumulative_areas: Vec<f64>,
    total_area: f64,
}

impl<'a> SurfaceSampler<'a> {
    /// Build the sampler, accumulating areas in mesh order.
    /// Fails when the mesh is empty or every triangle is degenerate.
    pub fn new(triangle_mesh: &'a TriangleMesh) -> ConvertResult<Self> {
        let mut cumulative_areas = Vec::with_capacity(triangle_mesh.len());
        let mut running = 0.0;
        for tri in &triangle_mesh.triangles {
            running += triangle_area(tri);
            cumulative_areas.push(running);
        }

        if cumulative_areas.is_empty() || running <= 0.0 || !running.is_finite() {
            return Err(ConvertError::EmptyOrDegenerateMesh);
        }

        Ok(Self {
            triangles: &triangle_mesh.triangles,
            cumulative_areas,
            total_area: running,
        })
    }

    /// Draw one point uniformly distributed over the mesh surface.
    pub fn sample_point<R: Rng + ?Sized>(&self, rng: &mut R) -> [f64; 3] {
        let draw = rng.gen_range(0.0..self.total_area);
        let tri = &self.triangles[self.locate_triangle(draw)];
        sample_in_triangle(tri, rng)
    }

    /// Draw `count` points independently; `count` must be at least 1.
    pub fn sample<R: Rng + ?Sized>(
        &self,
        count: usize,
        rng: &mut R,
    ) -> ConvertResult<Vec<[f64; 3]>> {
        validate_point_count(count)?;
        Ok((0..count).map(|_| self.sample_point(rng)).collect())
    }

    /// First triangle whose cumulative area strictly exceeds the draw.
    /// A zero-area triangle shares its cumulative value with its
    /// predecessor, so it can never be the first strictly-greater entry.
    fn locate_triangle(&self, draw: f64) -> usize {
        let index = self.cumulative_areas.partition_point(|&c| c <= draw);
        index.min(self.cumulative_areas.len() - 1)
    }
}

/// Reject a zero sample count before any generation work.
pub fn validate_point_count(count: usize) -> ConvertResult<()> {
    if count == 0 {
        return Err(ConvertError::InvalidPointCount(count));
    }
    Ok(())
}

/// Uniform point inside a triangle from two uniform draws folded onto the
/// barycentric simplex: draws summing past 1 are reflected back, keeping
/// the weights (1-r1-r2, r1, r2) uniform over the triangle's area.
pub fn sample_in_triangle<R: Rng + ?Sized>(tri: &Triangle, rng: &mut R) -> [f64; 3] {
    let mut r1: f64 = rng.gen_range(0.0..1.0);
    let mut r2: f64 = rng.gen_range(0.0..1.0);
    if r1 + r2 > 1.0 {
        r1 = 1.0 - r1;
        r2 = 1.0 - r2;
    }
    let w0 = 1.0 - r1 - r2;
    [
        w0 * tri[0][0] + r1 * tri[1][0] + r2 * tri[2][0],
        w0 * tri[0][1] + r1 * tri[1][1] + r2 * tri[2][1],
        w0 * tri[0][2] + r1 * tri[1][2] + r2 * tri[2][2],
    ]
}

/// Recenter the cloud at the origin, then rescale it into a unit cube.
/// This is the in-place transform applied to every finished cloud before
/// it is written.
pub fn normalize_cloud(points: &mut [[f64; 3]]) {
    recenter(points);
    rescale(points);
}

/// Translate the cloud so its centroid sits at the origin.
pub fn recenter(points: &mut [[f64; 3]]) {
    if points.is_empty() {
        return;
    }

    let sum = points
        .par_chunks(REDUCTION_CHUNK_SIZE)
        .map(|chunk| {
            let mut acc = [0.0f64; 3];
            for p in chunk {
                acc[0] += p[0];
                acc[1] += p[1];
                acc[2] += p[2];
            }
            acc
        })
        .reduce(
            || [0.0; 3],
            |a, b| [a[0] + b[0], a[1] + b[1], a[2] + b[2]],
        );

    let inv_len = 1.0 / points.len() as f64;
    let centroid = [sum[0] * inv_len, sum[1] * inv_len, sum[2] * inv_len];

    for p in points.iter_mut() {
        p[0] -= centroid[0];
        p[1] -= centroid[1];
        p[2] -= centroid[2];
    }
}

/// Uniformly rescale so the farthest point lies at distance 0.5 from the
/// origin. A cloud collapsed onto a single point is left untouched.
pub fn rescale(points: &mut [[f64; 3]]) {
    let max_dist = points
        .par_chunks(REDUCTION_CHUNK_SIZE)
        .map(|chunk| chunk.iter().map(|p| mesh::norm(*p)).fold(0.0f64, f64::max))
        .reduce(|| 0.0, f64::max);

    if max_dist > 0.0 {
        let scale = 1.0 / (2.0 * max_dist);
        for p in points.iter_mut() {
            p[0] *= scale;
            p[1] *= scale;
            p[2] *= scale;
        }
    }
}
