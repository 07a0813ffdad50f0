/// Mesh to point cloud converter orchestrating the sampling pipeline.
use crate::bounds::CloudBounds;
use crate::constants::PROGRESS_UPDATE_INTERVAL;
use crate::error::ConvertResult;
use crate::mesh::{self, TriangleMesh};
use crate::pcd;
use crate::sampler::{self, SurfaceSampler};
use indicatif::{ProgressBar, ProgressStyle};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde_json::json;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Single-file mesh to PCD converter.
/// Loads the mesh, samples its surface by area, normalises the cloud into
/// a unit cube, and writes the binary PCD plus a JSON metadata sidecar.
pub struct MeshConverter {
    /// Input mesh file path (.stl or .obj).
    input_path: PathBuf,
    /// Destination for the binary point cloud.
    output_path: PathBuf,
    /// Number of surface samples to generate.
    point_count: usize,
    /// Optional RNG seed for reproducible clouds.
    seed: Option<u64>,
}

impl MeshConverter {
    /// Create a converter instance, validating inputs up front.
    pub fn new(
        input_path: &Path,
        output_path: &Path,
        point_count: usize,
        seed: Option<u64>,
    ) -> ConvertResult<Self> {
        if !input_path.exists() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("input mesh does not exist: {}", input_path.display()),
            )
            .into());
        }
        sampler::validate_point_count(point_count)?;

        Ok(Self {
            input_path: input_path.to_path_buf(),
            output_path: output_path.to_path_buf(),
            point_count,
            seed,
        })
    }

    /// Execute the full pipeline: load, sample, normalise, write.
    pub fn convert(&self) -> ConvertResult<()> {
        println!("Loading mesh: {}", self.input_path.display());
        let triangle_mesh = mesh::load_mesh(&self.input_path)?;
        self.log_mesh_info(&triangle_mesh);

        let surface_sampler = SurfaceSampler::new(&triangle_mesh)?;
        let points = self.sample_cloud(&surface_sampler)?;

        let bounds = CloudBounds::from_points(&points);
        self.print_bounds(&bounds);

        pcd::write_pcd(&self.output_path, &points)?;
        println!(
            "Saved {} points to: {}",
            points.len(),
            self.output_path.display()
        );

        self.save_metadata(&triangle_mesh, &points, &bounds)?;
        Ok(())
    }

    /// Sample the requested number of points with progress tracking, then
    /// recenter and rescale the cloud in place.
    fn sample_cloud(&self, surface_sampler: &SurfaceSampler) -> ConvertResult<Vec<[f64; 3]>> {
        println!("Sampling {} points from surface...", self.point_count);

        let mut rng = self.create_rng();
        let pb = ProgressBar::new(self.point_count as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{bar:40.green/blue}] {pos}/{len} points ({percent}%) {msg}")
                .unwrap()
                .progress_chars("▉▊▋▌▍▎▏ "),
        );
        pb.set_message("Sampling surface");

        let mut points = Vec::with_capacity(self.point_count);
        for idx in 0..self.point_count {
            points.push(surface_sampler.sample_point(&mut rng));

            if idx % PROGRESS_UPDATE_INTERVAL == 0 {
                pb.set_position(idx as u64);
            }
        }
        pb.finish_with_message("Surface sampled");

        sampler::normalize_cloud(&mut points);
        Ok(points)
    }

    /// Seeded generator when --seed was given, entropy otherwise.
    fn create_rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    /// Print mesh statistics for verification before sampling.
    fn log_mesh_info(&self, triangle_mesh: &TriangleMesh) {
        println!("Mesh has {} triangles", triangle_mesh.len());
        println!("Total surface area: {:.6}", triangle_mesh.total_area());
    }

    /// Print normalised cloud bounds for verification.
    fn print_bounds(&self, bounds: &CloudBounds) {
        println!("Point cloud bounds:");
        println!("  X: {:.4} to {:.4}", bounds.min_x, bounds.max_x);
        println!("  Y: {:.4} to {:.4}", bounds.min_y, bounds.max_y);
        println!("  Z: {:.4} to {:.4}", bounds.min_z, bounds.max_z);
    }

    /// Save conversion metadata as a JSON sidecar next to the output.
    fn save_metadata(
        &self,
        triangle_mesh: &TriangleMesh,
        points: &[[f64; 3]],
        bounds: &CloudBounds,
    ) -> ConvertResult<()> {
        let metadata = json!({
            "input": self.input_path.display().to_string(),
            "output": self.output_path.display().to_string(),
            "triangle_count": triangle_mesh.len(),
            "surface_area": triangle_mesh.total_area(),
            "point_count": points.len(),
            "seed": self.seed,
            "bounds": bounds,
        });

        let metadata_path = self.output_path.with_extension("meta.json");
        fs::write(&metadata_path, metadata.to_string())?;
        println!("Saved {}", metadata_path.display());

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_ascii_stl(path: &Path) {
        let mut file = fs::File::create(path).unwrap();
        writeln!(file, "solid square").unwrap();
        for tri in [
            [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0]],
            [[0.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0]],
        ] {
            writeln!(file, "  facet normal 0 0 1").unwrap();
            writeln!(file, "    outer loop").unwrap();
            for v in tri {
                writeln!(file, "      vertex {} {} {}", v[0], v[1], v[2]).unwrap();
            }
            writeln!(file, "    endloop").unwrap();
            writeln!(file, "  endfacet").unwrap();
        }
        writeln!(file, "endsolid square").unwrap();
    }

    #[test]
    fn end_to_end_stl_to_pcd() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("square.stl");
        let output = dir.path().join("square.pcd");
        write_ascii_stl(&input);

        let converter = MeshConverter::new(&input, &output, 50, Some(42)).unwrap();
        converter.convert().unwrap();

        let bytes = fs::read(&output).unwrap();
        let header = pcd::pcd_header(50);
        assert!(bytes.starts_with(header.as_bytes()));
        assert_eq!(bytes.len(), header.len() + 50 * 12);

        let metadata: serde_json::Value =
            serde_json::from_slice(&fs::read(dir.path().join("square.meta.json")).unwrap())
                .unwrap();
        assert_eq!(metadata["point_count"], 50);
        assert_eq!(metadata["triangle_count"], 2);
        assert_eq!(metadata["seed"], 42);
    }

    #[test]
    fn same_seed_writes_identical_files() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("square.stl");
        write_ascii_stl(&input);

        let out_a = dir.path().join("a.pcd");
        let out_b = dir.path().join("b.pcd");
        MeshConverter::new(&input, &out_a, 200, Some(7))
            .unwrap()
            .convert()
            .unwrap();
        MeshConverter::new(&input, &out_b, 200, Some(7))
            .unwrap()
            .convert()
            .unwrap();

        assert_eq!(fs::read(&out_a).unwrap(), fs::read(&out_b).unwrap());
    }

    #[test]
    fn missing_input_rejected_up_front() {
        let dir = tempfile::tempdir().unwrap();
        let result = MeshConverter::new(
            &dir.path().join("absent.stl"),
            &dir.path().join("out.pcd"),
            10,
            None,
        );
        assert!(matches!(result, Err(crate::error::ConvertError::Io(_))));
    }

    #[test]
    fn zero_point_count_rejected_up_front() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("square.stl");
        write_ascii_stl(&input);

        let result = MeshConverter::new(&input, &dir.path().join("out.pcd"), 0, None);
        assert!(matches!(
            result,
            Err(crate::error::ConvertError::InvalidPointCount(0))
        ));
    }
}
