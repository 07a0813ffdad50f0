/// Point cloud coordinate bounds tracking
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloudBounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
    pub min_z: f64,
    pub max_z: f64,
}

impl CloudBounds {
    /// Create new bounds initialised to infinity values
    pub fn new() -> Self {
        Self {
            min_x: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            min_y: f64::INFINITY,
            max_y: f64::NEG_INFINITY,
            min_z: f64::INFINITY,
            max_z: f64::NEG_INFINITY,
        }
    }

    /// Update bounds with a new point
    pub fn update(&mut self, p: [f64; 3]) {
        self.min_x = self.min_x.min(p[0]);
        self.max_x = self.max_x.max(p[0]);
        self.min_y = self.min_y.min(p[1]);
        self.max_y = self.max_y.max(p[1]);
        self.min_z = self.min_z.min(p[2]);
        self.max_z = self.max_z.max(p[2]);
    }

    /// Accumulate bounds over every point of a cloud
    pub fn from_points(points: &[[f64; 3]]) -> Self {
        let mut bounds = Self::new();
        for p in points {
            bounds.update(*p);
        }
        bounds
    }

    /// Get world space dimensions
    pub fn dimensions(&self) -> (f64, f64, f64) {
        (
            self.max_x - self.min_x,
            self.max_y - self.min_y,
            self.max_z - self.min_z,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_track_min_and_max() {
        let bounds = CloudBounds::from_points(&[
            [1.0, -2.0, 0.5],
            [-1.0, 3.0, 0.0],
            [0.0, 0.0, -4.0],
        ]);

        assert_eq!(bounds.min_x, -1.0);
        assert_eq!(bounds.max_x, 1.0);
        assert_eq!(bounds.min_y, -2.0);
        assert_eq!(bounds.max_y, 3.0);
        assert_eq!(bounds.min_z, -4.0);
        assert_eq!(bounds.max_z, 0.5);
        assert_eq!(bounds.dimensions(), (2.0, 5.0, 4.5));
    }
}
