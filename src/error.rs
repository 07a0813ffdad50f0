//! Error types for the mesh to point cloud conversion pipeline.

use thiserror::Error;

/// Result type alias for conversion operations.
pub type ConvertResult<T> = Result<T, ConvertError>;

/// Errors that can occur while loading, sampling, or writing.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Mesh has no triangles or zero total surface area.
    #[error("mesh has no triangles with positive surface area")]
    EmptyOrDegenerateMesh,

    /// Requested sample count is not a positive integer.
    #[error("point count must be at least 1, got {0}")]
    InvalidPointCount(usize),

    /// Input file extension is not a supported mesh format.
    #[error("unsupported mesh format: {0}")]
    UnsupportedFormat(String),

    /// Input file content is not a valid mesh.
    #[error("invalid mesh data: {0}")]
    InvalidMesh(String),

    /// Source file could not be read or destination could not be written.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ConvertError {
    /// Create an invalid mesh error.
    pub fn invalid_mesh(details: impl Into<String>) -> Self {
        Self::InvalidMesh(details.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ConvertError::EmptyOrDegenerateMesh;
        assert!(format!("{err}").contains("surface area"));

        let err = ConvertError::InvalidPointCount(0);
        assert!(format!("{err}").contains("got 0"));

        let err = ConvertError::UnsupportedFormat("ply".to_string());
        assert!(format!("{err}").contains("ply"));

        let err = ConvertError::invalid_mesh("truncated record");
        assert!(format!("{err}").contains("truncated record"));
    }

    #[test]
    fn io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: ConvertError = io.into();
        assert!(matches!(err, ConvertError::Io(_)));
    }
}
