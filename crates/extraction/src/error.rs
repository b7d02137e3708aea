//! Error types for the extraction crate.

use thiserror::Error;

use geotiff_parser::GeoTiffError;
use reprojection::ProjectionError;

/// Errors that can occur during metadata extraction.
#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("Invalid input raster: {0}")]
    InvalidInput(String),

    #[error("Unknown coordinate system: {0}")]
    UnknownCoordinateSystem(String),

    #[error("Failed to transform footprint geometry: {0}")]
    GeometryTransform(String),

    #[error("Failed to decode raster grid: {0}")]
    Decode(String),

    #[error("Raster contains no finite sample values")]
    EmptyRaster,

    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),
}

impl From<GeoTiffError> for ExtractionError {
    fn from(err: GeoTiffError) -> Self {
        match err {
            GeoTiffError::Io(e) => ExtractionError::Io(e),
            GeoTiffError::Decode(msg) => ExtractionError::Decode(msg),
            other => ExtractionError::InvalidInput(other.to_string()),
        }
    }
}

impl From<ProjectionError> for ExtractionError {
    fn from(err: ProjectionError) -> Self {
        ExtractionError::GeometryTransform(err.to_string())
    }
}

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parser_error_classification() {
        let invalid: ExtractionError = GeoTiffError::NotGeoTiff("bad magic".into()).into();
        assert!(matches!(invalid, ExtractionError::InvalidInput(_)));

        let decode: ExtractionError = GeoTiffError::Decode("truncated strip".into()).into();
        assert!(matches!(decode, ExtractionError::Decode(_)));

        let io: ExtractionError =
            GeoTiffError::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "gone")).into();
        assert!(matches!(io, ExtractionError::Io(_)));
    }
}
