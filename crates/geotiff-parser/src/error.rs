//! Error types for GeoTIFF raster access.

use thiserror::Error;

/// Result type for raster access operations.
pub type Result<T> = std::result::Result<T, GeoTiffError>;

/// Errors that can occur while reading a GeoTIFF raster.
#[derive(Debug, Error)]
pub enum GeoTiffError {
    #[error("Not a decodable GeoTIFF raster: {0}")]
    NotGeoTiff(String),

    #[error("Raster has zero-sized dimensions: {width}x{height}")]
    ZeroDimensions { width: u32, height: u32 },

    #[error("Missing georeferencing tags: {0}")]
    MissingGeoreferencing(&'static str),

    #[error("Malformed GeoKey directory: {0}")]
    MalformedGeoKeys(String),

    #[error("Failed to decode raster grid: {0}")]
    Decode(String),

    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    #[error("TIFF tag error: {0}")]
    Tag(#[from] tiff::TiffError),
}
