//! Raster metadata extraction.
//!
//! Orchestrates the full pipeline over a raster file: open and validate,
//! decode the embedded CRS definition and resolve it to an EPSG identifier,
//! reproject the native envelope into a canonical WGS84 footprint, derive
//! pixel sizes, count sample dimensions, and scan the grid for its value
//! extrema. Results accumulate in a [`RasterMetadata`] record.

pub mod error;
pub mod extrema;
pub mod footprint;
pub mod metadata;
pub mod pipeline;
pub mod resolution;
pub mod resolver;

pub use error::{ExtractionError, Result};
pub use extrema::{Extrema, ScanConfig};
pub use metadata::RasterMetadata;
pub use pipeline::MetadataExtractor;
pub use resolver::resolve_epsg;
