//! Common value types shared across the raster metadata workspace.

pub mod bbox;
pub mod crs;

pub use bbox::BoundingBox;
pub use crs::{format_srid, CrsDefinition, CrsModelType, CANONICAL_EPSG};
