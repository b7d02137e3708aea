//! The metadata record populated by the extraction pipeline.

use geo::Polygon;
use serde::{Deserialize, Serialize};

use raster_common::CrsDefinition;

/// Default minimum sample value before the raster grid has been scanned.
pub const DEFAULT_MIN_VALUE: f64 = 0.0;

/// Default maximum sample value before the raster grid has been scanned.
pub const DEFAULT_MAX_VALUE: f64 = 100.0;

/// Metadata extracted from a raster file.
///
/// The record is populated stage by stage; a stage that fails leaves every
/// field written by earlier stages intact, so a partially populated record
/// is a valid (if incomplete) observation of the raster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RasterMetadata {
    /// CRS definition as declared by the raster file
    pub crs: Option<CrsDefinition>,
    /// Resolved spatial reference identifier, e.g. `"EPSG:4326"`
    pub spatial_reference_id: Option<String>,
    /// Coverage footprint in the canonical CRS (WGS84 lon/lat)
    pub footprint: Option<Polygon<f64>>,
    /// Pixel width in native CRS units, `0.0` until computed
    pub pixel_size_x: f64,
    /// Pixel height in native CRS units, `0.0` until computed
    pub pixel_size_y: f64,
    /// Minimum finite sample value across all bands
    pub min_value: f64,
    /// Maximum finite sample value across all bands
    pub max_value: f64,
    /// Number of sample dimensions (bands) per pixel
    pub num_sample_dimensions: u32,
}

impl RasterMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when every extraction stage has written its fields.
    pub fn is_complete(&self) -> bool {
        self.spatial_reference_id.is_some()
            && self.footprint.is_some()
            && self.pixel_size_x > 0.0
            && self.pixel_size_y > 0.0
            && self.num_sample_dimensions > 0
    }
}

impl Default for RasterMetadata {
    fn default() -> Self {
        Self {
            crs: None,
            spatial_reference_id: None,
            footprint: None,
            pixel_size_x: 0.0,
            pixel_size_y: 0.0,
            min_value: DEFAULT_MIN_VALUE,
            max_value: DEFAULT_MAX_VALUE,
            num_sample_dimensions: 0,
        }
    }
}
