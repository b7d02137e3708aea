//! The metadata extraction pipeline.

use std::path::Path;

use tracing::{debug, info, warn};

use geotiff_parser::RasterHandle;
use raster_common::format_srid;
use reprojection::ReprojectionService;

use crate::error::{ExtractionError, Result};
use crate::extrema::{self, ScanConfig};
use crate::footprint;
use crate::metadata::RasterMetadata;
use crate::resolution;
use crate::resolver;

/// Core extractor for raster metadata.
///
/// Runs the extraction stages in order against an open raster handle:
/// CRS resolution, footprint reprojection, pixel sizes, band count, and the
/// extrema scan. The handle and its decoded grid release on every exit
/// path, success or failure.
pub struct MetadataExtractor<R: ReprojectionService> {
    reprojector: R,
    scan: ScanConfig,
}

impl<R: ReprojectionService> MetadataExtractor<R> {
    /// Create an extractor with the default scan configuration.
    pub fn new(reprojector: R) -> Self {
        Self {
            reprojector,
            scan: ScanConfig::default(),
        }
    }

    /// Create an extractor with an explicit scan configuration.
    pub fn with_scan_config(reprojector: R, scan: ScanConfig) -> Self {
        Self { reprojector, scan }
    }

    /// Extract metadata from the raster file at `path` into `meta`.
    ///
    /// Fields are written stage by stage; on failure the record keeps what
    /// earlier stages produced. A footprint the reprojector cannot compute
    /// (`Ok(None)`) is tolerated and leaves `meta.footprint` unset.
    pub fn extract(&self, path: &Path, meta: &mut RasterMetadata) -> Result<()> {
        if path.as_os_str().is_empty() {
            return Err(ExtractionError::InvalidInput(
                "empty raster path".to_string(),
            ));
        }

        let mut handle = RasterHandle::open(path)?;

        let crs = handle.crs_definition()?;
        debug!(crs = %crs, "declared coordinate system");
        meta.crs = Some(crs.clone());

        let epsg = resolver::resolve_epsg(&crs)?;
        meta.spatial_reference_id = Some(format_srid(epsg));

        let envelope = handle.native_envelope()?;
        let bbox = footprint::envelope_to_bbox(&envelope);

        match self.reprojector.bbox_to_canonical(&bbox, epsg) {
            Ok(Some(polygon)) => meta.footprint = Some(polygon),
            Ok(None) => {
                warn!(epsg, "reprojector produced no canonical footprint");
            }
            Err(e) => return Err(ExtractionError::GeometryTransform(e.to_string())),
        }

        let (pixel_size_x, pixel_size_y) =
            resolution::pixel_sizes(&bbox, handle.width(), handle.height());
        meta.pixel_size_x = pixel_size_x;
        meta.pixel_size_y = pixel_size_y;

        meta.num_sample_dimensions = u32::from(handle.bands());

        let grid = handle.read_grid()?;
        let extrema = extrema::scan_extrema(&grid, &self.scan)?;
        meta.min_value = extrema.min;
        meta.max_value = extrema.max;

        info!(
            path = %path.display(),
            srid = meta.spatial_reference_id.as_deref().unwrap_or("-"),
            bands = meta.num_sample_dimensions,
            min = meta.min_value,
            max = meta.max_value,
            "extracted raster metadata"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::Polygon;
    use raster_common::BoundingBox;
    use reprojection::ProjectionError;

    struct NoFootprint;

    impl ReprojectionService for NoFootprint {
        fn bbox_to_canonical(
            &self,
            _bbox: &BoundingBox,
            _epsg: u32,
        ) -> std::result::Result<Option<Polygon<f64>>, ProjectionError> {
            Ok(None)
        }
    }

    #[test]
    fn test_empty_path_is_invalid_input() {
        let extractor = MetadataExtractor::new(NoFootprint);
        let mut meta = RasterMetadata::new();
        let result = extractor.extract(Path::new(""), &mut meta);
        assert!(matches!(result, Err(ExtractionError::InvalidInput(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let extractor = MetadataExtractor::new(NoFootprint);
        let mut meta = RasterMetadata::new();
        let result = extractor.extract(Path::new("/nonexistent/raster.tif"), &mut meta);
        assert!(matches!(
            result,
            Err(ExtractionError::Io(_) | ExtractionError::InvalidInput(_))
        ));
    }
}
