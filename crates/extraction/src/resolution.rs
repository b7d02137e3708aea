//! Pixel size computation.

use raster_common::BoundingBox;

/// Pixel sizes in native CRS units, `(size_x, size_y)`.
///
/// Envelope extent divided by pixel counts; the open handle guarantees
/// non-zero dimensions.
pub fn pixel_sizes(bbox: &BoundingBox, width: u32, height: u32) -> (f64, f64) {
    debug_assert!(width > 0 && height > 0);
    (
        bbox.width() / f64::from(width),
        bbox.height() / f64::from(height),
    )
}
