//! Native envelope to bounding box conversion.

use geotiff_parser::NativeEnvelope;
use raster_common::BoundingBox;

/// Collapse a native envelope's corner positions into a 2D bounding box.
///
/// Only axes 0 and 1 carry information for 2D rasters; corner ordering is
/// not assumed.
pub fn envelope_to_bbox(envelope: &NativeEnvelope) -> BoundingBox {
    let mut bbox = BoundingBox::empty();
    bbox.expand_to_include(envelope.lower[0], envelope.lower[1]);
    bbox.expand_to_include(envelope.upper[0], envelope.upper[1]);
    bbox
}
