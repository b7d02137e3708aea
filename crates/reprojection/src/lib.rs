//! Reprojection of native-CRS envelopes into canonical WGS84 polygons.
//!
//! Implements the inverse projections from scratch without native library
//! dependencies. Coverage is deliberately partial: the built-in reprojector
//! answers `Ok(None)` for coordinate systems it does not carry, and callers
//! treat a missing footprint as tolerable rather than fatal.

pub mod ellipsoid;
pub mod mercator;
pub mod utm;

use geo::{Coord, LineString, Polygon};
use thiserror::Error;
use tracing::debug;

use raster_common::{BoundingBox, CANONICAL_EPSG};

/// Points interpolated along each envelope edge before transforming.
///
/// Projected envelopes bow outward under inverse projection; densifying the
/// edges keeps the canonical footprint tight around the true coverage.
const EDGE_STEPS: usize = 20;

const EPSG_WEB_MERCATOR: u32 = 3857;
const EPSG_UTM_NORTH_BASE: u32 = 32600;
const EPSG_UTM_SOUTH_BASE: u32 = 32700;

#[derive(Debug, Error)]
pub enum ProjectionError {
    #[error("envelope is empty or non-finite: {0:?}")]
    InvalidEnvelope(BoundingBox),
}

/// Transforms a native-CRS bounding envelope into a canonical (EPSG:4326)
/// footprint polygon.
///
/// `Ok(None)` means the source CRS is outside the implementation's
/// coverage; an `Err` means the input itself was unusable.
pub trait ReprojectionService {
    fn bbox_to_canonical(
        &self,
        bbox: &BoundingBox,
        source_epsg: u32,
    ) -> Result<Option<Polygon<f64>>, ProjectionError>;
}

/// Built-in reprojector backed by the projections in this crate.
///
/// Supports identity (EPSG:4326), Web Mercator (EPSG:3857), and the WGS84
/// UTM zones (EPSG:32601-32660 north, 32701-32760 south).
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinReprojector;

impl BuiltinReprojector {
    pub fn new() -> Self {
        Self
    }

    fn inverse(&self, epsg: u32) -> Option<fn(f64, f64, u32) -> (f64, f64)> {
        match epsg {
            CANONICAL_EPSG => Some(|x, y, _| (x, y)),
            EPSG_WEB_MERCATOR => Some(|x, y, _| mercator::to_geographic(x, y)),
            code if (EPSG_UTM_NORTH_BASE + 1..=EPSG_UTM_NORTH_BASE + 60).contains(&code) => {
                Some(|x, y, epsg| utm::to_geographic(x, y, epsg - EPSG_UTM_NORTH_BASE, false))
            }
            code if (EPSG_UTM_SOUTH_BASE + 1..=EPSG_UTM_SOUTH_BASE + 60).contains(&code) => {
                Some(|x, y, epsg| utm::to_geographic(x, y, epsg - EPSG_UTM_SOUTH_BASE, true))
            }
            _ => None,
        }
    }
}

impl ReprojectionService for BuiltinReprojector {
    fn bbox_to_canonical(
        &self,
        bbox: &BoundingBox,
        source_epsg: u32,
    ) -> Result<Option<Polygon<f64>>, ProjectionError> {
        if bbox.is_empty() || !bbox.is_finite() {
            return Err(ProjectionError::InvalidEnvelope(*bbox));
        }

        let Some(inverse) = self.inverse(source_epsg) else {
            debug!(epsg = source_epsg, "no inverse projection for source CRS");
            return Ok(None);
        };

        let mut exterior = Vec::with_capacity(4 * EDGE_STEPS + 1);
        for (from, to) in ring_edges(bbox) {
            for step in 0..EDGE_STEPS {
                let t = step as f64 / EDGE_STEPS as f64;
                let x = from.0 + (to.0 - from.0) * t;
                let y = from.1 + (to.1 - from.1) * t;

                let (lon, lat) = inverse(x, y, source_epsg);
                if !lon.is_finite() || !lat.is_finite() {
                    debug!(epsg = source_epsg, x, y, "inverse projection diverged");
                    return Ok(None);
                }
                exterior.push(Coord { x: lon, y: lat });
            }
        }

        let mut ring = LineString::from(exterior);
        ring.close();
        Ok(Some(Polygon::new(ring, vec![])))
    }
}

/// Counter-clockwise corner-to-corner edges of the envelope.
fn ring_edges(bbox: &BoundingBox) -> [((f64, f64), (f64, f64)); 4] {
    let bl = (bbox.min_x, bbox.min_y);
    let br = (bbox.max_x, bbox.min_y);
    let tr = (bbox.max_x, bbox.max_y);
    let tl = (bbox.min_x, bbox.max_y);
    [(bl, br), (br, tr), (tr, tl), (tl, bl)]
}
