//! Coordinate Reference System descriptor types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// EPSG code of the canonical global reference system (WGS84 lat/lon).
///
/// Footprint geometries are always expressed in this system.
pub const CANONICAL_EPSG: u32 = 4326;

/// Format an EPSG code as a spatial reference identifier string.
pub fn format_srid(code: u32) -> String {
    format!("EPSG:{code}")
}

/// Overall model type declared by a raster's embedded CRS definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CrsModelType {
    /// Projected coordinate system (meters on a plane)
    Projected,
    /// Geographic coordinate system (lat/lon in degrees)
    Geographic,
    /// Geocentric coordinate system (earth-centered XYZ)
    Geocentric,
    /// Model type absent or unrecognized
    #[default]
    Unknown,
}

/// CRS definition as embedded in a raster file.
///
/// This is an opaque descriptor of what the file declares, not a resolved
/// reference system: the code fields carry raw values (including the
/// user-defined sentinel 32767) and resolution to a canonical EPSG
/// identifier is a separate step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CrsDefinition {
    /// Declared model type
    pub model: CrsModelType,
    /// Projected CS code value, if declared
    pub projected_code: Option<u16>,
    /// Geographic CS code value, if declared
    pub geographic_code: Option<u16>,
    /// Human-readable citation text, if declared
    pub citation: Option<String>,
}

impl CrsDefinition {
    /// Best-effort human-readable name for this CRS.
    ///
    /// Returns the declared citation, or the literal `"Unknown"` when the
    /// definition carries no name.
    pub fn name(&self) -> &str {
        self.citation.as_deref().unwrap_or("Unknown")
    }

    /// True when the definition declares nothing at all.
    pub fn is_empty(&self) -> bool {
        self.model == CrsModelType::Unknown
            && self.projected_code.is_none()
            && self.geographic_code.is_none()
            && self.citation.is_none()
    }
}

impl fmt::Display for CrsDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.model, self.projected_code, self.geographic_code) {
            (CrsModelType::Projected, Some(code), _) => write!(f, "projected:{code}"),
            (CrsModelType::Geographic, _, Some(code)) => write!(f, "geographic:{code}"),
            _ => write!(f, "{}", self.name()),
        }
    }
}
