//! CRS definition to EPSG code resolution.

use tracing::debug;

use raster_common::{CrsDefinition, CrsModelType};

use crate::error::{ExtractionError, Result};

/// GeoKey sentinel for a user-defined (non-EPSG) coordinate system.
const USER_DEFINED: u16 = 32767;

/// Resolve a raster's declared CRS definition to an EPSG code.
///
/// Prefers the code field matching the declared model type and falls back
/// to the other one, so a projected raster that only carries its datum's
/// geographic code still resolves. Codes `0` and the user-defined sentinel
/// are treated as absent.
pub fn resolve_epsg(def: &CrsDefinition) -> Result<u32> {
    let (preferred, fallback) = match def.model {
        CrsModelType::Geographic => (def.geographic_code, def.projected_code),
        _ => (def.projected_code, def.geographic_code),
    };

    let code = usable(preferred)
        .or_else(|| usable(fallback))
        .ok_or_else(|| ExtractionError::UnknownCoordinateSystem(def.name().to_string()))?;

    let resolved = normalize_alias(u32::from(code));
    debug!(declared = %def, epsg = resolved, "resolved coordinate system");
    Ok(resolved)
}

fn usable(code: Option<u16>) -> Option<u16> {
    code.filter(|&c| c != 0 && c != USER_DEFINED)
}

/// Map legacy Web Mercator aliases onto EPSG:3857.
fn normalize_alias(code: u32) -> u32 {
    match code {
        900_913 | 102_100 | 102_113 => 3857,
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geographic(code: u16) -> CrsDefinition {
        CrsDefinition {
            model: CrsModelType::Geographic,
            geographic_code: Some(code),
            ..Default::default()
        }
    }

    #[test]
    fn test_geographic_code_resolves() {
        assert_eq!(resolve_epsg(&geographic(4326)).unwrap(), 4326);
    }

    #[test]
    fn test_projected_code_resolves() {
        let def = CrsDefinition {
            model: CrsModelType::Projected,
            projected_code: Some(32620),
            ..Default::default()
        };
        assert_eq!(resolve_epsg(&def).unwrap(), 32620);
    }

    #[test]
    fn test_fallback_to_other_code_field() {
        // Projected model whose projected code is user-defined but whose
        // datum code is usable.
        let def = CrsDefinition {
            model: CrsModelType::Projected,
            projected_code: Some(USER_DEFINED),
            geographic_code: Some(4267),
            ..Default::default()
        };
        assert_eq!(resolve_epsg(&def).unwrap(), 4267);
    }

    #[test]
    fn test_user_defined_without_fallback_fails_with_name() {
        let def = CrsDefinition {
            model: CrsModelType::Projected,
            projected_code: Some(USER_DEFINED),
            citation: Some("Sphere_ARC_INFO_Lambert_Azimuthal_Equal_Area".to_string()),
            ..Default::default()
        };
        match resolve_epsg(&def) {
            Err(ExtractionError::UnknownCoordinateSystem(name)) => {
                assert_eq!(name, "Sphere_ARC_INFO_Lambert_Azimuthal_Equal_Area");
            }
            other => panic!("expected UnknownCoordinateSystem, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_definition_fails_with_unknown() {
        match resolve_epsg(&CrsDefinition::default()) {
            Err(ExtractionError::UnknownCoordinateSystem(name)) => {
                assert_eq!(name, "Unknown");
            }
            other => panic!("expected UnknownCoordinateSystem, got {other:?}"),
        }
    }

    #[test]
    fn test_web_mercator_aliases() {
        assert_eq!(normalize_alias(900_913), 3857);
        assert_eq!(normalize_alias(102_100), 3857);
        assert_eq!(normalize_alias(102_113), 3857);
        assert_eq!(normalize_alias(4326), 4326);
    }
}
