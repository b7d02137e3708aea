//! Ellipsoid definitions.

/// WGS84 ellipsoid.
pub struct Wgs84;

impl Wgs84 {
    /// Semi-major axis (equatorial radius) in meters
    pub const A: f64 = 6_378_137.0;

    /// Flattening
    pub const F: f64 = 1.0 / 298.257_223_563;

    /// First eccentricity squared
    pub const E2: f64 = 2.0 * Self::F - Self::F * Self::F;

    /// First eccentricity, sqrt(E2)
    pub const E: f64 = 0.081_819_190_842_621_5;

    /// Second eccentricity squared
    pub const EP2: f64 = Self::E2 / (1.0 - Self::E2);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eccentricity_consistent_with_flattening() {
        assert!((Wgs84::E * Wgs84::E - Wgs84::E2).abs() < 1e-12);
    }
}
