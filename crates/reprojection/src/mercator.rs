//! Web Mercator (EPSG:3857) inverse projection.
//!
//! Web Mercator uses a spherical model with the WGS84 equatorial radius.

use crate::ellipsoid::Wgs84;

/// Convert Web Mercator coordinates to geographic degrees `(lon, lat)`.
pub fn to_geographic(x: f64, y: f64) -> (f64, f64) {
    let r = Wgs84::A;

    let lon = x / r;
    let lat = 2.0 * (y / r).exp().atan() - std::f64::consts::FRAC_PI_2;

    (lon.to_degrees(), lat.to_degrees())
}
