//! WGS84 geodetic to ECEF helper, used to build Earth-fixed inputs

use glam::DVec3;

pub const WGS84_A: f64 = 6378137.0;
pub const WGS84_F: f64 = 1.0 / 298.257223563;

/// Geodetic latitude/longitude (degrees) and ellipsoidal height (meters) to ECEF meters.
pub fn geodetic_to_ecef(lat_deg: f64, lon_deg: f64, alt_m: f64) -> DVec3 {
    let e2 = WGS84_F * (2.0 - WGS84_F);
    let (sin_lat, cos_lat) = lat_deg.to_radians().sin_cos();
    let (sin_lon, cos_lon) = lon_deg.to_radians().sin_cos();

    // prime vertical radius of curvature
    let n = WGS84_A / (1.0 - e2 * sin_lat * sin_lat).sqrt();

    DVec3::new(
        (n + alt_m) * cos_lat * cos_lon,
        (n + alt_m) * cos_lat * sin_lon,
        (n * (1.0 - e2) + alt_m) * sin_lat,
    )
}
