//! Geodetic ↔ Earth-centered Earth-fixed (ECEF) conversion on WGS84.

use nalgebra::Vector3;

use crate::projection::{Ellipsoid, WGS84};
use crate::types::GeoPosition;

/// Geodetic position (degrees, meters) → ECEF (meters).
pub fn geodetic_to_ecef(pos: GeoPosition) -> Vector3<f64> {
    geodetic_to_ecef_on(&WGS84, pos)
}

/// ECEF (meters) → geodetic position (degrees, meters), Bowring's method.
pub fn ecef_to_geodetic(p: Vector3<f64>) -> GeoPosition {
    ecef_to_geodetic_on(&WGS84, p)
}

pub(crate) fn geodetic_to_ecef_on(ell: &Ellipsoid, pos: GeoPosition) -> Vector3<f64> {
    let (sin_lat, cos_lat) = pos.latitude.to_radians().sin_cos();
    let (sin_lon, cos_lon) = pos.longitude.to_radians().sin_cos();
    let e2 = ell.e2();
    let n = ell.a / (1.0 - e2 * sin_lat * sin_lat).sqrt();
    Vector3::new(
        (n + pos.height) * cos_lat * cos_lon,
        (n + pos.height) * cos_lat * sin_lon,
        (n * (1.0 - e2) + pos.height) * sin_lat,
    )
}

pub(crate) fn ecef_to_geodetic_on(ell: &Ellipsoid, p: Vector3<f64>) -> GeoPosition {
    let a = ell.a;
    let b = ell.b();
    let e2 = ell.e2();
    let ep2 = ell.ep2();
    let r = p.x.hypot(p.y);
    let lon = p.y.atan2(p.x);

    let theta = (p.z * a).atan2(r * b);
    let (sin_t, cos_t) = theta.sin_cos();
    let lat = (p.z + ep2 * b * sin_t.powi(3)).atan2(r - e2 * a * cos_t.powi(3));

    let (sin_lat, cos_lat) = lat.sin_cos();
    let n = a / (1.0 - e2 * sin_lat * sin_lat).sqrt();
    let height = if cos_lat.abs() > 1e-10 {
        r / cos_lat - n
    } else {
        p.z.abs() - b
    };
    GeoPosition::new(lon.to_degrees(), lat.to_degrees(), height)
}
