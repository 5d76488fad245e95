//! Ellipsoidal and spherical helpers that work directly on geographic input.
//!
//! - `surface_distance`: geodesic length on WGS84 (Vincenty inverse).
//! - `interpolate`: point at a given distance along the chord `start → end`.
//! - `destination`, `rectangle_axis_points`: great-circle offsets on a sphere.
//! - `spiral_positions`: climbing spiral around a center (degree approximation).
//! - `centroid`: arithmetic mean of points.
//! - `terrain`: heights from an injected `HeightSampler`.
//!
//! None of these go through the zone projection, so they also work outside
//! the configured zone table.

mod ecef;
mod terrain;

pub use ecef::{ecef_to_geodetic, geodetic_to_ecef};
pub use terrain::{drape, FlatTerrain, HeightSampler};

use crate::cfg::MAX_SHAPE_POINTS;
use crate::error::{GeomError, Result};
use crate::projection::WGS84;
use crate::types::{GeoPoint, GeoPosition};

/// Mean Earth radius (m) used by the spherical helpers.
pub const EARTH_RADIUS_M: f64 = 6_371_008.8;
/// Meters per degree used by `spiral_positions`.
pub const METERS_PER_DEGREE: f64 = 111_320.0;

const VINCENTY_MAX_ITER: usize = 200;
const VINCENTY_TOL: f64 = 1e-12;

/// Geodesic distance (m) between `a` and `b` on WGS84.
///
/// Full precision; callers reporting centimetres truncate themselves.
/// Fails with `GeodesicNoConvergence` for nearly antipodal points.
pub fn surface_distance(a: GeoPoint, b: GeoPoint) -> Result<f64> {
    let f = WGS84.f;
    let semi_major = WGS84.a;
    let semi_minor = WGS84.b();

    let l = (b.longitude - a.longitude).to_radians();
    let u1 = ((1.0 - f) * a.latitude.to_radians().tan()).atan();
    let u2 = ((1.0 - f) * b.latitude.to_radians().tan()).atan();
    let (sin_u1, cos_u1) = u1.sin_cos();
    let (sin_u2, cos_u2) = u2.sin_cos();

    let mut lambda = l;
    let mut converged = false;
    let (mut sin_sigma, mut cos_sigma, mut sigma, mut cos2_alpha, mut cos_2sm) =
        (0.0, 0.0, 0.0, 0.0, 0.0);
    for _ in 0..VINCENTY_MAX_ITER {
        let (sin_l, cos_l) = lambda.sin_cos();
        sin_sigma = (cos_u2 * sin_l).hypot(cos_u1 * sin_u2 - sin_u1 * cos_u2 * cos_l);
        if sin_sigma == 0.0 {
            return Ok(0.0);
        }
        cos_sigma = sin_u1 * sin_u2 + cos_u1 * cos_u2 * cos_l;
        sigma = sin_sigma.atan2(cos_sigma);
        let sin_alpha = cos_u1 * cos_u2 * sin_l / sin_sigma;
        cos2_alpha = 1.0 - sin_alpha * sin_alpha;
        // Equatorial lines have cos²α = 0.
        cos_2sm = if cos2_alpha != 0.0 {
            cos_sigma - 2.0 * sin_u1 * sin_u2 / cos2_alpha
        } else {
            0.0
        };
        let c = f / 16.0 * cos2_alpha * (4.0 + f * (4.0 - 3.0 * cos2_alpha));
        let prev = lambda;
        lambda = l
            + (1.0 - c)
                * f
                * sin_alpha
                * (sigma
                    + c * sin_sigma * (cos_2sm + c * cos_sigma * (-1.0 + 2.0 * cos_2sm * cos_2sm)));
        if (lambda - prev).abs() < VINCENTY_TOL {
            converged = true;
            break;
        }
    }
    if !converged {
        return Err(GeomError::GeodesicNoConvergence);
    }

    let u_sq = cos2_alpha * (semi_major * semi_major - semi_minor * semi_minor)
        / (semi_minor * semi_minor);
    let big_a = 1.0 + u_sq / 16384.0 * (4096.0 + u_sq * (-768.0 + u_sq * (320.0 - 175.0 * u_sq)));
    let big_b = u_sq / 1024.0 * (256.0 + u_sq * (-128.0 + u_sq * (74.0 - 47.0 * u_sq)));
    let delta_sigma = big_b
        * sin_sigma
        * (cos_2sm
            + big_b / 4.0
                * (cos_sigma * (-1.0 + 2.0 * cos_2sm * cos_2sm)
                    - big_b / 6.0
                        * cos_2sm
                        * (-3.0 + 4.0 * sin_sigma * sin_sigma)
                        * (-3.0 + 4.0 * cos_2sm * cos_2sm)));
    Ok(semi_minor * big_a * (sigma - delta_sigma))
}

/// Point `target_distance` meters from `start` along the straight ECEF chord
/// towards `end` (both at height 0), returned on the surface.
///
/// Distances beyond the chord extrapolate. Fails with `DegenerateVector` when
/// `start == end` and `NonFinite` for a NaN or infinite distance.
pub fn interpolate(start: GeoPoint, end: GeoPoint, target_distance: f64) -> Result<GeoPoint> {
    if !target_distance.is_finite() {
        return Err(GeomError::NonFinite);
    }
    let s = geodetic_to_ecef(start.with_height(0.0));
    let e = geodetic_to_ecef(end.with_height(0.0));
    let total = (e - s).norm();
    if total == 0.0 {
        return Err(GeomError::DegenerateVector);
    }
    let p = s.lerp(&e, target_distance / total);
    Ok(ecef_to_geodetic(p).point())
}

/// Great-circle destination from `origin` after `distance_m` meters on the
/// initial bearing `bearing_deg` (clockwise from north), spherical Earth.
pub fn destination(origin: GeoPoint, distance_m: f64, bearing_deg: f64) -> GeoPoint {
    let lat1 = origin.latitude.to_radians();
    let lon1 = origin.longitude.to_radians();
    let delta = distance_m / EARTH_RADIUS_M;
    let theta = bearing_deg.to_radians();
    let (sin_lat1, cos_lat1) = lat1.sin_cos();
    let (sin_d, cos_d) = delta.sin_cos();

    let lat2 = (sin_lat1 * cos_d + cos_lat1 * sin_d * theta.cos()).asin();
    let lon2 = lon1 + (theta.sin() * sin_d * cos_lat1).atan2(cos_d - sin_lat1 * lat2.sin());
    GeoPoint::new(lon2.to_degrees(), lat2.to_degrees())
}

/// Edge midpoints of a `length × width` box (m) centered at `center`:
/// north and south at `length / 2`, east and west at `width / 2`.
///
/// Order: north, east, south, west.
pub fn rectangle_axis_points(center: GeoPoint, length: f64, width: f64) -> [GeoPoint; 4] {
    let half_l = length / 2.0;
    let half_w = width / 2.0;
    [
        destination(center, half_l, 0.0),
        destination(center, half_w, 90.0),
        destination(center, half_l, 180.0),
        destination(center, half_w, 270.0),
    ]
}

/// Default points per turn for `spiral_positions`.
pub const SPIRAL_POINTS_PER_CIRCLE: usize = 50;
/// Default number of turns for `spiral_positions`.
pub const SPIRAL_CIRCLES: usize = 5;

/// Positions climbing around `center` on a circle of `radius` meters.
///
/// Angle `2π·i / points_per_circle`, height rising linearly by
/// `total_height · i / total`. Offsets use `METERS_PER_DEGREE`; the latitude
/// offset is divided by `cos(center latitude)`. Zero counts fall back to the
/// defaults (50 points, 5 turns). More than `MAX_SHAPE_POINTS` points in
/// total is `TooManyPoints`.
pub fn spiral_positions(
    center: GeoPosition,
    radius: f64,
    total_height: f64,
    points_per_circle: usize,
    circles: usize,
) -> Result<Vec<GeoPosition>> {
    let per_circle = if points_per_circle == 0 {
        SPIRAL_POINTS_PER_CIRCLE
    } else {
        points_per_circle
    };
    let circles = if circles == 0 { SPIRAL_CIRCLES } else { circles };
    let total = per_circle
        .checked_mul(circles)
        .filter(|&n| n <= MAX_SHAPE_POINTS)
        .ok_or(GeomError::TooManyPoints {
            points_per_circle: per_circle,
            circles,
        })?;
    let r_deg = radius / METERS_PER_DEGREE;
    let lat_scale = center.latitude.to_radians().cos();

    Ok((0..total)
        .map(|i| {
            let angle = i as f64 / per_circle as f64 * std::f64::consts::TAU;
            GeoPosition::new(
                center.longitude + r_deg * angle.cos(),
                center.latitude + r_deg * angle.sin() / lat_scale,
                center.height + i as f64 / total as f64 * total_height,
            )
        })
        .collect())
}

/// Arithmetic mean of longitudes and latitudes.
pub fn centroid(points: &[GeoPoint]) -> Result<GeoPoint> {
    if points.is_empty() {
        return Err(GeomError::EmptyPointSet);
    }
    let n = points.len() as f64;
    let (lon, lat) = points.iter().fold((0.0, 0.0), |(lon, lat), p| {
        (lon + p.longitude, lat + p.latitude)
    });
    Ok(GeoPoint::new(lon / n, lat / n))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn one_degree_on_the_equator() {
        let d = surface_distance(GeoPoint::new(0.0, 0.0), GeoPoint::new(1.0, 0.0)).unwrap();
        assert_abs_diff_eq!(d, 111_319.490_793, epsilon = 1e-3);
    }

    #[test]
    fn one_degree_of_meridian() {
        let d = surface_distance(GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 1.0)).unwrap();
        assert_abs_diff_eq!(d, 110_574.388_558, epsilon = 1e-3);
    }

    #[test]
    fn short_segment_and_symmetry() {
        let a = GeoPoint::new(120.0, 30.0);
        let b = GeoPoint::new(120.01, 30.0);
        let d = surface_distance(a, b).unwrap();
        assert_abs_diff_eq!(d, 964.862_802, epsilon = 1e-3);
        assert_abs_diff_eq!(surface_distance(b, a).unwrap(), d, epsilon = 1e-9);
        assert_eq!(surface_distance(a, a), Ok(0.0));
    }

    #[test]
    fn antipodal_points_do_not_converge() {
        let r = surface_distance(GeoPoint::new(0.0, 0.0), GeoPoint::new(179.7, 0.0));
        assert_eq!(r, Err(GeomError::GeodesicNoConvergence));
    }

    #[test]
    fn interpolate_halfway() {
        let s = GeoPoint::new(120.0, 30.0);
        let e = GeoPoint::new(120.01, 30.01);
        let chord = (geodetic_to_ecef(e.with_height(0.0)) - geodetic_to_ecef(s.with_height(0.0))).norm();
        let mid = interpolate(s, e, chord / 2.0).unwrap();
        assert_abs_diff_eq!(mid.longitude, 120.005, epsilon = 1e-6);
        assert_abs_diff_eq!(mid.latitude, 30.005, epsilon = 1e-6);
        assert_eq!(interpolate(s, s, 100.0), Err(GeomError::DegenerateVector));
        assert_eq!(interpolate(s, e, f64::NAN), Err(GeomError::NonFinite));
    }

    #[test]
    fn destination_cardinal_bearings() {
        let o = GeoPoint::new(120.0, 30.0);
        let north = destination(o, 1000.0, 0.0);
        assert_abs_diff_eq!(north.longitude, 120.0, epsilon = 1e-12);
        assert_abs_diff_eq!(
            north.latitude - 30.0,
            (1000.0 / EARTH_RADIUS_M).to_degrees(),
            epsilon = 1e-12
        );
        let east = destination(o, 1000.0, 90.0);
        assert!(east.longitude > 120.0);
        assert_abs_diff_eq!(east.latitude, 30.0, epsilon = 1e-5);
    }

    #[test]
    fn rectangle_axis_points_use_half_extents() {
        let c = GeoPoint::new(120.0, 30.0);
        let [n, e, s, w] = rectangle_axis_points(c, 2000.0, 500.0);
        let deg_l = (1000.0 / EARTH_RADIUS_M).to_degrees();
        assert_abs_diff_eq!(n.latitude - c.latitude, deg_l, epsilon = 1e-12);
        assert_abs_diff_eq!(c.latitude - s.latitude, deg_l, epsilon = 1e-12);
        assert_abs_diff_eq!(e.longitude - c.longitude, c.longitude - w.longitude, epsilon = 1e-12);
        let half_w = surface_distance(c, e).unwrap();
        assert_abs_diff_eq!(half_w, 250.0, epsilon = 1.0);
    }

    #[test]
    fn spiral_climbs_and_turns() {
        let c = GeoPosition::new(120.0, 0.0, 100.0);
        let pts = spiral_positions(c, 111_320.0, 50.0, 4, 2).unwrap();
        assert_eq!(pts.len(), 8);
        assert_abs_diff_eq!(pts[0].longitude, 121.0, epsilon = 1e-12);
        assert_abs_diff_eq!(pts[1].latitude, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(pts[4].longitude, 121.0, epsilon = 1e-12);
        assert_eq!(pts[0].height, 100.0);
        assert_abs_diff_eq!(pts[7].height, 100.0 + 50.0 * 7.0 / 8.0, epsilon = 1e-12);
        assert!(pts.windows(2).all(|w| w[1].height > w[0].height));
    }

    #[test]
    fn spiral_zero_counts_use_defaults() {
        let c = GeoPosition::new(120.0, 30.0, 0.0);
        let pts = spiral_positions(c, 100.0, 10.0, 0, 0).unwrap();
        assert_eq!(pts.len(), SPIRAL_POINTS_PER_CIRCLE * SPIRAL_CIRCLES);
    }

    #[test]
    fn spiral_rejects_oversized_counts() {
        let c = GeoPosition::new(120.0, 30.0, 0.0);
        assert_eq!(
            spiral_positions(c, 100.0, 10.0, usize::MAX, 2),
            Err(GeomError::TooManyPoints {
                points_per_circle: usize::MAX,
                circles: 2
            })
        );
        assert_eq!(
            spiral_positions(c, 100.0, 10.0, MAX_SHAPE_POINTS, 2),
            Err(GeomError::TooManyPoints {
                points_per_circle: MAX_SHAPE_POINTS,
                circles: 2
            })
        );
        let pts = spiral_positions(c, 100.0, 10.0, MAX_SHAPE_POINTS, 1).unwrap();
        assert_eq!(pts.len(), MAX_SHAPE_POINTS);
    }

    #[test]
    fn centroid_of_square() {
        let pts = [
            GeoPoint::new(120.0, 30.0),
            GeoPoint::new(121.0, 30.0),
            GeoPoint::new(121.0, 31.0),
            GeoPoint::new(120.0, 31.0),
        ];
        assert_eq!(centroid(&pts), Ok(GeoPoint::new(120.5, 30.5)));
        assert_eq!(centroid(&[]), Err(GeomError::EmptyPointSet));
    }
}
