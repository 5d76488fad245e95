//! Vector/angle primitives in the projected plane.
//!
//! - `vector_angle`: unsigned angle between two planar vectors, in [0, π].
//! - `angle_between`: same for two geographic segments.
//! - `best_point_by_angle`: candidate whose direction best matches a target.

use nalgebra::Vector2;

use crate::error::{GeomError, Result};
use crate::projection::{Projector, Zone};
use crate::types::GeoPoint;

/// Unsigned angle between `a` and `c` (radians, [0, π]).
///
/// The cosine is clamped to [-1, 1] against rounding drift.
/// Fails with `DegenerateVector` if either vector has zero or non-finite length.
pub fn vector_angle(a: Vector2<f64>, c: Vector2<f64>) -> Result<f64> {
    let la = a.norm();
    let lc = c.norm();
    if !(la.is_finite() && lc.is_finite()) || la == 0.0 || lc == 0.0 {
        return Err(GeomError::DegenerateVector);
    }
    let cos = (a.dot(&c) / (la * lc)).clamp(-1.0, 1.0);
    Ok(cos.acos())
}

/// Angle between segments `start_a→end_a` and `start_c→end_c`.
///
/// All four points are projected in the zone of `start_a`.
pub fn angle_between(
    proj: &Projector,
    start_a: GeoPoint,
    end_a: GeoPoint,
    start_c: GeoPoint,
    end_c: GeoPoint,
) -> Result<f64> {
    let zone = Zone::of(start_a);
    let a = proj.planar_in(zone, end_a)? - proj.planar_in(zone, start_a)?;
    let c = proj.planar_in(zone, end_c)? - proj.planar_in(zone, start_c)?;
    vector_angle(a, c)
}

/// Candidate `q` minimizing the angle between `reference→target` and `reference→q`.
///
/// Linear scan; ties keep the earliest candidate. Projection zone is that of
/// `reference`. A candidate (or target) coinciding with `reference` has no
/// direction and fails the whole selection with `DegenerateVector`.
pub fn best_point_by_angle(
    proj: &Projector,
    reference: GeoPoint,
    candidates: &[GeoPoint],
    target: GeoPoint,
) -> Result<GeoPoint> {
    let (first, rest) = candidates
        .split_first()
        .ok_or(GeomError::EmptyCandidateSet)?;
    let zone = Zone::of(reference);
    let origin = proj.planar_in(zone, reference)?;
    let toward = proj.planar_in(zone, target)? - origin;
    let angle_to = |q: GeoPoint| -> Result<f64> {
        vector_angle(toward, proj.planar_in(zone, q)? - origin)
    };

    let mut best = *first;
    let mut best_angle = angle_to(best)?;
    for &q in rest {
        let angle = angle_to(q)?;
        if angle < best_angle {
            best = q;
            best_angle = angle;
        }
    }
    Ok(best)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use nalgebra::vector;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn proj() -> Projector {
        Projector::default()
    }

    #[test]
    fn vector_angle_axis_cases() {
        let x = vector![1.0, 0.0];
        assert_abs_diff_eq!(vector_angle(x, vector![0.0, 3.0]).unwrap(), FRAC_PI_2);
        assert_abs_diff_eq!(vector_angle(x, vector![-2.0, 0.0]).unwrap(), PI);
        assert_abs_diff_eq!(vector_angle(x, vector![5.0, 0.0]).unwrap(), 0.0);
    }

    #[test]
    fn vector_angle_rejects_zero_length() {
        let z = Vector2::zeros();
        assert_eq!(
            vector_angle(z, vector![1.0, 0.0]),
            Err(GeomError::DegenerateVector)
        );
        assert_eq!(
            vector_angle(vector![1.0, 0.0], z),
            Err(GeomError::DegenerateVector)
        );
    }

    #[test]
    fn clamping_keeps_parallel_vectors_at_zero() {
        // Nearly parallel large vectors can push the cosine past 1 without clamping.
        let a = vector![40_512_345.678, 3_321_987.654];
        let angle = vector_angle(a, a * 3.0).unwrap();
        assert!(angle.is_finite());
        assert_abs_diff_eq!(angle, 0.0, epsilon = 1e-7);
    }

    #[test]
    fn segment_with_itself_is_zero() {
        let s = GeoPoint::new(120.0, 30.0);
        let e = GeoPoint::new(120.01, 30.005);
        assert_abs_diff_eq!(angle_between(&proj(), s, e, s, e).unwrap(), 0.0, epsilon = 1e-7);
    }

    #[test]
    fn east_and_north_segments_are_perpendicular() {
        let o = GeoPoint::new(120.0, 30.0);
        let east = GeoPoint::new(120.01, 30.0);
        let north = GeoPoint::new(120.0, 30.01);
        // Grid convergence on the central meridian is zero.
        let a = angle_between(&proj(), o, east, o, north).unwrap();
        assert_abs_diff_eq!(a, FRAC_PI_2, epsilon = 1e-3);
    }

    #[test]
    fn angle_between_identical_points_is_degenerate() {
        let o = GeoPoint::new(120.0, 30.0);
        let e = GeoPoint::new(120.01, 30.0);
        assert_eq!(
            angle_between(&proj(), o, o, o, e),
            Err(GeomError::DegenerateVector)
        );
    }

    #[test]
    fn best_point_picks_smallest_angle() {
        let r = GeoPoint::new(120.0, 30.0);
        let candidates = [
            GeoPoint::new(120.0, 30.01),  // north
            GeoPoint::new(120.01, 30.0),  // east
            GeoPoint::new(120.0, 29.99),  // south
            GeoPoint::new(119.99, 30.0),  // west
        ];
        let target = GeoPoint::new(120.02, 29.999); // east, slightly south
        let best = best_point_by_angle(&proj(), r, &candidates, target).unwrap();
        assert_eq!(best, candidates[1]);
    }

    #[test]
    fn best_point_ties_keep_first() {
        // Mirror images about the central meridian make exactly equal angles.
        let r = GeoPoint::new(120.0, 30.0);
        let north_east = GeoPoint::new(120.01, 30.01);
        let north_west = GeoPoint::new(119.99, 30.01);
        let target = GeoPoint::new(120.0, 30.02);
        let best = best_point_by_angle(&proj(), r, &[north_west, north_east], target).unwrap();
        assert_eq!(best, north_west);
        let best = best_point_by_angle(&proj(), r, &[north_east, north_west], target).unwrap();
        assert_eq!(best, north_east);
    }

    #[test]
    fn best_point_empty_candidates() {
        let r = GeoPoint::new(120.0, 30.0);
        assert_eq!(
            best_point_by_angle(&proj(), r, &[], r),
            Err(GeomError::EmptyCandidateSet)
        );
    }
}
