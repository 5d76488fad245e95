//! Snap a loosely placed point onto a reference line.

use crate::angle::vector_angle;
use crate::error::{GeomError, Result};
use crate::projection::{Projector, Zone};
use crate::types::GeoPoint;

/// Project `target` onto the line through `start` and `end` when it lies
/// within `limit` meters of it; otherwise return `target` unchanged.
///
/// - The offset is `|target - start| · sin(angle)`.
/// - The projection is onto the infinite line; it is not clamped to the segment.
/// - `target == start` returns `target` unchanged; a zero-length reference
///   segment is `DegenerateVector`.
/// - Projection zone is that of `start`.
pub fn nearest_point_on_segment(
    proj: &Projector,
    start: GeoPoint,
    end: GeoPoint,
    target: GeoPoint,
    limit: f64,
) -> Result<GeoPoint> {
    let zone = Zone::of(start);
    let s = proj.planar_in(zone, start)?;
    let seg = proj.planar_in(zone, end)? - s;
    let to_target = proj.planar_in(zone, target)? - s;

    let target_len = to_target.norm();
    if target_len == 0.0 {
        return Ok(target);
    }
    let seg_len = seg.norm();
    if seg_len == 0.0 {
        return Err(GeomError::DegenerateVector);
    }

    let angle = vector_angle(seg, to_target)?;
    let offset = target_len * angle.sin();
    if offset > limit {
        return Ok(target);
    }

    let rate = target_len * angle.cos() / seg_len;
    proj.geographic_in(zone, s + seg * rate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cfg::DEFAULT_SNAP_LIMIT;
    use approx::assert_abs_diff_eq;

    fn proj() -> Projector {
        Projector::default()
    }

    const START: GeoPoint = GeoPoint::new(120.0, 30.0);
    const END: GeoPoint = GeoPoint::new(120.01, 30.0);

    #[test]
    fn far_target_is_returned_unchanged() {
        let target = GeoPoint::new(120.005, 30.001); // ~110 m off the line
        let out = nearest_point_on_segment(&proj(), START, END, target, DEFAULT_SNAP_LIMIT).unwrap();
        assert_eq!(out, target);
    }

    #[test]
    fn near_target_lands_on_the_line() {
        let p = proj();
        let target = GeoPoint::new(120.005, 30.00002); // ~2 m off the line
        let out = nearest_point_on_segment(&p, START, END, target, DEFAULT_SNAP_LIMIT).unwrap();
        assert_ne!(out, target);

        let zone = Zone::of(START);
        let s = p.planar_in(zone, START).unwrap();
        let seg = p.planar_in(zone, END).unwrap() - s;
        let snapped = p.planar_in(zone, out).unwrap() - s;
        // Collinear with the reference segment.
        let cross = seg.x * snapped.y - seg.y * snapped.x;
        assert_abs_diff_eq!(cross / seg.norm(), 0.0, epsilon = 1e-6);
        // Residual is perpendicular to the segment.
        let residual = p.planar_in(zone, target).unwrap() - s - snapped;
        assert_abs_diff_eq!(residual.dot(&seg) / seg.norm(), 0.0, epsilon = 1e-6);
        assert!(residual.norm() > 1.0 && residual.norm() < DEFAULT_SNAP_LIMIT);
    }

    #[test]
    fn projection_is_not_clamped_to_the_segment() {
        let p = proj();
        let target = GeoPoint::new(120.02, 30.00001); // beyond `end`
        let out = nearest_point_on_segment(&p, START, END, target, DEFAULT_SNAP_LIMIT).unwrap();
        assert!(out.longitude > END.longitude);
        assert_abs_diff_eq!(out.longitude, 120.02, epsilon = 1e-6);
    }

    #[test]
    fn target_at_start_is_unchanged() {
        let out = nearest_point_on_segment(&proj(), START, END, START, 5.0).unwrap();
        assert_eq!(out, START);
    }

    #[test]
    fn zero_length_segment_is_degenerate() {
        let target = GeoPoint::new(120.001, 30.0);
        assert_eq!(
            nearest_point_on_segment(&proj(), START, START, target, 5.0),
            Err(GeomError::DegenerateVector)
        );
    }
}
