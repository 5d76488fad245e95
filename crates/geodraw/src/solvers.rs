//! Right-angle point solver.

use nalgebra::Vector2;

use crate::error::{GeomError, Result};
use crate::projection::{Projector, Zone};
use crate::types::GeoPoint;

/// Planar core of `perpendicular_point`.
///
/// Returns the foot of `p3` on the line through `p2` perpendicular to `p1p2`,
/// i.e. the point `p` with `(p - p2) ⟂ (p2 - p1)` closest to `p3`.
pub fn perpendicular_foot(
    p1: Vector2<f64>,
    p2: Vector2<f64>,
    p3: Vector2<f64>,
) -> Result<Vector2<f64>> {
    let (x1, y1) = (p1.x, p1.y);
    let (x2, y2) = (p2.x, p2.y);
    let (x3, y3) = (p3.x, p3.y);
    let a = (x1 - x2) * (y2 - y1);
    let b = (x1 - x2) * (x1 - x2);
    let c = (y2 - y1) * (y2 - y1);
    if b + c == 0.0 {
        return Err(GeomError::DegenerateReference);
    }
    let y = (b * y3 + c * y2 + a * (x3 - x2)) / (b + c);
    let x = if y1 == y2 {
        x2
    } else {
        x3 + (y - y3) * (x2 - x1) / (y2 - y1)
    };
    Ok(Vector2::new(x, y))
}

/// Point `p` such that `p2→p` is perpendicular to `p1→p2`, placed at the foot
/// of `p3` on that perpendicular. Projection zone is that of `p2`.
///
/// Fails with `DegenerateReference` when `p1` and `p2` coincide in the plane.
pub fn perpendicular_point(
    proj: &Projector,
    p1: GeoPoint,
    p2: GeoPoint,
    p3: GeoPoint,
) -> Result<GeoPoint> {
    let zone = Zone::of(p2);
    let foot = perpendicular_foot(
        proj.planar_in(zone, p1)?,
        proj.planar_in(zone, p2)?,
        proj.planar_in(zone, p3)?,
    )?;
    proj.geographic_in(zone, foot)
}
