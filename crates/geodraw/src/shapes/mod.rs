//! Shape constructors anchored on a reference segment.
//!
//! Both constructors take a reference segment `start → end` and a distance,
//! work in the projection zone of `end`, and place points around `end`:
//! - `draw_polygon_points`: `divisions` vertices of a regular polygon with
//!   circumradius `distance`, the first on the extension of the segment.
//! - `draw_rectangle_points`: the four ends of a cross centered at `end`
//!   (along and across the segment). Despite its name the result is a
//!   diamond, not a rectangle.
//!
//! A direction that cannot be normalized yields `Ok(None)` ("no shape"),
//! kept apart from hard errors such as an unsupported zone.


use nalgebra::{Rotation2, Vector2};

use crate::cfg::{DEFAULT_START_OFFSET_DEG, MAX_SHAPE_POINTS};
use crate::error::{GeomError, Result};
use crate::projection::{Projector, Zone};
use crate::types::GeoPoint;

/// Vertices of a regular polygon around `end`.
///
/// - Missing `start` is synthesized 0.001° east of `end` (same latitude).
/// - The first vertex is `end + distance · û`, with `û` the unit direction of
///   `start → end`; the remaining `divisions - 1` vertices rotate that offset
///   counterclockwise around `end` by multiples of `2π / divisions`.
/// - `Ok(None)` when `start == end` in the plane.
/// - `InvalidDivisions` outside `1..=MAX_SHAPE_POINTS`; `NonFinite` for a
///   NaN or infinite `distance`.
pub fn draw_polygon_points(
    proj: &Projector,
    start: Option<GeoPoint>,
    end: GeoPoint,
    distance: f64,
    divisions: usize,
) -> Result<Option<Vec<GeoPoint>>> {
    if divisions == 0 || divisions > MAX_SHAPE_POINTS {
        return Err(GeomError::InvalidDivisions { divisions });
    }
    if !distance.is_finite() {
        return Err(GeomError::NonFinite);
    }
    let start = start
        .unwrap_or_else(|| GeoPoint::new(end.longitude + DEFAULT_START_OFFSET_DEG, end.latitude));
    let zone = Zone::of(end);
    let s = proj.planar_in(zone, start)?;
    let e = proj.planar_in(zone, end)?;
    let v = e - s;
    let len = v.norm();
    if !len.is_finite() || len == 0.0 {
        return Ok(None);
    }

    let right = v * (distance / len);
    let theta = std::f64::consts::TAU / divisions as f64;
    let mut out = Vec::with_capacity(divisions);
    out.push(proj.geographic_in(zone, e + right)?);
    for i in 1..divisions {
        let rot = Rotation2::new(i as f64 * theta);
        out.push(proj.geographic_in(zone, e + rot * right)?);
    }
    Ok(Some(out))
}

/// Points produced by `draw_rectangle_points`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CrossPoints {
    /// `start == end`: representative axis points `distance` west and south of `end`.
    Axes { west: GeoPoint, south: GeoPoint },
    /// Ends of the cross: `left`/`right` along the segment, `up`/`down` across it.
    Cross {
        left: GeoPoint,
        right: GeoPoint,
        up: GeoPoint,
        down: GeoPoint,
    },
}

impl CrossPoints {
    /// Ordered points: `[west, south]` or `[left, right, up, down]`.
    pub fn to_vec(&self) -> Vec<GeoPoint> {
        match *self {
            CrossPoints::Axes { west, south } => vec![west, south],
            CrossPoints::Cross {
                left,
                right,
                up,
                down,
            } => vec![left, right, up, down],
        }
    }
}

/// Cross of four points around `end`, each `distance` meters away.
///
/// - `right = end + d·û`, `left = end − d·û` with `û` the unit direction of
///   `start → end`.
/// - Normal `n = (1, −û.x/û.y)` if `û.y ≠ 0`, else `(0, 1)`, normalized;
///   `up = end + d·n`, `down = end − d·n`. The side `up` lands on follows the
///   sign of `û.y`.
/// - `start == end` in the plane returns `CrossPoints::Axes`.
/// - `Ok(None)` if the direction cannot be normalized; `NonFinite` for a NaN
///   or infinite `distance`.
pub fn draw_rectangle_points(
    proj: &Projector,
    start: GeoPoint,
    end: GeoPoint,
    distance: f64,
) -> Result<Option<CrossPoints>> {
    if !distance.is_finite() {
        return Err(GeomError::NonFinite);
    }
    let zone = Zone::of(end);
    let s = proj.planar_in(zone, start)?;
    let e = proj.planar_in(zone, end)?;
    if s == e {
        return Ok(Some(CrossPoints::Axes {
            west: proj.geographic_in(zone, e - Vector2::new(distance, 0.0))?,
            south: proj.geographic_in(zone, e - Vector2::new(0.0, distance))?,
        }));
    }

    let v = e - s;
    let len = v.norm();
    if !len.is_finite() || len == 0.0 {
        return Ok(None);
    }
    let u = v / len;
    let n = if u.y != 0.0 {
        Vector2::new(1.0, -u.x / u.y)
    } else {
        Vector2::new(0.0, 1.0)
    };
    let n = n.normalize() * distance;
    let along = u * distance;

    Ok(Some(CrossPoints::Cross {
        left: proj.geographic_in(zone, e - along)?,
        right: proj.geographic_in(zone, e + along)?,
        up: proj.geographic_in(zone, e + n)?,
        down: proj.geographic_in(zone, e - n)?,
    }))
}
