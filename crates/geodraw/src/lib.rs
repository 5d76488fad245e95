//! Geodetic drawing geometry for map tools.
//!
//! Pure, stateless functions that turn clicked map points into derived
//! shapes: snap to a reference line, pick a point by direction, build a
//! regular polygon or a cross around a point, solve right angles.
//!
//! Layout
//! - `projection`: 3° transverse-Mercator zones; all planar math runs there.
//! - `angle`, `snap`, `shapes`, `solvers`: planar algorithms on geographic input.
//! - `geodesy`: helpers that work on the ellipsoid or sphere directly.
//!
//! Conventions
//! - Inputs and outputs are `GeoPoint`s (degrees); planar coordinates never
//!   leave an operation except through `projection`.
//! - Each operation projects all of its inputs in the zone of one canonical
//!   point (documented per function).
//! - Failures are typed (`GeomError`); "no well-defined shape" is `Ok(None)`.

pub mod angle;
pub mod cfg;
pub mod error;
pub mod geodesy;
pub mod projection;
pub mod shapes;
pub mod snap;
pub mod solvers;
pub mod types;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use angle::{angle_between, best_point_by_angle, vector_angle};
pub use cfg::DrawCfg;
pub use error::{GeomError, Result};
pub use projection::{default_projector, PlanarPoint, Projector, Zone, ZoneParams, ZoneTable};
pub use shapes::{draw_polygon_points, draw_rectangle_points, CrossPoints};
pub use snap::nearest_point_on_segment;
pub use solvers::perpendicular_point;
pub use types::{GeoPoint, GeoPosition};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::angle::{angle_between, best_point_by_angle};
    pub use crate::cfg::DrawCfg;
    pub use crate::error::{GeomError, Result};
    pub use crate::geodesy::{
        centroid, destination, drape, interpolate, rectangle_axis_points, spiral_positions,
        surface_distance, HeightSampler,
    };
    pub use crate::projection::{default_projector, PlanarPoint, Projector, Zone, ZoneTable};
    pub use crate::shapes::{draw_polygon_points, draw_rectangle_points, CrossPoints};
    pub use crate::snap::nearest_point_on_segment;
    pub use crate::solvers::perpendicular_point;
    pub use crate::types::{GeoPoint, GeoPosition};
}
