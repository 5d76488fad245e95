//! Default scalar parameters for the drawing tools.
//!
//! Policy
//! - Operations take their parameters explicitly; `DrawCfg` only bundles the
//!   defaults callers (and the CLI) start from.

/// Offset distance (m) for shape constructors.
pub const DEFAULT_DISTANCE: f64 = 1000.0;
/// Vertex count of the regular polygon.
pub const DEFAULT_DIVISIONS: usize = 8;
/// Snap tolerance (m) for `nearest_point_on_segment`.
pub const DEFAULT_SNAP_LIMIT: f64 = 5.0;
/// Eastward offset (deg) of the synthesized start when none is given.
pub const DEFAULT_START_OFFSET_DEG: f64 = 0.001;
/// Upper bound on generated vertices (polygon divisions, spiral points).
pub const MAX_SHAPE_POINTS: usize = 1 << 16;
/// Distance (m) along the chord for `interpolate`.
pub const DEFAULT_INTERPOLATE_DISTANCE: f64 = 100.0;

/// Drawing defaults.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawCfg {
    pub distance: f64,
    pub divisions: usize,
    pub snap_limit: f64,
    pub interpolate_distance: f64,
}

impl Default for DrawCfg {
    fn default() -> Self {
        Self {
            distance: DEFAULT_DISTANCE,
            divisions: DEFAULT_DIVISIONS,
            snap_limit: DEFAULT_SNAP_LIMIT,
            interpolate_distance: DEFAULT_INTERPOLATE_DISTANCE,
        }
    }
}
