//! Error taxonomy shared by every geometry operation.
//!
//! Shape constructors report "no well-defined shape" as `Ok(None)`; the
//! variants below are reserved for input that cannot be processed at all.

use thiserror::Error;

/// Failures surfaced by projection and planar geometry.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GeomError {
    /// Longitude maps to a projection zone missing from the zone table.
    #[error("projection zone {zone} is not in the configured zone table")]
    UnsupportedZone { zone: i32 },
    /// An angle or direction was requested for a zero-length vector.
    #[error("zero-length vector has no direction")]
    DegenerateVector,
    /// The two reference points of the right-angle solver coincide.
    #[error("reference points coincide; no line through them")]
    DegenerateReference,
    /// Best-point selection received no candidates.
    #[error("candidate set is empty")]
    EmptyCandidateSet,
    /// An aggregate (e.g. centroid) received no points.
    #[error("point set is empty")]
    EmptyPointSet,
    /// Polygon division count outside `1..=MAX_SHAPE_POINTS`.
    #[error("polygon divisions must be in 1..={} (got {divisions})", crate::cfg::MAX_SHAPE_POINTS)]
    InvalidDivisions { divisions: usize },
    /// Spiral point count overflows or exceeds `MAX_SHAPE_POINTS`.
    #[error("spiral of {circles} circles × {points_per_circle} points is too large")]
    TooManyPoints {
        points_per_circle: usize,
        circles: usize,
    },
    /// NaN or infinite coordinate, distance or projection result.
    #[error("non-finite coordinate or distance")]
    NonFinite,
    /// Vincenty iteration did not settle (nearly antipodal points).
    #[error("geodesic iteration did not converge")]
    GeodesicNoConvergence,
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, GeomError>;
