//! Terrain heights through an injected sampler.
//!
//! The renderer owns the terrain; callers hand a `HeightSampler` in instead
//! of the geometry reaching for a global viewer.

use crate::types::{GeoPoint, GeoPosition};

/// Source of terrain heights (meters above the ellipsoid).
pub trait HeightSampler {
    /// Height at `p`, or `None` when the terrain has no sample there.
    fn height_at(&self, p: GeoPoint) -> Option<f64>;
}

impl<F> HeightSampler for F
where
    F: Fn(GeoPoint) -> Option<f64>,
{
    #[inline]
    fn height_at(&self, p: GeoPoint) -> Option<f64> {
        self(p)
    }
}

/// Same height everywhere.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FlatTerrain(pub f64);

impl HeightSampler for FlatTerrain {
    #[inline]
    fn height_at(&self, _p: GeoPoint) -> Option<f64> {
        Some(self.0)
    }
}

/// Attach sampled heights to `points`; missing samples become height 0.
pub fn drape<S: HeightSampler + ?Sized>(sampler: &S, points: &[GeoPoint]) -> Vec<GeoPosition> {
    points
        .iter()
        .map(|&p| p.with_height(sampler.height_at(p).unwrap_or(0.0)))
        .collect()
}
