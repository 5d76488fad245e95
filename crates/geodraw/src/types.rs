//! Geographic coordinate types exchanged with callers.
//!
//! - `GeoPoint`: longitude/latitude in degrees (WGS84).
//! - `GeoPosition`: a `GeoPoint` plus height in meters.

use std::fmt;

/// Default number of decimals when printing coordinates (≈ 0.1 m).
pub const COORD_PRECISION: usize = 6;

/// Longitude/latitude pair in degrees.
///
/// Invariants (not enforced): longitude ∈ [-180, 180], latitude ∈ [-90, 90].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    pub longitude: f64,
    pub latitude: f64,
}

impl GeoPoint {
    #[inline]
    pub const fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }

    /// Attach a height (meters).
    #[inline]
    pub fn with_height(self, height: f64) -> GeoPosition {
        GeoPosition::new(self.longitude, self.latitude, height)
    }
}

impl From<(f64, f64)> for GeoPoint {
    #[inline]
    fn from((longitude, latitude): (f64, f64)) -> Self {
        Self::new(longitude, latitude)
    }
}

/// Prints `lon,lat`; `{:.N}` selects the number of decimals (default 6).
impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prec = f.precision().unwrap_or(COORD_PRECISION);
        write!(f, "{:.prec$},{:.prec$}", self.longitude, self.latitude)
    }
}

/// Geographic position with height above the ellipsoid (meters).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPosition {
    pub longitude: f64,
    pub latitude: f64,
    pub height: f64,
}

impl GeoPosition {
    #[inline]
    pub const fn new(longitude: f64, latitude: f64, height: f64) -> Self {
        Self {
            longitude,
            latitude,
            height,
        }
    }

    #[inline]
    pub fn point(&self) -> GeoPoint {
        GeoPoint::new(self.longitude, self.latitude)
    }
}
