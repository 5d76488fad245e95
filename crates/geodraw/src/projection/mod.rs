//! Projection adapter: geographic ↔ zoned transverse-Mercator plane.
//!
//! Purpose
//! - Give the planar algorithms a local, conformal, metric plane in which
//!   ordinary 2D vector algebra is valid over tens to thousands of meters.
//!
//! Conventions
//! - Zones are 3° longitudinal bands, index `round(lon / 3)`; the central
//!   meridian is `zone × 3`, false easting `zone × 1_000_000 + 500_000`.
//! - The zone table is static configuration; lookups outside it fail with
//!   `GeomError::UnsupportedZone`.
//! - NaN or infinite coordinates, in either direction, fail with
//!   `GeomError::NonFinite`.
//! - Every `PlanarPoint` carries its zone. Arithmetic between planar points
//!   is only meaningful within one zone; operations pick one canonical input
//!   and project all other inputs into its zone (`to_planar_in`).

mod ellipsoid;
mod tmerc;

#[cfg(test)]
mod tests;

use std::fmt;
use std::ops::RangeInclusive;
use std::sync::OnceLock;

use nalgebra::Vector2;

pub use ellipsoid::{Ellipsoid, GRS80, WGS84};
use tmerc::TransverseMercator;

use crate::error::{GeomError, Result};
use crate::types::GeoPoint;

/// Width of a projection band (degrees).
pub const ZONE_WIDTH_DEG: f64 = 3.0;
/// Zones covered by the default CGCS2000 table.
pub const CGCS2000_ZONES: RangeInclusive<i32> = 25..=45;

/// Projection band index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Zone(pub i32);

impl Zone {
    /// Band containing `longitude` (degrees).
    #[inline]
    pub fn of_longitude(longitude: f64) -> Self {
        Zone((longitude / ZONE_WIDTH_DEG).round() as i32)
    }

    #[inline]
    pub fn of(p: GeoPoint) -> Self {
        Self::of_longitude(p.longitude)
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Transverse-Mercator parameters of one zone.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoneParams {
    pub zone: Zone,
    /// Longitude of origin (degrees).
    pub central_meridian: f64,
    pub false_easting: f64,
    pub false_northing: f64,
    pub scale_factor: f64,
    pub ellipsoid: Ellipsoid,
    pub units: &'static str,
}

impl ZoneParams {
    /// Standard 3° band parameters for `zone`.
    pub fn three_degree(zone: Zone, ellipsoid: Ellipsoid) -> Self {
        Self {
            zone,
            central_meridian: f64::from(zone.0) * ZONE_WIDTH_DEG,
            false_easting: f64::from(zone.0) * 1_000_000.0 + 500_000.0,
            false_northing: 0.0,
            scale_factor: 1.0,
            ellipsoid,
            units: "m",
        }
    }

    /// PROJ-style definition string, e.g. for logging or interop.
    pub fn proj_string(&self) -> String {
        format!(
            "+proj=tmerc +lat_0=0 +lon_0={} +k={} +x_0={} +y_0={} +ellps={} +units={} +no_defs",
            self.central_meridian,
            self.scale_factor,
            self.false_easting,
            self.false_northing,
            self.ellipsoid.name,
            self.units
        )
    }
}

#[derive(Clone, Debug)]
struct ZoneEntry {
    params: ZoneParams,
    tm: TransverseMercator,
}

impl ZoneEntry {
    fn new(params: ZoneParams) -> Self {
        let tm = TransverseMercator::new(
            &params.ellipsoid,
            params.central_meridian,
            params.scale_factor,
            params.false_easting,
            params.false_northing,
        );
        Self { params, tm }
    }
}

/// Lookup table from zone index to projection parameters.
///
/// Invariants:
/// - Entries sorted by zone, one entry per zone.
#[derive(Clone, Debug)]
pub struct ZoneTable {
    entries: Vec<ZoneEntry>,
}

impl ZoneTable {
    /// Arbitrary parameter sets; later duplicates of a zone win.
    pub fn from_params<I: IntoIterator<Item = ZoneParams>>(params: I) -> Self {
        let mut entries: Vec<ZoneEntry> = Vec::new();
        for p in params {
            match entries.binary_search_by_key(&p.zone, |e| e.params.zone) {
                Ok(i) => entries[i] = ZoneEntry::new(p),
                Err(i) => entries.insert(i, ZoneEntry::new(p)),
            }
        }
        Self { entries }
    }

    /// Standard 3° bands for every zone in `zones`.
    pub fn three_degree(zones: RangeInclusive<i32>, ellipsoid: Ellipsoid) -> Self {
        Self::from_params(zones.map(|z| ZoneParams::three_degree(Zone(z), ellipsoid)))
    }

    /// CGCS2000 3° Gauss–Krüger bands 25..=45 on GRS80.
    pub fn cgcs2000() -> Self {
        Self::three_degree(CGCS2000_ZONES, GRS80)
    }

    pub fn get(&self, zone: Zone) -> Option<&ZoneParams> {
        self.entry(zone).map(|e| &e.params)
    }

    pub fn zones(&self) -> impl Iterator<Item = Zone> + '_ {
        self.entries.iter().map(|e| e.params.zone)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn entry(&self, zone: Zone) -> Option<&ZoneEntry> {
        self.entries
            .binary_search_by_key(&zone, |e| e.params.zone)
            .ok()
            .map(|i| &self.entries[i])
    }
}

impl Default for ZoneTable {
    fn default() -> Self {
        Self::cgcs2000()
    }
}

/// Planar coordinates (meters) tagged with the zone they were projected in.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlanarPoint {
    pub zone: Zone,
    pub xy: Vector2<f64>,
}

impl PlanarPoint {
    #[inline]
    pub fn new(zone: Zone, x: f64, y: f64) -> Self {
        Self {
            zone,
            xy: Vector2::new(x, y),
        }
    }
    #[inline]
    pub fn x(&self) -> f64 {
        self.xy.x
    }
    #[inline]
    pub fn y(&self) -> f64 {
        self.xy.y
    }
}

/// Forward/inverse projection over a zone table.
#[derive(Clone, Debug, Default)]
pub struct Projector {
    table: ZoneTable,
}

impl Projector {
    pub fn new(table: ZoneTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &ZoneTable {
        &self.table
    }

    /// Project `p` in the zone selected by its own longitude.
    pub fn to_planar(&self, p: GeoPoint) -> Result<PlanarPoint> {
        self.to_planar_in(Zone::of(p), p)
    }

    /// Project `p` in an explicitly chosen zone.
    pub fn to_planar_in(&self, zone: Zone, p: GeoPoint) -> Result<PlanarPoint> {
        let xy = self.planar_in(zone, p)?;
        Ok(PlanarPoint { zone, xy })
    }

    /// Inverse projection using the zone carried by `pp`.
    pub fn to_geographic(&self, pp: &PlanarPoint) -> Result<GeoPoint> {
        self.geographic_in(pp.zone, pp.xy)
    }

    pub(crate) fn planar_in(&self, zone: Zone, p: GeoPoint) -> Result<Vector2<f64>> {
        if !(p.longitude.is_finite() && p.latitude.is_finite()) {
            return Err(GeomError::NonFinite);
        }
        let entry = self.entry(zone)?;
        let (x, y) = entry.tm.forward(p.longitude, p.latitude);
        finite(x, y).map(|(x, y)| Vector2::new(x, y))
    }

    pub(crate) fn geographic_in(&self, zone: Zone, xy: Vector2<f64>) -> Result<GeoPoint> {
        finite(xy.x, xy.y)?;
        let entry = self.entry(zone)?;
        let (lon, lat) = entry.tm.inverse(xy.x, xy.y);
        finite(lon, lat).map(|(lon, lat)| GeoPoint::new(lon, lat))
    }

    fn entry(&self, zone: Zone) -> Result<&ZoneEntry> {
        self.table
            .entry(zone)
            .ok_or(GeomError::UnsupportedZone { zone: zone.0 })
    }
}

fn finite(a: f64, b: f64) -> Result<(f64, f64)> {
    if a.is_finite() && b.is_finite() {
        Ok((a, b))
    } else {
        Err(GeomError::NonFinite)
    }
}

/// Shared CGCS2000 projector, built on first use.
pub fn default_projector() -> &'static Projector {
    static DEFAULT: OnceLock<Projector> = OnceLock::new();
    DEFAULT.get_or_init(Projector::default)
}

/// `default_projector().to_planar(p)`.
pub fn to_planar(p: GeoPoint) -> Result<PlanarPoint> {
    default_projector().to_planar(p)
}

/// `default_projector().to_geographic(pp)`.
pub fn to_geographic(pp: &PlanarPoint) -> Result<GeoPoint> {
    default_projector().to_geographic(pp)
}
