//! Reference ellipsoids.

/// Reference ellipsoid given by semi-major axis `a` (m) and flattening `f`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ellipsoid {
    pub name: &'static str,
    pub a: f64,
    pub f: f64,
}

/// GRS80, the ellipsoid of CGCS2000.
pub const GRS80: Ellipsoid = Ellipsoid {
    name: "GRS80",
    a: 6_378_137.0,
    f: 1.0 / 298.257_222_101,
};

/// WGS84.
pub const WGS84: Ellipsoid = Ellipsoid {
    name: "WGS84",
    a: 6_378_137.0,
    f: 1.0 / 298.257_223_563,
};

impl Ellipsoid {
    /// Semi-minor axis (m).
    #[inline]
    pub fn b(&self) -> f64 {
        self.a * (1.0 - self.f)
    }
    /// First eccentricity squared.
    #[inline]
    pub fn e2(&self) -> f64 {
        self.f * (2.0 - self.f)
    }
    /// Second eccentricity squared.
    #[inline]
    pub fn ep2(&self) -> f64 {
        let e2 = self.e2();
        e2 / (1.0 - e2)
    }
    /// Third flattening `n = f / (2 - f)`.
    #[inline]
    pub fn third_flattening(&self) -> f64 {
        self.f / (2.0 - self.f)
    }
}
