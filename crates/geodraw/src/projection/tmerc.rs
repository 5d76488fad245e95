//! Ellipsoidal transverse Mercator (Krüger series, 6th order in `n`).
//!
//! - Forward: geodetic → conformal latitude → Gauss–Schreiber plane → series.
//! - Inverse: series reversion, then conformal → geodetic latitude by Newton.
//!
//! Error of the truncated series is a few nanometers within ±4° of the
//! central meridian, far below what the drawing tools need.

use super::ellipsoid::Ellipsoid;

const ORDER: usize = 6;
const NEWTON_MAX_ITER: usize = 10;

/// A transverse Mercator projection bound to one central meridian.
#[derive(Clone, Copy, Debug)]
pub(crate) struct TransverseMercator {
    lon0: f64,
    k0: f64,
    false_easting: f64,
    false_northing: f64,
    /// Eccentricity.
    e: f64,
    /// Rectifying radius A.
    rect_a: f64,
    alpha: [f64; ORDER],
    beta: [f64; ORDER],
}

impl TransverseMercator {
    pub(crate) fn new(
        ellipsoid: &Ellipsoid,
        central_meridian_deg: f64,
        scale_factor: f64,
        false_easting: f64,
        false_northing: f64,
    ) -> Self {
        let n = ellipsoid.third_flattening();
        let n2 = n * n;
        let n3 = n2 * n;
        let n4 = n3 * n;
        let n5 = n4 * n;
        let n6 = n5 * n;
        let rect_a = ellipsoid.a / (1.0 + n) * (1.0 + n2 / 4.0 + n4 / 64.0 + n6 / 256.0);
        let alpha = [
            n / 2.0 - 2.0 / 3.0 * n2 + 5.0 / 16.0 * n3 + 41.0 / 180.0 * n4 - 127.0 / 288.0 * n5
                + 7891.0 / 37800.0 * n6,
            13.0 / 48.0 * n2 - 3.0 / 5.0 * n3 + 557.0 / 1440.0 * n4 + 281.0 / 630.0 * n5
                - 1_983_433.0 / 1_935_360.0 * n6,
            61.0 / 240.0 * n3 - 103.0 / 140.0 * n4 + 15061.0 / 26880.0 * n5
                + 167_603.0 / 181_440.0 * n6,
            49561.0 / 161_280.0 * n4 - 179.0 / 168.0 * n5 + 6_601_661.0 / 7_257_600.0 * n6,
            34729.0 / 80640.0 * n5 - 3_418_889.0 / 1_995_840.0 * n6,
            212_378_941.0 / 319_334_400.0 * n6,
        ];
        let beta = [
            n / 2.0 - 2.0 / 3.0 * n2 + 37.0 / 96.0 * n3 - 1.0 / 360.0 * n4 - 81.0 / 512.0 * n5
                + 96199.0 / 604_800.0 * n6,
            1.0 / 48.0 * n2 + 1.0 / 15.0 * n3 - 437.0 / 1440.0 * n4 + 46.0 / 105.0 * n5
                - 1_118_711.0 / 3_870_720.0 * n6,
            17.0 / 480.0 * n3 - 37.0 / 840.0 * n4 - 209.0 / 4480.0 * n5 + 5569.0 / 90720.0 * n6,
            4397.0 / 161_280.0 * n4 - 11.0 / 504.0 * n5 - 830_251.0 / 7_257_600.0 * n6,
            4583.0 / 161_280.0 * n5 - 108_847.0 / 3_991_680.0 * n6,
            20_648_693.0 / 638_668_800.0 * n6,
        ];
        Self {
            lon0: central_meridian_deg,
            k0: scale_factor,
            false_easting,
            false_northing,
            e: ellipsoid.e2().sqrt(),
            rect_a,
            alpha,
            beta,
        }
    }

    /// (lon, lat) in degrees → (easting, northing) in meters.
    pub(crate) fn forward(&self, lon_deg: f64, lat_deg: f64) -> (f64, f64) {
        let lam = (lon_deg - self.lon0).to_radians();
        let phi = lat_deg.to_radians();
        let (xip, etap) = if phi.abs() >= std::f64::consts::FRAC_PI_2 {
            (std::f64::consts::FRAC_PI_2.copysign(phi), 0.0)
        } else {
            let taup = taupf(phi.tan(), self.e);
            let (sin_lam, cos_lam) = lam.sin_cos();
            (taup.atan2(cos_lam), (sin_lam / taup.hypot(cos_lam)).asinh())
        };
        let mut xi = xip;
        let mut eta = etap;
        for (j, a) in self.alpha.iter().enumerate() {
            let k = 2.0 * (j + 1) as f64;
            xi += a * (k * xip).sin() * (k * etap).cosh();
            eta += a * (k * xip).cos() * (k * etap).sinh();
        }
        let scale = self.k0 * self.rect_a;
        (
            self.false_easting + scale * eta,
            self.false_northing + scale * xi,
        )
    }

    /// (easting, northing) in meters → (lon, lat) in degrees.
    pub(crate) fn inverse(&self, x: f64, y: f64) -> (f64, f64) {
        let scale = self.k0 * self.rect_a;
        let xi = (y - self.false_northing) / scale;
        let eta = (x - self.false_easting) / scale;
        let mut xip = xi;
        let mut etap = eta;
        for (j, b) in self.beta.iter().enumerate() {
            let k = 2.0 * (j + 1) as f64;
            xip -= b * (k * xi).sin() * (k * eta).cosh();
            etap -= b * (k * xi).cos() * (k * eta).sinh();
        }
        let s = etap.sinh();
        let c = xip.cos().max(0.0);
        let r = s.hypot(c);
        let (lam, phi) = if r > 0.0 {
            let taup = xip.sin() / r;
            (s.atan2(c), tauf(taup, self.e).atan())
        } else {
            (0.0, std::f64::consts::FRAC_PI_2.copysign(xip))
        };
        (self.lon0 + lam.to_degrees(), phi.to_degrees())
    }
}

/// tan(conformal latitude) from tan(geodetic latitude).
#[inline]
fn taupf(tau: f64, e: f64) -> f64 {
    let tau1 = 1.0_f64.hypot(tau);
    let sig = (e * (e * tau / tau1).atanh()).sinh();
    1.0_f64.hypot(sig) * tau - sig * tau1
}

/// tan(geodetic latitude) from tan(conformal latitude) via Newton's method.
fn tauf(taup: f64, e: f64) -> f64 {
    let e2m = 1.0 - e * e;
    let tol = f64::EPSILON.sqrt() * 0.1 * taup.abs().max(1.0);
    let mut tau = taup / e2m;
    for _ in 0..NEWTON_MAX_ITER {
        let taupa = taupf(tau, e);
        let dtau = (taup - taupa) * (1.0 + e2m * tau * tau)
            / (e2m * 1.0_f64.hypot(tau) * 1.0_f64.hypot(taupa));
        tau += dtau;
        if dtau.abs() < tol {
            break;
        }
    }
    tau
}
