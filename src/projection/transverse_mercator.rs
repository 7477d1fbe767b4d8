// Copyright (c) 2026 Ken Barker

// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"),
// to deal in the Software without restriction, including without limitation the
// rights to use, copy, modify, merge, publish, distribute, sublicense, and/or
// sell copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:

// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.

// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN
// THE SOFTWARE.

//! The transverse Mercator projection, including UTM.
//!
//! It uses the 6th order Krüger series described by CFF Karney in
//! [Transverse Mercator with an accuracy of a few nanometers](https://arxiv.org/pdf/1002.1417.pdf),
//! which is accurate to a few nanometres within 3,900 km of the central meridian.

#![allow(clippy::many_single_char_names)]
#![allow(clippy::similar_names)]
#![allow(clippy::cast_precision_loss)]

use super::{normalise_longitude, Singularity};
use crate::ellipsoid::{calculate_tau, calculate_taup};
use crate::Ellipsoid;
use core::f64::consts::FRAC_PI_2;

/// The UTM central meridian scale factor.
pub const UTM_SCALE_FACTOR: f64 = 0.9996;

/// The UTM false easting, in metres.
pub const UTM_FALSE_EASTING: f64 = 500_000.0;

/// The UTM false northing in the southern hemisphere, in metres.
pub const UTM_SOUTH_FALSE_NORTHING: f64 = 10_000_000.0;

/// How far beyond the pole, in radians of xi, a northing may fall before
/// the inverse treats it as the far side of the projection.
const POLE_TOLERANCE: f64 = 1e-12;

/// A projected point with the meridian convergence and point scale factor
/// of the projection at the point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridPoint {
    /// The easting in metres.
    pub easting: f64,
    /// The northing in metres.
    pub northing: f64,
    /// The meridian convergence in degrees: the bearing of grid north
    /// clockwise from true north.
    pub convergence: f64,
    /// The point scale factor.
    pub scale: f64,
}

/// A transverse Mercator projection on an `Ellipsoid`.
#[derive(Clone, Debug, PartialEq)]
pub struct TransverseMercator {
    ellipsoid: Ellipsoid,
    central_meridian: f64,
    latitude_of_origin: f64,
    scale_factor: f64,
    false_easting: f64,
    false_northing: f64,
    /// The scaled meridian distance of the latitude of origin, in metres.
    meridian_offset: f64,
}

impl TransverseMercator {
    /// Constructor.
    /// * `ellipsoid` - the `Ellipsoid`.
    /// * `central_meridian` - the longitude of origin, in degrees.
    /// * `latitude_of_origin` - the latitude of origin, in degrees.
    /// * `scale_factor` - the scale factor on the central meridian.
    /// * `false_easting`, `false_northing` - in metres.
    #[must_use]
    pub fn new(
        ellipsoid: Ellipsoid,
        central_meridian: f64,
        latitude_of_origin: f64,
        scale_factor: f64,
        false_easting: f64,
        false_northing: f64,
    ) -> Self {
        let mut tm = Self {
            ellipsoid,
            central_meridian,
            latitude_of_origin,
            scale_factor,
            false_easting,
            false_northing,
            meridian_offset: 0.0,
        };
        if latitude_of_origin != 0.0 {
            let (xi, _, _) = tm.series_forward(latitude_of_origin, 0.0);
            tm.meridian_offset = tm.scale_factor * tm.ellipsoid.rectifying_radius().0 * xi;
        }
        tm
    }

    /// Construct a UTM zone projection.
    /// * `zone` - the UTM zone, [1, 60].
    /// * `south` - whether the zone uses the southern hemisphere false northing.
    /// * `ellipsoid` - the `Ellipsoid`.
    #[must_use]
    pub fn utm(zone: u8, south: bool, ellipsoid: Ellipsoid) -> Self {
        Self::new(
            ellipsoid,
            crate::utm::central_meridian(zone),
            0.0,
            UTM_SCALE_FACTOR,
            UTM_FALSE_EASTING,
            if south { UTM_SOUTH_FALSE_NORTHING } else { 0.0 },
        )
    }

    /// The central meridian, in degrees.
    #[must_use]
    pub const fn central_meridian(&self) -> f64 {
        self.central_meridian
    }

    /// The latitude of origin, in degrees.
    #[must_use]
    pub const fn latitude_of_origin(&self) -> f64 {
        self.latitude_of_origin
    }

    /// The scale factor on the central meridian.
    #[must_use]
    pub const fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    #[must_use]
    pub const fn false_easting(&self) -> f64 {
        self.false_easting
    }

    #[must_use]
    pub const fn false_northing(&self) -> f64 {
        self.false_northing
    }

    /// Calculate xi, eta and the conformal values for a non-negative
    /// latitude and longitude difference <= 90 degrees.
    ///
    /// returns (xi, eta, (xi', eta', tau')).
    fn series_forward(&self, lat: f64, dlon: f64) -> (f64, f64, (f64, f64, f64)) {
        let lam = dlon.to_radians();
        let (xip, etap, taup) = if lat == 90.0 {
            (FRAC_PI_2, 0.0, f64::INFINITY)
        } else {
            let tau = libm::tan(lat.to_radians());
            let taup = calculate_taup(tau, self.ellipsoid.e());
            (
                libm::atan2(taup, libm::cos(lam)),
                libm::asinh(libm::sin(lam) / libm::hypot(taup, libm::cos(lam))),
                taup,
            )
        };

        let mut xi = xip;
        let mut eta = etap;
        for (j, alpha) in self.ellipsoid.alpha().iter().enumerate() {
            let k = 2.0 * (j + 1) as f64;
            xi += alpha * libm::sin(k * xip) * libm::cosh(k * etap);
            eta += alpha * libm::cos(k * xip) * libm::sinh(k * etap);
        }
        (xi, eta, (xip, etap, taup))
    }

    /// Project a geographic position.
    /// * `lon`, `lat` - the longitude and latitude in degrees.
    ///
    /// # Errors
    ///
    /// Returns a `Singularity` if the latitude is out of range or the point
    /// is on the equator 90 degrees from the central meridian.
    pub fn forward(&self, lon: f64, lat: f64) -> Result<GridPoint, Singularity> {
        if !(-90.0..=90.0).contains(&lat) {
            return Err(Singularity("latitude is outside [-90, 90]"));
        }

        let dlon = normalise_longitude(lon - self.central_meridian);
        let lat_sign = if lat.is_sign_negative() { -1.0 } else { 1.0 };
        let lon_sign = if dlon.is_sign_negative() { -1.0 } else { 1.0 };
        let lat = lat.abs();
        let dlon = dlon.abs();
        let backside = dlon > 90.0;
        let dlon = if backside { 180.0 - dlon } else { dlon };

        let lam = dlon.to_radians();
        let cos_lam = libm::cos(lam);
        let sin_lam = libm::sin(lam);
        if lat == 0.0 && cos_lam.abs() < 1e-12 {
            return Err(Singularity(
                "the point is on the equator 90 degrees from the central meridian",
            ));
        }

        let (xi, eta, (xip, etap, taup)) = self.series_forward(lat, dlon);

        // The Gauss-Schreiber convergence and scale, Karney Eqs 10 and 12
        let (gamma_p, k_p) = if lat == 90.0 {
            let e = self.ellipsoid.e();
            (lam, libm::sqrt(1.0 - e * e) * libm::exp(e * libm::atanh(e)))
        } else {
            let phi = lat.to_radians();
            let tau = libm::tan(phi);
            let sin_phi = libm::sin(phi);
            (
                libm::atan2(sin_lam * taup, cos_lam * libm::hypot(1.0, taup)),
                libm::sqrt(1.0 - self.ellipsoid.e_2() * sin_phi * sin_phi) * libm::hypot(1.0, tau)
                    / libm::hypot(taup, cos_lam),
            )
        };

        // The derivatives of the series, Karney Eqs 14 and 15
        let mut p = 1.0;
        let mut q = 0.0;
        for (j, alpha) in self.ellipsoid.alpha().iter().enumerate() {
            let k = 2.0 * (j + 1) as f64;
            p += k * alpha * libm::cos(k * xip) * libm::cosh(k * etap);
            q += k * alpha * libm::sin(k * xip) * libm::sinh(k * etap);
        }

        let mut gamma = (gamma_p + libm::atan2(q, p)).to_degrees();
        let radius = self.ellipsoid.rectifying_radius().0;
        let scale = self.scale_factor * radius / self.ellipsoid.a().0 * k_p * libm::hypot(p, q);

        let xi = if backside {
            gamma = 180.0 - gamma;
            core::f64::consts::PI - xi
        } else {
            xi
        };

        let k0a = self.scale_factor * radius;
        Ok(GridPoint {
            easting: self.false_easting + k0a * eta * lon_sign,
            northing: self.false_northing + k0a * xi * lat_sign - self.meridian_offset,
            convergence: gamma * lat_sign * lon_sign,
            scale,
        })
    }

    /// Convert a projected position to a geographic position.
    /// * `x`, `y` - the easting and northing in metres.
    ///
    /// # Errors
    ///
    /// Returns a `Singularity` if the coordinates are not finite.
    ///
    /// returns (longitude, latitude) in degrees.
    pub fn inverse(&self, x: f64, y: f64) -> Result<(f64, f64), Singularity> {
        if !(x.is_finite() && y.is_finite()) {
            return Err(Singularity("coordinates are not finite"));
        }

        let k0a = self.scale_factor * self.ellipsoid.rectifying_radius().0;
        let xi = (y - self.false_northing + self.meridian_offset) / k0a;
        let eta = (x - self.false_easting) / k0a;

        let xi_sign = if xi.is_sign_negative() { -1.0 } else { 1.0 };
        let eta_sign = if eta.is_sign_negative() { -1.0 } else { 1.0 };
        let xi = xi.abs();
        let eta = eta.abs();
        // rounding can place the pole just beyond pi/2
        let backside = xi - FRAC_PI_2 > POLE_TOLERANCE;
        let xi = if backside {
            core::f64::consts::PI - xi
        } else {
            xi.min(FRAC_PI_2)
        };

        let mut xip = xi;
        let mut etap = eta;
        for (j, beta) in self.ellipsoid.beta().iter().enumerate() {
            let k = 2.0 * (j + 1) as f64;
            xip -= beta * libm::sin(k * xi) * libm::cosh(k * eta);
            etap -= beta * libm::cos(k * xi) * libm::sinh(k * eta);
        }

        let s = libm::sinh(etap);
        let c = libm::cos(xip).max(0.0);
        let r = libm::hypot(s, c);
        let (lon, lat) = if r == 0.0 {
            (0.0, 90.0)
        } else {
            let tau = calculate_tau(libm::sin(xip) / r, self.ellipsoid.e());
            (
                libm::atan2(s, c).to_degrees(),
                libm::atan(tau).to_degrees(),
            )
        };

        let lon = if backside { 180.0 - lon } else { lon };
        Ok((
            normalise_longitude(lon * eta_sign + self.central_meridian),
            lat * xi_sign,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use angle_sc::is_within_tolerance;

    fn utm(zone: u8, south: bool) -> TransverseMercator {
        TransverseMercator::utm(zone, south, Ellipsoid::wgs84())
    }

    #[test]
    fn test_forward_central_meridian() {
        let tm = utm(13, false);
        let result = tm.forward(-105.0, 40.0).unwrap();
        assert!(is_within_tolerance(UTM_FALSE_EASTING, result.easting, 1e-9));
        assert!(is_within_tolerance(0.0, result.convergence, 1e-12));
        assert!(is_within_tolerance(UTM_SCALE_FACTOR, result.scale, 1e-12));
    }

    #[test]
    fn test_forward_reference_values() {
        // Verified against PROJ, EPSG:32651
        const TEST_CASES: &[(f64, f64, f64, f64)] = &[
            (121.880_356, 29.887_703, 391_888.063_726_413, 3_306_868.456_385_104),
            (121.430_427, 28.637_151, 346_582.410_843_301_1, 3_168_793.409_367_069),
            (121.880_772, 31.491_324, 393_700.365_020_183_5, 3_484_597.440_826_551),
            (122.625_275, 30.246_954, 463_948.333_307_260_7, 3_346_209.757_229_396),
        ];

        let tm = utm(51, false);
        for (lon, lat, x, y) in TEST_CASES {
            let result = tm.forward(*lon, *lat).unwrap();
            assert!(is_within_tolerance(*x, result.easting, 1e-6));
            assert!(is_within_tolerance(*y, result.northing, 1e-6));
        }
    }

    #[test]
    fn test_round_trip() {
        let tm = utm(51, false);
        for (lon, lat) in [(121.0, 30.0), (123.0, 40.0), (125.0, 50.0), (120.0, 0.0), (126.0, 84.0)] {
            let result = tm.forward(lon, lat).unwrap();
            let (lon2, lat2) = tm.inverse(result.easting, result.northing).unwrap();
            assert!(is_within_tolerance(lon, lon2, 1e-11));
            assert!(is_within_tolerance(lat, lat2, 1e-11));
        }
    }

    #[test]
    fn test_south_hemisphere() {
        let tm = utm(24, true);
        let result = tm.forward(-40.0, -22.0).unwrap();
        assert!(is_within_tolerance(396_775.359_570_923, result.easting, 1e-6));
        assert!(is_within_tolerance(7_566_835.571_346_41, result.northing, 1e-6));
        assert!(is_within_tolerance(0.374_639_866_702_86, result.convergence, 1e-9));

        let (lon, lat) = tm.inverse(result.easting, result.northing).unwrap();
        assert!(is_within_tolerance(-40.0, lon, 1e-11));
        assert!(is_within_tolerance(-22.0, lat, 1e-11));
    }

    #[test]
    fn test_convergence() {
        // west of the central meridian in the northern hemisphere
        let tm = utm(14, false);
        let result = tm.forward(-102.0, 32.0).unwrap();
        assert!(is_within_tolerance(-1.590_818_551_931_394_7, result.convergence, 1e-9));
        assert!(result.scale > UTM_SCALE_FACTOR);
    }

    #[test]
    fn test_poles() {
        let tm = utm(31, false);
        let result = tm.forward(3.0, 90.0).unwrap();
        assert!(is_within_tolerance(UTM_FALSE_EASTING, result.easting, 1e-9));

        let (_, lat) = tm.inverse(result.easting, result.northing).unwrap();
        assert!(is_within_tolerance(90.0, lat, 1e-9));
    }

    #[test]
    fn test_pole_inverse_stays_on_the_front_side() {
        for (zone, south) in [(31, false), (32, false), (32, true), (60, true)] {
            let tm = utm(zone, south);
            let lat = if south { -90.0 } else { 90.0 };
            for lon in [tm.central_meridian, tm.central_meridian + 1.0, tm.central_meridian - 3.0] {
                let result = tm.forward(lon, lat).unwrap();
                let (lon2, lat2) = tm.inverse(result.easting, result.northing).unwrap();
                assert!(is_within_tolerance(lat, lat2, 1e-9));
                assert!(is_within_tolerance(tm.central_meridian, lon2, 1e-9));
            }

            // a northing a micrometre beyond the pole
            let result = tm.forward(tm.central_meridian, lat).unwrap();
            let nudge = if south { -1e-6 } else { 1e-6 };
            let (lon2, _) = tm.inverse(result.easting, result.northing + nudge).unwrap();
            assert!(is_within_tolerance(tm.central_meridian, lon2, 1e-9));
        }
    }

    #[test]
    fn test_latitude_of_origin() {
        let tm = TransverseMercator::new(Ellipsoid::wgs84(), -105.0, 40.0, 1.0, 0.0, 0.0);
        assert_eq!(40.0, tm.latitude_of_origin());

        let result = tm.forward(-105.0, 40.0).unwrap();
        assert!(is_within_tolerance(0.0, result.easting, 1e-9));
        assert!(is_within_tolerance(0.0, result.northing, 1e-6));

        let (lon, lat) = tm.inverse(1000.0, 1000.0).unwrap();
        let result = tm.forward(lon, lat).unwrap();
        assert!(is_within_tolerance(1000.0, result.easting, 1e-6));
        assert!(is_within_tolerance(1000.0, result.northing, 1e-6));
    }

    #[test]
    fn test_singularities() {
        let tm = utm(31, false);
        assert!(tm.forward(93.0, 0.0).is_err());
        assert!(tm.forward(0.0, 90.5).is_err());
        assert!(tm.inverse(f64::INFINITY, 0.0).is_err());
    }
}
