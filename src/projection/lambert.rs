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

//! The Lambert Conformal Conic projection, with one or two standard parallels.
//!
//! The formulae are from
//! [IOGP Guidance Note 7-2](https://www.iogp.org/wp-content/uploads/2019/09/373-07-02.pdf),
//! section 3.2.1.

#![allow(clippy::many_single_char_names)]
#![allow(clippy::too_many_arguments)]

use super::{normalise_longitude, Singularity};
use crate::Ellipsoid;
use core::f64::consts::{FRAC_PI_2, FRAC_PI_4};

/// The convergence tolerance of the inverse latitude iteration, in radians.
const LATITUDE_TOLERANCE: f64 = 1e-14;

/// The distance from the apex of the cone treated as the apex, in metres.
const APEX_TOLERANCE: f64 = 1e-6;

/// The maximum number of inverse latitude iterations.
const MAX_ITERATIONS: u32 = 15;

/// A Lambert Conformal Conic projection on an `Ellipsoid`.
#[derive(Clone, Debug, PartialEq)]
pub struct LambertConformalConic {
    ellipsoid: Ellipsoid,
    central_meridian: f64,
    false_easting: f64,
    false_northing: f64,
    /// The cone constant.
    n: f64,
    /// a * F * k0.
    a_f: f64,
    /// The radius of the latitude of origin.
    rho_0: f64,
}

/// The m function, IOGP Guidance Note 7-2.
fn m(phi: f64, e_2: f64) -> f64 {
    let sin_phi = libm::sin(phi);
    libm::cos(phi) / libm::sqrt(1.0 - e_2 * sin_phi * sin_phi)
}

/// The t function, IOGP Guidance Note 7-2.
fn t(phi: f64, e: f64) -> f64 {
    let e_sin_phi = e * libm::sin(phi);
    libm::tan(FRAC_PI_4 - phi / 2.0)
        / libm::pow((1.0 - e_sin_phi) / (1.0 + e_sin_phi), e / 2.0)
}

impl LambertConformalConic {
    /// Constructor.
    /// * `ellipsoid` - the `Ellipsoid`.
    /// * `central_meridian` - the longitude of origin, in degrees.
    /// * `latitude_of_origin` - the latitude of origin, in degrees.
    /// * `lat_1`, `lat_2` - the standard parallels, in degrees; equal for a
    ///   single standard parallel.
    /// * `scale_factor` - the scale factor on the standard parallel(s).
    /// * `false_easting`, `false_northing` - in metres.
    ///
    /// returns None if the standard parallels do not define a cone,
    /// e.g. they are symmetric about the equator or at a pole.
    #[must_use]
    pub fn new(
        ellipsoid: Ellipsoid,
        central_meridian: f64,
        latitude_of_origin: f64,
        lat_1: f64,
        lat_2: f64,
        scale_factor: f64,
        false_easting: f64,
        false_northing: f64,
    ) -> Option<Self> {
        let e = ellipsoid.e();
        let e_2 = ellipsoid.e_2();
        let phi_1 = lat_1.to_radians();
        let phi_2 = lat_2.to_radians();
        if lat_1.abs() >= 90.0 || lat_2.abs() >= 90.0 {
            return None;
        }

        let (m1, t1) = (m(phi_1, e_2), t(phi_1, e));
        let n = if (lat_1 - lat_2).abs() < 1e-10 {
            libm::sin(phi_1)
        } else {
            let (m2, t2) = (m(phi_2, e_2), t(phi_2, e));
            (libm::log(m1) - libm::log(m2)) / (libm::log(t1) - libm::log(t2))
        };
        if !n.is_finite() || n.abs() < 1e-10 {
            return None;
        }

        let a_f = ellipsoid.a().0 * m1 / (n * libm::pow(t1, n)) * scale_factor;
        let mut lcc = Self {
            ellipsoid,
            central_meridian,
            false_easting,
            false_northing,
            n,
            a_f,
            rho_0: 0.0,
        };
        lcc.rho_0 = lcc.rho(latitude_of_origin.to_radians());
        Some(lcc)
    }

    /// The cone constant.
    #[must_use]
    pub const fn cone_constant(&self) -> f64 {
        self.n
    }

    /// The central meridian, in degrees.
    #[must_use]
    pub const fn central_meridian(&self) -> f64 {
        self.central_meridian
    }

    fn rho(&self, phi: f64) -> f64 {
        self.a_f * libm::pow(t(phi, self.ellipsoid.e()), self.n)
    }

    /// Project a geographic position.
    /// * `lon`, `lat` - the longitude and latitude in degrees.
    ///
    /// # Errors
    ///
    /// Returns a `Singularity` if the latitude is out of range or at the
    /// pole opposite the apex of the cone.
    ///
    /// returns (easting, northing) in metres.
    pub fn forward(&self, lon: f64, lat: f64) -> Result<(f64, f64), Singularity> {
        if !(-90.0..=90.0).contains(&lat) {
            return Err(Singularity("latitude is outside [-90, 90]"));
        }
        if 90.0 + lat * self.n.signum() < 1e-10 {
            return Err(Singularity("the pole opposite the cone apex cannot be projected"));
        }

        let rho = self.rho(lat.to_radians());
        let theta = self.n * normalise_longitude(lon - self.central_meridian).to_radians();
        Ok((
            self.false_easting + rho * libm::sin(theta),
            self.false_northing + self.rho_0 - rho * libm::cos(theta),
        ))
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

        let sign = self.n.signum();
        let dx = x - self.false_easting;
        let dy = self.rho_0 - (y - self.false_northing);
        let rho = sign * libm::hypot(dx, dy);
        if rho.abs() < APEX_TOLERANCE {
            // the apex of the cone
            return Ok((self.central_meridian, sign * 90.0));
        }

        let theta = libm::atan2(sign * dx, sign * dy);
        let t_dash = libm::pow(rho / self.a_f, 1.0 / self.n);

        let e = self.ellipsoid.e();
        let mut phi = FRAC_PI_2 - 2.0 * libm::atan(t_dash);
        for _ in 0..MAX_ITERATIONS {
            let e_sin_phi = e * libm::sin(phi);
            let next = FRAC_PI_2
                - 2.0 * libm::atan(t_dash * libm::pow((1.0 - e_sin_phi) / (1.0 + e_sin_phi), e / 2.0));
            let delta = (next - phi).abs();
            phi = next;
            if delta < LATITUDE_TOLERANCE {
                break;
            }
        }

        Ok((
            normalise_longitude((theta / self.n).to_degrees() + self.central_meridian),
            phi.to_degrees(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use angle_sc::is_within_tolerance;

    /// NAD83 / Statistics Canada Lambert, EPSG:3347
    fn statistics_canada() -> LambertConformalConic {
        LambertConformalConic::new(
            Ellipsoid::grs80(),
            -91.866_666_666_666_7,
            63.390_675,
            49.0,
            77.0,
            1.0,
            6_200_000.0,
            3_000_000.0,
        )
        .unwrap()
    }

    #[test]
    fn test_cone_constant() {
        let lcc = statistics_canada();
        assert!(is_within_tolerance(0.900_790_086_404_411_4, lcc.cone_constant(), 1e-12));
        assert_eq!(-91.866_666_666_666_7, lcc.central_meridian());
    }

    #[test]
    fn test_forward_origin() {
        let lcc = statistics_canada();
        let (x, y) = lcc.forward(-91.866_666_666_666_7, 63.390_675).unwrap();
        assert!(is_within_tolerance(6_200_000.0, x, 1e-6));
        assert!(is_within_tolerance(3_000_000.0, y, 1e-6));
    }

    #[test]
    fn test_round_trip() {
        let lcc = statistics_canada();
        for (lon, lat) in [(-114.07, 51.05), (-104.99, 39.74), (-60.0, 45.0), (-130.0, 70.0)] {
            let (x, y) = lcc.forward(lon, lat).unwrap();
            let (lon2, lat2) = lcc.inverse(x, y).unwrap();
            assert!(is_within_tolerance(lon, lon2, 1e-9));
            assert!(is_within_tolerance(lat, lat2, 1e-9));
        }
    }

    #[test]
    fn test_poles() {
        let lcc = statistics_canada();

        // the apex of the cone
        let (x, y) = lcc.forward(0.0, 90.0).unwrap();
        let (lon, lat) = lcc.inverse(x, y).unwrap();
        assert_eq!(lcc.central_meridian(), lon);
        assert_eq!(90.0, lat);

        assert!(lcc.forward(0.0, -90.0).is_err());
        assert!(lcc.forward(0.0, -91.0).is_err());
    }

    #[test]
    fn test_single_standard_parallel() {
        let lcc = LambertConformalConic::new(Ellipsoid::wgs84(), -100.0, 40.0, 40.0, 40.0, 1.0, 0.0, 0.0)
            .unwrap();
        assert!(is_within_tolerance(libm::sin(40_f64.to_radians()), lcc.cone_constant(), 1e-15));

        let (x, y) = lcc.forward(-100.0, 40.0).unwrap();
        assert!(is_within_tolerance(0.0, x, 1e-9));
        assert!(is_within_tolerance(0.0, y, 1e-6));
    }

    #[test]
    fn test_invalid_parallels() {
        assert!(LambertConformalConic::new(Ellipsoid::wgs84(), 0.0, 0.0, 30.0, -30.0, 1.0, 0.0, 0.0)
            .is_none());
        assert!(LambertConformalConic::new(Ellipsoid::wgs84(), 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0)
            .is_none());
        assert!(LambertConformalConic::new(Ellipsoid::wgs84(), 0.0, 0.0, 90.0, 60.0, 1.0, 0.0, 0.0)
            .is_none());
    }
}
