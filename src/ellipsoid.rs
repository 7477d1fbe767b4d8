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

//! The ellipsoid module contains types and functions for defining an ellipsoid
//! given its Semimajor axis (the equivalent of its radius) and flattening ratio.
//!
//! Only the named presets used by the CRS registry are provided:
//! WGS 84, GRS 80 and Clarke 1866.

#![allow(clippy::suboptimal_flops)]

pub mod coefficients;
pub mod presets;

use crate::Metres;

/// Calculate the Semiminor axis of an ellipsoid.
/// * `a` - the Semimajor axis of an ellipsoid.
/// * `f` - the flattening ratio.
/// # Examples
/// ```
/// use wellsite_geo::Metres;
/// use wellsite_geo::ellipsoid::{calculate_minor_axis, presets::wgs84};
///
/// // The WGS 84 Semiminor axis measured in metres.
/// let b : Metres = Metres(6_356_752.314_245_179);
/// assert_eq!(b, calculate_minor_axis(wgs84::A, wgs84::F));
/// ```
#[must_use]
pub fn calculate_minor_axis(a: Metres, f: f64) -> Metres {
    Metres(a.0 * (1.0 - f))
}

/// Calculate the square of the Eccentricity of an ellipsoid.
/// * `f` - the flattening ratio.
/// # Examples
/// ```
/// use wellsite_geo::ellipsoid::{calculate_sq_eccentricity, presets::wgs84};
///
/// // The WGS 84 sq_eccentricity.
/// assert_eq!(0.0066943799901413165, calculate_sq_eccentricity(wgs84::F));
/// ```
#[must_use]
pub fn calculate_sq_eccentricity(f: f64) -> f64 {
    f * (2.0 - f)
}

/// Calculate the third flattening of an ellipsoid.
/// * `f` - the flattening ratio.
/// # Examples
/// ```
/// use wellsite_geo::ellipsoid::{calculate_3rd_flattening, presets::wgs84};
///
/// // The WGS 84 3rd flattening.
/// assert_eq!(0.0016792203863837047, calculate_3rd_flattening(wgs84::F));
/// ```
#[must_use]
pub fn calculate_3rd_flattening(f: f64) -> f64 {
    f / (2.0 - f)
}

/// Calculate the rectifying radius of an ellipsoid, i.e. the radius of the
/// sphere with the same meridian length.
/// * `a` - the Semimajor axis of an ellipsoid.
/// * `n` - the third flattening of the ellipsoid.
#[must_use]
pub fn calculate_rectifying_radius(a: Metres, n: f64) -> Metres {
    let n2 = n * n;
    Metres(a.0 / (1.0 + n) * coefficients::evaluate_polynomial(&[1.0, 0.25, 1.0 / 64.0, 1.0 / 256.0], n2))
}

/// Calculate the conformal latitude function tau' = tan(chi) from
/// tau = tan(phi), the tangent of the geodetic latitude.
///
/// CFF Karney, [Transverse Mercator with an accuracy of a few nanometers](https://arxiv.org/pdf/1002.1417.pdf)
/// Eqs 7-9.
/// * `tau` - the tangent of the geodetic latitude.
/// * `e` - the eccentricity of the ellipsoid.
#[must_use]
pub fn calculate_taup(tau: f64, e: f64) -> f64 {
    let tau1 = libm::hypot(1.0, tau);
    let sig = libm::sinh(e * libm::atanh(e * tau / tau1));
    libm::hypot(1.0, sig) * tau - sig * tau1
}

/// Invert `calculate_taup` by Newton's method.
/// * `taup` - the tangent of the conformal latitude.
/// * `e` - the eccentricity of the ellipsoid.
///
/// returns tau, the tangent of the geodetic latitude.
#[must_use]
pub fn calculate_tau(taup: f64, e: f64) -> f64 {
    const MAX_ITERATIONS: u32 = 8;
    let tol = libm::sqrt(f64::EPSILON) / 10.0;

    let e2m = 1.0 - e * e;
    let mut tau = taup / e2m;
    let stol = tol * taup.abs().max(1.0);
    for _ in 0..MAX_ITERATIONS {
        let taupa = calculate_taup(tau, e);
        let dtau = (taup - taupa) * (1.0 + e2m * tau * tau)
            / (e2m * libm::hypot(1.0, tau) * libm::hypot(1.0, taupa));
        tau += dtau;
        if dtau.abs() < stol {
            break;
        }
    }
    tau
}
