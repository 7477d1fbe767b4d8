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

//! This module contains the Krüger series coefficients for the transverse
//! Mercator projection.
//!
//! It uses the 6th order series given by CFF Karney in
//! [Transverse Mercator with an accuracy of a few nanometers](https://arxiv.org/pdf/1002.1417.pdf)
//! Eqs 35 and 36.

/// The order of the Krüger series.
pub const SERIES_ORDER: usize = 6;

/// Evaluate the polynomial `coeffs[0] + coeffs[1] * x + coeffs[2] * x^2 ...`
/// using Horner's method.
/// * `coeffs` - the polynomial coefficients, in ascending order of power.
/// * `x` - the variable.
/// # Examples
/// ```
/// use wellsite_geo::ellipsoid::coefficients::evaluate_polynomial;
///
/// assert_eq!(0.0, evaluate_polynomial(&[], 2.0));
/// assert_eq!(17.0, evaluate_polynomial(&[1.0, 2.0, 3.0], 2.0));
/// ```
#[must_use]
pub fn evaluate_polynomial(coeffs: &[f64], x: f64) -> f64 {
    coeffs
        .split_last()
        .map_or(0.0, |(last, elements)| {
            elements
                .iter()
                .rev()
                .fold(*last, |result, element| result.mul_add(x, *element))
        })
}

/// The series coefficients of `alpha[j] / n^j`, ascending powers of `n`.
const ALPHA: [&[f64]; SERIES_ORDER] = [
    &[
        1.0 / 2.0,
        -2.0 / 3.0,
        5.0 / 16.0,
        41.0 / 180.0,
        -127.0 / 288.0,
        7891.0 / 37800.0,
    ],
    &[
        13.0 / 48.0,
        -3.0 / 5.0,
        557.0 / 1440.0,
        281.0 / 630.0,
        -1_983_433.0 / 1_935_360.0,
    ],
    &[
        61.0 / 240.0,
        -103.0 / 140.0,
        15061.0 / 26880.0,
        167_603.0 / 181_440.0,
    ],
    &[
        49561.0 / 161_280.0,
        -179.0 / 168.0,
        6_601_661.0 / 7_257_600.0,
    ],
    &[34729.0 / 80640.0, -3_418_889.0 / 1_995_840.0],
    &[212_378_941.0 / 319_334_400.0],
];

/// The series coefficients of `beta[j] / n^j`, ascending powers of `n`.
const BETA: [&[f64]; SERIES_ORDER] = [
    &[
        1.0 / 2.0,
        -2.0 / 3.0,
        37.0 / 96.0,
        -1.0 / 360.0,
        -81.0 / 512.0,
        96199.0 / 604_800.0,
    ],
    &[
        1.0 / 48.0,
        1.0 / 15.0,
        -437.0 / 1440.0,
        46.0 / 105.0,
        -1_118_711.0 / 3_870_720.0,
    ],
    &[
        17.0 / 480.0,
        -37.0 / 840.0,
        -209.0 / 4480.0,
        5569.0 / 90720.0,
    ],
    &[
        4397.0 / 161_280.0,
        -11.0 / 504.0,
        -830_251.0 / 7_257_600.0,
    ],
    &[4583.0 / 161_280.0, -108_847.0 / 3_991_680.0],
    &[20_648_693.0 / 638_668_800.0],
];

fn evaluate_series(table: &[&[f64]; SERIES_ORDER], n: f64) -> [f64; SERIES_ORDER] {
    let mut result = [0.0; SERIES_ORDER];
    let mut nj = n;
    for (value, coeffs) in result.iter_mut().zip(table.iter()) {
        *value = nj * evaluate_polynomial(coeffs, n);
        nj *= n;
    }
    result
}

/// The forward (geographic to projected) coefficients `alpha[j]`.
/// * `n` - the third flattening of the ellipsoid.
#[must_use]
pub fn evaluate_coeffs_alpha(n: f64) -> [f64; SERIES_ORDER] {
    evaluate_series(&ALPHA, n)
}

/// The inverse (projected to geographic) coefficients `beta[j]`.
/// * `n` - the third flattening of the ellipsoid.
#[must_use]
pub fn evaluate_coeffs_beta(n: f64) -> [f64; SERIES_ORDER] {
    evaluate_series(&BETA, n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ellipsoid::{calculate_3rd_flattening, presets::wgs84};
    use angle_sc::is_within_tolerance;

    #[test]
    fn test_evaluate_coeffs_alpha() {
        let n = calculate_3rd_flattening(wgs84::F);
        let alpha = evaluate_coeffs_alpha(n);

        // Leading terms: n/2 - 2n^2/3 and 13n^2/48
        assert!(is_within_tolerance(8.377_318_206_244_698e-4, alpha[0], 1e-15));
        assert!(is_within_tolerance(7.608_527_773_572_307e-7, alpha[1], 1e-17));
        for j in 1..SERIES_ORDER {
            assert!(alpha[j].abs() < alpha[j - 1].abs());
        }
    }

    #[test]
    fn test_evaluate_coeffs_beta() {
        let n = calculate_3rd_flattening(wgs84::F);
        let beta = evaluate_coeffs_beta(n);

        assert!(is_within_tolerance(8.377_321_640_579_486e-4, beta[0], 1e-15));
        assert!(is_within_tolerance(5.905_870_152_220_203e-8, beta[1], 1e-18));
        for j in 1..SERIES_ORDER {
            assert!(beta[j].abs() < beta[j - 1].abs());
        }
    }
}
