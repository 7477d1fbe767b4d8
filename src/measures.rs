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

//! The measures module calculates the great circle distance and initial
//! bearing between two positions on a spherical Earth.
//!
//! No projection is involved: the calculations use the latitudes and
//! longitudes of the positions directly.

use crate::{GeographicPoint, Metres, NauticalMiles};
use angle_sc::{Angle, Degrees};

/// The mean radius of the Earth used by the spherical calculations.
pub const EARTH_RADIUS: Metres = Metres(6_371_000.0);

/// Calculate the great circle distance between two positions using the
/// Haversine formula.
/// * `a`, `b` - the positions.
///
/// # Examples
/// ```
/// use wellsite_geo::GeographicPoint;
/// use wellsite_geo::measures::distance;
///
/// let a = GeographicPoint::new(0.0, 0.0);
/// let b = GeographicPoint::new(0.0, 1.0);
/// assert!((distance(&a, &b).0 - 111_194.926_644_558_7).abs() < 1e-6);
/// ```
#[must_use]
pub fn distance(a: &GeographicPoint, b: &GeographicPoint) -> Metres {
    let lat_a = a.latitude().to_radians();
    let lat_b = b.latitude().to_radians();
    let sin_half_dlat = libm::sin((lat_b - lat_a) / 2.0);
    let sin_half_dlon = libm::sin((b.longitude() - a.longitude()).to_radians() / 2.0);

    let h = sin_half_dlat * sin_half_dlat
        + libm::cos(lat_a) * libm::cos(lat_b) * sin_half_dlon * sin_half_dlon;
    // h may exceed 1 by rounding for antipodal points
    let h = h.clamp(0.0, 1.0);
    let c = 2.0 * libm::atan2(libm::sqrt(h), libm::sqrt(1.0 - h));
    Metres(EARTH_RADIUS.0 * c)
}

/// Calculate the great circle distance between two positions in Nautical Miles.
/// * `a`, `b` - the positions.
#[must_use]
pub fn distance_nm(a: &GeographicPoint, b: &GeographicPoint) -> NauticalMiles {
    NauticalMiles::from(distance(a, b))
}

/// Normalise an angle in degrees to the range [0, 360).
/// * `degrees` - the angle in degrees.
#[must_use]
pub fn normalise_bearing(degrees: f64) -> f64 {
    let value = degrees % 360.0;
    let value = if value < 0.0 { value + 360.0 } else { value };
    // a tiny negative value rounds up to 360
    if value >= 360.0 {
        0.0
    } else {
        value
    }
}

/// Calculate the initial bearing of the great circle from one position to
/// another, clockwise from true north.
/// * `from` - the start position.
/// * `to` - the end position.
///
/// returns the bearing in degrees in the range [0, 360).
///
/// # Examples
/// ```
/// use wellsite_geo::GeographicPoint;
/// use wellsite_geo::measures::bearing;
///
/// let from = GeographicPoint::new(0.0, 0.0);
/// let west = bearing(&from, &GeographicPoint::new(0.0, -1.0));
/// assert!((west.0 - 270.0).abs() < 1e-12);
/// ```
#[must_use]
pub fn bearing(from: &GeographicPoint, to: &GeographicPoint) -> Degrees {
    let lat_a = Angle::from(Degrees(from.latitude()));
    let lat_b = Angle::from(Degrees(to.latitude()));
    let delta_long = Angle::from(Degrees(to.longitude() - from.longitude()));

    let y = delta_long.sin().0 * lat_b.cos().0;
    let x = lat_a.cos().0 * lat_b.sin().0 - lat_a.sin().0 * lat_b.cos().0 * delta_long.cos().0;
    let azimuth = Angle::from_y_x(y, x);
    Degrees(normalise_bearing(Degrees::from(azimuth).0))
}
