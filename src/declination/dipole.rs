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

//! A tilted dipole approximation of the Earth's magnetic field.
//!
//! The geomagnetic field is modelled as a dipole at the centre of the Earth
//! whose axis passes through the geomagnetic poles. The declination is the
//! bearing of the great circle from a position to the geomagnetic North pole.
//! The other elements are calculated from the dipole (geomagnetic) latitude:
//!
//! - tan I = 2 tan φm
//! - H = B0 cos φm
//! - Z = 2 B0 sin φm
//! - F = B0 √(1 + 3 sin² φm)
//!
//! The accuracy is a few degrees at best, see `DeclinationConfig::dipole_accuracy`.

use super::{
    decimal_year, normalise_declination, secular_variation, DeclinationRequest, FieldElements,
    MIN_ELEVATION,
};
use crate::config::DeclinationConfig;
use crate::measures::{bearing, EARTH_RADIUS};
use crate::GeographicPoint;

/// The dipole (geomagnetic) latitude of a position in degrees.
/// * `point` - the position.
/// * `pole` - the geomagnetic North pole.
#[must_use]
pub fn dipole_latitude(point: &GeographicPoint, pole: &GeographicPoint) -> f64 {
    let (sin_lat, cos_lat) = libm::sincos(point.latitude().to_radians());
    let (sin_pole, cos_pole) = libm::sincos(pole.latitude().to_radians());
    let cos_dlon = libm::cos((point.longitude() - pole.longitude()).to_radians());
    let sin_phi = sin_lat * sin_pole + cos_lat * cos_pole * cos_dlon;
    libm::asin(sin_phi.clamp(-1.0, 1.0)).to_degrees()
}

/// Calculate the dipole field elements for a request.
/// Elevations below `MIN_ELEVATION` are clamped to it.
/// * `request` - the position, date and elevation.
/// * `config` - the dipole parameters.
#[must_use]
pub fn dipole_field(request: &DeclinationRequest, config: &DeclinationConfig) -> FieldElements {
    let pole = GeographicPoint::new(config.dipole_pole_latitude, config.dipole_pole_longitude);
    let location = &request.location;
    let elevation = request.elevation.0.max(MIN_ELEVATION.0);

    let years = decimal_year(request.date) - config.dipole_epoch;
    let declination = normalise_declination(
        bearing(location, &pole).0
            + secular_variation(location) * years
            + config.elevation_correction * elevation,
    );

    let phi = dipole_latitude(location, &pole).to_radians();
    let (sin_phi, cos_phi) = libm::sincos(phi);
    let inclination = libm::atan(2.0 * libm::tan(phi)).to_degrees();

    // the field decreases with the cube of the distance from the centre
    let r = EARTH_RADIUS.0 / (EARTH_RADIUS.0 + elevation);
    let b0 = config.equatorial_field * r * r * r;

    FieldElements {
        declination,
        inclination,
        total_intensity: b0 * libm::sqrt(1.0 + 3.0 * sin_phi * sin_phi),
        horizontal_intensity: b0 * cos_phi,
        vertical_intensity: 2.0 * b0 * sin_phi,
    }
}
