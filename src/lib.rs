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

//! wellsite-geo
//!
//! A library for locating drilling sites on the Earth's surface and
//! estimating the magnetic declination needed to correct directional-survey
//! azimuths from magnetic north to true or grid north.
//!
//! ## Coordinates and projections
//!
//! Positions are exchanged as [`GeographicPoint`]s: a latitude and longitude
//! in degrees on the WGS 84 reference datum.
//!
//! The [`crs`] module contains a registry of named Coordinate Reference Systems
//! (e.g. `EPSG:4326`, `EPSG:32613`) mapped to PROJ style parameter strings.
//! The [`projection`] module transforms coordinates between any two registered
//! CRSs, or ad hoc parameter strings, using:
//!
//! - the transverse Mercator projection, via the 6th order Krüger series of
//!   CFF Karney [Transverse Mercator with an accuracy of a few nanometers](https://arxiv.org/pdf/1002.1417.pdf);
//! - the Lambert Conformal Conic projection, from
//!   [IOGP Guidance Note 7-2](https://www.iogp.org/wp-content/uploads/2019/09/373-07-02.pdf).
//!
//! The [`utm`] module resolves the UTM zone and hemisphere of a position and
//! converts between geographic and UTM coordinates.
//! The [`round_trip`] module verifies those conversions.
//!
//! ## Distance and bearing
//!
//! The [`measures`] module calculates great circle distances and initial
//! bearings on a spherical Earth of radius 6,371 km.
//!
//! ## Magnetic declination
//!
//! The [`declination`] module estimates the magnetic declination at a position
//! and date, first from a curated table of regional values and otherwise from
//! a tilted dipole approximation of the Earth's magnetic field.
//! Every result records which of these produced it, see [`declination::Provenance`].
//!
//! It is **not** a replacement for a full spherical harmonic model such as
//! the WMM or IGRF: results should be verified against authoritative sources.
//!
//! ## Design
//!
//! Every operation is a pure function of its inputs and immutable tables.
//! The tables (CRS registry, regional declinations and reference stations)
//! are passed explicitly, with process wide defaults initialised lazily:
//! [`crs::CRS_REGISTRY`], [`declination::regional::REGIONAL_DECLINATIONS`] and
//! [`declination::reference::REFERENCE_STATIONS`].
//!
//! The library depends upon the following crates:
//!
//! - [angle-sc](https://crates.io/crates/angle-sc) - to define `Angle`,
//!   `Degrees` and `Radians` and perform trigonometric calculations;
//! - [unit-sphere](https://crates.io/crates/unit-sphere) - to define `LatLong`;
//! - [icao_units](https://crates.io/crates/icao-units) - to define `Metres` and
//!   `NauticalMiles` and perform conversions between them;
//! - [chrono](https://crates.io/crates/chrono) - to define calendar dates.

extern crate angle_sc;
extern crate icao_units;
extern crate unit_sphere;

pub mod config;
pub mod crs;
pub mod declination;
pub mod ellipsoid;
pub mod error;
pub mod measures;
pub mod projection;
pub mod round_trip;
pub mod utm;

pub use angle_sc::{Angle, Degrees, Radians, Validate};
pub use error::{AccuracyWarning, InputError, ProjectionError, ProjectionResult};
pub use icao_units::non_si::NauticalMiles;
pub use icao_units::si::Metres;
pub use unit_sphere::LatLong;

use ellipsoid::coefficients::{evaluate_coeffs_alpha, evaluate_coeffs_beta, SERIES_ORDER};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

/// A position on the Earth's surface: latitude and longitude in degrees.
///
/// A `GeographicPoint` is not range checked on construction, so that
/// validation functions can report out of range values.
/// Use [`GeographicPoint::try_new`] or [`Validate::is_valid`] to check it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeographicPoint {
    /// The latitude in degrees, [-90, 90].
    latitude: f64,
    /// The longitude in degrees, [-180, 180].
    longitude: f64,
}

impl GeographicPoint {
    /// Constructor.
    /// * `latitude` - the latitude in degrees.
    /// * `longitude` - the longitude in degrees.
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Construct a `GeographicPoint`, checking that it is in range.
    ///
    /// # Errors
    ///
    /// Returns the first `InputError` if the latitude or longitude is out of
    /// range or not finite.
    ///
    /// # Examples
    /// ```
    /// use wellsite_geo::{GeographicPoint, InputError};
    ///
    /// assert!(GeographicPoint::try_new(39.7392, -104.9903).is_ok());
    /// assert_eq!(
    ///     Err(InputError::LatitudeOutOfRange(95.0)),
    ///     GeographicPoint::try_new(95.0, 0.0)
    /// );
    /// ```
    pub fn try_new(latitude: f64, longitude: f64) -> Result<Self, InputError> {
        let point = Self::new(latitude, longitude);
        point
            .input_errors()
            .into_iter()
            .next()
            .map_or(Ok(point), Err)
    }

    /// The latitude in degrees.
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    /// The longitude in degrees.
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Every range problem with the point, empty if it is valid.
    #[must_use]
    pub fn input_errors(&self) -> Vec<InputError> {
        let mut errors = Vec::new();
        if !self.latitude.is_finite() {
            errors.push(InputError::NonFinite { name: "latitude" });
        } else if !(-90.0..=90.0).contains(&self.latitude) {
            errors.push(InputError::LatitudeOutOfRange(self.latitude));
        }
        if !self.longitude.is_finite() {
            errors.push(InputError::NonFinite { name: "longitude" });
        } else if !(-180.0..=180.0).contains(&self.longitude) {
            errors.push(InputError::LongitudeOutOfRange(self.longitude));
        }
        errors
    }
}

impl Validate for GeographicPoint {
    /// Test whether a `GeographicPoint` is valid.
    /// Whether -90° <= `latitude` <= 90° and -180° <= `longitude` <= 180°.
    fn is_valid(&self) -> bool {
        self.input_errors().is_empty()
    }
}

impl From<GeographicPoint> for LatLong {
    fn from(point: GeographicPoint) -> Self {
        Self::new(Degrees(point.latitude), Degrees(point.longitude))
    }
}

impl From<&LatLong> for GeographicPoint {
    fn from(lat_long: &LatLong) -> Self {
        Self::new(lat_long.lat().0, lat_long.lon().0)
    }
}

/// A pair of coordinates in a CRS.
///
/// Geographic coordinates are `x`: longitude and `y`: latitude in degrees,
/// projected coordinates are easting and northing in the units of the CRS.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub x: f64,
    pub y: f64,
}

impl Coordinates {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<&GeographicPoint> for Coordinates {
    fn from(point: &GeographicPoint) -> Self {
        Self::new(point.longitude, point.latitude)
    }
}

impl From<Coordinates> for GeographicPoint {
    fn from(coordinates: Coordinates) -> Self {
        Self::new(coordinates.y, coordinates.x)
    }
}

/// The parameters of an `Ellipsoid`, with the series coefficients
/// of the projections that use it.
#[derive(Clone, Debug, PartialEq)]
pub struct Ellipsoid {
    /// The Semimajor axis of the ellipsoid.
    a: Metres,
    /// The flattening of the ellipsoid, a ratio.
    f: f64,

    /// The Semiminor axis of the ellipsoid.
    b: Metres,
    /// The square of the Eccentricity of the ellipsoid.
    e_2: f64,
    /// The Eccentricity of the ellipsoid.
    e: f64,
    /// The third flattening of the ellipsoid.
    n: f64,
    /// The rectifying radius of the ellipsoid.
    rectifying_radius: Metres,

    /// The forward Krüger series `coefficients` of the ellipsoid.
    alpha: [f64; SERIES_ORDER],
    /// The inverse Krüger series `coefficients` of the ellipsoid.
    beta: [f64; SERIES_ORDER],
}

impl Ellipsoid {
    /// Constructor.
    /// * `a` - the Semimajor axis of the `Ellipsoid`.
    /// * `f` - the flattening of the `Ellipsoid`, a ratio.
    #[must_use]
    pub fn new(a: Metres, f: f64) -> Self {
        let e_2 = ellipsoid::calculate_sq_eccentricity(f);
        let n = ellipsoid::calculate_3rd_flattening(f);
        Self {
            a,
            f,
            b: ellipsoid::calculate_minor_axis(a, f),
            e_2,
            e: libm::sqrt(e_2),
            n,
            rectifying_radius: ellipsoid::calculate_rectifying_radius(a, n),
            alpha: evaluate_coeffs_alpha(n),
            beta: evaluate_coeffs_beta(n),
        }
    }

    /// Construct an `Ellipsoid` with the WGS-84 parameters.
    #[must_use]
    pub fn wgs84() -> Self {
        Self::new(ellipsoid::presets::wgs84::A, ellipsoid::presets::wgs84::F)
    }

    /// Construct an `Ellipsoid` with the GRS 80 parameters.
    #[must_use]
    pub fn grs80() -> Self {
        Self::new(ellipsoid::presets::grs80::A, ellipsoid::presets::grs80::F)
    }

    /// Construct an `Ellipsoid` with the Clarke 1866 parameters.
    #[must_use]
    pub fn clarke1866() -> Self {
        Self::new(
            ellipsoid::presets::clarke1866::A,
            ellipsoid::presets::clarke1866::F,
        )
    }

    /// Construct a named `Ellipsoid` from its PROJ `+ellps` name.
    /// * `name` - `WGS84`, `GRS80` or `clrk66`.
    ///
    /// returns None if the name is not recognised.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "WGS84" => Some(Self::wgs84()),
            "GRS80" => Some(Self::grs80()),
            "clrk66" => Some(Self::clarke1866()),
            _ => None,
        }
    }

    /// The Semimajor axis of the ellipsoid.
    #[must_use]
    pub const fn a(&self) -> Metres {
        self.a
    }

    /// The flattening of the ellipsoid, a ratio.
    #[must_use]
    pub const fn f(&self) -> f64 {
        self.f
    }

    /// The Semiminor axis of the ellipsoid.
    #[must_use]
    pub const fn b(&self) -> Metres {
        self.b
    }

    /// The square of the Eccentricity of the ellipsoid.
    #[must_use]
    pub const fn e_2(&self) -> f64 {
        self.e_2
    }

    /// The Eccentricity of the ellipsoid.
    #[must_use]
    pub const fn e(&self) -> f64 {
        self.e
    }

    /// The third flattening of the ellipsoid.
    #[must_use]
    pub const fn n(&self) -> f64 {
        self.n
    }

    /// The rectifying radius of the ellipsoid.
    #[must_use]
    pub const fn rectifying_radius(&self) -> Metres {
        self.rectifying_radius
    }

    /// The forward Krüger series coefficients.
    #[must_use]
    pub const fn alpha(&self) -> &[f64; SERIES_ORDER] {
        &self.alpha
    }

    /// The inverse Krüger series coefficients.
    #[must_use]
    pub const fn beta(&self) -> &[f64; SERIES_ORDER] {
        &self.beta
    }
}

lazy_static! {
    /// A static instance of the WGS-84 `Ellipsoid`.
    pub static ref WGS84_ELLIPSOID: Ellipsoid = Ellipsoid::wgs84();
}
