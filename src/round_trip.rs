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

//! The round_trip module verifies UTM conversions by transforming a point
//! to UTM and back and comparing the result with the original point.
//!
//! A battery of named locations covering both hemispheres, both ends of the
//! UTM zone range, the equator and high latitudes is provided as a
//! regression fixture, see [`SELF_TEST_LOCATIONS`].

use crate::error::{InputError, ProjectionError};
use crate::utm::{Hemisphere, UtmPoint, UtmResolver, MAX_ZONE, MIN_ZONE};
use crate::GeographicPoint;
use serde::Serialize;
use thiserror::Error;

/// The default round trip tolerance in degrees.
pub const DEFAULT_TOLERANCE: f64 = 1e-6;

/// A reason that a round trip failed, other than exceeding the tolerance.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum RoundTripIssue {
    #[error("invalid input: {0}")]
    Input(#[from] InputError),

    #[error("projection failed: {0}")]
    Projection(#[from] ProjectionError),

    #[error("UTM zone {0} is outside the range [1, 60]")]
    ZoneOutOfRange(u8),

    #[error("hemisphere {hemisphere} is inconsistent with latitude {latitude}")]
    HemisphereMismatch {
        latitude: f64,
        hemisphere: Hemisphere,
    },
}

/// The result of a round trip validation.
#[derive(Clone, Debug, PartialEq)]
pub struct RoundTripReport {
    /// The tolerance in degrees.
    pub tolerance: f64,
    pub errors: Vec<RoundTripIssue>,
    /// The UTM coordinates of the point, `None` if the input was rejected
    /// or the forward transform failed.
    pub utm: Option<UtmPoint>,
    /// The point after the inverse transform.
    pub round_trip: Option<GeographicPoint>,
    /// The absolute latitude difference in degrees.
    pub delta_latitude: Option<f64>,
    /// The absolute longitude difference in degrees, across the antimeridian
    /// where necessary. Zero at a pole.
    pub delta_longitude: Option<f64>,
}

impl RoundTripReport {
    const fn rejected(tolerance: f64, errors: Vec<RoundTripIssue>) -> Self {
        Self {
            tolerance,
            errors,
            utm: None,
            round_trip: None,
            delta_latitude: None,
            delta_longitude: None,
        }
    }

    /// Whether there are no errors and both deltas are within tolerance.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
            && matches!(
                (self.delta_latitude, self.delta_longitude),
                (Some(dlat), Some(dlon)) if dlat <= self.tolerance && dlon <= self.tolerance
            )
    }
}

/// The absolute difference between two longitudes in degrees, in [0, 180].
#[must_use]
pub fn longitude_difference(a: f64, b: f64) -> f64 {
    let delta = (a - b).abs() % 360.0;
    delta.min(360.0 - delta)
}

/// The UTM invariants that a forward transform of `point` must satisfy:
/// the zone is in [1, 60] and the hemisphere matches the sign of the latitude.
fn invariant_errors(point: &GeographicPoint, utm: &UtmPoint) -> Vec<RoundTripIssue> {
    let mut errors = Vec::new();
    if !(MIN_ZONE..=MAX_ZONE).contains(&utm.zone()) {
        errors.push(RoundTripIssue::ZoneOutOfRange(utm.zone()));
    }
    if utm.hemisphere() != Hemisphere::of_latitude(point.latitude()) {
        errors.push(RoundTripIssue::HemisphereMismatch {
            latitude: point.latitude(),
            hemisphere: utm.hemisphere(),
        });
    }
    errors
}

/// Validates UTM round trips against a tolerance.
#[derive(Clone, Copy, Debug)]
pub struct RoundTripValidator<'a> {
    resolver: UtmResolver<'a>,
    tolerance: f64,
}

impl Default for RoundTripValidator<'static> {
    fn default() -> Self {
        Self::new(UtmResolver::default(), DEFAULT_TOLERANCE)
    }
}

impl<'a> RoundTripValidator<'a> {
    /// Constructor.
    /// * `resolver` - the UTM resolver to validate.
    /// * `tolerance` - the maximum difference in degrees in either axis.
    #[must_use]
    pub const fn new(resolver: UtmResolver<'a>, tolerance: f64) -> Self {
        Self {
            resolver,
            tolerance,
        }
    }

    #[must_use]
    pub const fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Transform a point to UTM and back and compare the result with the point.
    ///
    /// An out of range point is rejected without attempting a transform.
    /// Failures are reported in the returned `RoundTripReport`.
    /// * `point` - the geographic point.
    #[must_use]
    pub fn validate(&self, point: &GeographicPoint) -> RoundTripReport {
        let mut errors: Vec<RoundTripIssue> = point
            .input_errors()
            .into_iter()
            .map(RoundTripIssue::from)
            .collect();
        if !(self.tolerance.is_finite() && self.tolerance >= 0.0) {
            errors.push(InputError::InvalidTolerance(self.tolerance).into());
        }
        if !errors.is_empty() {
            return RoundTripReport::rejected(self.tolerance, errors);
        }

        let utm = match self.resolver.lat_lon_to_utm(point) {
            Ok(utm) => utm,
            Err(error) => {
                tracing::warn!(%error, "round trip forward transform failed");
                return RoundTripReport::rejected(self.tolerance, vec![error.into()]);
            }
        };

        let mut report = RoundTripReport {
            tolerance: self.tolerance,
            errors: invariant_errors(point, &utm),
            utm: Some(utm),
            round_trip: None,
            delta_latitude: None,
            delta_longitude: None,
        };
        match self.resolver.utm_to_lat_lon(&utm) {
            Ok(result) => {
                report.delta_latitude = Some((result.latitude() - point.latitude()).abs());
                // every longitude names the same point at a pole
                report.delta_longitude = if point.latitude().abs() == 90.0 {
                    Some(0.0)
                } else {
                    Some(longitude_difference(result.longitude(), point.longitude()))
                };
                report.round_trip = Some(result);
            }
            Err(error) => report.errors.push(error.into()),
        }

        if !report.is_valid() {
            tracing::warn!(
                latitude = point.latitude(),
                longitude = point.longitude(),
                delta_latitude = report.delta_latitude,
                delta_longitude = report.delta_longitude,
                errors = report.errors.len(),
                "round trip validation failed"
            );
        }
        report
    }

    /// Validate every location in `SELF_TEST_LOCATIONS`.
    #[must_use]
    pub fn run_self_tests(&self) -> Vec<SelfTestResult> {
        SELF_TEST_LOCATIONS
            .iter()
            .map(|location| SelfTestResult {
                name: location.name,
                report: self.validate(&location.point),
            })
            .collect()
    }
}

/// Transform a point to UTM and back using the standard CRS registry.
/// * `point` - the geographic point.
/// * `tolerance` - the maximum difference in degrees in either axis.
///
/// # Examples
/// ```
/// use wellsite_geo::GeographicPoint;
/// use wellsite_geo::round_trip::{validate_round_trip, DEFAULT_TOLERANCE};
///
/// let report = validate_round_trip(&GeographicPoint::new(32.0, -102.0), DEFAULT_TOLERANCE);
/// assert!(report.is_valid());
/// assert_eq!(14, report.utm.unwrap().zone());
///
/// let report = validate_round_trip(&GeographicPoint::new(95.0, -102.0), DEFAULT_TOLERANCE);
/// assert!(!report.is_valid());
/// assert!(report.utm.is_none());
/// ```
#[must_use]
pub fn validate_round_trip(point: &GeographicPoint, tolerance: f64) -> RoundTripReport {
    RoundTripValidator::new(UtmResolver::default(), tolerance).validate(point)
}

/// A named location used to check the UTM conversions.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SelfTestLocation {
    pub name: &'static str,
    pub point: GeographicPoint,
}

/// The round trip fixture locations.
pub const SELF_TEST_LOCATIONS: [SelfTestLocation; 9] = [
    SelfTestLocation {
        name: "Permian Basin",
        point: GeographicPoint::new(32.0, -102.0),
    },
    SelfTestLocation {
        name: "Williston Basin",
        point: GeographicPoint::new(48.0, -103.0),
    },
    SelfTestLocation {
        name: "North Sea",
        point: GeographicPoint::new(60.0, 2.0),
    },
    SelfTestLocation {
        name: "Campos Basin",
        point: GeographicPoint::new(-22.0, -40.0),
    },
    SelfTestLocation {
        name: "Zone 1 equator",
        point: GeographicPoint::new(0.0, -177.0),
    },
    SelfTestLocation {
        name: "Zone 60 equator",
        point: GeographicPoint::new(0.0, 177.0),
    },
    SelfTestLocation {
        name: "Null Island",
        point: GeographicPoint::new(0.0, 0.0),
    },
    SelfTestLocation {
        name: "High Arctic",
        point: GeographicPoint::new(80.0, 0.0),
    },
    SelfTestLocation {
        name: "Antarctic",
        point: GeographicPoint::new(-80.0, 0.0),
    },
];

/// The round trip report of a self test location.
#[derive(Clone, Debug, PartialEq)]
pub struct SelfTestResult {
    pub name: &'static str,
    pub report: RoundTripReport,
}

/// Validate every location in `SELF_TEST_LOCATIONS` using the standard CRS
/// registry and the default tolerance.
#[must_use]
pub fn run_self_tests() -> Vec<SelfTestResult> {
    RoundTripValidator::default().run_self_tests()
}
