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

//! Validation of declination results against reference stations: places
//! where the declination is known.
//!
//! A result is compared with the nearest station, by plain distance in
//! degrees of latitude and longitude, if that station is close enough.
//! The stations are only used to validate results, never to estimate them.

use super::DeclinationResult;
use crate::config::ReferenceConfig;
use crate::{AccuracyWarning, GeographicPoint};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

/// A place where the declination is known.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReferenceStation {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// The expected declination in degrees, positive east.
    pub expected_declination: f64,
    /// The tolerance of the expected declination in degrees.
    pub tolerance: f64,
}

impl ReferenceStation {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        latitude: f64,
        longitude: f64,
        expected_declination: f64,
        tolerance: f64,
    ) -> Self {
        Self {
            name: name.into(),
            latitude,
            longitude,
            expected_declination,
            tolerance,
        }
    }

    /// The distance from the station to a position in degrees, treating
    /// latitude and longitude as plane coordinates.
    #[must_use]
    pub fn distance_degrees(&self, point: &GeographicPoint) -> f64 {
        libm::hypot(
            point.latitude() - self.latitude,
            point.longitude() - self.longitude,
        )
    }
}

lazy_static! {
    /// The standard reference stations.
    pub static ref REFERENCE_STATIONS: Vec<ReferenceStation> = vec![
        ReferenceStation::new("Denver", 39.7392, -104.9903, 8.23, 2.0),
        ReferenceStation::new("Houston", 29.7604, -95.3698, 2.5, 2.0),
        ReferenceStation::new("Midland", 31.9973, -102.0779, 6.8, 2.0),
        ReferenceStation::new("Williston", 48.147, -103.618, 7.5, 2.0),
        ReferenceStation::new("Calgary", 51.0447, -114.0719, 14.3, 2.0),
        ReferenceStation::new("Aberdeen", 57.1497, -2.0943, -2.0, 2.0),
        ReferenceStation::new("Rio de Janeiro", -22.9068, -43.1729, -23.0, 2.0),
    ];
}

/// Find the station nearest to a position.
/// * `stations` - the reference stations.
/// * `point` - the position.
///
/// returns the nearest station and its distance in degrees, or `None` if
/// there are no stations.
#[must_use]
pub fn nearest_station<'a>(
    stations: &'a [ReferenceStation],
    point: &GeographicPoint,
) -> Option<(&'a ReferenceStation, f64)> {
    stations
        .iter()
        .map(|station| (station, station.distance_degrees(point)))
        .min_by(|a, b| a.1.total_cmp(&b.1))
}

/// The comparison of a result with a reference station.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ReferenceComparison {
    pub station: String,
    pub expected: f64,
    pub actual: f64,
    /// The absolute difference between `actual` and `expected` in degrees.
    pub difference: f64,
    /// The larger of the station tolerance and the requested tolerance.
    pub tolerance_used: f64,
    /// The distance to the station in degrees.
    pub distance: f64,
    pub within_tolerance: bool,
}

/// The result of validating a `DeclinationResult` against reference stations.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ReferenceValidation {
    pub warnings: Vec<AccuracyWarning>,
    /// The comparison with the nearest station, `None` if no station is
    /// close enough.
    pub reference_comparison: Option<ReferenceComparison>,
}

impl ReferenceValidation {
    /// Whether the result is within tolerance of the nearest station, or
    /// there is no station to compare with.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.reference_comparison
            .as_ref()
            .map_or(true, |comparison| comparison.within_tolerance)
    }
}

/// Validates declination results against reference stations.
#[derive(Clone, Debug)]
pub struct ReferenceValidator<'a> {
    stations: &'a [ReferenceStation],
    config: ReferenceConfig,
}

impl Default for ReferenceValidator<'static> {
    fn default() -> Self {
        Self::new(&REFERENCE_STATIONS, ReferenceConfig::default())
    }
}

impl<'a> ReferenceValidator<'a> {
    /// Constructor.
    /// * `stations` - the reference stations.
    /// * `config` - the validation parameters.
    #[must_use]
    pub const fn new(stations: &'a [ReferenceStation], config: ReferenceConfig) -> Self {
        Self { stations, config }
    }

    #[must_use]
    pub const fn config(&self) -> &ReferenceConfig {
        &self.config
    }

    /// Compare a result with the nearest reference station and check it
    /// for implausible values.
    /// * `result` - the declination result.
    #[must_use]
    pub fn validate(&self, result: &DeclinationResult) -> ReferenceValidation {
        let mut warnings = Vec::new();

        let reference_comparison = nearest_station(self.stations, &result.location)
            .filter(|(_, distance)| *distance <= self.config.max_station_distance)
            .map(|(station, distance)| {
                let difference = (result.declination - station.expected_declination).abs();
                let tolerance_used = station.tolerance.max(self.config.tolerance);
                let within_tolerance = difference <= tolerance_used;
                if !within_tolerance {
                    tracing::warn!(
                        station = station.name.as_str(),
                        declination = result.declination,
                        expected = station.expected_declination,
                        difference,
                        "declination differs from reference station"
                    );
                    warnings.push(AccuracyWarning::ReferenceDeviation {
                        station: station.name.clone(),
                        difference,
                        tolerance: tolerance_used,
                    });
                }
                ReferenceComparison {
                    station: station.name.clone(),
                    expected: station.expected_declination,
                    actual: result.declination,
                    difference,
                    tolerance_used,
                    distance,
                    within_tolerance,
                }
            });

        if result.declination.abs() > self.config.implausible_declination {
            warnings.push(AccuracyWarning::ImplausibleDeclination {
                declination: result.declination,
                threshold: self.config.implausible_declination,
            });
        }
        if result.provenance.is_approximation() {
            warnings.push(AccuracyWarning::VerifyAgainstAuthoritativeSources);
        }

        ReferenceValidation {
            warnings,
            reference_comparison,
        }
    }
}

/// Validate a result against the standard reference stations.
/// * `result` - the declination result.
/// * `tolerance` - the minimum comparison tolerance in degrees,
///   `ReferenceConfig::default().tolerance` is 5.0.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use wellsite_geo::GeographicPoint;
/// use wellsite_geo::declination::{estimate, DeclinationRequest};
/// use wellsite_geo::declination::reference::validate_against_references;
///
/// let date = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
/// let result = estimate(&DeclinationRequest::new(GeographicPoint::new(39.7392, -104.9903), date));
/// let validation = validate_against_references(&result, 2.0);
/// assert!(validation.is_valid());
/// assert_eq!("Denver", validation.reference_comparison.unwrap().station);
/// ```
#[must_use]
pub fn validate_against_references(result: &DeclinationResult, tolerance: f64) -> ReferenceValidation {
    ReferenceValidator::new(&REFERENCE_STATIONS, ReferenceConfig::with_tolerance(tolerance))
        .validate(result)
}
