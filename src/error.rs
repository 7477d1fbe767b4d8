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

//! The error types of the crate.
//!
//! Projection failures are errors, returned as `ProjectionError`.
//! Out of range inputs are reported as `InputError` values collected by the
//! validation functions, so that a caller can see every problem at once.
//! Low confidence results are not errors: they are flagged with
//! `AccuracyWarning`s that must be shown to the user.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The result of a projection operation.
pub type ProjectionResult<T> = Result<T, ProjectionError>;

/// A failure to parse CRS parameters or to perform a transform.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ProjectionError {
    /// The parameter string has no `+proj` entry.
    #[error("missing +proj in CRS parameters: '{parameters}'")]
    MissingProjection { parameters: String },

    /// The `+proj` entry names an unsupported projection.
    #[error("unknown projection '{name}' in CRS parameters: '{parameters}'")]
    UnknownProjection { name: String, parameters: String },

    /// A parameter value could not be parsed or is out of range.
    #[error("invalid parameter '{key}={value}' in CRS parameters: '{parameters}'")]
    InvalidParameter {
        key: String,
        value: String,
        parameters: String,
    },

    /// A parameter value is recognised but not supported, e.g. an unknown datum.
    #[error("unsupported parameter '{key}={value}' in CRS parameters: '{parameters}'")]
    UnsupportedParameter {
        key: String,
        value: String,
        parameters: String,
    },

    /// The transform is mathematically undefined at the point,
    /// e.g. a projection singularity.
    #[error("transform undefined at ({x}, {y}) from '{from}' to '{to}': {reason}")]
    Undefined {
        x: f64,
        y: f64,
        from: String,
        to: String,
        reason: String,
    },
}

impl ProjectionError {
    #[must_use]
    pub fn invalid_parameter(
        key: impl Into<String>,
        value: impl Into<String>,
        parameters: impl Into<String>,
    ) -> Self {
        Self::InvalidParameter {
            key: key.into(),
            value: value.into(),
            parameters: parameters.into(),
        }
    }

    #[must_use]
    pub fn unsupported_parameter(
        key: impl Into<String>,
        value: impl Into<String>,
        parameters: impl Into<String>,
    ) -> Self {
        Self::UnsupportedParameter {
            key: key.into(),
            value: value.into(),
            parameters: parameters.into(),
        }
    }

    /// The CRS parameter strings that caused the error.
    #[must_use]
    pub fn parameters(&self) -> Vec<&str> {
        match self {
            Self::MissingProjection { parameters }
            | Self::UnknownProjection { parameters, .. }
            | Self::InvalidParameter { parameters, .. }
            | Self::UnsupportedParameter { parameters, .. } => vec![parameters.as_str()],
            Self::Undefined { from, to, .. } => vec![from.as_str(), to.as_str()],
        }
    }
}

/// An out of range or malformed input value.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum InputError {
    #[error("latitude {0} is outside the range [-90, 90] degrees")]
    LatitudeOutOfRange(f64),

    #[error("longitude {0} is outside the range [-180, 180] degrees")]
    LongitudeOutOfRange(f64),

    #[error("{name} is not a finite number")]
    NonFinite { name: &'static str },

    #[error("date {date} is outside the range [{min}, {max}]")]
    DateOutOfRange {
        date: NaiveDate,
        min: NaiveDate,
        max: NaiveDate,
    },

    #[error("tolerance {0} must be a non-negative number")]
    InvalidTolerance(f64),

    #[error("elevation {elevation} m is below the minimum of {min} m")]
    ElevationOutOfRange { elevation: f64, min: f64 },
}

/// A reason to treat a declination value with less confidence.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum AccuracyWarning {
    /// The position is close to a pole, where declination changes rapidly.
    NearPole { latitude: f64, threshold: f64 },
    /// The date is before the earliest year with reliable regional data.
    PreReliableEpoch { year: i32, reliable_year: i32 },
    /// The date is in the future, so secular variation is extrapolated.
    FutureDate { date: NaiveDate },
    /// The value was calculated by the dipole approximation.
    DipoleApproximation { accuracy: f64 },
    /// The value must be checked against a full field model before use.
    VerifyAgainstAuthoritativeSources,
    /// The declination is larger than expected for most populated regions.
    ImplausibleDeclination { declination: f64, threshold: f64 },
    /// The declination differs from the nearest reference station.
    ReferenceDeviation {
        station: String,
        difference: f64,
        tolerance: f64,
    },
}

impl core::fmt::Display for AccuracyWarning {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NearPole {
                latitude,
                threshold,
            } => write!(
                f,
                "latitude {latitude} is beyond {threshold} degrees: declination accuracy is reduced near the poles"
            ),
            Self::PreReliableEpoch {
                year,
                reliable_year,
            } => write!(
                f,
                "year {year} is before {reliable_year}: declination accuracy is reduced"
            ),
            Self::FutureDate { date } => write!(
                f,
                "date {date} is in the future: declination is extrapolated"
            ),
            Self::DipoleApproximation { accuracy } => write!(
                f,
                "declination from a dipole approximation, accuracy about ±{accuracy} degrees"
            ),
            Self::VerifyAgainstAuthoritativeSources => f.write_str(
                "approximate declination: verify against authoritative sources (WMM/IGRF) before use",
            ),
            Self::ImplausibleDeclination {
                declination,
                threshold,
            } => write!(
                f,
                "declination {declination:.2} degrees exceeds ±{threshold} degrees: implausible for most populated regions"
            ),
            Self::ReferenceDeviation {
                station,
                difference,
                tolerance,
            } => write!(
                f,
                "declination differs from reference station {station} by {difference:.2} degrees, tolerance {tolerance} degrees"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_projection_error_parameters() {
        let error = ProjectionError::invalid_parameter("zone", "61", "+proj=utm +zone=61");
        assert_eq!(vec!["+proj=utm +zone=61"], error.parameters());
        assert_eq!(
            "invalid parameter 'zone=61' in CRS parameters: '+proj=utm +zone=61'",
            error.to_string()
        );

        let error = ProjectionError::Undefined {
            x: 0.0,
            y: -90.0,
            from: "EPSG:4326".to_owned(),
            to: "+proj=lcc +lat_1=49 +lat_2=77".to_owned(),
            reason: "pole".to_owned(),
        };
        assert_eq!(
            vec!["EPSG:4326", "+proj=lcc +lat_1=49 +lat_2=77"],
            error.parameters()
        );
    }

    #[test]
    fn test_input_error_display() {
        assert_eq!(
            "latitude 95 is outside the range [-90, 90] degrees",
            InputError::LatitudeOutOfRange(95.0).to_string()
        );
        assert_eq!(
            "longitude is not a finite number",
            InputError::NonFinite { name: "longitude" }.to_string()
        );
        assert_eq!(
            "elevation -6371000 m is below the minimum of -100000 m",
            InputError::ElevationOutOfRange {
                elevation: -6_371_000.0,
                min: -100_000.0
            }
            .to_string()
        );
    }

    #[test]
    fn test_accuracy_warning_display() {
        let warning = AccuracyWarning::ReferenceDeviation {
            station: "Denver".to_owned(),
            difference: 2.5,
            tolerance: 2.0,
        };
        assert_eq!(
            "declination differs from reference station Denver by 2.50 degrees, tolerance 2 degrees",
            warning.to_string()
        );
        assert!(AccuracyWarning::VerifyAgainstAuthoritativeSources
            .to_string()
            .contains("authoritative"));
    }
}
