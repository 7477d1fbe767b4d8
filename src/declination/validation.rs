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

//! Validation of declination requests.
//!
//! Errors make a request invalid; warnings reduce the confidence of the
//! estimate but the request may still be estimated.

use super::{DeclinationRequest, MIN_ELEVATION};
use crate::config::DeclinationConfig;
use crate::{AccuracyWarning, InputError};
use chrono::{Datelike, Months, NaiveDate, Utc};

/// The result of validating a `DeclinationRequest`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RequestValidation {
    pub errors: Vec<InputError>,
    pub warnings: Vec<AccuracyWarning>,
}

impl RequestValidation {
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// The range of dates accepted by request validation: from the start of
/// `config.min_year` to `config.max_future_years` after today.
/// * `config` - the estimator parameters.
/// * `today` - the current date.
#[must_use]
pub fn date_range(config: &DeclinationConfig, today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let min = NaiveDate::from_ymd_opt(config.min_year, 1, 1).unwrap_or(NaiveDate::MIN);
    let months = u32::try_from(config.max_future_years)
        .unwrap_or(0)
        .saturating_mul(12);
    let max = today
        .checked_add_months(Months::new(months))
        .unwrap_or(NaiveDate::MAX);
    (min, max)
}

/// The accuracy warnings of a request.
/// * `request` - the position, date and elevation.
/// * `config` - the estimator parameters.
/// * `today` - the current date.
#[must_use]
pub fn accuracy_warnings(
    request: &DeclinationRequest,
    config: &DeclinationConfig,
    today: NaiveDate,
) -> Vec<AccuracyWarning> {
    let mut warnings = Vec::new();

    let latitude = request.location.latitude();
    if latitude.abs() > config.near_pole_latitude && latitude.abs() <= 90.0 {
        warnings.push(AccuracyWarning::NearPole {
            latitude,
            threshold: config.near_pole_latitude,
        });
    }

    let year = request.date.year();
    if year < config.reliable_year {
        warnings.push(AccuracyWarning::PreReliableEpoch {
            year,
            reliable_year: config.reliable_year,
        });
    }

    if request.date > today {
        warnings.push(AccuracyWarning::FutureDate { date: request.date });
    }

    warnings
}

/// Validate a request.
/// * `request` - the position, date and elevation.
/// * `config` - the estimator parameters.
/// * `today` - the current date.
#[must_use]
pub fn validate_declination_request_at(
    request: &DeclinationRequest,
    config: &DeclinationConfig,
    today: NaiveDate,
) -> RequestValidation {
    let mut errors = request.location.input_errors();
    if !request.elevation.0.is_finite() {
        errors.push(InputError::NonFinite { name: "elevation" });
    } else if request.elevation.0 < MIN_ELEVATION.0 {
        errors.push(InputError::ElevationOutOfRange {
            elevation: request.elevation.0,
            min: MIN_ELEVATION.0,
        });
    }

    let (min, max) = date_range(config, today);
    if !(min..=max).contains(&request.date) {
        errors.push(InputError::DateOutOfRange {
            date: request.date,
            min,
            max,
        });
    }

    RequestValidation {
        errors,
        warnings: accuracy_warnings(request, config, today),
    }
}

/// Validate a request with the default configuration, relative to today (UTC).
/// * `request` - the position, date and elevation.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use wellsite_geo::{GeographicPoint, InputError};
/// use wellsite_geo::declination::DeclinationRequest;
/// use wellsite_geo::declination::validation::validate_declination_request;
///
/// let date = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
/// let result = validate_declination_request(&DeclinationRequest::new(GeographicPoint::new(95.0, 0.0), date));
/// assert!(!result.is_valid());
/// assert_eq!(vec![InputError::LatitudeOutOfRange(95.0)], result.errors);
/// ```
#[must_use]
pub fn validate_declination_request(request: &DeclinationRequest) -> RequestValidation {
    validate_declination_request_at(
        request,
        &DeclinationConfig::default(),
        Utc::now().date_naive(),
    )
}
