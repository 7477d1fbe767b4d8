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

//! The config module contains the empirically chosen constants of the
//! declination estimator and the reference validator.
//!
//! Both configurations can be deserialized with missing fields taking
//! their default values, e.g. from a JSON fragment:
//! ```
//! use wellsite_geo::config::ReferenceConfig;
//!
//! let config: ReferenceConfig = serde_json::from_str(r#"{ "tolerance": 2.0 }"#).unwrap();
//! assert_eq!(2.0, config.tolerance);
//! assert_eq!(45.0, config.implausible_declination);
//! ```

use serde::{Deserialize, Serialize};

/// The parameters of the declination estimator.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeclinationConfig {
    /// The latitude of the geomagnetic North pole in degrees, IGRF-13 epoch 2020.
    pub dipole_pole_latitude: f64,
    /// The longitude of the geomagnetic North pole in degrees, IGRF-13 epoch 2020.
    pub dipole_pole_longitude: f64,
    /// The epoch of the dipole pole position, a decimal year.
    pub dipole_epoch: f64,
    /// The equatorial field strength of the dipole in nanoteslas.
    pub equatorial_field: f64,
    /// The declination change per metre of elevation, degrees.
    pub elevation_correction: f64,
    /// The accuracy of the dipole approximation, ± degrees.
    pub dipole_accuracy: f64,
    /// The error bound of a regional lookup value, ± degrees.
    pub regional_error_bound: f64,
    /// The absolute latitude above which results are flagged as near pole.
    pub near_pole_latitude: f64,
    /// The earliest year with reliable regional data.
    pub reliable_year: i32,
    /// The earliest year accepted by request validation.
    pub min_year: i32,
    /// The number of years after today accepted by request validation.
    pub max_future_years: i32,
}

impl Default for DeclinationConfig {
    fn default() -> Self {
        Self {
            dipole_pole_latitude: 80.65,
            dipole_pole_longitude: -72.68,
            dipole_epoch: 2020.0,
            equatorial_field: 30_000.0,
            elevation_correction: 1e-5,
            dipole_accuracy: 4.0,
            regional_error_bound: 1.5,
            near_pole_latitude: 80.0,
            reliable_year: 2015,
            min_year: 1900,
            max_future_years: 5,
        }
    }
}

/// The parameters of the reference station validator.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceConfig {
    /// The minimum comparison tolerance in degrees; a station's own
    /// tolerance is used if it is larger.
    pub tolerance: f64,
    /// The maximum distance to a reference station in degrees of latitude
    /// and longitude.
    pub max_station_distance: f64,
    /// The absolute declination in degrees above which a result is flagged
    /// as implausible.
    pub implausible_declination: f64,
}

impl Default for ReferenceConfig {
    fn default() -> Self {
        Self {
            tolerance: 5.0,
            max_station_distance: 5.0,
            implausible_declination: 45.0,
        }
    }
}

impl ReferenceConfig {
    /// A `ReferenceConfig` with the given comparison tolerance.
    #[must_use]
    pub fn with_tolerance(tolerance: f64) -> Self {
        Self {
            tolerance,
            ..Self::default()
        }
    }
}
