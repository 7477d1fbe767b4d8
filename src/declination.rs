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

//! The declination module estimates the magnetic declination, the angle
//! between magnetic north and true north, at a position and date.
//!
//! The estimate is calculated by one of two methods:
//!
//! 1. a lookup in an ordered table of regional declinations, see
//!    [`regional`]; the first region that contains the position is used.
//! 2. otherwise a tilted dipole approximation of the Earth's magnetic field,
//!    see [`dipole`].
//!
//! Both apply a coarse secular variation, see [`secular_variation`].
//! The method is recorded in the result as a [`Provenance`], so that callers
//! can distinguish a curated value from a modelled approximation.
//!
//! Requests should be checked with [`validation::validate_declination_request`]
//! before estimation. Estimation itself never fails on finite input: low
//! confidence is reported as [`AccuracyWarning`]s in the result.
//!
//! Results can be compared with nearby reference stations using
//! [`reference::validate_against_references`].

pub mod dipole;
pub mod reference;
pub mod regional;
pub mod validation;

use crate::config::DeclinationConfig;
use crate::measures::normalise_bearing;
use crate::{AccuracyWarning, GeographicPoint, Metres};
use chrono::{Datelike, NaiveDate, Utc};
use regional::{RegionalDeclinationEntry, REGIONAL_DECLINATIONS};
use serde::{Deserialize, Serialize};

/// The lowest elevation accepted by a request, near the base of the
/// lithosphere.
pub const MIN_ELEVATION: Metres = Metres(-100_000.0);

/// A request for the magnetic declination at a position and date.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DeclinationRequest {
    pub location: GeographicPoint,
    pub date: NaiveDate,
    /// The elevation above mean sea level.
    pub elevation: Metres,
}

impl DeclinationRequest {
    /// A request at sea level.
    /// * `location` - the position.
    /// * `date` - the date of the declination.
    #[must_use]
    pub const fn new(location: GeographicPoint, date: NaiveDate) -> Self {
        Self {
            location,
            date,
            elevation: Metres(0.0),
        }
    }

    #[must_use]
    pub const fn with_elevation(self, elevation: Metres) -> Self {
        Self { elevation, ..self }
    }
}

/// The method used to calculate a `DeclinationResult`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Provenance {
    /// A value from the regional declination table.
    RegionalLookup {
        region: String,
        /// The error bound of the value, ± degrees.
        error_bound: f64,
    },
    /// A value from the dipole approximation.
    DipoleApproximation {
        /// The accuracy of the value, ± degrees.
        accuracy: f64,
    },
}

impl Provenance {
    /// A description of the model that produced the value.
    ///
    /// # Examples
    /// ```
    /// use wellsite_geo::declination::Provenance;
    ///
    /// let provenance = Provenance::RegionalLookup { region: "Permian Basin".to_owned(), error_bound: 1.5 };
    /// assert_eq!("Regional lookup: Permian Basin (±1.5°)", provenance.model_name());
    /// ```
    #[must_use]
    pub fn model_name(&self) -> String {
        match self {
            Self::RegionalLookup {
                region,
                error_bound,
            } => format!("Regional lookup: {region} (±{error_bound}°)"),
            Self::DipoleApproximation { accuracy } => {
                format!("Tilted dipole approximation (±{accuracy}°, low accuracy)")
            }
        }
    }

    /// A short tag of the method.
    #[must_use]
    pub const fn source_tag(&self) -> &'static str {
        match self {
            Self::RegionalLookup { .. } => "regional_lookup",
            Self::DipoleApproximation { .. } => "dipole_approximation",
        }
    }

    /// Whether the value is a low accuracy approximation.
    #[must_use]
    pub const fn is_approximation(&self) -> bool {
        matches!(self, Self::DipoleApproximation { .. })
    }
}

/// The coarse category of the source of a declination value stored with a
/// well record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclinationSource {
    /// From the World Magnetic Model or a curated lookup.
    Wmm,
    /// From the International Geomagnetic Reference Field.
    Igrf,
    /// Entered manually.
    Manual,
}

impl DeclinationSource {
    /// Categorise a model description.
    /// * `model` - the model description, see `Provenance::model_name`.
    ///
    /// returns `Wmm` if the model names the WMM or a lookup, `Igrf` if it
    /// names the IGRF, otherwise `Manual`.
    /// The dipole approximation names neither, so it is `Manual`.
    ///
    /// # Examples
    /// ```
    /// use wellsite_geo::declination::DeclinationSource;
    ///
    /// assert_eq!(DeclinationSource::Wmm, DeclinationSource::from_model("WMM2020"));
    /// assert_eq!(DeclinationSource::Igrf, DeclinationSource::from_model("IGRF-13"));
    /// assert_eq!(DeclinationSource::Manual, DeclinationSource::from_model("compass"));
    /// ```
    #[must_use]
    pub fn from_model(model: &str) -> Self {
        let model = model.to_ascii_lowercase();
        if model.contains("wmm") || model.contains("lookup") {
            Self::Wmm
        } else if model.contains("igrf") {
            Self::Igrf
        } else {
            Self::Manual
        }
    }
}

impl From<&Provenance> for DeclinationSource {
    fn from(provenance: &Provenance) -> Self {
        match provenance {
            Provenance::RegionalLookup { .. } => Self::Wmm,
            Provenance::DipoleApproximation { .. } => Self::Manual,
        }
    }
}

impl core::fmt::Display for DeclinationSource {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            Self::Wmm => "wmm",
            Self::Igrf => "igrf",
            Self::Manual => "manual",
        })
    }
}

/// The estimated magnetic field at a position and date.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DeclinationResult {
    /// The declination in degrees, positive east of true north.
    pub declination: f64,
    /// The inclination (dip) in degrees, positive downwards.
    pub inclination: f64,
    /// The total field intensity in nanoteslas.
    pub total_intensity: f64,
    /// The horizontal field intensity in nanoteslas.
    pub horizontal_intensity: f64,
    /// The vertical field intensity in nanoteslas, positive downwards.
    pub vertical_intensity: f64,
    pub calculation_date: NaiveDate,
    pub location: GeographicPoint,
    pub provenance: Provenance,
    /// The reasons to treat the result with less confidence.
    pub warnings: Vec<AccuracyWarning>,
}

impl DeclinationResult {
    /// See `Provenance::model_name`.
    #[must_use]
    pub fn model(&self) -> String {
        self.provenance.model_name()
    }

    /// See `Provenance::source_tag`.
    #[must_use]
    pub const fn source(&self) -> &'static str {
        self.provenance.source_tag()
    }

    /// The category of the source of the value.
    #[must_use]
    pub fn declination_source(&self) -> DeclinationSource {
        DeclinationSource::from(&self.provenance)
    }
}

/// The annual change of declination in degrees per year.
///
/// A crude function of latitude only, in four bands: arctic, northern
/// temperate, tropical and southern.
/// * `location` - the position.
#[must_use]
pub fn secular_variation(location: &GeographicPoint) -> f64 {
    let latitude = location.latitude();
    if latitude >= 60.0 {
        -0.25
    } else if latitude >= 20.0 {
        -0.10
    } else if latitude >= -20.0 {
        -0.05
    } else {
        -0.08
    }
}

/// The date as a decimal year, e.g. 2020-07-02 is 2020.5.
#[must_use]
pub fn decimal_year(date: NaiveDate) -> f64 {
    let year = date.year();
    let days = NaiveDate::from_ymd_opt(year, 12, 31).map_or(365, |last| last.ordinal());
    f64::from(year) + f64::from(date.ordinal0()) / f64::from(days)
}

/// Normalise a declination in degrees to the range (-180, 180].
#[must_use]
pub fn normalise_declination(degrees: f64) -> f64 {
    let value = normalise_bearing(degrees);
    if value > 180.0 {
        value - 360.0
    } else {
        value
    }
}

/// Estimates magnetic declination from a regional table and a dipole model.
#[derive(Clone, Debug)]
pub struct DeclinationEstimator<'a> {
    regions: &'a [RegionalDeclinationEntry],
    config: DeclinationConfig,
}

impl Default for DeclinationEstimator<'static> {
    fn default() -> Self {
        Self::new(&REGIONAL_DECLINATIONS, DeclinationConfig::default())
    }
}

impl<'a> DeclinationEstimator<'a> {
    /// Constructor.
    /// * `regions` - the ordered regional declination table.
    /// * `config` - the estimator parameters.
    #[must_use]
    pub const fn new(regions: &'a [RegionalDeclinationEntry], config: DeclinationConfig) -> Self {
        Self { regions, config }
    }

    #[must_use]
    pub const fn regions(&self) -> &'a [RegionalDeclinationEntry] {
        self.regions
    }

    #[must_use]
    pub const fn config(&self) -> &DeclinationConfig {
        &self.config
    }

    /// Estimate the magnetic field for a request, with future dates
    /// relative to today (UTC).
    /// * `request` - the position, date and elevation.
    #[must_use]
    pub fn estimate(&self, request: &DeclinationRequest) -> DeclinationResult {
        self.estimate_at(request, Utc::now().date_naive())
    }

    /// Estimate the magnetic field for a request.
    /// * `request` - the position, date and elevation.
    /// * `today` - the date that later dates are in the future of.
    #[must_use]
    pub fn estimate_at(&self, request: &DeclinationRequest, today: NaiveDate) -> DeclinationResult {
        let mut warnings = validation::accuracy_warnings(request, &self.config, today);

        let (field, provenance) =
            if let Some(entry) = regional::find_region(self.regions, &request.location) {
                tracing::debug!(region = entry.name.as_str(), "regional declination lookup");
                (
                    regional::regional_field(entry, request),
                    Provenance::RegionalLookup {
                        region: entry.name.clone(),
                        error_bound: self.config.regional_error_bound,
                    },
                )
            } else {
                tracing::debug!(
                    latitude = request.location.latitude(),
                    longitude = request.location.longitude(),
                    "no regional declination, using the dipole approximation"
                );
                warnings.push(AccuracyWarning::DipoleApproximation {
                    accuracy: self.config.dipole_accuracy,
                });
                (
                    dipole::dipole_field(request, &self.config),
                    Provenance::DipoleApproximation {
                        accuracy: self.config.dipole_accuracy,
                    },
                )
            };

        DeclinationResult {
            declination: field.declination,
            inclination: field.inclination,
            total_intensity: field.total_intensity,
            horizontal_intensity: field.horizontal_intensity,
            vertical_intensity: field.vertical_intensity,
            calculation_date: request.date,
            location: request.location,
            provenance,
            warnings,
        }
    }
}

/// Estimate the magnetic field for a request using the standard regional
/// table and configuration.
/// * `request` - the position, date and elevation.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use wellsite_geo::GeographicPoint;
/// use wellsite_geo::declination::{estimate, DeclinationRequest};
///
/// let date = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
/// let result = estimate(&DeclinationRequest::new(GeographicPoint::new(32.0, -102.0), date));
/// assert_eq!("regional_lookup", result.source());
/// assert!((result.declination - 6.8).abs() < 1e-12);
/// ```
#[must_use]
pub fn estimate(request: &DeclinationRequest) -> DeclinationResult {
    DeclinationEstimator::default().estimate(request)
}

/// The components of the magnetic field, see `DeclinationResult`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldElements {
    pub declination: f64,
    pub inclination: f64,
    pub total_intensity: f64,
    pub horizontal_intensity: f64,
    pub vertical_intensity: f64,
}

/// A survey azimuth referenced to true north and to grid north.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CorrectedAzimuth {
    /// The azimuth clockwise from true north in degrees, [0, 360).
    pub true_azimuth: f64,
    /// The azimuth clockwise from grid north in degrees, [0, 360).
    pub grid_azimuth: f64,
}

/// Correct a magnetic azimuth to true north and grid north.
/// * `magnetic_azimuth` - the azimuth clockwise from magnetic north in degrees.
/// * `declination` - the declination in degrees, positive east.
/// * `convergence` - the grid convergence in degrees, see `utm::grid_info`.
///
/// # Examples
/// ```
/// use wellsite_geo::declination::correct_azimuth;
///
/// let azimuth = correct_azimuth(355.0, 8.2, 1.5);
/// assert!((azimuth.true_azimuth - 3.2).abs() < 1e-12);
/// assert!((azimuth.grid_azimuth - 1.7).abs() < 1e-12);
/// ```
#[must_use]
pub fn correct_azimuth(magnetic_azimuth: f64, declination: f64, convergence: f64) -> CorrectedAzimuth {
    let true_azimuth = normalise_bearing(magnetic_azimuth + declination);
    CorrectedAzimuth {
        true_azimuth,
        grid_azimuth: normalise_bearing(true_azimuth - convergence),
    }
}
