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

//! The regional declination table: curated declination values for the
//! main drilling regions.
//!
//! The table is an ordered list of bounding boxes; the first box that
//! contains a position is used, so overlapping boxes are resolved by their
//! order in the table.

use super::{secular_variation, DeclinationRequest, FieldElements};
use crate::GeographicPoint;
use chrono::Datelike;
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

/// The nominal inclination of a regional value in degrees.
pub const NOMINAL_INCLINATION: f64 = 65.0;

/// The nominal total field intensity of a regional value in nanoteslas.
pub const NOMINAL_TOTAL_INTENSITY: f64 = 52_000.0;

/// A declination value for a region bounded by latitude and longitude.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RegionalDeclinationEntry {
    pub name: String,
    /// The minimum and maximum latitude in degrees.
    pub latitude_range: [f64; 2],
    /// The minimum and maximum longitude in degrees.
    pub longitude_range: [f64; 2],
    /// The declination at the epoch in degrees, positive east.
    pub base_declination: f64,
    pub epoch_year: i32,
}

impl RegionalDeclinationEntry {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        latitude_range: [f64; 2],
        longitude_range: [f64; 2],
        base_declination: f64,
        epoch_year: i32,
    ) -> Self {
        Self {
            name: name.into(),
            latitude_range,
            longitude_range,
            base_declination,
            epoch_year,
        }
    }

    /// Whether the region contains the position, boundaries included.
    #[must_use]
    pub fn contains(&self, point: &GeographicPoint) -> bool {
        let [min_lat, max_lat] = self.latitude_range;
        let [min_lon, max_lon] = self.longitude_range;
        (min_lat..=max_lat).contains(&point.latitude())
            && (min_lon..=max_lon).contains(&point.longitude())
    }

    /// The declination in the year of a date, in degrees.
    #[must_use]
    pub fn declination(&self, point: &GeographicPoint, year: i32) -> f64 {
        self.base_declination + secular_variation(point) * f64::from(year - self.epoch_year)
    }
}

lazy_static! {
    /// The standard regional declination table.
    pub static ref REGIONAL_DECLINATIONS: Vec<RegionalDeclinationEntry> = vec![
        RegionalDeclinationEntry::new("DJ Basin", [39.0, 42.0], [-106.0, -102.5], 8.2, 2020),
        RegionalDeclinationEntry::new("Permian Basin", [31.0, 33.5], [-104.5, -100.0], 6.8, 2020),
        RegionalDeclinationEntry::new("Bakken", [46.5, 49.0], [-105.0, -102.0], 7.6, 2020),
        RegionalDeclinationEntry::new("Gulf Coast", [27.0, 31.0], [-98.0, -88.0], 2.6, 2020),
        RegionalDeclinationEntry::new(
            "Western Canada Sedimentary Basin",
            [49.0, 60.0],
            [-120.0, -110.0],
            14.5,
            2020
        ),
        RegionalDeclinationEntry::new("North Sea", [53.0, 62.0], [-4.0, 9.0], -1.0, 2020),
        RegionalDeclinationEntry::new(
            "Campos-Santos Basin",
            [-28.0, -20.0],
            [-48.0, -38.0],
            -22.5,
            2020
        ),
    ];
}

/// Find the first region in the table that contains the position.
/// * `regions` - the ordered regional declination table.
/// * `point` - the position.
#[must_use]
pub fn find_region<'a>(
    regions: &'a [RegionalDeclinationEntry],
    point: &GeographicPoint,
) -> Option<&'a RegionalDeclinationEntry> {
    regions.iter().find(|entry| entry.contains(point))
}

/// The field elements of a regional value: the declination of the region
/// and nominal values of the other elements.
#[must_use]
pub fn regional_field(entry: &RegionalDeclinationEntry, request: &DeclinationRequest) -> FieldElements {
    let (sin_i, cos_i) = libm::sincos(NOMINAL_INCLINATION.to_radians());
    FieldElements {
        declination: entry.declination(&request.location, request.date.year()),
        inclination: NOMINAL_INCLINATION,
        total_intensity: NOMINAL_TOTAL_INTENSITY,
        horizontal_intensity: NOMINAL_TOTAL_INTENSITY * cos_i,
        vertical_intensity: NOMINAL_TOTAL_INTENSITY * sin_i,
    }
}
