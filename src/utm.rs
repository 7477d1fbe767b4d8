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

//! The utm module resolves the Universal Transverse Mercator zone and
//! hemisphere of a position and converts between geographic and UTM
//! coordinates via a [`ProjectionEngine`].
//!
//! UTM is only defined between 80°S and 84°N; positions outside those
//! latitudes are still converted, but with large distortion.

use crate::crs::WGS84;
use crate::error::{ProjectionError, ProjectionResult};
use crate::projection::transverse_mercator::TransverseMercator;
use crate::projection::ProjectionEngine;
use crate::{Coordinates, GeographicPoint, WGS84_ELLIPSOID};
use serde::{Deserialize, Serialize};

/// The lowest UTM zone number.
pub const MIN_ZONE: u8 = 1;

/// The highest UTM zone number.
pub const MAX_ZONE: u8 = 60;

/// The latitude limit beyond which UTM distortion is large, in degrees.
pub const HIGH_LATITUDE: f64 = 80.0;

/// The hemisphere of a UTM zone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Hemisphere {
    North,
    South,
}

impl Hemisphere {
    /// The hemisphere of a latitude: North if `latitude >= 0`, so the
    /// equator is in the northern hemisphere.
    #[must_use]
    pub fn of_latitude(latitude: f64) -> Self {
        if latitude >= 0.0 {
            Self::North
        } else {
            Self::South
        }
    }

    #[must_use]
    pub const fn is_south(self) -> bool {
        matches!(self, Self::South)
    }
}

impl core::fmt::Display for Hemisphere {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            Self::North => "N",
            Self::South => "S",
        })
    }
}

/// Calculate the UTM zone of a longitude.
/// * `longitude` - the longitude in degrees.
///
/// returns the zone, clamped to [1, 60] so that longitudes of exactly
/// -180 and 180 are in zones 1 and 60 respectively.
///
/// # Examples
/// ```
/// use wellsite_geo::utm::zone_of;
///
/// assert_eq!(1, zone_of(-180.0));
/// assert_eq!(13, zone_of(-104.9903));
/// assert_eq!(31, zone_of(0.0));
/// assert_eq!(60, zone_of(180.0));
/// ```
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
#[must_use]
pub fn zone_of(longitude: f64) -> u8 {
    let zone = libm::floor((longitude + 180.0) / 6.0) + 1.0;
    // NaN is clamped to the lowest zone
    if zone.is_nan() {
        MIN_ZONE
    } else {
        zone.clamp(f64::from(MIN_ZONE), f64::from(MAX_ZONE)) as u8
    }
}

/// The central meridian of a UTM zone, in degrees.
/// * `zone` - the UTM zone, [1, 60].
#[must_use]
pub fn central_meridian(zone: u8) -> f64 {
    f64::from(zone) * 6.0 - 183.0
}

/// The PROJ parameter string of a WGS 84 UTM zone.
/// * `zone` - the UTM zone, [1, 60].
/// * `hemisphere` - the hemisphere; the southern hemisphere is flagged with
///   `+south`, which applies the 10,000 km false northing.
///
/// # Examples
/// ```
/// use wellsite_geo::utm::{parameter_string, Hemisphere};
///
/// assert_eq!(
///     "+proj=utm +zone=23 +south +datum=WGS84 +units=m +no_defs",
///     parameter_string(23, Hemisphere::South)
/// );
/// ```
#[must_use]
pub fn parameter_string(zone: u8, hemisphere: Hemisphere) -> String {
    let south = if hemisphere.is_south() { " +south" } else { "" };
    format!("+proj=utm +zone={zone}{south} +datum=WGS84 +units=m +no_defs")
}

/// A position in UTM coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct UtmPoint {
    /// The easting in metres.
    x: f64,
    /// The northing in metres.
    y: f64,
    zone: u8,
    hemisphere: Hemisphere,
}

impl UtmPoint {
    /// Constructor.
    /// * `x`, `y` - the easting and northing in metres.
    /// * `zone` - the UTM zone.
    /// * `hemisphere` - the hemisphere.
    #[must_use]
    pub const fn new(x: f64, y: f64, zone: u8, hemisphere: Hemisphere) -> Self {
        Self {
            x,
            y,
            zone,
            hemisphere,
        }
    }

    /// The easting in metres.
    #[must_use]
    pub const fn x(&self) -> f64 {
        self.x
    }

    /// The northing in metres.
    #[must_use]
    pub const fn y(&self) -> f64 {
        self.y
    }

    #[must_use]
    pub const fn zone(&self) -> u8 {
        self.zone
    }

    #[must_use]
    pub const fn hemisphere(&self) -> Hemisphere {
        self.hemisphere
    }

    /// Whether the zone and hemisphere are those that `lat_lon_to_utm`
    /// resolves for the point.
    #[must_use]
    pub fn is_consistent_with(&self, point: &GeographicPoint) -> bool {
        self.zone == zone_of(point.longitude())
            && self.hemisphere == Hemisphere::of_latitude(point.latitude())
    }
}

impl core::fmt::Display for UtmPoint {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{}{} {:.3}E {:.3}N",
            self.zone, self.hemisphere, self.x, self.y
        )
    }
}

/// Converts between geographic and UTM coordinates.
#[derive(Clone, Copy, Debug)]
pub struct UtmResolver<'a> {
    engine: ProjectionEngine<'a>,
}

impl Default for UtmResolver<'static> {
    fn default() -> Self {
        Self::new(ProjectionEngine::default())
    }
}

impl<'a> UtmResolver<'a> {
    #[must_use]
    pub const fn new(engine: ProjectionEngine<'a>) -> Self {
        Self { engine }
    }

    /// Convert a geographic point to UTM coordinates in the zone and
    /// hemisphere of the point.
    /// * `point` - the geographic point.
    ///
    /// # Errors
    ///
    /// Returns a `ProjectionError` if the transform is undefined at the point.
    pub fn lat_lon_to_utm(&self, point: &GeographicPoint) -> ProjectionResult<UtmPoint> {
        let zone = zone_of(point.longitude());
        let hemisphere = Hemisphere::of_latitude(point.latitude());
        if point.latitude().abs() > HIGH_LATITUDE {
            tracing::debug!(
                latitude = point.latitude(),
                "latitude is beyond the UTM limits, accuracy is degraded"
            );
        }

        let result = self.engine.transform(
            Coordinates::from(point),
            WGS84,
            &parameter_string(zone, hemisphere),
        )?;
        Ok(UtmPoint::new(result.x, result.y, zone, hemisphere))
    }

    /// Convert UTM coordinates to a geographic point, using the zone and
    /// hemisphere of the `UtmPoint`.
    /// * `point` - the UTM point.
    ///
    /// # Errors
    ///
    /// Returns a `ProjectionError` if the zone is invalid or the transform
    /// is undefined.
    pub fn utm_to_lat_lon(&self, point: &UtmPoint) -> ProjectionResult<GeographicPoint> {
        let result = self.engine.transform(
            Coordinates::new(point.x, point.y),
            &parameter_string(point.zone, point.hemisphere),
            WGS84,
        )?;
        Ok(GeographicPoint::from(result))
    }
}

/// Convert a geographic point to UTM coordinates using the standard CRS registry.
/// * `latitude`, `longitude` - in degrees.
///
/// # Errors
///
/// Returns a `ProjectionError` if the transform is undefined at the point.
///
/// # Examples
/// ```
/// use wellsite_geo::utm::{lat_lon_to_utm, utm_to_lat_lon, Hemisphere};
///
/// let utm = lat_lon_to_utm(-22.0, -40.0).unwrap();
/// assert_eq!(24, utm.zone());
/// assert_eq!(Hemisphere::South, utm.hemisphere());
///
/// let point = utm_to_lat_lon(&utm).unwrap();
/// assert!((point.latitude() + 22.0).abs() < 1e-9);
/// assert!((point.longitude() + 40.0).abs() < 1e-9);
/// ```
pub fn lat_lon_to_utm(latitude: f64, longitude: f64) -> ProjectionResult<UtmPoint> {
    UtmResolver::default().lat_lon_to_utm(&GeographicPoint::new(latitude, longitude))
}

/// Convert UTM coordinates to a geographic point using the standard CRS registry.
/// * `point` - the UTM point.
///
/// # Errors
///
/// Returns a `ProjectionError` if the zone is invalid or the transform is undefined.
pub fn utm_to_lat_lon(point: &UtmPoint) -> ProjectionResult<GeographicPoint> {
    UtmResolver::default().utm_to_lat_lon(point)
}

/// The UTM grid properties at a position.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridInfo {
    pub zone: u8,
    pub hemisphere: Hemisphere,
    /// The meridian convergence in degrees: the bearing of grid north
    /// clockwise from true north.
    pub convergence: f64,
    /// The point scale factor, grid distance / ellipsoid distance.
    pub scale_factor: f64,
}

/// Calculate the UTM grid convergence and point scale factor at a position.
/// * `point` - the geographic point.
///
/// # Errors
///
/// Returns a `ProjectionError` if the projection is undefined at the point.
pub fn grid_info(point: &GeographicPoint) -> ProjectionResult<GridInfo> {
    let zone = zone_of(point.longitude());
    let hemisphere = Hemisphere::of_latitude(point.latitude());
    let tm = TransverseMercator::utm(zone, hemisphere.is_south(), WGS84_ELLIPSOID.clone());
    let grid = tm
        .forward(point.longitude(), point.latitude())
        .map_err(|singularity| ProjectionError::Undefined {
            x: point.longitude(),
            y: point.latitude(),
            from: WGS84.to_owned(),
            to: parameter_string(zone, hemisphere),
            reason: singularity.0.to_owned(),
        })?;
    Ok(GridInfo {
        zone,
        hemisphere,
        convergence: grid.convergence,
        scale_factor: grid.scale,
    })
}
