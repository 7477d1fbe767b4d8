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

//! The projection module transforms coordinates between Coordinate Reference
//! Systems.
//!
//! A [`ProjectionEngine`] resolves symbolic CRS keys with its [`CrsRegistry`]
//! and routes every transform through geographic coordinates on the
//! ellipsoid of the CRS: `source -> (longitude, latitude) -> target`.

pub mod lambert;
pub mod transverse_mercator;

use crate::crs::{CrsParameters, CrsRegistry, ProjectionKind, CRS_REGISTRY};
use crate::error::{ProjectionError, ProjectionResult};
use crate::{Coordinates, GeographicPoint};
use serde::{Deserialize, Serialize};

/// The reason that a projection primitive cannot transform a point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Singularity(pub &'static str);

/// Normalise a longitude in degrees to the range [-180, 180].
#[must_use]
pub fn normalise_longitude(lon: f64) -> f64 {
    if (-180.0..=180.0).contains(&lon) {
        lon
    } else {
        let lon = libm::remainder(lon, 360.0);
        if lon == -180.0 {
            180.0
        } else {
            lon
        }
    }
}

/// A point in a projected CRS, tagged with the CRS that it is in.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProjectedPoint {
    /// The easting, in the units of the CRS.
    pub x: f64,
    /// The northing, in the units of the CRS.
    pub y: f64,
    /// The CRS key or parameter string.
    pub crs: String,
}

/// Transforms coordinates between CRSs resolved by a `CrsRegistry`.
#[derive(Clone, Copy, Debug)]
pub struct ProjectionEngine<'a> {
    registry: &'a CrsRegistry,
}

impl Default for ProjectionEngine<'static> {
    /// A `ProjectionEngine` using the standard `CRS_REGISTRY`.
    fn default() -> Self {
        Self::new(&CRS_REGISTRY)
    }
}

impl<'a> ProjectionEngine<'a> {
    #[must_use]
    pub const fn new(registry: &'a CrsRegistry) -> Self {
        Self { registry }
    }

    /// Accessor for the reference to the underlying `CrsRegistry`.
    #[must_use]
    pub const fn registry(&self) -> &'a CrsRegistry {
        self.registry
    }

    /// Resolve and parse a CRS.
    /// * `crs` - a registered key or a raw parameter string.
    ///
    /// # Errors
    ///
    /// Returns a `ProjectionError` if the parameters cannot be parsed.
    pub fn parameters(&self, crs: &str) -> ProjectionResult<CrsParameters> {
        CrsParameters::parse(self.registry.resolve(crs))
    }

    /// Transform a point from one CRS to another.
    /// * `point` - the coordinates in the `from` CRS; geographic coordinates
    ///   are (longitude, latitude) in degrees.
    /// * `from`, `to` - registered keys or raw parameter strings.
    ///
    /// # Errors
    ///
    /// Returns a `ProjectionError` if either CRS cannot be parsed or the
    /// transform is undefined at the point.
    ///
    /// # Examples
    /// ```
    /// use wellsite_geo::Coordinates;
    /// use wellsite_geo::projection::ProjectionEngine;
    ///
    /// let engine = ProjectionEngine::default();
    /// let utm = engine
    ///     .transform(Coordinates::new(-105.0, 40.0), "EPSG:4326", "EPSG:32613")
    ///     .unwrap();
    /// assert!((utm.x - 500_000.0).abs() < 1e-6);
    /// ```
    pub fn transform(
        &self,
        point: Coordinates,
        from: &str,
        to: &str,
    ) -> ProjectionResult<Coordinates> {
        let from_parameters = self.registry.resolve(from);
        let to_parameters = self.registry.resolve(to);
        tracing::trace!(
            x = point.x,
            y = point.y,
            from = from_parameters,
            to = to_parameters,
            "transform"
        );

        let source = CrsParameters::parse(from_parameters)?;
        let target = CrsParameters::parse(to_parameters)?;

        let undefined = |reason: &str| ProjectionError::Undefined {
            x: point.x,
            y: point.y,
            from: from_parameters.to_owned(),
            to: to_parameters.to_owned(),
            reason: reason.to_owned(),
        };

        if !(point.x.is_finite() && point.y.is_finite()) {
            return Err(undefined("coordinates are not finite"));
        }

        let (lon, lat) = to_geographic(&source, point).map_err(|Singularity(r)| undefined(r))?;
        let result = from_geographic(&target, lon, lat).map_err(|Singularity(r)| undefined(r))?;

        if result.x.is_finite() && result.y.is_finite() {
            Ok(result)
        } else {
            Err(undefined("result is not finite"))
        }
    }

    /// Project a geographic point on the reference datum into a CRS.
    /// * `point` - the geographic point.
    /// * `crs` - a registered key or a raw parameter string.
    ///
    /// # Errors
    ///
    /// Returns a `ProjectionError` if the CRS cannot be parsed or the
    /// transform is undefined at the point.
    pub fn project(&self, point: &GeographicPoint, crs: &str) -> ProjectionResult<ProjectedPoint> {
        let result = self.transform(Coordinates::from(point), crate::crs::WGS84, crs)?;
        Ok(ProjectedPoint {
            x: result.x,
            y: result.y,
            crs: crs.to_owned(),
        })
    }

    /// Convert a projected point back to a geographic point on the reference datum.
    /// * `point` - the projected point.
    ///
    /// # Errors
    ///
    /// Returns a `ProjectionError` if the CRS of the point cannot be parsed
    /// or the transform is undefined at the point.
    pub fn unproject(&self, point: &ProjectedPoint) -> ProjectionResult<GeographicPoint> {
        let result = self.transform(
            Coordinates::new(point.x, point.y),
            &point.crs,
            crate::crs::WGS84,
        )?;
        Ok(GeographicPoint::from(result))
    }
}

/// Convert coordinates in a CRS to (longitude, latitude) in degrees.
fn to_geographic(crs: &CrsParameters, point: Coordinates) -> Result<(f64, f64), Singularity> {
    let x = point.x * crs.to_meter();
    let y = point.y * crs.to_meter();
    match crs.kind() {
        ProjectionKind::Geographic => {
            if (-90.0..=90.0).contains(&point.y) {
                Ok((normalise_longitude(point.x), point.y))
            } else {
                Err(Singularity("latitude is outside [-90, 90]"))
            }
        }
        ProjectionKind::TransverseMercator(tm) => tm.inverse(x, y),
        ProjectionKind::LambertConformalConic(lcc) => lcc.inverse(x, y),
    }
}

/// Convert (longitude, latitude) in degrees to coordinates in a CRS.
fn from_geographic(crs: &CrsParameters, lon: f64, lat: f64) -> Result<Coordinates, Singularity> {
    let (x, y) = match crs.kind() {
        ProjectionKind::Geographic => return Ok(Coordinates::new(lon, lat)),
        ProjectionKind::TransverseMercator(tm) => {
            let grid = tm.forward(lon, lat)?;
            (grid.easting, grid.northing)
        }
        ProjectionKind::LambertConformalConic(lcc) => lcc.forward(lon, lat)?,
    };
    Ok(Coordinates::new(x / crs.to_meter(), y / crs.to_meter()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crs::{CrsDefinition, WGS84};
    use angle_sc::is_within_tolerance;

    #[test]
    fn test_normalise_longitude() {
        assert_eq!(180.0, normalise_longitude(180.0));
        assert_eq!(-180.0, normalise_longitude(-180.0));
        assert_eq!(-179.0, normalise_longitude(181.0));
        assert_eq!(179.0, normalise_longitude(-181.0));
        assert_eq!(180.0, normalise_longitude(540.0));
        assert_eq!(0.0, normalise_longitude(720.0));
    }

    #[test]
    fn test_transform_utm_reference_values() {
        let engine = ProjectionEngine::default();

        // Verified against PROJ, EPSG:32651
        let result = engine
            .transform(
                Coordinates::new(121.880_356, 29.887_703),
                WGS84,
                "+proj=utm +zone=51 +datum=WGS84 +units=m +no_defs",
            )
            .unwrap();
        assert!(is_within_tolerance(391_888.063_726_413, result.x, 1e-6));
        assert!(is_within_tolerance(3_306_868.456_385_104, result.y, 1e-6));

        // 0°N 0°E in UTM zone 31N
        let result = engine
            .transform(Coordinates::new(0.0, 0.0), WGS84, "EPSG:32631")
            .unwrap();
        assert!(is_within_tolerance(166_021.443_080_5, result.x, 1e-6));
        assert_eq!(0.0, result.y);
    }

    #[test]
    fn test_transform_projected_to_projected() {
        let engine = ProjectionEngine::default();
        let denver = Coordinates::new(-104.9903, 39.7392);

        // WGS 84 and NAD83 are coincident, so the UTM coordinates agree to
        // the difference between the WGS 84 and GRS 80 ellipsoids.
        let wgs84_utm = engine.transform(denver, WGS84, "EPSG:32613").unwrap();
        let nad83_utm = engine.transform(wgs84_utm, "EPSG:32613", "EPSG:26913").unwrap();
        assert!(is_within_tolerance(wgs84_utm.x, nad83_utm.x, 1e-3));
        assert!(is_within_tolerance(wgs84_utm.y, nad83_utm.y, 1e-3));

        // Zone 13 to zone 14 and back
        let zone14 = engine.transform(wgs84_utm, "EPSG:32613", "EPSG:32614").unwrap();
        let zone13 = engine.transform(zone14, "EPSG:32614", "EPSG:32613").unwrap();
        assert!(is_within_tolerance(wgs84_utm.x, zone13.x, 1e-6));
        assert!(is_within_tolerance(wgs84_utm.y, zone13.y, 1e-6));
    }

    #[test]
    fn test_transform_units() {
        let engine = ProjectionEngine::default();
        let point = Coordinates::new(-104.0, 40.0);
        let metres = engine
            .transform(point, WGS84, "+proj=utm +zone=13 +units=m")
            .unwrap();
        let feet = engine
            .transform(point, WGS84, "+proj=utm +zone=13 +units=ft")
            .unwrap();
        assert!(is_within_tolerance(metres.x / 0.3048, feet.x, 1e-6));
        assert!(is_within_tolerance(metres.y / 0.3048, feet.y, 1e-6));

        let back = engine
            .transform(feet, "+proj=utm +zone=13 +units=ft", WGS84)
            .unwrap();
        assert!(is_within_tolerance(point.x, back.x, 1e-9));
        assert!(is_within_tolerance(point.y, back.y, 1e-9));
    }

    #[test]
    fn test_project_and_unproject_lambert() {
        let engine = ProjectionEngine::default();
        let calgary = GeographicPoint::new(51.05, -114.07);

        let projected = engine.project(&calgary, "EPSG:3347").unwrap();
        assert_eq!("EPSG:3347", projected.crs);
        assert!(is_within_tolerance(4_685_829.876, projected.x, 1e-2));
        assert!(is_within_tolerance(1_923_137.636, projected.y, 1e-2));

        let result = engine.unproject(&projected).unwrap();
        assert!(is_within_tolerance(calgary.latitude(), result.latitude(), 1e-9));
        assert!(is_within_tolerance(calgary.longitude(), result.longitude(), 1e-9));
    }

    #[test]
    fn test_transform_errors() {
        let engine = ProjectionEngine::default();
        let point = Coordinates::new(0.0, 0.0);

        let error = engine.transform(point, WGS84, "+proj=merc").unwrap_err();
        assert_eq!(vec!["+proj=merc"], error.parameters());

        let error = engine.transform(point, "+zone=13", WGS84).unwrap_err();
        assert!(matches!(error, ProjectionError::MissingProjection { .. }));

        // The south pole is a singularity of a northern Lambert cone
        let error = engine
            .transform(Coordinates::new(0.0, -90.0), WGS84, "EPSG:3347")
            .unwrap_err();
        match error {
            ProjectionError::Undefined { from, to, .. } => {
                assert_eq!("+proj=longlat +datum=WGS84 +no_defs", from);
                assert!(to.starts_with("+proj=lcc"));
            }
            other => panic!("unexpected error: {other:?}"),
        }

        // 90° from the central meridian on the equator is a singularity of
        // the transverse Mercator projection
        let error = engine
            .transform(Coordinates::new(-15.0, 0.0), WGS84, "EPSG:32613")
            .unwrap_err();
        assert!(matches!(error, ProjectionError::Undefined { .. }));

        let error = engine
            .transform(Coordinates::new(0.0, 95.0), WGS84, "EPSG:32631")
            .unwrap_err();
        assert!(matches!(error, ProjectionError::Undefined { .. }));

        let error = engine
            .transform(Coordinates::new(f64::NAN, 0.0), WGS84, "EPSG:32631")
            .unwrap_err();
        assert!(matches!(error, ProjectionError::Undefined { .. }));
    }

    #[test]
    fn test_substituted_registry() {
        let registry = CrsRegistry::new([
            CrsDefinition::new("geographic", "+proj=longlat +ellps=WGS84"),
            CrsDefinition::new("site", "+proj=tmerc +lon_0=-105 +k=0.9999 +x_0=100000"),
        ]);
        let engine = ProjectionEngine::new(&registry);
        assert_eq!(&registry, engine.registry());

        let result = engine
            .transform(Coordinates::new(-105.0, 0.0), "geographic", "site")
            .unwrap();
        assert!(is_within_tolerance(100_000.0, result.x, 1e-9));
        assert!(is_within_tolerance(0.0, result.y, 1e-9));
    }
}
