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

//! The crs module contains the registry of named Coordinate Reference Systems
//! and the parser for their PROJ style parameter strings.
//!
//! A CRS is identified either by a symbolic key held in a [`CrsRegistry`],
//! e.g. `EPSG:32613`, or by a raw parameter string, e.g.
//! `+proj=utm +zone=13 +datum=WGS84 +units=m +no_defs`.
//! Keys that are not in the registry are treated as raw parameter strings.
//!
//! Datum shifts are not performed: WGS 84 and NAD83 are treated as coincident.

use crate::error::{ProjectionError, ProjectionResult};
use crate::projection::lambert::LambertConformalConic;
use crate::projection::transverse_mercator::TransverseMercator;
use crate::Ellipsoid;
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The key of the reference geographic datum: WGS 84 latitude and longitude.
pub const WGS84: &str = "EPSG:4326";

/// The named CRS definitions loaded into [`CrsRegistry::standard`].
const STANDARD_DEFINITIONS: &[(&str, &str)] = &[
    (WGS84, "+proj=longlat +datum=WGS84 +no_defs"),
    ("WGS84", "+proj=longlat +datum=WGS84 +no_defs"),
    ("EPSG:4269", "+proj=longlat +datum=NAD83 +no_defs"),
    (
        "EPSG:32613",
        "+proj=utm +zone=13 +datum=WGS84 +units=m +no_defs",
    ),
    (
        "EPSG:32614",
        "+proj=utm +zone=14 +datum=WGS84 +units=m +no_defs",
    ),
    (
        "EPSG:32631",
        "+proj=utm +zone=31 +datum=WGS84 +units=m +no_defs",
    ),
    (
        "EPSG:32723",
        "+proj=utm +zone=23 +south +datum=WGS84 +units=m +no_defs",
    ),
    (
        "EPSG:26913",
        "+proj=utm +zone=13 +datum=NAD83 +units=m +no_defs",
    ),
    (
        "EPSG:26914",
        "+proj=utm +zone=14 +datum=NAD83 +units=m +no_defs",
    ),
    // NAD83 / Statistics Canada Lambert
    (
        "EPSG:3347",
        "+proj=lcc +lat_0=63.390675 +lon_0=-91.8666666666667 +lat_1=49 +lat_2=77 +x_0=6200000 +y_0=3000000 +datum=NAD83 +units=m +no_defs",
    ),
];

/// A named CRS: a symbolic key and its parameter string.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrsDefinition {
    key: String,
    parameters: String,
}

impl CrsDefinition {
    #[must_use]
    pub fn new(key: impl Into<String>, parameters: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            parameters: parameters.into(),
        }
    }

    /// The symbolic key, e.g. `EPSG:4326`.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The PROJ style parameter string.
    #[must_use]
    pub fn parameters(&self) -> &str {
        &self.parameters
    }
}

/// An immutable table of symbolic CRS keys to parameter strings.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CrsRegistry {
    definitions: HashMap<String, CrsDefinition>,
}

impl CrsRegistry {
    /// Construct a `CrsRegistry` from a set of definitions.
    /// Later definitions replace earlier definitions with the same key.
    #[must_use]
    pub fn new(definitions: impl IntoIterator<Item = CrsDefinition>) -> Self {
        Self {
            definitions: definitions
                .into_iter()
                .map(|definition| (definition.key.clone(), definition))
                .collect(),
        }
    }

    /// Construct the standard `CrsRegistry`.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(
            STANDARD_DEFINITIONS
                .iter()
                .map(|(key, parameters)| CrsDefinition::new(*key, *parameters)),
        )
    }

    /// The definition of a symbolic key, if registered.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&CrsDefinition> {
        self.definitions.get(key)
    }

    /// Resolve a symbolic key or raw parameter string to a parameter string.
    /// * `crs` - a registered key or a raw parameter string.
    ///
    /// returns the registered parameter string, otherwise `crs` itself.
    #[must_use]
    pub fn resolve<'a>(&'a self, crs: &'a str) -> &'a str {
        self.get(crs).map_or_else(
            || {
                tracing::debug!(crs, "CRS not registered, using it as a parameter string");
                crs
            },
            CrsDefinition::parameters,
        )
    }

    /// The registered keys, in no particular order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.definitions.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

lazy_static! {
    /// The process wide standard `CrsRegistry`, initialised on first use.
    pub static ref CRS_REGISTRY: CrsRegistry = CrsRegistry::standard();
}

/// The projection family of a parsed CRS.
#[derive(Clone, Debug, PartialEq)]
pub enum ProjectionKind {
    /// Latitude and longitude in degrees.
    Geographic,
    /// Transverse Mercator, including UTM.
    TransverseMercator(TransverseMercator),
    /// Lambert Conformal Conic.
    LambertConformalConic(LambertConformalConic),
}

/// A parsed CRS parameter string.
#[derive(Clone, Debug, PartialEq)]
pub struct CrsParameters {
    kind: ProjectionKind,
    /// Metres per projected unit.
    to_meter: f64,
}

/// The key value pairs of a parameter string.
struct Tokens<'a> {
    source: &'a str,
    pairs: Vec<(&'a str, Option<&'a str>)>,
}

impl<'a> Tokens<'a> {
    fn new(source: &'a str) -> Self {
        let pairs = source
            .split_whitespace()
            .map(|token| {
                let token = token.strip_prefix('+').unwrap_or(token);
                token
                    .split_once('=')
                    .map_or((token, None), |(key, value)| (key, Some(value)))
            })
            .collect();
        Self { source, pairs }
    }

    fn value(&self, key: &str) -> Option<&'a str> {
        self.pairs
            .iter()
            .find(|(k, _)| *k == key)
            .and_then(|(_, value)| *value)
    }

    fn has_flag(&self, key: &str) -> bool {
        self.pairs.iter().any(|(k, _)| *k == key)
    }

    fn number(&self, key: &str) -> ProjectionResult<Option<f64>> {
        self.value(key)
            .map(|value| {
                value
                    .parse::<f64>()
                    .ok()
                    .filter(|number| number.is_finite())
                    .ok_or_else(|| ProjectionError::invalid_parameter(key, value, self.source))
            })
            .transpose()
    }

    fn number_or(&self, key: &str, default: f64) -> ProjectionResult<f64> {
        Ok(self.number(key)?.unwrap_or(default))
    }

    fn latitude(&self, key: &str, default: f64) -> ProjectionResult<f64> {
        let value = self.number_or(key, default)?;
        if (-90.0..=90.0).contains(&value) {
            Ok(value)
        } else {
            Err(ProjectionError::invalid_parameter(
                key,
                value.to_string(),
                self.source,
            ))
        }
    }
}

/// The keys understood by the parser.
const KNOWN_KEYS: &[&str] = &[
    "proj", "zone", "south", "north", "datum", "ellps", "units", "to_meter", "lat_0", "lon_0",
    "lat_1", "lat_2", "k", "k_0", "x_0", "y_0", "no_defs", "type",
];

impl CrsParameters {
    /// Parse a PROJ style parameter string.
    /// * `parameters` - the parameter string, e.g. `+proj=utm +zone=13 +south`.
    ///
    /// # Errors
    ///
    /// Returns a `ProjectionError` if `+proj` is missing or unsupported,
    /// or if a parameter value is invalid.
    ///
    /// # Examples
    /// ```
    /// use wellsite_geo::crs::CrsParameters;
    ///
    /// let utm = CrsParameters::parse("+proj=utm +zone=13 +datum=WGS84 +units=m").unwrap();
    /// assert!(!utm.is_geographic());
    ///
    /// assert!(CrsParameters::parse("+proj=utm +zone=61").is_err());
    /// ```
    pub fn parse(parameters: &str) -> ProjectionResult<Self> {
        let tokens = Tokens::new(parameters);
        for (key, _) in &tokens.pairs {
            if !KNOWN_KEYS.contains(key) {
                tracing::debug!(key, parameters, "ignoring unknown CRS parameter");
            }
        }

        let name = tokens
            .value("proj")
            .ok_or_else(|| ProjectionError::MissingProjection {
                parameters: parameters.to_owned(),
            })?;
        let ellipsoid = Self::parse_ellipsoid(&tokens)?;
        let to_meter = Self::parse_units(&tokens)?;

        let kind = match name {
            "longlat" | "latlong" | "lonlat" | "latlon" => ProjectionKind::Geographic,
            "utm" => {
                let zone = tokens
                    .value("zone")
                    .ok_or_else(|| ProjectionError::invalid_parameter("zone", "", parameters))?;
                let zone_number = zone
                    .parse::<u8>()
                    .ok()
                    .filter(|z| (1..=60).contains(z))
                    .ok_or_else(|| ProjectionError::invalid_parameter("zone", zone, parameters))?;
                ProjectionKind::TransverseMercator(TransverseMercator::utm(
                    zone_number,
                    tokens.has_flag("south"),
                    ellipsoid,
                ))
            }
            "tmerc" => {
                let k0 = match tokens.number("k_0")? {
                    Some(k0) => k0,
                    None => tokens.number_or("k", 1.0)?,
                };
                ProjectionKind::TransverseMercator(TransverseMercator::new(
                    ellipsoid,
                    tokens.number_or("lon_0", 0.0)?,
                    tokens.latitude("lat_0", 0.0)?,
                    k0,
                    tokens.number_or("x_0", 0.0)?,
                    tokens.number_or("y_0", 0.0)?,
                ))
            }
            "lcc" => {
                let lat_1 = tokens.latitude("lat_1", 0.0)?;
                let lat_2 = tokens.latitude("lat_2", lat_1)?;
                let lat_0 = tokens.latitude("lat_0", lat_1)?;
                let k0 = match tokens.number("k_0")? {
                    Some(k0) => k0,
                    None => tokens.number_or("k", 1.0)?,
                };
                let lcc = LambertConformalConic::new(
                    ellipsoid,
                    tokens.number_or("lon_0", 0.0)?,
                    lat_0,
                    lat_1,
                    lat_2,
                    k0,
                    tokens.number_or("x_0", 0.0)?,
                    tokens.number_or("y_0", 0.0)?,
                )
                .ok_or_else(|| {
                    ProjectionError::invalid_parameter("lat_1", lat_1.to_string(), parameters)
                })?;
                ProjectionKind::LambertConformalConic(lcc)
            }
            _ => {
                return Err(ProjectionError::UnknownProjection {
                    name: name.to_owned(),
                    parameters: parameters.to_owned(),
                })
            }
        };

        Ok(Self { kind, to_meter })
    }

    fn parse_ellipsoid(tokens: &Tokens) -> ProjectionResult<Ellipsoid> {
        if let Some(name) = tokens.value("ellps") {
            return Ellipsoid::from_name(name).ok_or_else(|| {
                ProjectionError::unsupported_parameter("ellps", name, tokens.source)
            });
        }
        match tokens.value("datum") {
            None | Some("WGS84") => Ok(Ellipsoid::wgs84()),
            Some("NAD83") => Ok(Ellipsoid::grs80()),
            Some(datum) => Err(ProjectionError::unsupported_parameter(
                "datum",
                datum,
                tokens.source,
            )),
        }
    }

    fn parse_units(tokens: &Tokens) -> ProjectionResult<f64> {
        if let Some(to_meter) = tokens.number("to_meter")? {
            return if to_meter > 0.0 {
                Ok(to_meter)
            } else {
                Err(ProjectionError::invalid_parameter(
                    "to_meter",
                    to_meter.to_string(),
                    tokens.source,
                ))
            };
        }
        match tokens.value("units") {
            None | Some("m") => Ok(1.0),
            Some("km") => Ok(1000.0),
            Some("ft") => Ok(0.3048),
            Some("us-ft") => Ok(1200.0 / 3937.0),
            Some(units) => Err(ProjectionError::unsupported_parameter(
                "units",
                units,
                tokens.source,
            )),
        }
    }

    /// The projection family.
    #[must_use]
    pub const fn kind(&self) -> &ProjectionKind {
        &self.kind
    }

    /// Metres per projected unit.
    #[must_use]
    pub const fn to_meter(&self) -> f64 {
        self.to_meter
    }

    /// Whether the CRS is geographic: latitude and longitude in degrees.
    #[must_use]
    pub const fn is_geographic(&self) -> bool {
        matches!(self.kind, ProjectionKind::Geographic)
    }
}
