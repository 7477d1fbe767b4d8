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

// extern crate we're testing, same as any other code would do.
extern crate wellsite_geo;

use angle_sc::is_within_tolerance;
use chrono::NaiveDate;
use wellsite_geo::config::{DeclinationConfig, ReferenceConfig};
use wellsite_geo::crs::{CrsDefinition, CrsRegistry};
use wellsite_geo::declination::reference::{
    validate_against_references, ReferenceStation, ReferenceValidator,
};
use wellsite_geo::declination::regional::RegionalDeclinationEntry;
use wellsite_geo::declination::validation::validate_declination_request_at;
use wellsite_geo::declination::{
    correct_azimuth, DeclinationEstimator, DeclinationRequest, DeclinationSource, Provenance,
};
use wellsite_geo::projection::ProjectionEngine;
use wellsite_geo::round_trip::{
    run_self_tests, validate_round_trip, RoundTripValidator, DEFAULT_TOLERANCE, SELF_TEST_LOCATIONS,
};
use wellsite_geo::utm::{grid_info, lat_lon_to_utm, Hemisphere, UtmResolver};
use wellsite_geo::{measures, AccuracyWarning, GeographicPoint, InputError};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn today() -> NaiveDate {
    date(2026, 10, 18)
}

#[test]
fn test_self_test_battery() {
    // name, zone, hemisphere, easting, northing
    const EXPECTED: [(&str, u8, Hemisphere, f64, f64); 9] = [
        ("Permian Basin", 14, Hemisphere::North, 216_576.773_474_944_17, 3_544_369.909_538_625_3),
        ("Williston Basin", 13, Hemisphere::North, 649_187.874_961_023_5, 5_318_235.613_882_186),
        ("North Sea", 31, Hemisphere::North, 444_223.733_248_390_2, 6_651_832.735_433_667),
        ("Campos Basin", 24, Hemisphere::South, 396_775.359_570_923, 7_566_835.571_346_41),
        ("Zone 1 equator", 1, Hemisphere::North, 500_000.0, 0.0),
        ("Zone 60 equator", 60, Hemisphere::North, 500_000.0, 0.0),
        ("Null Island", 31, Hemisphere::North, 166_021.443_080_539_52, 0.0),
        ("High Arctic", 31, Hemisphere::North, 441_867.784_867_200_8, 8_883_084.955_948_304),
        ("Antarctic", 31, Hemisphere::South, 441_867.784_867_200_8, 1_116_915.044_051_695_6),
    ];

    let results = run_self_tests();
    assert_eq!(SELF_TEST_LOCATIONS.len(), results.len());
    for ((name, zone, hemisphere, x, y), result) in EXPECTED.iter().zip(&results) {
        assert_eq!(*name, result.name);
        assert!(result.report.is_valid(), "{name}: {:?}", result.report.errors);

        let utm = result.report.utm.unwrap();
        assert_eq!(*zone, utm.zone(), "{name}");
        assert_eq!(*hemisphere, utm.hemisphere(), "{name}");
        assert!(is_within_tolerance(*x, utm.x(), 1e-6), "{name}: {}", utm.x());
        assert!(is_within_tolerance(*y, utm.y(), 1e-6), "{name}: {}", utm.y());
    }
}

#[test]
fn test_round_trip_with_substituted_registry() {
    let registry = CrsRegistry::new([CrsDefinition::new(
        "EPSG:4326",
        "+proj=longlat +datum=WGS84 +no_defs",
    )]);
    let engine = ProjectionEngine::new(&registry);
    let validator = RoundTripValidator::new(UtmResolver::new(engine), 1e-9);
    for location in &SELF_TEST_LOCATIONS {
        assert!(validator.validate(&location.point).is_valid(), "{}", location.name);
    }
}

#[test]
fn test_pole_round_trips() {
    for (name, lat, lon) in [
        ("North Pole, zone 32", 90.0, 9.0),
        ("North Pole, off the central meridian", 90.0, 10.0),
        ("South Pole", -90.0, 10.0),
        ("South Pole, antimeridian", -90.0, 180.0),
    ] {
        let report = validate_round_trip(&GeographicPoint::new(lat, lon), DEFAULT_TOLERANCE);
        assert!(report.is_valid(), "{name}: {report:?}");

        let utm = report.utm.unwrap();
        assert_eq!(Hemisphere::of_latitude(lat), utm.hemisphere());
        assert!(is_within_tolerance(500_000.0, utm.x(), 1e-6));

        let round_trip = report.round_trip.unwrap();
        assert!(is_within_tolerance(lat, round_trip.latitude(), 1e-9));
    }
}

#[test]
fn test_invalid_input_rejection() {
    let point = GeographicPoint::new(95.0, -104.9903);

    let request = DeclinationRequest::new(point, date(2020, 1, 1));
    let validation =
        validate_declination_request_at(&request, &DeclinationConfig::default(), today());
    assert!(!validation.is_valid());
    assert_eq!(vec![InputError::LatitudeOutOfRange(95.0)], validation.errors);

    let report = validate_round_trip(&point, DEFAULT_TOLERANCE);
    assert!(!report.is_valid());
    assert!(report.utm.is_none());
    assert!(report.round_trip.is_none());
    assert!(report.delta_latitude.is_none());
}

#[test]
fn test_denver_well() {
    let location = GeographicPoint::new(39.7392, -104.9903);
    let request = DeclinationRequest::new(location, date(2020, 1, 1));
    let config = DeclinationConfig::default();

    let validation = validate_declination_request_at(&request, &config, today());
    assert!(validation.is_valid());
    assert!(validation.warnings.is_empty());

    let result = DeclinationEstimator::default().estimate_at(&request, today());
    assert!(matches!(
        &result.provenance,
        Provenance::RegionalLookup { region, .. } if region == "DJ Basin"
    ));
    assert_eq!(DeclinationSource::Wmm, result.declination_source());
    assert_eq!(
        DeclinationSource::Wmm,
        DeclinationSource::from_model(&result.model())
    );

    let references = validate_against_references(&result, 5.0);
    assert!(references.is_valid());
    let comparison = references.reference_comparison.unwrap();
    assert_eq!("Denver", comparison.station);
    assert!(comparison.within_tolerance);
    assert!(comparison.difference < 2.0);

    // correct a magnetic survey azimuth to UTM grid north
    let utm = lat_lon_to_utm(location.latitude(), location.longitude()).unwrap();
    assert_eq!(13, utm.zone());
    let grid = grid_info(&location).unwrap();
    // east of the central meridian, grid north is east of true north
    assert!(grid.convergence > 0.0);
    let azimuth = correct_azimuth(90.0, result.declination, grid.convergence);
    assert!(is_within_tolerance(98.2, azimuth.true_azimuth, 1e-9));
    assert!(is_within_tolerance(
        98.2 - grid.convergence,
        azimuth.grid_azimuth,
        1e-9
    ));
}

#[test]
fn test_mid_pacific_dipole() {
    let request = DeclinationRequest::new(GeographicPoint::new(0.0, -150.0), date(2022, 6, 1));
    let result = DeclinationEstimator::default().estimate_at(&request, today());
    assert_eq!("dipole_approximation", result.source());
    assert!(result.model().starts_with("Tilted dipole approximation"));
    assert!(result.model().contains("low accuracy"));
    assert_eq!(DeclinationSource::Manual, result.declination_source());
    assert!(result
        .warnings
        .contains(&AccuracyWarning::DipoleApproximation { accuracy: 4.0 }));

    let references = ReferenceValidator::default().validate(&result);
    assert!(references.reference_comparison.is_none());
    assert!(references
        .warnings
        .contains(&AccuracyWarning::VerifyAgainstAuthoritativeSources));
}

#[test]
fn test_lookup_precedence_over_dates() {
    let estimator = DeclinationEstimator::default();
    for year in [1900, 1950, 2000, 2015, 2020, 2025, 2030] {
        let request = DeclinationRequest::new(GeographicPoint::new(60.0, 2.0), date(year, 7, 1));
        let result = estimator.estimate_at(&request, today());
        assert_eq!("Regional lookup: North Sea (±1.5°)", result.model(), "{year}");
    }
}

#[test]
fn test_tables_from_json() {
    let regions: Vec<RegionalDeclinationEntry> = serde_json::from_str(
        r#"[
            { "name": "Cooper Basin", "latitude_range": [-29.0, -26.0],
              "longitude_range": [139.0, 142.0], "base_declination": 5.8, "epoch_year": 2020 }
        ]"#,
    )
    .unwrap();
    let stations: Vec<ReferenceStation> = serde_json::from_str(
        r#"[
            { "name": "Moomba", "latitude": -28.11, "longitude": 140.2,
              "expected_declination": 5.9, "tolerance": 1.0 }
        ]"#,
    )
    .unwrap();
    let config: DeclinationConfig =
        serde_json::from_str(r#"{ "regional_error_bound": 1.0 }"#).unwrap();
    let reference_config: ReferenceConfig = serde_json::from_str(r#"{ "tolerance": 0.5 }"#).unwrap();

    let estimator = DeclinationEstimator::new(&regions, config);
    let request = DeclinationRequest::new(GeographicPoint::new(-28.0, 140.0), date(2020, 1, 1));
    let result = estimator.estimate_at(&request, today());
    assert_eq!("Regional lookup: Cooper Basin (±1°)", result.model());
    assert!(is_within_tolerance(5.8, result.declination, 1e-12));

    let validation = ReferenceValidator::new(&stations, reference_config).validate(&result);
    let comparison = validation.reference_comparison.unwrap();
    assert_eq!("Moomba", comparison.station);
    assert_eq!(1.0, comparison.tolerance_used);
    assert!(comparison.within_tolerance);

    // the result serializes for the caller
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!("2020-01-01", json["calculation_date"]);
    assert_eq!("Cooper Basin", json["provenance"]["RegionalLookup"]["region"]);
}

#[test]
fn test_regional_conic_projection() {
    let engine = ProjectionEngine::default();
    let calgary = GeographicPoint::new(51.05, -114.07);
    let projected = engine.project(&calgary, "EPSG:3347").unwrap();
    assert!(is_within_tolerance(4_685_829.876_321_65, projected.x, 1e-2));
    assert!(is_within_tolerance(1_923_137.636_291_11, projected.y, 1e-2));

    let result = engine.unproject(&projected).unwrap();
    assert!(is_within_tolerance(calgary.latitude(), result.latitude(), 1e-9));
    assert!(is_within_tolerance(calgary.longitude(), result.longitude(), 1e-9));

    let error = engine
        .project(&GeographicPoint::new(-90.0, 0.0), "EPSG:3347")
        .unwrap_err();
    assert_eq!(2, error.parameters().len());
}

#[test]
fn test_distance_and_bearing_between_wells() {
    let midland = GeographicPoint::new(31.9973, -102.0779);
    let williston = GeographicPoint::new(48.147, -103.618);

    let distance = measures::distance(&midland, &williston);
    assert_eq!(distance, measures::distance(&williston, &midland));
    assert!(is_within_tolerance(1_800_440.783_722_868, distance.0, 1e-6));

    let north = measures::bearing(&midland, &williston);
    let south = measures::bearing(&williston, &midland);
    assert!(north.0 > 355.0);
    assert!((175.0..185.0).contains(&south.0));
}
