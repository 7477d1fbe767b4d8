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

use chrono::NaiveDate;
use proptest::prelude::*;
use wellsite_geo::declination::regional::REGIONAL_DECLINATIONS;
use wellsite_geo::declination::{correct_azimuth, DeclinationEstimator, DeclinationRequest, Provenance};
use wellsite_geo::measures::{bearing, distance};
use wellsite_geo::round_trip::validate_round_trip;
use wellsite_geo::utm::{lat_lon_to_utm, utm_to_lat_lon, zone_of, Hemisphere};
use wellsite_geo::GeographicPoint;

fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (1900i32..=2030, 1u32..=365).prop_map(|(year, ordinal)| {
        NaiveDate::from_yo_opt(year, ordinal).unwrap()
    })
}

fn point_strategy() -> impl Strategy<Value = GeographicPoint> {
    (-90.0f64..=90.0, -180.0f64..=180.0).prop_map(|(lat, lon)| GeographicPoint::new(lat, lon))
}

// Property: UTM zones are in range and do not decrease with longitude
proptest! {
    #[test]
    fn prop_zone_determinism(a in -180.0f64..=180.0, b in -180.0f64..=180.0) {
        let (west, east) = if a <= b { (a, b) } else { (b, a) };
        let zone = zone_of(west);
        prop_assert!((1..=60).contains(&zone));
        prop_assert!(zone <= zone_of(east));
    }
}

// Property: the hemisphere is North iff the latitude is not negative
proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_hemisphere_consistency(lat in -90.0f64..=90.0, lon in -180.0f64..=180.0) {
        let utm = lat_lon_to_utm(lat, lon).unwrap();
        prop_assert_eq!(lat >= 0.0, utm.hemisphere() == Hemisphere::North);
        prop_assert_eq!(zone_of(lon), utm.zone());
    }
}

// Property: converting to UTM and back returns the original point
proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_round_trip(
        lat in prop_oneof![Just(90.0), Just(-90.0), -90.0f64..=90.0],
        lon in -180.0f64..=180.0,
    ) {
        let report = validate_round_trip(&GeographicPoint::new(lat, lon), 1e-6);
        prop_assert!(report.is_valid(), "{:?}", report);

        let utm = lat_lon_to_utm(lat, lon).unwrap();
        let point = utm_to_lat_lon(&utm).unwrap();
        prop_assert!((point.latitude() - lat).abs() < 1e-9);
    }
}

// Property: bearings are in the range [0, 360)
proptest! {
    #[test]
    fn prop_bearing_range(a in point_strategy(), b in point_strategy()) {
        let result = bearing(&a, &b).0;
        prop_assert!((0.0..360.0).contains(&result), "{}", result);
    }
}

// Property: distance is symmetric and zero between identical points
proptest! {
    #[test]
    fn prop_distance_symmetry(a in point_strategy(), b in point_strategy()) {
        prop_assert_eq!(0.0, distance(&a, &a).0);
        let ab = distance(&a, &b).0;
        let ba = distance(&b, &a).0;
        prop_assert!((ab - ba).abs() < 1e-6);
        prop_assert!(ab >= 0.0);
    }
}

// Property: a point in a region is always estimated from that region
proptest! {
    #[test]
    fn prop_lookup_precedence(
        index in 0..REGIONAL_DECLINATIONS.len(),
        lat_fraction in 0.0f64..=1.0,
        lon_fraction in 0.0f64..=1.0,
        date in date_strategy()
    ) {
        let entry = &REGIONAL_DECLINATIONS[index];
        let [min_lat, max_lat] = entry.latitude_range;
        let [min_lon, max_lon] = entry.longitude_range;
        let point = GeographicPoint::new(
            min_lat + lat_fraction * (max_lat - min_lat),
            min_lon + lon_fraction * (max_lon - min_lon),
        );

        let result = DeclinationEstimator::default().estimate(&DeclinationRequest::new(point, date));
        match result.provenance {
            Provenance::RegionalLookup { region, .. } => prop_assert_eq!(&entry.name, &region),
            Provenance::DipoleApproximation { .. } => prop_assert!(false, "dipole at {:?}", point),
        }
    }
}

// Property: estimates are finite declinations in (-180, 180]
proptest! {
    #[test]
    fn prop_estimate_is_finite(point in point_strategy(), date in date_strategy()) {
        let result = DeclinationEstimator::default().estimate(&DeclinationRequest::new(point, date));
        prop_assert!(result.declination > -180.0 && result.declination <= 180.0);
        prop_assert!(result.inclination.is_finite());
        prop_assert!(result.total_intensity > 0.0);
    }
}

// Property: corrected azimuths are in the range [0, 360)
proptest! {
    #[test]
    fn prop_corrected_azimuth_range(
        azimuth in 0.0f64..360.0,
        declination in -30.0f64..=30.0,
        convergence in -5.0f64..=5.0
    ) {
        let result = correct_azimuth(azimuth, declination, convergence);
        prop_assert!((0.0..360.0).contains(&result.true_azimuth));
        prop_assert!((0.0..360.0).contains(&result.grid_azimuth));
    }
}
