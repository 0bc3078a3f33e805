//! Trip featurizer tests

use polars::prelude::*;
use tripfeat_algo::TripFeaturizer;
use tripfeat_core::{FeatureError, LatLon, ReferencePoints};

/// Two trips: an identical-point trip at the JFK coordinates and a
/// midtown-bound trip on the Fourth of July.
fn trip_frame() -> DataFrame {
    df!(
        "pickup_latitude" => [40.645494f64, 40.7128],
        "pickup_longitude" => [-73.785937f64, -74.0060],
        "dropoff_latitude" => [40.645494f64, 40.7580],
        "dropoff_longitude" => [-73.785937f64, -73.9855],
        "pickup_datetime" => ["2024-07-04 14:30:00 UTC", "2016-12-21 00:00:00 UTC"],
    )
    .unwrap()
}

fn f64_at(df: &DataFrame, name: &str, row: usize) -> f64 {
    df.column(name)
        .unwrap_or_else(|_| panic!("column '{name}' must exist"))
        .f64()
        .unwrap()
        .get(row)
        .unwrap()
}

fn i32_at(df: &DataFrame, name: &str, row: usize) -> i32 {
    df.column(name)
        .unwrap_or_else(|_| panic!("column '{name}' must exist"))
        .i32()
        .unwrap()
        .get(row)
        .unwrap()
}

#[test]
fn test_time_features_concrete_scenario() {
    let mut featurizer = TripFeaturizer::new(trip_frame());
    featurizer.add_time_features().expect("time features");
    let df = featurizer.into_inner();

    assert_eq!(i32_at(&df, "hour", 0), 14);
    assert_eq!(i32_at(&df, "day", 0), 4);
    assert_eq!(i32_at(&df, "month", 0), 7);
    assert_eq!(i32_at(&df, "year", 0), 2024);

    // Destructive step: the raw timestamp column is gone.
    assert!(df.column("pickup_datetime").is_err());
}

#[test]
fn test_extract_keeps_raw_timestamp_until_dropped() {
    let mut featurizer = TripFeaturizer::new(trip_frame());
    featurizer.extract_time_features().unwrap();
    assert!(featurizer.frame().column("pickup_datetime").is_ok());
    assert_eq!(i32_at(featurizer.frame(), "year", 1), 2016);

    featurizer.drop_pickup_datetime().unwrap();
    assert!(featurizer.frame().column("pickup_datetime").is_err());

    // A second drop reports the column as missing.
    let err = featurizer.drop_pickup_datetime().unwrap_err();
    assert!(matches!(err, FeatureError::MissingColumn(_)));
}

#[test]
fn test_identical_points_yield_zero_degree_distances() {
    let mut featurizer = TripFeaturizer::new(trip_frame());
    featurizer.add_distance_feature().unwrap();
    featurizer.add_coordinate_differences().unwrap();
    let df = featurizer.into_inner();

    assert_eq!(f64_at(&df, "distance", 0), 0.0);
    assert_eq!(f64_at(&df, "abs_long_diff", 0), 0.0);
    assert_eq!(f64_at(&df, "abs_lat_diff", 0), 0.0);

    assert!(f64_at(&df, "distance", 1) > 0.0);
}

#[test]
fn test_airport_distances_use_degree_space() {
    let mut featurizer = TripFeaturizer::new(trip_frame());
    featurizer.add_distance_to_airports().unwrap();
    let df = featurizer.into_inner();

    for point in ["center", "jfk", "lga", "nla"] {
        assert!(df
            .get_column_names()
            .contains(&format!("pickup_distance_to_{point}").as_str()));
        assert!(df
            .get_column_names()
            .contains(&format!("dropoff_distance_to_{point}").as_str()));
    }

    // Row 0 picks up exactly at JFK.
    assert_eq!(f64_at(&df, "pickup_distance_to_jfk", 0), 0.0);
    assert!(f64_at(&df, "pickup_distance_to_center", 0) > 0.0);
}

#[test]
fn test_coordinate_differences_match_raw_degrees() {
    let mut featurizer = TripFeaturizer::new(trip_frame());
    featurizer.add_coordinate_differences().unwrap();
    let df = featurizer.into_inner();

    assert!((f64_at(&df, "abs_long_diff", 1) - (74.0060 - 73.9855)).abs() < 1e-9);
    assert!((f64_at(&df, "abs_lat_diff", 1) - (40.7580 - 40.7128)).abs() < 1e-9);
}

#[test]
fn test_add_all_features_runs_fixed_sequence() {
    let mut featurizer = TripFeaturizer::new(trip_frame());
    let summary = featurizer.add_all_features().expect("full featurization");
    let df = featurizer.into_inner();

    assert_eq!(summary.rows, 2);
    // 15 new columns minus the dropped timestamp.
    assert_eq!(summary.columns_added, 14);

    for name in [
        "distance",
        "hour",
        "day",
        "month",
        "year",
        "pickup_distance_to_center",
        "dropoff_distance_to_nla",
        "abs_long_diff",
        "abs_lat_diff",
    ] {
        assert!(
            df.get_column_names().contains(&name),
            "missing expected column '{name}'"
        );
    }
    assert!(df.column("pickup_datetime").is_err());
}

#[test]
fn test_custom_reference_points() {
    // A deployment elsewhere supplies its own coordinate set; a pickup at the
    // custom center must then be at distance zero from it.
    let refs = ReferencePoints {
        center: LatLon::new(40.7128, -74.0060),
        ..ReferencePoints::nyc()
    };
    let mut featurizer = TripFeaturizer::with_reference_points(trip_frame(), refs);
    featurizer.add_distance_to_airports().unwrap();
    let df = featurizer.into_inner();

    assert_eq!(f64_at(&df, "pickup_distance_to_center", 1), 0.0);
}

#[test]
fn test_wrong_datetime_format_is_reported() {
    let df = df!(
        "pickup_latitude" => [40.7128f64],
        "pickup_longitude" => [-74.0060f64],
        "dropoff_latitude" => [40.7580f64],
        "dropoff_longitude" => [-73.9855f64],
        // Missing the literal " UTC" suffix required by the fixed format.
        "pickup_datetime" => ["2024-07-04 14:30:00"],
    )
    .unwrap();
    let mut featurizer = TripFeaturizer::new(df);
    let err = featurizer.add_time_features().unwrap_err();
    assert!(
        matches!(err, FeatureError::UnparseableValue { ref column, .. } if column == "pickup_datetime"),
        "unexpected error: {err}"
    );
}

#[test]
fn test_failure_leaves_earlier_columns_in_place() {
    // No pickup_datetime column: add_all_features fails at the time step but
    // the distance column written before the failure remains.
    let df = df!(
        "pickup_latitude" => [40.7128f64],
        "pickup_longitude" => [-74.0060f64],
        "dropoff_latitude" => [40.7580f64],
        "dropoff_longitude" => [-73.9855f64],
    )
    .unwrap();
    let mut featurizer = TripFeaturizer::new(df);
    let err = featurizer.add_all_features().unwrap_err();
    assert!(matches!(err, FeatureError::MissingColumn(_)));
    assert!(featurizer.frame().column("distance").is_ok());
}
