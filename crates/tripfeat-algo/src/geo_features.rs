//! Stateless geo/time feature functions over a trip table.
//!
//! Each function takes the table and returns it augmented with one or more
//! derived columns. There is no shared state between functions; any subset
//! may be invoked in any order, except that the calendar features need a
//! timestamp column already present in the input. All functions mutate and
//! return the same table (callers must not assume immutability of the input)
//! and are idempotent: re-running overwrites a derived column with the same
//! values.
//!
//! Every distance column is kilometers rounded to two decimals. Every value
//! is row-independent, so batches are projected in parallel internally.

use crate::columns::{datetime_series, latlon_columns, table_error, timestamps};
use crate::crs::{planar_distance, PlaneProjector};
use chrono::{Datelike, Timelike};
use polars::prelude::*;
use tripfeat_core::{geometry, FeatureResult, LandmarkSet, Season, TimeOfDay};

/// Add `distance_geo_km`: pickup-to-dropoff distance in the EPSG:2263 plane.
///
/// Both point sets are reprojected from EPSG:4326 and the planar Euclidean
/// distance is divided by 1000 and rounded to two decimals. EPSG:2263 planar
/// units are US survey feet, so this scale is not metric kilometers; models
/// trained on existing exports depend on it, and it must not be corrected
/// here without retraining them.
pub fn add_distance_feature(mut df: DataFrame) -> FeatureResult<DataFrame> {
    let pickups = latlon_columns(&df, "pickup_latitude", "pickup_longitude")?;
    let dropoffs = latlon_columns(&df, "dropoff_latitude", "dropoff_longitude")?;

    let projector = PlaneProjector::nyc_long_island()?;
    let pickup_xy = projector.project_all(&pickups)?;
    let dropoff_xy = projector.project_all(&dropoffs)?;

    let values: Vec<f64> = pickup_xy
        .iter()
        .zip(&dropoff_xy)
        .map(|(pickup, dropoff)| geometry::round2(planar_distance(*pickup, *dropoff) / 1000.0))
        .collect();
    df.with_column(Series::new("distance_geo_km", values))
        .map_err(table_error)?;
    Ok(df)
}

/// Add `evklid_distance_km`: straight-line pickup-to-dropoff distance on the
/// local planar approximation (111320 m per latitude degree, longitude scaled
/// by the cosine of the mean latitude). Column name kept for parity with
/// previously exported training tables.
pub fn add_euclidean_distance_feature(mut df: DataFrame) -> FeatureResult<DataFrame> {
    let pickups = latlon_columns(&df, "pickup_latitude", "pickup_longitude")?;
    let dropoffs = latlon_columns(&df, "dropoff_latitude", "dropoff_longitude")?;

    let values: Vec<f64> = pickups
        .iter()
        .zip(&dropoffs)
        .map(|(pickup, dropoff)| {
            geometry::round2(geometry::euclidean_approx_m(*pickup, *dropoff) / 1000.0)
        })
        .collect();
    df.with_column(Series::new("evklid_distance_km", values))
        .map_err(table_error)?;
    Ok(df)
}

/// Add `manhattan_distance_km`: block-wise pickup-to-dropoff distance, the
/// sum of absolute latitude and longitude deltas on the same local planar
/// approximation as [`add_euclidean_distance_feature`].
pub fn add_manhattan_distance_feature(mut df: DataFrame) -> FeatureResult<DataFrame> {
    let pickups = latlon_columns(&df, "pickup_latitude", "pickup_longitude")?;
    let dropoffs = latlon_columns(&df, "dropoff_latitude", "dropoff_longitude")?;

    let values: Vec<f64> = pickups
        .iter()
        .zip(&dropoffs)
        .map(|(pickup, dropoff)| {
            geometry::round2(geometry::manhattan_approx_m(*pickup, *dropoff) / 1000.0)
        })
        .collect();
    df.with_column(Series::new("manhattan_distance_km", values))
        .map_err(table_error)?;
    Ok(df)
}

/// Add two columns per landmark, `distance_to_<slug>_from_pickup_km` and
/// `distance_to_<slug>_from_dropoff_km`, in the EPSG:2263 plane with the same
/// /1000 scale as [`add_distance_feature`]. Each landmark is projected once
/// and measured against every pickup and dropoff point.
pub fn add_distances_to_top_places(
    mut df: DataFrame,
    landmarks: &LandmarkSet,
) -> FeatureResult<DataFrame> {
    let pickups = latlon_columns(&df, "pickup_latitude", "pickup_longitude")?;
    let dropoffs = latlon_columns(&df, "dropoff_latitude", "dropoff_longitude")?;

    let projector = PlaneProjector::nyc_long_island()?;
    let pickup_xy = projector.project_all(&pickups)?;
    let dropoff_xy = projector.project_all(&dropoffs)?;

    for landmark in landmarks.iter() {
        let site = projector.project(landmark.coord)?;
        let slug = landmark.column_slug();

        let from_pickup: Vec<f64> = pickup_xy
            .iter()
            .map(|point| geometry::round2(planar_distance(*point, site) / 1000.0))
            .collect();
        let from_dropoff: Vec<f64> = dropoff_xy
            .iter()
            .map(|point| geometry::round2(planar_distance(*point, site) / 1000.0))
            .collect();

        df.with_column(Series::new(
            &format!("distance_to_{slug}_from_pickup_km"),
            from_pickup,
        ))
        .map_err(table_error)?;
        df.with_column(Series::new(
            &format!("distance_to_{slug}_from_dropoff_km"),
            from_dropoff,
        ))
        .map_err(table_error)?;
    }
    Ok(df)
}

/// Add `time_of_day`: one of Morning/Afternoon/Evening/Night from the hour of
/// the named timestamp column. A string column is coerced to Datetime in
/// place first, so downstream calendar features see a parsed column.
pub fn add_time_of_day_feature(mut df: DataFrame, time_column: &str) -> FeatureResult<DataFrame> {
    let stamps = timestamps(&df, time_column)?;
    df.with_column(datetime_series(time_column, &stamps))
        .map_err(table_error)?;

    let labels: Vec<&'static str> = stamps
        .iter()
        .map(|stamp| TimeOfDay::classify(stamp.hour()).label())
        .collect();
    df.with_column(Series::new("time_of_day", labels))
        .map_err(table_error)?;
    Ok(df)
}

/// Add `season`: one of Spring/Summer/Autumn/Winter from the month and day of
/// the named timestamp column, boundaries applied within each row's own year.
/// A string column is coerced to Datetime in place first.
pub fn add_season_feature(mut df: DataFrame, date_column: &str) -> FeatureResult<DataFrame> {
    let stamps = timestamps(&df, date_column)?;
    df.with_column(datetime_series(date_column, &stamps))
        .map_err(table_error)?;

    let labels: Vec<&'static str> = stamps
        .iter()
        .map(|stamp| Season::classify(stamp.month(), stamp.day()).label())
        .collect();
    df.with_column(Series::new("season", labels))
        .map_err(table_error)?;
    Ok(df)
}
