//! Trip featurizer: a fixed sequence of in-place feature mutations.
//!
//! [`TripFeaturizer`] binds one trip table plus a set of reference
//! coordinates (city center and three airports) and exposes an
//! add-all-features entry point. Unlike the projected and planar-approximated
//! distances in [`crate::geo_features`], every distance written here is a raw
//! degree-space Euclidean magnitude: a relative feature for the model, not a
//! physical distance.

use crate::columns::{latlon_columns, require_column, table_error};
use chrono::{Datelike, NaiveDateTime, Timelike};
use polars::prelude::*;
use tripfeat_core::{geometry, FeatureError, FeatureResult, ReferencePoints};

/// Fixed format of the `pickup_datetime` input column.
pub const PICKUP_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

/// Summary statistics from a full featurization pass.
/// Returned to callers so they can log how many rows and columns were touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripFeatureSummary {
    pub rows: usize,
    /// Net column growth: features added minus the dropped timestamp column.
    pub columns_added: usize,
}

/// Adds degree-space distance, calendar, airport-distance, and
/// coordinate-difference features to one trip table.
pub struct TripFeaturizer {
    df: DataFrame,
    reference_points: ReferencePoints,
}

impl TripFeaturizer {
    /// Bind a table with the NYC reference coordinates.
    pub fn new(df: DataFrame) -> Self {
        Self::with_reference_points(df, ReferencePoints::nyc())
    }

    /// Bind a table with a caller-supplied coordinate set, for deployments
    /// outside NYC.
    pub fn with_reference_points(df: DataFrame, reference_points: ReferencePoints) -> Self {
        Self {
            df,
            reference_points,
        }
    }

    pub fn frame(&self) -> &DataFrame {
        &self.df
    }

    pub fn into_inner(self) -> DataFrame {
        self.df
    }

    /// Add `distance`: degree-space Euclidean distance between pickup and
    /// dropoff.
    pub fn add_distance_feature(&mut self) -> FeatureResult<()> {
        let pickups = latlon_columns(&self.df, "pickup_latitude", "pickup_longitude")?;
        let dropoffs = latlon_columns(&self.df, "dropoff_latitude", "dropoff_longitude")?;

        let values: Vec<f64> = pickups
            .iter()
            .zip(&dropoffs)
            .map(|(pickup, dropoff)| geometry::degree_distance(*pickup, *dropoff))
            .collect();
        self.df
            .with_column(Series::new("distance", values))
            .map_err(table_error)?;
        Ok(())
    }

    /// Add `hour`, `day`, `month`, `year` integer columns parsed from
    /// `pickup_datetime`, keeping the source column. Pair with
    /// [`Self::drop_pickup_datetime`] (or use [`Self::add_time_features`])
    /// when the raw timestamp is no longer needed downstream.
    pub fn extract_time_features(&mut self) -> FeatureResult<()> {
        let stamps = self.pickup_timestamps()?;

        let hours: Vec<i32> = stamps.iter().map(|dt| dt.hour() as i32).collect();
        let days: Vec<i32> = stamps.iter().map(|dt| dt.day() as i32).collect();
        let months: Vec<i32> = stamps.iter().map(|dt| dt.month() as i32).collect();
        let years: Vec<i32> = stamps.iter().map(|dt| dt.year()).collect();

        self.df
            .with_column(Series::new("hour", hours))
            .map_err(table_error)?;
        self.df
            .with_column(Series::new("day", days))
            .map_err(table_error)?;
        self.df
            .with_column(Series::new("month", months))
            .map_err(table_error)?;
        self.df
            .with_column(Series::new("year", years))
            .map_err(table_error)?;
        Ok(())
    }

    /// Remove the raw `pickup_datetime` column. Irreversible: downstream
    /// consumers of the featurized table lose the raw timestamp.
    pub fn drop_pickup_datetime(&mut self) -> FeatureResult<()> {
        self.df
            .drop_in_place("pickup_datetime")
            .map_err(|_| FeatureError::MissingColumn("pickup_datetime".to_string()))?;
        Ok(())
    }

    /// Extract the calendar columns, then drop the raw timestamp.
    pub fn add_time_features(&mut self) -> FeatureResult<()> {
        self.extract_time_features()?;
        self.drop_pickup_datetime()
    }

    /// Add `pickup_distance_to_<point>` and `dropoff_distance_to_<point>` for
    /// the city center and each airport, in degree-space units.
    pub fn add_distance_to_airports(&mut self) -> FeatureResult<()> {
        let pickups = latlon_columns(&self.df, "pickup_latitude", "pickup_longitude")?;
        let dropoffs = latlon_columns(&self.df, "dropoff_latitude", "dropoff_longitude")?;

        for (name, site) in self.reference_points.named() {
            let pickup_values: Vec<f64> = pickups
                .iter()
                .map(|pickup| geometry::degree_distance(site, *pickup))
                .collect();
            let dropoff_values: Vec<f64> = dropoffs
                .iter()
                .map(|dropoff| geometry::degree_distance(site, *dropoff))
                .collect();

            self.df
                .with_column(Series::new(
                    &format!("pickup_distance_to_{name}"),
                    pickup_values,
                ))
                .map_err(table_error)?;
            self.df
                .with_column(Series::new(
                    &format!("dropoff_distance_to_{name}"),
                    dropoff_values,
                ))
                .map_err(table_error)?;
        }
        Ok(())
    }

    /// Add `abs_long_diff` and `abs_lat_diff`: absolute pickup-to-dropoff
    /// coordinate differences in raw degrees.
    pub fn add_coordinate_differences(&mut self) -> FeatureResult<()> {
        let pickups = latlon_columns(&self.df, "pickup_latitude", "pickup_longitude")?;
        let dropoffs = latlon_columns(&self.df, "dropoff_latitude", "dropoff_longitude")?;

        let lon_diffs: Vec<f64> = pickups
            .iter()
            .zip(&dropoffs)
            .map(|(pickup, dropoff)| (dropoff.lon - pickup.lon).abs())
            .collect();
        let lat_diffs: Vec<f64> = pickups
            .iter()
            .zip(&dropoffs)
            .map(|(pickup, dropoff)| (dropoff.lat - pickup.lat).abs())
            .collect();

        self.df
            .with_column(Series::new("abs_long_diff", lon_diffs))
            .map_err(table_error)?;
        self.df
            .with_column(Series::new("abs_lat_diff", lat_diffs))
            .map_err(table_error)?;
        Ok(())
    }

    /// Run every feature step in fixed order: distance, time features,
    /// airport distances, coordinate differences. The order only matters
    /// because the time step drops the source timestamp column; the progress
    /// notices are informational and not part of the data contract.
    pub fn add_all_features(&mut self) -> FeatureResult<TripFeatureSummary> {
        let width_before = self.df.width();

        log::info!("adding degree-space distance feature");
        self.add_distance_feature()?;

        log::info!("adding calendar features from pickup_datetime");
        self.add_time_features()?;

        log::info!("adding city-center and airport distances");
        self.add_distance_to_airports()?;

        log::info!("adding absolute coordinate differences");
        self.add_coordinate_differences()?;

        Ok(TripFeatureSummary {
            rows: self.df.height(),
            columns_added: self.df.width().saturating_sub(width_before),
        })
    }

    /// Parse `pickup_datetime` with the fixed `%Y-%m-%d %H:%M:%S UTC` format.
    fn pickup_timestamps(&self) -> FeatureResult<Vec<NaiveDateTime>> {
        let series = require_column(&self.df, "pickup_datetime")?;
        let ca = series.utf8().map_err(|_| FeatureError::UnparseableValue {
            column: "pickup_datetime".to_string(),
            value: format!("expected string column, found dtype {}", series.dtype()),
        })?;
        ca.into_iter()
            .enumerate()
            .map(|(row, value)| {
                let raw = value.ok_or_else(|| FeatureError::UnparseableValue {
                    column: "pickup_datetime".to_string(),
                    value: format!("null at row {row}"),
                })?;
                NaiveDateTime::parse_from_str(raw, PICKUP_DATETIME_FORMAT).map_err(|_| {
                    FeatureError::UnparseableValue {
                        column: "pickup_datetime".to_string(),
                        value: raw.to_string(),
                    }
                })
            })
            .collect()
    }
}
