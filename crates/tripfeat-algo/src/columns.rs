//! Column access and timestamp parsing helpers.
//!
//! All table access flows through here so that collaborator errors are
//! reported as the crate's own kinds: an absent column is `MissingColumn`, a
//! null cell, wrong dtype, or malformed timestamp is `UnparseableValue`.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use polars::prelude::*;
use tripfeat_core::{FeatureError, FeatureResult, LatLon};

/// Formats accepted when coercing a string column to timestamps.
const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S UTC",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
];

pub(crate) fn table_error(err: PolarsError) -> FeatureError {
    FeatureError::Other(err.to_string())
}

pub(crate) fn require_column<'a>(df: &'a DataFrame, name: &str) -> FeatureResult<&'a Series> {
    df.column(name)
        .map_err(|_| FeatureError::MissingColumn(name.to_string()))
}

/// Extract a column as a dense `Vec<f64>`; nulls and non-float dtypes fail.
pub(crate) fn dense_f64(df: &DataFrame, name: &str) -> FeatureResult<Vec<f64>> {
    let series = require_column(df, name)?;
    let ca = series.f64().map_err(|_| FeatureError::UnparseableValue {
        column: name.to_string(),
        value: format!("expected float column, found dtype {}", series.dtype()),
    })?;
    ca.into_iter()
        .enumerate()
        .map(|(row, value)| {
            value.ok_or_else(|| FeatureError::UnparseableValue {
                column: name.to_string(),
                value: format!("null at row {row}"),
            })
        })
        .collect()
}

/// Zip a latitude and longitude column pair into coordinates.
pub(crate) fn latlon_columns(
    df: &DataFrame,
    lat_name: &str,
    lon_name: &str,
) -> FeatureResult<Vec<LatLon>> {
    let lats = dense_f64(df, lat_name)?;
    let lons = dense_f64(df, lon_name)?;
    Ok(lats
        .into_iter()
        .zip(lons)
        .map(|(lat, lon)| LatLon::new(lat, lon))
        .collect())
}

/// Parse one raw timestamp string, trying each accepted format, then a bare
/// date with a midnight time.
pub(crate) fn parse_timestamp(column: &str, raw: &str) -> FeatureResult<NaiveDateTime> {
    for format in TIMESTAMP_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(parsed);
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        if let Some(parsed) = date.and_hms_opt(0, 0, 0) {
            return Ok(parsed);
        }
    }
    Err(FeatureError::UnparseableValue {
        column: column.to_string(),
        value: raw.to_string(),
    })
}

/// Extract a column as timestamps. String columns are parsed; columns that
/// are already Datetime are read back through their physical representation.
pub(crate) fn timestamps(df: &DataFrame, name: &str) -> FeatureResult<Vec<NaiveDateTime>> {
    let series = require_column(df, name)?;
    match series.dtype() {
        DataType::Utf8 => {
            let ca = series.utf8().map_err(table_error)?;
            ca.into_iter()
                .enumerate()
                .map(|(row, value)| {
                    let raw = value.ok_or_else(|| FeatureError::UnparseableValue {
                        column: name.to_string(),
                        value: format!("null at row {row}"),
                    })?;
                    parse_timestamp(name, raw)
                })
                .collect()
        }
        DataType::Datetime(unit, _) => {
            let unit = *unit;
            let ca = series.datetime().map_err(table_error)?;
            ca.into_iter()
                .enumerate()
                .map(|(row, value)| {
                    let ticks = value.ok_or_else(|| FeatureError::UnparseableValue {
                        column: name.to_string(),
                        value: format!("null at row {row}"),
                    })?;
                    naive_from_ticks(ticks, unit).ok_or_else(|| FeatureError::UnparseableValue {
                        column: name.to_string(),
                        value: format!("timestamp out of range at row {row}"),
                    })
                })
                .collect()
        }
        other => Err(FeatureError::UnparseableValue {
            column: name.to_string(),
            value: format!("expected string or datetime column, found dtype {other}"),
        }),
    }
}

/// Build a millisecond-unit Datetime series from parsed timestamps, used to
/// write a coerced timestamp column back in place of its string source.
pub(crate) fn datetime_series(name: &str, stamps: &[NaiveDateTime]) -> Series {
    let millis: Vec<i64> = stamps
        .iter()
        .map(|dt| dt.and_utc().timestamp_millis())
        .collect();
    Int64Chunked::from_vec(name, millis)
        .into_datetime(TimeUnit::Milliseconds, None)
        .into_series()
}

fn naive_from_ticks(ticks: i64, unit: TimeUnit) -> Option<NaiveDateTime> {
    let utc = match unit {
        TimeUnit::Milliseconds => DateTime::from_timestamp_millis(ticks),
        TimeUnit::Microseconds => DateTime::from_timestamp_micros(ticks),
        TimeUnit::Nanoseconds => DateTime::from_timestamp(
            ticks.div_euclid(1_000_000_000),
            ticks.rem_euclid(1_000_000_000) as u32,
        ),
    };
    utc.map(|dt| dt.naive_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_parse_timestamp_accepted_formats() {
        let with_suffix = parse_timestamp("ts", "2024-07-04 14:30:00 UTC").unwrap();
        assert_eq!(with_suffix.hour(), 14);

        let plain = parse_timestamp("ts", "2024-07-04 14:30:00").unwrap();
        assert_eq!(plain, with_suffix);

        let date_only = parse_timestamp("ts", "2024-12-21").unwrap();
        assert_eq!(date_only.month(), 12);
        assert_eq!(date_only.hour(), 0);
    }

    #[test]
    fn test_parse_timestamp_rejects_garbage() {
        let err = parse_timestamp("ts", "not-a-date").unwrap_err();
        assert!(matches!(err, FeatureError::UnparseableValue { .. }));
    }

    #[test]
    fn test_datetime_series_round_trip() {
        let stamps = vec![
            parse_timestamp("ts", "2024-07-04 14:30:00").unwrap(),
            parse_timestamp("ts", "2016-01-01 00:00:00").unwrap(),
        ];
        let series = datetime_series("ts", &stamps);
        let df = DataFrame::new(vec![series]).unwrap();
        let back = timestamps(&df, "ts").unwrap();
        assert_eq!(back, stamps);
    }

    #[test]
    fn test_dense_f64_reports_missing_column() {
        let df = DataFrame::new(vec![Series::new("a", vec![1.0f64])]).unwrap();
        let err = dense_f64(&df, "b").unwrap_err();
        assert!(matches!(err, FeatureError::MissingColumn(name) if name == "b"));
    }
}
