//! Builds the time-series chart frame: readings of the selected stations, bucketed into
//! fixed windows and summarised with each parameter's aggregation.

use crate::constants::{BUCKET_HOURS, COL_STATION_NAME, COL_TIMESTAMP, LABEL_STATION, LABEL_TIME};
use crate::filtering::DashboardFrameFilterExt;
use crate::types::parameter::{aggregation_exprs, label_renames, Parameter};
use crate::weather_data::error::DataError;
use chrono::{Duration, NaiveDateTime};
use polars::prelude::*;

/// Start of the bucket each reading falls into.
///
/// Buckets are `BUCKET_HOURS` wide and anchored at `window_start`, so a window shorter
/// than one bucket never straddles a bucket boundary.
fn bucket_start(window_start: NaiveDateTime) -> Expr {
    let start_ms = window_start.and_utc().timestamp_millis();
    let bucket_ms = Duration::hours(BUCKET_HOURS).num_milliseconds();

    ((col(COL_TIMESTAMP)
        .cast(DataType::Datetime(TimeUnit::Milliseconds, None))
        .cast(DataType::Int64)
        - lit(start_ms))
    .floor_div(lit(bucket_ms))
        * lit(bucket_ms)
        + lit(start_ms))
    .cast(DataType::Datetime(TimeUnit::Milliseconds, None))
    .alias(COL_TIMESTAMP)
}

/// Readings of `stations` within `look_back` before `reference_time`, one row per station
/// and bucket.
///
/// Parameter columns are aggregated (precipitation summed, the rest averaged), rounded to
/// one decimal and renamed to their display labels; the timestamp and station columns
/// become `Time` and `Station`. Rows are ordered by station, then time. Columns that are not
/// known parameters are dropped.
///
/// # Errors
///
/// Returns [`DataError::DataFrameProcessing`] if the frame's schema cannot be resolved.
pub fn create_area_chart_frame(
    weather: LazyFrame,
    stations: &[String],
    look_back: Duration,
    reference_time: NaiveDateTime,
) -> Result<LazyFrame, DataError> {
    let mut weather = weather;
    let schema = weather.collect_schema()?;
    let window_start = reference_time - look_back;

    let rounded: Vec<Expr> = Parameter::ALL
        .into_iter()
        .filter(|p| schema.contains(p.short_code()))
        .map(|p| col(p.short_code()).cast(DataType::Float64).round(1))
        .collect();

    let (mut existing, mut new) = label_renames();
    existing.extend([COL_TIMESTAMP, COL_STATION_NAME]);
    new.extend([LABEL_TIME, LABEL_STATION]);

    Ok(weather
        .filter_since(window_start)
        .filter_until(reference_time)
        .filter_stations(stations)
        .with_column(bucket_start(window_start))
        .group_by([col(COL_STATION_NAME), col(COL_TIMESTAMP)])
        .agg(aggregation_exprs(&schema))
        .with_columns(rounded)
        .sort(
            [COL_STATION_NAME, COL_TIMESTAMP],
            SortMultipleOptions::default(),
        )
        .rename(existing, new, false))
}
