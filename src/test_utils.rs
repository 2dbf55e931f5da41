//! Fixture data directory shared by the unit tests.

use crate::types::parameter::Parameter;
use chrono::{Duration, NaiveDate, NaiveDateTime};
use polars::prelude::*;
use std::fs::File;
use std::path::Path;
use tempfile::TempDir;

/// Stations (short code, name) present in the fixture station table, without duplicates.
pub const FIXTURE_STATIONS: [(&str, &str); 4] = [
    ("AIR", "Airolo"),
    ("BAS", "Basel / Binningen"),
    ("LUG", "Lugano"),
    ("SMA", "Zürich / Fluntern"),
];

/// Stations with readings in the fixture weather file.
pub const FIXTURE_READING_STATIONS: [&str; 2] = ["Airolo", "Basel / Binningen"];

/// Hourly precipitation in every fixture reading.
pub const FIXTURE_HOURLY_PRECIPITATION: f64 = 0.5;

/// Air temperature in every fixture reading.
pub const FIXTURE_TEMPERATURE: f64 = 12.04;

pub fn reference_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 6, 15)
        .and_then(|d| d.and_hms_opt(12, 0, 0))
        .expect("valid fixture time")
}

/// Whether the fixture metrics file holds a row for this station and period.
///
/// Basel has no 3-day row (no delta), Lugano no 1-day row (no value), Zürich no rows at all.
pub fn fixture_has_metric(abbr: &str, days: u32) -> bool {
    match abbr {
        "AIR" => true,
        "BAS" => days != 3,
        "LUG" => days != 1,
        _ => false,
    }
}

pub fn fixture_metric_value(abbr: &str, parameter: Parameter, days: u32) -> f64 {
    let station_base = match abbr {
        "AIR" => 10.0,
        "BAS" => 20.0,
        _ => 30.0,
    };
    let parameter_offset = Parameter::ALL
        .iter()
        .position(|p| *p == parameter)
        .unwrap_or_default() as f64;
    station_base + parameter_offset + f64::from(days) * 0.5
}

fn write_parquet(dir: &Path, file_name: &str, mut df: DataFrame) -> PolarsResult<()> {
    let file = File::create(dir.join(file_name))?;
    ParquetWriter::new(file).finish(&mut df)?;
    Ok(())
}

fn stations_frame() -> PolarsResult<DataFrame> {
    df!(
        "station_abbr" => ["AIR", "BAS", "LUG", "SMA", "AIR"],
        "station_name" => ["Airolo", "Basel / Binningen", "Lugano", "Zürich / Fluntern", "Airolo"],
        "station_type_en" => [
            "Automatic weather stations",
            "Automatic weather stations",
            "Automatic weather stations",
            "Automatic precipitation stations",
            "Automatic weather stations",
        ],
        "station_coordinates_wgs84_lat" => [46.52813f64, 47.54114, 46.00401, 47.37780, 46.52813],
        "station_coordinates_wgs84_lon" => [8.60849f64, 7.58356, 8.96037, 8.56575, 8.60849],
        "station_height_masl" => [1139.0f64, 316.0, 273.0, 556.0, 1139.0],
    )
}

fn parameters_frame() -> PolarsResult<DataFrame> {
    df!(
        "parameter_shortname" => ["rre150h0", "tre200h0", "ure200h0", "fu3010h0", "tde200h0", "gre000h0"],
        "parameter_description_en" => [
            "Precipitation; hourly total (mm)",
            "Air temperature 2 m above ground; hourly mean (°C)",
            "Relative air humidity 2 m above ground; hourly mean (%)",
            "Wind speed scalar; hourly mean (km/h)",
            "Dew point 2 m above ground; hourly mean (°C)",
            "Global radiation; hourly mean",
        ],
    )
}

/// Hourly long-format readings for the last 40 days before [`reference_time`].
fn weather_frame() -> PolarsResult<DataFrame> {
    let mut abbrs = Vec::new();
    let mut names = Vec::new();
    let mut parameters = Vec::new();
    let mut timestamps = Vec::new();
    let mut values = Vec::new();

    let start = reference_time() - Duration::days(40);
    for (abbr, name) in [("AIR", "Airolo"), ("BAS", "Basel / Binningen")] {
        for hour in 0..(40 * 24) {
            let ts = start + Duration::hours(hour);
            for (parameter, value) in [
                (Parameter::Precipitation, FIXTURE_HOURLY_PRECIPITATION),
                (Parameter::AirTemperature, FIXTURE_TEMPERATURE),
            ] {
                abbrs.push(abbr);
                names.push(name);
                parameters.push(parameter.short_code());
                timestamps.push(ts);
                values.push(value);
            }
        }
    }

    df!(
        "station_abbr" => abbrs,
        "station_name" => names,
        "parameter" => parameters,
        "reference_timestamp" => timestamps,
        "value" => values,
    )
}

fn metrics_frame() -> PolarsResult<DataFrame> {
    let mut abbrs = Vec::new();
    let mut names = Vec::new();
    let mut periods = Vec::new();
    let mut parameters = Vec::new();
    let mut values = Vec::new();

    for (abbr, name) in FIXTURE_STATIONS {
        for days in [1u32, 3, 7, 14, 30] {
            if !fixture_has_metric(abbr, days) {
                continue;
            }
            for parameter in Parameter::ALL {
                abbrs.push(abbr);
                names.push(name);
                periods.push(i64::from(days));
                parameters.push(parameter.short_code());
                values.push(fixture_metric_value(abbr, parameter, days));
            }
        }
    }

    df!(
        "station_abbr" => abbrs,
        "station_name" => names,
        "time_period" => periods,
        "parameter" => parameters,
        "value" => values,
    )
}

/// Writes all four data files into a fresh temporary directory.
pub fn write_fixture_dir() -> PolarsResult<TempDir> {
    let dir = tempfile::tempdir()?;
    write_parquet(dir.path(), "meta_stations.parquet", stations_frame()?)?;
    write_parquet(dir.path(), "meta_parameters.parquet", parameters_frame()?)?;
    write_parquet(dir.path(), "weather_data.parquet", weather_frame()?)?;
    write_parquet(dir.path(), "metrics.parquet", metrics_frame()?)?;
    Ok(dir)
}
