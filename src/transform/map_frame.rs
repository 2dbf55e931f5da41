//! Station map: stations joined with their metrics for one period, plus the settings a
//! scatter-map widget needs to draw them.

use crate::constants::{
    COLUMNS_FOR_MAP_FRAME, COL_HEIGHT, COL_LAT, COL_LON, COL_STATION_ABBR, COL_STATION_NAME,
    COL_STATION_TYPE, LABEL_ALTITUDE, LABEL_SHORT_CODE, LABEL_STATION_TYPE,
};
use crate::filtering::DashboardFrameFilterExt;
use crate::types::parameter::{label_renames, Parameter};
use crate::types::station::Station;
use crate::types::time_period::TimePeriod;
use crate::weather_data::error::DataError;
use crate::weather_data::extractor::{get_floats, get_strings};
use polars::prelude::*;
use serde::Serialize;

/// Stations with their metric values for `time_period`, one row per station with metrics.
///
/// Station columns are relabelled for display (`Station Type`, `Short Code` and an
/// `Altitude` string such as `"1139 m.a.s.l"`), joined on the short code with the metrics of
/// the period, and parameter columns renamed to their display labels. Stations without
/// metrics for the period are left out.
pub fn create_station_frame_for_map(
    stations: LazyFrame,
    metrics: LazyFrame,
    time_period: TimePeriod,
) -> Result<DataFrame, DataError> {
    let (existing, new) = label_renames();
    let map_columns: Vec<Expr> = COLUMNS_FOR_MAP_FRAME.into_iter().map(col).collect();

    Ok(stations
        .with_columns([
            col(COL_STATION_TYPE).alias(LABEL_STATION_TYPE),
            col(COL_STATION_ABBR).alias(LABEL_SHORT_CODE),
            concat_str(
                [
                    col(COL_HEIGHT)
                        .cast(DataType::Int16)
                        .cast(DataType::String),
                    lit(" m.a.s.l"),
                ],
                "",
                false,
            )
            .alias(LABEL_ALTITUDE),
        ])
        .select(map_columns)
        .join(
            metrics
                .filter_time_period(time_period)
                .drop([COL_STATION_NAME]),
            [col(LABEL_SHORT_CODE)],
            [col(COL_STATION_ABBR)],
            JoinArgs::new(JoinType::Inner),
        )
        .rename(existing, new, false)
        .collect()?)
}

/// Settings for drawing the station frame as a scatter map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterMapSpec {
    pub lat: String,
    pub lon: String,
    /// Column driving the point colour: the parameter label, or `Station Type`.
    pub color: String,
    pub hover_name: String,
    /// Columns listed in the hover box, with whether each is shown.
    pub hover_data: Vec<(String, bool)>,
    pub size_max: u32,
    pub zoom: u32,
    pub map_style: String,
    pub title: String,
    pub subtitle: Option<String>,
}

pub fn create_scatter_map_kwargs(
    time_period: TimePeriod,
    parameter: Option<Parameter>,
) -> ScatterMapSpec {
    ScatterMapSpec {
        lat: COL_LAT.to_string(),
        lon: COL_LON.to_string(),
        color: parameter
            .map(|p| p.label())
            .unwrap_or(LABEL_STATION_TYPE)
            .to_string(),
        hover_name: COL_STATION_NAME.to_string(),
        hover_data: vec![
            (LABEL_STATION_TYPE.to_string(), false),
            (COL_LAT.to_string(), false),
            (COL_LON.to_string(), false),
            (LABEL_SHORT_CODE.to_string(), true),
            (LABEL_ALTITUDE.to_string(), true),
        ],
        size_max: 15,
        zoom: 6,
        map_style: "carto-positron".to_string(),
        title: parameter
            .map(|p| p.label())
            .unwrap_or("Stations")
            .to_string(),
        subtitle: parameter.map(|_| format!("Over the last {} days", time_period.days())),
    }
}

/// A station drawn on the map, with the value of the colouring parameter if any.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapPoint {
    pub station: Station,
    pub altitude_label: String,
    pub value: Option<f64>,
}

/// Reads the map frame into points; `parameter` selects the value column.
pub fn map_points(
    map_frame: &DataFrame,
    parameter: Option<Parameter>,
) -> Result<Vec<MapPoint>, DataError> {
    let codes = get_strings(map_frame, LABEL_SHORT_CODE)?;
    let names = get_strings(map_frame, COL_STATION_NAME)?;
    let types = get_strings(map_frame, LABEL_STATION_TYPE)?;
    let lats = get_floats(map_frame, COL_LAT)?;
    let lons = get_floats(map_frame, COL_LON)?;
    let altitudes = get_strings(map_frame, LABEL_ALTITUDE)?;
    let values = match parameter {
        Some(p) if map_frame.column(p.label()).is_ok() => get_floats(map_frame, p.label())?,
        _ => vec![None; map_frame.height()],
    };

    let mut points = Vec::with_capacity(map_frame.height());
    for i in 0..map_frame.height() {
        let altitude_label = altitudes[i].clone().unwrap_or_default();
        points.push(MapPoint {
            station: Station {
                short_code: codes[i].clone().unwrap_or_default(),
                name: names[i].clone().unwrap_or_default(),
                station_type: types[i].clone(),
                latitude: lats[i],
                longitude: lons[i],
                altitude: altitude_label
                    .split_whitespace()
                    .next()
                    .and_then(|h| h.parse().ok()),
            },
            altitude_label,
            value: values[i],
        });
    }
    Ok(points)
}
