//! Serializable view model handed to the front-end on every render.

use crate::constants::{LABEL_STATION, LABEL_TIME};
use crate::selection::SelectionState;
use crate::transform::map_frame::{MapPoint, ScatterMapSpec};
use crate::transform::metrics::MetricSection;
use crate::types::parameter::Parameter;
use crate::types::time_period::{TimePeriod, TIME_PERIOD_INITIAL_VALUE};
use crate::weather_data::error::DataError;
use crate::weather_data::extractor::{get_column, get_floats, get_strings};
use chrono::{DateTime, NaiveDateTime};
use polars::prelude::{DataFrame, DataType, TimeUnit};
use serde::{Deserialize, Serialize};

/// Sidebar control values other than the station selection, which lives in
/// [`SelectionState`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardControls {
    /// Chosen time-period pill in days, `None` when the pill was deselected.
    pub time_period: Option<u32>,
    pub hide_map: bool,
}

impl Default for DashboardControls {
    fn default() -> Self {
        Self {
            time_period: Some(TIME_PERIOD_INITIAL_VALUE),
            hide_map: false,
        }
    }
}

/// A non-fatal message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "message", rename_all = "lowercase")]
pub enum Notice {
    Error(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SidebarView {
    pub title: String,
    pub station_options: Vec<String>,
    pub selected_stations: Vec<String>,
    pub max_selections: usize,
    pub time_periods: Vec<u32>,
    pub time_period: Option<u32>,
    pub hide_map: bool,
}

impl SidebarView {
    pub fn new(station_options: &[String], state: &SelectionState, controls: &DashboardControls) -> Self {
        Self {
            title: "Selection".to_string(),
            station_options: station_options.to_vec(),
            selected_stations: state.selected().to_vec(),
            max_selections: state.max_selections(),
            time_periods: TimePeriod::choices().iter().map(|p| p.days()).collect(),
            time_period: controls.time_period,
            hide_map: controls.hide_map,
        }
    }
}

/// One bucket of the area chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartRow {
    pub station: String,
    /// Bucket start as Zurich wall-clock time without offset. Hours skipped or repeated by
    /// the daylight-saving switch are not marked.
    pub time: NaiveDateTime,
    pub value: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AreaChartView {
    pub x: String,
    pub y: String,
    pub color: String,
    pub x_label: String,
    pub y_label: String,
    pub rows: Vec<ChartRow>,
}

impl AreaChartView {
    /// Reads the `parameter` series of a chart frame built by
    /// [`crate::create_area_chart_frame`]. An empty `unit` leaves the y label bare.
    pub fn from_frame(chart_frame: &DataFrame, parameter: Parameter, unit: &str) -> Result<Self, DataError> {
        let stations = get_strings(chart_frame, LABEL_STATION)?;
        let times = get_column(chart_frame, LABEL_TIME)?
            .cast(&DataType::Datetime(TimeUnit::Milliseconds, None))?
            .cast(&DataType::Int64)?;
        let times: Vec<Option<i64>> = times.i64()?.into_iter().collect();
        let values = if chart_frame.column(parameter.label()).is_ok() {
            get_floats(chart_frame, parameter.label())?
        } else {
            vec![None; chart_frame.height()]
        };

        let rows = stations
            .into_iter()
            .zip(times)
            .zip(values)
            .filter_map(|((station, time), value)| {
                Some(ChartRow {
                    station: station?,
                    time: DateTime::from_timestamp_millis(time?)?.naive_utc(),
                    value,
                })
            })
            .collect();

        Ok(Self {
            x: LABEL_TIME.to_string(),
            y: parameter.label().to_string(),
            color: LABEL_STATION.to_string(),
            x_label: LABEL_TIME.to_string(),
            y_label: if unit.is_empty() {
                parameter.label().to_string()
            } else {
                format!("{} ({})", parameter.label(), unit)
            },
            rows,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapView {
    pub spec: ScatterMapSpec,
    pub points: Vec<MapPoint>,
}

/// Everything the dashboard page shows for one render.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub title: String,
    pub sidebar: SidebarView,
    pub area_chart: AreaChartView,
    /// `None` while the map is hidden.
    pub map: Option<MapView>,
    pub metric_sections: Vec<MetricSection>,
    pub metrics_info: String,
    pub version_caption: String,
}
