//! This module provides the main entry point: a [`Dashboard`] loads the data once and
//! renders the dashboard view for a caller-owned selection and the sidebar controls.
//! Derived frames are memoised per argument set, so re-rendering after every
//! interaction only rebuilds what changed.

use crate::config::DashboardConfig;
use crate::constants::DASHBOARD_TITLE;
use crate::error::DashboardError;
use crate::selection::{MapSelectionEvent, SelectionError, SelectionState};
use crate::transform::map_frame::{create_scatter_map_kwargs, create_station_frame_for_map, map_points};
use crate::transform::metadata::{
    create_metrics_names_dict, create_station_names, parameter_descriptions,
};
use crate::transform::metrics::{create_metric_section, create_metrics_expander_info, MetricSection};
use crate::transform::timeseries::create_area_chart_frame;
use crate::types::data_source::MetaType;
use crate::types::parameter::Parameter;
use crate::types::station::Station;
use crate::types::time_period::TimePeriod;
use crate::utils::{ensure_data_dir_exists, get_data_dir, zurich_now};
use crate::view::{AreaChartView, DashboardControls, DashboardView, MapView, Notice, SidebarView};
use crate::weather_data::data_loader::DataLoader;
use crate::weather_data::error::DataError;
use crate::weather_data::frame_cache::{FrameCache, FrameKey};
use bon::bon;
use chrono::NaiveDateTime;
use log::{debug, info, warn};
use polars::prelude::{DataFrame, IntoLazy};
use std::collections::HashMap;
use std::path::Path;

/// Parameter plotted in the time-series chart and used to colour the map.
const CHART_PARAMETER: Parameter = Parameter::Precipitation;

/// Loaded dashboard data plus a memo cache of the frames derived from it.
///
/// # Examples
///
/// ```no_run
/// # use meteoshrooms::{Dashboard, DashboardConfig, DashboardControls, DashboardError};
/// # #[tokio::main]
/// # async fn main() -> Result<(), DashboardError> {
/// let dashboard = Dashboard::load(DashboardConfig::default()).await?;
/// let mut selection = dashboard.new_selection();
///
/// let view = dashboard.render(&selection, &DashboardControls::default()).await?;
/// println!("{} stations to choose from", view.sidebar.station_options.len());
///
/// // A click on the map adds stations; failures come back as a message to display.
/// let clicked = meteoshrooms::MapSelectionEvent::from_station_names(["Lugano"]);
/// if let Some(notice) = dashboard.handle_map_click(&mut selection, &clicked) {
///     println!("{:?}", notice);
/// }
/// # Ok(())
/// # }
/// ```
pub struct Dashboard {
    loader: DataLoader,
    config: DashboardConfig,
    reference_time: NaiveDateTime,
    meta_stations: DataFrame,
    weather: DataFrame,
    metrics: DataFrame,
    station_names: Vec<String>,
    metric_units: HashMap<Parameter, String>,
    descriptions: HashMap<String, String>,
    cache: FrameCache,
}

#[bon]
impl Dashboard {
    /// Loads all data files described by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::DataDirResolution`] if no data directory is configured and
    /// none can be determined, [`DashboardError::DataDirUnavailable`] if it is missing, and
    /// [`DashboardError::Data`] if any file is missing or cannot be read.
    pub async fn load(config: DashboardConfig) -> Result<Self, DashboardError> {
        let data_dir = match &config.data_dir {
            Some(dir) => dir.clone(),
            None => get_data_dir().map_err(DashboardError::DataDirResolution)?,
        };
        ensure_data_dir_exists(&data_dir)
            .await
            .map_err(|e| DashboardError::DataDirUnavailable(data_dir.clone(), e))?;

        let reference_time = config.reference_time.unwrap_or_else(zurich_now);
        info!(
            "Loading dashboard data from {} (reference time {})",
            data_dir.display(),
            reference_time
        );

        let loader = DataLoader::new(&data_dir);
        let meta_stations = loader.load_metadata(MetaType::Stations).await?;
        let meta_parameters = loader.load_metadata(MetaType::Parameters).await?;
        let weather = loader
            .load_weather_data(reference_time, config.look_back_days)
            .await?;
        let metrics = loader.load_metric_data().await?;

        let station_names = create_station_names(metrics.clone().lazy())?;
        let metric_units = create_metrics_names_dict(&meta_parameters)?;
        let descriptions = parameter_descriptions(&meta_parameters)?;

        Ok(Self {
            loader,
            config,
            reference_time,
            meta_stations,
            weather,
            metrics,
            station_names,
            metric_units,
            descriptions,
            cache: FrameCache::new(),
        })
    }

    /// Loads from the default data directory with default settings.
    pub async fn new() -> Result<Self, DashboardError> {
        Self::load(DashboardConfig::default()).await
    }

    pub fn data_dir(&self) -> &Path {
        self.loader.data_dir()
    }

    pub fn reference_time(&self) -> NaiveDateTime {
        self.reference_time
    }

    /// Station names offered in the station multi-select, sorted.
    pub fn station_names(&self) -> &[String] {
        &self.station_names
    }

    /// Unit label per parameter, `""` when the parameter table has none.
    pub fn metric_units(&self) -> &HashMap<Parameter, String> {
        &self.metric_units
    }

    pub fn stations(&self) -> Result<Vec<Station>, DashboardError> {
        Ok(Station::from_meta_frame(&self.meta_stations)?)
    }

    /// A fresh selection holding the configured default station.
    pub fn new_selection(&self) -> SelectionState {
        SelectionState::new(&self.config.default_station, self.config.max_selections)
    }

    /// Time-series frame for `stations` over `time_period`, memoised per argument set.
    ///
    /// # Arguments
    ///
    /// * `.stations(&[String])`: **Required.** Station names to include.
    /// * `.time_period(TimePeriod)`: Optional. Look-back window. Defaults to 7 days.
    #[builder]
    pub async fn area_chart(
        &self,
        stations: &[String],
        time_period: Option<TimePeriod>,
    ) -> Result<DataFrame, DashboardError> {
        let time_period = time_period.unwrap_or_else(|| TimePeriod::or_fallback(None));
        let key = FrameKey::AreaChart {
            stations: stations.to_vec(),
            period_days: time_period.days(),
        };
        self.cache
            .get_or_try_insert_with(key, || -> Result<DataFrame, DashboardError> {
                let frame = create_area_chart_frame(
                    self.weather.clone().lazy(),
                    stations,
                    time_period.duration(),
                    self.reference_time,
                )?
                .collect()
                .map_err(DataError::from)?;
                Ok(frame)
            })
            .await
    }

    /// Station map frame for `time_period`, memoised per argument set.
    ///
    /// # Arguments
    ///
    /// * `.parameter(Parameter)`: Optional. Parameter colouring the map; only affects the key.
    /// * `.time_period(TimePeriod)`: Optional. Metrics period to join. Defaults to 7 days.
    #[builder]
    pub async fn station_map(
        &self,
        parameter: Option<Parameter>,
        time_period: Option<TimePeriod>,
    ) -> Result<DataFrame, DashboardError> {
        let time_period = time_period.unwrap_or_else(|| TimePeriod::or_fallback(None));
        let key = FrameKey::StationMap {
            parameter,
            period_days: time_period.days(),
        };
        self.cache
            .get_or_try_insert_with(key, || -> Result<DataFrame, DashboardError> {
                Ok(create_station_frame_for_map(
                    self.meta_stations.clone().lazy(),
                    self.metrics.clone().lazy(),
                    time_period,
                )?)
            })
            .await
    }

    /// Metric cards of `station`, one per dashboard parameter.
    pub fn metric_section(&self, station: &str) -> Result<MetricSection, DashboardError> {
        Ok(create_metric_section(
            &self.metrics.clone().lazy(),
            station,
            &Parameter::ALL,
            &self.metric_units,
            &self.descriptions,
        )?)
    }

    /// Applies a map click to `state`.
    ///
    /// Never fails: any error is logged and returned as a message for the user, and the
    /// dashboard stays usable.
    pub fn handle_map_click(
        &self,
        state: &mut SelectionState,
        event: &MapSelectionEvent,
    ) -> Option<Notice> {
        debug!("Map selection event with {} points", event.points.len());
        Self::surface(state.apply_map_click(event))
    }

    /// Applies the multi-select's current value to `state`, reporting failures like
    /// [`Dashboard::handle_map_click`].
    pub fn handle_multiselect<I, S>(&self, state: &mut SelectionState, stations: I) -> Option<Notice>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::surface(state.set_from_multiselect(stations))
    }

    fn surface<T>(result: Result<T, SelectionError>) -> Option<Notice> {
        match result {
            Ok(_) => None,
            Err(e) => {
                warn!("Selection update rejected: {}", e);
                Some(Notice::Error(e.to_string()))
            }
        }
    }

    /// Builds the whole page for the current selection and controls.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::Data`] if a derived frame cannot be built.
    pub async fn render(
        &self,
        state: &SelectionState,
        controls: &DashboardControls,
    ) -> Result<DashboardView, DashboardError> {
        let time_period = TimePeriod::or_fallback(controls.time_period);
        debug!(
            "Rendering {} stations over {}",
            state.selected().len(),
            time_period
        );

        let chart_frame = self
            .area_chart()
            .stations(state.selected())
            .time_period(time_period)
            .call()
            .await?;
        let unit = self
            .metric_units
            .get(&CHART_PARAMETER)
            .map(String::as_str)
            .unwrap_or_default();
        let area_chart = AreaChartView::from_frame(&chart_frame, CHART_PARAMETER, unit)?;
        debug!("Area chart built with {} rows", area_chart.rows.len());

        let map = if controls.hide_map {
            None
        } else {
            let map_frame = self
                .station_map()
                .parameter(CHART_PARAMETER)
                .time_period(time_period)
                .call()
                .await?;
            debug!("Map built with {} stations", map_frame.height());
            Some(MapView {
                spec: create_scatter_map_kwargs(time_period, Some(CHART_PARAMETER)),
                points: map_points(&map_frame, Some(CHART_PARAMETER))?,
            })
        };

        let metric_sections = state
            .selected()
            .iter()
            .map(|station| self.metric_section(station))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(DashboardView {
            title: DASHBOARD_TITLE.to_string(),
            sidebar: SidebarView::new(&self.station_names, state, controls),
            area_chart,
            map,
            metric_sections,
            metrics_info: create_metrics_expander_info(
                TimePeriod::value_period().days(),
                TimePeriod::delta_period().days(),
            ),
            version_caption: format!("MeteoShrooms Version: {}", env!("CARGO_PKG_VERSION")),
        })
    }

    /// Drops all memoised frames.
    pub async fn clear_cache(&self) {
        self.cache.clear().await;
    }

    pub async fn cached_frames(&self) -> usize {
        self.cache.len().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{reference_time, write_fixture_dir, FIXTURE_HOURLY_PRECIPITATION};
    use tempfile::TempDir;

    async fn dashboard() -> Result<(Dashboard, TempDir), Box<dyn std::error::Error>> {
        let dir = write_fixture_dir()?;
        let config = DashboardConfig::builder()
            .data_dir(dir.path().to_path_buf())
            .reference_time(reference_time())
            .build();
        Ok((Dashboard::load(config).await?, dir))
    }

    #[tokio::test]
    async fn test_load_missing_dir() {
        let config = DashboardConfig::builder()
            .data_dir("/nonexistent/meteoshrooms".into())
            .build();
        let result = Dashboard::load(config).await;
        assert!(matches!(result, Err(DashboardError::DataDirUnavailable(..))));
    }

    #[tokio::test]
    async fn test_station_names_from_metrics() -> Result<(), Box<dyn std::error::Error>> {
        let (dashboard, _dir) = dashboard().await?;
        assert_eq!(
            dashboard.station_names(),
            ["Airolo", "Basel / Binningen", "Lugano"]
        );
        assert_eq!(dashboard.stations()?.len(), 4);
        assert_eq!(dashboard.metric_units()[&Parameter::Precipitation], "mm");
        Ok(())
    }

    #[tokio::test]
    async fn test_render_default_view() -> Result<(), Box<dyn std::error::Error>> {
        let (dashboard, _dir) = dashboard().await?;
        let selection = dashboard.new_selection();

        let view = dashboard
            .render(&selection, &DashboardControls::default())
            .await?;

        assert_eq!(view.title, "MeteoShrooms");
        assert_eq!(view.sidebar.selected_stations, ["Airolo"]);
        assert_eq!(view.sidebar.time_period, Some(14));
        assert_eq!(view.area_chart.y_label, "Precipitation (mm)");
        // 14 days of 6-hour buckets
        assert_eq!(view.area_chart.rows.len(), 14 * 4);
        assert!(view
            .area_chart
            .rows
            .iter()
            .all(|r| r.value == Some(6.0 * FIXTURE_HOURLY_PRECIPITATION)));

        let map = view.map.ok_or("map should be shown")?;
        assert_eq!(map.points.len(), 3);
        assert_eq!(map.spec.subtitle.as_deref(), Some("Over the last 14 days"));

        assert_eq!(view.metric_sections.len(), 1);
        assert_eq!(view.metric_sections[0].cards.len(), 5);
        assert!(view.version_caption.ends_with(env!("CARGO_PKG_VERSION")));
        Ok(())
    }

    #[tokio::test]
    async fn test_render_hidden_map_and_fallback_period() -> Result<(), Box<dyn std::error::Error>> {
        let (dashboard, _dir) = dashboard().await?;
        let selection = dashboard.new_selection();
        let controls = DashboardControls {
            time_period: None,
            hide_map: true,
        };

        let view = dashboard.render(&selection, &controls).await?;

        assert!(view.map.is_none());
        assert_eq!(view.area_chart.rows.len(), 7 * 4);
        Ok(())
    }

    #[tokio::test]
    async fn test_render_reuses_cached_frames() -> Result<(), Box<dyn std::error::Error>> {
        let (dashboard, _dir) = dashboard().await?;
        let selection = dashboard.new_selection();
        let controls = DashboardControls::default();

        let first = dashboard.render(&selection, &controls).await?;
        assert_eq!(dashboard.cached_frames().await, 2);
        let second = dashboard.render(&selection, &controls).await?;
        assert_eq!(dashboard.cached_frames().await, 2);
        assert_eq!(first, second);

        dashboard.clear_cache().await;
        assert_eq!(dashboard.cached_frames().await, 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_map_click_overflow_is_a_notice() -> Result<(), Box<dyn std::error::Error>> {
        let (dashboard, _dir) = dashboard().await?;
        let mut selection = dashboard.new_selection();
        assert!(dashboard
            .handle_multiselect(&mut selection, ["Airolo", "Basel / Binningen", "Lugano", "Sion", "Chur"])
            .is_none());

        let notice = dashboard.handle_map_click(
            &mut selection,
            &MapSelectionEvent::from_station_names(["Zürich / Fluntern"]),
        );

        assert_eq!(
            notice,
            Some(Notice::Error(
                "You have already selected the maximum number of stations (5).".to_string()
            ))
        );
        assert_eq!(selection.selected().len(), 5);

        // The dashboard still renders; stations without data get placeholder cards
        let view = dashboard
            .render(&selection, &DashboardControls::default())
            .await?;
        assert_eq!(view.metric_sections.len(), 5);
        let sion = &view.metric_sections[3];
        assert_eq!(sion.station, "Sion");
        assert!(sion.cards.iter().all(|c| c.value == "-"));
        Ok(())
    }

    #[tokio::test]
    async fn test_view_serializes_to_json() -> Result<(), Box<dyn std::error::Error>> {
        let (dashboard, _dir) = dashboard().await?;
        let view = dashboard
            .render(&dashboard.new_selection(), &DashboardControls::default())
            .await?;
        let json = serde_json::to_value(&view)?;
        assert_eq!(json["area_chart"]["color"], "Station");
        assert_eq!(json["metric_sections"][0]["cards"][0]["label"], "Precipitation");
        Ok(())
    }
}
