//! Metric cards: the current value of a parameter at a station and its change against a
//! longer period.

use crate::constants::NO_DATA_PLACEHOLDER;
use crate::filtering::DashboardFrameFilterExt;
use crate::types::parameter::Parameter;
use crate::types::time_period::TimePeriod;
use crate::weather_data::error::DataError;
use crate::weather_data::extractor::get_first_float;
use polars::prelude::{col, LazyFrame};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// Looks up the metric of `parameter` for `station` over `period`.
///
/// Returns `Ok(None)` when there is no data: no row for the station and period, no column
/// for the parameter, or a null value. Absence is never an error.
pub fn calculate_metric_value(
    metrics: LazyFrame,
    parameter: Parameter,
    station: &str,
    period: TimePeriod,
) -> Result<Option<f64>, DataError> {
    let mut metrics = metrics;
    let code = parameter.short_code();
    if !metrics.collect_schema()?.contains(code) {
        return Ok(None);
    }

    let row = metrics
        .filter_station(station)
        .filter_time_period(period)
        .select([col(code)])
        .limit(1)
        .collect()?;
    get_first_float(&row, code)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeltaDirection {
    Up,
    Down,
    Flat,
}

/// Difference between a metric value and the same metric over the delta period.
///
/// # Examples
///
/// ```
/// use meteoshrooms::MetricDelta;
///
/// assert_eq!(MetricDelta::new(1.24).to_string(), "▲ +1.2");
/// assert_eq!(MetricDelta::new(-0.36).to_string(), "▼ -0.4");
/// assert_eq!(MetricDelta::new(0.04).to_string(), "● 0.0");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricDelta {
    /// Rounded to one decimal.
    pub value: f64,
    pub direction: DeltaDirection,
}

impl MetricDelta {
    pub fn new(difference: f64) -> Self {
        let value = (difference * 10.0).round() / 10.0;
        let direction = if value > 0.0 {
            DeltaDirection::Up
        } else if value < 0.0 {
            DeltaDirection::Down
        } else {
            DeltaDirection::Flat
        };
        Self {
            value: if value == 0.0 { 0.0 } else { value },
            direction,
        }
    }
}

impl fmt::Display for MetricDelta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.direction {
            DeltaDirection::Up => write!(f, "▲ {:+.1}", self.value),
            DeltaDirection::Down => write!(f, "▼ {:+.1}", self.value),
            DeltaDirection::Flat => write!(f, "● {:.1}", self.value),
        }
    }
}

/// Change of `value` against the same metric over [`TimePeriod::delta_period`].
///
/// `None` when the delta period has no data for the station.
pub fn calculate_metric_delta(
    parameter: Parameter,
    metrics: LazyFrame,
    station: &str,
    value: f64,
) -> Result<Option<MetricDelta>, DataError> {
    let compared = calculate_metric_value(metrics, parameter, station, TimePeriod::delta_period())?;
    Ok(compared.map(|c| MetricDelta::new(value - c)))
}

/// Weather symbol for an amount of precipitation in mm.
pub fn get_metric_emoji(precipitation: f64) -> &'static str {
    if precipitation <= 0.0 {
        "☀️"
    } else if precipitation < 1.0 {
        "🌦️"
    } else if precipitation < 10.0 {
        "🌧️"
    } else {
        "⛈️"
    }
}

/// Value shown on a card: one decimal, precipitation followed by its weather symbol.
pub fn convert_metric_value_to_string(parameter: Parameter, value: f64) -> String {
    match parameter {
        Parameter::Precipitation => format!("{:.1} {}", value, get_metric_emoji(value)),
        _ => format!("{:.1}", value),
    }
}

/// A single scorecard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricCard {
    pub parameter: Parameter,
    pub label: String,
    /// Formatted value, or the no-data placeholder.
    pub value: String,
    /// Formatted change with its direction indicator.
    pub delta: Option<String>,
    pub unit: String,
    /// Description of the parameter, shown as tooltip.
    pub help: Option<String>,
}

/// The cards of one station, one per parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricSection {
    pub station: String,
    pub cards: Vec<MetricCard>,
}

/// Builds the card of `parameter` for `station`.
pub fn create_metric_card(
    metrics: &LazyFrame,
    parameter: Parameter,
    station: &str,
    units: &HashMap<Parameter, String>,
    descriptions: &HashMap<String, String>,
) -> Result<MetricCard, DataError> {
    let value = calculate_metric_value(
        metrics.clone(),
        parameter,
        station,
        TimePeriod::value_period(),
    )?;

    let (value, delta) = match value {
        Some(v) => (
            convert_metric_value_to_string(parameter, v),
            calculate_metric_delta(parameter, metrics.clone(), station, v)?
                .map(|d| d.to_string()),
        ),
        None => (NO_DATA_PLACEHOLDER.to_string(), None),
    };

    Ok(MetricCard {
        parameter,
        label: parameter.label().to_string(),
        value,
        delta,
        unit: units.get(&parameter).cloned().unwrap_or_default(),
        help: descriptions.get(parameter.short_code()).cloned(),
    })
}

pub fn create_metric_section(
    metrics: &LazyFrame,
    station: &str,
    parameters: &[Parameter],
    units: &HashMap<Parameter, String>,
    descriptions: &HashMap<String, String>,
) -> Result<MetricSection, DataError> {
    let cards = parameters
        .iter()
        .map(|p| create_metric_card(metrics, *p, station, units, descriptions))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(MetricSection {
        station: station.to_string(),
        cards,
    })
}

/// Explains what the cards show.
pub fn create_metrics_expander_info(num_days_value: u32, num_days_delta: u32) -> String {
    let day_word = |n: u32| if n == 1 { "day" } else { "days" };
    format!(
        "Values are aggregated over the last {} {}: precipitation is summed, all other \
         parameters are averaged. Deltas compare each value with the same aggregate over \
         the last {} {}.",
        num_days_value,
        day_word(num_days_value),
        num_days_delta,
        day_word(num_days_delta),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{fixture_metric_value, write_fixture_dir};
    use crate::weather_data::data_loader::DataLoader;
    use polars::prelude::IntoLazy;

    async fn metrics() -> Result<LazyFrame, Box<dyn std::error::Error>> {
        let dir = write_fixture_dir()?;
        Ok(DataLoader::new(dir.path()).load_metric_data().await?.lazy())
    }

    #[tokio::test]
    async fn test_metric_value_found() -> Result<(), Box<dyn std::error::Error>> {
        let value = calculate_metric_value(
            metrics().await?,
            Parameter::AirTemperature,
            "Airolo",
            TimePeriod::new(1),
        )?;
        assert_eq!(
            value,
            Some(fixture_metric_value("AIR", Parameter::AirTemperature, 1))
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_metric_value_missing_is_no_data() -> Result<(), Box<dyn std::error::Error>> {
        let metrics = metrics().await?;
        // Lugano has no 1-day row, Zürich no rows, "Nowhere" does not exist
        for station in ["Lugano", "Zürich / Fluntern", "Nowhere"] {
            let value = calculate_metric_value(
                metrics.clone(),
                Parameter::Precipitation,
                station,
                TimePeriod::new(1),
            )?;
            assert_eq!(value, None, "station {}", station);
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_metric_value_missing_column_is_no_data() -> Result<(), Box<dyn std::error::Error>> {
        let metrics = metrics().await?.drop(["fu3010h0"]);
        let value =
            calculate_metric_value(metrics, Parameter::WindSpeed, "Airolo", TimePeriod::new(1))?;
        assert_eq!(value, None);
        Ok(())
    }

    #[tokio::test]
    async fn test_metric_delta() -> Result<(), Box<dyn std::error::Error>> {
        let metrics = metrics().await?;
        let value = fixture_metric_value("AIR", Parameter::DewPoint, 1);
        let delta = calculate_metric_delta(Parameter::DewPoint, metrics.clone(), "Airolo", value)?
            .ok_or("expected a delta")?;
        // 1-day value is 1.0 below the 3-day value in the fixture
        assert_eq!(delta.value, -1.0);
        assert_eq!(delta.direction, DeltaDirection::Down);
        assert_eq!(delta.to_string(), "▼ -1.0");

        // Basel has no 3-day row
        let missing = calculate_metric_delta(Parameter::DewPoint, metrics, "Basel / Binningen", 1.0)?;
        assert_eq!(missing, None);
        Ok(())
    }

    #[tokio::test]
    async fn test_metric_card_placeholder() -> Result<(), Box<dyn std::error::Error>> {
        let metrics = metrics().await?;
        let card = create_metric_card(
            &metrics,
            Parameter::Precipitation,
            "Lugano",
            &HashMap::new(),
            &HashMap::new(),
        )?;
        assert_eq!(card.value, "-");
        assert_eq!(card.delta, None);
        assert_eq!(card.label, "Precipitation");
        Ok(())
    }

    #[tokio::test]
    async fn test_metric_section_has_card_per_parameter() -> Result<(), Box<dyn std::error::Error>> {
        let metrics = metrics().await?;
        let units = HashMap::from([(Parameter::Precipitation, "mm".to_string())]);
        let section =
            create_metric_section(&metrics, "Airolo", &Parameter::ALL, &units, &HashMap::new())?;
        assert_eq!(section.cards.len(), 5);

        let precipitation = &section.cards[0];
        assert_eq!(precipitation.unit, "mm");
        // 10.0 + 0 + 0.5 => 10.5 mm
        assert_eq!(precipitation.value, "10.5 ⛈️");
        assert_eq!(precipitation.delta.as_deref(), Some("▼ -1.0"));
        Ok(())
    }

    #[test]
    fn test_value_strings() {
        assert_eq!(
            convert_metric_value_to_string(Parameter::Precipitation, 0.0),
            "0.0 ☀️"
        );
        assert_eq!(
            convert_metric_value_to_string(Parameter::Precipitation, 0.44),
            "0.4 🌦️"
        );
        assert_eq!(
            convert_metric_value_to_string(Parameter::RelativeHumidity, 81.26),
            "81.3"
        );
    }

    #[test]
    fn test_expander_info_mentions_periods() {
        let info = create_metrics_expander_info(1, 3);
        assert!(info.contains("last 1 day:"));
        assert!(info.contains("last 3 days."));
    }
}
