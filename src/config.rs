//! Settings for loading the dashboard.

use crate::constants::{DEFAULT_STATION, SIDEBAR_MAX_SELECTIONS, WEATHER_LOOK_BACK_DAYS};
use bon::Builder;
use chrono::NaiveDateTime;
use std::path::PathBuf;

/// Where the data lives and how the dashboard treats it.
///
/// Every field has a default; build with [`DashboardConfig::builder`].
///
/// # Examples
///
/// ```
/// use meteoshrooms::DashboardConfig;
/// use std::path::PathBuf;
///
/// let config = DashboardConfig::builder()
///     .data_dir(PathBuf::from("/srv/meteoshrooms/data"))
///     .look_back_days(14)
///     .build();
/// assert_eq!(config.max_selections, 5);
/// assert_eq!(config.default_station, "Airolo");
/// ```
#[derive(Debug, Clone, Builder)]
pub struct DashboardConfig {
    /// Directory holding the parquet files. Resolved with [`crate::get_data_dir`] when unset.
    pub data_dir: Option<PathBuf>,
    /// Instant all look-back windows end at, Zurich wall-clock. Defaults to now.
    pub reference_time: Option<NaiveDateTime>,
    /// Days of readings kept on load.
    #[builder(default = WEATHER_LOOK_BACK_DAYS)]
    pub look_back_days: u32,
    /// Most stations a selection may hold.
    #[builder(default = SIDEBAR_MAX_SELECTIONS)]
    pub max_selections: usize,
    /// Station selected when a session starts.
    #[builder(into, default = DEFAULT_STATION.to_string())]
    pub default_station: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        DashboardConfig::builder().build()
    }
}
