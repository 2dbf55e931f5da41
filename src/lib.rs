mod config;
mod constants;
mod dashboard;
mod error;
mod filtering;
mod selection;
mod transform;
mod types;
mod utils;
mod view;
mod weather_data;

#[cfg(test)]
mod test_utils;

pub use config::DashboardConfig;
pub use dashboard::Dashboard;
pub use error::DashboardError;
pub use filtering::DashboardFrameFilterExt;
pub use selection::*;
pub use utils::{ensure_data_dir_exists, get_data_dir, zurich_now, DATA_DIR_ENV};
pub use view::*;

pub use constants::{
    DASHBOARD_TITLE, DEFAULT_STATION, NO_DATA_PLACEHOLDER, SIDEBAR_MAX_SELECTIONS,
    TIMEZONE_SWITZERLAND, WEATHER_LOOK_BACK_DAYS,
};

pub use types::data_source::*;
pub use types::parameter::*;
pub use types::station::Station;
pub use types::time_period::*;

pub use transform::map_frame::*;
pub use transform::metadata::*;
pub use transform::metrics::*;
pub use transform::timeseries::create_area_chart_frame;

pub use weather_data::data_loader::DataLoader;
pub use weather_data::error::DataError;
pub use weather_data::frame_cache::{FrameCache, FrameKey, DEFAULT_FRAME_CACHE_CAPACITY};
pub use weather_data::pivot::pivot_long;
