//! Column names of the data files and fixed dashboard settings.

use chrono_tz::Tz;

// Readings and metrics
pub const COL_STATION_ABBR: &str = "station_abbr";
pub const COL_STATION_NAME: &str = "station_name";
pub const COL_TIMESTAMP: &str = "reference_timestamp";
pub const COL_PARAMETER: &str = "parameter";
pub const COL_VALUE: &str = "value";
pub const COL_TIME_PERIOD: &str = "time_period";

// Station metadata
pub const COL_STATION_TYPE: &str = "station_type_en";
pub const COL_LAT: &str = "station_coordinates_wgs84_lat";
pub const COL_LON: &str = "station_coordinates_wgs84_lon";
pub const COL_HEIGHT: &str = "station_height_masl";

// Parameter metadata
pub const COL_PARAMETER_SHORTNAME: &str = "parameter_shortname";
pub const COL_PARAMETER_DESCRIPTION: &str = "parameter_description_en";

// Display labels
pub const LABEL_TIME: &str = "Time";
pub const LABEL_STATION: &str = "Station";
pub const LABEL_SHORT_CODE: &str = "Short Code";
pub const LABEL_STATION_TYPE: &str = "Station Type";
pub const LABEL_ALTITUDE: &str = "Altitude";

/// Columns kept from the station table for the map, after relabelling.
pub const COLUMNS_FOR_MAP_FRAME: [&str; 6] = [
    LABEL_SHORT_CODE,
    LABEL_STATION_TYPE,
    COL_STATION_NAME,
    COL_LAT,
    COL_LON,
    LABEL_ALTITUDE,
];

pub const TIMEZONE_SWITZERLAND: Tz = chrono_tz::Europe::Zurich;

/// Days of readings kept when the readings file is loaded.
pub const WEATHER_LOOK_BACK_DAYS: u32 = 30;

/// Width of a time-series chart bucket.
pub const BUCKET_HOURS: i64 = 6;

pub const SIDEBAR_MAX_SELECTIONS: usize = 5;
pub const DEFAULT_STATION: &str = "Airolo";

/// Captures the parenthesised unit of a parameter description, e.g. `°C` in
/// `"Air temperature 2 m above ground; hourly mean (°C)"`. Group 1 holds the unit without
/// the parentheses, which is what cards and axis labels display.
pub const PARAMETER_DESCRIPTION_EXTRACTION_PATTERN: &str = r"\(([^()]+)\)";

pub const DASHBOARD_TITLE: &str = "MeteoShrooms";

/// Placeholder shown on a metric card without data.
pub const NO_DATA_PLACEHOLDER: &str = "-";
