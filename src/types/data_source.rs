//! Defines the parquet files making up the dashboard's data directory.

use std::fmt;

/// The kind of reference table read from `meta_<type>.parquet`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetaType {
    /// Station reference table: short code, name, type, coordinates, altitude.
    Stations,
    /// Parameter reference table: short code and English description.
    Parameters,
}

impl MetaType {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            MetaType::Stations => "stations",
            MetaType::Parameters => "parameters",
        }
    }
}

impl fmt::Display for MetaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A file in the fixed data-directory layout.
///
/// # Examples
///
/// ```
/// use meteoshrooms::{DataSource, MetaType};
///
/// assert_eq!(DataSource::Weather.file_name(), "weather_data.parquet");
/// assert_eq!(DataSource::Meta(MetaType::Stations).file_name(), "meta_stations.parquet");
/// assert_eq!(DataSource::Metrics.to_string(), "metrics");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataSource {
    /// Time-stamped station readings.
    Weather,
    /// Pre-computed per-period aggregates, long format.
    Metrics,
    /// Metadata reference tables.
    Meta(MetaType),
}

impl DataSource {
    pub fn file_name(&self) -> String {
        match self {
            DataSource::Weather => "weather_data.parquet".to_string(),
            DataSource::Metrics => "metrics.parquet".to_string(),
            DataSource::Meta(meta_type) => format!("meta_{}.parquet", meta_type.as_str()),
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Weather => write!(f, "weather"),
            DataSource::Metrics => write!(f, "metrics"),
            DataSource::Meta(meta_type) => write!(f, "{} metadata", meta_type),
        }
    }
}
