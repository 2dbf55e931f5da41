//! Defines the weather station record read from the station reference table.

use crate::constants::{
    COL_HEIGHT, COL_LAT, COL_LON, COL_STATION_ABBR, COL_STATION_NAME, COL_STATION_TYPE,
};
use crate::weather_data::error::DataError;
use crate::weather_data::extractor::{get_floats, get_strings};
use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};

/// A weather station and its location.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Station {
    /// Station abbreviation, e.g. "AIR".
    pub short_code: String,
    /// Station name, e.g. "Airolo".
    pub name: String,
    /// Type classification, e.g. "Automatic weather stations".
    pub station_type: Option<String>,
    /// Latitude in decimal degrees (WGS84).
    pub latitude: Option<f64>,
    /// Longitude in decimal degrees (WGS84).
    pub longitude: Option<f64>,
    /// Metres above sea level.
    pub altitude: Option<i32>,
}

impl Station {
    /// Reads every row of a station reference table.
    ///
    /// Rows without a short code or a name are skipped.
    pub fn from_meta_frame(meta_stations: &DataFrame) -> Result<Vec<Station>, DataError> {
        let codes = get_strings(meta_stations, COL_STATION_ABBR)?;
        let names = get_strings(meta_stations, COL_STATION_NAME)?;
        let types = get_strings(meta_stations, COL_STATION_TYPE)?;
        let lats = get_floats(meta_stations, COL_LAT)?;
        let lons = get_floats(meta_stations, COL_LON)?;
        let heights = get_floats(meta_stations, COL_HEIGHT)?;

        Ok(codes
            .into_iter()
            .zip(names)
            .zip(types)
            .zip(lats.into_iter().zip(lons))
            .zip(heights)
            .filter_map(|((((code, name), station_type), (lat, lon)), height)| {
                Some(Station {
                    short_code: code?,
                    name: name?,
                    station_type,
                    latitude: lat,
                    longitude: lon,
                    altitude: height.map(|h| h.round() as i32),
                })
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{write_fixture_dir, FIXTURE_STATIONS};
    use crate::types::data_source::MetaType;
    use crate::weather_data::data_loader::DataLoader;

    #[tokio::test]
    async fn test_stations_from_meta_frame() -> Result<(), Box<dyn std::error::Error>> {
        let dir = write_fixture_dir()?;
        let meta = DataLoader::new(dir.path())
            .load_metadata(MetaType::Stations)
            .await?;
        let stations = Station::from_meta_frame(&meta)?;

        assert_eq!(stations.len(), FIXTURE_STATIONS.len());
        let airolo = &stations[0];
        assert_eq!(airolo.short_code, "AIR");
        assert_eq!(airolo.name, "Airolo");
        assert_eq!(airolo.altitude, Some(1139));
        assert!(airolo.latitude.is_some_and(|lat| (lat - 46.52813).abs() < 1e-9));
        Ok(())
    }
}
