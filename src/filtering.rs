use crate::constants::{COL_STATION_NAME, COL_TIMESTAMP, COL_TIME_PERIOD};
use crate::types::time_period::TimePeriod;
use chrono::NaiveDateTime;
use polars::prelude::{col, lit, DataType, LazyFrame, NamedFrom, Series, TimeUnit};

pub trait DashboardFrameFilterExt {
    /// Keeps readings at or after `start`.
    /// Assumes a timezone-naive 'reference_timestamp' column in Zurich wall-clock time.
    fn filter_since(self, start: NaiveDateTime) -> LazyFrame;

    /// Keeps readings at or before `end`, same column assumptions as [`Self::filter_since`].
    fn filter_until(self, end: NaiveDateTime) -> LazyFrame;

    /// Keeps rows whose 'station_name' is one of `stations`.
    fn filter_stations(self, stations: &[String]) -> LazyFrame;

    /// Keeps rows of a single station.
    fn filter_station(self, station: &str) -> LazyFrame;

    /// Keeps metric rows aggregated over `period`.
    /// Assumes an integer 'time_period' column holding the period length in days.
    fn filter_time_period(self, period: TimePeriod) -> LazyFrame;
}

impl DashboardFrameFilterExt for LazyFrame {
    fn filter_since(self, start: NaiveDateTime) -> LazyFrame {
        self.filter(
            col(COL_TIMESTAMP)
                .cast(DataType::Datetime(TimeUnit::Milliseconds, None))
                .gt_eq(lit(start)),
        )
    }

    fn filter_until(self, end: NaiveDateTime) -> LazyFrame {
        self.filter(
            col(COL_TIMESTAMP)
                .cast(DataType::Datetime(TimeUnit::Milliseconds, None))
                .lt_eq(lit(end)),
        )
    }

    fn filter_stations(self, stations: &[String]) -> LazyFrame {
        let stations = Series::new("stations".into(), stations);
        self.filter(col(COL_STATION_NAME).is_in(lit(stations)))
    }

    fn filter_station(self, station: &str) -> LazyFrame {
        self.filter(col(COL_STATION_NAME).eq(lit(station)))
    }

    fn filter_time_period(self, period: TimePeriod) -> LazyFrame {
        self.filter(
            col(COL_TIME_PERIOD)
                .cast(DataType::Int64)
                .eq(lit(i64::from(period.days()))),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;

    fn metrics() -> PolarsResult<DataFrame> {
        df!(
            "station_name" => ["Airolo", "Airolo", "Basel", "Lugano"],
            "time_period" => [1i32, 3, 1, 1],
            "rre150h0" => [0.2f64, 1.4, 0.0, 3.1],
        )
    }

    #[test]
    fn test_filter_time_period_casts_integer_width() -> PolarsResult<()> {
        let df = metrics()?.lazy().filter_time_period(TimePeriod::new(1)).collect()?;
        assert_eq!(df.height(), 3);
        Ok(())
    }

    #[test]
    fn test_filter_stations() -> PolarsResult<()> {
        let selected = vec!["Airolo".to_string(), "Lugano".to_string()];
        let df = metrics()?.lazy().filter_stations(&selected).collect()?;
        assert_eq!(df.height(), 3);

        let none = metrics()?.lazy().filter_stations(&[]).collect()?;
        assert_eq!(none.height(), 0);

        let basel = metrics()?.lazy().filter_station("Basel").collect()?;
        assert_eq!(basel.height(), 1);
        Ok(())
    }

    #[test]
    fn test_filter_since() -> PolarsResult<()> {
        let start = chrono::NaiveDate::from_ymd_opt(2025, 6, 14)
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .expect("valid date");
        let df = df!(
            "reference_timestamp" => [start - chrono::Duration::hours(1), start, start + chrono::Duration::hours(5)],
        )?;
        assert_eq!(df.clone().lazy().filter_since(start).collect()?.height(), 2);
        assert_eq!(df.lazy().filter_until(start).collect()?.height(), 2);
        Ok(())
    }
}
