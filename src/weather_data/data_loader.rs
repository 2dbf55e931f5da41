use crate::constants::{
    COL_PARAMETER, COL_STATION_ABBR, COL_STATION_NAME, COL_TIMESTAMP, COL_TIME_PERIOD, COL_VALUE,
};
use crate::filtering::DashboardFrameFilterExt;
use crate::types::data_source::{DataSource, MetaType};
use crate::weather_data::error::DataError;
use crate::weather_data::pivot::pivot_long;
use chrono::{Duration, NaiveDateTime};
use log::{debug, info};
use polars::prelude::*;
use std::path::{Path, PathBuf};
use tokio::{fs, task};

/// Reads the dashboard's parquet files from a fixed data directory.
pub struct DataLoader {
    data_dir: PathBuf,
}

impl DataLoader {
    pub fn new(data_dir: &Path) -> DataLoader {
        DataLoader {
            data_dir: data_dir.to_path_buf(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn path_for(&self, source: DataSource) -> PathBuf {
        self.data_dir.join(source.file_name())
    }

    /// Loads a metadata table with duplicate rows removed.
    ///
    /// Row order is that of first occurrence, so repeated loads give identical frames.
    pub async fn load_metadata(&self, meta_type: MetaType) -> Result<DataFrame, DataError> {
        self.load_with(DataSource::Meta(meta_type), |frame| {
            frame
                .unique_stable(None, UniqueKeepStrategy::First)
                .collect()
        })
        .await
    }

    /// Loads readings recorded within `look_back_days` up to and including `reference_time`,
    /// oldest first.
    ///
    /// Timestamps are kept as naive Zurich wall-clock time.
    ///
    /// Long files (one row per station, parameter and timestamp) are pivoted so every
    /// parameter code becomes a column; wide files are used as they are.
    pub async fn load_weather_data(
        &self,
        reference_time: NaiveDateTime,
        look_back_days: u32,
    ) -> Result<DataFrame, DataError> {
        let cutoff = reference_time - Duration::days(i64::from(look_back_days));
        debug!("Keeping readings from {} to {}", cutoff, reference_time);

        self.load_with(DataSource::Weather, move |mut frame| {
            let schema = frame.collect_schema()?;
            let frame = frame
                .with_column(
                    col(COL_TIMESTAMP).cast(DataType::Datetime(TimeUnit::Milliseconds, None)),
                )
                .filter_since(cutoff)
                .filter_until(reference_time);

            let frame = if schema.contains(COL_PARAMETER) {
                let index: Vec<&str> = [COL_STATION_ABBR, COL_STATION_NAME, COL_TIMESTAMP]
                    .into_iter()
                    .filter(|c| schema.contains(c))
                    .collect();
                pivot_long(frame, &index, COL_PARAMETER, COL_VALUE)?
            } else {
                frame
            };

            frame
                .sort([COL_TIMESTAMP], SortMultipleOptions::default())
                .collect()
        })
        .await
    }

    /// Loads the per-period metrics, pivoted to one column per parameter code with
    /// `station_abbr`, `station_name` and `time_period` as the row key.
    pub async fn load_metric_data(&self) -> Result<DataFrame, DataError> {
        self.load_with(DataSource::Metrics, |frame| {
            pivot_long(
                frame,
                &[COL_STATION_ABBR, COL_STATION_NAME, COL_TIME_PERIOD],
                COL_PARAMETER,
                COL_VALUE,
            )?
            .collect()
        })
        .await
    }

    /// Scans `source` and runs `shape` over it on a blocking thread.
    async fn load_with<F>(&self, source: DataSource, shape: F) -> Result<DataFrame, DataError>
    where
        F: FnOnce(LazyFrame) -> PolarsResult<DataFrame> + Send + 'static,
    {
        let path = self.path_for(source);
        match fs::metadata(&path).await {
            Ok(metadata) if metadata.is_file() => {}
            Ok(_) => {
                return Err(DataError::FileNotFound {
                    source_kind: source,
                    path,
                })
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(DataError::FileNotFound {
                    source_kind: source,
                    path,
                })
            }
            Err(e) => return Err(DataError::FileMetadataRead(path, e)),
        }

        let frame = task::spawn_blocking(move || {
            let frame = LazyFrame::scan_parquet(&path, Default::default())
                .map_err(|e| DataError::ParquetScan(path.clone(), e))?;
            shape(frame).map_err(|e| DataError::ParquetRead(path, e))
        })
        .await??;

        info!(
            "Loaded {} data: {} rows, {} columns",
            source,
            frame.height(),
            frame.width()
        );
        Ok(frame)
    }
}
