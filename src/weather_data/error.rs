use crate::types::data_source::DataSource;
use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DataError {
    #[error("Data file for {source_kind} not found at '{path}'")]
    FileNotFound {
        source_kind: DataSource,
        path: PathBuf,
    },

    #[error("Failed to read metadata for data file '{0}'")]
    FileMetadataRead(PathBuf, #[source] std::io::Error),

    #[error("Failed to scan parquet file '{0}'")]
    ParquetScan(PathBuf, #[source] PolarsError),

    #[error("Failed to read parquet file '{0}'")]
    ParquetRead(PathBuf, #[source] PolarsError),

    #[error("Background task failed to complete")]
    TaskJoin(#[from] tokio::task::JoinError),

    #[error("Failed processing DataFrame: {0}")]
    DataFrameProcessing(#[from] PolarsError),

    #[error("Required column '{0}' not found in DataFrame")]
    ColumnNotFound(String, #[source] PolarsError),

    #[error("Column '{column}' has unexpected type {dtype}")]
    UnexpectedColumnType { column: String, dtype: String },
}
