//! Helpers for pulling typed values out of collected frames.

use crate::weather_data::error::DataError;
use polars::prelude::*;

/// Retrieves a column by name from a DataFrame.
pub(crate) fn get_column<'a>(df: &'a DataFrame, col: &str) -> Result<&'a Column, DataError> {
    df.column(col)
        .map_err(|e| DataError::ColumnNotFound(col.to_string(), e))
}

/// Reads a column as strings, casting non-string columns first.
pub(crate) fn get_strings(df: &DataFrame, col: &str) -> Result<Vec<Option<String>>, DataError> {
    let column = get_column(df, col)?.cast(&DataType::String)?;
    Ok(column
        .str()?
        .into_iter()
        .map(|v| v.map(str::to_string))
        .collect())
}

/// Reads a column as `f64`, casting numeric columns first.
pub(crate) fn get_floats(df: &DataFrame, col: &str) -> Result<Vec<Option<f64>>, DataError> {
    let column = get_column(df, col)?;
    if !column.dtype().is_primitive_numeric() {
        return Err(DataError::UnexpectedColumnType {
            column: col.to_string(),
            dtype: column.dtype().to_string(),
        });
    }
    let column = column.cast(&DataType::Float64)?;
    Ok(column.f64()?.into_iter().collect())
}

/// Extracts an optional float from the first row of `col`, or `None` when the frame is empty.
pub(crate) fn get_first_float(df: &DataFrame, col: &str) -> Result<Option<f64>, DataError> {
    Ok(get_floats(df, col)?.into_iter().next().flatten())
}
