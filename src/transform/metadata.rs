//! Lookups derived from the station and parameter reference tables.

use crate::constants::{
    COL_PARAMETER_DESCRIPTION, COL_PARAMETER_SHORTNAME, COL_STATION_NAME,
    PARAMETER_DESCRIPTION_EXTRACTION_PATTERN,
};
use crate::types::parameter::Parameter;
use crate::weather_data::error::DataError;
use crate::weather_data::extractor::get_strings;
use polars::prelude::*;
use std::collections::HashMap;

const COL_UNIT: &str = "unit";

/// Maps each parameter short code to the unit token extracted from its English description.
///
/// Descriptions without a parenthesised unit map to `None`.
pub fn create_meta_map(meta_parameters: &DataFrame) -> Result<HashMap<String, Option<String>>, DataError> {
    let extracted = meta_parameters
        .clone()
        .lazy()
        .select([
            col(COL_PARAMETER_SHORTNAME).cast(DataType::String),
            col(COL_PARAMETER_DESCRIPTION)
                .cast(DataType::String)
                .str()
                .extract(lit(PARAMETER_DESCRIPTION_EXTRACTION_PATTERN), 1)
                .alias(COL_UNIT),
        ])
        .collect()?;

    let codes = get_strings(&extracted, COL_PARAMETER_SHORTNAME)?;
    let units = get_strings(&extracted, COL_UNIT)?;
    Ok(codes
        .into_iter()
        .zip(units)
        .filter_map(|(code, unit)| code.map(|code| (code, unit)))
        .collect())
}

/// Unit label for each dashboard parameter, `""` when the table has none.
pub fn create_metrics_names_dict(
    meta_parameters: &DataFrame,
) -> Result<HashMap<Parameter, String>, DataError> {
    let meta_map = create_meta_map(meta_parameters)?;
    Ok(Parameter::ALL
        .into_iter()
        .map(|p| {
            let unit = meta_map
                .get(p.short_code())
                .cloned()
                .flatten()
                .unwrap_or_default();
            (p, unit)
        })
        .collect())
}

/// English description for each parameter short code in the table.
pub fn parameter_descriptions(meta_parameters: &DataFrame) -> Result<HashMap<String, String>, DataError> {
    let codes = get_strings(meta_parameters, COL_PARAMETER_SHORTNAME)?;
    let descriptions = get_strings(meta_parameters, COL_PARAMETER_DESCRIPTION)?;
    Ok(codes
        .into_iter()
        .zip(descriptions)
        .filter_map(|(code, description)| Some((code?, description?)))
        .collect())
}

/// Distinct station names in `frame`, sorted.
pub fn create_station_names(frame: LazyFrame) -> Result<Vec<String>, DataError> {
    let names = frame
        .select([col(COL_STATION_NAME).cast(DataType::String)])
        .drop_nulls(None)
        .unique_stable(None, UniqueKeepStrategy::First)
        .sort([COL_STATION_NAME], SortMultipleOptions::default())
        .collect()?;
    Ok(get_strings(&names, COL_STATION_NAME)?
        .into_iter()
        .flatten()
        .collect())
}
