//! Defines the measured weather parameters shown on the dashboard and the aggregation
//! each one uses when readings are summarised over a time bucket or period.

use polars::prelude::{col, Expr, Schema};
use serde::Serialize;
use std::fmt;

/// How readings of a parameter are combined over a bucket or period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Aggregation {
    /// Total over the bucket (precipitation).
    Sum,
    /// Arithmetic mean over the bucket.
    Mean,
}

impl Aggregation {
    /// Builds the Polars aggregation expression for the given column.
    pub fn expr(&self, column: &str) -> Expr {
        match self {
            Aggregation::Sum => col(column).sum(),
            Aggregation::Mean => col(column).mean(),
        }
    }
}

impl fmt::Display for Aggregation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Aggregation::Sum => write!(f, "sum"),
            Aggregation::Mean => write!(f, "mean"),
        }
    }
}

/// A measured quantity, identified in the source data by its short code.
///
/// The variant order is the order in which metric cards are laid out.
///
/// # Examples
///
/// ```
/// use meteoshrooms::{Aggregation, Parameter};
///
/// let p = Parameter::from_short_code("rre150h0").unwrap();
/// assert_eq!(p, Parameter::Precipitation);
/// assert_eq!(p.aggregation(), Aggregation::Sum);
/// assert_eq!(p.label(), "Precipitation");
/// assert!(Parameter::from_short_code("gre000z0").is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Parameter {
    /// `rre150h0`: precipitation, hourly total.
    Precipitation,
    /// `tre200h0`: air temperature 2 m above ground.
    AirTemperature,
    /// `ure200h0`: relative humidity 2 m above ground.
    RelativeHumidity,
    /// `fu3010h0`: wind speed, scalar mean.
    WindSpeed,
    /// `tde200h0`: dew point 2 m above ground.
    DewPoint,
}

impl Parameter {
    /// All dashboard parameters in display order.
    pub const ALL: [Parameter; 5] = [
        Parameter::Precipitation,
        Parameter::AirTemperature,
        Parameter::RelativeHumidity,
        Parameter::WindSpeed,
        Parameter::DewPoint,
    ];

    pub fn short_code(&self) -> &'static str {
        match self {
            Parameter::Precipitation => "rre150h0",
            Parameter::AirTemperature => "tre200h0",
            Parameter::RelativeHumidity => "ure200h0",
            Parameter::WindSpeed => "fu3010h0",
            Parameter::DewPoint => "tde200h0",
        }
    }

    /// Short display label, used as column name in display frames.
    pub fn label(&self) -> &'static str {
        match self {
            Parameter::Precipitation => "Precipitation",
            Parameter::AirTemperature => "Air Temperature",
            Parameter::RelativeHumidity => "Rel. Humidity",
            Parameter::WindSpeed => "Wind Speed",
            Parameter::DewPoint => "Dew Point",
        }
    }

    pub fn aggregation(&self) -> Aggregation {
        match self {
            Parameter::Precipitation => Aggregation::Sum,
            _ => Aggregation::Mean,
        }
    }

    /// Looks up a parameter by its short code. Unknown codes yield `None`.
    pub fn from_short_code(code: &str) -> Option<Parameter> {
        Parameter::ALL.into_iter().find(|p| p.short_code() == code)
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short_code())
    }
}

/// Returns one aggregation expression per known parameter column present in `schema`.
///
/// Columns whose name is not a known short code are skipped, so unknown parameters are
/// simply absent from any aggregated output.
pub fn aggregation_exprs(schema: &Schema) -> Vec<Expr> {
    Parameter::ALL
        .into_iter()
        .filter(|p| schema.contains(p.short_code()))
        .map(|p| p.aggregation().expr(p.short_code()))
        .collect()
}

/// Old name → new name pairs turning parameter short codes into display labels.
pub(crate) fn label_renames() -> (Vec<&'static str>, Vec<&'static str>) {
    Parameter::ALL
        .into_iter()
        .map(|p| (p.short_code(), p.label()))
        .unzip()
}
