//! Computations behind the three charts. Every function takes a single city's
//! rows (see [`crate::CombinedDataset::for_city`]) and reads it without mutation.

pub mod correlation;
pub mod filtering;
pub mod monthly;
pub mod trend;

use crate::types::pollutant::Pollutant;
use chrono::NaiveDate;
use polars::prelude::{DataFrame, DataType, PolarsResult};

/// Values of a pollutant column as `f64`. A missing column reads as all-null,
/// and NaN cells are treated as missing.
pub(crate) fn pollutant_values(
    frame: &DataFrame,
    pollutant: Pollutant,
) -> PolarsResult<Vec<Option<f64>>> {
    if frame.get_column_index(pollutant.column()).is_none() {
        return Ok(vec![None; frame.height()]);
    }
    let values = frame
        .column(pollutant.column())?
        .cast(&DataType::Float64)?;
    let values = values
        .f64()?
        .into_iter()
        .map(|v| v.filter(|v| !v.is_nan()))
        .collect();
    Ok(values)
}

/// Row dates; a row whose date could not be formed reads as `None`.
pub(crate) fn date_values(frame: &DataFrame) -> PolarsResult<Vec<Option<NaiveDate>>> {
    Ok(frame.column("date")?.date()?.as_date_iter().collect())
}
