use crate::analysis::filtering::AirQualityFrameFilterExt;
use crate::types::pollutant::Pollutant;
use polars::prelude::*;
use serde::Serialize;

/// Mean concentration for one calendar month. `mean` is `None` when every row
/// of that month was null.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MonthlyMean {
    pub month: u32,
    pub mean: Option<f64>,
}

/// Monthly means for weekday and weekend rows of one city.
///
/// Each list only holds months that have at least one row in its group; there
/// is no zero-fill, so the two lists may cover different months.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyComparison {
    pub pollutant: Pollutant,
    pub weekday: Vec<MonthlyMean>,
    pub weekend: Vec<MonthlyMean>,
}

impl MonthlyComparison {
    pub fn from_frame(frame: &DataFrame, pollutant: Pollutant) -> PolarsResult<Self> {
        Ok(Self {
            pollutant,
            weekday: monthly_means(frame, pollutant, false)?,
            weekend: monthly_means(frame, pollutant, true)?,
        })
    }
}

/// Groups the rows of one weekend/weekday group by month-of-year of `date` and
/// averages `pollutant`, ignoring nulls. Sorted by month.
pub fn monthly_means(
    frame: &DataFrame,
    pollutant: Pollutant,
    weekend: bool,
) -> PolarsResult<Vec<MonthlyMean>> {
    let value = if frame.get_column_index(pollutant.column()).is_some() {
        col(pollutant.column()).cast(DataType::Float64)
    } else {
        lit(NULL).cast(DataType::Float64)
    };

    let grouped = frame
        .clone()
        .lazy()
        .filter_weekend(weekend)
        .group_by([col("date").dt().month().cast(DataType::Int32).alias("month")])
        .agg([value.mean().alias("mean")])
        .collect()?;

    let months = grouped.column("month")?.cast(&DataType::Int32)?;
    let means = grouped.column("mean")?.cast(&DataType::Float64)?;

    let mut result: Vec<MonthlyMean> = months
        .i32()?
        .into_iter()
        .zip(means.f64()?.into_iter())
        .filter_map(|(month, mean)| {
            let month = u32::try_from(month?).ok()?;
            Some(MonthlyMean {
                month,
                mean: mean.filter(|m| !m.is_nan()),
            })
        })
        .collect();
    result.sort_by_key(|m| m.month);
    Ok(result)
}
