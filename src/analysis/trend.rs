use crate::analysis::{date_values, pollutant_values};
use crate::types::pollutant::Pollutant;
use chrono::NaiveDate;
use polars::prelude::{DataFrame, PolarsResult};

/// Pollutants drawn by the trend chart, in panel order (row-major 2×2).
pub const TREND_POLLUTANTS: [Pollutant; 4] =
    [Pollutant::Pm25, Pollutant::Pm10, Pollutant::Co, Pollutant::No2];

/// Raw per-row values of one pollutant against the row date, in table order.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendSeries {
    pub pollutant: Pollutant,
    pub points: Vec<(NaiveDate, Option<f64>)>,
}

impl TrendSeries {
    pub fn from_frame(frame: &DataFrame, pollutant: Pollutant) -> PolarsResult<Self> {
        let dates = date_values(frame)?;
        let values = pollutant_values(frame, pollutant)?;
        let points = dates
            .into_iter()
            .zip(values)
            .filter_map(|(date, value)| date.map(|d| (d, value)))
            .collect();
        Ok(Self { pollutant, points })
    }

    /// Runs of consecutive present values. A null ends a run, so missing
    /// readings show up as gaps in the line.
    pub fn segments(&self) -> Vec<Vec<(NaiveDate, f64)>> {
        let mut segments = Vec::new();
        let mut current = Vec::new();
        for (date, value) in &self.points {
            match value {
                Some(v) => current.push((*date, *v)),
                None if !current.is_empty() => segments.push(std::mem::take(&mut current)),
                None => {}
            }
        }
        if !current.is_empty() {
            segments.push(current);
        }
        segments
    }

    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let min = self.points.iter().map(|(d, _)| *d).min()?;
        let max = self.points.iter().map(|(d, _)| *d).max()?;
        Some((min, max))
    }

    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.points
            .iter()
            .filter_map(|(_, v)| *v)
            .fold(None, |range, v| match range {
                None => Some((v, v)),
                Some((lo, hi)) => Some((f64::min(lo, v), f64::max(hi, v))),
            })
    }
}
