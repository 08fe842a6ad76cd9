//! Contains the `CombinedDataset` holding every successfully loaded city, and the
//! `LoadReport` describing which resources made it in.

use crate::analysis::filtering::AirQualityFrameFilterExt;
use crate::dataset::error::DatasetError;
use crate::types::resource::Resource;
use polars::prelude::{DataFrame, IntoLazy};
use serde::Serialize;

/// A resource that loaded successfully.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadedResource {
    pub resource: String,
    pub city: String,
    pub rows: usize,
}

/// A resource that was skipped, with the rendered error chain.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FailedResource {
    pub resource: String,
    pub error: String,
}

/// Outcome of loading every configured resource, in load order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LoadReport {
    pub loaded: Vec<LoadedResource>,
    pub failed: Vec<FailedResource>,
}

impl LoadReport {
    pub(crate) fn record_loaded(&mut self, resource: &Resource, rows: usize) {
        self.loaded.push(LoadedResource {
            resource: resource.name().to_string(),
            city: resource.city().unwrap_or_default().to_string(),
            rows,
        });
    }

    pub(crate) fn record_failed(&mut self, resource: &Resource, error: String) {
        self.failed.push(FailedResource {
            resource: resource.name().to_string(),
            error,
        });
    }

    pub fn attempted(&self) -> usize {
        self.loaded.len() + self.failed.len()
    }
}

/// The concatenation of all per-city tables.
///
/// Rows appear in the order their resources were loaded. Every row carries a
/// non-null `city`. The frame is never mutated after construction.
///
/// Instances are obtained through [`crate::AirQuality::dataset`], which caches
/// them for the lifetime of the client.
#[derive(Debug, Clone)]
pub struct CombinedDataset {
    frame: DataFrame,
    report: LoadReport,
}

impl CombinedDataset {
    pub(crate) fn new(frame: DataFrame, report: LoadReport) -> Self {
        Self { frame, report }
    }

    /// The underlying combined frame.
    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    /// Total number of rows across all cities.
    pub fn height(&self) -> usize {
        self.frame.height()
    }

    pub fn report(&self) -> &LoadReport {
        &self.report
    }

    /// Distinct city labels, in the order they first appear in the frame.
    pub fn cities(&self) -> Result<Vec<String>, DatasetError> {
        let cities = self.frame.column("city")?.unique_stable()?;
        Ok(cities
            .str()?
            .into_iter()
            .flatten()
            .map(str::to_string)
            .collect())
    }

    /// Rows belonging to `city`. An unknown city yields an empty frame with the
    /// full schema, not an error.
    pub fn for_city(&self, city: &str) -> Result<DataFrame, DatasetError> {
        Ok(self.frame.clone().lazy().filter_city(city).collect()?)
    }
}
