use crate::dataset::combined::{CombinedDataset, LoadReport};
use crate::dataset::data_loader::DatasetLoader;
use crate::dataset::error::DatasetError;
use crate::types::resource::Resource;
use crate::utils::error_chain;
use log::{error, info};
use polars::prelude::*;

/// Loads every resource one after another and combines the successes.
///
/// A failing resource is logged and recorded in the [`LoadReport`]; it never
/// aborts the remaining loads.
pub async fn load_all(
    loader: &DatasetLoader,
    resources: &[Resource],
) -> Result<CombinedDataset, DatasetError> {
    let mut outcomes = Vec::with_capacity(resources.len());
    for resource in resources {
        let outcome = loader.get_frame(resource).await;
        match &outcome {
            Ok(_) => info!("Successfully loaded: {}", resource),
            Err(e) => error!("Error loading {}: {}", resource, error_chain(e)),
        }
        outcomes.push((resource.clone(), outcome));
    }
    combine(outcomes)
}

/// Concatenates the successful frames diagonally: the result has the union of
/// all columns, and a column missing from one source is null for its rows.
///
/// Fails with [`DatasetError::NoData`] when nothing loaded.
pub fn combine(
    outcomes: Vec<(Resource, Result<DataFrame, DatasetError>)>,
) -> Result<CombinedDataset, DatasetError> {
    let mut report = LoadReport::default();
    let mut frames = Vec::with_capacity(outcomes.len());

    for (resource, outcome) in outcomes {
        match outcome {
            Ok(frame) => {
                report.record_loaded(&resource, frame.height());
                frames.push(frame.lazy());
            }
            Err(e) => report.record_failed(&resource, error_chain(&e)),
        }
    }

    if frames.is_empty() {
        return Err(DatasetError::NoData {
            attempted: report.attempted(),
        });
    }

    let args = UnionArgs {
        to_supertypes: true,
        ..Default::default()
    };
    let frame = concat_lf_diagonal(frames, args)?.collect()?;
    Ok(CombinedDataset::new(frame, report))
}
