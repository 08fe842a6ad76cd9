use crate::dataset::combined::CombinedDataset;
use crate::dataset::error::DatasetError;
use log::{debug, info};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Session-scoped memo of the combined dataset.
///
/// There is exactly one key (the dataset has no parameters), so the cache is a
/// single guarded slot. The loader runs while the lock is held, which means
/// concurrent callers wait for the first load instead of fetching twice.
#[derive(Default)]
pub struct DatasetCache {
    slot: Mutex<Option<Arc<CombinedDataset>>>,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached dataset, running `load` only if the slot is empty.
    /// A failed load leaves the slot empty.
    pub async fn get_or_load<F, Fut>(&self, load: F) -> Result<Arc<CombinedDataset>, DatasetError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<CombinedDataset, DatasetError>>,
    {
        let mut slot = self.slot.lock().await;
        if let Some(cached) = slot.as_ref() {
            debug!("Dataset cache hit");
            return Ok(Arc::clone(cached));
        }

        info!("Dataset cache miss, loading all resources");
        let loaded = Arc::new(load().await?);
        *slot = Some(Arc::clone(&loaded));
        Ok(loaded)
    }

    /// Drops the cached dataset; the next access reloads.
    pub async fn invalidate(&self) {
        let mut slot = self.slot.lock().await;
        if slot.take().is_some() {
            info!("Dataset cache invalidated");
        }
    }

    pub async fn is_loaded(&self) -> bool {
        self.slot.lock().await.is_some()
    }
}
