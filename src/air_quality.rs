//! This module provides the main entry point for loading the PRSA air-quality
//! dataset. The client owns the download settings and the session cache of the
//! combined table.

use crate::dataset::combined::CombinedDataset;
use crate::dataset::combiner::load_all;
use crate::dataset::data_loader::DatasetLoader;
use crate::dataset::dataset_cache::DatasetCache;
use crate::error::AirQualityError;
use crate::types::resource::{Resource, DEFAULT_BASE_URL};
use bon::bon;
use std::sync::Arc;
use std::time::Duration;

/// Per-request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// The client for the combined air-quality dataset.
///
/// The first call to [`AirQuality::dataset`] downloads every configured
/// resource one after another and concatenates the ones that loaded. The result
/// is cached for the lifetime of the client, so later calls return the same
/// [`CombinedDataset`] without touching the network until
/// [`AirQuality::invalidate_cache`] is called.
///
/// # Examples
///
/// ```no_run
/// # use air_quality::{AirQuality, AirQualityError};
/// # use std::time::Duration;
/// # #[tokio::main]
/// # async fn main() -> Result<(), AirQualityError> {
/// let client = AirQuality::builder()
///     .timeout(Duration::from_secs(30))
///     .build()?;
///
/// let dataset = client.dataset().await?;
/// println!("Loaded {} rows for {:?}", dataset.height(), dataset.cities()?);
/// # Ok(())
/// # }
/// ```
pub struct AirQuality {
    loader: DatasetLoader,
    resources: Vec<Resource>,
    cache: DatasetCache,
}

#[bon]
impl AirQuality {
    /// Creates a client.
    ///
    /// # Arguments
    ///
    /// * `.base_url(..)`: Optional. URL prefix the resource names are joined onto.
    ///   Defaults to [`DEFAULT_BASE_URL`].
    /// * `.resources(..)`: Optional. Resources to load, in order. Defaults to the
    ///   twelve PRSA sites ([`Resource::defaults`]).
    /// * `.timeout(..)`: Optional. Bound on each request. An expired timeout counts
    ///   as a failure of that resource only. Defaults to [`DEFAULT_TIMEOUT`].
    ///
    /// # Errors
    ///
    /// Returns [`AirQualityError::Dataset`] if the HTTP client cannot be built.
    #[builder]
    pub fn new(
        #[builder(into)] base_url: Option<String>,
        resources: Option<Vec<Resource>>,
        timeout: Option<Duration>,
    ) -> Result<Self, AirQualityError> {
        let base_url = base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let timeout = timeout.unwrap_or(DEFAULT_TIMEOUT);
        Ok(Self {
            loader: DatasetLoader::new(&base_url, timeout)?,
            resources: resources.unwrap_or_else(Resource::defaults),
            cache: DatasetCache::new(),
        })
    }

    /// Returns the combined dataset, loading it on first use.
    ///
    /// # Errors
    ///
    /// Returns [`crate::DatasetError::NoData`] (wrapped) if no resource could be
    /// loaded. Such a failure is not cached; a later call tries again.
    pub async fn dataset(&self) -> Result<Arc<CombinedDataset>, AirQualityError> {
        let dataset = self
            .cache
            .get_or_load(|| load_all(&self.loader, &self.resources))
            .await?;
        Ok(dataset)
    }

    /// Discards the cached dataset so the next [`AirQuality::dataset`] call re-fetches.
    pub async fn invalidate_cache(&self) {
        self.cache.invalidate().await;
    }

    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    pub fn base_url(&self) -> &str {
        self.loader.base_url()
    }
}
