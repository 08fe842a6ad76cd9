mod air_quality;
mod analysis;
mod dashboard;
mod dataset;
mod error;
mod render;
mod types;
mod utils;

#[cfg(test)]
mod test_support;

pub use air_quality::*;
pub use error::AirQualityError;

pub use dashboard::*;

pub use dataset::combined::{CombinedDataset, FailedResource, LoadReport, LoadedResource};
pub use dataset::combiner::{combine, load_all};
pub use dataset::data_loader::DatasetLoader;
pub use dataset::dataset_cache::DatasetCache;
pub use dataset::error::DatasetError;

pub use analysis::correlation::{pearson, CorrelationMatrix, CORRELATION_POLLUTANTS};
pub use analysis::filtering::AirQualityFrameFilterExt;
pub use analysis::monthly::{monthly_means, MonthlyComparison, MonthlyMean};
pub use analysis::trend::{TrendSeries, TREND_POLLUTANTS};

pub use render::correlation::{diverging_color, render_correlation, render_matrix};
pub use render::error::RenderError;
pub use render::trend::render_trends;
pub use render::weekday_weekend::{render_comparison, render_weekday_weekend};

pub use types::calendar::{calendar_date, is_weekend};
pub use types::pollutant::Pollutant;
pub use types::resource::{Resource, DEFAULT_BASE_URL, DEFAULT_RESOURCE_NAMES};
