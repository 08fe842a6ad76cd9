use polars::error::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Failed preparing chart data")]
    ChartData(#[from] PolarsError),

    #[error("Failed drawing chart: {0}")]
    Drawing(String),
}
