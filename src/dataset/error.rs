use polars::error::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Failed to build HTTP client")]
    ClientBuild(#[source] reqwest::Error),

    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
        #[source]
        source: reqwest::Error,
    },

    #[error("Resource name '{0}' does not contain a city token")]
    InvalidResourceName(String),

    #[error("Parsing error processing CSV data for resource '{resource}'")]
    CsvRead {
        resource: String,
        #[source]
        source: PolarsError,
    },

    #[error("Missing required column '{column}' for resource {resource}")]
    MissingColumn { resource: String, column: String },

    #[error("Invalid calendar date {year:?}-{month:?}-{day:?} in row {row} of resource {resource}")]
    InvalidDate {
        resource: String,
        row: usize,
        year: Option<i32>,
        month: Option<i32>,
        day: Option<i32>,
    },

    #[error("Polars operation failed for resource {resource}")]
    ColumnOperation {
        resource: String,
        #[source]
        source: PolarsError,
    },

    #[error("Background task failed to complete")]
    TaskJoin(#[from] tokio::task::JoinError),

    #[error("Failed combining DataFrames")]
    DataFrameProcessing(#[from] PolarsError),

    #[error("No data: all {attempted} resources failed to load")]
    NoData { attempted: usize },
}
