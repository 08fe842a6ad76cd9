use crate::dataset::error::DatasetError;
use crate::types::calendar::{calendar_date, is_weekend};
use crate::types::pollutant::Pollutant;
use crate::types::resource::Resource;
use chrono::NaiveDate;
use log::{debug, warn};
use polars::prelude::*;
use reqwest::Client;
use std::io::Cursor;
use std::time::Duration;
use tokio::task;

/// Downloads a single PRSA resource and turns it into an annotated `DataFrame`.
pub struct DatasetLoader {
    base_url: String,
    download_client: Client,
}

impl DatasetLoader {
    /// Creates a loader whose requests are all bounded by `timeout`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<DatasetLoader, DatasetError> {
        let download_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(DatasetError::ClientBuild)?;
        Ok(DatasetLoader {
            base_url: base_url.to_string(),
            download_client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Downloads, parses and annotates one resource.
    ///
    /// The returned frame carries the CSV columns plus the derived `city`,
    /// `date` and `is_weekend` columns.
    pub async fn get_frame(&self, resource: &Resource) -> Result<DataFrame, DatasetError> {
        let city = resource
            .city()
            .ok_or_else(|| DatasetError::InvalidResourceName(resource.name().to_string()))?
            .to_string();

        let raw_bytes = self.download(resource).await?;
        let resource_name = resource.name().to_string();

        task::spawn_blocking(move || {
            let df = csv_to_dataframe(raw_bytes, &resource_name)?;
            annotate(df, &resource_name, &city)
        })
        .await?
    }

    async fn download(&self, resource: &Resource) -> Result<Vec<u8>, DatasetError> {
        let url = resource.url(&self.base_url);
        debug!("Downloading data from {}", url);

        let response = self
            .download_client
            .get(&url)
            .send()
            .await
            .map_err(|e| DatasetError::NetworkRequest(url.clone(), e))?;

        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                warn!("HTTP error for {}: {:?}", url, e);
                return Err(if let Some(status) = e.status() {
                    DatasetError::HttpStatus {
                        url,
                        status,
                        source: e,
                    }
                } else {
                    DatasetError::NetworkRequest(url, e)
                });
            }
        };

        let body = response
            .bytes()
            .await
            .map_err(|e| DatasetError::NetworkRequest(url.clone(), e))?;
        debug!("Downloaded {} bytes for {}", body.len(), resource);
        Ok(body.to_vec())
    }
}

/// Parses a PRSA CSV (with header). `NA` cells become nulls.
pub(crate) fn csv_to_dataframe(bytes: Vec<u8>, resource: &str) -> Result<DataFrame, DatasetError> {
    let parse_options = CsvParseOptions::default()
        .with_null_values(Some(NullValues::AllColumnsSingle("NA".into())));

    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .with_parse_options(parse_options)
        .into_reader_with_file_handle(Cursor::new(bytes))
        .finish()
        .map_err(|e| DatasetError::CsvRead {
            resource: resource.to_string(),
            source: e,
        })
}

/// Adds `city`, `date` and `is_weekend`, and coerces pollutant columns to Float64.
///
/// `year`, `month` and `day` are required columns. A row with a null in any of
/// them is kept with a null `date` and `is_weekend = false`; a row whose
/// components form an impossible date rejects the resource. Pollutant columns
/// that are absent are left absent.
pub(crate) fn annotate(
    mut df: DataFrame,
    resource: &str,
    city: &str,
) -> Result<DataFrame, DatasetError> {
    let column_error = |source: PolarsError| DatasetError::ColumnOperation {
        resource: resource.to_string(),
        source,
    };

    let years = int_values(&df, "year", resource)?;
    let months = int_values(&df, "month", resource)?;
    let days = int_values(&df, "day", resource)?;

    let mut dates: Vec<Option<NaiveDate>> = Vec::with_capacity(df.height());
    for (row, ((year, month), day)) in years.iter().zip(&months).zip(&days).enumerate() {
        let (Some(y), Some(m), Some(d)) = (*year, *month, *day) else {
            dates.push(None);
            continue;
        };
        let date = u32::try_from(m)
            .ok()
            .zip(u32::try_from(d).ok())
            .and_then(|(m, d)| calendar_date(y, m, d))
            .ok_or_else(|| DatasetError::InvalidDate {
                resource: resource.to_string(),
                row,
                year: *year,
                month: *month,
                day: *day,
            })?;
        dates.push(Some(date));
    }

    for pollutant in Pollutant::ALL {
        if df.get_column_index(pollutant.column()).is_none() {
            continue;
        }
        let values = df
            .column(pollutant.column())
            .and_then(|c| c.cast(&DataType::Float64))
            .map_err(column_error)?;
        df.with_column(values).map_err(column_error)?;
    }

    let weekend: Vec<bool> = dates.iter().copied().map(|d| d.is_some_and(is_weekend)).collect();

    let city_column = Series::new("city".into(), vec![city; df.height()]);
    let date_column = Series::new("date".into(), dates);
    let weekend_column = Series::new("is_weekend".into(), weekend);

    df.with_column(city_column).map_err(column_error)?;
    df.with_column(date_column).map_err(column_error)?;
    df.with_column(weekend_column).map_err(column_error)?;
    Ok(df)
}

fn int_values(
    df: &DataFrame,
    column: &str,
    resource: &str,
) -> Result<Vec<Option<i32>>, DatasetError> {
    let values = df
        .column(column)
        .map_err(|_| DatasetError::MissingColumn {
            resource: resource.to_string(),
            column: column.to_string(),
        })?
        .cast(&DataType::Int32)
        .map_err(|source| DatasetError::ColumnOperation {
            resource: resource.to_string(),
            source,
        })?;
    let values = values
        .i32()
        .map_err(|source| DatasetError::ColumnOperation {
            resource: resource.to_string(),
            source,
        })?
        .into_iter()
        .collect();
    Ok(values)
}
