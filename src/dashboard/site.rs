use crate::dashboard::{page_file_name, Dashboard};
use crate::error::AirQualityError;
use log::info;
use std::path::{Path, PathBuf};

pub const INDEX_FILE: &str = "index.html";

/// What [`Dashboard::write_site`] renders.
#[derive(Debug, Clone, Default)]
pub struct SiteOptions {
    /// City shown on `index.html`; the first city when `None`.
    pub index_city: Option<String>,
    /// Render only the index city instead of every city.
    pub only_index: bool,
    /// Also write a `<city>.json` summary per rendered city.
    pub json: bool,
}

impl Dashboard {
    /// Writes one page per rendered city plus `index.html` into `output`.
    ///
    /// Each page's selector lists only the cities rendered in this run, so every
    /// option points at a file that exists. Returns the written paths in order.
    pub async fn write_site(
        &self,
        output: &Path,
        options: &SiteOptions,
    ) -> Result<Vec<PathBuf>, AirQualityError> {
        let cities = self.cities().await?;
        let index_city = match &options.index_city {
            Some(city) => city.clone(),
            None => cities.first().cloned().unwrap_or_default(),
        };
        let mut targets = if options.only_index {
            Vec::new()
        } else {
            cities
        };
        if !targets.contains(&index_city) {
            targets.push(index_city.clone());
        }

        tokio::fs::create_dir_all(output)
            .await
            .map_err(|source| AirQualityError::Write {
                path: output.to_path_buf(),
                source,
            })?;
        let mut written = Vec::with_capacity(targets.len() * 2 + 1);
        for city in &targets {
            let mut page = self.page(Some(city)).await?;
            page.cities.retain(|c| targets.contains(c));
            let html = page.to_html();

            let path = output.join(page_file_name(city));
            write_file(&path, &html).await?;
            written.push(path);

            if *city == index_city {
                let path = output.join(INDEX_FILE);
                write_file(&path, &html).await?;
                written.push(path);
            }

            if options.json {
                let summary = self.summary(city).await?;
                let json = serde_json::to_string_pretty(&summary).map_err(|source| {
                    AirQualityError::Summary {
                        city: city.clone(),
                        source,
                    }
                })?;
                let path = output.join(page_file_name(city)).with_extension("json");
                write_file(&path, &json).await?;
                written.push(path);
            }
        }
        Ok(written)
    }
}

async fn write_file(path: &Path, contents: &str) -> Result<(), AirQualityError> {
    tokio::fs::write(path, contents)
        .await
        .map_err(|source| AirQualityError::Write {
            path: path.to_path_buf(),
            source,
        })?;
    info!("Wrote {}", path.display());
    Ok(())
}
