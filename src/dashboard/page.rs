use crate::air_quality::AirQuality;
use crate::analysis::correlation::{CorrelationMatrix, CORRELATION_POLLUTANTS};
use crate::analysis::monthly::MonthlyComparison;
use crate::error::AirQualityError;
use crate::render::correlation::render_correlation;
use crate::render::trend::render_trends;
use crate::render::weekday_weekend::render_weekday_weekend;
use crate::types::pollutant::Pollutant;
use crate::utils::escape_html;
use log::{info, warn};
use serde::Serialize;

pub const PAGE_TITLE: &str = "Air Quality Dashboard - Pollution Analysis Across Cities";

const STYLE: &str = "body{font-family:sans-serif;margin:0 auto;max-width:1100px;padding:16px;color:#222}\
h1{text-align:center}\
label{font-weight:bold;margin-right:8px}\
section{margin-top:32px}\
section svg{max-width:100%;height:auto}";

/// One headed chart block.
#[derive(Debug, Clone)]
pub struct Section {
    pub heading: String,
    pub svg: String,
}

/// Everything shown for one city selection.
#[derive(Debug, Clone)]
pub struct DashboardPage {
    pub title: String,
    pub cities: Vec<String>,
    pub selected: String,
    pub sections: Vec<Section>,
}

impl DashboardPage {
    /// Renders a self-contained HTML document with the charts inlined.
    ///
    /// The selector navigates to the sibling page of the chosen city, as named
    /// by [`page_file_name`].
    pub fn to_html(&self) -> String {
        let title = escape_html(&self.title);
        let mut html = String::new();
        html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
        html.push_str(&format!("<title>{}</title>\n", title));
        html.push_str(&format!("<style>{}</style>\n</head>\n<body>\n", STYLE));
        html.push_str(&format!("<h1>{}</h1>\n", title));

        html.push_str("<div>\n<label for=\"city\">City</label>\n");
        html.push_str(
            "<select id=\"city\" onchange=\"window.location.href=this.value\">\n",
        );
        for city in &self.cities {
            let selected = if *city == self.selected { " selected" } else { "" };
            html.push_str(&format!(
                "<option value=\"{}\"{}>{}</option>\n",
                escape_html(&page_file_name(city)),
                selected,
                escape_html(city)
            ));
        }
        html.push_str("</select>\n</div>\n");

        for section in &self.sections {
            html.push_str(&format!(
                "<section>\n<h2>{}</h2>\n{}\n</section>\n",
                escape_html(&section.heading),
                section.svg
            ));
        }
        html.push_str("</body>\n</html>\n");
        html
    }
}

/// File name of the page rendered for `city`. Characters outside
/// `[A-Za-z0-9_-]` become `_`.
pub fn page_file_name(city: &str) -> String {
    let stem: String = city
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("{}.html", stem)
}

/// Serializable per-city figures behind the weekday/weekend and correlation charts.
#[derive(Debug, Clone, Serialize)]
pub struct CitySummary {
    pub city: String,
    pub rows: usize,
    pub weekday_weekend: MonthlyComparison,
    pub correlation: CorrelationMatrix,
}

/// The presentation shell over a cached [`AirQuality`] client.
///
/// Every call to [`Dashboard::page`] re-renders the three charts from the
/// session's combined dataset; only the first call downloads anything.
pub struct Dashboard {
    client: AirQuality,
}

impl Dashboard {
    pub fn new(client: AirQuality) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &AirQuality {
        &self.client
    }

    /// Distinct cities in first-encountered order; these are the selector options.
    pub async fn cities(&self) -> Result<Vec<String>, AirQualityError> {
        Ok(self.client.dataset().await?.cities()?)
    }

    /// Builds the page for `selection`, or for the first city when `None`.
    ///
    /// A city that is not in the dataset is not an error: it is logged and
    /// rendered with empty charts.
    ///
    /// # Errors
    ///
    /// Fails if the dataset cannot be loaded at all or a chart cannot be drawn.
    pub async fn page(&self, selection: Option<&str>) -> Result<DashboardPage, AirQualityError> {
        let dataset = self.client.dataset().await?;
        let cities = dataset.cities()?;
        let selected = match selection {
            Some(city) => city.to_string(),
            None => cities.first().cloned().unwrap_or_default(),
        };
        if !cities.contains(&selected) {
            warn!("City {:?} is not in the dataset, rendering empty charts", selected);
        }

        let frame = dataset.for_city(&selected)?;
        info!("Rendering dashboard for {} ({} rows)", selected, frame.height());

        let sections = vec![
            Section {
                heading: format!("Pollutant Trends in {}", selected),
                svg: render_trends(&frame)?,
            },
            Section {
                heading: format!("Weekday vs Weekend Pollution in {}", selected),
                svg: render_weekday_weekend(&frame, &selected)?,
            },
            Section {
                heading: format!("Pollutant Correlation Matrix in {}", selected),
                svg: render_correlation(&frame, &selected)?,
            },
        ];

        Ok(DashboardPage {
            title: PAGE_TITLE.to_string(),
            cities,
            selected,
            sections,
        })
    }

    /// Row count, PM2.5 weekday/weekend means and the correlation matrix for `city`.
    pub async fn summary(&self, city: &str) -> Result<CitySummary, AirQualityError> {
        let dataset = self.client.dataset().await?;
        let frame = dataset.for_city(city)?;
        Ok(CitySummary {
            city: city.to_string(),
            rows: frame.height(),
            weekday_weekend: MonthlyComparison::from_frame(&frame, Pollutant::Pm25)?,
            correlation: CorrelationMatrix::from_frame(&frame, &CORRELATION_POLLUTANTS)?,
        })
    }
}
