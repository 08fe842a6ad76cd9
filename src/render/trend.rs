use crate::analysis::trend::{TrendSeries, TREND_POLLUTANTS};
use crate::render::error::RenderError;
use crate::render::{padded_range, render_svg, CAPTION_FONT};
use chrono::{Duration, NaiveDate};
use plotters::coord::Shift;
use plotters::prelude::*;
use polars::prelude::{DataFrame, PolarsResult};

const TREND_SIZE: (u32, u32) = (1400, 1000);

/// Draws the 2×2 trend figure (PM2.5, PM10, CO, NO2) for one city's rows.
///
/// Values are plotted per row in table order against the row date, without
/// aggregation.
pub fn render_trends(city_frame: &DataFrame) -> Result<String, RenderError> {
    let series = TREND_POLLUTANTS
        .iter()
        .map(|p| TrendSeries::from_frame(city_frame, *p))
        .collect::<PolarsResult<Vec<_>>>()?;

    render_svg(TREND_SIZE, |root| {
        root.fill(&WHITE)?;
        let panels = root.split_evenly((2, 2));
        for (panel, series) in panels.iter().zip(&series) {
            draw_trend_panel(panel, series)?;
        }
        Ok(())
    })
}

fn dataset_span() -> (NaiveDate, NaiveDate) {
    (
        NaiveDate::from_ymd_opt(2013, 3, 1).unwrap_or_default(),
        NaiveDate::from_ymd_opt(2017, 2, 28).unwrap_or_default(),
    )
}

fn draw_trend_panel<DB>(
    area: &DrawingArea<DB, Shift>,
    series: &TrendSeries,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>>
where
    DB: DrawingBackend,
{
    let (start, end) = series.date_range().unwrap_or_else(dataset_span);
    let end = if end <= start {
        start + Duration::days(1)
    } else {
        end
    };
    let y_range = padded_range(series.value_range());
    let color = series.pollutant.color();

    let mut chart = ChartBuilder::on(area)
        .caption(format!("{} Trend", series.pollutant), CAPTION_FONT)
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(70)
        .build_cartesian_2d(start..end, y_range)?;

    chart
        .configure_mesh()
        .x_desc("Date")
        .y_desc(format!("Concentration ({})", series.pollutant.unit()))
        .x_labels(6)
        .x_label_formatter(&|d: &NaiveDate| d.format("%Y-%m").to_string())
        .draw()?;

    let mut labelled = false;
    for segment in series.segments() {
        let drawn = chart.draw_series(LineSeries::new(segment, &color))?;
        if !labelled {
            drawn
                .label(series.pollutant.column())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
            labelled = true;
        }
    }

    if labelled {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
    }
    Ok(())
}
