use crate::analysis::monthly::{MonthlyComparison, MonthlyMean};
use crate::render::error::RenderError;
use crate::render::{padded_range, render_svg, CAPTION_FONT};
use crate::types::pollutant::Pollutant;
use plotters::prelude::*;
use polars::prelude::DataFrame;

const COMPARISON_SIZE: (u32, u32) = (900, 560);
const WEEKDAY_COLOR: RGBColor = RGBColor(31, 119, 180);
const WEEKEND_COLOR: RGBColor = RGBColor(255, 127, 14);

/// Draws monthly mean PM2.5 for weekdays and weekends as two lines.
pub fn render_weekday_weekend(city_frame: &DataFrame, city: &str) -> Result<String, RenderError> {
    let comparison = MonthlyComparison::from_frame(city_frame, Pollutant::Pm25)?;
    render_comparison(&comparison, city)
}

/// Draws an already computed comparison. Months missing from a group are
/// skipped, so a line only spans the months that group covers.
pub fn render_comparison(comparison: &MonthlyComparison, city: &str) -> Result<String, RenderError> {
    let weekday = points(&comparison.weekday);
    let weekend = points(&comparison.weekend);
    let value_range = weekday
        .iter()
        .chain(&weekend)
        .map(|(_, v)| *v)
        .fold(None, |range: Option<(f64, f64)>, v| match range {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        });
    let pollutant = comparison.pollutant;

    render_svg(COMPARISON_SIZE, |root| {
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(root)
            .caption(format!("{} Pollution Comparison - {}", pollutant, city), CAPTION_FONT)
            .margin(20)
            .x_label_area_size(45)
            .y_label_area_size(70)
            .build_cartesian_2d(0.5f64..12.5f64, padded_range(value_range))?;

        chart
            .configure_mesh()
            .x_desc("Month")
            .y_desc(format!("Mean {} ({})", pollutant, pollutant.unit()))
            .x_labels(12)
            .x_label_formatter(&|m: &f64| format!("{:.0}", m))
            .draw()?;

        for (label, color, line) in [
            ("Weekday", WEEKDAY_COLOR, &weekday),
            ("Weekend", WEEKEND_COLOR, &weekend),
        ] {
            chart
                .draw_series(LineSeries::new(line.iter().copied(), &color))?
                .label(label)
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
        Ok(())
    })
}

fn points(means: &[MonthlyMean]) -> Vec<(f64, f64)> {
    means
        .iter()
        .filter_map(|m| m.mean.map(|mean| (m.month as f64, mean)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_points_skip_undefined_means() {
        let means = [
            MonthlyMean {
                month: 1,
                mean: Some(20.0),
            },
            MonthlyMean { month: 2, mean: None },
            MonthlyMean {
                month: 4,
                mean: Some(8.5),
            },
        ];
        assert_eq!(points(&means), vec![(1.0, 20.0), (4.0, 8.5)]);
    }

    #[test]
    fn test_renders_both_groups() -> Result<(), RenderError> {
        let comparison = MonthlyComparison {
            pollutant: Pollutant::Pm25,
            weekday: vec![
                MonthlyMean {
                    month: 1,
                    mean: Some(90.0),
                },
                MonthlyMean {
                    month: 2,
                    mean: Some(70.0),
                },
            ],
            weekend: vec![MonthlyMean {
                month: 1,
                mean: Some(20.0),
            }],
        };
        let svg = render_comparison(&comparison, "Dongsi")?;

        assert!(svg.contains("<svg"));
        assert!(svg.contains("PM2.5 Pollution Comparison - Dongsi"));
        assert!(svg.contains("Weekday"));
        assert!(svg.contains("Weekend"));
        assert!(svg.contains("Month"));
        Ok(())
    }

    #[test]
    fn test_renders_from_city_rows() -> Result<(), Box<dyn std::error::Error>> {
        use crate::dataset::data_loader::{annotate, csv_to_dataframe};
        use crate::test_support::{csv_fixture, FixtureRow};

        // Friday 2013-01-04 and Saturday 2013-01-05.
        let csv = csv_fixture(&[
            FixtureRow::new(2013, 1, 4, 0).pm25("40"),
            FixtureRow::new(2013, 1, 5, 0).pm25("10"),
        ]);
        let frame = annotate(csv_to_dataframe(csv.into_bytes(), "t")?, "t", "Gucheng")?;
        let svg = render_weekday_weekend(&frame, "Gucheng")?;

        assert!(svg.contains("PM2.5 Pollution Comparison - Gucheng"));
        let lower = svg.to_lowercase();
        assert!(lower.contains("#1f77b4"));
        assert!(lower.contains("#ff7f0e"));
        Ok(())
    }

    #[test]
    fn test_renders_without_any_data() -> Result<(), RenderError> {
        let comparison = MonthlyComparison {
            pollutant: Pollutant::Pm25,
            weekday: Vec::new(),
            weekend: Vec::new(),
        };
        let svg = render_comparison(&comparison, "Nowhere")?;
        assert!(svg.contains("PM2.5 Pollution Comparison - Nowhere"));
        Ok(())
    }
}
