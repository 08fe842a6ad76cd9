use air_quality::{CorrelationMatrix, MonthlyComparison, Pollutant, CORRELATION_POLLUTANTS};
use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use polars::prelude::*;

/// One synthetic year of hourly rows shaped like an annotated city table.
fn synthetic_city_frame() -> PolarsResult<DataFrame> {
    let start = NaiveDate::from_ymd_opt(2013, 3, 1).unwrap_or_default();
    let hours = 365 * 24;
    let dates: Vec<NaiveDate> = (0..hours).map(|h| start + Duration::days(h / 24)).collect();
    let is_weekend: Vec<bool> = dates
        .iter()
        .map(|d| air_quality::is_weekend(*d))
        .collect();
    let wave = |scale: f64, phase: f64| -> Vec<Option<f64>> {
        (0..hours)
            .map(|h| {
                if h % 97 == 0 {
                    None
                } else {
                    Some(scale * (1.5 + ((h as f64) / 24.0 + phase).sin()))
                }
            })
            .collect()
    };

    let mut frame = df!(
        "PM2.5" => wave(80.0, 0.0),
        "PM10" => wave(110.0, 0.3),
        "CO" => wave(1200.0, 1.1),
        "NO2" => wave(50.0, 2.0),
        "O3" => wave(60.0, 3.0),
        "is_weekend" => is_weekend,
        "city" => vec!["Bench"; hours as usize],
    )?;
    frame.with_column(Series::new("date".into(), dates))?;
    Ok(frame)
}

fn bench_analysis(c: &mut Criterion) {
    let frame = synthetic_city_frame().expect("synthetic frame");
    c.bench_function("correlation_matrix", |b| {
        b.iter(|| CorrelationMatrix::from_frame(black_box(&frame), &CORRELATION_POLLUTANTS))
    });
    c.bench_function("monthly_comparison", |b| {
        b.iter(|| MonthlyComparison::from_frame(black_box(&frame), Pollutant::Pm25))
    });
}

criterion_group!(benches, bench_analysis);
criterion_main!(benches);
