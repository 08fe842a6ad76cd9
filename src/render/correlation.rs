use crate::analysis::correlation::{CorrelationMatrix, CORRELATION_POLLUTANTS};
use crate::render::error::RenderError;
use crate::render::{render_svg, CAPTION_FONT};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use polars::prelude::DataFrame;

const HEATMAP_SIZE: (u32, u32) = (1000, 600);
const COLORBAR_STEPS: i32 = 40;

// Endpoints of the diverging scale at -1, 0 and +1.
const COLD: (f64, f64, f64) = (59.0, 76.0, 192.0);
const NEUTRAL: (f64, f64, f64) = (221.0, 221.0, 221.0);
const WARM: (f64, f64, f64) = (180.0, 4.0, 38.0);

/// Computes and draws the PM2.5/PM10/CO/NO2/O3 correlation heatmap.
pub fn render_correlation(city_frame: &DataFrame, city: &str) -> Result<String, RenderError> {
    let matrix = CorrelationMatrix::from_frame(city_frame, &CORRELATION_POLLUTANTS)?;
    render_matrix(&matrix, city)
}

/// Draws an annotated heatmap on a fixed -1..+1 scale.
/// Undefined coefficients leave their cell blank.
pub fn render_matrix(matrix: &CorrelationMatrix, city: &str) -> Result<String, RenderError> {
    render_svg(HEATMAP_SIZE, |root| {
        root.fill(&WHITE)?;
        let area = root.titled(
            &format!("Pollutant Correlation Matrix - {}", city),
            CAPTION_FONT,
        )?;
        draw_heatmap(&area, matrix)
    })
}

/// Maps a coefficient onto the diverging scale; values outside [-1, 1] are clamped.
pub fn diverging_color(r: f64) -> RGBColor {
    let r = r.clamp(-1.0, 1.0);
    let (from, to, t) = if r < 0.0 {
        (NEUTRAL, COLD, -r)
    } else {
        (NEUTRAL, WARM, r)
    };
    let lerp = |a: f64, b: f64| (a + (b - a) * t).round() as u8;
    RGBColor(
        lerp(from.0, to.0),
        lerp(from.1, to.1),
        lerp(from.2, to.2),
    )
}

fn draw_heatmap<DB>(
    area: &DrawingArea<DB, Shift>,
    matrix: &CorrelationMatrix,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>>
where
    DB: DrawingBackend,
{
    let n = matrix.labels.len().max(1) as i32;
    let (width, height) = area.dim_in_pixel();
    let (width, height) = (width as i32, height as i32);

    let left = 90;
    let top = 10;
    let bottom = 50;
    let bar_width = 24;
    let bar_gap = 50;
    let cell = ((width - left - bar_gap - bar_width - 80) / n)
        .min((height - top - bottom) / n)
        .max(1);
    let grid_right = left + cell * n;

    let centered = ("sans-serif", 16)
        .into_font()
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Center));
    let right_aligned = ("sans-serif", 16)
        .into_font()
        .color(&BLACK)
        .pos(Pos::new(HPos::Right, VPos::Center));
    let left_aligned = ("sans-serif", 14)
        .into_font()
        .color(&BLACK)
        .pos(Pos::new(HPos::Left, VPos::Center));

    for (i, row) in matrix.values.iter().enumerate() {
        let y0 = top + cell * i as i32;
        for (j, r) in row.iter().enumerate() {
            let x0 = left + cell * j as i32;
            let corners = [(x0, y0), (x0 + cell, y0 + cell)];
            if r.is_nan() {
                area.draw(&Rectangle::new(corners, WHITE.filled()))?;
            } else {
                area.draw(&Rectangle::new(corners, diverging_color(*r).filled()))?;
                let ink = if r.abs() > 0.6 { &WHITE } else { &BLACK };
                let annotation = centered.color(ink);
                area.draw_text(
                    &format!("{:.2}", r),
                    &annotation,
                    (x0 + cell / 2, y0 + cell / 2),
                )?;
            }
            area.draw(&Rectangle::new(corners, WHITE.stroke_width(1)))?;
        }
    }

    for (k, pollutant) in matrix.labels.iter().enumerate() {
        let offset = cell * k as i32 + cell / 2;
        area.draw_text(pollutant.column(), &right_aligned, (left - 10, top + offset))?;
        area.draw_text(
            pollutant.column(),
            &centered,
            (left + offset, top + cell * n + bottom / 2),
        )?;
    }

    let bar_left = grid_right + bar_gap;
    let bar_height = cell * n;
    let step = (bar_height / COLORBAR_STEPS).max(1);
    for k in 0..COLORBAR_STEPS {
        let value = 1.0 - 2.0 * (k as f64 + 0.5) / COLORBAR_STEPS as f64;
        let y0 = top + step * k;
        area.draw(&Rectangle::new(
            [(bar_left, y0), (bar_left + bar_width, y0 + step)],
            diverging_color(value).filled(),
        ))?;
    }
    let bar_bottom = top + step * COLORBAR_STEPS;
    for (label, y) in [
        ("1.0", top),
        ("0.0", (top + bar_bottom) / 2),
        ("-1.0", bar_bottom),
    ] {
        area.draw_text(label, &left_aligned, (bar_left + bar_width + 8, y))?;
    }
    Ok(())
}
