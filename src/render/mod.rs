//! SVG renderers for the three dashboard charts, drawn with `plotters`.
//!
//! Each renderer takes one city's rows and returns a complete SVG document.
//! An empty frame (unknown city) produces an empty chart, not an error.

pub mod correlation;
pub mod error;
pub mod trend;
pub mod weekday_weekend;

use crate::render::error::RenderError;
use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::{DrawingArea, IntoDrawingArea, SVGBackend};
use std::ops::Range;

pub(crate) const CAPTION_FONT: (&str, u32) = ("sans-serif", 22);

pub(crate) fn drawing_error<E>(err: DrawingAreaErrorKind<E>) -> RenderError
where
    E: std::error::Error + Send + Sync,
{
    RenderError::Drawing(err.to_string())
}

/// Runs `draw` against an in-memory SVG canvas and returns the document.
pub(crate) fn render_svg<F>(size: (u32, u32), draw: F) -> Result<String, RenderError>
where
    F: FnOnce(
        &DrawingArea<SVGBackend, Shift>,
    ) -> Result<(), DrawingAreaErrorKind<std::io::Error>>,
{
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, size).into_drawing_area();
        draw(&root).map_err(drawing_error)?;
        root.present().map_err(drawing_error)?;
    }
    Ok(svg)
}

/// A y-axis range around the data, padded by 5%. Degenerate or missing ranges
/// get a fixed window so the chart can still be laid out.
pub(crate) fn padded_range(range: Option<(f64, f64)>) -> Range<f64> {
    match range {
        None => 0.0..1.0,
        Some((lo, hi)) if hi - lo < f64::EPSILON => (lo - 1.0)..(hi + 1.0),
        Some((lo, hi)) => {
            let pad = (hi - lo) * 0.05;
            (lo - pad)..(hi + pad)
        }
    }
}
