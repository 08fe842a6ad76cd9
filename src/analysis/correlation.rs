use crate::analysis::pollutant_values;
use crate::types::pollutant::Pollutant;
use polars::prelude::{DataFrame, PolarsResult};
use serde::Serialize;

/// Pollutants compared by the correlation heatmap, in axis order.
pub const CORRELATION_POLLUTANTS: [Pollutant; 5] = [
    Pollutant::Pm25,
    Pollutant::Pm10,
    Pollutant::Co,
    Pollutant::No2,
    Pollutant::O3,
];

/// Symmetric matrix of pairwise Pearson coefficients.
///
/// `values[i][j]` correlates `labels[i]` with `labels[j]`. An undefined
/// coefficient (no overlapping rows, or a column without variance) is NaN,
/// which serializes as `null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    pub labels: Vec<Pollutant>,
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    pub fn from_frame(frame: &DataFrame, pollutants: &[Pollutant]) -> PolarsResult<Self> {
        let columns = pollutants
            .iter()
            .map(|p| pollutant_values(frame, *p))
            .collect::<PolarsResult<Vec<_>>>()?;
        Ok(Self::from_columns(pollutants.to_vec(), &columns))
    }

    pub fn from_columns(labels: Vec<Pollutant>, columns: &[Vec<Option<f64>>]) -> Self {
        let n = columns.len();
        let mut values = vec![vec![f64::NAN; n]; n];
        for i in 0..n {
            for j in i..n {
                let r = if i == j {
                    if has_variance(&columns[i]) {
                        1.0
                    } else {
                        f64::NAN
                    }
                } else {
                    pearson(&columns[i], &columns[j])
                };
                values[i][j] = r;
                values[j][i] = r;
            }
        }
        Self { labels, values }
    }

    pub fn get(&self, row: Pollutant, column: Pollutant) -> Option<f64> {
        let i = self.labels.iter().position(|p| *p == row)?;
        let j = self.labels.iter().position(|p| *p == column)?;
        Some(self.values[i][j])
    }
}

/// Pearson correlation over the rows where both values are present.
/// Returns NaN with fewer than two such rows or when either side is constant.
pub fn pearson(a: &[Option<f64>], b: &[Option<f64>]) -> f64 {
    let pairs: Vec<(f64, f64)> = a
        .iter()
        .zip(b)
        .filter_map(|(x, y)| Some(((*x)?, (*y)?)))
        .collect();
    if pairs.len() < 2 {
        return f64::NAN;
    }

    let count = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(x, _)| x).sum::<f64>() / count;
    let mean_y = pairs.iter().map(|(_, y)| y).sum::<f64>() / count;

    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (x, y) in &pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }
    if sxx == 0.0 || syy == 0.0 {
        return f64::NAN;
    }
    (sxy / (sxx.sqrt() * syy.sqrt())).clamp(-1.0, 1.0)
}

fn has_variance(values: &[Option<f64>]) -> bool {
    let mut present = values.iter().flatten();
    match present.next() {
        Some(first) => present.any(|v| v != first),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::data_loader::{annotate, csv_to_dataframe};
    use crate::test_support::{csv_fixture, FixtureRow};

    fn some(values: &[f64]) -> Vec<Option<f64>> {
        values.iter().copied().map(Some).collect()
    }

    #[test]
    fn test_pearson_known_values() {
        let x = some(&[1.0, 2.0, 3.0, 4.0]);
        assert!((pearson(&x, &some(&[2.0, 4.0, 6.0, 8.0])) - 1.0).abs() < 1e-12);
        assert!((pearson(&x, &some(&[8.0, 6.0, 4.0, 2.0])) + 1.0).abs() < 1e-12);
        assert!(pearson(&x, &some(&[5.0, 5.0, 5.0, 5.0])).is_nan());
        assert!(pearson(&some(&[1.0]), &some(&[2.0])).is_nan());
    }

    #[test]
    fn test_pearson_uses_pairwise_complete_rows() {
        let x = vec![Some(1.0), Some(2.0), None, Some(3.0), Some(100.0)];
        let y = vec![Some(1.0), Some(2.0), Some(50.0), Some(3.0), None];
        assert!((pearson(&x, &y) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_matrix_is_symmetric_with_unit_diagonal() {
        let columns = vec![
            some(&[1.0, 2.0, 3.0, 4.0, 5.0]),
            some(&[2.0, 1.0, 4.0, 3.0, 6.0]),
            some(&[9.0, 7.0, 8.0, 1.0, 2.0]),
            vec![Some(3.0), None, Some(1.0), Some(7.0), Some(2.0)],
            some(&[0.5, 0.1, 0.9, 0.3, 0.2]),
        ];
        let matrix = CorrelationMatrix::from_columns(CORRELATION_POLLUTANTS.to_vec(), &columns);

        for i in 0..5 {
            assert_eq!(matrix.values[i][i], 1.0);
            for j in 0..5 {
                let r = matrix.values[i][j];
                assert!(r.is_finite());
                assert!((-1.0..=1.0).contains(&r), "{} out of range", r);
                assert_eq!(r.to_bits(), matrix.values[j][i].to_bits());
            }
        }
    }

    #[test]
    fn test_all_null_column_is_nan_everywhere() -> PolarsResult<()> {
        let rows: Vec<FixtureRow> = (0..6u32)
            .map(|h| {
                let v = (h * h) as f64;
                FixtureRow::new(2015, 6, 1, h)
                    .pm25(&format!("{}", 10.0 + v))
                    .pm10(&format!("{}", 20.0 + 2.0 * h as f64))
                    .no2(&format!("{}", 50.0 - v))
                    .o3(&format!("{}", (h % 3) as f64))
            })
            .collect();
        let df = csv_to_dataframe(csv_fixture(&rows).into_bytes(), "t").unwrap();
        let df = annotate(df, "t", "A").unwrap();

        let matrix = CorrelationMatrix::from_frame(&df, &CORRELATION_POLLUTANTS)?;
        for other in CORRELATION_POLLUTANTS {
            assert!(matrix.get(Pollutant::Co, other).unwrap().is_nan());
            assert!(matrix.get(other, Pollutant::Co).unwrap().is_nan());
        }
        for a in CORRELATION_POLLUTANTS.iter().filter(|p| **p != Pollutant::Co) {
            for b in CORRELATION_POLLUTANTS.iter().filter(|p| **p != Pollutant::Co) {
                assert!(matrix.get(*a, *b).unwrap().is_finite(), "{} vs {}", a, b);
            }
        }
        Ok(())
    }

    #[test]
    fn test_nan_serializes_as_null() {
        let matrix = CorrelationMatrix::from_columns(
            vec![Pollutant::Co],
            &[vec![None, None]],
        );
        let json = serde_json::to_string(&matrix).unwrap();
        assert_eq!(json, r#"{"labels":["Co"],"values":[[null]]}"#);
    }
}
