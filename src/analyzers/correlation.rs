use serde::Serialize;

use crate::models::{Column, Reading};

/// Symmetric Pearson correlation matrix over a set of columns.
///
/// `values[i][j]` correlates `columns[i]` with `columns[j]`. A cell is
/// `None` when fewer than two pairwise-complete rows exist for the pair.
#[derive(Debug, Clone, Serialize)]
pub struct CorrelationMatrix {
    pub columns: Vec<Column>,
    pub values: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    pub fn get(&self, a: Column, b: Column) -> Option<f64> {
        let i = self.columns.iter().position(|c| *c == a)?;
        let j = self.columns.iter().position(|c| *c == b)?;
        self.values[i][j]
    }
}

/// Pearson correlation coefficient of two equal-length samples.
pub fn pearson_correlation(x: &[f64], y: &[f64]) -> Option<f64> {
    if x.len() != y.len() || x.len() < 2 {
        return None;
    }

    let n = x.len() as f64;
    let mean_x = x.iter().sum::<f64>() / n;
    let mean_y = y.iter().sum::<f64>() / n;

    let mut numerator = 0.0;
    let mut sum_sq_x = 0.0;
    let mut sum_sq_y = 0.0;
    for i in 0..x.len() {
        let dx = x[i] - mean_x;
        let dy = y[i] - mean_y;
        numerator += dx * dy;
        sum_sq_x += dx * dx;
        sum_sq_y += dy * dy;
    }

    let denominator = (sum_sq_x * sum_sq_y).sqrt();
    if denominator == 0.0 {
        None
    } else {
        Some(numerator / denominator)
    }
}

/// Pairwise Pearson correlations over the rows where both columns are
/// present. The diagonal is 1.0 whenever the column has two or more values.
pub fn correlation_matrix(readings: &[Reading], columns: &[Column]) -> CorrelationMatrix {
    let count = columns.len();
    let mut values = vec![vec![None; count]; count];

    for i in 0..count {
        for j in i..count {
            let cell = if i == j {
                let observed = readings
                    .iter()
                    .filter(|r| columns[i].value(r).is_some())
                    .count();
                if observed >= 2 {
                    Some(1.0)
                } else {
                    None
                }
            } else {
                let mut x = Vec::new();
                let mut y = Vec::new();
                for reading in readings {
                    if let (Some(a), Some(b)) =
                        (columns[i].value(reading), columns[j].value(reading))
                    {
                        x.push(a);
                        y.push(b);
                    }
                }
                pearson_correlation(&x, &y)
            };

            values[i][j] = cell;
            values[j][i] = cell;
        }
    }

    CorrelationMatrix {
        columns: columns.to_vec(),
        values,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(pm25: Option<f64>, pm10: Option<f64>, temp: Option<f64>) -> Reading {
        Reading {
            station: "Dongsi".to_string(),
            pm25,
            pm10,
            temperature: temp,
            ..Default::default()
        }
    }

    #[test]
    fn test_pearson_perfect_positive() {
        let x = [1.0, 2.0, 3.0, 4.0];
        let y = [2.0, 4.0, 6.0, 8.0];
        let corr = pearson_correlation(&x, &y).unwrap();
        assert!((corr - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_pearson_perfect_negative() {
        let x = [1.0, 2.0, 3.0];
        let y = [9.0, 6.0, 3.0];
        let corr = pearson_correlation(&x, &y).unwrap();
        assert!((corr + 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_pearson_constant_input_undefined() {
        let x = [1.0, 2.0, 3.0];
        let y = [5.0, 5.0, 5.0];
        assert_eq!(pearson_correlation(&x, &y), None);
    }

    #[test]
    fn test_pearson_too_short() {
        assert_eq!(pearson_correlation(&[1.0], &[2.0]), None);
        assert_eq!(pearson_correlation(&[1.0, 2.0], &[2.0]), None);
    }

    #[test]
    fn test_matrix_pairwise_complete() {
        let readings = vec![
            reading(Some(1.0), Some(2.0), Some(30.0)),
            reading(Some(2.0), Some(4.0), None),
            reading(Some(3.0), Some(6.0), Some(10.0)),
            reading(None, Some(8.0), Some(0.0)),
        ];

        let matrix = correlation_matrix(&readings, &[Column::Pm25, Column::Pm10, Column::Temperature]);

        // PM2.5 vs PM10 over the three complete pairs: exactly linear.
        let corr = matrix.get(Column::Pm25, Column::Pm10).unwrap();
        assert!((corr - 1.0).abs() < 1e-9);

        // Symmetric with a unit diagonal.
        assert_eq!(
            matrix.get(Column::Pm10, Column::Pm25),
            matrix.get(Column::Pm25, Column::Pm10)
        );
        assert_eq!(matrix.get(Column::Pm25, Column::Pm25), Some(1.0));
    }

    #[test]
    fn test_matrix_insufficient_overlap_is_none() {
        // PM2.5 and TEMP never co-occur on more than one row.
        let readings = vec![
            reading(Some(1.0), None, None),
            reading(Some(2.0), None, Some(5.0)),
            reading(None, None, Some(6.0)),
        ];

        let matrix = correlation_matrix(&readings, &[Column::Pm25, Column::Temperature]);
        assert_eq!(matrix.get(Column::Pm25, Column::Temperature), None);
    }
}
