use serde::Serialize;

use crate::analyzers::{correlation_matrix, CorrelationMatrix};
use crate::charts::ChartOutcome;
use crate::models::{Column, Reading};

/// Correlation heatmap over the requested columns.
#[derive(Debug, Clone, Serialize)]
pub struct CorrelationHeatmapFigure {
    pub matrix: CorrelationMatrix,
}

pub fn correlation_heatmap(
    readings: &[Reading],
    columns: &[Column],
) -> ChartOutcome<CorrelationHeatmapFigure> {
    // Only columns that actually carry data participate; the rest would
    // produce an all-None row and column.
    let present: Vec<Column> = columns
        .iter()
        .copied()
        .filter(|column| readings.iter().any(|r| column.value(r).is_some()))
        .collect();

    if present.len() < 2 {
        return ChartOutcome::skipped(
            "fewer than two of the requested columns have data after filtering",
        );
    }

    ChartOutcome::rendered(CorrelationHeatmapFigure {
        matrix: correlation_matrix(readings, &present),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(pm25: Option<f64>, pm10: Option<f64>) -> Reading {
        Reading {
            station: "Dongsi".to_string(),
            pm25,
            pm10,
            ..Default::default()
        }
    }

    #[test]
    fn test_heatmap_drops_empty_columns() {
        let readings = vec![
            reading(Some(1.0), Some(2.0)),
            reading(Some(2.0), Some(4.0)),
            reading(Some(3.0), Some(6.0)),
        ];

        let outcome = correlation_heatmap(
            &readings,
            &[Column::Pm25, Column::Pm10, Column::So2],
        );
        let figure = outcome.figure().unwrap();

        // SO2 never appears, so the matrix covers only the two live columns.
        assert_eq!(figure.matrix.columns, vec![Column::Pm25, Column::Pm10]);
        assert!((figure.matrix.get(Column::Pm25, Column::Pm10).unwrap() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_heatmap_skipped_with_one_live_column() {
        let readings = vec![reading(Some(1.0), None), reading(Some(2.0), None)];
        let outcome = correlation_heatmap(&readings, &[Column::Pm25, Column::Pm10]);
        assert!(!outcome.is_rendered());
    }
}
