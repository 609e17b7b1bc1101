use serde::Serialize;
use tracing::warn;

use crate::charts::ChartOutcome;
use crate::models::{Column, Reading};

/// Fixed-width histogram of one column's non-missing values.
///
/// `bin_edges` has one more entry than `counts`; the last bin is closed on
/// both sides so the maximum lands in it.
#[derive(Debug, Clone, Serialize)]
pub struct HistogramFigure {
    pub column: Column,
    pub bin_edges: Vec<f64>,
    pub counts: Vec<usize>,
    pub total: usize,
}

pub fn histogram(readings: &[Reading], column: Column, bins: usize) -> ChartOutcome<HistogramFigure> {
    if bins == 0 {
        return ChartOutcome::skipped("bin count must be at least 1");
    }

    let values: Vec<f64> = readings
        .iter()
        .filter_map(|reading| column.value(reading))
        .collect();

    if values.is_empty() {
        warn!(column = %column, "histogram skipped: no values after filtering");
        return ChartOutcome::skipped(format!("no {} values after filtering", column));
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    // A constant column collapses into one degenerate bin.
    if min == max {
        return ChartOutcome::rendered(HistogramFigure {
            column,
            bin_edges: vec![min, max],
            counts: vec![values.len()],
            total: values.len(),
        });
    }

    let width = (max - min) / bins as f64;
    let bin_edges: Vec<f64> = (0..=bins).map(|i| min + width * i as f64).collect();

    let mut counts = vec![0usize; bins];
    for value in &values {
        let index = (((value - min) / width) as usize).min(bins - 1);
        counts[index] += 1;
    }

    ChartOutcome::rendered(HistogramFigure {
        column,
        bin_edges,
        counts,
        total: values.len(),
    })
}
