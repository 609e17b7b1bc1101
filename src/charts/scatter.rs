use serde::Serialize;

use crate::charts::ChartOutcome;
use crate::models::{Column, Reading};

#[derive(Debug, Clone, Serialize)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: f64,
}

/// Two columns plotted against each other over rows where both are present.
#[derive(Debug, Clone, Serialize)]
pub struct ScatterFigure {
    pub x_column: Column,
    pub y_column: Column,
    pub points: Vec<ScatterPoint>,
}

pub fn scatter(readings: &[Reading], x_column: Column, y_column: Column) -> ChartOutcome<ScatterFigure> {
    let points: Vec<ScatterPoint> = readings
        .iter()
        .filter_map(|reading| {
            match (x_column.value(reading), y_column.value(reading)) {
                (Some(x), Some(y)) => Some(ScatterPoint { x, y }),
                _ => None,
            }
        })
        .collect();

    if points.is_empty() {
        return ChartOutcome::skipped(format!(
            "no rows with both {} and {} after filtering",
            x_column, y_column
        ));
    }

    ChartOutcome::rendered(ScatterFigure {
        x_column,
        y_column,
        points,
    })
}
