use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::warn;

use crate::charts::ChartOutcome;
use crate::models::{Column, Reading};

#[derive(Debug, Clone, Serialize)]
pub struct TimeSeriesPoint {
    pub timestamp: NaiveDateTime,
    pub value: f64,
}

/// One column plotted against the derived timestamp, ascending in time.
#[derive(Debug, Clone, Serialize)]
pub struct TimeSeriesFigure {
    pub column: Column,
    pub points: Vec<TimeSeriesPoint>,
}

pub fn time_series(readings: &[Reading], column: Column) -> ChartOutcome<TimeSeriesFigure> {
    if readings.iter().all(|r| r.timestamp.is_none()) {
        warn!(column = %column, "time series disabled: no timestamps in the data");
        return ChartOutcome::skipped("timestamps unavailable; time series disabled");
    }

    let mut points: Vec<TimeSeriesPoint> = readings
        .iter()
        .filter_map(|reading| {
            match (reading.timestamp, column.value(reading)) {
                (Some(timestamp), Some(value)) => Some(TimeSeriesPoint { timestamp, value }),
                _ => None,
            }
        })
        .collect();

    if points.is_empty() {
        return ChartOutcome::skipped(format!("no timestamped {} values after filtering", column));
    }

    points.sort_by_key(|point| point.timestamp);

    ChartOutcome::rendered(TimeSeriesFigure { column, points })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn reading(day: u32, hour: u32, pm25: Option<f64>) -> Reading {
        let mut r = Reading {
            station: "Dongsi".to_string(),
            year: Some(2020),
            month: Some(5),
            day: Some(day),
            hour: Some(hour),
            pm25,
            ..Default::default()
        };
        r.derive_timestamp();
        r
    }

    #[test]
    fn test_time_series_sorted() {
        let readings = vec![
            reading(3, 0, Some(30.0)),
            reading(1, 12, Some(10.0)),
            reading(2, 6, Some(20.0)),
            reading(2, 7, None),
        ];

        let outcome = time_series(&readings, Column::Pm25);
        let figure = outcome.figure().unwrap();

        assert_eq!(figure.points.len(), 3);
        let values: Vec<f64> = figure.points.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![10.0, 20.0, 30.0]);
        assert_eq!(
            figure.points[0].timestamp.date(),
            NaiveDate::from_ymd_opt(2020, 5, 1).unwrap()
        );
    }

    #[test]
    fn test_time_series_skipped_without_timestamps() {
        let readings = vec![Reading {
            station: "Dongsi".to_string(),
            pm25: Some(10.0),
            ..Default::default()
        }];

        let outcome = time_series(&readings, Column::Pm25);
        assert!(!outcome.is_rendered());
        assert!(outcome.skip_reason().unwrap().contains("timestamps unavailable"));
    }

    #[test]
    fn test_time_series_skipped_when_column_empty() {
        let readings = vec![reading(1, 0, None), reading(2, 0, None)];
        let outcome = time_series(&readings, Column::Pm25);
        assert!(!outcome.is_rendered());
        assert!(outcome.skip_reason().unwrap().contains("after filtering"));
    }
}
