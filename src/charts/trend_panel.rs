use serde::Serialize;

use crate::analyzers::{station_trends, yearly_means, StationTrend, YearlyMean};
use crate::charts::ChartOutcome;
use crate::models::{Column, Reading};

/// Yearly trend view for one column: the per-year mean line and the
/// per-station slope table.
#[derive(Debug, Clone, Serialize)]
pub struct TrendFigure {
    pub column: Column,
    pub yearly_means: Vec<YearlyMean>,
    pub station_trends: Vec<StationTrend>,
}

pub fn trend_panel(readings: &[Reading], column: Column) -> ChartOutcome<TrendFigure> {
    let yearly = yearly_means(readings, column);
    if yearly.is_empty() {
        return ChartOutcome::skipped(format!(
            "no dated {} values after filtering",
            column
        ));
    }

    ChartOutcome::rendered(TrendFigure {
        column,
        yearly_means: yearly,
        station_trends: station_trends(readings, column),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(station: &str, year: i32, pm25: f64) -> Reading {
        Reading {
            station: station.to_string(),
            year: Some(year),
            pm25: Some(pm25),
            ..Default::default()
        }
    }

    #[test]
    fn test_trend_panel_rendered() {
        let readings = vec![
            reading("A", 2019, 10.0),
            reading("A", 2020, 20.0),
            reading("A", 2021, 30.0),
            reading("B", 2019, 5.0),
            reading("B", 2020, 5.0),
            reading("B", 2021, 5.0),
        ];

        let outcome = trend_panel(&readings, Column::Pm25);
        let figure = outcome.figure().unwrap();

        assert_eq!(figure.yearly_means.len(), 3);
        // Combined 2019 mean over both stations: (10 + 5) / 2.
        assert!((figure.yearly_means[0].mean - 7.5).abs() < 1e-9);

        assert_eq!(figure.station_trends.len(), 2);
        assert!((figure.station_trends[0].slope.unwrap() - 10.0).abs() < 1e-9);
        assert!(figure.station_trends[1].slope.unwrap().abs() < 1e-9);
    }

    #[test]
    fn test_trend_panel_skipped_without_years() {
        let readings = vec![Reading {
            station: "A".to_string(),
            pm25: Some(1.0),
            ..Default::default()
        }];

        let outcome = trend_panel(&readings, Column::Pm25);
        assert!(!outcome.is_rendered());
    }
}
