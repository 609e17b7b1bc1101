use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::charts::ChartOutcome;
use crate::error::DashboardError;
use crate::models::{Column, Reading};

/// Per-station aggregate choice for the bar panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Aggregator {
    Mean,
    Median,
}

impl Aggregator {
    fn compute(&self, values: &mut [f64]) -> f64 {
        match self {
            Aggregator::Mean => values.iter().sum::<f64>() / values.len() as f64,
            Aggregator::Median => {
                values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
                let mid = values.len() / 2;
                if values.len() % 2 == 0 {
                    (values[mid - 1] + values[mid]) / 2.0
                } else {
                    values[mid]
                }
            }
        }
    }
}

impl fmt::Display for Aggregator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Aggregator::Mean => f.write_str("mean"),
            Aggregator::Median => f.write_str("median"),
        }
    }
}

impl FromStr for Aggregator {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mean" => Ok(Aggregator::Mean),
            "median" => Ok(Aggregator::Median),
            other => Err(DashboardError::InvalidFormat(format!(
                "unknown aggregator '{}' (expected 'mean' or 'median')",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StationBar {
    pub station: String,
    pub value: f64,
    pub count: usize,
}

/// Per-station aggregate of one column, sorted descending by value.
#[derive(Debug, Clone, Serialize)]
pub struct StationBarFigure {
    pub column: Column,
    pub aggregator: Aggregator,
    pub bars: Vec<StationBar>,
}

pub fn station_bar(
    readings: &[Reading],
    column: Column,
    aggregator: Aggregator,
) -> ChartOutcome<StationBarFigure> {
    let mut by_station: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for reading in readings {
        if reading.station.is_empty() {
            continue;
        }
        if let Some(value) = column.value(reading) {
            by_station
                .entry(reading.station.as_str())
                .or_default()
                .push(value);
        }
    }

    if by_station.is_empty() {
        return ChartOutcome::skipped(format!(
            "no stations with {} values after filtering",
            column
        ));
    }

    let mut bars: Vec<StationBar> = by_station
        .into_iter()
        .map(|(station, mut values)| StationBar {
            station: station.to_string(),
            value: aggregator.compute(&mut values),
            count: values.len(),
        })
        .collect();

    bars.sort_by(|a, b| {
        b.value
            .partial_cmp(&a.value)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.station.cmp(&b.station))
    });

    ChartOutcome::rendered(StationBarFigure {
        column,
        aggregator,
        bars,
    })
}
