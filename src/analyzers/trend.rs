use serde::Serialize;
use std::collections::BTreeMap;

use crate::models::{Column, Reading};

/// Mean of one column over one calendar year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct YearlyMean {
    pub year: i32,
    pub mean: f64,
}

/// Trend direction for one station: the OLS slope of its yearly mean
/// against year. `None` means undefined (fewer than two distinct years
/// carried data).
#[derive(Debug, Clone, Serialize)]
pub struct StationTrend {
    pub station: String,
    pub observations: usize,
    pub slope: Option<f64>,
}

/// Ordinary-least-squares slope of value against year.
///
/// Years repeat freely in the input; each year's values are averaged before
/// the fit, so at most one point per year enters it. Returns `None` when
/// fewer than two distinct years remain.
pub fn ols_slope(points: &[(i32, f64)]) -> Option<f64> {
    let mut by_year: BTreeMap<i32, (f64, usize)> = BTreeMap::new();
    for (year, value) in points {
        let entry = by_year.entry(*year).or_insert((0.0, 0));
        entry.0 += value;
        entry.1 += 1;
    }

    if by_year.len() < 2 {
        return None;
    }

    let n = by_year.len() as f64;
    let mean_year = by_year.keys().map(|y| *y as f64).sum::<f64>() / n;
    let mean_value = by_year.values().map(|(sum, count)| sum / *count as f64).sum::<f64>() / n;

    let mut covariance = 0.0;
    let mut variance = 0.0;
    for (year, (sum, count)) in &by_year {
        let dx = *year as f64 - mean_year;
        let dy = sum / *count as f64 - mean_value;
        covariance += dx * dy;
        variance += dx * dx;
    }

    Some(covariance / variance)
}

fn reading_year(reading: &Reading) -> Option<i32> {
    reading
        .year
        .or_else(|| reading.timestamp.map(|ts| chrono::Datelike::year(&ts)))
}

/// Per-year mean of one column, ascending by year.
pub fn yearly_means(readings: &[Reading], column: Column) -> Vec<YearlyMean> {
    let mut by_year: BTreeMap<i32, (f64, usize)> = BTreeMap::new();
    for reading in readings {
        if let (Some(year), Some(value)) = (reading_year(reading), column.value(reading)) {
            let entry = by_year.entry(year).or_insert((0.0, 0));
            entry.0 += value;
            entry.1 += 1;
        }
    }

    by_year
        .into_iter()
        .map(|(year, (sum, count))| YearlyMean {
            year,
            mean: sum / count as f64,
        })
        .collect()
}

/// Per-station trend slopes for one column, in station-name order.
pub fn station_trends(readings: &[Reading], column: Column) -> Vec<StationTrend> {
    let mut by_station: BTreeMap<&str, Vec<(i32, f64)>> = BTreeMap::new();
    for reading in readings {
        if let (Some(year), Some(value)) = (reading_year(reading), column.value(reading)) {
            by_station
                .entry(reading.station.as_str())
                .or_default()
                .push((year, value));
        }
    }

    by_station
        .into_iter()
        .map(|(station, points)| StationTrend {
            station: station.to_string(),
            observations: points.len(),
            slope: ols_slope(&points),
        })
        .collect()
}
