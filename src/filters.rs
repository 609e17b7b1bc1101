use chrono::NaiveDate;
use std::collections::BTreeSet;

use crate::models::Reading;

/// The sidebar filter state: date range, station membership, and numeric
/// ranges on the two particulate columns.
///
/// Applying a filter produces a derived copy of the matching rows; the base
/// table is never touched. Predicates are independent, so applying them in
/// any order (or twice) yields the same rows.
#[derive(Debug, Clone, Default)]
pub struct FilterSet {
    pub date_range: Option<(NaiveDate, NaiveDate)>,
    pub stations: Option<BTreeSet<String>>,
    pub pm25_range: Option<(f64, f64)>,
    pub pm10_range: Option<(f64, f64)>,
}

impl FilterSet {
    pub fn with_date_range(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.date_range = Some((start, end));
        self
    }

    pub fn with_stations<I, S>(mut self, stations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stations = Some(stations.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_pm25_range(mut self, min: f64, max: f64) -> Self {
        self.pm25_range = Some((min, max));
        self
    }

    pub fn with_pm10_range(mut self, min: f64, max: f64) -> Self {
        self.pm10_range = Some((min, max));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.date_range.is_none()
            && self.stations.is_none()
            && self.pm25_range.is_none()
            && self.pm10_range.is_none()
    }

    /// Whether one reading passes every active predicate.
    ///
    /// A reading without a timestamp fails an active date filter, and a
    /// reading missing PM2.5/PM10 fails the corresponding active range
    /// filter (absent never compares true against a bound).
    pub fn matches(&self, reading: &Reading) -> bool {
        if let Some((start, end)) = self.date_range {
            match reading.date() {
                Some(date) if date >= start && date <= end => {}
                _ => return false,
            }
        }

        if let Some(stations) = &self.stations {
            if !stations.contains(&reading.station) {
                return false;
            }
        }

        if let Some((min, max)) = self.pm25_range {
            match reading.pm25 {
                Some(value) if value >= min && value <= max => {}
                _ => return false,
            }
        }

        if let Some((min, max)) = self.pm10_range {
            match reading.pm10 {
                Some(value) if value >= min && value <= max => {}
                _ => return false,
            }
        }

        true
    }

    /// Derived view: the matching rows, copied out of the base table.
    pub fn apply(&self, readings: &[Reading]) -> Vec<Reading> {
        readings
            .iter()
            .filter(|reading| self.matches(reading))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    fn reading(station: &str, ymd: (i32, u32, u32), pm25: Option<f64>, pm10: Option<f64>) -> Reading {
        let mut r = Reading {
            station: station.to_string(),
            year: Some(ymd.0),
            month: Some(ymd.1),
            day: Some(ymd.2),
            hour: Some(0),
            pm25,
            pm10,
            ..Default::default()
        };
        r.derive_timestamp();
        r
    }

    fn sample() -> Vec<Reading> {
        vec![
            reading("Dongsi", (2020, 1, 10), Some(10.0), Some(20.0)),
            reading("Dongsi", (2020, 3, 10), Some(80.0), Some(90.0)),
            reading("Tiantan", (2020, 1, 15), Some(30.0), None),
            reading("Tiantan", (2021, 6, 1), None, Some(55.0)),
        ]
    }

    #[test]
    fn test_date_filter() {
        let readings = sample();
        let filter = FilterSet::default().with_date_range(
            NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2020, 1, 31).unwrap(),
        );

        let result = filter.apply(&readings);
        assert_eq!(result.len(), 2);
        assert!(result.iter().all(|r| r.date().unwrap().month() == 1));
    }

    #[test]
    fn test_station_filter() {
        let readings = sample();
        let filter = FilterSet::default().with_stations(["Tiantan"]);

        let result = filter.apply(&readings);
        assert_eq!(result.len(), 2);
        assert!(result.iter().all(|r| r.station == "Tiantan"));
    }

    #[test]
    fn test_range_filter_excludes_missing() {
        let readings = sample();
        let filter = FilterSet::default().with_pm25_range(0.0, 100.0);

        // The Tiantan 2021 row has no PM2.5 and must not pass.
        let result = filter.apply(&readings);
        assert_eq!(result.len(), 3);
        assert!(result.iter().all(|r| r.pm25.is_some()));
    }

    #[test]
    fn test_filter_never_mutates_base() {
        let readings = sample();
        let filter = FilterSet::default().with_pm25_range(0.0, 20.0);

        let _ = filter.apply(&readings);
        assert_eq!(readings.len(), 4);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let readings = sample();
        let filter = FilterSet::default()
            .with_stations(["Dongsi"])
            .with_pm25_range(0.0, 50.0);

        let once = filter.apply(&readings);
        let twice = filter.apply(&once);

        assert_eq!(once.len(), twice.len());
        for (a, b) in once.iter().zip(twice.iter()) {
            assert_eq!(a.station, b.station);
            assert_eq!(a.timestamp, b.timestamp);
            assert_eq!(a.pm25, b.pm25);
        }
    }

    #[test]
    fn test_independent_predicates_commute() {
        let readings = sample();
        let date_only = FilterSet::default().with_date_range(
            NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2020, 12, 31).unwrap(),
        );
        let station_only = FilterSet::default().with_stations(["Dongsi"]);

        let date_then_station = station_only.apply(&date_only.apply(&readings));
        let station_then_date = date_only.apply(&station_only.apply(&readings));

        assert_eq!(date_then_station.len(), station_then_date.len());
        for (a, b) in date_then_station.iter().zip(station_then_date.iter()) {
            assert_eq!(a.station, b.station);
            assert_eq!(a.timestamp, b.timestamp);
        }
    }

    #[test]
    fn test_empty_filter_passes_everything() {
        let readings = sample();
        let filter = FilterSet::default();
        assert!(filter.is_empty());
        assert_eq!(filter.apply(&readings).len(), readings.len());
    }
}
