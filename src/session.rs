use chrono::NaiveDate;

use crate::models::Reading;

/// Row count contributed by one source file.
#[derive(Debug, Clone)]
pub struct FileCount {
    pub file: String,
    pub rows: usize,
}

/// The loaded base table.
///
/// Immutable once built: filters and charts derive views from it, they never
/// write back. Replaced wholesale through [`DashboardSession::reload`].
#[derive(Debug, Clone)]
pub struct Dataset {
    readings: Vec<Reading>,
    file_counts: Vec<FileCount>,
    has_timestamps: bool,
}

impl Dataset {
    pub fn new(readings: Vec<Reading>, file_counts: Vec<FileCount>) -> Self {
        let has_timestamps = readings.iter().any(|r| r.timestamp.is_some());
        Self {
            readings,
            file_counts,
            has_timestamps,
        }
    }

    pub fn readings(&self) -> &[Reading] {
        &self.readings
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    pub fn file_counts(&self) -> &[FileCount] {
        &self.file_counts
    }

    pub fn has_timestamps(&self) -> bool {
        self.has_timestamps
    }

    /// Distinct station names, sorted.
    pub fn stations(&self) -> Vec<String> {
        let mut stations: Vec<String> = self
            .readings
            .iter()
            .filter(|r| !r.station.is_empty())
            .map(|r| r.station.clone())
            .collect();
        stations.sort();
        stations.dedup();
        stations
    }

    /// Earliest and latest observation dates, when timestamps exist.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let mut dates = self.readings.iter().filter_map(|r| r.date());
        let first = dates.next()?;
        let (min, max) = dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d)));
        Some((min, max))
    }
}

/// Session-scoped dashboard state: the current base table.
///
/// Each render call receives the dataset explicitly; `reload` swaps the
/// table wholesale (there is no partial or incremental reload).
#[derive(Debug)]
pub struct DashboardSession {
    dataset: Dataset,
}

impl DashboardSession {
    pub fn new(dataset: Dataset) -> Self {
        Self { dataset }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn reload(&mut self, dataset: Dataset) {
        self.dataset = dataset;
    }
}
