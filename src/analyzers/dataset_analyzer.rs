use chrono::NaiveDate;

use crate::models::Column;
use crate::session::Dataset;

#[derive(Debug)]
pub struct DatasetSummary {
    pub total_rows: usize,
    pub source_files: usize,
    pub stations: Vec<String>,
    pub date_range: Option<(NaiveDate, NaiveDate)>,
    pub columns: Vec<ColumnSummary>,
}

#[derive(Debug)]
pub struct ColumnSummary {
    pub column: Column,
    pub present: usize,
    pub missing: usize,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
}

impl ColumnSummary {
    pub fn missing_percentage(&self) -> f64 {
        let total = self.present + self.missing;
        if total == 0 {
            0.0
        } else {
            (self.missing as f64 / total as f64) * 100.0
        }
    }
}

pub struct DatasetAnalyzer;

impl DatasetAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze(&self, dataset: &Dataset) -> DatasetSummary {
        let readings = dataset.readings();

        let columns = Column::ALL
            .iter()
            .map(|&column| {
                let mut present = 0;
                let mut missing = 0;
                let mut min = f64::INFINITY;
                let mut max = f64::NEG_INFINITY;
                let mut sum = 0.0;

                for reading in readings {
                    match column.value(reading) {
                        Some(value) => {
                            present += 1;
                            min = min.min(value);
                            max = max.max(value);
                            sum += value;
                        }
                        None => missing += 1,
                    }
                }

                ColumnSummary {
                    column,
                    present,
                    missing,
                    min: (present > 0).then_some(min),
                    max: (present > 0).then_some(max),
                    mean: (present > 0).then(|| sum / present as f64),
                }
            })
            .collect();

        DatasetSummary {
            total_rows: readings.len(),
            source_files: dataset.file_counts().len(),
            stations: dataset.stations(),
            date_range: dataset.date_range(),
            columns,
        }
    }
}

impl Default for DatasetAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl DatasetSummary {
    pub fn summary(&self) -> String {
        let date_range = match self.date_range {
            Some((start, end)) => format!("{} to {}", start, end),
            None => "no timestamps".to_string(),
        };

        let mut lines = vec![
            format!("Readings: {} rows from {} files", self.total_rows, self.source_files),
            format!("Stations: {}", self.stations.len()),
            format!("Date Range: {}", date_range),
            String::new(),
            format!(
                "{:<8} {:>10} {:>10} {:>10} {:>9}",
                "Column", "Min", "Mean", "Max", "Missing"
            ),
        ];

        for column in &self.columns {
            let fmt = |v: Option<f64>| match v {
                Some(v) => format!("{:.1}", v),
                None => "-".to_string(),
            };
            lines.push(format!(
                "{:<8} {:>10} {:>10} {:>10} {:>8.1}%",
                column.column.as_str(),
                fmt(column.min),
                fmt(column.mean),
                fmt(column.max),
                column.missing_percentage()
            ));
        }

        lines.join("\n")
    }
}
