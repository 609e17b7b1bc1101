use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::info;

use crate::error::{DashboardError, Result};
use crate::readers::csv_reader::{CsvReadingReader, FileReadings};
use crate::session::{Dataset, FileCount};
use crate::utils::constants::CSV_EXTENSION;
use crate::utils::progress::ProgressReporter;

pub struct DirectoryLoader {
    max_workers: usize,
}

impl DirectoryLoader {
    pub fn new(max_workers: usize) -> Self {
        Self { max_workers }
    }

    /// Load every CSV file in a directory into one combined dataset.
    ///
    /// Files are parsed in parallel and concatenated in filename order, so
    /// the combined row count is the sum of the per-file counts. A missing
    /// directory or a directory without CSV files is an empty-result
    /// condition, not a crash: the caller keeps its session and may retry.
    pub async fn load_directory(
        &self,
        dir: &Path,
        progress: Option<&ProgressReporter>,
    ) -> Result<Dataset> {
        let files = Self::find_csv_files(dir)?;
        if files.is_empty() {
            return Err(DashboardError::EmptyDataset {
                dir: dir.to_path_buf(),
            });
        }

        if let Some(p) = progress {
            p.set_message(&format!("Parsing {} CSV files...", files.len()));
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.max_workers)
            .build()
            .map_err(|e| DashboardError::Config(e.to_string()))?;

        let parsed_count = Arc::new(AtomicUsize::new(0));
        let parsed: Result<Vec<FileReadings>> = pool.install(|| {
            files
                .par_iter()
                .map(|path| {
                    let reader = CsvReadingReader::new();
                    let result = reader.read_readings(path);

                    let count = parsed_count.fetch_add(1, Ordering::Relaxed) + 1;
                    if let Some(p) = progress {
                        p.update(count as u64);
                    }

                    result
                })
                .collect()
        });
        let parsed = parsed?;

        let mut readings = Vec::new();
        let mut file_counts = Vec::new();
        for file in parsed {
            let name = file
                .path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| file.path.display().to_string());
            file_counts.push(FileCount {
                file: name,
                rows: file.readings.len(),
            });
            readings.extend(file.readings);
        }

        if readings.is_empty() {
            return Err(DashboardError::EmptyDataset {
                dir: dir.to_path_buf(),
            });
        }

        info!(
            rows = readings.len(),
            files = file_counts.len(),
            "loaded reading table"
        );

        Ok(Dataset::new(readings, file_counts))
    }

    /// CSV files in the directory, sorted by filename for a stable concat
    /// order. A missing directory yields the empty list.
    fn find_csv_files(dir: &Path) -> Result<Vec<PathBuf>> {
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut files = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            let is_csv = path.is_file()
                && path
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| ext.eq_ignore_ascii_case(CSV_EXTENSION));
            if is_csv {
                files.push(path);
            }
        }

        files.sort();
        Ok(files)
    }
}

impl Default for DirectoryLoader {
    fn default() -> Self {
        Self::new(num_cpus::get())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_file(dir: &Path, name: &str, content: &str) {
        let mut file = std::fs::File::create(dir.join(name)).unwrap();
        file.write_all(content.as_bytes()).unwrap();
    }

    #[tokio::test]
    async fn test_row_count_is_sum_of_file_counts() {
        let dir = TempDir::new().unwrap();
        write_file(
            dir.path(),
            "station_a.csv",
            "year,month,day,hour,PM2.5,station\n\
             2020,1,1,0,10.0,Dongsi\n\
             2020,1,1,1,12.0,Dongsi\n",
        );
        write_file(
            dir.path(),
            "station_b.csv",
            "year,month,day,hour,PM2.5,station\n\
             2020,1,1,0,30.0,Tiantan\n",
        );
        write_file(dir.path(), "notes.txt", "not a data file\n");

        let loader = DirectoryLoader::new(2);
        let dataset = loader.load_directory(dir.path(), None).await.unwrap();

        assert_eq!(dataset.len(), 3);
        let per_file: usize = dataset.file_counts().iter().map(|f| f.rows).sum();
        assert_eq!(per_file, dataset.len());
        assert_eq!(dataset.file_counts().len(), 2);
        // Filename order is stable.
        assert_eq!(dataset.file_counts()[0].file, "station_a.csv");
    }

    #[tokio::test]
    async fn test_missing_directory_is_empty_result() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");

        let loader = DirectoryLoader::new(1);
        let err = loader.load_directory(&missing, None).await.unwrap_err();
        assert!(matches!(err, DashboardError::EmptyDataset { .. }));
    }

    #[tokio::test]
    async fn test_directory_without_csv_is_empty_result() {
        let dir = TempDir::new().unwrap();
        write_file(dir.path(), "readme.md", "nothing here\n");

        let loader = DirectoryLoader::new(1);
        let err = loader.load_directory(dir.path(), None).await.unwrap_err();
        assert!(matches!(err, DashboardError::EmptyDataset { .. }));
    }
}
