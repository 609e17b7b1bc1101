use serde::{Deserialize, Deserializer};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::warn;

use crate::error::Result;
use crate::models::Reading;
use crate::utils::constants::{CALENDAR_COLUMNS, MISSING_VALUE_TOKEN};

/// Deserialize a numeric cell that may hold `NA` or be empty.
fn de_opt_number<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(token) if token == MISSING_VALUE_TOKEN => Ok(None),
        Some(value) => value.parse::<T>().map(Some).map_err(serde::de::Error::custom),
    }
}

/// One CSV row as it appears on disk. Every field is optional so files with
/// a reduced header still load.
#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(default)]
    station: Option<String>,
    #[serde(default, deserialize_with = "de_opt_number")]
    year: Option<i32>,
    #[serde(default, deserialize_with = "de_opt_number")]
    month: Option<u32>,
    #[serde(default, deserialize_with = "de_opt_number")]
    day: Option<u32>,
    #[serde(default, deserialize_with = "de_opt_number")]
    hour: Option<u32>,
    #[serde(rename = "PM2.5", default, deserialize_with = "de_opt_number")]
    pm25: Option<f64>,
    #[serde(rename = "PM10", default, deserialize_with = "de_opt_number")]
    pm10: Option<f64>,
    #[serde(rename = "SO2", default, deserialize_with = "de_opt_number")]
    so2: Option<f64>,
    #[serde(rename = "NO2", default, deserialize_with = "de_opt_number")]
    no2: Option<f64>,
    #[serde(rename = "CO", default, deserialize_with = "de_opt_number")]
    co: Option<f64>,
    #[serde(rename = "O3", default, deserialize_with = "de_opt_number")]
    o3: Option<f64>,
    #[serde(rename = "TEMP", default, deserialize_with = "de_opt_number")]
    temperature: Option<f64>,
    #[serde(rename = "PRES", default, deserialize_with = "de_opt_number")]
    pressure: Option<f64>,
    #[serde(rename = "DEWP", default, deserialize_with = "de_opt_number")]
    dew_point: Option<f64>,
    #[serde(rename = "RAIN", default, deserialize_with = "de_opt_number")]
    rain: Option<f64>,
    #[serde(rename = "WSPM", default, deserialize_with = "de_opt_number")]
    wind_speed: Option<f64>,
}

/// Result of parsing one file.
#[derive(Debug)]
pub struct FileReadings {
    pub path: PathBuf,
    pub readings: Vec<Reading>,
    pub has_calendar_columns: bool,
}

pub struct CsvReadingReader;

impl CsvReadingReader {
    pub fn new() -> Self {
        Self
    }

    /// Read every reading row from one delimited file.
    ///
    /// When the header carries all four calendar columns, each row's
    /// timestamp is derived; otherwise a warning is logged once and the rows
    /// load without timestamps (time-based panels will skip later).
    pub fn read_readings(&self, path: &Path) -> Result<FileReadings> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(path)?;

        let headers = reader.headers()?.clone();
        let has_calendar_columns = CALENDAR_COLUMNS
            .iter()
            .all(|column| headers.iter().any(|h| h == *column));
        if !has_calendar_columns {
            warn!(
                file = %path.display(),
                "calendar columns (year/month/day/hour) missing; timestamps unavailable for this file"
            );
        }

        let mut readings = Vec::new();
        for row in reader.deserialize::<RawRow>() {
            let raw = row?;
            let mut reading = Reading {
                station: raw.station.unwrap_or_default(),
                year: raw.year,
                month: raw.month,
                day: raw.day,
                hour: raw.hour,
                timestamp: None,
                pm25: raw.pm25,
                pm10: raw.pm10,
                so2: raw.so2,
                no2: raw.no2,
                co: raw.co,
                o3: raw.o3,
                temperature: raw.temperature,
                pressure: raw.pressure,
                dew_point: raw.dew_point,
                rain: raw.rain,
                wind_speed: raw.wind_speed,
            };
            if has_calendar_columns {
                reading.derive_timestamp();
            }
            readings.push(reading);
        }

        Ok(FileReadings {
            path: path.to_path_buf(),
            readings,
            has_calendar_columns,
        })
    }
}

impl Default for CsvReadingReader {
    fn default() -> Self {
        Self::new()
    }
}
