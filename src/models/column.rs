use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DashboardError;
use crate::models::Reading;

/// A numeric measurement column of the reading table.
///
/// Variants map 1:1 onto the CSV header names of the source data
/// (`PM2.5`, `PM10`, ..., `WSPM`); `as_str` returns the header spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Column {
    #[serde(rename = "PM2.5")]
    Pm25,
    #[serde(rename = "PM10")]
    Pm10,
    #[serde(rename = "SO2")]
    So2,
    #[serde(rename = "NO2")]
    No2,
    #[serde(rename = "CO")]
    Co,
    #[serde(rename = "O3")]
    O3,
    #[serde(rename = "TEMP")]
    Temperature,
    #[serde(rename = "PRES")]
    Pressure,
    #[serde(rename = "DEWP")]
    DewPoint,
    #[serde(rename = "RAIN")]
    Rain,
    #[serde(rename = "WSPM")]
    WindSpeed,
}

impl Column {
    /// Every numeric column, in source header order.
    pub const ALL: [Column; 11] = [
        Column::Pm25,
        Column::Pm10,
        Column::So2,
        Column::No2,
        Column::Co,
        Column::O3,
        Column::Temperature,
        Column::Pressure,
        Column::DewPoint,
        Column::Rain,
        Column::WindSpeed,
    ];

    /// The six airborne-concentration columns.
    pub const POLLUTANTS: [Column; 6] = [
        Column::Pm25,
        Column::Pm10,
        Column::So2,
        Column::No2,
        Column::Co,
        Column::O3,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Column::Pm25 => "PM2.5",
            Column::Pm10 => "PM10",
            Column::So2 => "SO2",
            Column::No2 => "NO2",
            Column::Co => "CO",
            Column::O3 => "O3",
            Column::Temperature => "TEMP",
            Column::Pressure => "PRES",
            Column::DewPoint => "DEWP",
            Column::Rain => "RAIN",
            Column::WindSpeed => "WSPM",
        }
    }

    pub fn is_pollutant(&self) -> bool {
        Column::POLLUTANTS.contains(self)
    }

    /// Extract this column's value from a reading. Missing stays missing.
    pub fn value(&self, reading: &Reading) -> Option<f64> {
        match self {
            Column::Pm25 => reading.pm25,
            Column::Pm10 => reading.pm10,
            Column::So2 => reading.so2,
            Column::No2 => reading.no2,
            Column::Co => reading.co,
            Column::O3 => reading.o3,
            Column::Temperature => reading.temperature,
            Column::Pressure => reading.pressure,
            Column::DewPoint => reading.dew_point,
            Column::Rain => reading.rain,
            Column::WindSpeed => reading.wind_speed,
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Column {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "PM2.5" | "PM25" => Ok(Column::Pm25),
            "PM10" => Ok(Column::Pm10),
            "SO2" => Ok(Column::So2),
            "NO2" => Ok(Column::No2),
            "CO" => Ok(Column::Co),
            "O3" => Ok(Column::O3),
            "TEMP" | "TEMPERATURE" => Ok(Column::Temperature),
            "PRES" | "PRESSURE" => Ok(Column::Pressure),
            "DEWP" | "DEWPOINT" => Ok(Column::DewPoint),
            "RAIN" => Ok(Column::Rain),
            "WSPM" | "WIND" => Ok(Column::WindSpeed),
            _ => Err(DashboardError::UnknownColumn {
                column: s.to_string(),
            }),
        }
    }
}
