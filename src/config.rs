use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use crate::error::{DashboardError, Result};
use crate::models::{Column, StationRegistry, StationSite};
use crate::utils::coordinates::parse_coordinate;

/// Built-in defaults: the fixed twelve-station registry and the per-pollutant
/// marker scale/color constants of the source dashboard. A user-supplied TOML
/// file overrides these wholesale per key.
const DEFAULT_CONFIG: &str = r##"
histogram_bins = 30
base_marker_radius = 4.0

[[stations]]
name = "Aotizhongxin"
latitude = 39.982
longitude = 116.397

[[stations]]
name = "Changping"
latitude = 40.217
longitude = 116.230

[[stations]]
name = "Dingling"
latitude = 40.292
longitude = 116.220

[[stations]]
name = "Dongsi"
latitude = 39.929
longitude = 116.417

[[stations]]
name = "Guanyuan"
latitude = 39.929
longitude = 116.339

[[stations]]
name = "Gucheng"
latitude = 39.911
longitude = 116.184

[[stations]]
name = "Huairou"
latitude = 40.328
longitude = 116.628

[[stations]]
name = "Nongzhanguan"
latitude = 39.937
longitude = 116.461

[[stations]]
name = "Shunyi"
latitude = 40.127
longitude = 116.655

[[stations]]
name = "Tiantan"
latitude = 39.886
longitude = 116.407

[[stations]]
name = "Wanliu"
latitude = 39.987
longitude = 116.287

[[stations]]
name = "Wanshouxigong"
latitude = 39.878
longitude = 116.352

[[pollutants]]
column = "PM2.5"
scale = 0.15
color = "#d62728"

[[pollutants]]
column = "PM10"
scale = 0.1
color = "#ff7f0e"

[[pollutants]]
column = "SO2"
scale = 0.5
color = "#2ca02c"

[[pollutants]]
column = "NO2"
scale = 0.4
color = "#1f77b4"

[[pollutants]]
column = "CO"
scale = 0.005
color = "#9467bd"

[[pollutants]]
column = "O3"
scale = 0.3
color = "#8c564b"
"##;

/// A coordinate in the config file: decimal degrees or a DMS string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum RawCoordinate {
    Decimal(f64),
    Text(String),
}

impl RawCoordinate {
    fn to_decimal(&self) -> Result<f64> {
        match self {
            RawCoordinate::Decimal(value) => Ok(*value),
            RawCoordinate::Text(text) => parse_coordinate(text),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct RawStationEntry {
    name: String,
    latitude: RawCoordinate,
    longitude: RawCoordinate,
}

#[derive(Debug, Clone, Deserialize)]
struct RawPollutantStyle {
    column: String,
    scale: f64,
    color: String,
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    histogram_bins: usize,
    base_marker_radius: f64,
    stations: Vec<RawStationEntry>,
    pollutants: Vec<RawPollutantStyle>,
}

/// Marker sizing and coloring for one pollutant.
#[derive(Debug, Clone)]
pub struct PollutantStyle {
    pub scale: f64,
    pub color: String,
}

/// Validated dashboard configuration.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub histogram_bins: usize,
    pub base_marker_radius: f64,
    pub stations: StationRegistry,
    pollutant_styles: HashMap<Column, PollutantStyle>,
}

impl DashboardConfig {
    /// Load defaults, optionally layered under a TOML file.
    ///
    /// Every station site is validated here; a bad coordinate or an unknown
    /// pollutant key fails the load instead of surfacing deep inside map
    /// rendering.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml));

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        }

        let raw: RawConfig = builder.build()?.try_deserialize()?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawConfig) -> Result<Self> {
        if raw.histogram_bins == 0 {
            return Err(DashboardError::Config(
                "histogram_bins must be at least 1".to_string(),
            ));
        }
        if raw.base_marker_radius < 0.0 {
            return Err(DashboardError::Config(
                "base_marker_radius must not be negative".to_string(),
            ));
        }

        let sites = raw
            .stations
            .into_iter()
            .map(|entry| {
                Ok(StationSite::new(
                    entry.name,
                    entry.latitude.to_decimal()?,
                    entry.longitude.to_decimal()?,
                ))
            })
            .collect::<Result<Vec<_>>>()?;
        let stations = StationRegistry::from_sites(sites)?;

        let mut pollutant_styles = HashMap::new();
        for style in raw.pollutants {
            let column: Column = style.column.parse()?;
            if !column.is_pollutant() {
                return Err(DashboardError::Config(format!(
                    "'{}' is not a pollutant column",
                    column
                )));
            }
            if style.scale <= 0.0 {
                return Err(DashboardError::Config(format!(
                    "marker scale for {} must be positive",
                    column
                )));
            }
            pollutant_styles.insert(
                column,
                PollutantStyle {
                    scale: style.scale,
                    color: style.color,
                },
            );
        }

        Ok(Self {
            histogram_bins: raw.histogram_bins,
            base_marker_radius: raw.base_marker_radius,
            stations,
            pollutant_styles,
        })
    }

    pub fn style(&self, pollutant: Column) -> Option<&PollutantStyle> {
        self.pollutant_styles.get(&pollutant)
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        // The embedded defaults are known-valid.
        Self::load(None).expect("built-in configuration must parse")
    }
}
