use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, warn};

use crate::charts::ChartOutcome;
use crate::config::DashboardConfig;
use crate::models::{Column, Reading};

/// One sized, colored marker: a station's mean concentration of one
/// pollutant at its registered coordinate.
#[derive(Debug, Clone, Serialize)]
pub struct MapMarker {
    pub station: String,
    pub latitude: f64,
    pub longitude: f64,
    pub mean: f64,
    pub radius: f64,
    pub color: String,
}

/// Heat-intensity sample weighted by the station mean.
#[derive(Debug, Clone, Serialize)]
pub struct HeatPoint {
    pub latitude: f64,
    pub longitude: f64,
    pub weight: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PollutantLayer {
    pub pollutant: Column,
    pub markers: Vec<MapMarker>,
    pub heat_points: Vec<HeatPoint>,
}

/// A station present in the data but absent from the coordinate registry.
/// Reported explicitly instead of being dropped on the floor.
#[derive(Debug, Clone, Serialize)]
pub struct UnlocatedStation {
    pub station: String,
    pub error: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct GeoFigure {
    pub layers: Vec<PollutantLayer>,
    pub unlocated: Vec<UnlocatedStation>,
}

/// Build the geographic layer set: one layer per selected pollutant that has
/// data, with markers sized by the per-station mean.
///
/// A selected pollutant with no values in the table contributes zero layers
/// and no error. A data station the registry cannot locate is an explicit
/// per-station error in the figure; the remaining stations still render.
pub fn geo_layer(
    readings: &[Reading],
    pollutants: &[Column],
    config: &DashboardConfig,
) -> ChartOutcome<GeoFigure> {
    if readings.is_empty() {
        return ChartOutcome::skipped("no rows after filtering");
    }

    let mut layers = Vec::new();
    let mut unlocated: BTreeMap<String, String> = BTreeMap::new();

    for &pollutant in pollutants {
        let style = match config.style(pollutant) {
            Some(style) => style,
            None => {
                warn!(pollutant = %pollutant, "no marker style configured; layer skipped");
                continue;
            }
        };

        // Per-station mean of this pollutant over the filtered view.
        let mut by_station: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
        for reading in readings {
            if reading.station.is_empty() {
                continue;
            }
            if let Some(value) = pollutant.value(reading) {
                let entry = by_station.entry(reading.station.as_str()).or_insert((0.0, 0));
                entry.0 += value;
                entry.1 += 1;
            }
        }

        if by_station.is_empty() {
            debug!(pollutant = %pollutant, "pollutant absent from the table; no layer");
            continue;
        }

        let mut markers = Vec::new();
        let mut heat_points = Vec::new();
        for (station, (sum, count)) in by_station {
            let mean = sum / count as f64;
            match config.stations.get(station) {
                Ok(site) => {
                    markers.push(MapMarker {
                        station: station.to_string(),
                        latitude: site.latitude,
                        longitude: site.longitude,
                        mean,
                        radius: config.base_marker_radius + mean * style.scale,
                        color: style.color.clone(),
                    });
                    heat_points.push(HeatPoint {
                        latitude: site.latitude,
                        longitude: site.longitude,
                        weight: mean,
                    });
                }
                Err(error) => {
                    warn!(station = %station, "station missing from the coordinate registry");
                    unlocated
                        .entry(station.to_string())
                        .or_insert_with(|| error.to_string());
                }
            }
        }

        layers.push(PollutantLayer {
            pollutant,
            markers,
            heat_points,
        });
    }

    ChartOutcome::rendered(GeoFigure {
        layers,
        unlocated: unlocated
            .into_iter()
            .map(|(station, error)| UnlocatedStation { station, error })
            .collect(),
    })
}
