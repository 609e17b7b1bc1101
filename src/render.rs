use serde::Serialize;

use crate::charts::{
    correlation_heatmap, geo_layer, histogram, scatter, station_bar, time_series, trend_panel,
    Aggregator, ChartOutcome, CorrelationHeatmapFigure, GeoFigure, HistogramFigure, ScatterFigure,
    StationBarFigure, TimeSeriesFigure, TrendFigure,
};
use crate::config::DashboardConfig;
use crate::filters::FilterSet;
use crate::models::Column;
use crate::session::Dataset;
use crate::utils::constants::DEFAULT_HISTOGRAM_BINS;

/// Column choices per panel. A `None` selection means the panel is not
/// requested and is omitted from the output entirely (distinct from a
/// requested panel that had to be skipped).
#[derive(Debug, Clone)]
pub struct ChartSelection {
    pub histogram: Option<Column>,
    pub time_series: Option<Column>,
    pub scatter: Option<(Column, Column)>,
    pub station_bar: Option<(Column, Aggregator)>,
    pub trend: Option<Column>,
    pub heatmap_columns: Vec<Column>,
    pub map_pollutants: Vec<Column>,
    pub histogram_bins: usize,
}

impl Default for ChartSelection {
    fn default() -> Self {
        Self {
            histogram: None,
            time_series: None,
            scatter: None,
            station_bar: None,
            trend: None,
            heatmap_columns: Vec::new(),
            map_pollutants: Vec::new(),
            histogram_bins: DEFAULT_HISTOGRAM_BINS,
        }
    }
}

/// One full dashboard render: every requested panel, built from the same
/// filtered view.
#[derive(Debug, Serialize)]
pub struct DashboardPanels {
    pub total_rows: usize,
    pub filtered_rows: usize,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub histogram: Option<ChartOutcome<HistogramFigure>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_series: Option<ChartOutcome<TimeSeriesFigure>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scatter: Option<ChartOutcome<ScatterFigure>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub station_bar: Option<ChartOutcome<StationBarFigure>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlation: Option<ChartOutcome<CorrelationHeatmapFigure>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trend: Option<ChartOutcome<TrendFigure>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub map: Option<ChartOutcome<GeoFigure>>,
}

impl DashboardPanels {
    fn outcomes(&self) -> Vec<bool> {
        let mut rendered = Vec::new();
        if let Some(o) = &self.histogram {
            rendered.push(o.is_rendered());
        }
        if let Some(o) = &self.time_series {
            rendered.push(o.is_rendered());
        }
        if let Some(o) = &self.scatter {
            rendered.push(o.is_rendered());
        }
        if let Some(o) = &self.station_bar {
            rendered.push(o.is_rendered());
        }
        if let Some(o) = &self.correlation {
            rendered.push(o.is_rendered());
        }
        if let Some(o) = &self.trend {
            rendered.push(o.is_rendered());
        }
        if let Some(o) = &self.map {
            rendered.push(o.is_rendered());
        }
        rendered
    }

    pub fn requested_count(&self) -> usize {
        self.outcomes().len()
    }

    pub fn rendered_count(&self) -> usize {
        self.outcomes().into_iter().filter(|r| *r).count()
    }
}

/// Apply the filter once and rebuild every requested panel from the result.
///
/// Each call recomputes from scratch; a newer interaction simply supersedes
/// the previous render.
pub fn render_dashboard(
    dataset: &Dataset,
    filters: &FilterSet,
    selection: &ChartSelection,
    config: &DashboardConfig,
) -> DashboardPanels {
    let filtered = filters.apply(dataset.readings());

    DashboardPanels {
        total_rows: dataset.len(),
        filtered_rows: filtered.len(),
        histogram: selection
            .histogram
            .map(|column| histogram(&filtered, column, selection.histogram_bins)),
        time_series: selection
            .time_series
            .map(|column| time_series(&filtered, column)),
        scatter: selection
            .scatter
            .map(|(x, y)| scatter(&filtered, x, y)),
        station_bar: selection
            .station_bar
            .map(|(column, aggregator)| station_bar(&filtered, column, aggregator)),
        correlation: (!selection.heatmap_columns.is_empty())
            .then(|| correlation_heatmap(&filtered, &selection.heatmap_columns)),
        trend: selection.trend.map(|column| trend_panel(&filtered, column)),
        map: (!selection.map_pollutants.is_empty())
            .then(|| geo_layer(&filtered, &selection.map_pollutants, config)),
    }
}
