pub mod bar;
pub mod geo;
pub mod heatmap;
pub mod histogram;
pub mod outcome;
pub mod scatter;
pub mod time_series;
pub mod trend_panel;

pub use bar::{station_bar, Aggregator, StationBar, StationBarFigure};
pub use geo::{geo_layer, GeoFigure, HeatPoint, MapMarker, PollutantLayer, UnlocatedStation};
pub use heatmap::{correlation_heatmap, CorrelationHeatmapFigure};
pub use histogram::{histogram, HistogramFigure};
pub use outcome::ChartOutcome;
pub use scatter::{scatter, ScatterFigure, ScatterPoint};
pub use time_series::{time_series, TimeSeriesFigure, TimeSeriesPoint};
pub use trend_panel::{trend_panel, TrendFigure};
