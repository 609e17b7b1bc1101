pub mod correlation;
pub mod dataset_analyzer;
pub mod trend;

pub use correlation::{correlation_matrix, pearson_correlation, CorrelationMatrix};
pub use dataset_analyzer::{ColumnSummary, DatasetAnalyzer, DatasetSummary};
pub use trend::{ols_slope, station_trends, yearly_means, StationTrend, YearlyMean};
