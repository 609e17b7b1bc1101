/// Calendar columns required to derive a timestamp
pub const CALENDAR_COLUMNS: [&str; 4] = ["year", "month", "day", "hour"];

/// Token the source data uses for a missing measurement
pub const MISSING_VALUE_TOKEN: &str = "NA";

/// Histogram defaults
pub const DEFAULT_HISTOGRAM_BINS: usize = 30;

/// Loader defaults
pub const CSV_EXTENSION: &str = "csv";
