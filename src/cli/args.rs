use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "airq-dashboard")]
#[command(about = "Interactive air-quality data explorer")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Dashboard configuration file (TOML)")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load a directory of reading CSVs, apply filters, and render every
    /// selected panel as JSON
    Render {
        #[arg(short, long, help = "Directory containing reading CSV files")]
        data_dir: PathBuf,

        #[arg(long, help = "Inclusive start date (YYYY-MM-DD)")]
        start_date: Option<NaiveDate>,

        #[arg(long, help = "Inclusive end date (YYYY-MM-DD)")]
        end_date: Option<NaiveDate>,

        #[arg(
            long,
            value_delimiter = ',',
            help = "Stations to keep (comma separated) [default: all]"
        )]
        stations: Vec<String>,

        #[arg(long, help = "Lower bound on PM2.5")]
        pm25_min: Option<f64>,

        #[arg(long, help = "Upper bound on PM2.5")]
        pm25_max: Option<f64>,

        #[arg(long, help = "Lower bound on PM10")]
        pm10_min: Option<f64>,

        #[arg(long, help = "Upper bound on PM10")]
        pm10_max: Option<f64>,

        #[arg(long, default_value = "PM2.5", help = "Column for the histogram")]
        histogram_column: String,

        #[arg(long, default_value = "PM2.5", help = "Column for the time series")]
        timeseries_column: String,

        #[arg(long, default_value = "PM2.5", help = "Scatter plot X axis column")]
        scatter_x: String,

        #[arg(long, default_value = "PM10", help = "Scatter plot Y axis column")]
        scatter_y: String,

        #[arg(long, default_value = "PM2.5", help = "Column for the per-station bar chart")]
        bar_column: String,

        #[arg(
            long,
            default_value = "mean",
            help = "Bar chart aggregator: mean or median"
        )]
        aggregator: String,

        #[arg(long, default_value = "PM2.5", help = "Column for the yearly trend panel")]
        trend_column: String,

        #[arg(
            long,
            value_delimiter = ',',
            help = "Columns for the correlation heatmap [default: all numeric]"
        )]
        heatmap_columns: Vec<String>,

        #[arg(
            long,
            value_delimiter = ',',
            default_value = "PM2.5,PM10",
            help = "Pollutants for the geographic layer"
        )]
        map_pollutants: Vec<String>,

        #[arg(long, help = "Histogram bin count [default: from configuration]")]
        bins: Option<usize>,

        #[arg(short, long, help = "Write panel JSON to this file instead of stdout")]
        output: Option<PathBuf>,

        #[arg(long, default_value_t = num_cpus::get())]
        max_workers: usize,
    },

    /// Load a directory and print summary statistics without rendering panels
    Summary {
        #[arg(short, long, help = "Directory containing reading CSV files")]
        data_dir: PathBuf,

        #[arg(long, default_value_t = num_cpus::get())]
        max_workers: usize,
    },

    /// Print the validated station coordinate registry
    Stations,
}
