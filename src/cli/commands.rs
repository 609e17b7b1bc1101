use tracing_subscriber::EnvFilter;

use crate::charts::Aggregator;
use crate::cli::args::{Cli, Commands};
use crate::config::DashboardConfig;
use crate::error::{DashboardError, Result};
use crate::filters::FilterSet;
use crate::models::Column;
use crate::readers::DirectoryLoader;
use crate::render::{render_dashboard, ChartSelection};
use crate::session::DashboardSession;
use crate::utils::progress::ProgressReporter;
use crate::writers::PanelWriter;

pub async fn run(cli: Cli) -> Result<()> {
    init_logging(cli.verbose);

    let config = DashboardConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Render {
            data_dir,
            start_date,
            end_date,
            stations,
            pm25_min,
            pm25_max,
            pm10_min,
            pm10_max,
            histogram_column,
            timeseries_column,
            scatter_x,
            scatter_y,
            bar_column,
            aggregator,
            trend_column,
            heatmap_columns,
            map_pollutants,
            bins,
            output,
            max_workers,
        } => {
            let filters = build_filters(
                start_date, end_date, stations, pm25_min, pm25_max, pm10_min, pm10_max,
            )?;
            let selection = build_selection(
                &config,
                &histogram_column,
                &timeseries_column,
                &scatter_x,
                &scatter_y,
                &bar_column,
                &aggregator,
                &trend_column,
                &heatmap_columns,
                &map_pollutants,
                bins,
            )?;

            let progress = ProgressReporter::new_spinner("Loading data...", false);
            let loader = DirectoryLoader::new(max_workers);
            let dataset = loader.load_directory(&data_dir, Some(&progress)).await?;
            progress.finish_with_message(&format!(
                "Loaded {} readings from {} files",
                dataset.len(),
                dataset.file_counts().len()
            ));

            let session = DashboardSession::new(dataset);
            let panels = render_dashboard(session.dataset(), &filters, &selection, &config);

            println!(
                "Rendered {} of {} requested panels ({} of {} rows after filtering)",
                panels.rendered_count(),
                panels.requested_count(),
                panels.filtered_rows,
                panels.total_rows
            );

            let writer = PanelWriter::new();
            match output {
                Some(path) => {
                    writer.write_to_file(&panels, &path)?;
                    println!("Panel data written to {}", path.display());
                }
                None => println!("{}", writer.to_json_string(&panels)?),
            }
        }

        Commands::Summary {
            data_dir,
            max_workers,
        } => {
            let progress = ProgressReporter::new_spinner("Loading data...", false);
            let loader = DirectoryLoader::new(max_workers);
            let dataset = loader.load_directory(&data_dir, Some(&progress)).await?;
            progress.finish_with_message("Load complete");

            let analyzer = crate::analyzers::DatasetAnalyzer::new();
            let summary = analyzer.analyze(&dataset);
            println!("\n{}", summary.summary());
        }

        Commands::Stations => {
            println!("{} registered stations:", config.stations.len());
            for site in config.stations.iter() {
                println!(
                    "  {:<16} {:>9.4}  {:>10.4}",
                    site.name, site.latitude, site.longitude
                );
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

#[allow(clippy::too_many_arguments)]
fn build_filters(
    start_date: Option<chrono::NaiveDate>,
    end_date: Option<chrono::NaiveDate>,
    stations: Vec<String>,
    pm25_min: Option<f64>,
    pm25_max: Option<f64>,
    pm10_min: Option<f64>,
    pm10_max: Option<f64>,
) -> Result<FilterSet> {
    let mut filters = FilterSet::default();

    match (start_date, end_date) {
        (Some(start), Some(end)) => {
            if end < start {
                return Err(DashboardError::InvalidFormat(format!(
                    "end date {} precedes start date {}",
                    end, start
                )));
            }
            filters = filters.with_date_range(start, end);
        }
        (None, None) => {}
        _ => {
            return Err(DashboardError::InvalidFormat(
                "date filtering needs both --start-date and --end-date".to_string(),
            ));
        }
    }

    if !stations.is_empty() {
        filters = filters.with_stations(stations);
    }

    if pm25_min.is_some() || pm25_max.is_some() {
        filters = filters.with_pm25_range(
            pm25_min.unwrap_or(f64::NEG_INFINITY),
            pm25_max.unwrap_or(f64::INFINITY),
        );
    }

    if pm10_min.is_some() || pm10_max.is_some() {
        filters = filters.with_pm10_range(
            pm10_min.unwrap_or(f64::NEG_INFINITY),
            pm10_max.unwrap_or(f64::INFINITY),
        );
    }

    Ok(filters)
}

#[allow(clippy::too_many_arguments)]
fn build_selection(
    config: &DashboardConfig,
    histogram_column: &str,
    timeseries_column: &str,
    scatter_x: &str,
    scatter_y: &str,
    bar_column: &str,
    aggregator: &str,
    trend_column: &str,
    heatmap_columns: &[String],
    map_pollutants: &[String],
    bins: Option<usize>,
) -> Result<ChartSelection> {
    let heatmap = if heatmap_columns.is_empty() {
        Column::ALL.to_vec()
    } else {
        heatmap_columns
            .iter()
            .map(|c| c.parse())
            .collect::<Result<Vec<Column>>>()?
    };

    let pollutants = map_pollutants
        .iter()
        .map(|c| c.parse())
        .collect::<Result<Vec<Column>>>()?;
    for pollutant in &pollutants {
        if !pollutant.is_pollutant() {
            return Err(DashboardError::Config(format!(
                "'{}' is not a pollutant and cannot drive the map layer",
                pollutant
            )));
        }
    }

    Ok(ChartSelection {
        histogram: Some(histogram_column.parse()?),
        time_series: Some(timeseries_column.parse()?),
        scatter: Some((scatter_x.parse()?, scatter_y.parse()?)),
        station_bar: Some((bar_column.parse()?, aggregator.parse::<Aggregator>()?)),
        trend: Some(trend_column.parse()?),
        heatmap_columns: heatmap,
        map_pollutants: pollutants,
        histogram_bins: bins.unwrap_or(config.histogram_bins),
    })
}
