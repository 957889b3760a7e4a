//! Command implementation for the coldata CLI
//!
//! A run loads the input file, resolves the requested row window, optionally
//! narrows it to detected cycles, applies the calculations and reports.

use crate::calc::Calculation;
use crate::cli::args::Args;
use crate::cycles::{CycleStats, find_cycles};
use crate::dataset::Dataset;
use crate::error::{ColDataError, Result};
use crate::loader::TableLoader;
use crate::models::{CycleResult, RealColumn, RowRange};
use crate::output::{
    DatasetSummary, Report, ResultTable, print_cycles, print_window, write_dataset,
};
use crate::range::timestep_window;
use anyhow::Context;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use tracing::{debug, info};

/// Cycle window detected on one column
struct CycleWindow {
    column: String,
    result: CycleResult,
    stats: CycleStats,
}

/// Set up structured logging on stderr
pub fn setup_logging(args: &Args) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("coldata={}", log_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_timer(fmt::time::uptime())
                .with_writer(std::io::stderr),
        )
        .try_init()
        .map_err(|e| ColDataError::configuration(format!("Logging setup failed: {}", e)))?;

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Main entry point for a CLI run
pub fn run(args: Args) -> anyhow::Result<()> {
    setup_logging(&args)?;
    args.validate()?;

    let config = args.config();
    config.validate()?;

    let loader = TableLoader::new(&config)?;
    let dataset = loader
        .load(&args.input)
        .with_context(|| format!("Failed to load {}", args.input.display()))?;

    let mut range = args.range_request().resolve(&dataset)?;
    let columns = select_columns(&dataset, &args)?;

    let cycles = match args.cycle_mode() {
        Some(mode) => {
            let column = cycle_column(&dataset, &args, &columns)?;
            let center = args.center.unwrap_or_else(|| {
                Calculation::Mean
                    .apply(column.slice(range))
                    .unwrap_or_default()
            });
            info!("Detecting cycles in '{}' about {}", column.name, center);

            let result = find_cycles(column, range, center, mode)?;
            range = result.window();
            Some(CycleWindow {
                column: column.name.clone(),
                stats: CycleStats::from_result(column, &result),
                result,
            })
        }
        None => None,
    };

    let timesteps = timestep_window(&dataset, range);
    let results = (!args.functions.is_empty())
        .then(|| ResultTable::compute(&columns, &args.functions, range));

    if let Some(table) = &results {
        for path in &args.outputs {
            table
                .append_to_file(path, &config.output_delimiter, config.precision)
                .with_context(|| format!("Failed to write results to {}", path.display()))?;
        }
    }

    if let Some(path) = &args.write_data {
        let mut writer = BufWriter::new(File::create(path)?);
        write_dataset(&dataset, &mut writer, &config.output_delimiter, config.precision)?;
        writer.flush()?;
        info!("Wrote data to {}", path.display());
    }

    let summary = DatasetSummary::from_dataset(&dataset);
    if args.json {
        let report = Report {
            summary,
            range,
            timesteps,
            cycles: cycles.as_ref().map(|window| window.result.clone()),
            cycle_stats: cycles.as_ref().map(|window| window.stats.clone()),
            results,
        };
        println!("{}", report.to_json()?);
    } else {
        report_human(
            &summary,
            cycles.as_ref(),
            results.as_ref(),
            range,
            timesteps,
            config.precision,
        );
    }

    if args.print_data {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        write_dataset(&dataset, &mut handle, &config.output_delimiter, config.precision)?;
    }

    Ok(())
}

fn report_human(
    summary: &DatasetSummary,
    cycles: Option<&CycleWindow>,
    results: Option<&ResultTable>,
    range: RowRange,
    timesteps: Option<(i64, i64)>,
    precision: usize,
) {
    summary.print();
    if let Some(window) = cycles {
        print_cycles(&window.column, &window.result, &window.stats, precision);
    }
    print_window(range, timesteps);
    match results {
        Some(table) => table.print(precision),
        None => debug!("No calculations requested for rows {}", range),
    }
}

/// Columns the calculations apply to
fn select_columns<'a>(dataset: &'a Dataset, args: &Args) -> Result<Vec<&'a RealColumn>> {
    if args.columns.is_empty() {
        return Ok(dataset.real_columns().iter().collect());
    }
    args.columns
        .iter()
        .map(|selector| dataset.real_column(selector))
        .collect()
}

/// Column scanned for cycles: the explicit choice, else the first selected
fn cycle_column<'a>(
    dataset: &'a Dataset,
    args: &Args,
    columns: &[&'a RealColumn],
) -> Result<&'a RealColumn> {
    match &args.cycle_column {
        Some(selector) => dataset.real_column(selector),
        None => columns
            .first()
            .copied()
            .ok_or_else(|| ColDataError::configuration("No real column available for cycle detection")),
    }
}
