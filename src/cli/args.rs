//! Command-line argument definitions for coldata
//!
//! This module defines the CLI interface using the clap derive API. Every
//! option maps onto one stage of a run: loading, range selection, cycle
//! detection, calculations and output.

use crate::calc::Calculation;
use crate::config::Config;
use crate::constants::{DEFAULT_DELIMITER, F64_ROUND_TRIP_DIGITS, TIMESTEP_MARKER};
use crate::error::{ColDataError, Result};
use crate::models::{ColumnSelector, CycleMode};
use crate::range::RangeRequest;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the column data analyser
///
/// Loads a whitespace or delimiter separated column data file, detects its
/// header and timestep column, and reports statistics over a row window.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "coldata",
    version,
    about = "Load timestep column data and compute statistics over a row or cycle window",
    long_about = "Reads solver output such as force and moment histories, detects the header, \
                  the separation style and the integer timestep column without being told, \
                  and applies calculations over a chosen range of rows, timesteps or \
                  detected oscillation cycles."
)]
pub struct Args {
    /// Column data file to load
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    /// Delimiter separating columns in addition to whitespace
    #[arg(
        short = 'd',
        long = "delimiter",
        value_name = "DELIM",
        default_value = DEFAULT_DELIMITER,
        help = "Column delimiter (up to 3 non-numeric characters)"
    )]
    pub delimiter: String,

    /// Header substring that marks a timestep column candidate
    #[arg(
        long = "timestep-marker",
        value_name = "TEXT",
        default_value = TIMESTEP_MARKER,
        help = "Case-insensitive header substring marking the timestep column"
    )]
    pub timestep_marker: String,

    /// Calculations to apply, repeatable
    ///
    /// Accepts min, max, abs-min, abs-max, mean, rms, cubic and their aliases.
    #[arg(
        short = 'f',
        long = "function",
        value_name = "CALC",
        help = "Calculation to apply (repeatable)"
    )]
    pub functions: Vec<Calculation>,

    /// Columns to apply calculations to, by zero-based index or header name
    ///
    /// Defaults to every real column.
    #[arg(
        short = 'c',
        long = "column",
        value_name = "COLUMN",
        help = "Column index or name (repeatable, defaults to all real columns)"
    )]
    pub columns: Vec<ColumnSelector>,

    /// Row range as `begin [end]`, zero-based and inclusive
    #[arg(
        short = 'r',
        long = "rows",
        value_name = "ROW",
        num_args = 1..=2,
        help = "Row range: begin [end]"
    )]
    pub rows: Vec<usize>,

    /// Timestep range as `begin [end]`
    #[arg(
        short = 't',
        long = "timesteps",
        value_name = "STEP",
        num_args = 1..=2,
        allow_negative_numbers = true,
        help = "Timestep range: begin [end]"
    )]
    pub timesteps: Vec<i64>,

    /// Frame the range on oscillation cycles of a column
    #[arg(
        long = "cycles",
        value_enum,
        value_name = "MODE",
        help = "Restrict the range to detected cycles"
    )]
    pub cycles: Option<CycleFraming>,

    /// Number of cycles for the first and last framings
    #[arg(
        long = "cycle-count",
        value_name = "N",
        default_value_t = 1,
        help = "Number of cycles for --cycles first|last"
    )]
    pub cycle_count: usize,

    /// Column scanned for cycles; defaults to the first selected column
    #[arg(
        long = "cycle-column",
        value_name = "COLUMN",
        help = "Column scanned for cycles"
    )]
    pub cycle_column: Option<ColumnSelector>,

    /// Level whose crossings delimit cycles; defaults to the column mean
    #[arg(
        long = "center",
        value_name = "VALUE",
        allow_negative_numbers = true,
        help = "Center level for cycle detection (default: column mean)"
    )]
    pub center: Option<f64>,

    /// Files that calculation results are appended to
    #[arg(
        short = 'o',
        long = "output",
        value_name = "FILE",
        help = "Append calculation results to FILE (repeatable)"
    )]
    pub outputs: Vec<PathBuf>,

    /// Print the loaded data back out
    #[arg(short = 'p', long = "print-data", help = "Print the loaded data")]
    pub print_data: bool,

    /// Write the loaded data to a file
    #[arg(
        long = "write-data",
        value_name = "FILE",
        help = "Write the loaded data to FILE"
    )]
    pub write_data: Option<PathBuf>,

    /// Significant digits of reported reals
    #[arg(
        long = "precision",
        value_name = "DIGITS",
        default_value_t = F64_ROUND_TRIP_DIGITS,
        help = "Significant digits of reported values"
    )]
    pub precision: usize,

    /// Print a JSON report instead of the human readable one
    #[arg(long = "json", help = "Print the report as JSON")]
    pub json: bool,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors. Overrides verbose settings.
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress logging except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Cycle framing choices on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CycleFraming {
    /// Every complete cycle in range
    Full,
    /// The first --cycle-count cycles
    First,
    /// The last --cycle-count cycles
    Last,
}

impl Args {
    /// Validate the arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if !self.rows.is_empty() && !self.timesteps.is_empty() {
            return Err(ColDataError::RangeConflict);
        }

        if self.cycles.is_none() && (self.cycle_column.is_some() || self.center.is_some()) {
            return Err(ColDataError::configuration(
                "--cycle-column and --center require --cycles",
            ));
        }

        if let Some(parent) = self.write_data.as_ref().and_then(|path| path.parent()) {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                return Err(ColDataError::configuration(format!(
                    "Output directory does not exist: {}",
                    parent.display()
                )));
            }
        }

        Ok(())
    }

    /// Loader and output settings gathered from the arguments
    pub fn config(&self) -> Config {
        Config::default()
            .with_delimiter(self.delimiter.clone())
            .with_timestep_marker(self.timestep_marker.clone())
            .with_precision(self.precision)
            .with_output_delimiter(self.delimiter.clone())
    }

    /// Requested row or timestep bounds
    pub fn range_request(&self) -> RangeRequest {
        RangeRequest::default()
            .with_rows(&self.rows)
            .with_timesteps(&self.timesteps)
    }

    /// Cycle framing, if cycles were requested
    pub fn cycle_mode(&self) -> Option<CycleMode> {
        self.cycles.map(|framing| match framing {
            CycleFraming::Full => CycleMode::Full,
            CycleFraming::First => CycleMode::First(self.cycle_count),
            CycleFraming::Last => CycleMode::Last(self.cycle_count),
        })
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }
}
