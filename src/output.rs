//! Reporting of loaded datasets, calculation results and cycle windows.
//!
//! Human readable output goes to stdout with `colored` headings. Result
//! tables can also be appended to delimited files, the dataset itself can be
//! dumped back out in a form the loader reads again, and a whole report can
//! be serialized as JSON.

use crate::calc::Calculation;
use crate::constants::{
    CALC_NAME_WIDTH, REPORT_RULE_WIDTH, RESULT_TABLE_CORNER, SUBHEADING_RULE_WIDTH,
};
use crate::cycles::CycleStats;
use crate::dataset::Dataset;
use crate::error::Result;
use crate::models::{ColumnRef, CycleResult, Delimitation, RealColumn, RowRange, TimestepRange};
use colored::*;
use serde::Serialize;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;
use tracing::info;

/// Format a real in scientific notation with `precision` significant digits
pub fn format_real(value: f64, precision: usize) -> String {
    format!("{:.*e}", precision.saturating_sub(1), value)
}

/// Description of a loaded dataset
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetSummary {
    pub source: String,
    pub column_total: usize,
    pub row_total: usize,
    pub delimitation: Delimitation,
    pub timestep_column: Option<String>,
    pub timesteps: Option<TimestepRange>,
    pub real_columns: Vec<String>,
}

impl DatasetSummary {
    pub fn from_dataset(dataset: &Dataset) -> Self {
        Self {
            source: dataset.source().display().to_string(),
            column_total: dataset.column_total(),
            row_total: dataset.row_total(),
            delimitation: dataset.delimitation(),
            timestep_column: dataset.integer_column().map(|column| column.name.clone()),
            timesteps: dataset.timestep_info(),
            real_columns: dataset
                .real_columns()
                .iter()
                .map(|column| column.name.clone())
                .collect(),
        }
    }

    pub fn print(&self) {
        println!("{}", "=".repeat(REPORT_RULE_WIDTH));
        println!("{}", "Input Data Summary".bright_green().bold());
        println!("{}", "=".repeat(REPORT_RULE_WIDTH));
        println!("  {} {}", "File:".bright_cyan(), self.source.bright_white());
        println!(
            "  {} {}",
            "Columns:".bright_cyan(),
            self.column_total.to_string().bright_white().bold()
        );
        println!(
            "  {} {}",
            "Rows:".bright_cyan(),
            self.row_total.to_string().bright_white().bold()
        );
        println!(
            "  {} {}",
            "Data separated by:".bright_cyan(),
            self.delimitation.to_string().bright_white()
        );

        match (&self.timestep_column, self.timesteps) {
            (Some(name), Some(range)) if range.consistent => println!(
                "  {} '{}' ({} to {})",
                "Timestep column:".bright_cyan(),
                name,
                range.first,
                range.last
            ),
            (Some(name), _) => println!(
                "  {} '{}' {}",
                "Timestep column:".bright_cyan(),
                name,
                "(not increasing, timestep ranges unavailable)".bright_yellow()
            ),
            (None, _) => println!("  {} none", "Timestep column:".bright_cyan()),
        }

        println!("\n{}", "Real columns".bright_green().bold());
        println!("{}", "-".repeat(SUBHEADING_RULE_WIDTH));
        for name in &self.real_columns {
            println!("  {}", name);
        }
    }
}

/// One calculation applied across every selected column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultRow {
    pub calculation: Calculation,
    pub values: Vec<f64>,
}

/// Calculation results over a row range, one value per column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultTable {
    pub range: RowRange,
    pub columns: Vec<String>,
    pub rows: Vec<ResultRow>,
}

impl ResultTable {
    /// Apply each calculation to each column over `range`.
    ///
    /// `range` must lie within the columns.
    pub fn compute(columns: &[&RealColumn], calculations: &[Calculation], range: RowRange) -> Self {
        let rows = calculations
            .iter()
            .map(|&calculation| ResultRow {
                calculation,
                values: columns
                    .iter()
                    .map(|column| calculation.apply(column.slice(range)).unwrap_or(f64::NAN))
                    .collect(),
            })
            .collect();

        Self {
            range,
            columns: columns.iter().map(|column| column.name.clone()).collect(),
            rows,
        }
    }

    pub fn print(&self, precision: usize) {
        println!(
            "\n{} {}",
            "Results over rows".bright_green().bold(),
            self.range.to_string().bright_white()
        );
        for (position, name) in self.columns.iter().enumerate() {
            println!("\n{}", name.bright_cyan().bold());
            println!("{}", "-".repeat(SUBHEADING_RULE_WIDTH));
            for row in &self.rows {
                println!(
                    "  {:<width$} {}",
                    row.calculation.label(),
                    format_real(row.values[position], precision),
                    width = CALC_NAME_WIDTH
                );
            }
        }
    }

    /// Write the table as delimited text
    pub fn write_to<W: Write>(&self, writer: &mut W, delimiter: &str, precision: usize) -> io::Result<()> {
        write!(writer, "{}", RESULT_TABLE_CORNER)?;
        for name in &self.columns {
            write!(writer, "{}{}", delimiter, name)?;
        }
        writeln!(writer)?;

        for row in &self.rows {
            write!(writer, "{}", row.calculation.label())?;
            for &value in &row.values {
                write!(writer, "{}{}", delimiter, format_real(value, precision))?;
            }
            writeln!(writer)?;
        }
        Ok(())
    }

    /// Append the table to a file, creating it when missing
    pub fn append_to_file(&self, path: &Path, delimiter: &str, precision: usize) -> Result<()> {
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        self.write_to(&mut file, delimiter, precision)?;
        writeln!(file)?;
        info!("Appended results to {}", path.display());
        Ok(())
    }
}

/// Print the row window the results cover
pub fn print_window(range: RowRange, timesteps: Option<(i64, i64)>) {
    match timesteps {
        Some((first, last)) => println!(
            "\n{} {} (timesteps {} to {})",
            "Rows:".bright_cyan(),
            range.to_string().bright_white(),
            first,
            last
        ),
        None => println!("\n{} {}", "Rows:".bright_cyan(), range.to_string().bright_white()),
    }
}

/// Print a detected cycle window
pub fn print_cycles(column: &str, result: &CycleResult, stats: &CycleStats, precision: usize) {
    println!("\n{} '{}'", "Cycles in column".bright_green().bold(), column);
    println!("{}", "-".repeat(SUBHEADING_RULE_WIDTH));
    println!(
        "  {:<width$} {}",
        "cycles",
        result.count.to_string().bright_white().bold(),
        width = CALC_NAME_WIDTH
    );
    println!(
        "  {:<width$} {}",
        "rows",
        result.window(),
        width = CALC_NAME_WIDTH
    );
    if let Some(peak) = stats.mean_peak {
        println!(
            "  {:<width$} {}",
            "mean peak",
            format_real(peak, precision),
            width = CALC_NAME_WIDTH
        );
    }
    if let Some(trough) = stats.mean_trough {
        println!(
            "  {:<width$} {}",
            "mean trough",
            format_real(trough, precision),
            width = CALC_NAME_WIDTH
        );
    }
}

/// Write every column back out, header first, in source file order.
///
/// Integers are written as plain literals and reals in scientific notation,
/// so loading the output yields the same names, kinds and values.
pub fn write_dataset<W: Write>(
    dataset: &Dataset,
    writer: &mut W,
    delimiter: &str,
    precision: usize,
) -> io::Result<()> {
    let columns = dataset.columns();
    let names: Vec<&str> = columns.iter().map(ColumnRef::name).collect();
    writeln!(writer, "{}", names.join(delimiter))?;

    for row in 0..dataset.row_total() {
        let cells: Vec<String> = columns
            .iter()
            .map(|column| match column {
                ColumnRef::Integer(column) => column.values[row].to_string(),
                ColumnRef::Real(column) => format_real(column.values[row], precision),
            })
            .collect();
        writeln!(writer, "{}", cells.join(delimiter))?;
    }
    Ok(())
}

/// Machine readable report of one run
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub summary: DatasetSummary,
    pub range: RowRange,
    pub timesteps: Option<(i64, i64)>,
    pub cycles: Option<CycleResult>,
    pub cycle_stats: Option<CycleStats>,
    pub results: Option<ResultTable>,
}

impl Report {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
