//! Column construction and the second, value-parsing pass over the data.

use super::DataLine;
use super::classifier::ColumnLayout;
use super::delimitation::split_fields;
use super::line::{is_blank, is_number_line};
use crate::error::LoadError;
use crate::models::{ColumnKind, Delimitation, IntegerColumn, RealColumn};
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

/// Freshly created columns awaiting their values
#[derive(Debug)]
pub struct ColumnSet {
    pub integer: Option<IntegerColumn>,
    pub reals: Vec<RealColumn>,
}

/// Where a file column's cells are stored
#[derive(Debug, Clone, Copy)]
enum Slot {
    Integer,
    Real(usize),
}

/// Count the non-blank lines from the first data line onward
pub fn find_data_row_total(lines: &[&str], first_data_line: usize) -> usize {
    lines
        .iter()
        .skip(first_data_line)
        .filter(|line| !is_blank(line))
        .count()
}

/// Gather the data lines, rejecting any that holds non-numeric characters
pub fn collect_data_lines<'a>(
    lines: &[&'a str],
    first_data_line: usize,
    row_total: usize,
    delimiter: &str,
    path: &Path,
) -> Result<Vec<DataLine<'a>>, LoadError> {
    let mut data_lines = Vec::with_capacity(row_total);

    for (index, text) in lines.iter().enumerate().skip(first_data_line) {
        if is_blank(text) {
            continue;
        }
        if !is_number_line(text, delimiter) {
            return Err(LoadError::MalformedDataLine {
                path: path.to_path_buf(),
                line: index + 1,
                reason: "non-numeric characters in the data section".to_string(),
            });
        }
        data_lines.push(DataLine {
            number: index + 1,
            text,
        });
    }

    Ok(data_lines)
}

/// Create one column per header name, preallocated for `row_total` rows.
///
/// Names must be unique within each kind.
pub fn create_columns(
    names: &[String],
    layout: &ColumnLayout,
    row_total: usize,
    path: &Path,
) -> Result<ColumnSet, LoadError> {
    let integer = layout
        .integer
        .map(|index| IntegerColumn::new(index, names[index].clone(), row_total));

    let mut seen = HashSet::with_capacity(layout.reals.len());
    let mut reals = Vec::with_capacity(layout.reals.len());
    for &index in &layout.reals {
        let name = &names[index];
        if !seen.insert(name.as_str()) {
            return Err(LoadError::DuplicateColumnName {
                path: path.to_path_buf(),
                name: name.clone(),
                kind: ColumnKind::Real,
            });
        }
        reals.push(RealColumn::new(index, name.clone(), row_total));
    }

    Ok(ColumnSet { integer, reals })
}

/// Parse every cell into its column and check the resulting row counts
pub fn populate_columns(
    columns: &mut ColumnSet,
    data_lines: &[DataLine<'_>],
    row_total: usize,
    column_total: usize,
    delimiter: &str,
    style: Delimitation,
    path: &Path,
) -> Result<(), LoadError> {
    let mut slots = vec![Slot::Integer; column_total];
    for (position, column) in columns.reals.iter().enumerate() {
        slots[column.index] = Slot::Real(position);
    }

    for line in data_lines {
        let fields = split_fields(line.text, delimiter, style);
        if fields.len() != column_total {
            return Err(LoadError::RowCountMismatch {
                path: path.to_path_buf(),
                reason: format!(
                    "line {} holds {} fields but the header declares {} columns",
                    line.number,
                    fields.len(),
                    column_total
                ),
            });
        }

        for (cell, slot) in fields.iter().zip(&slots) {
            match *slot {
                Slot::Integer => {
                    let value = cell.parse::<i64>().map_err(|e| {
                        malformed(path, line.number, format!("'{}' is not an integer ({})", cell, e))
                    })?;
                    if let Some(column) = columns.integer.as_mut() {
                        column.values.push(value);
                    }
                }
                Slot::Real(position) => {
                    let value = cell.parse::<f64>().map_err(|e| {
                        malformed(path, line.number, format!("'{}' is not a number ({})", cell, e))
                    })?;
                    columns.reals[position].values.push(value);
                }
            }
        }
    }

    verify_row_counts(columns, row_total, path)?;
    debug!("Populated {} rows across {} columns", row_total, column_total);
    Ok(())
}

fn verify_row_counts(columns: &ColumnSet, row_total: usize, path: &Path) -> Result<(), LoadError> {
    let lengths = columns
        .integer
        .iter()
        .map(|column| (&column.name, column.values.len()))
        .chain(columns.reals.iter().map(|column| (&column.name, column.values.len())));

    for (name, length) in lengths {
        if length != row_total {
            return Err(LoadError::RowCountMismatch {
                path: path.to_path_buf(),
                reason: format!(
                    "column '{}' holds {} rows, expected {}",
                    name, length, row_total
                ),
            });
        }
    }
    Ok(())
}

fn malformed(path: &Path, line: usize, reason: String) -> LoadError {
    LoadError::MalformedDataLine {
        path: path.to_path_buf(),
        line,
        reason,
    }
}
