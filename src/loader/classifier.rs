//! Integer versus real column classification.
//!
//! A column becomes the integer (timestep) column only when its name carries
//! the timestep marker and every one of its cells is a plain non-negative
//! integer literal. Of the candidates that survive, the left-most wins; every
//! other column is real.

use super::DataLine;
use super::delimitation::split_fields;
use crate::models::Delimitation;
use tracing::debug;

/// Column indices grouped by numeric kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnLayout {
    pub integer: Option<usize>,
    pub reals: Vec<usize>,
}

/// Indices of columns whose names contain `marker`, ignoring case
pub fn timestep_candidates(names: &[String], marker: &str) -> Vec<usize> {
    let marker = marker.to_lowercase();
    names
        .iter()
        .enumerate()
        .filter(|(_, name)| name.to_lowercase().contains(&marker))
        .map(|(index, _)| index)
        .collect()
}

/// Whether a cell is made of ASCII digits only and fits an `i64`
pub fn is_plain_integer(cell: &str) -> bool {
    !cell.is_empty() && cell.bytes().all(|b| b.is_ascii_digit()) && cell.parse::<i64>().is_ok()
}

/// Verify the candidates against every data line and assign column kinds.
///
/// Candidates are checked in a single pass; one that fails on any line is
/// dropped for good, which selects the same column as re-verifying the
/// survivors from the first line after each demotion.
pub fn classify_columns(
    data_lines: &[DataLine<'_>],
    column_total: usize,
    candidates: &[usize],
    delimiter: &str,
    style: Delimitation,
) -> ColumnLayout {
    let mut live: Vec<usize> = candidates
        .iter()
        .copied()
        .filter(|&index| index < column_total)
        .collect();

    for line in data_lines {
        if live.is_empty() {
            break;
        }
        let fields = split_fields(line.text, delimiter, style);
        live.retain(|&index| {
            let keep = fields.get(index).is_some_and(|cell| is_plain_integer(cell));
            if !keep {
                debug!(
                    "Column {} demoted to real: cell at line {} is not a plain integer",
                    index, line.number
                );
            }
            keep
        });
    }

    let integer = live.into_iter().min();
    let reals = (0..column_total)
        .filter(|&index| Some(index) != integer)
        .collect();

    ColumnLayout { integer, reals }
}
