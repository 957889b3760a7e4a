//! Resolution of user supplied row or timestep bounds into a row range.

use crate::dataset::Dataset;
use crate::error::{ColDataError, Result};
use crate::models::RowRange;
use tracing::debug;

/// Bounds as given on the command line, at most two of each
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RangeRequest {
    pub rows: Vec<usize>,
    pub timesteps: Vec<i64>,
}

impl RangeRequest {
    pub fn with_rows(mut self, rows: &[usize]) -> Self {
        self.rows = rows.to_vec();
        self
    }

    pub fn with_timesteps(mut self, timesteps: &[i64]) -> Self {
        self.timesteps = timesteps.to_vec();
        self
    }

    /// Resolve the request against a loaded dataset.
    ///
    /// Unset bounds default to the first and last row. Reversed bounds are
    /// swapped.
    pub fn resolve(&self, dataset: &Dataset) -> Result<RowRange> {
        if !self.rows.is_empty() && !self.timesteps.is_empty() {
            return Err(ColDataError::RangeConflict);
        }
        if self.rows.len() > 2 || self.timesteps.len() > 2 {
            return Err(ColDataError::configuration(
                "A range takes at most a begin and an end value",
            ));
        }

        let range = if self.timesteps.is_empty() {
            resolve_rows(dataset, &self.rows)?
        } else {
            resolve_timesteps(dataset, &self.timesteps)?
        };
        debug!("Resolved row range {}", range);
        Ok(range)
    }
}

/// Timesteps at the two ends of a row range, when the timestep column is
/// consistent
pub fn timestep_window(dataset: &Dataset, range: RowRange) -> Option<(i64, i64)> {
    Some((
        dataset.timestep_at(range.begin)?,
        dataset.timestep_at(range.end)?,
    ))
}

fn resolve_rows(dataset: &Dataset, rows: &[usize]) -> Result<RowRange> {
    let row_total = dataset.row_total();
    let last = row_total.saturating_sub(1);
    let range = match rows {
        [] => RowRange::all(row_total),
        [begin] => RowRange::new(*begin, last),
        [begin, end, ..] => RowRange::new(*begin, *end),
    };

    if range.end >= row_total {
        return Err(ColDataError::InvalidRowRange {
            begin: range.begin,
            end: range.end,
            rows: row_total,
        });
    }
    Ok(range)
}

fn resolve_timesteps(dataset: &Dataset, timesteps: &[i64]) -> Result<RowRange> {
    let (first, last) = dataset
        .timestep_range()
        .ok_or(ColDataError::TimestepUnavailable)?;
    let values = match dataset.integer_column() {
        Some(column) => &column.values,
        None => return Err(ColDataError::TimestepUnavailable),
    };

    for &timestep in timesteps {
        if timestep < first || timestep > last {
            return Err(ColDataError::TimestepOutOfRange {
                timestep,
                first,
                last,
            });
        }
    }

    let (begin, end) = match timesteps {
        [begin] => (*begin, last),
        [a, b, ..] => ((*a).min(*b), (*a).max(*b)),
        [] => (first, last),
    };

    // First row at or after `begin`, last row at or before `end`
    let begin_row = values.partition_point(|&v| v < begin);
    let end_row = values.partition_point(|&v| v <= end).saturating_sub(1);
    if begin_row > end_row {
        return Err(ColDataError::EmptyTimestepRange { begin, end });
    }
    Ok(RowRange::new(begin_row, end_row))
}
