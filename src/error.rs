//! Error handling for column data loading and analysis.
//!
//! Loader and cycle detector failures are kept in their own enums so callers
//! of a single entry point can match on exactly what that entry point raises.
//! [`ColDataError`] wraps both and adds the failures of column lookup and
//! range resolution.

use crate::models::ColumnKind;
use std::path::PathBuf;
use thiserror::Error;

/// Failures raised while loading a column data file.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Could not read input file: {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid delimiter '{delimiter}': {reason}")]
    InvalidDelimiter { delimiter: String, reason: String },

    #[error("No header line found before the numeric data in file: {path}")]
    NoHeaderFound { path: PathBuf },

    #[error("No numeric data lines found in file: {path}")]
    NoDataFound { path: PathBuf },

    #[error("Malformed data at line {line} of {path}: {reason}")]
    MalformedDataLine {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("Duplicate {kind} column name '{name}' in file: {path}")]
    DuplicateColumnName {
        path: PathBuf,
        name: String,
        kind: ColumnKind,
    },

    #[error("Row count mismatch in file: {path} - {reason}")]
    RowCountMismatch { path: PathBuf, reason: String },
}

/// Failures raised by the cycle detector.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CycleError {
    #[error("Invalid row range {begin} to {end} for a column of {rows} rows")]
    InvalidRowRange {
        begin: usize,
        end: usize,
        rows: usize,
    },

    #[error("At least one cycle must be requested")]
    ZeroCyclesRequested,

    #[error("Column '{column}' never crosses {center} between rows {begin} and {end}")]
    NoInitialCrossing {
        column: String,
        begin: usize,
        end: usize,
        center: f64,
    },

    #[error("Column '{column}' holds {found} complete cycles in range, {requested} requested")]
    RequestedCyclesUnavailable {
        column: String,
        requested: usize,
        found: usize,
    },
}

#[derive(Error, Debug)]
pub enum ColDataError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Cycle(#[from] CycleError),

    #[error("Requested column not found: {column}")]
    ColumnNotFound { column: String },

    #[error("Column '{column}' is the integer timestep column; calculations need a real column")]
    IntegerColumnSelected { column: String },

    #[error("Rows and timesteps cannot both be specified; choose one of the two options")]
    RangeConflict,

    #[error("Invalid row range {begin} to {end}: the data holds {rows} rows")]
    InvalidRowRange {
        begin: usize,
        end: usize,
        rows: usize,
    },

    #[error("No consistent timestep column was found in the input file")]
    TimestepUnavailable,

    #[error("Timestep {timestep} is outside the available range {first} to {last}")]
    TimestepOutOfRange { timestep: i64, first: i64, last: i64 },

    #[error("No timestep lies between {begin} and {end}")]
    EmptyTimestepRange { begin: i64, end: i64 },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ColDataError {
    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a column not found error
    pub fn column_not_found(column: impl Into<String>) -> Self {
        Self::ColumnNotFound {
            column: column.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ColDataError>;
