//! Configuration management and validation.
//!
//! Holds the delimiter the loader splits on, the name marker that flags
//! timestep candidates, and the formatting used when results and data are
//! written back out.

use crate::constants::{
    DEFAULT_DELIMITER, DELIMITER_LEN_LIMIT, F64_ROUND_TRIP_DIGITS, NUMERIC_CHARS,
    TIMESTEP_MARKER,
};
use crate::error::{ColDataError, LoadError, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Settings shared by the loader and the output writers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Field delimiter expected in the input file
    pub delimiter: String,

    /// Case-insensitive substring marking timestep candidate columns
    pub timestep_marker: String,

    /// Significant digits used when printing real values
    pub precision: usize,

    /// Delimiter used when writing data and result tables
    pub output_delimiter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER.to_string(),
            timestep_marker: TIMESTEP_MARKER.to_string(),
            precision: F64_ROUND_TRIP_DIGITS,
            output_delimiter: DEFAULT_DELIMITER.to_string(),
        }
    }
}

impl Config {
    /// Create configuration with a custom input delimiter
    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = delimiter.into();
        self
    }

    /// Create configuration with a custom timestep marker
    pub fn with_timestep_marker(mut self, marker: impl Into<String>) -> Self {
        self.timestep_marker = marker.into();
        self
    }

    /// Create configuration with a custom output precision
    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Create configuration with a custom output delimiter
    pub fn with_output_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.output_delimiter = delimiter.into();
        self
    }

    /// Check every setting before a load is attempted
    pub fn validate(&self) -> Result<()> {
        validate_delimiter(&self.delimiter)?;

        if self.timestep_marker.trim().is_empty() {
            return Err(ColDataError::configuration(
                "Timestep marker cannot be empty",
            ));
        }
        if self.precision == 0 || self.precision > F64_ROUND_TRIP_DIGITS {
            return Err(ColDataError::configuration(format!(
                "Precision must be between 1 and {} significant digits",
                F64_ROUND_TRIP_DIGITS
            )));
        }
        if self.output_delimiter.is_empty() {
            return Err(ColDataError::configuration(
                "Output delimiter cannot be empty",
            ));
        }

        debug!("Configuration validated: {:?}", self);
        Ok(())
    }
}

/// Reject delimiters that would make data lines ambiguous.
///
/// A delimiter made of whitespace or of numeric-literal characters could not
/// be told apart from the numbers it separates.
pub fn validate_delimiter(delimiter: &str) -> std::result::Result<(), LoadError> {
    let invalid = |reason: &str| LoadError::InvalidDelimiter {
        delimiter: delimiter.to_string(),
        reason: reason.to_string(),
    };

    if delimiter.is_empty() {
        return Err(invalid("the delimiter cannot be empty"));
    }
    if delimiter.chars().count() > DELIMITER_LEN_LIMIT {
        return Err(invalid(&format!(
            "the delimiter cannot be longer than {} characters",
            DELIMITER_LEN_LIMIT
        )));
    }
    if delimiter.chars().any(char::is_whitespace) {
        return Err(invalid(
            "whitespace separation is detected automatically and cannot be a delimiter",
        ));
    }
    if delimiter.chars().any(|c| NUMERIC_CHARS.contains(c)) {
        return Err(invalid("the delimiter cannot contain numeric characters"));
    }
    Ok(())
}
