//! Format-detecting loader for timestep column data files.
//!
//! Solver output rarely declares its own layout, so the loader infers it:
//!
//! - [`line`] - character-set test separating data lines from the rest
//! - [`header`] - header location, normalization and name splitting
//! - [`delimitation`] - separation style of the data body, field splitting
//! - [`classifier`] - choice of the integer timestep column
//! - [`populate`] - column construction and the value-parsing pass
//!
//! The file is read once; the header scan, the row count and the value pass
//! all run over the same in-memory lines. A [`Dataset`] is only returned
//! once every column has been filled and checked.
//!
//! ## Usage
//!
//! ```rust,no_run
//! # fn example() -> Result<(), coldata::LoadError> {
//! let dataset = coldata::load("forces.dat", ",")?;
//! if let Some((first, last)) = dataset.timestep_range() {
//!     println!("Timesteps {} to {}", first, last);
//! }
//! # Ok(())
//! # }
//! ```

pub mod classifier;
pub mod delimitation;
pub mod header;
pub mod line;
pub mod populate;

#[cfg(test)]
mod tests;

use crate::config::{Config, validate_delimiter};
use crate::dataset::Dataset;
use crate::error::LoadError;
use std::path::Path;
use tracing::{debug, info};

pub use classifier::{ColumnLayout, classify_columns, timestep_candidates};
pub use delimitation::{detect_data_style, split_fields};
pub use header::{HeaderBoundary, find_boundary, parse_header, split_header};
pub use line::is_number_line;
pub use populate::find_data_row_total;

/// Source label used for tables parsed from memory
const IN_MEMORY_SOURCE: &str = "<memory>";

/// A data line with its 1-based position in the file
#[derive(Debug, Clone, Copy)]
pub struct DataLine<'a> {
    pub number: usize,
    pub text: &'a str,
}

/// Loader bound to one delimiter and timestep marker
#[derive(Debug, Clone)]
pub struct TableLoader {
    delimiter: String,
    timestep_marker: String,
}

impl TableLoader {
    /// Create a loader from a configuration, checking its delimiter
    pub fn new(config: &Config) -> Result<Self, LoadError> {
        validate_delimiter(&config.delimiter)?;
        Ok(Self {
            delimiter: config.delimiter.clone(),
            timestep_marker: config.timestep_marker.clone(),
        })
    }

    /// Load and validate a column data file
    pub fn load(&self, path: impl AsRef<Path>) -> Result<Dataset, LoadError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.parse_with_source(&content, path)
    }

    /// Run the loader on in-memory text
    pub fn parse_str(&self, content: &str) -> Result<Dataset, LoadError> {
        self.parse_with_source(content, Path::new(IN_MEMORY_SOURCE))
    }

    fn parse_with_source(&self, content: &str, path: &Path) -> Result<Dataset, LoadError> {
        let delimiter = self.delimiter.as_str();
        let lines: Vec<&str> = content.lines().collect();

        let boundary = find_boundary(&lines, delimiter, path)?;
        let (header_text, header_style) = parse_header(lines[boundary.header_line], delimiter);
        let names = split_header(&header_text, delimiter, header_style);
        if names.is_empty() {
            return Err(LoadError::NoHeaderFound {
                path: path.to_path_buf(),
            });
        }
        let column_total = names.len();
        debug!(
            "Header separated by {}: {} columns {:?}",
            header_style, column_total, names
        );

        let row_total = find_data_row_total(&lines, boundary.first_data_line);
        let data_lines = populate::collect_data_lines(
            &lines,
            boundary.first_data_line,
            row_total,
            delimiter,
            path,
        )?;

        let first = data_lines[0];
        let data_style =
            detect_data_style(first.text, delimiter).ok_or_else(|| LoadError::MalformedDataLine {
                path: path.to_path_buf(),
                line: first.number,
                reason: "unrecognized separation of the numeric fields".to_string(),
            })?;
        debug!("Data separated by {}", data_style);

        let candidates = timestep_candidates(&names, &self.timestep_marker);
        let layout = classify_columns(&data_lines, column_total, &candidates, delimiter, data_style);
        debug!(
            "Timestep candidates {:?}, integer column {:?}",
            candidates, layout.integer
        );

        let mut columns = populate::create_columns(&names, &layout, row_total, path)?;
        populate::populate_columns(
            &mut columns,
            &data_lines,
            row_total,
            column_total,
            delimiter,
            data_style,
            path,
        )?;

        info!(
            "Loaded {}: {} columns, {} rows",
            path.display(),
            column_total,
            row_total
        );
        Ok(Dataset::from_parts(
            path.to_path_buf(),
            data_style,
            row_total,
            column_total,
            columns.integer,
            columns.reals,
        ))
    }
}

/// Load a column data file using `delimiter` and the default timestep marker
pub fn load(path: impl AsRef<Path>, delimiter: &str) -> Result<Dataset, LoadError> {
    TableLoader::new(&Config::default().with_delimiter(delimiter))?.load(path)
}

/// Parse in-memory column data using `delimiter` and the default timestep marker
pub fn parse_str(content: &str, delimiter: &str) -> Result<Dataset, LoadError> {
    TableLoader::new(&Config::default().with_delimiter(delimiter))?.parse_str(content)
}
