//! Header location and column name extraction.
//!
//! The header is the last non-data line before the first data line. It may
//! carry a free-form prefix ending in `=` (for example
//! `Variables = step, fx, fy`), and its names may be separated by the
//! delimiter or by whitespace independently of how the data is separated.

use super::line::{is_blank, is_number_line};
use crate::constants::HEADER_ASSIGNMENT;
use crate::error::LoadError;
use crate::models::Delimitation;
use std::path::Path;
use tracing::debug;

/// Zero-based line positions of the header and of the first data line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderBoundary {
    pub header_line: usize,
    pub first_data_line: usize,
}

/// Find where the header ends and the numeric data begins.
///
/// Blank lines are skipped. Every non-data line replaces the running header
/// candidate, so noise above the header is passed over.
pub fn find_boundary(
    lines: &[&str],
    delimiter: &str,
    path: &Path,
) -> Result<HeaderBoundary, LoadError> {
    let mut header_line = None;

    for (index, line) in lines.iter().enumerate() {
        if is_blank(line) {
            continue;
        }
        if !is_number_line(line, delimiter) {
            header_line = Some(index);
            continue;
        }

        let header_line = header_line.ok_or_else(|| LoadError::NoHeaderFound {
            path: path.to_path_buf(),
        })?;
        debug!(
            "Header at line {}, data starts at line {}",
            header_line + 1,
            index + 1
        );
        return Ok(HeaderBoundary {
            header_line,
            first_data_line: index,
        });
    }

    if header_line.is_some() {
        Err(LoadError::NoDataFound {
            path: path.to_path_buf(),
        })
    } else {
        Err(LoadError::NoHeaderFound {
            path: path.to_path_buf(),
        })
    }
}

/// Normalize a raw header line and determine how its names are separated.
///
/// Names follow the first `=` when what follows it holds the delimiter or
/// whitespace. Otherwise the `=` is part of a name and the whole line is
/// read as if it had none. Never fails: a header with neither delimiter nor
/// whitespace is a single column name.
pub fn parse_header(raw_line: &str, delimiter: &str) -> (String, Delimitation) {
    if let Some((_, content)) = raw_line.split_once(HEADER_ASSIGNMENT) {
        if content.contains(delimiter) {
            return (strip_whitespace(content), Delimitation::Delimiter);
        }
        if content.chars().any(char::is_whitespace) {
            return (content.to_string(), Delimitation::Whitespace);
        }
        debug!("Reading '=' as part of a header name: {}", raw_line);
    }

    if raw_line.contains(delimiter) {
        (strip_whitespace(raw_line), Delimitation::Delimiter)
    } else {
        (raw_line.to_string(), Delimitation::Whitespace)
    }
}

/// Split a normalized header into its ordered column names
pub fn split_header(line: &str, delimiter: &str, style: Delimitation) -> Vec<String> {
    match style {
        Delimitation::Whitespace => line.split_whitespace().map(str::to_string).collect(),
        Delimitation::Delimiter | Delimitation::WhitespaceAndDelimiter => line
            .split(delimiter)
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect(),
    }
}

fn strip_whitespace(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}
