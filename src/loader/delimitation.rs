//! Data body separation style and field splitting.

use crate::constants::NUMERIC_CHARS;
use crate::models::Delimitation;

/// Classify how the fields of a data line are separated.
///
/// Returns `None` when the line holds characters outside the numeric,
/// whitespace and delimiter sets.
pub fn detect_data_style(line: &str, delimiter: &str) -> Option<Delimitation> {
    let is_numeric = |c: char| NUMERIC_CHARS.contains(c);
    let is_delimiter = |c: char| delimiter.contains(c);

    if line.chars().all(|c| c.is_whitespace() || is_numeric(c)) {
        Some(Delimitation::Whitespace)
    } else if line.chars().all(|c| is_numeric(c) || is_delimiter(c)) {
        Some(Delimitation::Delimiter)
    } else if line
        .chars()
        .all(|c| c.is_whitespace() || is_numeric(c) || is_delimiter(c))
    {
        Some(Delimitation::WhitespaceAndDelimiter)
    } else {
        None
    }
}

/// Split a data line into its cells.
///
/// Under the delimited styles a single trailing delimiter is ignored and
/// each cell is trimmed of surrounding whitespace.
pub fn split_fields<'a>(line: &'a str, delimiter: &str, style: Delimitation) -> Vec<&'a str> {
    match style {
        Delimitation::Whitespace => line.split_whitespace().collect(),
        Delimitation::Delimiter | Delimitation::WhitespaceAndDelimiter => {
            let body = line.trim();
            let body = body.strip_suffix(delimiter).unwrap_or(body);
            body.split(delimiter).map(str::trim).collect()
        }
    }
}
