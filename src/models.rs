//! Core data structures and types for column data.
//!
//! Defines the field separation styles, the two column kinds, and the value
//! types returned by the timestep and cycle queries.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the fields of a line are separated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Delimitation {
    Whitespace,
    Delimiter,
    WhitespaceAndDelimiter,
}

impl fmt::Display for Delimitation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Delimitation::Whitespace => "whitespace",
            Delimitation::Delimiter => "delimiter",
            Delimitation::WhitespaceAndDelimiter => "whitespace and delimiter",
        };
        f.write_str(label)
    }
}

/// Numeric kind of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnKind {
    Integer,
    Real,
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnKind::Integer => f.write_str("integer"),
            ColumnKind::Real => f.write_str("real"),
        }
    }
}

/// The integer column of a dataset, semantically its timestep axis
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntegerColumn {
    /// Zero-based position in the file's field order
    pub index: usize,
    pub name: String,
    pub values: Vec<i64>,
}

/// A real-valued measurement column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RealColumn {
    /// Zero-based position in the file's field order
    pub index: usize,
    pub name: String,
    pub values: Vec<f64>,
}

impl IntegerColumn {
    pub fn new(index: usize, name: impl Into<String>, capacity: usize) -> Self {
        Self {
            index,
            name: name.into(),
            values: Vec::with_capacity(capacity),
        }
    }
}

impl RealColumn {
    pub fn new(index: usize, name: impl Into<String>, capacity: usize) -> Self {
        Self {
            index,
            name: name.into(),
            values: Vec::with_capacity(capacity),
        }
    }

    /// Values over an inclusive row range
    pub fn slice(&self, range: RowRange) -> &[f64] {
        &self.values[range.begin..=range.end]
    }
}

/// Borrowed view of either column kind
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColumnRef<'a> {
    Integer(&'a IntegerColumn),
    Real(&'a RealColumn),
}

impl<'a> ColumnRef<'a> {
    pub fn index(&self) -> usize {
        match self {
            ColumnRef::Integer(column) => column.index,
            ColumnRef::Real(column) => column.index,
        }
    }

    pub fn name(&self) -> &'a str {
        match self {
            ColumnRef::Integer(column) => &column.name,
            ColumnRef::Real(column) => &column.name,
        }
    }

    pub fn kind(&self) -> ColumnKind {
        match self {
            ColumnRef::Integer(_) => ColumnKind::Integer,
            ColumnRef::Real(_) => ColumnKind::Real,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ColumnRef::Integer(column) => column.values.len(),
            ColumnRef::Real(column) => column.values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_real(&self) -> Option<&'a RealColumn> {
        match self {
            ColumnRef::Real(column) => Some(column),
            ColumnRef::Integer(_) => None,
        }
    }
}

/// A column addressed by file position or by header name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnSelector {
    Index(usize),
    Name(String),
}

impl FromStr for ColumnSelector {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err("Column selector cannot be empty".to_string());
        }
        if trimmed.chars().all(|c| c.is_ascii_digit()) {
            trimmed
                .parse::<usize>()
                .map(ColumnSelector::Index)
                .map_err(|e| format!("Invalid column number '{}': {}", trimmed, e))
        } else {
            Ok(ColumnSelector::Name(trimmed.to_string()))
        }
    }
}

impl fmt::Display for ColumnSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnSelector::Index(index) => write!(f, "column {}", index),
            ColumnSelector::Name(name) => write!(f, "'{}'", name),
        }
    }
}

/// Monotonicity summary of the integer column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimestepRange {
    /// Every value non-negative and strictly greater than its predecessor
    pub consistent: bool,
    pub first: i64,
    pub last: i64,
}

impl TimestepRange {
    pub fn from_values(values: &[i64]) -> Option<Self> {
        let first = *values.first()?;
        let last = *values.last()?;
        let consistent =
            first >= 0 && values.windows(2).all(|pair| pair[1] > pair[0]);
        Some(Self {
            consistent,
            first,
            last,
        })
    }
}

/// Inclusive range of zero-based row indices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RowRange {
    pub begin: usize,
    pub end: usize,
}

impl RowRange {
    /// Create a range, swapping reversed bounds
    pub fn new(begin: usize, end: usize) -> Self {
        if begin <= end {
            Self { begin, end }
        } else {
            Self {
                begin: end,
                end: begin,
            }
        }
    }

    /// Range spanning every row of a column of `rows` rows
    pub fn all(rows: usize) -> Self {
        Self {
            begin: 0,
            end: rows.saturating_sub(1),
        }
    }

    /// Number of rows in the range, both bounds included
    pub fn row_count(&self) -> usize {
        self.end - self.begin + 1
    }
}

impl fmt::Display for RowRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.begin, self.end)
    }
}

/// Framing policy of the cycle detector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CycleMode {
    /// Every complete cycle in range
    Full,
    /// The first `n` cycles after the initial crossing
    First(usize),
    /// The last `n` cycles before the final crossing
    Last(usize),
}

/// Rows bounding one detected cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CycleSpan {
    pub row_initial: usize,
    pub row_final: usize,
}

/// Outcome of a cycle query
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CycleResult {
    pub count: usize,
    pub row_initial: usize,
    pub row_final: usize,
    /// Per-cycle spans in row order
    pub spans: Vec<CycleSpan>,
}

impl CycleResult {
    /// Row window covered by the detected cycles
    pub fn window(&self) -> RowRange {
        RowRange::new(self.row_initial, self.row_final)
    }
}
