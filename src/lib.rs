//! Column Data Library
//!
//! A Rust library for loading timestep column data written by flow solvers
//! and analysing it over row, timestep or oscillation cycle windows.
//!
//! This library provides tools for:
//! - Detecting the header line, separation style and timestep column of a
//!   file without a declared schema
//! - Typed column storage with lookup by position or header name
//! - Mapping timestep bounds onto rows
//! - Center-crossing cycle detection
//! - Statistical calculations and delimited or JSON reporting

pub mod calc;
pub mod config;
pub mod constants;
pub mod cycles;
pub mod dataset;
pub mod error;
pub mod loader;
pub mod models;
pub mod output;
pub mod range;

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use calc::Calculation;
pub use config::Config;
pub use cycles::{CycleStats, find_cycles, find_cycles_first, find_cycles_full, find_cycles_last};
pub use dataset::Dataset;
pub use error::{ColDataError, CycleError, LoadError, Result};
pub use loader::{TableLoader, load, parse_str};
pub use models::{
    ColumnKind, ColumnRef, ColumnSelector, CycleMode, CycleResult, CycleSpan, Delimitation,
    IntegerColumn, RealColumn, RowRange, TimestepRange,
};
pub use range::RangeRequest;
