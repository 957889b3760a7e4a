//! Test utilities for the column data loader
//!
//! Fixture builders shared by the header, classifier and end-to-end loader
//! tests.

use std::io::Write;
use tempfile::NamedTempFile;

// Test modules
mod classifier_tests;

/// Force history with a solver banner, a `Variables =` header and
/// whitespace separated data
pub fn create_force_history() -> String {
    r#"# Solver force monitor
# written every timestep

Variables = Time_Step  Fx  Fy  Mz
1   1.0e-1   1.0   0.0
2   2.0e-1  -1.0   0.5
3   3.0e-1   1.0   1.0
4   4.0e-1  -1.0   1.5
"#
    .to_string()
}

/// Comma separated table with a comma separated header
pub fn create_comma_table() -> String {
    "step, fx, fy\n1, 0.5, -0.5\n2, 0.6, -0.4\n3, 0.7, -0.3\n".to_string()
}

/// Split a fixture into lines the way the loader does
pub fn fixture_lines(content: &str) -> Vec<&str> {
    content.lines().collect()
}

/// Helper to create a temporary file with given content
pub fn create_temp_file(content: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    write!(temp_file, "{}", content).unwrap();
    temp_file
}
