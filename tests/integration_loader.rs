//! Integration tests for loading solver column data files from disk
//!
//! These tests write realistic force monitor files to temporary storage and
//! verify end-to-end loading, range resolution and data dumping.

use coldata::output::write_dataset;
use coldata::{
    ColDataError, ColumnSelector, Delimitation, LoadError, RangeRequest, RowRange, load,
};
use std::io::Write;
use tempfile::NamedTempFile;

/// Write `content` to a fresh temporary file
fn temp_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", content).unwrap();
    file
}

/// Monitor file in the style written by a finite-volume solver
fn solver_monitor() -> String {
    let mut content = String::from(
        "# Force monitor: wing\n# Units: N\n\nVariables = \"Time_Step\", \"Cd\", \"Cl\"\n",
    );
    for step in 0..50 {
        let cl = (step as f64 * 0.4 + 0.2).sin();
        content.push_str(&format!("{} {:.6e} {:.6e}\n", 100 + step, 0.02, cl));
    }
    content
}

/// Test loading a monitor file whose header names are quoted
///
/// Purpose: Validate header detection below comment lines with quoted names
/// Benefit: Quoted names come through verbatim and remain addressable
#[test]
fn test_load_solver_monitor() {
    let file = temp_file(&solver_monitor());

    let dataset = load(file.path(), ",").unwrap();

    assert_eq!(dataset.row_total(), 50);
    assert_eq!(dataset.column_total(), 3);
    assert_eq!(dataset.delimitation(), Delimitation::Whitespace);
    assert_eq!(
        dataset.column_names(),
        vec!["\"Time_Step\"", "\"Cd\"", "\"Cl\""]
    );
    assert_eq!(dataset.timestep_range(), Some((100, 149)));

    let cl = dataset
        .real_column(&ColumnSelector::Name("\"Cl\"".to_string()))
        .unwrap();
    assert_eq!(cl.values.len(), 50);
}

/// Test resolving timestep bounds against a loaded file
///
/// Purpose: Validate timestep to row mapping on real loader output
/// Benefit: Confirms the cached timestep range feeds range resolution
#[test]
fn test_timestep_window_on_loaded_file() {
    let file = temp_file(&solver_monitor());
    let dataset = load(file.path(), ",").unwrap();

    let range = RangeRequest::default()
        .with_timesteps(&[110, 119])
        .resolve(&dataset)
        .unwrap();
    assert_eq!(range, RowRange::new(10, 19));

    assert!(matches!(
        RangeRequest::default().with_timesteps(&[99]).resolve(&dataset),
        Err(ColDataError::TimestepOutOfRange { .. })
    ));
}

/// Test that a dumped dataset loads back unchanged
///
/// Purpose: Validate the data writer against the loader
/// Benefit: Dumps can be fed back into further runs without loss
#[test]
fn test_dump_and_reload() {
    let file = temp_file(&solver_monitor());
    let dataset = load(file.path(), ",").unwrap();

    let dump = NamedTempFile::new().unwrap();
    {
        let mut writer = dump.reopen().unwrap();
        write_dataset(&dataset, &mut writer, ",", 17).unwrap();
    }

    let reloaded = load(dump.path(), ",").unwrap();
    assert_eq!(reloaded.delimitation(), Delimitation::Delimiter);
    assert_eq!(reloaded.column_names(), dataset.column_names());
    assert_eq!(reloaded.integer_column(), dataset.integer_column());
    assert_eq!(reloaded.real_columns(), dataset.real_columns());
}

/// Test error reporting for a file with a truncated final line
///
/// Purpose: Validate that partially written files are rejected
/// Benefit: Half-flushed solver output never yields short columns
#[test]
fn test_truncated_file_rejected() {
    let mut content = solver_monitor();
    content.push_str("150 2.0e-2\n");
    let file = temp_file(&content);

    let error = load(file.path(), ",").unwrap_err();
    assert!(matches!(error, LoadError::RowCountMismatch { .. }));
    assert!(error.to_string().contains("line"));
}
