//! Tests for timestep column selection

use super::super::DataLine;
use super::super::classifier::{classify_columns, is_plain_integer, timestep_candidates};
use crate::models::Delimitation;

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|name| name.to_string()).collect()
}

fn data_lines<'a>(texts: &[&'a str]) -> Vec<DataLine<'a>> {
    texts
        .iter()
        .enumerate()
        .map(|(index, &text)| DataLine {
            number: index + 2,
            text,
        })
        .collect()
}

#[test]
fn test_candidates_match_marker_ignoring_case() {
    let names = names(&["Time_Step", "fx", "STEPS", "stp"]);
    assert_eq!(timestep_candidates(&names, "step"), vec![0, 2]);
    assert_eq!(timestep_candidates(&names, "Time"), vec![0]);
}

#[test]
fn test_plain_integer_cells() {
    assert!(is_plain_integer("42"));
    assert!(is_plain_integer("007"));
    assert!(!is_plain_integer("-1"));
    assert!(!is_plain_integer("1.0"));
    assert!(!is_plain_integer("1e3"));
    assert!(!is_plain_integer(""));
    assert!(is_plain_integer("9223372036854775807"));
    assert!(!is_plain_integer("99999999999999999999"));
}

#[test]
fn test_left_most_surviving_candidate_wins() {
    let lines = data_lines(&["1 5 0.1", "2 6 0.2"]);
    let layout = classify_columns(&lines, 3, &[0, 1], ",", Delimitation::Whitespace);

    assert_eq!(layout.integer, Some(0));
    assert_eq!(layout.reals, vec![1, 2]);
}

#[test]
fn test_candidate_demoted_by_non_integer_cell() {
    // Column 0 turns fractional on the last line
    let lines = data_lines(&["1 5 0.1", "2 6 0.2", "2.5 7 0.3"]);
    let layout = classify_columns(&lines, 3, &[0, 1], ",", Delimitation::Whitespace);

    assert_eq!(layout.integer, Some(1));
    assert_eq!(layout.reals, vec![0, 2]);
}

#[test]
fn test_no_surviving_candidate() {
    let lines = data_lines(&["0.5,1.0", "1.5,2.0"]);
    let layout = classify_columns(&lines, 2, &[0], ",", Delimitation::Delimiter);

    assert_eq!(layout.integer, None);
    assert_eq!(layout.reals, vec![0, 1]);
}

#[test]
fn test_no_candidates_means_all_real() {
    let lines = data_lines(&["1 2 3"]);
    let layout = classify_columns(&lines, 3, &[], ",", Delimitation::Whitespace);

    assert_eq!(layout.integer, None);
    assert_eq!(layout.reals, vec![0, 1, 2]);
}
