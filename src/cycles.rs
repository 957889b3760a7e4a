//! Center-crossing cycle detection on a real column.
//!
//! A crossing sits between rows `r` and `r + 1` when the column changes
//! strict side of `center`, or when it leaves a sample lying exactly on
//! `center`. Arriving on `center` is not a crossing; the departure is. Two
//! crossings make one cycle.
//!
//! Crossings are collected once, in row order, searching one row beyond each
//! end of the range so that a cycle anchored just outside the window is still
//! found. Each crossing is placed on whichever sample of its pair lies closer
//! to `center`. Cycle spans chain through every second crossing, so the full,
//! first and last framings all read from the same span list.

use crate::error::CycleError;
use crate::models::{CycleMode, CycleResult, CycleSpan, RealColumn, RowRange};
use serde::Serialize;
use tracing::debug;

/// Search window over one column
struct Scan<'a> {
    values: &'a [f64],
    center: f64,
    /// Lowest row a crossing pair may start on
    lo: usize,
    /// Highest row a crossing pair may end on
    hi: usize,
}

impl<'a> Scan<'a> {
    fn new(values: &'a [f64], range: RowRange, center: f64) -> Self {
        let lo = range.begin.saturating_sub(1);
        let hi = if range.end + 1 < values.len() {
            range.end + 1
        } else {
            range.end
        };
        Self {
            values,
            center,
            lo,
            hi,
        }
    }

    fn deviation(&self, row: usize) -> f64 {
        self.values[row] - self.center
    }

    /// Whether the pair starting at `row` crosses center
    fn crosses(&self, row: usize) -> bool {
        let (from, to) = (self.deviation(row), self.deviation(row + 1));
        (from < 0.0 && to > 0.0) || (from > 0.0 && to < 0.0) || (from == 0.0 && to != 0.0)
    }

    /// Sample of the pair starting at `row` closest to center, the earlier
    /// one on a tie
    fn nearer(&self, row: usize) -> usize {
        if self.deviation(row).abs() <= self.deviation(row + 1).abs() {
            row
        } else {
            row + 1
        }
    }

    /// Boundary sample of every crossing in the window, in row order
    fn crossing_rows(&self) -> Vec<usize> {
        (self.lo..self.hi)
            .filter(|&row| self.crosses(row))
            .map(|row| self.nearer(row))
            .collect()
    }

    /// Chain the crossings into cycle spans.
    ///
    /// A first boundary lying on center is free: its crossing does not count
    /// towards the first cycle. Every span after the first opens where the
    /// previous one closed. When the crossings run out half way through a
    /// cycle the last span closes on the final crossing.
    fn cycles(&self) -> Option<CycleResult> {
        let points = self.crossing_rows();
        let row_initial = *points.first()?;
        let last = points.len() - 1;
        let counted = points.len() - usize::from(self.deviation(row_initial) == 0.0);

        let spans: Vec<CycleSpan> = (0..counted / 2)
            .map(|i| CycleSpan {
                row_initial: points[2 * i],
                row_final: points[(2 * i + 2).min(last)],
            })
            .collect();

        Some(CycleResult {
            count: spans.len(),
            row_initial,
            row_final: spans.last().map_or(row_initial, |span| span.row_final),
            spans,
        })
    }
}

fn check_range(column: &RealColumn, range: RowRange) -> Result<(), CycleError> {
    let rows = column.values.len();
    if range.begin > range.end || range.end >= rows {
        return Err(CycleError::InvalidRowRange {
            begin: range.begin,
            end: range.end,
            rows,
        });
    }
    Ok(())
}

fn no_initial_crossing(column: &RealColumn, range: RowRange, center: f64) -> CycleError {
    CycleError::NoInitialCrossing {
        column: column.name.clone(),
        begin: range.begin,
        end: range.end,
        center,
    }
}

fn require_cycles(
    column: &RealColumn,
    result: &CycleResult,
    requested: usize,
) -> Result<(), CycleError> {
    if result.count < requested {
        return Err(CycleError::RequestedCyclesUnavailable {
            column: column.name.clone(),
            requested,
            found: result.count,
        });
    }
    Ok(())
}

/// Result covering a non-empty run of spans
fn keep_spans(spans: &[CycleSpan]) -> CycleResult {
    let spans = spans.to_vec();
    CycleResult {
        count: spans.len(),
        row_initial: spans.first().map_or(0, |span| span.row_initial),
        row_final: spans.last().map_or(0, |span| span.row_final),
        spans,
    }
}

fn detect(column: &RealColumn, range: RowRange, center: f64) -> Result<CycleResult, CycleError> {
    check_range(column, range)?;
    Scan::new(&column.values, range, center)
        .cycles()
        .ok_or_else(|| no_initial_crossing(column, range, center))
}

/// Count every complete cycle in range
pub fn find_cycles_full(
    column: &RealColumn,
    range: RowRange,
    center: f64,
) -> Result<CycleResult, CycleError> {
    let result = detect(column, range, center)?;

    debug!(
        "Column '{}': {} cycles about {} over rows {} to {}",
        column.name, result.count, center, result.row_initial, result.row_final
    );
    Ok(result)
}

/// Frame the first `cycles` cycles after the initial crossing
pub fn find_cycles_first(
    column: &RealColumn,
    range: RowRange,
    center: f64,
    cycles: usize,
) -> Result<CycleResult, CycleError> {
    if cycles == 0 {
        return Err(CycleError::ZeroCyclesRequested);
    }
    let full = detect(column, range, center)?;
    require_cycles(column, &full, cycles)?;
    Ok(keep_spans(&full.spans[..cycles]))
}

/// Frame the last `cycles` cycles before the final crossing
pub fn find_cycles_last(
    column: &RealColumn,
    range: RowRange,
    center: f64,
    cycles: usize,
) -> Result<CycleResult, CycleError> {
    if cycles == 0 {
        return Err(CycleError::ZeroCyclesRequested);
    }
    let full = detect(column, range, center)?;
    require_cycles(column, &full, cycles)?;
    Ok(keep_spans(&full.spans[full.count - cycles..]))
}

/// Run the cycle detector under the given framing mode
pub fn find_cycles(
    column: &RealColumn,
    range: RowRange,
    center: f64,
    mode: CycleMode,
) -> Result<CycleResult, CycleError> {
    match mode {
        CycleMode::Full => find_cycles_full(column, range, center),
        CycleMode::First(n) => find_cycles_first(column, range, center, n),
        CycleMode::Last(n) => find_cycles_last(column, range, center, n),
    }
}

/// Peak and trough of each detected cycle
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CycleStats {
    pub peaks: Vec<f64>,
    pub troughs: Vec<f64>,
    pub mean_peak: Option<f64>,
    pub mean_trough: Option<f64>,
}

impl CycleStats {
    pub fn from_result(column: &RealColumn, result: &CycleResult) -> Self {
        let (peaks, troughs): (Vec<f64>, Vec<f64>) = result
            .spans
            .iter()
            .map(|span| {
                column.values[span.row_initial..=span.row_final]
                    .iter()
                    .fold((f64::NEG_INFINITY, f64::INFINITY), |(peak, trough), &v| {
                        (peak.max(v), trough.min(v))
                    })
            })
            .unzip();

        let mean = |values: &[f64]| {
            (!values.is_empty()).then(|| values.iter().sum::<f64>() / values.len() as f64)
        };
        Self {
            mean_peak: mean(&peaks),
            mean_trough: mean(&troughs),
            peaks,
            troughs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn column(values: Vec<f64>) -> RealColumn {
        RealColumn {
            index: 1,
            name: "fy".to_string(),
            values,
        }
    }

    /// `periods` periods of a sine sampled `per_period` times per period
    fn sine(per_period: usize, periods: usize, phase: f64) -> RealColumn {
        let values = (0..=per_period * periods)
            .map(|k| (2.0 * PI * k as f64 / per_period as f64 + phase).sin())
            .collect();
        column(values)
    }

    #[test]
    fn test_single_oscillation() {
        let fy = column(vec![1.0, -1.0, 1.0]);
        let result = find_cycles_full(&fy, RowRange::new(0, 2), 0.0).unwrap();
        assert_eq!(result.count, 1);
        assert_eq!(result.row_initial, 0);
        assert_eq!(result.row_final, 1);
    }

    #[test]
    fn test_sine_cycle_count_matches_periods() {
        for &(per_period, periods) in &[(20, 4), (16, 10), (50, 3)] {
            let signal = sine(per_period, periods, 0.3);
            let result = find_cycles_full(&signal, RowRange::all(signal.values.len()), 0.0).unwrap();
            assert!(
                result.count.abs_diff(periods) <= 1,
                "{} cycles found for {} periods",
                result.count,
                periods
            );
            assert_eq!(result.spans.len(), result.count);
        }
    }

    #[test]
    fn test_first_and_last_split_full_window() {
        let signal = sine(20, 4, 0.3);
        let range = RowRange::all(signal.values.len());
        let full = find_cycles_full(&signal, range, 0.0).unwrap();
        assert_eq!(full.count, 4);

        let first = find_cycles_first(&signal, range, 0.0, 2).unwrap();
        let last = find_cycles_last(&signal, range, 0.0, 2).unwrap();
        assert_eq!(first.count, 2);
        assert_eq!(last.count, 2);
        assert_eq!(first.row_final, last.row_initial);
        assert_eq!(first.row_initial, full.row_initial);
        assert_eq!(last.row_final, full.row_final);
        assert_eq!([first.spans, last.spans].concat(), full.spans);
    }

    #[test]
    fn test_whole_periods_chain_spans() {
        // Nine crossings frame four whole periods
        let values = (0..=90)
            .map(|k| (2.0 * PI * k as f64 / 20.0 + 0.3).sin())
            .collect();
        let signal = column(values);
        let result = find_cycles_full(&signal, RowRange::new(0, 90), 0.0).unwrap();
        assert_eq!(result.count, 4);
        for pair in result.spans.windows(2) {
            assert_eq!(pair[0].row_final, pair[1].row_initial);
        }

        let stats = CycleStats::from_result(&signal, &result);
        assert!(stats.peaks.iter().all(|&peak| peak > 0.95));
        assert!(stats.troughs.iter().all(|&trough| trough < -0.95));
    }

    #[test]
    fn test_exact_touch_starts_count_lower() {
        // One full period starting and ending on center
        let signal = column(vec![0.0, 1.0, 0.0, -1.0, 0.0, 1.0, 0.0, -1.0, 0.0]);
        let result = find_cycles_full(&signal, RowRange::new(0, 8), 0.0).unwrap();
        assert_eq!(result.row_initial, 0);
        assert_eq!(result.spans[0], CycleSpan { row_initial: 0, row_final: 4 });

        assert_eq!(result.count, 1);

        let last = find_cycles_last(&signal, RowRange::new(0, 8), 0.0, 1).unwrap();
        assert_eq!((last.row_initial, last.row_final), (0, 4));
    }

    #[test]
    fn test_plateau_on_center_crosses_once() {
        let signal = column(vec![1.0, 0.0, 0.0, 0.0, -1.0, 1.0, -1.0, 1.0]);
        let result = find_cycles_full(&signal, RowRange::new(0, 7), 0.0).unwrap();
        // Only leaving the plateau crosses, from its last sample
        assert_eq!(result.row_initial, 3);
        assert_eq!(result.count, 1);
        assert_eq!(result.spans, vec![CycleSpan { row_initial: 3, row_final: 5 }]);
    }

    #[test]
    fn test_search_extends_one_row_outside_range() {
        let signal = column(vec![1.0, -1.0, -2.0, -1.0, 1.0, 2.0]);
        // The first crossing sits between rows 0 and 1, just before the range
        let result = find_cycles_full(&signal, RowRange::new(1, 4), 0.0).unwrap();
        assert_eq!(result.row_initial, 0);
        assert_eq!(result.count, 1);
    }

    #[test]
    fn test_no_crossing_fails() {
        let flat = column(vec![1.0, 2.0, 3.0]);
        assert!(matches!(
            find_cycles_full(&flat, RowRange::new(0, 2), 0.0),
            Err(CycleError::NoInitialCrossing { .. })
        ));
    }

    #[test]
    fn test_too_few_cycles_fails() {
        let signal = sine(20, 2, 0.3);
        let range = RowRange::all(signal.values.len());
        assert_eq!(
            find_cycles_first(&signal, range, 0.0, 5),
            Err(CycleError::RequestedCyclesUnavailable {
                column: "fy".to_string(),
                requested: 5,
                found: 2,
            })
        );
        assert!(matches!(
            find_cycles_last(&signal, range, 0.0, 5),
            Err(CycleError::RequestedCyclesUnavailable { found: 2, .. })
        ));
    }

    #[test]
    fn test_invalid_requests() {
        let signal = column(vec![1.0, -1.0, 1.0]);
        assert_eq!(
            find_cycles_first(&signal, RowRange::new(0, 2), 0.0, 0),
            Err(CycleError::ZeroCyclesRequested)
        );
        assert!(matches!(
            find_cycles_full(&signal, RowRange::new(0, 3), 0.0),
            Err(CycleError::InvalidRowRange { rows: 3, .. })
        ));
    }

    #[test]
    fn test_mode_dispatch() {
        let signal = sine(20, 4, 0.3);
        let range = RowRange::all(signal.values.len());
        assert_eq!(
            find_cycles(&signal, range, 0.0, CycleMode::First(1)).unwrap(),
            find_cycles_first(&signal, range, 0.0, 1).unwrap()
        );
        assert_eq!(
            find_cycles(&signal, range, 0.0, CycleMode::Full).unwrap().count,
            4
        );
    }

    #[test]
    fn test_cycle_stats() {
        let signal = column(vec![1.0, -1.0, 2.0, -2.0, 1.0]);
        let result = find_cycles_full(&signal, RowRange::new(0, 4), 0.0).unwrap();
        assert_eq!(result.count, 2);
        let stats = CycleStats::from_result(&signal, &result);
        assert_eq!(stats.peaks.len(), 2);
        assert_eq!(stats.troughs.len(), 2);
        assert!(stats.mean_peak.unwrap() >= stats.mean_trough.unwrap());
    }
}
