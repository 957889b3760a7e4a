//! Typed column store returned by the loader.
//!
//! A dataset owns at most one integer column and any number of real
//! columns, all of the same length. Columns are addressed by their position
//! in the source file or by header name.

use crate::error::{ColDataError, Result};
use crate::models::{
    ColumnRef, ColumnSelector, Delimitation, IntegerColumn, RealColumn, TimestepRange,
};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct Dataset {
    source: PathBuf,
    delimitation: Delimitation,
    row_total: usize,
    column_total: usize,
    integer: Option<IntegerColumn>,
    reals: Vec<RealColumn>,
    timestep: OnceLock<Option<TimestepRange>>,
}

impl Dataset {
    /// Assemble a dataset from fully populated columns
    pub(crate) fn from_parts(
        source: PathBuf,
        delimitation: Delimitation,
        row_total: usize,
        column_total: usize,
        integer: Option<IntegerColumn>,
        reals: Vec<RealColumn>,
    ) -> Self {
        Self {
            source,
            delimitation,
            row_total,
            column_total,
            integer,
            reals,
            timestep: OnceLock::new(),
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Separation style detected in the data body
    pub fn delimitation(&self) -> Delimitation {
        self.delimitation
    }

    pub fn row_total(&self) -> usize {
        self.row_total
    }

    pub fn column_total(&self) -> usize {
        self.column_total
    }

    pub fn integer_column(&self) -> Option<&IntegerColumn> {
        self.integer.as_ref()
    }

    pub fn real_columns(&self) -> &[RealColumn] {
        &self.reals
    }

    /// Every column in source file order
    pub fn columns(&self) -> Vec<ColumnRef<'_>> {
        let mut columns: Vec<ColumnRef<'_>> = self
            .integer
            .iter()
            .map(ColumnRef::Integer)
            .chain(self.reals.iter().map(ColumnRef::Real))
            .collect();
        columns.sort_by_key(ColumnRef::index);
        columns
    }

    /// Column names in source file order
    pub fn column_names(&self) -> Vec<&str> {
        self.columns().iter().map(ColumnRef::name).collect()
    }

    pub fn column_by_index(&self, index: usize) -> Option<ColumnRef<'_>> {
        if let Some(column) = self.integer.as_ref().filter(|c| c.index == index) {
            return Some(ColumnRef::Integer(column));
        }
        self.reals
            .iter()
            .find(|column| column.index == index)
            .map(ColumnRef::Real)
    }

    /// Look up a column by name.
    ///
    /// A name may be shared by the integer column and a real column; the
    /// left-most of the two is returned.
    pub fn column_by_name(&self, name: &str) -> Option<ColumnRef<'_>> {
        self.columns().into_iter().find(|column| column.name() == name)
    }

    /// Resolve a selector to a real column
    pub fn real_column(&self, selector: &ColumnSelector) -> Result<&RealColumn> {
        let found = match selector {
            ColumnSelector::Index(index) => self.column_by_index(*index),
            ColumnSelector::Name(name) => self
                .reals
                .iter()
                .find(|column| &column.name == name)
                .map(ColumnRef::Real)
                .or_else(|| self.column_by_name(name)),
        };

        match found {
            Some(ColumnRef::Real(column)) => Ok(column),
            Some(ColumnRef::Integer(column)) => Err(ColDataError::IntegerColumnSelected {
                column: column.name.clone(),
            }),
            None => Err(ColDataError::column_not_found(selector.to_string())),
        }
    }

    /// Monotonicity summary of the integer column, computed once
    pub fn timestep_info(&self) -> Option<TimestepRange> {
        *self.timestep.get_or_init(|| {
            let column = self.integer.as_ref()?;
            let range = TimestepRange::from_values(&column.values)?;
            if !range.consistent {
                warn!(
                    "Timestep column '{}' is not strictly increasing; timestep ranges unavailable",
                    column.name
                );
            }
            Some(range)
        })
    }

    /// First and last timestep, only for a consistent integer column
    pub fn timestep_range(&self) -> Option<(i64, i64)> {
        self.timestep_info()
            .filter(|range| range.consistent)
            .map(|range| (range.first, range.last))
    }

    /// Row holding exactly `timestep`, only for a consistent integer column
    pub fn row_for_timestep(&self, timestep: i64) -> Option<usize> {
        self.timestep_range()?;
        let column = self.integer.as_ref()?;
        column.values.binary_search(&timestep).ok()
    }

    /// Timestep value stored at `row`, only for a consistent integer column
    pub fn timestep_at(&self, row: usize) -> Option<i64> {
        self.timestep_range()?;
        self.integer.as_ref()?.values.get(row).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::parse_str;

    fn sample() -> Dataset {
        parse_str("step fx fy\n1 0.0 1.0\n2 0.5 -1.0\n4 1.0 1.0\n", ",").unwrap()
    }

    #[test]
    fn test_lookup_by_index_and_name() {
        let dataset = sample();
        assert_eq!(dataset.column_total(), 3);
        assert_eq!(dataset.column_names(), vec!["step", "fx", "fy"]);

        let step = dataset.column_by_index(0).unwrap();
        assert_eq!(step.name(), "step");
        assert!(step.as_real().is_none());

        let fy = dataset.column_by_name("fy").unwrap();
        assert_eq!(fy.index(), 2);
        assert_eq!(fy.as_real().unwrap().values, vec![1.0, -1.0, 1.0]);

        assert!(dataset.column_by_index(3).is_none());
        assert!(dataset.column_by_name("fz").is_none());
    }

    #[test]
    fn test_real_column_resolution() {
        let dataset = sample();
        let fx = dataset
            .real_column(&ColumnSelector::Name("fx".to_string()))
            .unwrap();
        assert_eq!(fx.index, 1);
        assert!(matches!(
            dataset.real_column(&ColumnSelector::Index(0)),
            Err(ColDataError::IntegerColumnSelected { .. })
        ));
        assert!(matches!(
            dataset.real_column(&ColumnSelector::Name("missing".to_string())),
            Err(ColDataError::ColumnNotFound { .. })
        ));
    }

    #[test]
    fn test_timestep_queries() {
        let dataset = sample();
        assert_eq!(dataset.timestep_range(), Some((1, 4)));
        assert_eq!(dataset.row_for_timestep(2), Some(1));
        assert_eq!(dataset.row_for_timestep(3), None);
        assert_eq!(dataset.timestep_at(2), Some(4));
    }

    #[test]
    fn test_inconsistent_timesteps_are_flagged() {
        let dataset = parse_str("step fx\n3 0.0\n2 1.0\n", ",").unwrap();
        let info = dataset.timestep_info().unwrap();
        assert!(!info.consistent);
        assert!(dataset.integer_column().is_some());
        assert_eq!(dataset.timestep_range(), None);
        assert_eq!(dataset.row_for_timestep(3), None);
    }

    #[test]
    fn test_shared_name_across_kinds() {
        let dataset = parse_str("t = step step\n1 0.5\n2 0.7\n", ",").unwrap();
        assert_eq!(dataset.column_by_name("step").unwrap().index(), 0);
        let real = dataset
            .real_column(&ColumnSelector::Name("step".to_string()))
            .unwrap();
        assert_eq!(real.index, 1);
    }
}
