//! Reduction rules that shrink a set cover instance without changing its
//! optimal cover size.
//!
//! Three rules are applied, always in this order by the preprocessing loop:
//!
//! 1. **Forced selection**: a row covered by exactly one column makes that
//!    column mandatory. The column is selected and every row it covers is
//!    removed.
//! 2. **Row domination**: if every column covering row B also covers row A,
//!    satisfying B satisfies A, so A is removed.
//! 3. **Column domination**: if column A covers every row column B covers,
//!    B is never better than A, so B is removed (excluded, not selected).
//!
//! Rules 2 and 3 visit lines in descending order of their number of ones,
//! ties broken by ascending current index, and only ever remove the line
//! that has no more ones than the one it is compared against.

use std::cmp::Reverse;
use std::collections::BTreeSet;

use crate::config::ZeroRowPolicy;
use crate::error::{CoverError, Result};
use crate::matrix::BinaryMatrix;
use crate::registry::{VariableId, VariableRegistry};

/// Classification of a row by how many columns cover it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowClass {
    /// No column covers the row
    Zero,
    /// Exactly one column covers the row; holds its current index
    Unit(usize),
    /// More than one column covers the row
    Multi,
}

pub fn classify_row(row: &[u8]) -> RowClass {
    debug_assert!(row.iter().all(|&v| v <= 1), "matrix holds a non-binary entry");
    let mut ones = row.iter().enumerate().filter(|&(_, &v)| v == 1);
    match (ones.next(), ones.next()) {
        (None, _) => RowClass::Zero,
        (Some((j, _)), None) => RowClass::Unit(j),
        (Some(_), Some(_)) => RowClass::Multi,
    }
}

/// True when `covering` has a one everywhere `covered` has a one.
///
/// Both slices must have the same length.
pub fn covers(covering: &[u8], covered: &[u8]) -> bool {
    debug_assert_eq!(covering.len(), covered.len());
    covering.iter().zip(covered).all(|(&a, &b)| b <= a)
}

/// Line indices sorted by descending sum, ties by ascending index.
pub fn order_by_sum_descending(sums: &[usize]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..sums.len()).collect();
    // stable sort keeps equal sums in ascending index order
    order.sort_by_key(|&idx| Reverse(sums[idx]));
    order
}

/// Applies the reduction rules to a matrix and its registry.
#[derive(Debug, Clone, Copy, Default)]
pub struct Reducer {
    zero_rows: ZeroRowPolicy,
}

impl Reducer {
    pub fn new(zero_rows: ZeroRowPolicy) -> Self {
        Self { zero_rows }
    }

    /// Rule 1: select the unique coverer of every unit row.
    ///
    /// Removes the unit rows, every row covered by a forced column, and the
    /// forced columns themselves. All-zero rows are removed too under
    /// [`ZeroRowPolicy::Drop`] and fail the call under
    /// [`ZeroRowPolicy::Reject`].
    ///
    /// Returns the original identifiers of the forced variables; the caller
    /// adds them to its solution. An empty set means no variable was forced.
    pub fn forced_selection(
        &self,
        matrix: &mut BinaryMatrix,
        registry: &mut VariableRegistry,
    ) -> Result<BTreeSet<VariableId>> {
        let mut rows_to_remove = BTreeSet::new();
        let mut forced = BTreeSet::new();
        let mut zero_rows = Vec::new();

        for (i, row) in matrix.rows().enumerate() {
            match classify_row(row) {
                RowClass::Unit(j) => {
                    forced.insert(j);
                    rows_to_remove.insert(i);
                }
                RowClass::Zero => {
                    zero_rows.push(i);
                    rows_to_remove.insert(i);
                }
                RowClass::Multi => {}
            }
        }

        if !zero_rows.is_empty() {
            match self.zero_rows {
                ZeroRowPolicy::Reject => return Err(CoverError::Infeasible { rows: zero_rows }),
                ZeroRowPolicy::Drop => {
                    log::warn!("Dropping {} uncoverable rows: {:?}", zero_rows.len(), zero_rows);
                }
            }
        }

        for &j in &forced {
            rows_to_remove.extend(matrix.rows_covered_by(j)?);
        }

        matrix.remove_rows(&rows_to_remove)?;
        matrix.remove_columns(&forced)?;
        let selected = registry.remove_positions(&forced)?;

        if !selected.is_empty() {
            log::debug!(
                "Forced selection: selected {:?}, removed {} rows",
                selected,
                rows_to_remove.len()
            );
        }
        Ok(selected)
    }

    /// Rule 2: remove every row whose covering columns include all the
    /// covering columns of some other row.
    ///
    /// Returns whether any row was removed.
    pub fn row_domination(&self, matrix: &mut BinaryMatrix) -> Result<bool> {
        let order = order_by_sum_descending(&matrix.row_sums());
        let mut marked = BTreeSet::new();

        for (n, &k) in order.iter().enumerate() {
            let row_k = matrix.row(k)?;
            for &l in &order[n + 1..] {
                if covers(row_k, matrix.row(l)?) {
                    marked.insert(k);
                    break;
                }
            }
        }

        matrix.remove_rows(&marked)?;
        if !marked.is_empty() {
            log::debug!("Row domination: removed {} rows", marked.len());
        }
        Ok(!marked.is_empty())
    }

    /// Rule 3: remove every column whose covered rows are a subset of
    /// another column's.
    ///
    /// Returns the original identifiers of the removed variables. They are
    /// excluded from the cover, not selected.
    pub fn column_domination(
        &self,
        matrix: &mut BinaryMatrix,
        registry: &mut VariableRegistry,
    ) -> Result<BTreeSet<VariableId>> {
        let order = order_by_sum_descending(&matrix.column_sums());
        let columns = (0..matrix.ncols())
            .map(|j| matrix.column(j))
            .collect::<Result<Vec<_>>>()?;
        let mut marked = BTreeSet::new();

        for (n, &k) in order.iter().enumerate() {
            for &l in &order[n + 1..] {
                if !marked.contains(&l) && covers(&columns[k], &columns[l]) {
                    marked.insert(l);
                }
            }
        }

        matrix.remove_columns(&marked)?;
        let removed = registry.remove_positions(&marked)?;
        if !removed.is_empty() {
            log::debug!("Column domination: excluded {:?}", removed);
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(rows: &[&[u8]]) -> BinaryMatrix {
        BinaryMatrix::from_rows(rows.iter().copied()).unwrap()
    }

    fn set(ids: &[usize]) -> BTreeSet<usize> {
        ids.iter().copied().collect()
    }

    #[test]
    fn test_classify_row() {
        assert_eq!(classify_row(&[0, 0, 0]), RowClass::Zero);
        assert_eq!(classify_row(&[0, 0, 1]), RowClass::Unit(2));
        assert_eq!(classify_row(&[1, 0, 1]), RowClass::Multi);
        assert_eq!(classify_row(&[]), RowClass::Zero);
    }

    #[test]
    fn test_covers() {
        assert!(covers(&[1, 1, 0], &[1, 0, 0]));
        assert!(covers(&[1, 1, 0], &[1, 1, 0]));
        assert!(covers(&[1, 0, 1], &[0, 0, 0]));
        assert!(!covers(&[1, 0, 0], &[1, 1, 0]));
        assert!(!covers(&[0, 1, 0], &[1, 0, 0]));
    }

    #[test]
    fn test_order_by_sum_descending_breaks_ties_by_index() {
        assert_eq!(order_by_sum_descending(&[1, 3, 1, 3, 2]), vec![1, 3, 4, 0, 2]);
        assert!(order_by_sum_descending(&[]).is_empty());
    }

    #[test]
    fn test_forced_selection_unit_row() {
        // row 0 is only covered by column 2; column 2 also covers row 2
        let mut m = matrix(&[
            &[0, 0, 1, 0],
            &[1, 1, 0, 0],
            &[0, 1, 1, 1],
            &[1, 0, 0, 1],
        ]);
        let mut registry = VariableRegistry::identity(4);

        let forced = Reducer::default().forced_selection(&mut m, &mut registry).unwrap();

        assert_eq!(forced, set(&[2]));
        assert_eq!(registry.ids(), &[0, 1, 3]);
        assert_eq!(m.nrows(), 2);
        assert_eq!(m.row(0).unwrap(), &[1, 1, 0]);
        assert_eq!(m.row(1).unwrap(), &[1, 0, 1]);
    }

    #[test]
    fn test_forced_selection_translates_through_registry() {
        let mut m = matrix(&[&[1, 0], &[1, 1]]);
        let mut registry = VariableRegistry::identity(5);
        registry.remove_positions(&set(&[0, 2, 3])).unwrap();
        assert_eq!(registry.ids(), &[1, 4]);

        let forced = Reducer::default().forced_selection(&mut m, &mut registry).unwrap();

        assert_eq!(forced, set(&[1]));
        assert_eq!(registry.ids(), &[4]);
        assert!(m.is_empty());
    }

    #[test]
    fn test_forced_selection_no_unit_rows() {
        let mut m = matrix(&[&[1, 1, 0], &[0, 1, 1]]);
        let before = m.clone();
        let mut registry = VariableRegistry::identity(3);

        let forced = Reducer::default().forced_selection(&mut m, &mut registry).unwrap();

        assert!(forced.is_empty());
        assert_eq!(m, before);
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_forced_selection_rejects_zero_rows() {
        let mut m = matrix(&[&[1, 1], &[0, 0], &[0, 0]]);
        let mut registry = VariableRegistry::identity(2);

        let err = Reducer::new(ZeroRowPolicy::Reject)
            .forced_selection(&mut m, &mut registry)
            .unwrap_err();

        assert!(matches!(err, CoverError::Infeasible { ref rows } if rows == &vec![1, 2]));
    }

    #[test]
    fn test_forced_selection_drops_zero_rows() {
        let mut m = matrix(&[&[1, 1], &[0, 0]]);
        let mut registry = VariableRegistry::identity(2);

        let forced = Reducer::new(ZeroRowPolicy::Drop)
            .forced_selection(&mut m, &mut registry)
            .unwrap();

        assert!(forced.is_empty());
        assert_eq!(m.nrows(), 1);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_row_domination_removes_superset_row() {
        // row 1 is covered by {0,1,2} which includes row 0's {0,1}
        let mut m = matrix(&[&[1, 1, 0], &[1, 1, 1], &[0, 1, 1]]);

        assert!(Reducer::default().row_domination(&mut m).unwrap());
        assert_eq!(m.nrows(), 2);
        assert_eq!(m.row(0).unwrap(), &[1, 1, 0]);
        assert_eq!(m.row(1).unwrap(), &[0, 1, 1]);
    }

    #[test]
    fn test_row_domination_keeps_one_of_identical_rows() {
        let mut m = matrix(&[&[1, 0, 1], &[1, 0, 1], &[1, 0, 1]]);

        assert!(Reducer::default().row_domination(&mut m).unwrap());
        assert_eq!(m.nrows(), 1);
        assert_eq!(m.row(0).unwrap(), &[1, 0, 1]);
    }

    #[test]
    fn test_row_domination_no_change() {
        let mut m = matrix(&[&[1, 1, 0], &[0, 1, 1], &[1, 0, 1]]);
        assert!(!Reducer::default().row_domination(&mut m).unwrap());
        assert_eq!(m.nrows(), 3);
    }

    #[test]
    fn test_column_domination_dominated_by_full_column() {
        let mut m = matrix(&[&[1, 0, 1], &[1, 1, 1], &[0, 1, 1]]);
        let mut registry = VariableRegistry::identity(3);

        let removed = Reducer::default()
            .column_domination(&mut m, &mut registry)
            .unwrap();

        assert_eq!(removed, set(&[0, 1]));
        assert_eq!(registry.ids(), &[2]);
        assert_eq!(m.ncols(), 1);
        assert_eq!(m.column(0).unwrap(), vec![1, 1, 1]);
    }

    #[test]
    fn test_column_domination_keeps_lowest_of_identical_columns() {
        let mut m = matrix(&[&[0, 1, 1], &[0, 1, 1]]);
        let mut registry = VariableRegistry::identity(3);

        let removed = Reducer::default()
            .column_domination(&mut m, &mut registry)
            .unwrap();

        // column 0 is empty, columns 1 and 2 are identical
        assert_eq!(removed, set(&[0, 2]));
        assert_eq!(registry.ids(), &[1]);
    }

    #[test]
    fn test_column_domination_incomparable_columns() {
        let mut m = matrix(&[&[1, 0], &[0, 1]]);
        let mut registry = VariableRegistry::identity(2);

        let removed = Reducer::default()
            .column_domination(&mut m, &mut registry)
            .unwrap();

        assert!(removed.is_empty());
        assert_eq!(m.ncols(), 2);
    }
}
