//! Checks a selection of variables against an instance.

use std::collections::BTreeSet;

use crate::error::{Axis, CoverError, Result};
use crate::matrix::BinaryMatrix;
use crate::registry::VariableId;

/// Rows that no column covers.
pub fn zero_rows(matrix: &BinaryMatrix) -> Vec<usize> {
    matrix
        .rows()
        .enumerate()
        .filter(|(_, row)| row.iter().all(|&v| v == 0))
        .map(|(i, _)| i)
        .collect()
}

/// Rows of `matrix` not covered by any column in `selection`.
///
/// `matrix` must be the instance as loaded, so that column `j` is
/// variable `j`.
pub fn uncovered_rows(matrix: &BinaryMatrix, selection: &BTreeSet<VariableId>) -> Result<Vec<usize>> {
    if let Some(&id) = selection.iter().find(|&&id| id >= matrix.ncols()) {
        return Err(CoverError::Index {
            axis: Axis::Column,
            index: id,
            len: matrix.ncols(),
        });
    }
    Ok(matrix
        .rows()
        .enumerate()
        .filter(|(_, row)| selection.iter().all(|&j| row[j] == 0))
        .map(|(i, _)| i)
        .collect())
}

/// True when `selection` covers every row that some column covers.
pub fn is_cover(matrix: &BinaryMatrix, selection: &BTreeSet<VariableId>) -> Result<bool> {
    let zero = zero_rows(matrix);
    Ok(uncovered_rows(matrix, selection)?
        .iter()
        .all(|i| zero.binary_search(i).is_ok()))
}
