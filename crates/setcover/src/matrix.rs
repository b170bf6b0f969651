//! Binary incidence matrix.
//!
//! Rows are the elements that must be covered ("restrictions"), columns are
//! the candidate sets ("variables"). Entries are stored row-major as `u8`
//! values that are always `0` or `1`; every constructor and mutator checks
//! this before touching the buffer.

use std::collections::BTreeSet;
use std::fmt;

use crate::error::{Axis, CoverError, Result};

/// A mutable 0/1 matrix with batch row and column removal.
///
/// Removing rows or columns renumbers every later row or column, so
/// indices obtained before a mutating call must not be reused after it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BinaryMatrix {
    nrows: usize,
    ncols: usize,
    data: Vec<u8>,
}

impl BinaryMatrix {
    /// Create a matrix with `ncols` columns and no rows.
    pub fn new(ncols: usize) -> Self {
        Self {
            nrows: 0,
            ncols,
            data: Vec::new(),
        }
    }

    /// Build a matrix from a sequence of rows.
    ///
    /// The first row fixes the column count; every later row must have the
    /// same length.
    pub fn from_rows<I, R>(rows: I) -> Result<Self>
    where
        I: IntoIterator<Item = R>,
        R: AsRef<[u8]>,
    {
        let mut matrix: Option<Self> = None;
        for (line, row) in rows.into_iter().enumerate() {
            let row = row.as_ref();
            let m = matrix.get_or_insert_with(|| Self::new(row.len()));
            if row.len() != m.ncols {
                return Err(CoverError::RaggedLine {
                    line,
                    expected: m.ncols,
                    found: row.len(),
                });
            }
            m.check_entries(row, |k| (line, k))?;
            m.data.extend_from_slice(row);
            m.nrows += 1;
        }
        Ok(matrix.unwrap_or_default())
    }

    pub fn nrows(&self) -> usize {
        self.nrows
    }

    pub fn ncols(&self) -> usize {
        self.ncols
    }

    /// True when no rows remain, i.e. every element has been covered.
    ///
    /// A matrix with rows but no ones is *not* empty.
    pub fn is_empty(&self) -> bool {
        self.nrows == 0
    }

    /// Entry at row `i`, column `j`.
    pub fn get(&self, i: usize, j: usize) -> Result<u8> {
        self.check_row(i)?;
        self.check_column(j)?;
        Ok(self.data[i * self.ncols + j])
    }

    /// Row `i` as a slice of 0/1 values.
    pub fn row(&self, i: usize) -> Result<&[u8]> {
        self.check_row(i)?;
        Ok(self.row_unchecked(i))
    }

    /// Column `j` materialized top to bottom.
    pub fn column(&self, j: usize) -> Result<Vec<u8>> {
        Ok(self.column_iter(j)?.collect())
    }

    /// Iterate column `j` top to bottom without allocating.
    pub fn column_iter(&self, j: usize) -> Result<impl Iterator<Item = u8> + '_> {
        self.check_column(j)?;
        Ok((0..self.nrows).map(move |i| self.data[i * self.ncols + j]))
    }

    /// Iterate all rows in order.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> + '_ {
        (0..self.nrows).map(move |i| self.row_unchecked(i))
    }

    pub fn row_sum(&self, i: usize) -> Result<usize> {
        Ok(ones(self.row(i)?.iter().copied()))
    }

    pub fn column_sum(&self, j: usize) -> Result<usize> {
        Ok(ones(self.column_iter(j)?))
    }

    /// Number of ones in every row, indexed by current row position.
    pub fn row_sums(&self) -> Vec<usize> {
        self.rows().map(|row| ones(row.iter().copied())).collect()
    }

    /// Number of ones in every column, indexed by current column position.
    pub fn column_sums(&self) -> Vec<usize> {
        let mut sums = vec![0usize; self.ncols];
        for row in self.rows() {
            for (sum, &v) in sums.iter_mut().zip(row) {
                *sum += v as usize;
            }
        }
        sums
    }

    /// Current indices of the rows in which column `j` has a one.
    pub fn rows_covered_by(&self, j: usize) -> Result<BTreeSet<usize>> {
        Ok(self
            .column_iter(j)?
            .enumerate()
            .filter(|&(_, v)| v == 1)
            .map(|(i, _)| i)
            .collect())
    }

    /// Append one or more rows.
    ///
    /// `values` must hold a whole number of rows: its length has to be a
    /// non-zero multiple of the column count.
    pub fn append_row(&mut self, values: &[u8]) -> Result<()> {
        if self.ncols == 0 || values.is_empty() || values.len() % self.ncols != 0 {
            return Err(CoverError::Shape {
                axis: Axis::Row,
                len: values.len(),
                expected: self.ncols,
            });
        }
        let (nrows, ncols) = (self.nrows, self.ncols);
        self.check_entries(values, |k| (nrows + k / ncols, k % ncols))?;
        self.data.extend_from_slice(values);
        self.nrows += values.len() / self.ncols;
        Ok(())
    }

    /// Append one or more columns.
    ///
    /// `values` is read column by column: the first `nrows` values form the
    /// first new column, the next `nrows` the second, and so on.
    pub fn append_column(&mut self, values: &[u8]) -> Result<()> {
        if self.nrows == 0 || values.is_empty() || values.len() % self.nrows != 0 {
            return Err(CoverError::Shape {
                axis: Axis::Column,
                len: values.len(),
                expected: self.nrows,
            });
        }
        let (nrows, ncols) = (self.nrows, self.ncols);
        self.check_entries(values, |k| (k % nrows, ncols + k / nrows))?;

        let added = values.len() / nrows;
        let mut data = Vec::with_capacity(nrows * (ncols + added));
        for i in 0..nrows {
            data.extend_from_slice(self.row_unchecked(i));
            data.extend((0..added).map(|c| values[c * nrows + i]));
        }
        self.data = data;
        self.ncols += added;
        Ok(())
    }

    /// Remove every row in `rows`, numbered as before the call.
    ///
    /// Fails without modifying the matrix if any index is out of range.
    pub fn remove_rows(&mut self, rows: &BTreeSet<usize>) -> Result<()> {
        match rows.last() {
            Some(&last) => self.check_row(last)?,
            None => return Ok(()),
        }

        let mut data = Vec::with_capacity((self.nrows - rows.len()) * self.ncols);
        for (i, row) in self.rows().enumerate() {
            if !rows.contains(&i) {
                data.extend_from_slice(row);
            }
        }
        self.data = data;
        self.nrows -= rows.len();
        Ok(())
    }

    /// Remove every column in `columns`, numbered as before the call.
    ///
    /// Fails without modifying the matrix if any index is out of range.
    pub fn remove_columns(&mut self, columns: &BTreeSet<usize>) -> Result<()> {
        match columns.last() {
            Some(&last) => self.check_column(last)?,
            None => return Ok(()),
        }

        let keep: Vec<bool> = (0..self.ncols).map(|j| !columns.contains(&j)).collect();
        let ncols = self.ncols - columns.len();
        let mut data = Vec::with_capacity(self.nrows * ncols);
        for row in self.rows() {
            data.extend(row.iter().zip(&keep).filter_map(|(&v, &k)| k.then_some(v)));
        }
        self.data = data;
        self.ncols = ncols;
        Ok(())
    }

    fn row_unchecked(&self, i: usize) -> &[u8] {
        &self.data[i * self.ncols..(i + 1) * self.ncols]
    }

    fn check_row(&self, i: usize) -> Result<()> {
        if i >= self.nrows {
            return Err(CoverError::Index {
                axis: Axis::Row,
                index: i,
                len: self.nrows,
            });
        }
        Ok(())
    }

    fn check_column(&self, j: usize) -> Result<()> {
        if j >= self.ncols {
            return Err(CoverError::Index {
                axis: Axis::Column,
                index: j,
                len: self.ncols,
            });
        }
        Ok(())
    }

    /// `position` maps an offset in `values` to the (row, column) it would occupy.
    fn check_entries<F>(&self, values: &[u8], position: F) -> Result<()>
    where
        F: Fn(usize) -> (usize, usize),
    {
        match values.iter().position(|&v| v > 1) {
            Some(k) => {
                let (row, column) = position(k);
                Err(CoverError::InvalidEntry {
                    row,
                    column,
                    found: values[k].to_string(),
                })
            }
            None => Ok(()),
        }
    }
}

fn ones(values: impl Iterator<Item = u8>) -> usize {
    values.filter(|&v| v == 1).count()
}

impl fmt::Display for BinaryMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            let mut first = true;
            for v in row {
                if !first {
                    write!(f, " ")?;
                }
                write!(f, "{}", v)?;
                first = false;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(indices: &[usize]) -> BTreeSet<usize> {
        indices.iter().copied().collect()
    }

    fn matrix(rows: &[&[u8]]) -> BinaryMatrix {
        BinaryMatrix::from_rows(rows.iter().copied()).unwrap()
    }

    fn sample() -> BinaryMatrix {
        matrix(&[&[1, 0, 1, 0], &[0, 1, 1, 0], &[1, 1, 0, 1]])
    }

    #[test]
    fn test_from_rows_dimensions() {
        let m = sample();
        assert_eq!(m.nrows(), 3);
        assert_eq!(m.ncols(), 4);
        assert!(!m.is_empty());
    }

    #[test]
    fn test_from_rows_rejects_ragged() {
        let err = BinaryMatrix::from_rows([&[1u8, 0][..], &[1u8][..]]).unwrap_err();
        assert!(matches!(
            err,
            CoverError::RaggedLine { line: 1, expected: 2, found: 1 }
        ));
    }

    #[test]
    fn test_from_rows_rejects_non_binary() {
        let err = BinaryMatrix::from_rows([[1u8, 0], [2, 1]]).unwrap_err();
        match err {
            CoverError::InvalidEntry { row, column, found } => {
                assert_eq!((row, column), (1, 0));
                assert_eq!(found, "2");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_from_rows_empty() {
        let m = BinaryMatrix::from_rows(Vec::<Vec<u8>>::new()).unwrap();
        assert!(m.is_empty());
        assert_eq!(m.ncols(), 0);
    }

    #[test]
    fn test_row_and_column_access() {
        let m = sample();
        assert_eq!(m.row(1).unwrap(), &[0, 1, 1, 0]);
        assert_eq!(m.column(2).unwrap(), vec![1, 1, 0]);
        assert_eq!(m.get(2, 3).unwrap(), 1);
    }

    #[test]
    fn test_access_out_of_bounds() {
        let m = sample();
        assert!(matches!(
            m.row(3),
            Err(CoverError::Index { axis: Axis::Row, index: 3, len: 3 })
        ));
        assert!(matches!(
            m.column(4),
            Err(CoverError::Index { axis: Axis::Column, index: 4, len: 4 })
        ));
        assert!(m.get(0, 9).is_err());
    }

    #[test]
    fn test_sums() {
        let m = sample();
        assert_eq!(m.row_sums(), vec![2, 2, 3]);
        assert_eq!(m.column_sums(), vec![2, 2, 2, 1]);
        assert_eq!(m.row_sum(2).unwrap(), 3);
        assert_eq!(m.column_sum(3).unwrap(), 1);
    }

    #[test]
    fn test_rows_covered_by() {
        let m = sample();
        assert_eq!(m.rows_covered_by(0).unwrap(), set(&[0, 2]));
        assert_eq!(m.rows_covered_by(3).unwrap(), set(&[2]));
    }

    #[test]
    fn test_remove_rows_uses_pre_call_indices() {
        let mut m = sample();
        m.remove_rows(&set(&[0, 2])).unwrap();
        assert_eq!(m.nrows(), 1);
        assert_eq!(m.row(0).unwrap(), &[0, 1, 1, 0]);
    }

    #[test]
    fn test_remove_all_rows_empties_matrix() {
        let mut m = sample();
        m.remove_rows(&set(&[0, 1, 2])).unwrap();
        assert!(m.is_empty());
        assert_eq!(m.ncols(), 4);
        assert_eq!(m.column_sums(), vec![0, 0, 0, 0]);
    }

    #[test]
    fn test_remove_columns_uses_pre_call_indices() {
        let mut m = sample();
        m.remove_columns(&set(&[1, 3])).unwrap();
        assert_eq!(m.ncols(), 2);
        assert_eq!(m.row(0).unwrap(), &[1, 1]);
        assert_eq!(m.row(1).unwrap(), &[0, 1]);
        assert_eq!(m.row(2).unwrap(), &[1, 0]);
    }

    #[test]
    fn test_remove_out_of_range_leaves_matrix_untouched() {
        let mut m = sample();
        let before = m.clone();
        assert!(m.remove_rows(&set(&[1, 7])).is_err());
        assert!(m.remove_columns(&set(&[0, 4])).is_err());
        assert_eq!(m, before);
    }

    #[test]
    fn test_remove_empty_set_is_noop() {
        let mut m = sample();
        m.remove_rows(&BTreeSet::new()).unwrap();
        m.remove_columns(&BTreeSet::new()).unwrap();
        assert_eq!(m, sample());
    }

    #[test]
    fn test_append_row() {
        let mut m = BinaryMatrix::new(3);
        m.append_row(&[1, 0, 1]).unwrap();
        m.append_row(&[0, 1, 0, 1, 1, 1]).unwrap();
        assert_eq!(m.nrows(), 3);
        assert_eq!(m.row(2).unwrap(), &[1, 1, 1]);
    }

    #[test]
    fn test_append_row_shape_error() {
        let mut m = BinaryMatrix::new(3);
        assert!(matches!(
            m.append_row(&[1, 0]),
            Err(CoverError::Shape { axis: Axis::Row, len: 2, expected: 3 })
        ));
        let mut zero = BinaryMatrix::new(0);
        assert!(zero.append_row(&[1]).is_err());
    }

    #[test]
    fn test_append_row_invalid_entry_position() {
        let mut m = BinaryMatrix::new(2);
        m.append_row(&[1, 0]).unwrap();
        let err = m.append_row(&[0, 1, 1, 5]).unwrap_err();
        assert!(matches!(err, CoverError::InvalidEntry { row: 2, column: 1, .. }));
        assert_eq!(m.nrows(), 1);
    }

    #[test]
    fn test_append_column() {
        let mut m = matrix(&[&[1, 0], &[0, 1]]);
        m.append_column(&[1, 1, 0, 1]).unwrap();
        assert_eq!(m.ncols(), 4);
        assert_eq!(m.row(0).unwrap(), &[1, 0, 1, 0]);
        assert_eq!(m.row(1).unwrap(), &[0, 1, 1, 1]);
    }

    #[test]
    fn test_append_column_shape_error() {
        let mut m = matrix(&[&[1, 0], &[0, 1]]);
        assert!(matches!(
            m.append_column(&[1, 1, 0]),
            Err(CoverError::Shape { axis: Axis::Column, len: 3, expected: 2 })
        ));
        assert!(BinaryMatrix::new(2).append_column(&[1]).is_err());
    }

    #[test]
    fn test_display() {
        let m = matrix(&[&[1, 0, 1], &[0, 1, 0]]);
        assert_eq!(m.to_string(), "1 0 1\n0 1 0\n");
    }
}
