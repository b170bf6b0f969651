//! Reading instances from their text form.
//!
//! An instance is a sequence of lines made only of `0` and `1`, all of the
//! same length. Line `i` is restriction `i` and character `j` of every line
//! belongs to variable `j`. There is no header and there are no separators.

use std::path::Path;
use std::str::FromStr;

use crate::error::{CoverError, Result};
use crate::matrix::BinaryMatrix;

/// Parse the text form of an instance.
///
/// Blank lines are skipped and a trailing `\r` is ignored, so files written
/// on any platform parse the same way. Line numbers in errors are 0-based
/// and count the skipped lines.
pub fn parse_instance(input: &str) -> Result<BinaryMatrix> {
    let mut matrix: Option<BinaryMatrix> = None;

    for (line_no, line) in input.lines().enumerate() {
        let line = line.strip_suffix('\r').unwrap_or(line);
        if line.trim().is_empty() {
            continue;
        }

        let row = parse_line(line_no, line)?;
        match matrix.as_mut() {
            None => {
                let mut m = BinaryMatrix::new(row.len());
                m.append_row(&row)?;
                matrix = Some(m);
            }
            Some(m) if m.ncols() != row.len() => {
                return Err(CoverError::RaggedLine {
                    line: line_no,
                    expected: m.ncols(),
                    found: row.len(),
                });
            }
            Some(m) => m.append_row(&row)?,
        }
    }

    Ok(matrix.unwrap_or_default())
}

fn parse_line(line_no: usize, line: &str) -> Result<Vec<u8>> {
    line.chars()
        .enumerate()
        .map(|(column, c)| match c {
            '0' => Ok(0),
            '1' => Ok(1),
            other => Err(CoverError::InvalidEntry {
                row: line_no,
                column,
                found: other.to_string(),
            }),
        })
        .collect()
}

/// Read and parse an instance file.
pub fn read_instance(path: impl AsRef<Path>) -> Result<BinaryMatrix> {
    let content = std::fs::read_to_string(path.as_ref())?;
    let matrix = parse_instance(&content)?;
    log::debug!(
        "Loaded {}x{} instance from {}",
        matrix.nrows(),
        matrix.ncols(),
        path.as_ref().display()
    );
    Ok(matrix)
}

impl FromStr for BinaryMatrix {
    type Err = CoverError;

    fn from_str(s: &str) -> Result<Self> {
        parse_instance(s)
    }
}

impl BinaryMatrix {
    /// Read an instance file; see [`read_instance`].
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        read_instance(path)
    }
}
