use std::fmt;

use thiserror::Error;

/// Which dimension of the matrix an index refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Row,
    Column,
    /// Position in the variable registry
    Registry,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Row => write!(f, "row"),
            Axis::Column => write!(f, "column"),
            Axis::Registry => write!(f, "registry"),
        }
    }
}

#[derive(Error, Debug)]
pub enum CoverError {
    // Construction errors
    #[error("Cannot append {axis} of length {len}: not a non-zero multiple of {expected}")]
    Shape { axis: Axis, len: usize, expected: usize },

    #[error("Invalid entry {found:?} at row {row}, column {column}: entries must be 0 or 1")]
    InvalidEntry { row: usize, column: usize, found: String },

    #[error("Line {line} has length {found}, expected {expected}")]
    RaggedLine { line: usize, expected: usize, found: usize },

    // Access errors
    #[error("Tried to access {axis} {index} beyond length {len}")]
    Index { axis: Axis, index: usize, len: usize },

    #[error("Registry tracks {registry} variables but the matrix has {columns} columns")]
    RegistryMismatch { registry: usize, columns: usize },

    // Solver errors
    #[error("Instance is infeasible: rows {rows:?} cannot be covered by any column")]
    Infeasible { rows: Vec<usize> },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CoverError>;
