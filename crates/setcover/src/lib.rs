//! Approximate minimum set cover
//!
//! This crate selects a small family of columns of a 0/1 incidence matrix
//! such that every row has a one in at least one selected column. Rows are
//! the elements to cover ("restrictions"), columns the candidate sets
//! ("variables").
//!
//! Solving runs in two phases:
//!
//! 1. [`Preprocessor`] applies three reduction rules (forced selection, row
//!    domination, column domination) until none of them changes the matrix.
//! 2. [`Solver`] then repeatedly picks the column covering the most
//!    uncovered rows, which is the classic `H(d)`-approximation.
//!
//! ```
//! use setcover::{BinaryMatrix, Solver};
//!
//! let mut matrix: BinaryMatrix = "101\n111\n011\n".parse().unwrap();
//! let solution = Solver::default().solve_greedy(&mut matrix).unwrap();
//! assert_eq!(solution.selected.into_iter().collect::<Vec<_>>(), vec![2]);
//! ```

pub mod config;
pub mod error;
pub mod instance;
pub mod matrix;
pub mod preprocess;
pub mod reduction;
pub mod registry;
pub mod solver;
pub mod verify;

pub use config::{SolverConfig, ZeroRowPolicy};
pub use error::{Axis, CoverError, Result};
pub use instance::{parse_instance, read_instance};
pub use matrix::BinaryMatrix;
pub use preprocess::{Preprocessed, Preprocessor};
pub use reduction::Reducer;
pub use registry::{VariableId, VariableRegistry};
pub use solver::{Solution, Solver};
pub use verify::{is_cover, uncovered_rows, zero_rows};
