//! Fixed-point application of the reduction rules.

use std::collections::BTreeSet;
use std::time::Instant;

use serde::Serialize;

use crate::config::ZeroRowPolicy;
use crate::error::{CoverError, Result};
use crate::matrix::BinaryMatrix;
use crate::reduction::Reducer;
use crate::registry::{VariableId, VariableRegistry};

/// Outcome of preprocessing. The reduced matrix itself is mutated in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Preprocessed {
    /// Variables still present in the reduced matrix, by current column
    pub kept: VariableRegistry,
    /// Every variable removed from the matrix (`forced` ∪ `dominated`)
    pub removed: BTreeSet<VariableId>,
    /// Variables already in the solution
    pub selected: BTreeSet<VariableId>,
    /// Variables selected by forced selection
    pub forced: BTreeSet<VariableId>,
    /// Variables excluded by column domination
    pub dominated: BTreeSet<VariableId>,
    /// Restrictions left in the reduced matrix
    pub remaining_rows: usize,
    /// Number of full rule passes, including the final one that changed nothing
    pub passes: usize,
}

/// What a single pass of the three rules did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Pass {
    forced: BTreeSet<VariableId>,
    rows_removed: bool,
    dominated: BTreeSet<VariableId>,
}

impl Pass {
    fn changed(&self) -> bool {
        !self.forced.is_empty() || self.rows_removed || !self.dominated.is_empty()
    }
}

/// Runs forced selection, row domination and column domination, in that
/// order, until a full pass leaves the instance unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct Preprocessor {
    reducer: Reducer,
}

impl Preprocessor {
    pub fn new(zero_rows: ZeroRowPolicy) -> Self {
        Self {
            reducer: Reducer::new(zero_rows),
        }
    }

    /// Preprocess a freshly loaded matrix; column `j` is variable `j`.
    pub fn run(&self, matrix: &mut BinaryMatrix) -> Result<Preprocessed> {
        let registry = VariableRegistry::identity(matrix.ncols());
        self.run_with_registry(matrix, registry)
    }

    /// Preprocess a matrix whose columns are already mapped by `registry`.
    pub fn run_with_registry(
        &self,
        matrix: &mut BinaryMatrix,
        mut registry: VariableRegistry,
    ) -> Result<Preprocessed> {
        if registry.len() != matrix.ncols() {
            return Err(CoverError::RegistryMismatch {
                registry: registry.len(),
                columns: matrix.ncols(),
            });
        }

        let start = Instant::now();
        let (rows_before, cols_before) = (matrix.nrows(), matrix.ncols());
        let mut forced = BTreeSet::new();
        let mut dominated = BTreeSet::new();
        let mut passes = 0;

        loop {
            passes += 1;
            let pass = self.pass(matrix, &mut registry)?;
            log::debug!(
                "Pass {}: {} forced, rows removed: {}, {} dominated ({}x{} left)",
                passes,
                pass.forced.len(),
                pass.rows_removed,
                pass.dominated.len(),
                matrix.nrows(),
                matrix.ncols()
            );
            let changed = pass.changed();
            forced.extend(pass.forced);
            dominated.extend(pass.dominated);
            if !changed {
                break;
            }
        }

        log::info!(
            "Preprocessing completed in {:.3} seconds after {} passes",
            start.elapsed().as_secs_f64(),
            passes
        );
        log::info!(
            "Reduced {}x{} to {}x{}: {} variables forced, {} dominated",
            rows_before,
            cols_before,
            matrix.nrows(),
            matrix.ncols(),
            forced.len(),
            dominated.len()
        );

        Ok(Preprocessed {
            kept: registry,
            removed: forced.union(&dominated).copied().collect(),
            selected: forced.clone(),
            forced,
            dominated,
            remaining_rows: matrix.nrows(),
            passes,
        })
    }

    fn pass(&self, matrix: &mut BinaryMatrix, registry: &mut VariableRegistry) -> Result<Pass> {
        let forced = self.reducer.forced_selection(matrix, registry)?;
        let rows_removed = self.reducer.row_domination(matrix)?;
        let dominated = self.reducer.column_domination(matrix, registry)?;
        Ok(Pass {
            forced,
            rows_removed,
            dominated,
        })
    }
}
