use std::cmp::Reverse;
use std::collections::BTreeSet;
use std::time::Instant;

use serde::Serialize;

use crate::config::{SolverConfig, ZeroRowPolicy};
use crate::error::{CoverError, Result};
use crate::matrix::BinaryMatrix;
use crate::preprocess::{Preprocessed, Preprocessor};
use crate::registry::{VariableId, VariableRegistry};
use crate::verify::zero_rows;

/// Result of a greedy solve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Solution {
    /// Every selected variable, forced or greedy
    pub selected: BTreeSet<VariableId>,
    /// Variables picked by the greedy phase, in pick order
    pub greedy_picks: Vec<VariableId>,
    /// Outcome of the preprocessing phase, if it ran
    pub preprocessing: Option<Preprocessed>,
}

impl Solution {
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }
}

/// Approximate minimum set cover solver.
///
/// Reduces the instance to a fixed point of the reduction rules, then
/// repeatedly selects the column covering the most uncovered rows until
/// every row is covered. There is no backtracking: selections are never
/// revoked and removed rows or columns never come back.
#[derive(Debug, Clone, Default)]
pub struct Solver {
    config: SolverConfig,
}

impl Solver {
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    /// Set whether the reduction rules run before the greedy phase.
    ///
    /// Enabled by default.
    pub fn with_preprocessing(mut self, preprocess: bool) -> Self {
        self.config.preprocess = preprocess;
        self
    }

    pub fn with_zero_rows(mut self, policy: ZeroRowPolicy) -> Self {
        self.config.zero_rows = policy;
        self
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Run only the preprocessing phase. `matrix` is reduced in place.
    pub fn preprocess(&self, matrix: &mut BinaryMatrix) -> Result<Preprocessed> {
        self.check_feasible(matrix)?;
        Preprocessor::new(self.config.zero_rows).run(matrix)
    }

    /// Solve the instance. `matrix` is consumed destructively and is empty
    /// when this returns successfully.
    pub fn solve_greedy(&self, matrix: &mut BinaryMatrix) -> Result<Solution> {
        self.check_feasible(matrix)?;

        let (mut registry, mut selected, preprocessing) = if self.config.preprocess {
            let preprocessed = Preprocessor::new(self.config.zero_rows).run(matrix)?;
            (
                preprocessed.kept.clone(),
                preprocessed.selected.clone(),
                Some(preprocessed),
            )
        } else {
            (VariableRegistry::identity(matrix.ncols()), BTreeSet::new(), None)
        };

        log::debug!(
            "Greedy phase starting on {}x{} matrix",
            matrix.nrows(),
            matrix.ncols()
        );
        let start = Instant::now();
        let greedy_picks = self.greedy(matrix, &mut registry, &mut selected)?;
        log::info!(
            "Greedy phase completed in {:.3} seconds with {} picks",
            start.elapsed().as_secs_f64(),
            greedy_picks.len()
        );
        log::info!("Selected {} variables", selected.len());

        Ok(Solution {
            selected,
            greedy_picks,
            preprocessing,
        })
    }

    /// Greedy column selection over an already preprocessed matrix.
    fn greedy(
        &self,
        matrix: &mut BinaryMatrix,
        registry: &mut VariableRegistry,
        selected: &mut BTreeSet<VariableId>,
    ) -> Result<Vec<VariableId>> {
        let mut picks = Vec::new();

        while !matrix.is_empty() {
            let sums = matrix.column_sums();
            let best = (0..sums.len()).max_by_key(|&j| (sums[j], Reverse(j)));

            let column = match best {
                Some(j) if sums[j] > 0 => j,
                _ => {
                    // only reachable with all-zero rows and preprocessing disabled
                    let rows: BTreeSet<usize> = (0..matrix.nrows()).collect();
                    match self.config.zero_rows {
                        ZeroRowPolicy::Reject => {
                            return Err(CoverError::Infeasible {
                                rows: rows.into_iter().collect(),
                            })
                        }
                        ZeroRowPolicy::Drop => {
                            log::warn!("Dropping {} uncoverable rows", rows.len());
                            matrix.remove_rows(&rows)?;
                            break;
                        }
                    }
                }
            };

            let id = registry.get(column)?;
            selected.insert(id);
            picks.push(id);
            log::debug!("Greedy pick: variable {} covers {} rows", id, sums[column]);

            let covered = matrix.rows_covered_by(column)?;
            matrix.remove_rows(&covered)?;

            let chosen = BTreeSet::from([column]);
            matrix.remove_columns(&chosen)?;
            registry.remove_positions(&chosen)?;

            let useless: BTreeSet<usize> = matrix
                .column_sums()
                .iter()
                .enumerate()
                .filter(|&(_, &sum)| sum == 0)
                .map(|(j, _)| j)
                .collect();
            matrix.remove_columns(&useless)?;
            registry.remove_positions(&useless)?;
        }

        Ok(picks)
    }

    fn check_feasible(&self, matrix: &BinaryMatrix) -> Result<()> {
        if self.config.zero_rows == ZeroRowPolicy::Reject {
            let rows = zero_rows(matrix);
            if !rows.is_empty() {
                return Err(CoverError::Infeasible { rows });
            }
        }
        Ok(())
    }
}
