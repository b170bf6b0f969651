//! Mapping from current column positions to original variable identifiers.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::error::{Axis, CoverError, Result};

/// Original identifier of a variable (its column index when the instance was loaded).
pub type VariableId = usize;

/// Ordered, duplicate-free list of the variables still present in a matrix.
///
/// Position `j` holds the original identifier of the matrix's current
/// column `j`. Every column removal on the matrix must be mirrored here
/// with [`VariableRegistry::remove_positions`] using the same index set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct VariableRegistry {
    ids: Vec<VariableId>,
}

impl VariableRegistry {
    /// Registry for a freshly loaded instance: column `j` is variable `j`.
    pub fn identity(ncols: usize) -> Self {
        Self {
            ids: (0..ncols).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Original identifier of the column currently at `position`.
    pub fn get(&self, position: usize) -> Result<VariableId> {
        self.ids.get(position).copied().ok_or(CoverError::Index {
            axis: Axis::Registry,
            index: position,
            len: self.ids.len(),
        })
    }

    /// Translate a set of current positions into original identifiers.
    pub fn translate(&self, positions: &BTreeSet<usize>) -> Result<BTreeSet<VariableId>> {
        positions.iter().map(|&p| self.get(p)).collect()
    }

    /// Drop the entries at `positions` (numbered as before the call) and
    /// return their original identifiers.
    pub fn remove_positions(&mut self, positions: &BTreeSet<usize>) -> Result<BTreeSet<VariableId>> {
        let removed = self.translate(positions)?;
        let mut position = 0;
        self.ids.retain(|_| {
            let keep = !positions.contains(&position);
            position += 1;
            keep
        });
        Ok(removed)
    }

    pub fn ids(&self) -> &[VariableId] {
        &self.ids
    }

    pub fn iter(&self) -> impl Iterator<Item = VariableId> + '_ {
        self.ids.iter().copied()
    }
}
