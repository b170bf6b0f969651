use serde::{Deserialize, Serialize};

/// What forced selection does with a row that no column covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZeroRowPolicy {
    /// Fail the solve with [`CoverError::Infeasible`](crate::CoverError::Infeasible).
    Reject,
    /// Remove the row and carry on; the element stays uncovered.
    Drop,
}

impl Default for ZeroRowPolicy {
    fn default() -> Self {
        ZeroRowPolicy::Reject
    }
}

impl ZeroRowPolicy {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "reject" => Some(ZeroRowPolicy::Reject),
            "drop" => Some(ZeroRowPolicy::Drop),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ZeroRowPolicy::Reject => "reject",
            ZeroRowPolicy::Drop => "drop",
        }
    }
}

/// Solver settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SolverConfig {
    /// Handling of all-zero rows during forced selection
    pub zero_rows: ZeroRowPolicy,

    /// Run the reduction rules to a fixed point before the greedy phase
    pub preprocess: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            zero_rows: ZeroRowPolicy::default(),
            preprocess: true,
        }
    }
}

impl SolverConfig {
    pub fn with_zero_rows(mut self, policy: ZeroRowPolicy) -> Self {
        self.zero_rows = policy;
        self
    }

    pub fn with_preprocessing(mut self, preprocess: bool) -> Self {
        self.preprocess = preprocess;
        self
    }
}
