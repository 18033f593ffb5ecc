//! Run configuration: the engine policies a puzzle run is produced under.
//!
//! Puzzles do NOT choose budgets; the runner hands every puzzle the same
//! [`RunConfig`], and tests override it to exercise budgets and heuristic
//! modes without modifying puzzle implementations.

use serde_json::json;
use waypoint_search::error::SearchError;
use waypoint_search::policy::{RelaxPolicy, SearchPolicy, StagedPolicy};

/// Which engine answers the chiton cavern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChitonSolver {
    /// A* with the Manhattan-distance heuristic.
    BestFirst,
    /// FIFO label-correcting relaxation over the whole cavern.
    Relax,
}

impl ChitonSolver {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BestFirst => "best_first",
            Self::Relax => "relax",
        }
    }
}

/// Policies for every engine a puzzle might use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub search: SearchPolicy,
    pub staged: StagedPolicy,
    pub relax: RelaxPolicy,
    pub chiton_solver: ChitonSolver,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            search: SearchPolicy::default(),
            staged: StagedPolicy::default(),
            relax: RelaxPolicy::default(),
            chiton_solver: ChitonSolver::BestFirst,
        }
    }
}

impl RunConfig {
    /// Validate every policy before any puzzle is parsed.
    ///
    /// # Errors
    ///
    /// Returns the first [`SearchError::InvalidPolicy`] found.
    pub fn validate(&self) -> Result<(), SearchError> {
        self.search.validate()?;
        self.staged.validate()?;
        self.relax.validate()
    }

    /// Configuration echo for run records.
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        json!({
            "search": self.search.to_json_value(),
            "staged": self.staged.to_json_value(),
            "relax": self.relax.to_json_value(),
            "chiton_solver": self.chiton_solver.as_str(),
        })
    }
}
