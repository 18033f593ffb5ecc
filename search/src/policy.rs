//! Search policy types.
//!
//! Every engine takes a policy by reference and validates it before touching
//! the start configuration. Policies are echoed into reports so a digest
//! commits to the conditions the run was produced under.

use serde_json::json;
use waypoint_kernel::proof::canon::canonical_json_bytes;
use waypoint_kernel::proof::hash::{canonical_hash, ContentHash};
use waypoint_kernel::proof::hash_domain::HashDomain;

use crate::error::SearchError;

/// Budget and heuristic configuration for best-first search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPolicy {
    /// Hard cap on node expansions. Hitting it is reported as
    /// `Termination::ExpansionBudgetExceeded`, never as "unreachable".
    pub max_expansions: u64,
    /// Whether the world's heuristic is consulted.
    pub heuristic_mode: HeuristicMode,
}

impl SearchPolicy {
    /// Pre-flight validation.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidPolicy`] if `max_expansions` is zero.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.max_expansions == 0 {
            return Err(SearchError::InvalidPolicy {
                detail: "max_expansions must be at least 1".into(),
            });
        }
        Ok(())
    }

    /// Policy echo for reports.
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        json!({
            "max_expansions": self.max_expansions,
            "heuristic_mode": self.heuristic_mode.as_str(),
        })
    }

    /// Digest of the canonical policy echo.
    #[must_use]
    pub fn digest(&self) -> ContentHash {
        // The echo holds only strings and integers; canonicalization cannot fail.
        let bytes = canonical_json_bytes(&self.to_json_value()).unwrap_or_default();
        canonical_hash(HashDomain::SearchPolicy, &bytes)
    }
}

impl Default for SearchPolicy {
    fn default() -> Self {
        Self {
            max_expansions: 10_000_000,
            heuristic_mode: HeuristicMode::Admissible,
        }
    }
}

/// Whether best-first search orders the frontier by `g + h` or by `g` alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeuristicMode {
    /// Use `SearchWorld::heuristic` (A*).
    Admissible,
    /// Treat the heuristic as 0 (uniform-cost search). Slower, and optimal
    /// without any assumption about the world's heuristic.
    Zero,
}

impl HeuristicMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admissible => "admissible",
            Self::Zero => "zero",
        }
    }
}

/// Configuration for the memoized staged search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedPolicy {
    /// Cache `(stage, carried key)` resolutions. Turning this off must not
    /// change the answer, only the amount of work.
    pub memoize: bool,
    /// Hard cap on frames pushed onto the explicit stack.
    pub max_frames: u64,
}

impl StagedPolicy {
    /// Pre-flight validation.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidPolicy`] if `max_frames` is zero.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.max_frames == 0 {
            return Err(SearchError::InvalidPolicy {
                detail: "max_frames must be at least 1".into(),
            });
        }
        Ok(())
    }

    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        json!({
            "memoize": self.memoize,
            "max_frames": self.max_frames,
        })
    }
}

impl Default for StagedPolicy {
    fn default() -> Self {
        Self {
            memoize: true,
            max_frames: 50_000_000,
        }
    }
}

/// Configuration for the label-correcting relaxation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelaxPolicy {
    /// Hard cap on queue pops.
    pub max_dequeues: u64,
}

impl RelaxPolicy {
    /// Pre-flight validation.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidPolicy`] if `max_dequeues` is zero.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.max_dequeues == 0 {
            return Err(SearchError::InvalidPolicy {
                detail: "max_dequeues must be at least 1".into(),
            });
        }
        Ok(())
    }

    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        json!({ "max_dequeues": self.max_dequeues })
    }
}

impl Default for RelaxPolicy {
    fn default() -> Self {
        Self {
            max_dequeues: 100_000_000,
        }
    }
}
