//! Audit reports returned by every engine.
//!
//! A report is the only record of how a run went: which state it started
//! from, why it stopped, and how much work it did. Reports serialize to
//! canonical JSON and digest to a single `ContentHash`, so determinism can
//! be checked by comparing one string across runs or processes.

use serde_json::json;
use waypoint_kernel::proof::canon::{canonical_json_bytes, CanonError};
use waypoint_kernel::proof::hash::{canonical_hash, ContentHash};
use waypoint_kernel::proof::hash_domain::HashDomain;

/// Why a best-first search stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// A goal state was popped from the frontier at this cost.
    GoalReached { cost: u64, depth: u32 },
    /// The frontier emptied: no goal is reachable from the start.
    FrontierExhausted,
    /// `max_expansions` was hit before a goal was popped.
    ExpansionBudgetExceeded,
}

impl Termination {
    fn to_json_value(self) -> serde_json::Value {
        match self {
            Self::GoalReached { cost, depth } => {
                json!({"type": "goal_reached", "cost": cost, "depth": depth})
            }
            Self::FrontierExhausted => json!({"type": "frontier_exhausted"}),
            Self::ExpansionBudgetExceeded => json!({"type": "expansion_budget_exceeded"}),
        }
    }
}

/// Work counters for one best-first search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchCounters {
    /// States popped, found non-goal, and expanded.
    pub expansions: u64,
    /// Transitions returned by `expand`.
    pub generated: u64,
    /// Strict improvements written to the cost table (discoveries included).
    pub improvements: u64,
    /// Transitions that did not beat the best-known cost.
    pub duplicates_suppressed: u64,
    /// Cheaper paths found into already-closed states (only possible with an
    /// inconsistent heuristic); ignored, never reopened.
    pub closed_improvements_ignored: u64,
    /// Superseded frontier entries discarded on pop.
    pub stale_pops: u64,
    /// Largest number of simultaneously open states.
    pub frontier_high_water: u64,
}

/// Audit record for one best-first search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchReport {
    pub world_id: String,
    pub start_fingerprint: ContentHash,
    pub goal_fingerprint: Option<ContentHash>,
    pub termination: Termination,
    pub counters: SearchCounters,
    pub policy: serde_json::Value,
}

impl SearchReport {
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        let c = &self.counters;
        json!({
            "world_id": self.world_id,
            "start_fingerprint": self.start_fingerprint.as_str(),
            "goal_fingerprint": self.goal_fingerprint.as_ref().map(ContentHash::as_str),
            "termination": self.termination.to_json_value(),
            "policy": self.policy,
            "counters": {
                "expansions": c.expansions,
                "generated": c.generated,
                "improvements": c.improvements,
                "duplicates_suppressed": c.duplicates_suppressed,
                "closed_improvements_ignored": c.closed_improvements_ignored,
                "stale_pops": c.stale_pops,
                "frontier_high_water": c.frontier_high_water,
            },
        })
    }

    /// Serialize to canonical JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if serialization fails.
    pub fn to_canonical_json_bytes(&self) -> Result<Vec<u8>, CanonError> {
        canonical_json_bytes(&self.to_json_value())
    }

    /// Digest of the canonical JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if serialization fails.
    pub fn digest(&self) -> Result<ContentHash, CanonError> {
        Ok(canonical_hash(
            HashDomain::SearchReport,
            &self.to_canonical_json_bytes()?,
        ))
    }
}

/// Work counters for one staged search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StagedCounters {
    /// Stage transforms evaluated.
    pub transforms: u64,
    /// Frames pushed onto the explicit stack (root included).
    pub frames_pushed: u64,
    /// Subproblems answered from the memo table.
    pub memo_hits: u64,
    /// Subproblems rejected by `StagedProblem::viable`.
    pub pruned: u64,
    /// Terminal acceptance checks.
    pub terminal_checks: u64,
    /// Entries in the memo table when the search stopped.
    pub memo_entries: u64,
}

/// Audit record for one staged search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedReport {
    pub problem_id: String,
    pub start_fingerprint: ContentHash,
    pub preference: &'static str,
    /// `"solved"`, `"no_solution"` or `"frame_budget_exceeded"`.
    pub outcome: &'static str,
    /// Number of decisions in the winning sequence (0 unless solved).
    pub decisions: u64,
    pub counters: StagedCounters,
    pub policy: serde_json::Value,
}

impl StagedReport {
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        let c = &self.counters;
        json!({
            "problem_id": self.problem_id,
            "start_fingerprint": self.start_fingerprint.as_str(),
            "preference": self.preference,
            "outcome": self.outcome,
            "decisions": self.decisions,
            "policy": self.policy,
            "counters": {
                "transforms": c.transforms,
                "frames_pushed": c.frames_pushed,
                "memo_hits": c.memo_hits,
                "pruned": c.pruned,
                "terminal_checks": c.terminal_checks,
                "memo_entries": c.memo_entries,
            },
        })
    }

    /// # Errors
    ///
    /// Returns [`CanonError`] if serialization fails.
    pub fn digest(&self) -> Result<ContentHash, CanonError> {
        let bytes = canonical_json_bytes(&self.to_json_value())?;
        Ok(canonical_hash(HashDomain::StagedReport, &bytes))
    }
}

/// Work counters for one relaxation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RelaxCounters {
    pub dequeues: u64,
    pub edges_scanned: u64,
    /// Strict distance improvements (discoveries included).
    pub relaxations: u64,
    /// Improvements to a node that was already waiting in the queue.
    pub already_queued: u64,
    pub queue_high_water: u64,
}

/// Audit record for one relaxation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelaxReport {
    pub world_id: String,
    pub start_fingerprint: ContentHash,
    /// `true` if the queue drained; `false` if `max_dequeues` stopped it.
    pub converged: bool,
    pub reached: u64,
    pub counters: RelaxCounters,
    pub policy: serde_json::Value,
}

impl RelaxReport {
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        let c = &self.counters;
        json!({
            "world_id": self.world_id,
            "start_fingerprint": self.start_fingerprint.as_str(),
            "converged": self.converged,
            "reached": self.reached,
            "policy": self.policy,
            "counters": {
                "dequeues": c.dequeues,
                "edges_scanned": c.edges_scanned,
                "relaxations": c.relaxations,
                "already_queued": c.already_queued,
                "queue_high_water": c.queue_high_water,
            },
        })
    }

    /// # Errors
    ///
    /// Returns [`CanonError`] if serialization fails.
    pub fn digest(&self) -> Result<ContentHash, CanonError> {
        let bytes = canonical_json_bytes(&self.to_json_value())?;
        Ok(canonical_hash(HashDomain::RelaxReport, &bytes))
    }
}
