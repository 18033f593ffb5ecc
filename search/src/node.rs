//! Frontier node and its ordering key.

use waypoint_kernel::carrier::key::StateKey;

/// A configuration waiting in the frontier with the cost it was reached at.
///
/// Ordering for frontier extraction uses `(f_cost, depth, creation_order)`
/// where `f_cost = g_cost + h_cost`. Lower is better; ties broken by
/// shallower depth, then older creation order.
#[derive(Debug, Clone)]
pub struct SearchNode<C> {
    /// Canonical key of `config`.
    pub key: StateKey,
    /// Full configuration (kept so expansion does not need to decode).
    pub config: C,
    /// Number of transitions from the start (start = 0).
    pub depth: u32,
    /// Cumulative path cost at the time this entry was pushed.
    pub g_cost: u64,
    /// Heuristic estimate for `config`.
    pub h_cost: u64,
    /// Global push counter for deterministic tie-breaking.
    pub creation_order: u64,
}

impl<C> SearchNode<C> {
    /// Compute `f_cost = g_cost + h_cost` (the frontier ordering key).
    #[must_use]
    pub fn f_cost(&self) -> u64 {
        self.g_cost.saturating_add(self.h_cost)
    }
}

/// The frontier ordering key: `(f_cost, depth, creation_order)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrontierKey {
    pub f_cost: u64,
    pub depth: u32,
    pub creation_order: u64,
}

impl PartialOrd for FrontierKey {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierKey {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.f_cost
            .cmp(&other.f_cost)
            .then(self.depth.cmp(&other.depth))
            .then(self.creation_order.cmp(&other.creation_order))
    }
}

impl<C> From<&SearchNode<C>> for FrontierKey {
    fn from(node: &SearchNode<C>) -> Self {
        Self {
            f_cost: node.f_cost(),
            depth: node.depth,
            creation_order: node.creation_order,
        }
    }
}
