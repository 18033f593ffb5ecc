//! Search world contract trait.

use waypoint_kernel::carrier::codec::StateCodec;

/// One legal move: the cost of taking it and the configuration it leads to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition<C> {
    /// Non-negative step cost. Zero is legal.
    pub cost: u64,
    /// The configuration after the move.
    pub next: C,
}

impl<C> Transition<C> {
    #[must_use]
    pub fn new(cost: u64, next: C) -> Self {
        Self { cost, next }
    }
}

/// Trait for domains that can be searched with [`crate::search::best_first_search`]
/// or [`crate::relax::shortest_distances`].
///
/// # Contract
///
/// - `expand` returns only legal moves, in a deterministic order, and never a
///   move back to the exact input configuration. Returning to an earlier,
///   different configuration is allowed; cycles are the engine's problem.
/// - `heuristic` never overestimates the true remaining cost and is 0 on goal
///   configurations. This is a precondition, not checked: an inadmissible
///   heuristic yields a sub-optimal cost rather than an error.
/// - `is_goal` is pure.
pub trait SearchWorld: StateCodec {
    /// Stable identifier recorded in reports.
    fn world_id(&self) -> &str;

    /// Enumerate every legal transition out of `config`.
    fn expand(&self, config: &Self::Config) -> Vec<Transition<Self::Config>>;

    /// Lower bound on the remaining cost to any goal. Defaults to 0, which
    /// turns best-first search into uniform-cost (Dijkstra) search.
    fn heuristic(&self, _config: &Self::Config) -> u64 {
        0
    }

    /// Whether `config` satisfies the goal.
    fn is_goal(&self, config: &Self::Config) -> bool;
}
