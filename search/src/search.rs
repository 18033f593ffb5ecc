//! Best-first search entry point and expansion loop.

use std::collections::{HashMap, HashSet};

use waypoint_kernel::carrier::key::StateKey;

use crate::contract::{SearchWorld, Transition};
use crate::cost::CostTable;
use crate::error::SearchError;
use crate::frontier::BestFirstFrontier;
use crate::node::SearchNode;
use crate::policy::{HeuristicMode, SearchPolicy};
use crate::report::{SearchCounters, SearchReport, Termination};

/// A minimum-cost route to a goal.
#[derive(Debug, Clone)]
pub struct Solution<C> {
    /// Total cost from the start to `goal`.
    pub cost: u64,
    /// The goal configuration that was popped.
    pub goal: C,
    /// Configurations from the start to `goal`, both included.
    pub path: Vec<C>,
}

/// Result of a search execution.
///
/// Always carries a [`SearchReport`]. `solution` is `Some` exactly when the
/// report's termination is [`Termination::GoalReached`].
#[derive(Debug)]
pub struct SearchResult<C> {
    pub solution: Option<Solution<C>>,
    pub report: SearchReport,
}

impl<C> SearchResult<C> {
    /// Returns `true` if the search terminated because a goal was reached.
    #[must_use]
    pub fn is_goal_reached(&self) -> bool {
        matches!(self.report.termination, Termination::GoalReached { .. })
    }

    /// The minimum cost, or `None` if no goal was reached.
    #[must_use]
    pub fn cost(&self) -> Option<u64> {
        self.solution.as_ref().map(|s| s.cost)
    }
}

fn estimate<W: SearchWorld>(world: &W, policy: &SearchPolicy, config: &W::Config) -> u64 {
    match policy.heuristic_mode {
        HeuristicMode::Admissible => world.heuristic(config),
        HeuristicMode::Zero => 0,
    }
}

/// Run best-first search from `start` to the cheapest goal configuration.
///
/// States move Unvisited → Open → Closed. The goal test runs when a state
/// is popped, so the returned cost is the true minimum whenever the world's
/// heuristic is admissible and every transition cost is non-negative. A
/// closed state is never reopened.
///
/// An unreachable goal is not an error: the result has no solution and the
/// report says [`Termination::FrontierExhausted`].
///
/// # Errors
///
/// Returns [`SearchError::InvalidPolicy`] if the policy fails validation, or
/// [`SearchError::Codec`] if a parent key cannot be decoded while rebuilding
/// the solution path (a broken `StateCodec`).
pub fn best_first_search<W: SearchWorld>(
    world: &W,
    start: W::Config,
    policy: &SearchPolicy,
) -> Result<SearchResult<W::Config>, SearchError> {
    policy.validate()?;

    let mut frontier = BestFirstFrontier::new();
    let mut costs = CostTable::new();
    let mut parents: HashMap<StateKey, StateKey> = HashMap::new();
    let mut closed: HashSet<StateKey> = HashSet::new();
    let mut counters = SearchCounters::default();
    let mut next_creation_order: u64 = 0;

    let start_key = world.encode(&start);
    let start_fingerprint = start_key.fingerprint();
    costs.seed(start_key.clone());
    let h_cost = estimate(world, policy, &start);
    frontier.push(SearchNode {
        key: start_key,
        config: start,
        depth: 0,
        g_cost: 0,
        h_cost,
        creation_order: next_creation_order,
    });
    next_creation_order += 1;

    let mut goal_node = None;
    let termination = loop {
        if counters.expansions >= policy.max_expansions {
            break Termination::ExpansionBudgetExceeded;
        }
        let Some(current) = frontier.pop() else {
            break Termination::FrontierExhausted;
        };

        if world.is_goal(&current.config) {
            let termination = Termination::GoalReached {
                cost: current.g_cost,
                depth: current.depth,
            };
            goal_node = Some(current);
            break termination;
        }

        closed.insert(current.key.clone());
        counters.expansions += 1;

        for Transition { cost, next } in world.expand(&current.config) {
            counters.generated += 1;
            let next_key = world.encode(&next);
            let candidate = current.g_cost.saturating_add(cost);

            if closed.contains(&next_key) {
                if costs.get(&next_key).is_some_and(|known| candidate < known) {
                    counters.closed_improvements_ignored += 1;
                }
                continue;
            }
            if !costs.improve(&next_key, candidate) {
                counters.duplicates_suppressed += 1;
                continue;
            }

            parents.insert(next_key.clone(), current.key.clone());
            let h_cost = estimate(world, policy, &next);
            frontier.push(SearchNode {
                key: next_key,
                config: next,
                depth: current.depth + 1,
                g_cost: candidate,
                h_cost,
                creation_order: next_creation_order,
            });
            next_creation_order += 1;
        }
    };

    counters.improvements = costs.improvements();
    counters.stale_pops = frontier.stale_pops();
    counters.frontier_high_water = frontier.high_water();

    let (solution, goal_fingerprint) = match goal_node {
        Some(node) => {
            let fingerprint = node.key.fingerprint();
            let path = reconstruct_path(world, &parents, &node.key, &node.config)?;
            let solution = Solution {
                cost: node.g_cost,
                goal: node.config,
                path,
            };
            (Some(solution), Some(fingerprint))
        }
        None => (None, None),
    };

    let report = SearchReport {
        world_id: world.world_id().to_string(),
        start_fingerprint,
        goal_fingerprint,
        termination,
        counters,
        policy: policy.to_json_value(),
    };

    Ok(SearchResult { solution, report })
}

/// Walk parent links from `goal_key` back to the start and decode each key.
///
/// # Errors
///
/// Returns [`SearchError::Codec`] if a stored key does not decode.
pub fn reconstruct_path<W: SearchWorld>(
    world: &W,
    parents: &HashMap<StateKey, StateKey>,
    goal_key: &StateKey,
    goal: &W::Config,
) -> Result<Vec<W::Config>, SearchError> {
    let mut path = vec![goal.clone()];
    let mut current = goal_key;
    while let Some(parent) = parents.get(current) {
        path.push(world.decode(parent)?);
        current = parent;
    }
    path.reverse();
    Ok(path)
}
