//! Label-correcting relaxation with a FIFO work queue.
//!
//! Computes the shortest distance from a start to every reachable state.
//! Unlike [`crate::search::best_first_search`] there is no goal and no
//! closed set: a state whose distance drops is queued again (unless it is
//! already waiting), so the result is exact once the queue drains, for any
//! non-negative costs and any expansion order.

use std::collections::{HashSet, VecDeque};

use waypoint_kernel::carrier::key::StateKey;

use crate::contract::{SearchWorld, Transition};
use crate::cost::CostTable;
use crate::error::SearchError;
use crate::policy::RelaxPolicy;
use crate::report::{RelaxCounters, RelaxReport};

/// Every shortest distance found, plus the audit record.
#[derive(Debug)]
pub struct RelaxResult {
    pub distances: CostTable,
    pub report: RelaxReport,
}

impl RelaxResult {
    /// Shortest distance to `key`, or `None` if it was never reached.
    ///
    /// Exact only when `report.converged` is `true`; otherwise an upper
    /// bound.
    #[must_use]
    pub fn cost_to(&self, key: &StateKey) -> Option<u64> {
        self.distances.get(key)
    }
}

/// Relax edges out of `start` until no distance improves.
///
/// # Errors
///
/// Returns [`SearchError::InvalidPolicy`] if the policy fails validation.
pub fn shortest_distances<W: SearchWorld>(
    world: &W,
    start: W::Config,
    policy: &RelaxPolicy,
) -> Result<RelaxResult, SearchError> {
    policy.validate()?;

    let start_key = world.encode(&start);
    let start_fingerprint = start_key.fingerprint();

    let mut distances = CostTable::new();
    distances.seed(start_key.clone());
    let mut counters = RelaxCounters::default();

    let mut queued: HashSet<StateKey> = HashSet::new();
    let mut queue: VecDeque<(StateKey, W::Config)> = VecDeque::new();
    queued.insert(start_key.clone());
    queue.push_back((start_key, start));
    counters.queue_high_water = 1;

    let converged = loop {
        if queue.is_empty() {
            break true;
        }
        if counters.dequeues >= policy.max_dequeues {
            break false;
        }
        let Some((key, config)) = queue.pop_front() else {
            break true;
        };
        queued.remove(&key);
        counters.dequeues += 1;

        // The distance is read now, not when the entry was queued.
        let Some(base) = distances.get(&key) else {
            continue;
        };

        for Transition { cost, next } in world.expand(&config) {
            counters.edges_scanned += 1;
            let next_key = world.encode(&next);
            if !distances.improve(&next_key, base.saturating_add(cost)) {
                continue;
            }
            if queued.contains(&next_key) {
                counters.already_queued += 1;
                continue;
            }
            queued.insert(next_key.clone());
            queue.push_back((next_key, next));
            counters.queue_high_water = counters.queue_high_water.max(queue.len() as u64);
        }
    };

    counters.relaxations = distances.improvements();
    let report = RelaxReport {
        world_id: world.world_id().to_string(),
        start_fingerprint,
        converged,
        reached: distances.len() as u64,
        counters,
        policy: policy.to_json_value(),
    };
    Ok(RelaxResult { distances, report })
}
