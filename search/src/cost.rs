//! Best-known cost per state key.

use std::collections::HashMap;

use waypoint_kernel::carrier::key::StateKey;

/// Mapping from state key to the smallest cost found so far.
///
/// A key that was never recorded reads as infinite (`None`). Entries only
/// ever move down: [`CostTable::improve`] writes on strict improvement and
/// refuses everything else.
#[derive(Debug, Clone, Default)]
pub struct CostTable {
    costs: HashMap<StateKey, u64>,
    improvements: u64,
}

impl CostTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the start state at cost 0.
    pub fn seed(&mut self, key: StateKey) {
        self.costs.insert(key, 0);
    }

    /// Best-known cost for `key`, or `None` if unseen.
    #[must_use]
    pub fn get(&self, key: &StateKey) -> Option<u64> {
        self.costs.get(key).copied()
    }

    /// Store `candidate` if it beats the current entry (or there is none).
    ///
    /// Returns `true` if the table changed.
    pub fn improve(&mut self, key: &StateKey, candidate: u64) -> bool {
        match self.costs.get_mut(key) {
            Some(current) if candidate < *current => *current = candidate,
            Some(_) => return false,
            None => {
                self.costs.insert(key.clone(), candidate);
            }
        }
        self.improvements += 1;
        true
    }

    /// Number of keys with a finite cost.
    #[must_use]
    pub fn len(&self) -> usize {
        self.costs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.costs.is_empty()
    }

    /// Successful [`Self::improve`] calls (first discoveries included).
    #[must_use]
    pub fn improvements(&self) -> u64 {
        self.improvements
    }
}
