//! Best-first frontier with lazy decrease-key.
//!
//! A state whose tentative cost improves is pushed again with the better
//! cost instead of being re-prioritized in place. The frontier remembers the
//! cost of the newest live entry per key; an older entry for the same key is
//! discarded when it surfaces ("stale pop").

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use waypoint_kernel::carrier::key::StateKey;

use crate::node::{FrontierKey, SearchNode};

/// A frontier entry wrapping a node with its ordering key.
///
/// `BinaryHeap` is a max-heap, so we use `Reverse<FrontierKey>` to get
/// min-heap behavior (lowest `f_cost` first).
#[derive(Debug)]
struct FrontierEntry<C> {
    key: Reverse<FrontierKey>,
    node: SearchNode<C>,
}

impl<C> PartialEq for FrontierEntry<C> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl<C> Eq for FrontierEntry<C> {}

impl<C> PartialOrd for FrontierEntry<C> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<C> Ord for FrontierEntry<C> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.key.cmp(&other.key)
    }
}

/// Best-first frontier manager.
///
/// Maintains:
/// - A `BinaryHeap` for O(log n) pop of the best entry
/// - A map from key to the `g_cost` of its newest entry (membership test)
pub struct BestFirstFrontier<C> {
    heap: BinaryHeap<FrontierEntry<C>>,
    live: HashMap<StateKey, u64>,
    high_water: u64,
    stale_pops: u64,
}

impl<C> BestFirstFrontier<C> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            live: HashMap::new(),
            high_water: 0,
            stale_pops: 0,
        }
    }

    /// Push a node. Any older entry for the same key becomes stale.
    ///
    /// Callers push only on strict cost improvement, so the newest entry
    /// always carries the lowest `g_cost` seen for its key.
    pub fn push(&mut self, node: SearchNode<C>) {
        self.live.insert(node.key.clone(), node.g_cost);
        self.heap.push(FrontierEntry {
            key: Reverse(FrontierKey::from(&node)),
            node,
        });
        let size = self.live.len() as u64;
        if size > self.high_water {
            self.high_water = size;
        }
    }

    /// Pop the best live node, skipping superseded entries.
    #[must_use]
    pub fn pop(&mut self) -> Option<SearchNode<C>> {
        while let Some(FrontierEntry { node, .. }) = self.heap.pop() {
            if self.live.get(&node.key) == Some(&node.g_cost) {
                self.live.remove(&node.key);
                return Some(node);
            }
            self.stale_pops += 1;
        }
        None
    }

    /// Whether `key` currently has a live (open) entry.
    #[must_use]
    pub fn contains(&self, key: &StateKey) -> bool {
        self.live.contains_key(key)
    }

    /// Number of open states (live entries).
    #[must_use]
    pub fn len(&self) -> usize {
        self.live.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// High-water mark of open states.
    #[must_use]
    pub fn high_water(&self) -> u64 {
        self.high_water
    }

    /// Number of superseded entries discarded by [`Self::pop`].
    #[must_use]
    pub fn stale_pops(&self) -> u64 {
        self.stale_pops
    }
}

impl<C> Default for BestFirstFrontier<C> {
    fn default() -> Self {
        Self::new()
    }
}
