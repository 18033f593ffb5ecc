//! Write-once subproblem cache for the staged search.
//!
//! A table is created per search invocation or injected by the caller; it
//! is never global. Once bound to a problem and a preference order it
//! refuses to serve another, because a feasible suffix found while trying
//! choices high-to-low is not the answer to the low-to-high question.

use std::collections::HashMap;

use waypoint_kernel::carrier::key::StateKey;

/// The resolved value of one `(stage, carried key)` subproblem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution<Choice> {
    /// The preferred feasible choice suffix from this stage to the end.
    Feasible(Vec<Choice>),
    /// No choice sequence from here satisfies the terminal predicate.
    Infeasible,
}

/// Cache of `(stage, carried key)` → [`Resolution`].
///
/// Entries are write-once: [`MemoTable::record`] never overwrites.
#[derive(Debug, Clone)]
pub struct MemoTable<Choice> {
    stages: Vec<HashMap<StateKey, Resolution<Choice>>>,
    binding: Option<String>,
    entries: u64,
    rejected_writes: u64,
}

impl<Choice: Clone> MemoTable<Choice> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            stages: Vec::new(),
            binding: None,
            entries: 0,
            rejected_writes: 0,
        }
    }

    /// Bind the table to a problem/preference label on first use.
    ///
    /// Returns the existing label if the table is already bound to a
    /// different one.
    pub(crate) fn bind(&mut self, label: &str) -> Result<(), String> {
        match &self.binding {
            None => {
                self.binding = Some(label.to_string());
                Ok(())
            }
            Some(bound) if bound == label => Ok(()),
            Some(bound) => Err(bound.clone()),
        }
    }

    /// Cached resolution, if any.
    #[must_use]
    pub fn get(&self, stage: usize, key: &StateKey) -> Option<&Resolution<Choice>> {
        self.stages.get(stage).and_then(|m| m.get(key))
    }

    /// Store a resolution. Returns `false` (and stores nothing) if the
    /// subproblem was already resolved.
    pub fn record(&mut self, stage: usize, key: StateKey, resolution: Resolution<Choice>) -> bool {
        if self.stages.len() <= stage {
            self.stages.resize_with(stage + 1, HashMap::new);
        }
        let slot = &mut self.stages[stage];
        if slot.contains_key(&key) {
            self.rejected_writes += 1;
            return false;
        }
        slot.insert(key, resolution);
        self.entries += 1;
        true
    }

    /// Number of resolved subproblems.
    #[must_use]
    pub fn len(&self) -> u64 {
        self.entries
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries == 0
    }

    /// Writes refused because the subproblem was already resolved.
    #[must_use]
    pub fn rejected_writes(&self) -> u64 {
        self.rejected_writes
    }

    /// The label this table is bound to, if any.
    #[must_use]
    pub fn binding(&self) -> Option<&str> {
        self.binding.as_deref()
    }
}

impl<Choice: Clone> Default for MemoTable<Choice> {
    fn default() -> Self {
        Self::new()
    }
}
