//! Memoized staged decision search.
//!
//! Decisions are made in a fixed order, one per stage. At each stage the
//! choices are tried in preference order and the first choice whose subtree
//! reaches an accepting terminal state wins. Because the preference order is
//! also the order of the answer we want (largest first, or smallest first),
//! the first feasible leaf found is the preferred answer and no exhaustive
//! comparison is needed.
//!
//! The traversal runs on an explicit frame stack, so the depth of the
//! decision sequence is bounded by memory rather than by the thread stack.
//! It visits subproblems in exactly the order the recursive formulation
//! would.

use waypoint_kernel::carrier::codec::StateCodec;
use waypoint_kernel::carrier::key::StateKey;

use crate::error::SearchError;
use crate::memo::{MemoTable, Resolution};
use crate::policy::StagedPolicy;
use crate::report::{StagedCounters, StagedReport};

/// Order in which a stage's choices are tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preference {
    /// Highest choice first: finds the largest accepted sequence.
    Descending,
    /// Lowest choice first: finds the smallest accepted sequence.
    Ascending,
}

impl Preference {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Descending => "descending",
            Self::Ascending => "ascending",
        }
    }
}

/// A problem solved by making one decision per stage.
///
/// The carried state is the codec's `Config`; its key is what the memo table
/// is indexed by.
///
/// # Contract
///
/// - `choices(stage)` is finite, non-empty and in ascending order.
/// - `transform` is pure: the same `(stage, choice, carried)` always yields
///   the same next carried state.
/// - `viable(stage, carried)` returns `false` only when no choice sequence
///   from `stage` can reach an accepting state.
pub trait StagedProblem: StateCodec {
    type Choice: Copy + std::fmt::Debug + PartialEq;

    /// Stable identifier recorded in reports and memo bindings.
    fn problem_id(&self) -> &str;

    /// Number of decisions (N). Stage N is the terminal stage.
    fn stage_count(&self) -> usize;

    /// Choices available at `stage`, ascending.
    fn choices(&self, stage: usize) -> Vec<Self::Choice>;

    /// Carried state after taking `choice` at `stage`.
    fn transform(&self, stage: usize, choice: Self::Choice, carried: &Self::Config)
        -> Self::Config;

    /// Terminal acceptance predicate, evaluated at stage N.
    fn accepts(&self, carried: &Self::Config) -> bool;

    /// Backward pruning bound. Defaults to "anything may still succeed".
    fn viable(&self, _stage: usize, _carried: &Self::Config) -> bool {
        true
    }
}

/// How a staged search ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StagedOutcome<Choice> {
    /// The preferred accepted choice sequence, one entry per stage.
    Solved(Vec<Choice>),
    /// No choice sequence reaches an accepting terminal state.
    NoSolution,
    /// `max_frames` was hit before the search finished.
    FrameBudgetExceeded,
}

impl<Choice> StagedOutcome<Choice> {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Solved(_) => "solved",
            Self::NoSolution => "no_solution",
            Self::FrameBudgetExceeded => "frame_budget_exceeded",
        }
    }
}

/// Outcome plus audit record.
#[derive(Debug)]
pub struct StagedResult<Choice> {
    pub outcome: StagedOutcome<Choice>,
    pub report: StagedReport,
}

impl<Choice> StagedResult<Choice> {
    /// The winning sequence, if one was found.
    #[must_use]
    pub fn choices(&self) -> Option<&[Choice]> {
        match &self.outcome {
            StagedOutcome::Solved(choices) => Some(choices),
            _ => None,
        }
    }
}

struct Frame<C> {
    stage: usize,
    carried: C,
    key: StateKey,
    next_choice: usize,
}

enum Probe<Choice> {
    Known(Resolution<Choice>),
    Open,
}

struct StagedRun<'a, P: StagedProblem> {
    problem: &'a P,
    policy: &'a StagedPolicy,
    memo: &'a mut MemoTable<P::Choice>,
    orders: Vec<Vec<P::Choice>>,
    counters: StagedCounters,
}

impl<P: StagedProblem> StagedRun<'_, P> {
    /// Resolve `(stage, carried)` without expanding it, if possible.
    fn probe(&mut self, stage: usize, carried: &P::Config, key: &StateKey) -> Probe<P::Choice> {
        if self.policy.memoize {
            if let Some(resolution) = self.memo.get(stage, key) {
                self.counters.memo_hits += 1;
                return Probe::Known(resolution.clone());
            }
        }
        if stage == self.orders.len() {
            self.counters.terminal_checks += 1;
            let resolution = if self.problem.accepts(carried) {
                Resolution::Feasible(Vec::new())
            } else {
                Resolution::Infeasible
            };
            if self.policy.memoize {
                self.memo.record(stage, key.clone(), resolution.clone());
            }
            return Probe::Known(resolution);
        }
        if !self.problem.viable(stage, carried) {
            self.counters.pruned += 1;
            return Probe::Known(Resolution::Infeasible);
        }
        Probe::Open
    }

    fn run(&mut self, start: P::Config, start_key: StateKey) -> StagedOutcome<P::Choice> {
        match self.probe(0, &start, &start_key) {
            Probe::Known(Resolution::Feasible(suffix)) => return StagedOutcome::Solved(suffix),
            Probe::Known(Resolution::Infeasible) => return StagedOutcome::NoSolution,
            Probe::Open => {}
        }

        // Invariant: stack[i].stage == i and path.len() == stack.len() - 1.
        let mut stack = vec![Frame {
            stage: 0,
            carried: start,
            key: start_key,
            next_choice: 0,
        }];
        let mut path: Vec<P::Choice> = Vec::new();
        self.counters.frames_pushed = 1;

        while let Some(frame) = stack.last_mut() {
            let stage = frame.stage;
            let Some(&choice) = self.orders[stage].get(frame.next_choice) else {
                // Every choice failed: this subproblem is infeasible.
                if let Some(done) = stack.pop() {
                    if self.policy.memoize {
                        self.memo.record(done.stage, done.key, Resolution::Infeasible);
                    }
                }
                path.pop();
                continue;
            };
            frame.next_choice += 1;

            let next = self.problem.transform(stage, choice, &frame.carried);
            self.counters.transforms += 1;
            let next_key = self.problem.encode(&next);

            match self.probe(stage + 1, &next, &next_key) {
                Probe::Known(Resolution::Infeasible) => {}
                Probe::Known(Resolution::Feasible(suffix)) => {
                    path.push(choice);
                    path.extend(suffix);
                    if self.policy.memoize {
                        for done in stack.drain(..) {
                            let suffix = path[done.stage..].to_vec();
                            self.memo
                                .record(done.stage, done.key, Resolution::Feasible(suffix));
                        }
                    }
                    return StagedOutcome::Solved(path);
                }
                Probe::Open => {
                    if self.counters.frames_pushed >= self.policy.max_frames {
                        return StagedOutcome::FrameBudgetExceeded;
                    }
                    path.push(choice);
                    stack.push(Frame {
                        stage: stage + 1,
                        carried: next,
                        key: next_key,
                        next_choice: 0,
                    });
                    self.counters.frames_pushed += 1;
                }
            }
        }
        StagedOutcome::NoSolution
    }
}

/// Run a staged search with a fresh memo table.
///
/// # Errors
///
/// Returns [`SearchError::InvalidPolicy`] if the policy fails validation.
pub fn staged_search<P: StagedProblem>(
    problem: &P,
    start: P::Config,
    preference: Preference,
    policy: &StagedPolicy,
) -> Result<StagedResult<P::Choice>, SearchError> {
    let mut memo = MemoTable::new();
    staged_search_with_memo(problem, start, preference, policy, &mut memo)
}

/// Run a staged search against a caller-owned memo table.
///
/// The table binds to `problem_id:preference` on first use; reusing it for a
/// different problem or preference is rejected. When `policy.memoize` is
/// `false` the table is neither read nor written.
///
/// # Errors
///
/// Returns [`SearchError::InvalidPolicy`] if the policy fails validation, or
/// [`SearchError::MemoMismatch`] if `memo` is bound to another problem or
/// preference.
pub fn staged_search_with_memo<P: StagedProblem>(
    problem: &P,
    start: P::Config,
    preference: Preference,
    policy: &StagedPolicy,
    memo: &mut MemoTable<P::Choice>,
) -> Result<StagedResult<P::Choice>, SearchError> {
    policy.validate()?;
    let label = format!("{}:{}", problem.problem_id(), preference.as_str());
    if policy.memoize {
        memo.bind(&label).map_err(|bound| SearchError::MemoMismatch {
            bound,
            requested: label.clone(),
        })?;
    }

    let orders = (0..problem.stage_count())
        .map(|stage| {
            let mut order = problem.choices(stage);
            if preference == Preference::Descending {
                order.reverse();
            }
            order
        })
        .collect();

    let start_key = problem.encode(&start);
    let start_fingerprint = start_key.fingerprint();

    let mut run = StagedRun {
        problem,
        policy,
        memo,
        orders,
        counters: StagedCounters::default(),
    };
    let outcome = run.run(start, start_key);
    let mut counters = run.counters;
    counters.memo_entries = run.memo.len();

    let decisions = match &outcome {
        StagedOutcome::Solved(choices) => choices.len() as u64,
        _ => 0,
    };
    let report = StagedReport {
        problem_id: problem.problem_id().to_string(),
        start_fingerprint,
        preference: preference.as_str(),
        outcome: outcome.as_str(),
        decisions,
        counters,
        policy: policy.to_json_value(),
    };
    Ok(StagedResult { outcome, report })
}
