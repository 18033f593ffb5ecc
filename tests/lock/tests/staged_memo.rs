//! Staged search memoization lock tests.
//!
//! Memoization is an optimization only: turning it off must not change the
//! chosen sequence. An injected table must be reusable for the same
//! question and refused for a different one.

use lock_tests::fixtures::{monad_block, monad_paired_program, MONAD_PAIRED_ANSWERS};
use waypoint_harness::contract::Puzzle;
use waypoint_harness::worlds::monad::{MonadProblem, MonadPuzzle};
use waypoint_search::error::SearchError;
use waypoint_search::memo::MemoTable;
use waypoint_search::policy::StagedPolicy;
use waypoint_search::staged::{staged_search, staged_search_with_memo, Preference};

fn paired_problem() -> MonadProblem {
    MonadPuzzle::parse(&monad_paired_program())
        .unwrap()
        .problem()
        .clone()
}

fn as_number(digits: &[u8]) -> u64 {
    digits.iter().fold(0, |n, &d| n * 10 + u64::from(d))
}

fn no_memo() -> StagedPolicy {
    StagedPolicy {
        memoize: false,
        ..StagedPolicy::default()
    }
}

#[test]
fn memo_on_and_off_choose_the_same_sequence() {
    let problem = paired_problem();
    for preference in [Preference::Descending, Preference::Ascending] {
        let with = staged_search(&problem, 0, preference, &StagedPolicy::default()).unwrap();
        let without = staged_search(&problem, 0, preference, &no_memo()).unwrap();
        assert_eq!(with.outcome, without.outcome, "{preference:?}");
        assert_eq!(without.report.counters.memo_hits, 0);
        assert_eq!(without.report.counters.memo_entries, 0);
        assert!(with.report.counters.memo_entries > 0);
    }
}

#[test]
fn preferences_pick_the_extremes() {
    let problem = paired_problem();
    let high = staged_search(&problem, 0, Preference::Descending, &StagedPolicy::default()).unwrap();
    let low = staged_search(&problem, 0, Preference::Ascending, &StagedPolicy::default()).unwrap();
    assert_eq!(
        (
            as_number(high.choices().unwrap()),
            as_number(low.choices().unwrap())
        ),
        MONAD_PAIRED_ANSWERS
    );
    assert_eq!(high.report.preference, "descending");
    assert_eq!(low.report.preference, "ascending");
}

#[test]
fn injected_memo_answers_a_repeated_question_without_work() {
    let problem = paired_problem();
    let policy = StagedPolicy::default();
    let mut memo = MemoTable::new();

    let first =
        staged_search_with_memo(&problem, 0, Preference::Descending, &policy, &mut memo).unwrap();
    assert_eq!(memo.binding(), Some("monad:descending"));
    let entries = memo.len();

    let second =
        staged_search_with_memo(&problem, 0, Preference::Descending, &policy, &mut memo).unwrap();
    assert_eq!(first.outcome, second.outcome);
    assert_eq!(second.report.counters.transforms, 0);
    assert_eq!(second.report.counters.memo_hits, 1);
    assert_eq!(memo.len(), entries);
}

#[test]
fn memo_bound_to_one_preference_rejects_the_other() {
    let problem = paired_problem();
    let policy = StagedPolicy::default();
    let mut memo = MemoTable::new();
    staged_search_with_memo(&problem, 0, Preference::Descending, &policy, &mut memo).unwrap();

    let err = staged_search_with_memo(&problem, 0, Preference::Ascending, &policy, &mut memo)
        .unwrap_err();
    match err {
        SearchError::MemoMismatch { bound, requested } => {
            assert_eq!(bound, "monad:descending");
            assert_eq!(requested, "monad:ascending");
        }
        other => panic!("expected MemoMismatch, got {other:?}"),
    }
}

#[test]
fn disabled_memo_ignores_the_injected_table() {
    let problem = paired_problem();
    let mut memo = MemoTable::new();
    staged_search_with_memo(
        &problem,
        0,
        Preference::Descending,
        &StagedPolicy::default(),
        &mut memo,
    )
    .unwrap();
    let entries = memo.len();

    let result =
        staged_search_with_memo(&problem, 0, Preference::Ascending, &no_memo(), &mut memo).unwrap();
    assert!(result.choices().is_some());
    assert_eq!(memo.len(), entries);
    assert_eq!(memo.binding(), Some("monad:descending"));
}

#[test]
fn unsatisfiable_program_has_no_solution_either_way() {
    // A lone pop block that can never match leaves z = w + 5 > 0.
    let source = monad_block(26, 20, 5);
    let problem = MonadPuzzle::parse(&source).unwrap().problem().clone();
    for policy in [StagedPolicy::default(), no_memo()] {
        let result = staged_search(&problem, 0, Preference::Descending, &policy).unwrap();
        assert!(result.choices().is_none());
        assert_eq!(result.report.outcome, "no_solution");
    }
}
