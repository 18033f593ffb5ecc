//! End-to-end answers through the runner for every registered puzzle.

use lock_tests::fixtures::{
    monad_paired_program, BURROW_EXAMPLE, BURROW_EXAMPLE_ANSWERS, BURROW_FIXTURE,
    BURROW_FIXTURE_ANSWERS, CHITON_EXAMPLE, CHITON_EXAMPLE_ANSWERS, MONAD_PAIRED_ANSWERS,
};
use waypoint_harness::policy::{ChitonSolver, RunConfig};
use waypoint_harness::runner::{solve, HarnessError, PUZZLE_IDS};

fn pair(answers: waypoint_harness::runner::Answers) -> (u64, u64) {
    (answers.part1, answers.part2)
}

#[test]
fn burrow_example() {
    let answers = solve("burrow", BURROW_EXAMPLE, &RunConfig::default()).unwrap();
    assert_eq!(pair(answers), BURROW_EXAMPLE_ANSWERS);
    assert_eq!(answers.to_string(), "12521\n44169");
}

#[test]
fn chiton_example_best_first() {
    let answers = solve("chiton", CHITON_EXAMPLE, &RunConfig::default()).unwrap();
    assert_eq!(pair(answers), CHITON_EXAMPLE_ANSWERS);
}

#[test]
fn chiton_example_relaxation() {
    let config = RunConfig {
        chiton_solver: ChitonSolver::Relax,
        ..RunConfig::default()
    };
    let answers = solve("chiton", CHITON_EXAMPLE, &config).unwrap();
    assert_eq!(pair(answers), CHITON_EXAMPLE_ANSWERS);
}

#[test]
fn burrow_regression_fixture() {
    let answers = solve("burrow", BURROW_FIXTURE, &RunConfig::default()).unwrap();
    assert_eq!(pair(answers), BURROW_FIXTURE_ANSWERS);
}

#[test]
fn monad_paired_program_answers() {
    let answers = solve("monad", &monad_paired_program(), &RunConfig::default()).unwrap();
    assert_eq!(pair(answers), MONAD_PAIRED_ANSWERS);
}

#[test]
fn every_registered_puzzle_is_routed() {
    for id in PUZZLE_IDS {
        let err = solve(id, "", &RunConfig::default()).unwrap_err();
        assert!(
            !matches!(err, HarnessError::UnknownPuzzle { .. }),
            "{id} is listed but not routed"
        );
    }
}

#[test]
fn expansion_budget_surfaces_as_an_error() {
    let mut config = RunConfig::default();
    config.search.max_expansions = 5;
    let err = solve("burrow", BURROW_EXAMPLE, &config).unwrap_err();
    assert!(matches!(err, HarnessError::BudgetExceeded { part: 1 }));
}
