//! In-process determinism: N=10 identical runs must produce identical
//! answers, report digests and run digests.

use lock_tests::fixtures::{
    monad_paired_program, BURROW_FIXTURE, CHITON_EXAMPLE, CHITON_EXAMPLE_ANSWERS,
    MONAD_PAIRED_ANSWERS,
};
use serde_json::json;
use waypoint_harness::contract::{Part, Puzzle};
use waypoint_harness::policy::{ChitonSolver, RunConfig};
use waypoint_harness::runner::run;
use waypoint_harness::worlds::burrow::BurrowPuzzle;
use waypoint_search::policy::HeuristicMode;

const RUNS: usize = 10;

fn assert_run_digest_stable(puzzle_id: &str, input: &str, config: &RunConfig) {
    let first = run(puzzle_id, input, config).unwrap();
    let first_digest = first.digest().unwrap();
    for i in 1..RUNS {
        let record = run(puzzle_id, input, config).unwrap();
        assert_eq!(first, record, "{puzzle_id} record differed on run {i}");
        assert_eq!(
            first_digest,
            record.digest().unwrap(),
            "{puzzle_id} run digest differed on run {i}"
        );
    }
}

#[test]
fn chiton_best_first_deterministic_n10() {
    assert_run_digest_stable("chiton", CHITON_EXAMPLE, &RunConfig::default());
}

#[test]
fn chiton_relaxation_deterministic_n10() {
    let config = RunConfig {
        chiton_solver: ChitonSolver::Relax,
        ..RunConfig::default()
    };
    assert_run_digest_stable("chiton", CHITON_EXAMPLE, &config);
}

#[test]
fn monad_deterministic_n10() {
    let program = monad_paired_program();
    assert_run_digest_stable("monad", &program, &RunConfig::default());
    let record = run("monad", &program, &RunConfig::default()).unwrap();
    assert_eq!(
        (record.answers.part1, record.answers.part2),
        MONAD_PAIRED_ANSWERS
    );
}

/// Part 1 only: the unfolded burrow is too slow to repeat ten times in a
/// debug build.
#[test]
fn burrow_part_one_deterministic_n10() {
    let puzzle = BurrowPuzzle::parse(BURROW_FIXTURE).unwrap();
    let config = RunConfig::default();
    let first = puzzle.solve_part(Part::One, &config).unwrap();
    for i in 1..RUNS {
        let outcome = puzzle.solve_part(Part::One, &config).unwrap();
        assert_eq!(first.answer, outcome.answer, "answer differed on run {i}");
        assert_eq!(
            first.report_digest, outcome.report_digest,
            "report digest differed on run {i}"
        );
    }
}

#[test]
fn heuristic_mode_changes_report_not_answer() {
    let puzzle = BurrowPuzzle::parse(BURROW_FIXTURE).unwrap();
    let informed = puzzle.solve_part(Part::One, &RunConfig::default()).unwrap();
    let mut config = RunConfig::default();
    config.search.heuristic_mode = HeuristicMode::Zero;
    let blind = puzzle.solve_part(Part::One, &config).unwrap();
    assert_eq!(informed.answer, blind.answer);
    assert_ne!(informed.report_digest, blind.report_digest);
}

#[test]
fn different_inputs_have_different_run_digests() {
    let config = RunConfig::default();
    let a = run("chiton", CHITON_EXAMPLE, &config).unwrap();
    let b = run("chiton", &CHITON_EXAMPLE.replacen('1', "2", 1), &config).unwrap();
    assert_eq!(
        (a.answers.part1, a.answers.part2),
        CHITON_EXAMPLE_ANSWERS
    );
    assert_ne!(a.input_digest, b.input_digest);
    assert_ne!(a.digest().unwrap(), b.digest().unwrap());
}

#[test]
fn run_record_json_carries_answers_and_config() {
    let config = RunConfig::default();
    let record = run("chiton", CHITON_EXAMPLE, &config).unwrap();
    let value = record.to_json_value();
    assert_eq!(value["puzzle_id"], json!("chiton"));
    assert_eq!(value["answers"], json!([40, 315]));
    assert_eq!(value["config"], config.to_json_value());
    assert_eq!(
        value["report_digests"].as_array().map(Vec::len),
        Some(2)
    );
}
