//! Cross-process determinism.
//!
//! Spawns the `solve_fixture` binary under four environment variants and
//! asserts that all produce identical output, and that the output matches
//! an in-process run. Answers and digests must not depend on cwd, locale
//! or unrelated environment variables.

use std::io::Write as _;
use std::path::Path;
use std::process::Command;

use lock_tests::fixtures::{monad_paired_program, CHITON_EXAMPLE};
use waypoint_harness::policy::RunConfig;
use waypoint_harness::runner::run;

const BIN: &str = env!("CARGO_BIN_EXE_solve_fixture");

fn workspace_root() -> String {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("tests/ exists")
        .parent()
        .expect("workspace root exists")
        .to_string_lossy()
        .to_string()
}

fn write_input(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("create temp input");
    file.write_all(content.as_bytes()).expect("write temp input");
    file
}

/// Run the binary with the given cwd and environment overrides.
fn run_variant(args: &[&str], work_dir: &str, env_overrides: &[(&str, &str)]) -> String {
    let mut command = Command::new(BIN);
    command.args(args).current_dir(work_dir);

    command
        .env_remove("LC_ALL")
        .env_remove("LC_COLLATE")
        .env_remove("LANG")
        .env_remove("LANGUAGE");

    for &(key, val) in env_overrides {
        command.env(key, val);
    }

    let output = command.output().unwrap_or_else(|e| {
        panic!("failed to spawn {BIN} (work_dir={work_dir}, overrides={env_overrides:?}): {e}")
    });

    assert!(
        output.status.success(),
        "solve_fixture exited with {}: stderr={}",
        output.status,
        String::from_utf8_lossy(&output.stderr)
    );

    String::from_utf8(output.stdout).expect("stdout is valid UTF-8")
}

fn assert_four_variants_agree(puzzle_id: &str, input: &str) {
    let file = write_input(input);
    let path = file.path().to_string_lossy().to_string();
    let args = [puzzle_id, path.as_str(), "--digests"];
    let root = workspace_root();

    let baseline = run_variant(&args, &root, &[]);

    // The process output must be exactly what an in-process run records.
    let record = run(puzzle_id, input, &RunConfig::default()).unwrap();
    let expected = format!(
        "{}\ninput_digest={}\npart1_report_digest={}\npart2_report_digest={}\nrun_digest={}\n",
        record.answers,
        record.input_digest.as_str(),
        record.report_digests[0].as_str(),
        record.report_digests[1].as_str(),
        record.digest().unwrap().as_str(),
    );
    assert_eq!(baseline, expected, "{puzzle_id}: process and in-process runs differ");

    let alt_cwd = std::env::temp_dir().to_string_lossy().to_string();
    let variant_cwd = run_variant(&args, &alt_cwd, &[]);
    assert_eq!(
        baseline, variant_cwd,
        "{puzzle_id}: output differs when cwd changes from {root} to {alt_cwd}"
    );

    let variant_locale = run_variant(&args, &root, &[("LC_ALL", "C"), ("LANG", "C")]);
    assert_eq!(
        baseline, variant_locale,
        "{puzzle_id}: output differs when LC_ALL=C LANG=C"
    );

    let variant_noise = run_variant(
        &args,
        &root,
        &[
            ("WAYPOINT_NOISE", "should_not_matter"),
            ("TZ", "America/New_York"),
            ("HOME", "/nonexistent"),
        ],
    );
    assert_eq!(
        baseline, variant_noise,
        "{puzzle_id}: output differs with spurious env vars (WAYPOINT_NOISE, TZ, HOME)"
    );
}

#[test]
fn chiton_crossproc_four_env_variants() {
    assert_four_variants_agree("chiton", CHITON_EXAMPLE);
}

#[test]
fn monad_crossproc_four_env_variants() {
    assert_four_variants_agree("monad", &monad_paired_program());
}

#[test]
fn plain_output_is_two_answer_lines() {
    let file = write_input(CHITON_EXAMPLE);
    let path = file.path().to_string_lossy().to_string();
    let output = run_variant(&["chiton", path.as_str()], &workspace_root(), &[]);
    assert_eq!(output, "40\n315\n");
}

#[test]
fn unknown_puzzle_exits_with_failure() {
    let file = write_input(CHITON_EXAMPLE);
    let output = Command::new(BIN)
        .arg("lanternfish")
        .arg(file.path())
        .output()
        .expect("spawn solve_fixture");
    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
}

#[test]
fn missing_arguments_is_a_usage_error() {
    let output = Command::new(BIN).output().expect("spawn solve_fixture");
    assert_eq!(output.status.code(), Some(1));
}
