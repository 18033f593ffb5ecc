//! Binary that solves one puzzle input and prints deterministic output for
//! cross-process verification.
//!
//! Usage: `solve_fixture <puzzle_id> <input_path> [--digests]`
//!
//! Output: the two answers, one per line. With `--digests`, four more
//! lines follow, each `key=value`:
//!   `input_digest`=sha256:...
//!   `part1_report_digest`=sha256:...
//!   `part2_report_digest`=sha256:...
//!   `run_digest`=sha256:...
//!
//! Exits 1 on bad usage and 2 if the run fails.

use std::path::Path;
use std::process::ExitCode;

use waypoint_harness::policy::RunConfig;
use waypoint_harness::runner::{run_file, RunRecord};

fn print_digests(record: &RunRecord) -> Result<(), String> {
    let run_digest = record.digest().map_err(|e| e.to_string())?;
    println!("input_digest={}", record.input_digest.as_str());
    println!("part1_report_digest={}", record.report_digests[0].as_str());
    println!("part2_report_digest={}", record.report_digests[1].as_str());
    println!("run_digest={}", run_digest.as_str());
    Ok(())
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (puzzle_id, input_path, digests) = match args.as_slice() {
        [id, path] => (id, path, false),
        [id, path, flag] if flag == "--digests" => (id, path, true),
        _ => {
            eprintln!("usage: solve_fixture <puzzle_id> <input_path> [--digests]");
            return ExitCode::from(1);
        }
    };

    let record = match run_file(puzzle_id, Path::new(input_path), &RunConfig::default()) {
        Ok(record) => record,
        Err(e) => {
            eprintln!("solve_fixture: {e}");
            return ExitCode::from(2);
        }
    };

    println!("{}", record.answers);
    if digests {
        if let Err(e) = print_digests(&record) {
            eprintln!("solve_fixture: {e}");
            return ExitCode::from(2);
        }
    }
    ExitCode::SUCCESS
}
