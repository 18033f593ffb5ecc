//! Harness runner: parses a puzzle input and answers both parts.
//!
//! The runner uses ONLY the [`Puzzle`] contract and kernel hashing. It does
//! not implement any search logic itself.
//!
//! # Pipeline
//!
//! ```text
//! RunConfig::validate() → digest input → Puzzle::parse()
//!   → solve_part(One) → solve_part(Two) → RunRecord (+ run digest)
//! ```

use std::path::Path;

use serde_json::json;
use waypoint_kernel::proof::canon::{canonical_json_bytes, CanonError};
use waypoint_kernel::proof::hash::{canonical_hash, ContentHash};
use waypoint_kernel::proof::hash_domain::HashDomain;
use waypoint_search::error::SearchError;

use crate::contract::{ParseError, Part, Puzzle};
use crate::policy::RunConfig;
use crate::worlds::burrow::BurrowPuzzle;
use crate::worlds::chiton::ChitonPuzzle;
use crate::worlds::monad::MonadPuzzle;

/// Every puzzle id [`run`] accepts.
pub const PUZZLE_IDS: [&str; 3] = [
    BurrowPuzzle::PUZZLE_ID,
    MonadPuzzle::PUZZLE_ID,
    ChitonPuzzle::PUZZLE_ID,
];

/// Error during a harness run.
#[derive(Debug)]
pub enum HarnessError {
    /// No puzzle is registered under this id.
    UnknownPuzzle { puzzle_id: String },
    /// The input file could not be read.
    Io { path: String, detail: String },
    /// The puzzle input is malformed.
    Parse(ParseError),
    /// An engine rejected its policy or failed internally.
    Search(SearchError),
    /// A report could not be serialized for hashing.
    Canon(CanonError),
    /// The engine proved the goal unreachable.
    Unreachable { part: u8 },
    /// The staged engine proved no choice sequence is accepted.
    NoSolution { part: u8 },
    /// An engine budget ran out before an answer was found.
    BudgetExceeded { part: u8 },
    /// An answer failed independent verification.
    VerificationFailed { part: u8, detail: String },
}

impl std::fmt::Display for HarnessError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownPuzzle { puzzle_id } => write!(
                f,
                "unknown puzzle {puzzle_id:?} (expected one of {})",
                PUZZLE_IDS.join(", ")
            ),
            Self::Io { path, detail } => write!(f, "cannot read {path}: {detail}"),
            Self::Parse(e) => write!(f, "parse error: {e}"),
            Self::Search(e) => write!(f, "search error: {e}"),
            Self::Canon(e) => write!(f, "report serialization failed: {e}"),
            Self::Unreachable { part } => write!(f, "part {part}: goal is unreachable"),
            Self::NoSolution { part } => write!(f, "part {part}: no accepted sequence exists"),
            Self::BudgetExceeded { part } => write!(f, "part {part}: engine budget exceeded"),
            Self::VerificationFailed { part, detail } => {
                write!(f, "part {part}: verification failed: {detail}")
            }
        }
    }
}

impl std::error::Error for HarnessError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(e) => Some(e),
            Self::Search(e) => Some(e),
            Self::Canon(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ParseError> for HarnessError {
    fn from(e: ParseError) -> Self {
        Self::Parse(e)
    }
}

impl From<SearchError> for HarnessError {
    fn from(e: SearchError) -> Self {
        Self::Search(e)
    }
}

impl From<CanonError> for HarnessError {
    fn from(e: CanonError) -> Self {
        Self::Canon(e)
    }
}

/// The two integer answers of a puzzle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Answers {
    pub part1: u64,
    pub part2: u64,
}

impl std::fmt::Display for Answers {
    /// Exactly two integers, one per line.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}\n{}", self.part1, self.part2)
    }
}

/// Everything a run produced, in a form that digests deterministically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunRecord {
    pub puzzle_id: &'static str,
    pub input_digest: ContentHash,
    pub answers: Answers,
    /// Engine report digests for part 1 and part 2.
    pub report_digests: [ContentHash; 2],
    /// Digest of the best-first policy, so records from A* and uniform-cost
    /// runs never collide.
    pub search_policy_digest: ContentHash,
    pub config: serde_json::Value,
}

impl RunRecord {
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        json!({
            "puzzle_id": self.puzzle_id,
            "input_digest": self.input_digest.as_str(),
            "answers": [self.answers.part1, self.answers.part2],
            "report_digests": [
                self.report_digests[0].as_str(),
                self.report_digests[1].as_str(),
            ],
            "search_policy_digest": self.search_policy_digest.as_str(),
            "config": self.config,
        })
    }

    /// Digest of the canonical record.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if serialization fails.
    pub fn digest(&self) -> Result<ContentHash, CanonError> {
        let bytes = canonical_json_bytes(&self.to_json_value())?;
        Ok(canonical_hash(HashDomain::RunDigest, &bytes))
    }
}

fn run_puzzle<P: Puzzle>(
    input: &str,
    input_digest: ContentHash,
    config: &RunConfig,
) -> Result<RunRecord, HarnessError> {
    let puzzle = P::parse(input)?;
    let one = puzzle.solve_part(Part::One, config)?;
    let two = puzzle.solve_part(Part::Two, config)?;
    Ok(RunRecord {
        puzzle_id: P::PUZZLE_ID,
        input_digest,
        answers: Answers {
            part1: one.answer,
            part2: two.answer,
        },
        report_digests: [one.report_digest, two.report_digest],
        search_policy_digest: config.search.digest(),
        config: config.to_json_value(),
    })
}

/// Run `puzzle_id` on `input` and keep the full record.
///
/// # Errors
///
/// Returns [`HarnessError`] if the id is unknown, a policy is invalid, the
/// input does not parse, or either part has no answer.
pub fn run(puzzle_id: &str, input: &str, config: &RunConfig) -> Result<RunRecord, HarnessError> {
    config.validate()?;
    let input_digest = canonical_hash(HashDomain::PuzzleInput, input.as_bytes());
    match puzzle_id {
        BurrowPuzzle::PUZZLE_ID => run_puzzle::<BurrowPuzzle>(input, input_digest, config),
        MonadPuzzle::PUZZLE_ID => run_puzzle::<MonadPuzzle>(input, input_digest, config),
        ChitonPuzzle::PUZZLE_ID => run_puzzle::<ChitonPuzzle>(input, input_digest, config),
        _ => Err(HarnessError::UnknownPuzzle {
            puzzle_id: puzzle_id.to_string(),
        }),
    }
}

/// Run `puzzle_id` on `input` and return both answers.
///
/// # Errors
///
/// See [`run`].
pub fn solve(puzzle_id: &str, input: &str, config: &RunConfig) -> Result<Answers, HarnessError> {
    run(puzzle_id, input, config).map(|record| record.answers)
}

/// Read `path` and [`run`] it.
///
/// # Errors
///
/// Returns [`HarnessError::Io`] if the file cannot be read, otherwise see
/// [`run`].
pub fn run_file(
    puzzle_id: &str,
    path: &Path,
    config: &RunConfig,
) -> Result<RunRecord, HarnessError> {
    let input = std::fs::read_to_string(path).map_err(|e| HarnessError::Io {
        path: path.display().to_string(),
        detail: e.to_string(),
    })?;
    run(puzzle_id, &input, config)
}
