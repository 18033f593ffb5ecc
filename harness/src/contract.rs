//! Puzzle contract: the minimal trait a puzzle must implement.
//!
//! A puzzle parses its own input and knows which engine answers each part.
//! Puzzles may NOT implement search, memoization or report hashing; those
//! are `waypoint_search` and `waypoint_kernel` concerns.

use waypoint_kernel::proof::hash::ContentHash;

use crate::policy::RunConfig;
use crate::runner::HarnessError;

/// Malformed puzzle input. Always fatal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// 1-based input line the problem was found on.
    pub line: usize,
    pub detail: String,
}

impl ParseError {
    pub fn new(line: usize, detail: impl Into<String>) -> Self {
        Self {
            line,
            detail: detail.into(),
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}: {}", self.line, self.detail)
    }
}

impl std::error::Error for ParseError {}

/// Which half of a puzzle is being answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Part {
    One,
    Two,
}

impl Part {
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
        }
    }
}

/// One answered part: the integer answer and the digest of the engine
/// report that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartOutcome {
    pub answer: u64,
    pub report_digest: ContentHash,
}

/// The contract a puzzle must implement to be run by [`crate::runner`].
pub trait Puzzle: Sized {
    /// Unique puzzle identifier (e.g., `"burrow"`).
    const PUZZLE_ID: &'static str;

    /// Parse the full puzzle input.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] if the input is malformed.
    fn parse(input: &str) -> Result<Self, ParseError>;

    /// Answer one part.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError`] if the engine fails, finds no answer, or the
    /// answer fails verification.
    fn solve_part(&self, part: Part, config: &RunConfig) -> Result<PartOutcome, HarnessError>;
}
