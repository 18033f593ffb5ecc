//! Puzzle implementations for the harness runner.

pub mod alu;
pub mod burrow;
pub mod chiton;
pub mod monad;

use waypoint_search::report::Termination;
use waypoint_search::search::SearchResult;

use crate::contract::{Part, PartOutcome};
use crate::runner::HarnessError;

/// Turn a best-first result into an answer, or the matching harness error.
pub(crate) fn answer_from_search<C>(
    part: Part,
    result: &SearchResult<C>,
) -> Result<PartOutcome, HarnessError> {
    let part = part.number();
    match result.report.termination {
        Termination::GoalReached { cost, .. } => Ok(PartOutcome {
            answer: cost,
            report_digest: result.report.digest()?,
        }),
        Termination::FrontierExhausted => Err(HarnessError::Unreachable { part }),
        Termination::ExpansionBudgetExceeded => Err(HarnessError::BudgetExceeded { part }),
    }
}
