//! Typed search errors.
//!
//! `SearchError` represents pre-flight failures and broken codec contracts
//! only. Ordinary negative outcomes (unreachable goal, no feasible decision
//! sequence, exhausted budget) are values: see
//! [`crate::report::Termination`] and [`crate::staged::StagedOutcome`].

use waypoint_kernel::carrier::key::CodecError;

/// Typed failure for search execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// A policy failed pre-flight validation.
    InvalidPolicy { detail: String },
    /// A memo table bound to one problem/preference was reused for another.
    MemoMismatch { bound: String, requested: String },
    /// A stored key could not be decoded back into a configuration.
    Codec(CodecError),
}

impl std::fmt::Display for SearchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPolicy { detail } => write!(f, "invalid search policy: {detail}"),
            Self::MemoMismatch { bound, requested } => {
                write!(f, "memo table bound to {bound} reused for {requested}")
            }
            Self::Codec(e) => write!(f, "state key decode failed: {e}"),
        }
    }
}

impl std::error::Error for SearchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Codec(e) => Some(e),
            _ => None,
        }
    }
}

impl From<CodecError> for SearchError {
    fn from(e: CodecError) -> Self {
        Self::Codec(e)
    }
}
