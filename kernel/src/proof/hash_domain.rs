//! Typed domain separators for canonical hashing.
//!
//! Every hash computation selects a domain via [`HashDomain`]. Adding a new
//! domain is a single change here: the enum, `as_bytes()`, `ALL`, and
//! `Display` are all generated from the same macro invocation.

/// Declares `HashDomain` enum, `as_bytes()`, `ALL`, and `Display` from one list.
macro_rules! define_hash_domains {
    (
        $(
            $(#[$meta:meta])*
            $variant:ident => $bytes:expr
        ),+ $(,)?
    ) => {
        /// Typed domain separator for [`super::hash::canonical_hash`].
        ///
        /// Every variant maps to a unique, null-terminated byte string used as
        /// a SHA-256 prefix.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum HashDomain {
            $(
                $(#[$meta])*
                $variant,
            )+
        }

        impl HashDomain {
            /// The raw domain-separator bytes (null-terminated).
            #[must_use]
            pub const fn as_bytes(&self) -> &'static [u8] {
                match self {
                    $( Self::$variant => $bytes, )+
                }
            }

            /// All domain variants in declaration order.
            pub const ALL: &[HashDomain] = &[
                $( Self::$variant, )+
            ];
        }

        impl core::fmt::Display for HashDomain {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                match self {
                    $( Self::$variant => write!(f, stringify!($variant)), )+
                }
            }
        }
    };
}

define_hash_domains! {
    // -----------------------------------------------------------------------
    // Kernel
    // -----------------------------------------------------------------------

    /// `StateKey` fingerprints in audit output.
    StateKey => b"WAYPOINT::STATE_KEY::V1\0",

    // -----------------------------------------------------------------------
    // Search
    // -----------------------------------------------------------------------

    /// Best-first `SearchReport` digests.
    SearchReport => b"WAYPOINT::SEARCH_REPORT::V1\0",

    /// Staged (memoized) search report digests.
    StagedReport => b"WAYPOINT::STAGED_REPORT::V1\0",

    /// Label-correcting relaxation report digests.
    RelaxReport => b"WAYPOINT::RELAX_REPORT::V1\0",

    /// Search policy snapshot digests.
    SearchPolicy => b"WAYPOINT::SEARCH_POLICY::V1\0",

    // -----------------------------------------------------------------------
    // Harness
    // -----------------------------------------------------------------------

    /// Puzzle input digests (binds a run to the exact input text).
    PuzzleInput => b"WAYPOINT::PUZZLE_INPUT::V1\0",

    /// Whole-run digest (answers + per-part report digests).
    RunDigest => b"WAYPOINT::RUN_DIGEST::V1\0",
}
