//! Waypoint Harness: puzzle-level orchestration for the search engines.
//!
//! The harness parses puzzle input into worlds, picks the engine for each
//! part, and turns engine outcomes into answers. It does NOT implement
//! search logic; it delegates to `waypoint_search`.
//!
//! Puzzles provide domain rules only (moves, heuristics, stage transforms);
//! the runner owns configuration and the run record.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod contract;
pub mod grid;
pub mod policy;
pub mod runner;
pub mod worlds;
