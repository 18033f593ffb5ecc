//! Waypoint Search: deterministic search engines over canonical state keys.
//!
//! This crate provides the engines. It depends only on `waypoint_kernel`; it
//! does NOT depend on `waypoint_harness`.
//!
//! # Crate dependency graph
//!
//! ```text
//! waypoint_kernel  ←  waypoint_search  ←  waypoint_harness
//! (keys, hashing)     (engines)            (puzzle worlds, runner)
//! ```
//!
//! # Engines
//!
//! - [`search::best_first_search`] -- A* / uniform-cost search to any goal
//! - [`staged::staged_search`] -- memoized depth-first search over a fixed
//!   sequence of decision stages
//! - [`relax::shortest_distances`] -- FIFO label-correcting relaxation that
//!   computes every shortest distance from a start
//!
//! # Key types
//!
//! - [`contract::SearchWorld`] -- transitions, heuristic and goal for a domain
//! - [`staged::StagedProblem`] -- stages, choices and transforms for a domain
//! - [`frontier::BestFirstFrontier`] -- the open set
//! - [`cost::CostTable`] -- best-known cost per state key
//! - [`memo::MemoTable`] -- write-once subproblem cache
//! - [`report::SearchReport`] -- the audit record every engine returns

#![forbid(unsafe_code)]

pub mod contract;
pub mod cost;
pub mod error;
pub mod frontier;
pub mod memo;
pub mod node;
pub mod policy;
pub mod relax;
pub mod report;
pub mod search;
pub mod staged;
