//! Shared fixtures and synthetic worlds for the lock tests and the
//! `solve_fixture` binary.

#![forbid(unsafe_code)]

pub mod graphs;
