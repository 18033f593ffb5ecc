//! Waypoint Kernel: canonical state keys and the hashing spine.
//!
//! # API Surface
//!
//! - [`carrier::key::StateKey`] -- canonical, comparable encoding of a configuration
//! - [`carrier::codec::StateCodec`] -- configuration <-> key conversion contract
//! - [`proof::hash::canonical_hash`] -- domain-separated SHA-256 over bytes
//! - [`proof::canon::canonical_json_bytes`] -- the single canonical JSON writer
//!
//! # Module Dependency Direction
//!
//! `carrier` ← `proof`
//!
//! One-way only. `proof` may fingerprint carrier types; `carrier` depends on
//! nothing internal except the fingerprint helper on [`carrier::key::StateKey`].

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod carrier;
pub mod proof;
