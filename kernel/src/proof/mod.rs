//! Proof module: canonical hashing and canonical JSON.
//!
//! Reports produced by the search engines are digested here so that two runs
//! can be compared byte-for-byte.

pub mod canon;
pub mod hash;
pub mod hash_domain;
