//! Carrier module: state keys and the codec boundary.
//!
//! Every configuration the search engines see crosses into the engine as a
//! [`key::StateKey`]. Nothing in this module knows about a specific puzzle.

pub mod codec;
pub mod key;
