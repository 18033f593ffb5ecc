//! The codec contract between a domain configuration and its [`StateKey`].

use crate::carrier::key::{CodecError, StateKey};

/// Converts a domain configuration to and from its canonical key.
///
/// # Contract
///
/// - `encode` is pure and deterministic.
/// - `encode` is injective over every configuration reachable in the domain:
///   distinct configurations never share a key.
/// - `decode(encode(c))` reproduces a configuration equal to `c`. Engines that
///   store keys instead of configurations (parent links, memo tables) rely on
///   this to rebuild results.
pub trait StateCodec {
    /// The domain configuration (a full snapshot of puzzle state).
    type Config: Clone;

    /// Canonical key for `config`.
    fn encode(&self, config: &Self::Config) -> StateKey;

    /// Inverse of [`StateCodec::encode`].
    ///
    /// # Errors
    ///
    /// Returns [`CodecError`] if `key` was not produced by this codec.
    fn decode(&self, key: &StateKey) -> Result<Self::Config, CodecError>;
}
