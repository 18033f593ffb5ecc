//! Canonical JSON bytes: the single serialization-for-hashing implementation.
//!
//! # Canonicalization rules
//!
//! 1. Object keys are sorted lexicographically (byte order).
//! 2. Compact form, no whitespace: `{"a":1,"b":2}`.
//! 3. Numbers must be integers. Floats are rejected so that report digests
//!    never depend on float formatting.
//!
//! `serde_json::Map` is a `BTreeMap` unless the `preserve_order` feature is
//! enabled, so rule 1 is re-established explicitly on a rebuilt value rather
//! than trusted to the feature set of whoever links this crate.

use serde_json::{Map, Value};

/// Error type for canonical JSON serialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CanonError {
    /// A JSON number was not an integer (float, NaN, Infinity).
    NonIntegerNumber { raw: String },
    /// `serde_json` failed to write the value.
    Serialize { detail: String },
}

impl std::fmt::Display for CanonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonIntegerNumber { raw } => {
                write!(f, "non-integer number in canonical JSON: {raw}")
            }
            Self::Serialize { detail } => write!(f, "canonical JSON write failed: {detail}"),
        }
    }
}

impl std::error::Error for CanonError {}

/// Produce canonical JSON bytes from a `serde_json::Value`.
///
/// # Errors
///
/// Returns [`CanonError::NonIntegerNumber`] if any number is not an `i64` or
/// `u64`.
pub fn canonical_json_bytes(value: &Value) -> Result<Vec<u8>, CanonError> {
    let sorted = canonicalize(value)?;
    serde_json::to_vec(&sorted).map_err(|e| CanonError::Serialize {
        detail: e.to_string(),
    })
}

fn canonicalize(value: &Value) -> Result<Value, CanonError> {
    Ok(match value {
        Value::Number(n) if n.as_i64().is_none() && n.as_u64().is_none() => {
            return Err(CanonError::NonIntegerNumber { raw: n.to_string() });
        }
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(canonicalize)
                .collect::<Result<Vec<_>, _>>()?,
        ),
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.as_bytes().cmp(b.0.as_bytes()));
            let mut out = Map::new();
            for (k, v) in entries {
                out.insert(k.clone(), canonicalize(v)?);
            }
            Value::Object(out)
        }
        other => other.clone(),
    })
}
