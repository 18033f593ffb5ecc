//! `StateKey`: the canonical byte encoding of a search configuration.
//!
//! # Layout
//!
//! A key is a flat sequence of fixed-width little-endian fields written by
//! [`KeyWriter`] and read back by [`KeyReader`]. There are no delimiters, so
//! a field value can never be mistaken for a separator: two configurations
//! are equal iff their field sequences are equal.
//!
//! Worlds choose the field order; the kernel only guarantees that the same
//! writes produce the same bytes.

use crate::proof::hash::{canonical_hash, ContentHash};
use crate::proof::hash_domain::HashDomain;

/// Canonical, comparable, hashable encoding of a configuration.
///
/// Ordering is lexicographic over the encoded bytes. The ordering carries no
/// domain meaning; it exists so keys can live in ordered collections when a
/// deterministic iteration order is needed.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StateKey(Box<[u8]>);

impl StateKey {
    /// Wrap raw bytes produced elsewhere (e.g. read back from a report).
    #[must_use]
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self(bytes.into())
    }

    /// The encoded bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Encoded length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the key encodes zero fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Domain-separated SHA-256 of the key bytes, for audit output.
    #[must_use]
    pub fn fingerprint(&self) -> ContentHash {
        canonical_hash(HashDomain::StateKey, &self.0)
    }

    /// Start reading fields back out of this key.
    #[must_use]
    pub fn reader(&self) -> KeyReader<'_> {
        KeyReader {
            bytes: &self.0,
            offset: 0,
        }
    }
}

/// Append-only writer of fixed-width fields.
#[derive(Debug, Default)]
pub struct KeyWriter {
    buf: Vec<u8>,
}

impl KeyWriter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-size the buffer when the encoded width is known.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    pub fn put_u8(&mut self, v: u8) -> &mut Self {
        self.buf.push(v);
        self
    }

    pub fn put_u16(&mut self, v: u16) -> &mut Self {
        self.buf.extend_from_slice(&v.to_le_bytes());
        self
    }

    pub fn put_u32(&mut self, v: u32) -> &mut Self {
        self.buf.extend_from_slice(&v.to_le_bytes());
        self
    }

    pub fn put_i64(&mut self, v: i64) -> &mut Self {
        self.buf.extend_from_slice(&v.to_le_bytes());
        self
    }

    #[must_use]
    pub fn finish(self) -> StateKey {
        StateKey(self.buf.into_boxed_slice())
    }
}

/// Typed failure for decoding a key back into a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// The key ended before a field could be read.
    Truncated { offset: usize, wanted: usize },
    /// Bytes remained after the last expected field.
    TrailingBytes { remaining: usize },
    /// A field held a value outside the domain's alphabet.
    InvalidField { field: &'static str, value: i64 },
}

impl std::fmt::Display for CodecError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Truncated { offset, wanted } => {
                write!(f, "state key truncated at offset {offset} (wanted {wanted} bytes)")
            }
            Self::TrailingBytes { remaining } => {
                write!(f, "state key has {remaining} trailing bytes")
            }
            Self::InvalidField { field, value } => {
                write!(f, "state key field {field} has invalid value {value}")
            }
        }
    }
}

impl std::error::Error for CodecError {}

/// Cursor over the fields of a [`StateKey`].
#[derive(Debug)]
pub struct KeyReader<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> KeyReader<'a> {
    fn take(&mut self, wanted: usize) -> Result<&'a [u8], CodecError> {
        let end = self.offset + wanted;
        if end > self.bytes.len() {
            return Err(CodecError::Truncated {
                offset: self.offset,
                wanted,
            });
        }
        let out = &self.bytes[self.offset..end];
        self.offset = end;
        Ok(out)
    }

    fn take_array<const N: usize>(&mut self) -> Result<[u8; N], CodecError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    /// # Errors
    ///
    /// Returns [`CodecError::Truncated`] if the key is exhausted.
    pub fn u8(&mut self) -> Result<u8, CodecError> {
        Ok(self.take(1)?[0])
    }

    /// # Errors
    ///
    /// Returns [`CodecError::Truncated`] if fewer than 2 bytes remain.
    pub fn u16(&mut self) -> Result<u16, CodecError> {
        Ok(u16::from_le_bytes(self.take_array()?))
    }

    /// # Errors
    ///
    /// Returns [`CodecError::Truncated`] if fewer than 4 bytes remain.
    pub fn u32(&mut self) -> Result<u32, CodecError> {
        Ok(u32::from_le_bytes(self.take_array()?))
    }

    /// # Errors
    ///
    /// Returns [`CodecError::Truncated`] if fewer than 8 bytes remain.
    pub fn i64(&mut self) -> Result<i64, CodecError> {
        Ok(i64::from_le_bytes(self.take_array()?))
    }

    /// Assert that every byte has been consumed.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::TrailingBytes`] if any bytes remain.
    pub fn finish(self) -> Result<(), CodecError> {
        let remaining = self.bytes.len() - self.offset;
        if remaining == 0 {
            Ok(())
        } else {
            Err(CodecError::TrailingBytes { remaining })
        }
    }
}
