//! Blake3 digests used for module accounts and store commitments.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A 256-bit Blake3 digest.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Hash(pub [u8; 32]);

impl Hash {
    /// The zero hash (all zeros).
    pub const ZERO: Self = Self([0u8; 32]);

    /// Get the underlying bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert to a hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hash(0x{})", &self.to_hex()[..8])
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", self.to_hex())
    }
}

impl AsRef<[u8]> for Hash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Hash arbitrary data using Blake3.
pub fn hash(data: &[u8]) -> Hash {
    Hash(blake3::hash(data).into())
}

/// Incremental digest over an ordered stream of key/value pairs.
///
/// Each key and value is framed with its little-endian u64 length, so
/// `("ab", "c")` and `("a", "bc")` hash differently.
pub struct StateHasher {
    inner: blake3::Hasher,
    entries: u64,
}

impl StateHasher {
    pub fn new() -> Self {
        Self {
            inner: blake3::Hasher::new(),
            entries: 0,
        }
    }

    /// Feed one entry. Callers must feed entries in key order.
    pub fn update(&mut self, key: &[u8], value: &[u8]) {
        self.inner.update(&(key.len() as u64).to_le_bytes());
        self.inner.update(key);
        self.inner.update(&(value.len() as u64).to_le_bytes());
        self.inner.update(value);
        self.entries += 1;
    }

    /// Number of entries fed so far.
    pub fn entries(&self) -> u64 {
        self.entries
    }

    /// Finish the digest. An empty stream yields [`Hash::ZERO`].
    pub fn finalize(&self) -> Hash {
        if self.entries == 0 {
            return Hash::ZERO;
        }
        Hash(self.inner.finalize().into())
    }
}

impl Default for StateHasher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_deterministic() {
        assert_eq!(hash(b"hello world"), hash(b"hello world"));
        assert_ne!(hash(b"hello"), hash(b"world"));
    }

    #[test]
    fn test_hash_display() {
        let display = format!("{}", hash(b"test"));
        assert!(display.starts_with("0x"));
        assert_eq!(display.len(), 66);
    }

    #[test]
    fn test_state_hasher_empty_is_zero() {
        let hasher = StateHasher::new();
        assert_eq!(hasher.finalize(), Hash::ZERO);
    }

    #[test]
    fn test_state_hasher_framing() {
        let mut a = StateHasher::new();
        a.update(b"ab", b"c");
        let mut b = StateHasher::new();
        b.update(b"a", b"bc");
        assert_ne!(a.finalize(), b.finalize());
        assert_eq!(a.entries(), 1);
    }

    #[test]
    fn test_state_hasher_order_sensitive() {
        let mut a = StateHasher::new();
        a.update(b"k1", b"v1");
        a.update(b"k2", b"v2");
        let mut b = StateHasher::new();
        b.update(b"k2", b"v2");
        b.update(b"k1", b"v1");
        assert_ne!(a.finalize(), b.finalize());
    }
}
