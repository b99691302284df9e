//! Collection key prefixes.

use std::fmt;

/// The byte namespace a collection owns inside its module store.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Prefix(Vec<u8>);

impl Prefix {
    /// A one-byte prefix, the usual way to number collections in a module.
    pub const fn from_u8(byte: u8) -> PrefixByte {
        PrefixByte(byte)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether keys under `self` and `other` could collide: one prefix is
    /// equal to, or a prefix of, the other.
    pub fn overlaps(&self, other: &Prefix) -> bool {
        self.0.starts_with(&other.0) || other.0.starts_with(&self.0)
    }

    /// `self || suffix`
    pub fn join(&self, suffix: &[u8]) -> Vec<u8> {
        let mut key = Vec::with_capacity(self.0.len() + suffix.len());
        key.extend_from_slice(&self.0);
        key.extend_from_slice(suffix);
        key
    }

    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }
}

/// A single-byte prefix usable in `const` position.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct PrefixByte(pub u8);

impl From<PrefixByte> for Prefix {
    fn from(byte: PrefixByte) -> Self {
        Prefix(vec![byte.0])
    }
}

impl From<u8> for Prefix {
    fn from(byte: u8) -> Self {
        Prefix(vec![byte])
    }
}

impl From<&[u8]> for Prefix {
    fn from(bytes: &[u8]) -> Self {
        Prefix(bytes.to_vec())
    }
}

impl From<Vec<u8>> for Prefix {
    fn from(bytes: Vec<u8>) -> Self {
        Prefix(bytes)
    }
}

impl From<&str> for Prefix {
    fn from(s: &str) -> Self {
        Prefix(s.as_bytes().to_vec())
    }
}

impl fmt::Debug for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Prefix(0x{})", self.to_hex())
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", self.to_hex())
    }
}
