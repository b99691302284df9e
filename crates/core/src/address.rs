//! Account addresses and the identifier validator injected into keepers.

use crate::hash::hash;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Length of an address in bytes.
pub const ADDRESS_LEN: usize = 20;

/// A 20-byte account address.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Address(pub [u8; ADDRESS_LEN]);

impl Address {
    /// The zero address (all zeros).
    pub const ZERO: Self = Self([0u8; ADDRESS_LEN]);

    /// Get the underlying bytes.
    pub fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }

    /// Derive the account address owned by a module.
    ///
    /// Module accounts have no key; their address is the first 20 bytes of
    /// `blake3("module:" + name)`.
    pub fn module(name: &str) -> Self {
        let digest = hash(format!("module:{}", name).as_bytes());
        let mut arr = [0u8; ADDRESS_LEN];
        arr.copy_from_slice(&digest.0[..ADDRESS_LEN]);
        Self(arr)
    }

    /// Convert to a hex string (with 0x prefix).
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    /// Parse from a hex string (with or without 0x prefix).
    pub fn from_hex(s: &str) -> Result<Self, AddressError> {
        if s.is_empty() {
            return Err(AddressError::Empty);
        }
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        let bytes =
            hex::decode(digits).map_err(|e| AddressError::InvalidFormat(e.to_string()))?;
        Self::try_from(bytes.as_slice())
    }
}

impl TryFrom<&[u8]> for Address {
    type Error = AddressError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        if bytes.len() != ADDRESS_LEN {
            return Err(AddressError::InvalidLength(bytes.len()));
        }
        let mut arr = [0u8; ADDRESS_LEN];
        arr.copy_from_slice(bytes);
        Ok(Self(arr))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.to_hex())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Errors produced while validating an address string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    #[error("empty address string is not allowed")]
    Empty,
    #[error("invalid address format: {0}")]
    InvalidFormat(String),
    #[error("invalid address length: expected 20 bytes, got {0}")]
    InvalidLength(usize),
}

/// Converts between the textual and binary form of account identifiers.
///
/// Keepers only ever see addresses as strings; this is the collaborator they
/// call to decide whether such a string is well formed.
pub trait AddressCodec: Send + Sync {
    fn string_to_bytes(&self, text: &str) -> Result<Vec<u8>, AddressError>;
    fn bytes_to_string(&self, bytes: &[u8]) -> Result<String, AddressError>;

    /// The one spelling of `text` that keepers store and compare.
    ///
    /// Every string the codec accepts for the same bytes maps to the same
    /// canonical string.
    fn canonical_string(&self, text: &str) -> Result<String, AddressError> {
        self.bytes_to_string(&self.string_to_bytes(text)?)
    }
}

/// `0x`-prefixed hex addresses of exactly 20 bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct HexAddressCodec;

impl AddressCodec for HexAddressCodec {
    fn string_to_bytes(&self, text: &str) -> Result<Vec<u8>, AddressError> {
        Ok(Address::from_hex(text)?.0.to_vec())
    }

    fn bytes_to_string(&self, bytes: &[u8]) -> Result<String, AddressError> {
        Ok(Address::try_from(bytes)?.to_hex())
    }
}
