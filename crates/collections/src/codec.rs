//! Key and value codecs.
//!
//! A collection is configured with one [`KeyCodec`] (maps and key sets) and
//! one [`ValueCodec`] at registration time. Key encodings must preserve the
//! ordering of the logical keys so that range scans over raw bytes visit
//! entries in key order.
//!
//! Keys have two forms:
//! - **terminal**: the key is the last component of the stored key, so it can
//!   take all remaining bytes.
//! - **non-terminal**: the key is followed by more components (the first half
//!   of a pair), so its encoding must tell the decoder where it ends.

use crate::error::CodecError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::marker::PhantomData;

/// Encodes collection keys into ordered bytes.
pub trait KeyCodec {
    type Key;

    /// Append the terminal encoding of `key` to `buf`.
    fn encode(&self, buf: &mut Vec<u8>, key: &Self::Key) -> Result<(), CodecError>;

    /// Decode a terminal key that spans all of `bytes`.
    fn decode(&self, bytes: &[u8]) -> Result<Self::Key, CodecError>;

    /// Append the non-terminal encoding of `key` to `buf`.
    fn encode_non_terminal(&self, buf: &mut Vec<u8>, key: &Self::Key) -> Result<(), CodecError>;

    /// Decode a non-terminal key from the front of `bytes`, returning the
    /// number of bytes consumed.
    fn decode_non_terminal(&self, bytes: &[u8]) -> Result<(usize, Self::Key), CodecError>;

    /// Human readable form used in errors and dumps.
    fn stringify(&self, key: &Self::Key) -> String;

    fn name(&self) -> String;
}

/// Encodes collection values.
pub trait ValueCodec {
    type Value;

    fn encode(&self, value: &Self::Value) -> Result<Vec<u8>, CodecError>;

    fn decode(&self, bytes: &[u8]) -> Result<Self::Value, CodecError>;

    fn stringify(&self, value: &Self::Value) -> String;

    fn name(&self) -> String;
}

// =============================================================================
// Key codecs
// =============================================================================

/// UTF-8 string keys.
///
/// Terminal form is the raw bytes. Non-terminal form is NUL-terminated,
/// which keeps the ordering but rules out NUL inside the key.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringKey;

impl KeyCodec for StringKey {
    type Key = String;

    fn encode(&self, buf: &mut Vec<u8>, key: &String) -> Result<(), CodecError> {
        buf.extend_from_slice(key.as_bytes());
        Ok(())
    }

    fn decode(&self, bytes: &[u8]) -> Result<String, CodecError> {
        String::from_utf8(bytes.to_vec()).map_err(|_| CodecError::InvalidUtf8 { codec: "string" })
    }

    fn encode_non_terminal(&self, buf: &mut Vec<u8>, key: &String) -> Result<(), CodecError> {
        if key.as_bytes().contains(&0) {
            return Err(CodecError::Malformed {
                codec: "string",
                reason: "non-terminal string key contains a NUL byte".into(),
            });
        }
        buf.extend_from_slice(key.as_bytes());
        buf.push(0);
        Ok(())
    }

    fn decode_non_terminal(&self, bytes: &[u8]) -> Result<(usize, String), CodecError> {
        let end = bytes
            .iter()
            .position(|b| *b == 0)
            .ok_or_else(|| CodecError::Malformed {
                codec: "string",
                reason: "missing NUL terminator".into(),
            })?;
        Ok((end + 1, self.decode(&bytes[..end])?))
    }

    fn stringify(&self, key: &String) -> String {
        key.clone()
    }

    fn name(&self) -> String {
        "string".into()
    }
}

/// `u64` keys as 8 big-endian bytes, in both forms.
#[derive(Debug, Clone, Copy, Default)]
pub struct Uint64Key;

impl KeyCodec for Uint64Key {
    type Key = u64;

    fn encode(&self, buf: &mut Vec<u8>, key: &u64) -> Result<(), CodecError> {
        buf.extend_from_slice(&key.to_be_bytes());
        Ok(())
    }

    fn decode(&self, bytes: &[u8]) -> Result<u64, CodecError> {
        let arr: [u8; 8] = bytes.try_into().map_err(|_| CodecError::InvalidLength {
            codec: "u64",
            expected: 8,
            got: bytes.len(),
        })?;
        Ok(u64::from_be_bytes(arr))
    }

    fn encode_non_terminal(&self, buf: &mut Vec<u8>, key: &u64) -> Result<(), CodecError> {
        self.encode(buf, key)
    }

    fn decode_non_terminal(&self, bytes: &[u8]) -> Result<(usize, u64), CodecError> {
        if bytes.len() < 8 {
            return Err(CodecError::InvalidLength {
                codec: "u64",
                expected: 8,
                got: bytes.len(),
            });
        }
        Ok((8, self.decode(&bytes[..8])?))
    }

    fn stringify(&self, key: &u64) -> String {
        key.to_string()
    }

    fn name(&self) -> String {
        "u64".into()
    }
}

/// Raw byte keys. Non-terminal form carries a one-byte length prefix.
#[derive(Debug, Clone, Copy, Default)]
pub struct BytesKey;

impl KeyCodec for BytesKey {
    type Key = Vec<u8>;

    fn encode(&self, buf: &mut Vec<u8>, key: &Vec<u8>) -> Result<(), CodecError> {
        buf.extend_from_slice(key);
        Ok(())
    }

    fn decode(&self, bytes: &[u8]) -> Result<Vec<u8>, CodecError> {
        Ok(bytes.to_vec())
    }

    fn encode_non_terminal(&self, buf: &mut Vec<u8>, key: &Vec<u8>) -> Result<(), CodecError> {
        let len = u8::try_from(key.len()).map_err(|_| CodecError::Malformed {
            codec: "bytes",
            reason: format!("non-terminal key of {} bytes exceeds 255", key.len()),
        })?;
        buf.push(len);
        buf.extend_from_slice(key);
        Ok(())
    }

    fn decode_non_terminal(&self, bytes: &[u8]) -> Result<(usize, Vec<u8>), CodecError> {
        let (&len, rest) = bytes.split_first().ok_or(CodecError::InvalidLength {
            codec: "bytes",
            expected: 1,
            got: 0,
        })?;
        let len = len as usize;
        if rest.len() < len {
            return Err(CodecError::InvalidLength {
                codec: "bytes",
                expected: len,
                got: rest.len(),
            });
        }
        Ok((1 + len, rest[..len].to_vec()))
    }

    fn stringify(&self, key: &Vec<u8>) -> String {
        format!("0x{}", hex::encode(key))
    }

    fn name(&self) -> String {
        "bytes".into()
    }
}

/// Two-part keys `(A, B)`: `A` non-terminal followed by `B`.
///
/// Entries sharing the same first part are contiguous, which is what
/// `walk_prefix` on maps and key sets relies on.
#[derive(Debug, Clone, Copy, Default)]
pub struct PairKeyCodec<A, B>(pub A, pub B);

impl<A: KeyCodec, B: KeyCodec> KeyCodec for PairKeyCodec<A, B> {
    type Key = (A::Key, B::Key);

    fn encode(&self, buf: &mut Vec<u8>, key: &Self::Key) -> Result<(), CodecError> {
        self.0.encode_non_terminal(buf, &key.0)?;
        self.1.encode(buf, &key.1)
    }

    fn decode(&self, bytes: &[u8]) -> Result<Self::Key, CodecError> {
        let (used, first) = self.0.decode_non_terminal(bytes)?;
        let second = self.1.decode(&bytes[used..])?;
        Ok((first, second))
    }

    fn encode_non_terminal(&self, buf: &mut Vec<u8>, key: &Self::Key) -> Result<(), CodecError> {
        self.0.encode_non_terminal(buf, &key.0)?;
        self.1.encode_non_terminal(buf, &key.1)
    }

    fn decode_non_terminal(&self, bytes: &[u8]) -> Result<(usize, Self::Key), CodecError> {
        let (used_a, first) = self.0.decode_non_terminal(bytes)?;
        let (used_b, second) = self.1.decode_non_terminal(&bytes[used_a..])?;
        Ok((used_a + used_b, (first, second)))
    }

    fn stringify(&self, key: &Self::Key) -> String {
        format!("({}, {})", self.0.stringify(&key.0), self.1.stringify(&key.1))
    }

    fn name(&self) -> String {
        format!("pair[{}, {}]", self.0.name(), self.1.name())
    }
}

// =============================================================================
// Value codecs
// =============================================================================

/// `u64` values as 8 big-endian bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct Uint64Value;

impl ValueCodec for Uint64Value {
    type Value = u64;

    fn encode(&self, value: &u64) -> Result<Vec<u8>, CodecError> {
        Ok(value.to_be_bytes().to_vec())
    }

    fn decode(&self, bytes: &[u8]) -> Result<u64, CodecError> {
        Uint64Key.decode(bytes)
    }

    fn stringify(&self, value: &u64) -> String {
        value.to_string()
    }

    fn name(&self) -> String {
        "u64".into()
    }
}

/// Strings as a big-endian `u32` length followed by UTF-8 bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringValue;

impl ValueCodec for StringValue {
    type Value = String;

    fn encode(&self, value: &String) -> Result<Vec<u8>, CodecError> {
        let len = u32::try_from(value.len()).map_err(|_| CodecError::Malformed {
            codec: "string",
            reason: "value longer than u32::MAX bytes".into(),
        })?;
        let mut out = Vec::with_capacity(4 + value.len());
        out.extend_from_slice(&len.to_be_bytes());
        out.extend_from_slice(value.as_bytes());
        Ok(out)
    }

    fn decode(&self, bytes: &[u8]) -> Result<String, CodecError> {
        if bytes.len() < 4 {
            return Err(CodecError::InvalidLength {
                codec: "string",
                expected: 4,
                got: bytes.len(),
            });
        }
        let (len, body) = bytes.split_at(4);
        let len = u32::from_be_bytes([len[0], len[1], len[2], len[3]]) as usize;
        if body.len() != len {
            return Err(CodecError::InvalidLength {
                codec: "string",
                expected: 4 + len,
                got: bytes.len(),
            });
        }
        String::from_utf8(body.to_vec()).map_err(|_| CodecError::InvalidUtf8 { codec: "string" })
    }

    fn stringify(&self, value: &String) -> String {
        value.clone()
    }

    fn name(&self) -> String {
        "string".into()
    }
}

/// Structured records encoded with bincode.
pub struct BincodeValue<T>(PhantomData<fn() -> T>);

impl<T> BincodeValue<T> {
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for BincodeValue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for BincodeValue<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for BincodeValue<T> {}

impl<T> fmt::Debug for BincodeValue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BincodeValue<{}>", std::any::type_name::<T>())
    }
}

impl<T> ValueCodec for BincodeValue<T>
where
    T: Serialize + DeserializeOwned + fmt::Debug,
{
    type Value = T;

    fn encode(&self, value: &T) -> Result<Vec<u8>, CodecError> {
        bincode::serialize(value).map_err(|e| CodecError::Malformed {
            codec: "bincode",
            reason: e.to_string(),
        })
    }

    fn decode(&self, bytes: &[u8]) -> Result<T, CodecError> {
        bincode::deserialize(bytes).map_err(|e| CodecError::Malformed {
            codec: "bincode",
            reason: e.to_string(),
        })
    }

    fn stringify(&self, value: &T) -> String {
        format!("{:?}", value)
    }

    fn name(&self) -> String {
        format!("bincode[{}]", std::any::type_name::<T>())
    }
}

/// Empty values, for collections where presence is the only information.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnitValue;

impl ValueCodec for UnitValue {
    type Value = ();

    fn encode(&self, _value: &()) -> Result<Vec<u8>, CodecError> {
        Ok(Vec::new())
    }

    fn decode(&self, bytes: &[u8]) -> Result<(), CodecError> {
        if !bytes.is_empty() {
            return Err(CodecError::InvalidLength {
                codec: "unit",
                expected: 0,
                got: bytes.len(),
            });
        }
        Ok(())
    }

    fn stringify(&self, _value: &()) -> String {
        "()".into()
    }

    fn name(&self) -> String {
        "unit".into()
    }
}
