//! Key ranges for map iteration.

use crate::codec::KeyCodec;
use crate::error::CodecError;
use crate::prefix::Prefix;
use minikeeper_storage::prefix_end;
use std::ops::Bound;

/// Bounds on the logical keys of a map.
///
/// The default range covers every key. Builders narrow it from either side;
/// [`KeyRange::between`] gives the usual half-open `[start, end)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyRange<K> {
    start: Bound<K>,
    end: Bound<K>,
}

impl<K> Default for KeyRange<K> {
    fn default() -> Self {
        Self::all()
    }
}

impl<K> KeyRange<K> {
    pub fn all() -> Self {
        Self {
            start: Bound::Unbounded,
            end: Bound::Unbounded,
        }
    }

    /// `[start, end)`
    pub fn between(start: K, end: K) -> Self {
        Self {
            start: Bound::Included(start),
            end: Bound::Excluded(end),
        }
    }

    pub fn start_inclusive(mut self, key: K) -> Self {
        self.start = Bound::Included(key);
        self
    }

    pub fn start_exclusive(mut self, key: K) -> Self {
        self.start = Bound::Excluded(key);
        self
    }

    pub fn end_inclusive(mut self, key: K) -> Self {
        self.end = Bound::Included(key);
        self
    }

    pub fn end_exclusive(mut self, key: K) -> Self {
        self.end = Bound::Excluded(key);
        self
    }

    /// Raw store bounds `[start, end)` for this range under `prefix`.
    ///
    /// An exclusive start and an inclusive end both map to the immediate
    /// byte successor of the encoded key (`enc(k) || 0x00`).
    pub(crate) fn to_raw<C>(
        &self,
        codec: &C,
        prefix: &Prefix,
    ) -> Result<(Vec<u8>, Option<Vec<u8>>), CodecError>
    where
        C: KeyCodec<Key = K>,
    {
        let start = match &self.start {
            Bound::Unbounded => prefix.as_bytes().to_vec(),
            Bound::Included(key) => encode_under(codec, prefix, key)?,
            Bound::Excluded(key) => successor(encode_under(codec, prefix, key)?),
        };
        let end = match &self.end {
            Bound::Unbounded => prefix_end(prefix.as_bytes()),
            Bound::Excluded(key) => Some(encode_under(codec, prefix, key)?),
            Bound::Included(key) => Some(successor(encode_under(codec, prefix, key)?)),
        };
        Ok((start, end))
    }
}

fn encode_under<C: KeyCodec>(
    codec: &C,
    prefix: &Prefix,
    key: &C::Key,
) -> Result<Vec<u8>, CodecError> {
    let mut buf = prefix.as_bytes().to_vec();
    codec.encode(&mut buf, key)?;
    Ok(buf)
}

fn successor(mut key: Vec<u8>) -> Vec<u8> {
    key.push(0);
    key
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::Uint64Key;

    #[test]
    fn test_unbounded_covers_prefix() {
        let prefix = Prefix::from(0x05u8);
        let (start, end) = KeyRange::<u64>::all().to_raw(&Uint64Key, &prefix).unwrap();
        assert_eq!(start, vec![0x05]);
        assert_eq!(end, Some(vec![0x06]));
    }

    #[test]
    fn test_between_is_half_open() {
        let prefix = Prefix::from(0x01u8);
        let (start, end) = KeyRange::between(2u64, 4).to_raw(&Uint64Key, &prefix).unwrap();
        assert_eq!(start, vec![1, 0, 0, 0, 0, 0, 0, 0, 2]);
        assert_eq!(end, Some(vec![1, 0, 0, 0, 0, 0, 0, 0, 4]));
    }

    #[test]
    fn test_exclusive_start_and_inclusive_end() {
        let prefix = Prefix::from(0x01u8);
        let range = KeyRange::all().start_exclusive(2u64).end_inclusive(4);
        let (start, end) = range.to_raw(&Uint64Key, &prefix).unwrap();
        assert_eq!(start, vec![1, 0, 0, 0, 0, 0, 0, 0, 2, 0]);
        assert_eq!(end, Some(vec![1, 0, 0, 0, 0, 0, 0, 0, 4, 0]));
    }
}
