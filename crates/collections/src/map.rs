//! Key-ordered map collections.

use crate::codec::{KeyCodec, PairKeyCodec, ValueCodec};
use crate::error::{CollectionError, Result};
use crate::range::KeyRange;
use crate::schema::Binding;
use minikeeper_storage::{prefix_end, Context, KvStore};

/// A mapping from `KC::Key` to `VC::Value`, stored at `prefix || encode(key)`.
#[derive(Debug, Clone)]
pub struct Map<KC, VC> {
    binding: Binding,
    key_codec: KC,
    value_codec: VC,
}

impl<KC: KeyCodec, VC: ValueCodec> Map<KC, VC> {
    pub(crate) fn new(binding: Binding, key_codec: KC, value_codec: VC) -> Self {
        Self {
            binding,
            key_codec,
            value_codec,
        }
    }

    pub fn name(&self) -> &str {
        self.binding.name()
    }

    pub fn key_codec(&self) -> &KC {
        &self.key_codec
    }

    pub fn value_codec(&self) -> &VC {
        &self.value_codec
    }

    fn raw_key(&self, key: &KC::Key) -> Result<Vec<u8>> {
        let mut buf = self.binding.prefix().as_bytes().to_vec();
        self.key_codec
            .encode(&mut buf, key)
            .map_err(|e| self.binding.encode_error(e))?;
        Ok(buf)
    }

    /// Get the value under `key`, or `None` if absent.
    pub fn get(&self, ctx: &Context<'_>, key: &KC::Key) -> Result<Option<VC::Value>> {
        let raw = self.raw_key(key)?;
        let store = self.binding.store(ctx)?;
        match store.get(&raw)? {
            Some(bytes) => {
                let value = self
                    .value_codec
                    .decode(&bytes)
                    .map_err(|e| self.binding.decode_error(e))?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Get the value under `key`, failing with `NotFound` if absent.
    pub fn get_or_err(&self, ctx: &Context<'_>, key: &KC::Key) -> Result<VC::Value> {
        self.get(ctx, key)?
            .ok_or_else(|| self.binding.not_found(self.key_codec.stringify(key)))
    }

    pub fn has(&self, ctx: &Context<'_>, key: &KC::Key) -> Result<bool> {
        let raw = self.raw_key(key)?;
        let store = self.binding.store(ctx)?;
        Ok(store.has(&raw)?)
    }

    /// Insert or overwrite the value under `key`.
    pub fn set(&self, ctx: &Context<'_>, key: &KC::Key, value: &VC::Value) -> Result<()> {
        let raw = self.raw_key(key)?;
        let bytes = self
            .value_codec
            .encode(value)
            .map_err(|e| self.binding.encode_error(e))?;
        let store = self.binding.store(ctx)?;
        store.set(&raw, &bytes)?;
        Ok(())
    }

    /// Remove `key`. Removing an absent key succeeds.
    pub fn remove(&self, ctx: &Context<'_>, key: &KC::Key) -> Result<()> {
        let raw = self.raw_key(key)?;
        let store = self.binding.store(ctx)?;
        store.delete(&raw)?;
        Ok(())
    }

    /// Visit entries in ascending key order.
    ///
    /// `visitor` returns `Ok(true)` to stop early. The first error, from the
    /// store, a codec or the visitor, ends the walk and is returned.
    pub fn walk<E, F>(
        &self,
        ctx: &Context<'_>,
        range: Option<KeyRange<KC::Key>>,
        visitor: F,
    ) -> std::result::Result<(), E>
    where
        F: FnMut(KC::Key, VC::Value) -> std::result::Result<bool, E>,
        E: From<CollectionError>,
    {
        let (start, end) = range
            .unwrap_or_default()
            .to_raw(&self.key_codec, self.binding.prefix())
            .map_err(|e| self.binding.encode_error(e))?;
        self.walk_raw(ctx, start, end, visitor)
    }

    fn walk_raw<E, F>(
        &self,
        ctx: &Context<'_>,
        start: Vec<u8>,
        end: Option<Vec<u8>>,
        mut visitor: F,
    ) -> std::result::Result<(), E>
    where
        F: FnMut(KC::Key, VC::Value) -> std::result::Result<bool, E>,
        E: From<CollectionError>,
    {
        let store = self.binding.store(ctx)?;
        let entries = store
            .range(Some(&start), end.as_deref())
            .map_err(CollectionError::from)?;
        let skip = self.binding.prefix().len();
        for (raw_key, raw_value) in entries {
            let key = self
                .key_codec
                .decode(&raw_key[skip..])
                .map_err(|e| self.binding.decode_error(e))?;
            let value = self
                .value_codec
                .decode(&raw_value)
                .map_err(|e| self.binding.decode_error(e))?;
            if visitor(key, value)? {
                break;
            }
        }
        Ok(())
    }

    /// Collect the entries in `range`.
    pub fn iter(
        &self,
        ctx: &Context<'_>,
        range: Option<KeyRange<KC::Key>>,
    ) -> Result<Vec<(KC::Key, VC::Value)>> {
        let mut out = Vec::new();
        self.walk(ctx, range, |k, v| -> Result<bool> {
            out.push((k, v));
            Ok(false)
        })?;
        Ok(out)
    }

    /// Collect the keys in `range`.
    pub fn keys(&self, ctx: &Context<'_>, range: Option<KeyRange<KC::Key>>) -> Result<Vec<KC::Key>> {
        Ok(self.iter(ctx, range)?.into_iter().map(|(k, _)| k).collect())
    }

    /// Read-only dump of every entry, in key order.
    pub fn export(&self, ctx: &Context<'_>) -> Result<Vec<(KC::Key, VC::Value)>> {
        self.iter(ctx, None)
    }
}

impl<A, B, VC> Map<PairKeyCodec<A, B>, VC>
where
    A: KeyCodec,
    B: KeyCodec,
    VC: ValueCodec,
{
    /// Visit, in key order, every entry whose key starts with `first`.
    pub fn walk_prefix<E, F>(
        &self,
        ctx: &Context<'_>,
        first: &A::Key,
        visitor: F,
    ) -> std::result::Result<(), E>
    where
        F: FnMut((A::Key, B::Key), VC::Value) -> std::result::Result<bool, E>,
        E: From<CollectionError>,
    {
        let mut start = self.binding.prefix().as_bytes().to_vec();
        self.key_codec
            .0
            .encode_non_terminal(&mut start, first)
            .map_err(|e| self.binding.encode_error(e))?;
        let end = prefix_end(&start);
        self.walk_raw(ctx, start, end, visitor)
    }
}
