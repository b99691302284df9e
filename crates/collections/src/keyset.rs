//! Set collections: keys with no values.

use crate::codec::{KeyCodec, PairKeyCodec, UnitValue};
use crate::error::{CollectionError, Result};
use crate::map::Map;
use crate::range::KeyRange;
use minikeeper_storage::Context;

/// A set of keys, stored like a map with empty values.
#[derive(Debug, Clone)]
pub struct KeySet<KC> {
    inner: Map<KC, UnitValue>,
}

impl<KC: KeyCodec> KeySet<KC> {
    pub(crate) fn new(inner: Map<KC, UnitValue>) -> Self {
        Self { inner }
    }

    pub fn name(&self) -> &str {
        self.inner.name()
    }

    pub fn insert(&self, ctx: &Context<'_>, key: &KC::Key) -> Result<()> {
        self.inner.set(ctx, key, &())
    }

    pub fn has(&self, ctx: &Context<'_>, key: &KC::Key) -> Result<bool> {
        self.inner.has(ctx, key)
    }

    /// Remove `key`. Removing an absent key succeeds.
    pub fn remove(&self, ctx: &Context<'_>, key: &KC::Key) -> Result<()> {
        self.inner.remove(ctx, key)
    }

    pub fn walk<E, F>(
        &self,
        ctx: &Context<'_>,
        range: Option<KeyRange<KC::Key>>,
        mut visitor: F,
    ) -> std::result::Result<(), E>
    where
        F: FnMut(KC::Key) -> std::result::Result<bool, E>,
        E: From<CollectionError>,
    {
        self.inner.walk(ctx, range, |k, ()| visitor(k))
    }

    pub fn keys(&self, ctx: &Context<'_>, range: Option<KeyRange<KC::Key>>) -> Result<Vec<KC::Key>> {
        self.inner.keys(ctx, range)
    }
}

impl<A: KeyCodec, B: KeyCodec> KeySet<PairKeyCodec<A, B>> {
    /// Visit, in key order, every key whose first part is `first`.
    pub fn walk_prefix<E, F>(
        &self,
        ctx: &Context<'_>,
        first: &A::Key,
        mut visitor: F,
    ) -> std::result::Result<(), E>
    where
        F: FnMut((A::Key, B::Key)) -> std::result::Result<bool, E>,
        E: From<CollectionError>,
    {
        self.inner.walk_prefix(ctx, first, |k, ()| visitor(k))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{StringKey, Uint64Key};
    use crate::schema::SchemaBuilder;
    use minikeeper_storage::{MemStore, StoreKey};

    #[test]
    fn test_insert_has_remove() {
        let root = MemStore::new();
        let ctx = Context::new(&root);
        let mut sb = SchemaBuilder::new(StoreKey::new("test"));
        let set = sb.key_set(0u8, "members", StringKey);
        sb.build().unwrap();

        let bob = "bob".to_string();
        assert!(!set.has(&ctx, &bob).unwrap());
        set.insert(&ctx, &bob).unwrap();
        set.insert(&ctx, &bob).unwrap();
        assert!(set.has(&ctx, &bob).unwrap());
        assert_eq!(set.keys(&ctx, None).unwrap(), vec![bob.clone()]);

        set.remove(&ctx, &bob).unwrap();
        assert!(!set.has(&ctx, &bob).unwrap());
    }

    #[test]
    fn test_walk_prefix() {
        let root = MemStore::new();
        let ctx = Context::new(&root);
        let mut sb = SchemaBuilder::new(StoreKey::new("test"));
        let set = sb.key_set(0u8, "pairs", PairKeyCodec(Uint64Key, StringKey));
        sb.build().unwrap();

        set.insert(&ctx, &(9, "z".to_string())).unwrap();
        set.insert(&ctx, &(10, "a".to_string())).unwrap();
        set.insert(&ctx, &(10, "b".to_string())).unwrap();
        set.insert(&ctx, &(11, "a".to_string())).unwrap();

        let mut found = Vec::new();
        set.walk_prefix(&ctx, &10, |k| -> Result<bool> {
            found.push(k);
            Ok(false)
        })
        .unwrap();
        assert_eq!(found, vec![(10, "a".to_string()), (10, "b".to_string())]);
    }
}
