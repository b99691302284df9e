//! Namespaced view over a parent store.

use crate::store::{prefix_end, BatchOp, KvPair, KvStore, Result};

/// Prepends a fixed namespace to every key of the parent store.
///
/// Keys returned from [`KvStore::range`] have the namespace stripped, so the
/// view behaves like a store of its own.
pub struct PrefixStore<'a> {
    parent: &'a dyn KvStore,
    namespace: Vec<u8>,
}

impl<'a> PrefixStore<'a> {
    pub fn new(parent: &'a dyn KvStore, namespace: impl Into<Vec<u8>>) -> Self {
        Self {
            parent,
            namespace: namespace.into(),
        }
    }

    pub fn namespace(&self) -> &[u8] {
        &self.namespace
    }

    fn full_key(&self, key: &[u8]) -> Vec<u8> {
        let mut full = Vec::with_capacity(self.namespace.len() + key.len());
        full.extend_from_slice(&self.namespace);
        full.extend_from_slice(key);
        full
    }
}

impl KvStore for PrefixStore<'_> {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        self.parent.get(&self.full_key(key))
    }

    fn set(&self, key: &[u8], value: &[u8]) -> Result<()> {
        self.parent.set(&self.full_key(key), value)
    }

    fn delete(&self, key: &[u8]) -> Result<()> {
        self.parent.delete(&self.full_key(key))
    }

    fn has(&self, key: &[u8]) -> Result<bool> {
        self.parent.has(&self.full_key(key))
    }

    fn range(&self, start: Option<&[u8]>, end: Option<&[u8]>) -> Result<Vec<KvPair>> {
        let start = self.full_key(start.unwrap_or_default());
        let end = match end {
            Some(end) => Some(self.full_key(end)),
            None => prefix_end(&self.namespace),
        };
        let strip = self.namespace.len();
        Ok(self
            .parent
            .range(Some(&start), end.as_deref())?
            .into_iter()
            .map(|(k, v)| (k[strip..].to_vec(), v))
            .collect())
    }

    fn apply_batch(&self, ops: Vec<BatchOp>) -> Result<()> {
        let ops = ops
            .into_iter()
            .map(|op| match op {
                BatchOp::Insert { key, value } => BatchOp::Insert {
                    key: self.full_key(&key),
                    value,
                },
                BatchOp::Remove { key } => BatchOp::Remove {
                    key: self.full_key(&key),
                },
            })
            .collect();
        self.parent.apply_batch(ops)
    }
}
