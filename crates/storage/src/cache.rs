//! Write-buffering branch over a parent store.

use crate::store::{range_bounds, BatchOp, KvPair, KvStore, Result, StorageError};
use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Pending writes: `Some(value)` for a set, `None` for a delete.
type Pending = BTreeMap<Vec<u8>, Option<Vec<u8>>>;

/// Buffers writes in memory on top of a parent store.
///
/// Reads observe the buffered writes first, so code running against the
/// cache sees its own writes. Nothing reaches the parent until [`write`]
/// is called; dropping the cache discards everything.
///
/// [`write`]: CacheStore::write
pub struct CacheStore<'a> {
    parent: &'a dyn KvStore,
    pending: RwLock<Pending>,
}

impl<'a> CacheStore<'a> {
    pub fn new(parent: &'a dyn KvStore) -> Self {
        Self {
            parent,
            pending: RwLock::new(BTreeMap::new()),
        }
    }

    /// Number of buffered writes.
    pub fn pending_writes(&self) -> Result<usize> {
        Ok(self.read()?.len())
    }

    /// Flush buffered writes to the parent in one batch.
    pub fn write(&self) -> Result<()> {
        let pending = std::mem::take(&mut *self.write_lock()?);
        if pending.is_empty() {
            return Ok(());
        }
        let ops = pending
            .into_iter()
            .map(|(key, value)| match value {
                Some(value) => BatchOp::Insert { key, value },
                None => BatchOp::Remove { key },
            })
            .collect::<Vec<_>>();
        tracing::trace!(ops = ops.len(), "flushing cache store");
        self.parent.apply_batch(ops)
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Pending>> {
        self.pending.read().map_err(|_| StorageError::LockPoisoned)
    }

    fn write_lock(&self) -> Result<RwLockWriteGuard<'_, Pending>> {
        self.pending.write().map_err(|_| StorageError::LockPoisoned)
    }
}

impl KvStore for CacheStore<'_> {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        if let Some(buffered) = self.read()?.get(key) {
            return Ok(buffered.clone());
        }
        self.parent.get(key)
    }

    fn set(&self, key: &[u8], value: &[u8]) -> Result<()> {
        self.write_lock()?.insert(key.to_vec(), Some(value.to_vec()));
        Ok(())
    }

    fn delete(&self, key: &[u8]) -> Result<()> {
        self.write_lock()?.insert(key.to_vec(), None);
        Ok(())
    }

    fn range(&self, start: Option<&[u8]>, end: Option<&[u8]>) -> Result<Vec<KvPair>> {
        let Some(bounds) = range_bounds(start, end) else {
            return Ok(Vec::new());
        };
        let mut merged: BTreeMap<Vec<u8>, Vec<u8>> =
            self.parent.range(start, end)?.into_iter().collect();
        for (key, value) in self.read()?.range::<[u8], _>(bounds) {
            match value {
                Some(value) => {
                    merged.insert(key.clone(), value.clone());
                }
                None => {
                    merged.remove(key);
                }
            }
        }
        Ok(merged.into_iter().collect())
    }

    fn apply_batch(&self, ops: Vec<BatchOp>) -> Result<()> {
        let mut pending = self.write_lock()?;
        for op in ops {
            match op {
                BatchOp::Insert { key, value } => pending.insert(key, Some(value)),
                BatchOp::Remove { key } => pending.insert(key, None),
            };
        }
        Ok(())
    }
}
