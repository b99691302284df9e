//! sled-backed persistent store.

use crate::store::{range_bounds, BatchOp, KvPair, KvStore, Result, StorageError};
use sled::Db;
use std::path::Path;

/// Wrapper around a sled database implementing [`KvStore`].
pub struct Storage {
    db: Db,
}

impl Storage {
    /// Open a database at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let db = sled::open(path)?;
        Ok(Self { db })
    }

    /// Open an in-memory database (for testing).
    pub fn open_temporary() -> Result<Self> {
        let db = sled::Config::new().temporary(true).open()?;
        Ok(Self { db })
    }

    /// Flush all pending writes to disk.
    pub fn flush(&self) -> Result<()> {
        self.db.flush()?;
        Ok(())
    }

    /// Get the underlying sled database.
    pub fn inner(&self) -> &Db {
        &self.db
    }
}

impl KvStore for Storage {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        Ok(self.db.get(key)?.map(|v| v.to_vec()))
    }

    fn set(&self, key: &[u8], value: &[u8]) -> Result<()> {
        self.db.insert(key, value)?;
        Ok(())
    }

    fn delete(&self, key: &[u8]) -> Result<()> {
        self.db.remove(key)?;
        Ok(())
    }

    fn has(&self, key: &[u8]) -> Result<bool> {
        Ok(self.db.contains_key(key)?)
    }

    fn range(&self, start: Option<&[u8]>, end: Option<&[u8]>) -> Result<Vec<KvPair>> {
        let Some(bounds) = range_bounds(start, end) else {
            return Ok(Vec::new());
        };
        self.db
            .range::<&[u8], _>(bounds)
            .map(|entry| {
                let (key, value) = entry.map_err(StorageError::Database)?;
                Ok((key.to_vec(), value.to_vec()))
            })
            .collect()
    }

    /// Atomicity is provided by sled's `apply_batch`: the batch is collected
    /// in memory, then written through sled's write-ahead log in one step.
    fn apply_batch(&self, ops: Vec<BatchOp>) -> Result<()> {
        let mut batch = sled::Batch::default();
        for op in ops {
            match op {
                BatchOp::Insert { key, value } => batch.insert(key, value),
                BatchOp::Remove { key } => batch.remove(key),
            }
        }
        self.db.apply_batch(batch)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_temporary() {
        let storage = Storage::open_temporary().unwrap();
        assert!(storage.inner().is_empty());
    }

    #[test]
    fn test_get_set_delete() {
        let storage = Storage::open_temporary().unwrap();

        storage.set(b"key1", b"value1").unwrap();
        assert_eq!(storage.get(b"key1").unwrap(), Some(b"value1".to_vec()));
        assert!(storage.has(b"key1").unwrap());

        // Non-existent key returns None
        assert_eq!(storage.get(b"missing").unwrap(), None);

        storage.delete(b"key1").unwrap();
        assert!(!storage.has(b"key1").unwrap());

        // Deleting again is fine
        storage.delete(b"key1").unwrap();
    }

    #[test]
    fn test_range_is_ordered_and_half_open() {
        let storage = Storage::open_temporary().unwrap();
        for key in [b"c", b"a", b"d", b"b"] {
            storage.set(key, key).unwrap();
        }

        let keys: Vec<Vec<u8>> = storage
            .range(Some(&b"b"[..]), Some(&b"d"[..]))
            .unwrap()
            .into_iter()
            .map(|(k, _)| k)
            .collect();
        assert_eq!(keys, vec![b"b".to_vec(), b"c".to_vec()]);

        assert_eq!(storage.range(None, None).unwrap().len(), 4);
        assert!(storage.range(Some(&b"d"[..]), Some(&b"a"[..])).unwrap().is_empty());
    }

    #[test]
    fn test_batch_operations() {
        let storage = Storage::open_temporary().unwrap();
        storage.set(b"stale", b"x").unwrap();

        let ops = vec![
            BatchOp::Insert {
                key: b"a".to_vec(),
                value: b"1".to_vec(),
            },
            BatchOp::Insert {
                key: b"b".to_vec(),
                value: b"2".to_vec(),
            },
            BatchOp::Remove {
                key: b"stale".to_vec(),
            },
        ];
        storage.apply_batch(ops).unwrap();

        assert_eq!(storage.get(b"a").unwrap(), Some(b"1".to_vec()));
        assert_eq!(storage.get(b"b").unwrap(), Some(b"2".to_vec()));
        assert!(!storage.has(b"stale").unwrap());
    }

    #[test]
    fn test_open_at_path() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::open(dir.path()).unwrap();
        storage.set(b"durable", b"yes").unwrap();
        storage.flush().unwrap();
        assert_eq!(storage.get(b"durable").unwrap(), Some(b"yes".to_vec()));
    }
}
