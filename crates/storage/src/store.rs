//! The byte-level key-value contract every backend implements.

use minikeeper_core::{Hash, StateHasher};
use std::ops::Bound;
use thiserror::Error;

/// Storage errors.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sled::Error),

    #[error("Execution context cancelled")]
    Cancelled,

    #[error("Store lock poisoned")]
    LockPoisoned,
}

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// A raw key/value pair as returned by range scans.
pub type KvPair = (Vec<u8>, Vec<u8>);

/// Batch operation for atomic updates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchOp {
    Insert { key: Vec<u8>, value: Vec<u8> },
    Remove { key: Vec<u8> },
}

impl BatchOp {
    pub fn key(&self) -> &[u8] {
        match self {
            BatchOp::Insert { key, .. } | BatchOp::Remove { key } => key,
        }
    }
}

/// Ordered byte-key to byte-value store.
///
/// Keys are ordered lexicographically on their raw bytes. Range scans are
/// half-open: `start` is inclusive, `end` exclusive, and a missing bound is
/// unbounded on that side.
pub trait KvStore: Send + Sync {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>>;

    fn set(&self, key: &[u8], value: &[u8]) -> Result<()>;

    /// Delete a key. Deleting an absent key is not an error.
    fn delete(&self, key: &[u8]) -> Result<()>;

    fn has(&self, key: &[u8]) -> Result<bool> {
        Ok(self.get(key)?.is_some())
    }

    /// All entries in `[start, end)`, ascending by key.
    fn range(&self, start: Option<&[u8]>, end: Option<&[u8]>) -> Result<Vec<KvPair>>;

    /// Apply several writes. Backends that can do so apply them all-or-nothing.
    fn apply_batch(&self, ops: Vec<BatchOp>) -> Result<()>;
}

/// Translate optional half-open bounds into `std::ops::Bound`s.
///
/// Returns `None` when the range is empty (`start >= end`), which some
/// backends would otherwise reject.
pub fn range_bounds<'a>(
    start: Option<&'a [u8]>,
    end: Option<&'a [u8]>,
) -> Option<(Bound<&'a [u8]>, Bound<&'a [u8]>)> {
    if let (Some(s), Some(e)) = (start, end) {
        if s >= e {
            return None;
        }
    }
    let lo = start.map_or(Bound::Unbounded, Bound::Included);
    let hi = end.map_or(Bound::Unbounded, Bound::Excluded);
    Some((lo, hi))
}

/// The smallest key greater than every key starting with `prefix`.
///
/// Returns `None` when no such key exists (empty prefix or all `0xFF`).
pub fn prefix_end(prefix: &[u8]) -> Option<Vec<u8>> {
    let mut end = prefix.to_vec();
    while let Some(last) = end.pop() {
        if last < u8::MAX {
            end.push(last + 1);
            return Some(end);
        }
    }
    None
}

/// Digest of every entry in the store, in key order.
///
/// Hosts use this as the commitment for a block: identical contents give
/// identical hashes regardless of the write history.
pub fn commit_hash(store: &dyn KvStore) -> Result<Hash> {
    let mut hasher = StateHasher::new();
    for (key, value) in store.range(None, None)? {
        hasher.update(&key, &value);
    }
    Ok(hasher.finalize())
}
