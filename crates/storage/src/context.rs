//! Execution context handed to every collection and keeper call.

use crate::cache::CacheStore;
use crate::prefix::PrefixStore;
use crate::store::{KvStore, Result, StorageError};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Names the sub-store a module owns inside the root store.
///
/// A module's keys live under `name || '/'` in the root store.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StoreKey(String);

impl StoreKey {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    /// Byte namespace of this store inside the root store.
    pub fn namespace(&self) -> Vec<u8> {
        let mut ns = self.0.as_bytes().to_vec();
        ns.push(b'/');
        ns
    }
}

impl fmt::Debug for StoreKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StoreKey({})", self.0)
    }
}

impl fmt::Display for StoreKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Shared flag the host flips to abandon in-flight work.
#[derive(Clone, Default, Debug)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// The scope a keeper operation runs in.
///
/// Carries the root store, the current block height and a cancellation
/// token. It holds no transaction state of its own: whether writes are
/// buffered or durable depends on the store the host hands in.
#[derive(Clone)]
pub struct Context<'a> {
    store: &'a dyn KvStore,
    block_height: u64,
    cancel: CancelToken,
}

impl<'a> Context<'a> {
    pub fn new(store: &'a dyn KvStore) -> Self {
        Self {
            store,
            block_height: 0,
            cancel: CancelToken::new(),
        }
    }

    pub fn with_block_height(mut self, height: u64) -> Self {
        self.block_height = height;
        self
    }

    pub fn with_cancel_token(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn block_height(&self) -> u64 {
        self.block_height
    }

    pub fn cancel_token(&self) -> &CancelToken {
        &self.cancel
    }

    /// The root store.
    pub fn store(&self) -> &'a dyn KvStore {
        self.store
    }

    /// Fail with [`StorageError::Cancelled`] once the token has fired.
    pub fn check(&self) -> Result<()> {
        if self.cancel.is_cancelled() {
            return Err(StorageError::Cancelled);
        }
        Ok(())
    }

    /// Open the namespaced store owned by `key`.
    pub fn kv_store(&self, key: &StoreKey) -> Result<PrefixStore<'a>> {
        self.check()?;
        Ok(PrefixStore::new(self.store, key.namespace()))
    }

    /// Run `f` against a branch of this context.
    ///
    /// Writes made inside `f` are buffered and reach this context's store in
    /// a single batch only when `f` returns `Ok`. On `Err` they are dropped,
    /// so a failed multi-step operation leaves no partial state behind.
    pub fn branch<T, E, F>(&self, f: F) -> std::result::Result<T, E>
    where
        F: FnOnce(&Context<'_>) -> std::result::Result<T, E>,
        E: From<StorageError>,
    {
        let cache = CacheStore::new(self.store);
        let value = {
            let child = Context {
                store: &cache,
                block_height: self.block_height,
                cancel: self.cancel.clone(),
            };
            f(&child)?
        };
        self.check()?;
        cache.write()?;
        Ok(value)
    }
}

impl fmt::Debug for Context<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("block_height", &self.block_height)
            .field("cancelled", &self.cancel.is_cancelled())
            .finish()
    }
}
