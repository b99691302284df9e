//! Key-value storage layer for minikeeper.
//!
//! This crate provides the byte-level store every collection is built on:
//! - The [`KvStore`] contract (get/set/delete/range/batch)
//! - A persistent sled backend and an in-memory backend
//! - Namespaced views ([`PrefixStore`]) and write-buffering branches ([`CacheStore`])
//! - The execution [`Context`] passed to every keeper call
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                     Keepers / Msg servers               │
//! │          (bank, example, escrow domain operations)      │
//! └────────────────────────┬────────────────────────────────┘
//!                          │  Item / Map / Sequence
//! ┌────────────────────────▼────────────────────────────────┐
//! │                  Context (per execution)                 │
//! │  ┌─────────────┐  ┌─────────────┐  ┌─────────────────┐  │
//! │  │ PrefixStore │  │ CacheStore  │  │ CancelToken     │  │
//! │  │  - module   │  │  - branch   │  │  - abandon work │  │
//! │  │    namespace│  │  - batch    │  │                 │  │
//! │  └─────────────┘  └─────────────┘  └─────────────────┘  │
//! └────────────────────────┬────────────────────────────────┘
//!                          │
//! ┌────────────────────────▼────────────────────────────────┐
//! │            KvStore backend (sled / in-memory)            │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use minikeeper_storage::{Context, KvStore, MemStore, StoreKey};
//!
//! let root = MemStore::new();
//! let ctx = Context::new(&root).with_block_height(1);
//!
//! let bank = ctx.kv_store(&StoreKey::new("bank")).unwrap();
//! bank.set(b"alice", b"100").unwrap();
//!
//! assert_eq!(root.get(b"bank/alice").unwrap(), Some(b"100".to_vec()));
//! ```

pub mod cache;
pub mod context;
pub mod db;
pub mod memory;
pub mod prefix;
pub mod store;

// Re-export commonly used types
pub use cache::CacheStore;
pub use context::{CancelToken, Context, StoreKey};
pub use db::Storage;
pub use memory::MemStore;
pub use prefix::PrefixStore;
pub use store::{commit_hash, prefix_end, BatchOp, KvPair, KvStore, Result, StorageError};
