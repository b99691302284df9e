//! Schema-typed collections over a prefixed key-value store.
//!
//! A module declares its state once, at construction, through a
//! [`SchemaBuilder`]. Each registration claims a [`Prefix`] inside the
//! module's store and returns a typed handle:
//!
//! - [`Item`]: at most one value, stored at the prefix itself
//! - [`Map`]: entries stored at `prefix || encode(key)`, iterated in key order
//! - [`KeySet`]: keys only
//! - [`Sequence`]: a `u64` counter for minting identifiers
//!
//! Handles own no data; every call takes the caller's [`Context`] and goes
//! to the store it carries. [`SchemaBuilder::build`] rejects overlapping
//! prefixes, so no collection can touch another's keys.
//!
//! # Example
//!
//! ```rust
//! use minikeeper_collections::{SchemaBuilder, StringKey, Uint64Value};
//! use minikeeper_storage::{Context, MemStore, StoreKey};
//!
//! let mut sb = SchemaBuilder::new(StoreKey::new("bank"));
//! let balances = sb.map(0u8, "balances", StringKey, Uint64Value);
//! let schema = sb.build().unwrap();
//! assert_eq!(schema.len(), 1);
//!
//! let root = MemStore::new();
//! let ctx = Context::new(&root);
//! balances.set(&ctx, &"alice".to_string(), &100).unwrap();
//! assert_eq!(balances.get(&ctx, &"alice".to_string()).unwrap(), Some(100));
//! ```
//!
//! [`Context`]: minikeeper_storage::Context

pub mod codec;
pub mod error;
pub mod item;
pub mod keyset;
pub mod map;
pub mod prefix;
pub mod range;
pub mod schema;
pub mod sequence;

// Re-export commonly used types
pub use codec::{
    BincodeValue, BytesKey, KeyCodec, PairKeyCodec, StringKey, StringValue, Uint64Key,
    Uint64Value, UnitValue, ValueCodec,
};
pub use error::{CodecError, CollectionError, Result};
pub use item::Item;
pub use keyset::KeySet;
pub use map::Map;
pub use prefix::{Prefix, PrefixByte};
pub use range::KeyRange;
pub use schema::{CollectionInfo, CollectionKind, Schema, SchemaBuilder};
pub use sequence::Sequence;
