//! Schema registry: assigns collections their prefixes and validates them.

use crate::codec::{KeyCodec, Uint64Value, UnitValue, ValueCodec};
use crate::error::{CodecError, CollectionError, Result};
use crate::item::Item;
use crate::keyset::KeySet;
use crate::map::Map;
use crate::prefix::Prefix;
use crate::sequence::Sequence;
use minikeeper_storage::{Context, PrefixStore, StoreKey};
use std::collections::HashSet;
use std::fmt;

/// What kind of collection a schema entry describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionKind {
    Item,
    Map,
    KeySet,
    Sequence,
}

impl fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CollectionKind::Item => "item",
            CollectionKind::Map => "map",
            CollectionKind::KeySet => "key_set",
            CollectionKind::Sequence => "sequence",
        };
        f.write_str(name)
    }
}

/// Descriptor of one registered collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionInfo {
    pub name: String,
    pub prefix: Prefix,
    pub kind: CollectionKind,
    pub key_codec: Option<String>,
    pub value_codec: Option<String>,
}

/// Where a collection handle reads and writes: its module store and prefix.
#[derive(Debug, Clone)]
pub(crate) struct Binding {
    store_key: StoreKey,
    prefix: Prefix,
    name: String,
}

impl Binding {
    pub(crate) fn store<'a>(&self, ctx: &Context<'a>) -> Result<PrefixStore<'a>> {
        Ok(ctx.kv_store(&self.store_key)?)
    }

    pub(crate) fn prefix(&self) -> &Prefix {
        &self.prefix
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn not_found(&self, key: String) -> CollectionError {
        CollectionError::NotFound {
            collection: self.name.clone(),
            key,
        }
    }

    pub(crate) fn decode_error(&self, source: CodecError) -> CollectionError {
        CollectionError::Decode {
            collection: self.name.clone(),
            source,
        }
    }

    pub(crate) fn encode_error(&self, source: CodecError) -> CollectionError {
        CollectionError::Encode {
            collection: self.name.clone(),
            source,
        }
    }
}

/// Collects collection registrations for one module store.
///
/// Registration hands back the typed handle immediately; problems (bad
/// names, colliding prefixes) are reported together by [`build`].
///
/// [`build`]: SchemaBuilder::build
pub struct SchemaBuilder {
    store_key: StoreKey,
    collections: Vec<CollectionInfo>,
}

impl SchemaBuilder {
    pub fn new(store_key: StoreKey) -> Self {
        Self {
            store_key,
            collections: Vec::new(),
        }
    }

    fn register(
        &mut self,
        prefix: Prefix,
        name: &str,
        kind: CollectionKind,
        key_codec: Option<String>,
        value_codec: Option<String>,
    ) -> Binding {
        self.collections.push(CollectionInfo {
            name: name.to_string(),
            prefix: prefix.clone(),
            kind,
            key_codec,
            value_codec,
        });
        Binding {
            store_key: self.store_key.clone(),
            prefix,
            name: name.to_string(),
        }
    }

    /// Register a single-value collection.
    pub fn item<VC: ValueCodec>(
        &mut self,
        prefix: impl Into<Prefix>,
        name: &str,
        value_codec: VC,
    ) -> Item<VC> {
        let binding = self.register(
            prefix.into(),
            name,
            CollectionKind::Item,
            None,
            Some(value_codec.name()),
        );
        Item::new(binding, value_codec)
    }

    /// Register a key-ordered map.
    pub fn map<KC: KeyCodec, VC: ValueCodec>(
        &mut self,
        prefix: impl Into<Prefix>,
        name: &str,
        key_codec: KC,
        value_codec: VC,
    ) -> Map<KC, VC> {
        let binding = self.register(
            prefix.into(),
            name,
            CollectionKind::Map,
            Some(key_codec.name()),
            Some(value_codec.name()),
        );
        Map::new(binding, key_codec, value_codec)
    }

    /// Register a set of keys.
    pub fn key_set<KC: KeyCodec>(
        &mut self,
        prefix: impl Into<Prefix>,
        name: &str,
        key_codec: KC,
    ) -> KeySet<KC> {
        let binding = self.register(
            prefix.into(),
            name,
            CollectionKind::KeySet,
            Some(key_codec.name()),
            Some(UnitValue.name()),
        );
        KeySet::new(Map::new(binding, key_codec, UnitValue))
    }

    /// Register a monotonically increasing counter.
    pub fn sequence(&mut self, prefix: impl Into<Prefix>, name: &str) -> Sequence {
        let binding = self.register(
            prefix.into(),
            name,
            CollectionKind::Sequence,
            None,
            Some(Uint64Value.name()),
        );
        Sequence::new(Item::new(binding, Uint64Value))
    }

    /// Validate every registration and freeze the schema.
    ///
    /// Fails on an invalid store or collection name, a duplicate name, an
    /// empty prefix, or two prefixes where one equals or starts with the
    /// other. The last check matters because stored keys are
    /// `prefix || key`: overlapping prefixes would let one collection read
    /// and overwrite the other's entries.
    pub fn build(self) -> Result<Schema> {
        if !is_valid_name(self.store_key.name()) {
            return Err(CollectionError::InvalidName(self.store_key.name().to_string()));
        }

        let mut seen = HashSet::new();
        for info in &self.collections {
            if !is_valid_name(&info.name) {
                return Err(CollectionError::InvalidName(info.name.clone()));
            }
            if !seen.insert(info.name.as_str()) {
                return Err(CollectionError::DuplicateName(info.name.clone()));
            }
            if info.prefix.is_empty() {
                return Err(CollectionError::EmptyPrefix(info.name.clone()));
            }
        }

        // After sorting, if any prefix starts with another, some adjacent
        // pair does too: everything between them shares the shorter prefix.
        let mut collections = self.collections;
        collections.sort_by(|a, b| a.prefix.cmp(&b.prefix));
        for pair in collections.windows(2) {
            let (first, second) = (&pair[0], &pair[1]);
            if first.prefix.overlaps(&second.prefix) {
                return Err(CollectionError::PrefixCollision {
                    first: first.name.clone(),
                    first_prefix: first.prefix.to_hex(),
                    second: second.name.clone(),
                    second_prefix: second.prefix.to_hex(),
                });
            }
        }

        tracing::debug!(
            store = %self.store_key,
            collections = collections.len(),
            "schema built"
        );

        Ok(Schema {
            store_key: self.store_key,
            collections,
        })
    }
}

/// Collection names: an ASCII letter followed by letters, digits or `_`.
fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// The frozen set of collections registered against one module store.
#[derive(Debug, Clone)]
pub struct Schema {
    store_key: StoreKey,
    collections: Vec<CollectionInfo>,
}

impl Schema {
    pub fn store_key(&self) -> &StoreKey {
        &self.store_key
    }

    /// Registered collections, ordered by prefix.
    pub fn collections(&self) -> &[CollectionInfo] {
        &self.collections
    }

    pub fn get(&self, name: &str) -> Option<&CollectionInfo> {
        self.collections.iter().find(|c| c.name == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.collections.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.collections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{StringKey, StringValue};

    fn builder() -> SchemaBuilder {
        SchemaBuilder::new(StoreKey::new("test"))
    }

    #[test]
    fn test_build_distinct_prefixes() {
        let mut sb = builder();
        let _params = sb.item(0u8, "params", StringValue);
        let _balances = sb.map(1u8, "balances", StringKey, Uint64Value);
        let _ids = sb.sequence(2u8, "ids");
        let schema = sb.build().unwrap();

        assert_eq!(schema.len(), 3);
        assert_eq!(schema.names(), vec!["params", "balances", "ids"]);
        let balances = schema.get("balances").unwrap();
        assert_eq!(balances.kind, CollectionKind::Map);
        assert_eq!(balances.key_codec.as_deref(), Some("string"));
        assert_eq!(balances.value_codec.as_deref(), Some("u64"));
    }

    #[test]
    fn test_duplicate_prefix_fails() {
        let mut sb = builder();
        let _a = sb.item(1u8, "a", StringValue);
        let _b = sb.item(1u8, "b", StringValue);
        assert!(matches!(
            sb.build(),
            Err(CollectionError::PrefixCollision { .. })
        ));
    }

    #[test]
    fn test_prefix_of_prefix_fails() {
        let mut sb = builder();
        let _short = sb.map(vec![0x01], "short", StringKey, Uint64Value);
        let _middle = sb.map(vec![0x01, 0x00, 0x05], "middle", StringKey, Uint64Value);
        let _long = sb.map(vec![0x01, 0x7F], "long", StringKey, Uint64Value);
        match sb.build() {
            Err(CollectionError::PrefixCollision { first, .. }) => assert_eq!(first, "short"),
            other => panic!("expected collision, got {:?}", other),
        }
    }

    #[test]
    fn test_sibling_prefixes_are_fine() {
        let mut sb = builder();
        let _a = sb.item(vec![0x01, 0x01], "a", StringValue);
        let _b = sb.item(vec![0x01, 0x02], "b", StringValue);
        let _c = sb.item(vec![0x02], "c", StringValue);
        assert!(sb.build().is_ok());
    }

    #[test]
    fn test_empty_prefix_fails() {
        let mut sb = builder();
        let _a = sb.item(Vec::<u8>::new(), "a", StringValue);
        assert!(matches!(sb.build(), Err(CollectionError::EmptyPrefix(_))));
    }

    #[test]
    fn test_names_are_validated() {
        let mut sb = builder();
        let _a = sb.item(0u8, "a", StringValue);
        let _b = sb.item(1u8, "a", StringValue);
        assert!(matches!(sb.build(), Err(CollectionError::DuplicateName(_))));

        let mut sb = builder();
        let _a = sb.item(0u8, "9lives", StringValue);
        assert!(matches!(sb.build(), Err(CollectionError::InvalidName(_))));

        let sb = SchemaBuilder::new(StoreKey::new("bad/store"));
        assert!(matches!(sb.build(), Err(CollectionError::InvalidName(_))));
    }

    #[test]
    fn test_empty_schema_builds() {
        let schema = builder().build().unwrap();
        assert!(schema.is_empty());
        assert_eq!(schema.store_key().name(), "test");
    }
}
