use minikeeper_collections::{
    BincodeValue, CollectionError, KeyRange, SchemaBuilder, StringKey, Uint64Key, Uint64Value,
};
use minikeeper_storage::{Context, KvStore, Storage, StoreKey};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Post {
    author: String,
    body: String,
}

#[test]
fn test_sled_backed_schema() {
    let dir = tempfile::tempdir().unwrap();
    let storage = Storage::open(dir.path()).unwrap();
    let ctx = Context::new(&storage);

    let mut sb = SchemaBuilder::new(StoreKey::new("posts"));
    let ids = sb.sequence(0u8, "post_id");
    let posts = sb.map(1u8, "posts", Uint64Key, BincodeValue::<Post>::new());
    let schema = sb.build().unwrap();
    assert_eq!(schema.names(), vec!["post_id", "posts"]);

    for body in ["first", "second", "third"] {
        let id = ids.next(&ctx).unwrap();
        let post = Post {
            author: "alice".into(),
            body: body.into(),
        };
        posts.set(&ctx, &id, &post).unwrap();
    }

    let all = posts.export(&ctx).unwrap();
    let ids: Vec<u64> = all.iter().map(|(id, _)| *id).collect();
    assert_eq!(ids, vec![0, 1, 2]);
    assert_eq!(all[1].1.body, "second");
}

#[test]
fn test_walk_visits_each_key_in_range_once() {
    let storage = Storage::open_temporary().unwrap();
    let ctx = Context::new(&storage);

    let mut sb = SchemaBuilder::new(StoreKey::new("nums"));
    let squares = sb.map(0u8, "squares", Uint64Key, Uint64Value);
    sb.build().unwrap();

    // Insert out of order.
    for n in [17u64, 3, 250, 0, 256, 42, 1000, 5] {
        squares.set(&ctx, &n, &(n * n)).unwrap();
    }

    let mut visited = Vec::new();
    squares
        .walk(&ctx, Some(KeyRange::between(3, 256)), |k, v| -> Result<bool, CollectionError> {
            assert_eq!(v, k * k);
            visited.push(k);
            Ok(false)
        })
        .unwrap();
    assert_eq!(visited, vec![3, 5, 17, 42, 250]);
}

#[test]
fn test_branch_rolls_back_collection_writes() {
    let storage = Storage::open_temporary().unwrap();
    let ctx = Context::new(&storage);

    let mut sb = SchemaBuilder::new(StoreKey::new("bank"));
    let balances = sb.map(0u8, "balances", StringKey, Uint64Value);
    sb.build().unwrap();

    balances.set(&ctx, &"alice".to_string(), &50).unwrap();

    let result = ctx.branch(|child| -> Result<(), CollectionError> {
        balances.set(child, &"alice".to_string(), &0)?;
        balances.set(child, &"bob".to_string(), &50)?;
        assert_eq!(balances.get(child, &"bob".to_string())?, Some(50));
        Err(CollectionError::Overflow("bob".into()))
    });
    assert!(result.is_err());

    assert_eq!(balances.get(&ctx, &"alice".to_string()).unwrap(), Some(50));
    assert_eq!(balances.get(&ctx, &"bob".to_string()).unwrap(), None);
}

#[test]
fn test_modules_do_not_share_keys() {
    let storage = Storage::open_temporary().unwrap();
    let ctx = Context::new(&storage);

    let mut bank = SchemaBuilder::new(StoreKey::new("bank"));
    let bank_balances = bank.map(0u8, "balances", StringKey, Uint64Value);
    bank.build().unwrap();

    // Same prefix, different module store.
    let mut other = SchemaBuilder::new(StoreKey::new("other"));
    let other_balances = other.map(0u8, "balances", StringKey, Uint64Value);
    other.build().unwrap();

    bank_balances.set(&ctx, &"alice".to_string(), &1).unwrap();
    other_balances.set(&ctx, &"alice".to_string(), &2).unwrap();

    assert_eq!(bank_balances.get(&ctx, &"alice".to_string()).unwrap(), Some(1));
    assert_eq!(other_balances.get(&ctx, &"alice".to_string()).unwrap(), Some(2));
    assert_eq!(storage.range(None, None).unwrap().len(), 2);
}
