use minikeeper_core::{Address, HexAddressCodec};
use minikeeper_example::{
    GenesisState, Keeper, MsgLikeTweet, MsgPostTweet, MsgServer, Params, MODULE_NAME,
};
use minikeeper_storage::{Context, KvStore, Storage};
use std::sync::Arc;

fn addr(byte: u8) -> String {
    Address([byte; 20]).to_hex()
}

#[test]
fn test_state_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let authority = addr(0xAA);

    {
        let storage = Storage::open(dir.path()).unwrap();
        let ctx = Context::new(&storage).with_block_height(1);
        let keeper = Keeper::new(Arc::new(HexAddressCodec), &authority).unwrap();
        keeper
            .init_genesis(
                &ctx,
                &GenesisState {
                    params: Params {
                        max_tweet_length: 32,
                    },
                    counters: vec![],
                },
            )
            .unwrap();

        let server = MsgServer::new(&keeper);
        let posted = server
            .post_tweet(
                &ctx,
                &MsgPostTweet {
                    sender: addr(1),
                    text: "persisted".into(),
                },
            )
            .unwrap();
        server
            .like_tweet(
                &ctx,
                &MsgLikeTweet {
                    sender: addr(2),
                    tweet_id: posted.tweet_id,
                },
            )
            .unwrap();
        storage.flush().unwrap();
    }

    let storage = Storage::open(dir.path()).unwrap();
    let ctx = Context::new(&storage);
    let keeper = Keeper::new(Arc::new(HexAddressCodec), &authority).unwrap();

    let tweet = keeper.get_tweet(&ctx, 0).unwrap();
    assert_eq!(tweet.text, "persisted");
    assert_eq!(tweet.likes, 1);
    assert_eq!(tweet.height, 1);
    assert_eq!(keeper.get_params(&ctx).unwrap().max_tweet_length, 32);
    assert_eq!(keeper.tweets_id.peek(&ctx).unwrap(), 1);
}

#[test]
fn test_keys_live_under_module_namespace() {
    let storage = Storage::open_temporary().unwrap();
    let ctx = Context::new(&storage);
    let keeper = Keeper::new(Arc::new(HexAddressCodec), &addr(0xAA)).unwrap();
    keeper.increment_counter(&ctx, &addr(1)).unwrap();

    let mut expected = format!("{}/", MODULE_NAME).into_bytes();
    expected.push(1);
    expected.extend_from_slice(addr(1).as_bytes());

    let keys: Vec<Vec<u8>> = storage
        .range(None, None)
        .unwrap()
        .into_iter()
        .map(|(k, _)| k)
        .collect();
    assert_eq!(keys, vec![expected]);
    assert_eq!(
        storage.get(&keys[0]).unwrap(),
        Some(1u64.to_be_bytes().to_vec())
    );
}
