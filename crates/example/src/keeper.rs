//! State and operations of the example module.

use crate::error::{ExampleError, Result};
use crate::types::{Params, Tweet};
use minikeeper_collections::{
    BincodeValue, Item, KeySet, Map, PairKeyCodec, Prefix, PrefixByte, Schema, SchemaBuilder,
    Sequence, StringKey, Uint64Key, Uint64Value,
};
use minikeeper_core::AddressCodec;
use minikeeper_storage::{Context, StoreKey};
use std::sync::Arc;
use tracing::debug;

pub const MODULE_NAME: &str = "example";

pub const PARAMS_KEY: PrefixByte = Prefix::from_u8(0);
pub const COUNTER_KEY: PrefixByte = Prefix::from_u8(1);
pub const TWEETS_ID_KEY: PrefixByte = Prefix::from_u8(2);
pub const TWEETS_KEY: PrefixByte = Prefix::from_u8(3);
pub const LIKED_BY_KEY: PrefixByte = Prefix::from_u8(4);

pub type LikedByKey = PairKeyCodec<Uint64Key, StringKey>;

#[derive(Clone)]
pub struct Keeper {
    address_codec: Arc<dyn AddressCodec>,
    // May execute MsgUpdateParams.
    authority: String,

    schema: Schema,
    pub params: Item<BincodeValue<Params>>,
    pub counter: Map<StringKey, Uint64Value>,
    pub tweets_id: Sequence,
    pub tweets: Map<Uint64Key, BincodeValue<Tweet>>,
    /// `(tweet id, voter)` pairs, one per like.
    pub liked_by: KeySet<LikedByKey>,
}

impl Keeper {
    /// Build the keeper and its schema.
    ///
    /// Fails if `authority` is not a valid address or the schema does not
    /// build. Both are configuration mistakes, reported before any state is
    /// touched.
    pub fn new(address_codec: Arc<dyn AddressCodec>, authority: &str) -> Result<Self> {
        let authority = address_codec
            .canonical_string(authority)
            .map_err(|source| ExampleError::InvalidIdentifier {
                address: authority.to_string(),
                source,
            })?;

        let mut sb = SchemaBuilder::new(StoreKey::new(MODULE_NAME));
        let params = sb.item(PARAMS_KEY, "params", BincodeValue::new());
        let counter = sb.map(COUNTER_KEY, "counter", StringKey, Uint64Value);
        let tweets_id = sb.sequence(TWEETS_ID_KEY, "tweets_id");
        let tweets = sb.map(TWEETS_KEY, "tweets", Uint64Key, BincodeValue::new());
        let liked_by = sb.key_set(LIKED_BY_KEY, "liked_by", PairKeyCodec(Uint64Key, StringKey));
        let schema = sb.build()?;

        Ok(Self {
            address_codec,
            authority,
            schema,
            params,
            counter,
            tweets_id,
            tweets,
            liked_by,
        })
    }

    pub fn authority(&self) -> &str {
        &self.authority
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Canonical form of `address`. Every key and creator field holds this
    /// form.
    pub fn validate_address(&self, address: &str) -> Result<String> {
        self.address_codec
            .canonical_string(address)
            .map_err(|source| ExampleError::InvalidIdentifier {
                address: address.to_string(),
                source,
            })
    }

    /// Current params; defaults until genesis or an update stores some.
    pub fn get_params(&self, ctx: &Context<'_>) -> Result<Params> {
        Ok(self.params.get(ctx)?.unwrap_or_default())
    }

    /// Validate and store `params`.
    pub fn set_params(&self, ctx: &Context<'_>, params: &Params) -> Result<()> {
        params.validate()?;
        self.params.set(ctx, params)?;
        debug!(max_tweet_length = params.max_tweet_length, "params set");
        Ok(())
    }

    /// Replace params on behalf of `authority`, which must be the keeper
    /// authority under any spelling the codec accepts.
    pub fn update_params(&self, ctx: &Context<'_>, authority: &str, params: &Params) -> Result<()> {
        let authority = self.validate_address(authority)?;
        if authority != self.authority {
            return Err(ExampleError::Unauthorized(format!(
                "authority does not match the module's authority: got {}, want {}",
                authority, self.authority
            )));
        }
        self.set_params(ctx, params)
    }

    /// Counter of `address`; zero if never incremented.
    pub fn get_counter(&self, ctx: &Context<'_>, address: &str) -> Result<u64> {
        let key = self.validate_address(address)?;
        match self.counter.get_or_err(ctx, &key) {
            Ok(count) => Ok(count),
            Err(e) if e.is_not_found() => Ok(0),
            Err(e) => Err(e.into()),
        }
    }

    /// Add one to the counter of `address` and return the new value.
    pub fn increment_counter(&self, ctx: &Context<'_>, address: &str) -> Result<u64> {
        let key = self.validate_address(address)?;
        let count = self
            .get_counter(ctx, &key)?
            .checked_add(1)
            .ok_or_else(|| ExampleError::CounterOverflow(key.clone()))?;
        self.counter.set(ctx, &key, &count)?;
        debug!(address = %key, count, "counter incremented");
        Ok(count)
    }

    /// Every counter, in address order.
    pub fn counters(&self, ctx: &Context<'_>) -> Result<Vec<(String, u64)>> {
        Ok(self.counter.export(ctx)?)
    }

    /// Store a new tweet by `sender` and return its id.
    pub fn post_tweet(&self, ctx: &Context<'_>, sender: &str, text: &str) -> Result<u64> {
        let sender = self.validate_address(sender)?;
        if text.is_empty() {
            return Err(ExampleError::EmptyText);
        }
        let max = self.get_params(ctx)?.max_tweet_length;
        let len = text.chars().count();
        if len as u64 > max {
            return Err(ExampleError::TweetTooLong { len, max });
        }

        let id = self.tweets_id.next(ctx)?;
        let tweet = Tweet {
            creator: sender,
            text: text.to_string(),
            height: ctx.block_height(),
            likes: 0,
        };
        self.tweets.set(ctx, &id, &tweet)?;
        debug!(id, creator = %tweet.creator, height = tweet.height, "tweet posted");
        Ok(id)
    }

    pub fn get_tweet(&self, ctx: &Context<'_>, id: u64) -> Result<Tweet> {
        self.tweets
            .get(ctx, &id)?
            .ok_or(ExampleError::TweetNotFound(id))
    }

    /// Record a like from `sender`; returns the tweet's new like count.
    ///
    /// Each address may like a tweet once.
    pub fn like_tweet(&self, ctx: &Context<'_>, sender: &str, id: u64) -> Result<u64> {
        let sender = self.validate_address(sender)?;
        let mut tweet = self.get_tweet(ctx, id)?;

        let vote = (id, sender);
        if self.liked_by.has(ctx, &vote)? {
            return Err(ExampleError::AlreadyLiked { id, voter: vote.1 });
        }

        tweet.likes += 1;
        self.tweets.set(ctx, &id, &tweet)?;
        self.liked_by.insert(ctx, &vote)?;
        debug!(id, voter = %vote.1, likes = tweet.likes, "tweet liked");
        Ok(tweet.likes)
    }

    /// Delete tweet `id` and its likes. Only the creator may do so.
    pub fn delete_tweet(&self, ctx: &Context<'_>, sender: &str, id: u64) -> Result<()> {
        let sender = self.validate_address(sender)?;
        let tweet = self.get_tweet(ctx, id)?;
        if tweet.creator != sender {
            return Err(ExampleError::Unauthorized(format!(
                "{} did not post tweet {}",
                sender, id
            )));
        }

        for voter in self.likers(ctx, id)? {
            self.liked_by.remove(ctx, &(id, voter))?;
        }
        self.tweets.remove(ctx, &id)?;
        debug!(id, "tweet deleted");
        Ok(())
    }

    /// Addresses that liked tweet `id`, in address order.
    pub fn likers(&self, ctx: &Context<'_>, id: u64) -> Result<Vec<String>> {
        let mut voters = Vec::new();
        self.liked_by
            .walk_prefix(ctx, &id, |(_, voter)| -> Result<bool> {
                voters.push(voter);
                Ok(false)
            })?;
        Ok(voters)
    }

    /// Every stored tweet, in id order.
    pub fn tweets(&self, ctx: &Context<'_>) -> Result<Vec<(u64, Tweet)>> {
        Ok(self.tweets.export(ctx)?)
    }
}
