//! Module state records, messages and genesis state.

use crate::error::{ExampleError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Default maximum tweet length, in characters.
pub const DEFAULT_MAX_TWEET_LENGTH: u64 = 280;

/// Hard upper bound accepted by [`Params::validate`].
pub const MAX_TWEET_LENGTH_LIMIT: u64 = 10_000;

/// Governance-controlled module parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Params {
    pub max_tweet_length: u64,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            max_tweet_length: DEFAULT_MAX_TWEET_LENGTH,
        }
    }
}

impl Params {
    pub fn validate(&self) -> Result<()> {
        if self.max_tweet_length == 0 || self.max_tweet_length > MAX_TWEET_LENGTH_LIMIT {
            return Err(ExampleError::InvalidParams(format!(
                "max_tweet_length must be in 1..={}, got {}",
                MAX_TWEET_LENGTH_LIMIT, self.max_tweet_length
            )));
        }
        Ok(())
    }
}

/// A stored tweet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tweet {
    pub creator: String,
    pub text: String,
    /// Block height the tweet was posted at.
    pub height: u64,
    pub likes: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgIncrementCounter {
    pub sender: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgIncrementCounterResponse {
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgUpdateParams {
    pub authority: String,
    pub params: Params,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgUpdateParamsResponse {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgPostTweet {
    pub sender: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgPostTweetResponse {
    pub tweet_id: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgLikeTweet {
    pub sender: String,
    pub tweet_id: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgLikeTweetResponse {
    pub likes: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgDeleteTweet {
    pub sender: String,
    pub tweet_id: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgDeleteTweetResponse {}

/// One address's counter in genesis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterEntry {
    pub address: String,
    pub count: u64,
}

/// Initial (or exported) module state.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GenesisState {
    pub params: Params,
    #[serde(default)]
    pub counters: Vec<CounterEntry>,
}

impl GenesisState {
    /// Check params and reject repeated counter addresses.
    pub fn validate(&self) -> Result<()> {
        self.params.validate()?;
        let mut seen = HashSet::new();
        for entry in &self.counters {
            if !seen.insert(entry.address.as_str()) {
                return Err(ExampleError::InvalidGenesis(format!(
                    "duplicate counter for {}",
                    entry.address
                )));
            }
        }
        Ok(())
    }
}
