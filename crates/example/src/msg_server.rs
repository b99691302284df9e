//! Message handlers for the example module.

use crate::error::Result;
use crate::keeper::Keeper;
use crate::types::*;
use minikeeper_storage::Context;
use tracing::{info, warn};

/// Thin adapter from messages to [`Keeper`] calls.
///
/// Each handler runs in [`Context::branch`]; a rejected message leaves the
/// caller's store untouched.
pub struct MsgServer<'a> {
    keeper: &'a Keeper,
}

impl<'a> MsgServer<'a> {
    pub fn new(keeper: &'a Keeper) -> Self {
        Self { keeper }
    }

    pub fn increment_counter(
        &self,
        ctx: &Context<'_>,
        msg: &MsgIncrementCounter,
    ) -> Result<MsgIncrementCounterResponse> {
        let result = ctx.branch(|ctx| -> Result<MsgIncrementCounterResponse> {
            let count = self.keeper.increment_counter(ctx, &msg.sender)?;
            Ok(MsgIncrementCounterResponse { count })
        });
        log_result("increment_counter", &msg.sender, &result);
        result
    }

    pub fn update_params(
        &self,
        ctx: &Context<'_>,
        msg: &MsgUpdateParams,
    ) -> Result<MsgUpdateParamsResponse> {
        let result = ctx.branch(|ctx| -> Result<MsgUpdateParamsResponse> {
            self.keeper.update_params(ctx, &msg.authority, &msg.params)?;
            Ok(MsgUpdateParamsResponse {})
        });
        log_result("update_params", &msg.authority, &result);
        result
    }

    pub fn post_tweet(&self, ctx: &Context<'_>, msg: &MsgPostTweet) -> Result<MsgPostTweetResponse> {
        let result = ctx.branch(|ctx| -> Result<MsgPostTweetResponse> {
            let tweet_id = self.keeper.post_tweet(ctx, &msg.sender, &msg.text)?;
            Ok(MsgPostTweetResponse { tweet_id })
        });
        log_result("post_tweet", &msg.sender, &result);
        result
    }

    pub fn like_tweet(&self, ctx: &Context<'_>, msg: &MsgLikeTweet) -> Result<MsgLikeTweetResponse> {
        let result = ctx.branch(|ctx| -> Result<MsgLikeTweetResponse> {
            let likes = self.keeper.like_tweet(ctx, &msg.sender, msg.tweet_id)?;
            Ok(MsgLikeTweetResponse { likes })
        });
        log_result("like_tweet", &msg.sender, &result);
        result
    }

    pub fn delete_tweet(
        &self,
        ctx: &Context<'_>,
        msg: &MsgDeleteTweet,
    ) -> Result<MsgDeleteTweetResponse> {
        let result = ctx.branch(|ctx| -> Result<MsgDeleteTweetResponse> {
            self.keeper.delete_tweet(ctx, &msg.sender, msg.tweet_id)?;
            Ok(MsgDeleteTweetResponse {})
        });
        log_result("delete_tweet", &msg.sender, &result);
        result
    }
}

fn log_result<T: std::fmt::Debug>(msg: &str, signer: &str, result: &Result<T>) {
    match result {
        Ok(resp) => info!(msg, signer, ?resp, "message executed"),
        Err(e) => warn!(msg, signer, error = %e, "message rejected"),
    }
}
