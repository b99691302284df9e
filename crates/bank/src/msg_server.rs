//! Message handlers for the bank module.
//!
//! Every handler runs in a branch of the caller's context: its writes reach
//! the caller's store only if the whole message succeeds.

use crate::error::{BankError, Result};
use crate::keeper::Keeper;
use crate::types::{
    MsgBurn, MsgBurnResponse, MsgMintCoins, MsgMintCoinsResponse, MsgTransferCoins,
    MsgTransferCoinsResponse,
};
use minikeeper_storage::Context;
use tracing::{info, warn};

pub struct MsgServer<'a> {
    keeper: &'a Keeper,
}

impl<'a> MsgServer<'a> {
    pub fn new(keeper: &'a Keeper) -> Self {
        Self { keeper }
    }

    pub fn mint_coins(&self, ctx: &Context<'_>, msg: &MsgMintCoins) -> Result<MsgMintCoinsResponse> {
        let result = ctx.branch(|ctx| -> Result<MsgMintCoinsResponse> {
            let authority = self.keeper.validate_address(&msg.authority)?;
            if authority != self.keeper.authority() {
                return Err(BankError::Unauthorized(format!(
                    "{} is not the bank authority",
                    msg.authority
                )));
            }
            let balance = self.keeper.mint_coins(ctx, &msg.recipient, msg.amount)?;
            Ok(MsgMintCoinsResponse { balance })
        });
        match &result {
            Ok(resp) => info!(recipient = %msg.recipient, amount = msg.amount, balance = resp.balance, "mint"),
            Err(e) => warn!(recipient = %msg.recipient, error = %e, "mint rejected"),
        }
        result
    }

    pub fn transfer_coins(
        &self,
        ctx: &Context<'_>,
        msg: &MsgTransferCoins,
    ) -> Result<MsgTransferCoinsResponse> {
        let result = ctx.branch(|ctx| -> Result<MsgTransferCoinsResponse> {
            self.keeper
                .transfer_coins(ctx, &msg.sender, &msg.receiver, msg.amount)?;
            Ok(MsgTransferCoinsResponse {
                sender_balance: self.keeper.balance(ctx, &msg.sender)?,
                receiver_balance: self.keeper.balance(ctx, &msg.receiver)?,
            })
        });
        match &result {
            Ok(_) => info!(sender = %msg.sender, receiver = %msg.receiver, amount = msg.amount, "transfer"),
            Err(e) => warn!(sender = %msg.sender, error = %e, "transfer rejected"),
        }
        result
    }

    pub fn burn(&self, ctx: &Context<'_>, msg: &MsgBurn) -> Result<MsgBurnResponse> {
        let result = ctx.branch(|ctx| -> Result<MsgBurnResponse> {
            let balance = self.keeper.burn(ctx, &msg.sender, msg.amount)?;
            Ok(MsgBurnResponse { balance })
        });
        match &result {
            Ok(resp) => info!(sender = %msg.sender, amount = msg.amount, balance = resp.balance, "burn"),
            Err(e) => warn!(sender = %msg.sender, error = %e, "burn rejected"),
        }
        result
    }
}
