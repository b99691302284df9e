//! Message handlers for the escrow module.

use crate::error::Result;
use crate::keeper::Keeper;
use crate::types::{MsgClaimEscrow, MsgClaimEscrowResponse, MsgCreateEscrow, MsgCreateEscrowResponse};
use minikeeper_storage::Context;
use tracing::{info, warn};

pub struct MsgServer<'a> {
    keeper: &'a Keeper,
}

impl<'a> MsgServer<'a> {
    pub fn new(keeper: &'a Keeper) -> Self {
        Self { keeper }
    }

    pub fn create_escrow(
        &self,
        ctx: &Context<'_>,
        msg: &MsgCreateEscrow,
    ) -> Result<MsgCreateEscrowResponse> {
        let result = ctx.branch(|ctx| -> Result<MsgCreateEscrowResponse> {
            self.keeper
                .create_escrow(ctx, &msg.creator, msg.locked.clone(), msg.wanted.clone())?;
            Ok(MsgCreateEscrowResponse {})
        });
        match &result {
            Ok(_) => info!(creator = %msg.creator, locked = %msg.locked, wanted = %msg.wanted, "escrow opened"),
            Err(e) => warn!(creator = %msg.creator, error = %e, "create escrow rejected"),
        }
        result
    }

    /// Settle an escrow. Both transfers and the delete commit together or
    /// not at all.
    pub fn claim_escrow(
        &self,
        ctx: &Context<'_>,
        msg: &MsgClaimEscrow,
    ) -> Result<MsgClaimEscrowResponse> {
        let result = ctx.branch(|ctx| -> Result<MsgClaimEscrowResponse> {
            let escrow = self.keeper.claim_escrow(ctx, &msg.claimer, &msg.locker)?;
            Ok(MsgClaimEscrowResponse {
                paid: escrow.wanted,
                received: escrow.locked,
            })
        });
        match &result {
            Ok(resp) => info!(claimer = %msg.claimer, locker = %msg.locker, received = %resp.received, "escrow claimed"),
            Err(e) => warn!(claimer = %msg.claimer, locker = %msg.locker, error = %e, "claim rejected"),
        }
        result
    }
}
