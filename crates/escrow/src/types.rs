//! Escrow records and messages.

use minikeeper_core::Coin;
use serde::{Deserialize, Serialize};

/// An open offer: `locked` is held by the module until someone pays `wanted`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Escrow {
    pub locked: Coin,
    pub wanted: Coin,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgCreateEscrow {
    pub creator: String,
    pub locked: Coin,
    pub wanted: Coin,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgCreateEscrowResponse {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgClaimEscrow {
    pub claimer: String,
    pub locker: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgClaimEscrowResponse {
    /// Paid by the claimer to the locker.
    pub paid: Coin,
    /// Released from the module account to the claimer.
    pub received: Coin,
}
