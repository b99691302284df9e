//! Single-denomination balance module.
//!
//! The [`Keeper`] owns a `balances` map (address to amount) and exposes
//! mint, transfer and burn. The [`MsgServer`] wraps those operations as
//! messages, gating mint behind the configured authority and running each
//! message in its own branch of the caller's context.

pub mod error;
pub mod keeper;
pub mod msg_server;
pub mod types;

pub use error::{BankError, Result};
pub use keeper::{Keeper, BALANCES_KEY, MODULE_NAME};
pub use msg_server::MsgServer;
pub use types::*;
