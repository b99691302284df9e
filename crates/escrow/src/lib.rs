//! Escrow module.
//!
//! A creator locks coins in the module account together with the coins they
//! want in exchange. Anyone paying the wanted coins receives the locked ones
//! and closes the escrow:
//!
//! ```text
//! create_escrow(creator, locked, wanted)
//!     creator --locked--> module account, record stored      (Open)
//! claim_escrow(claimer, creator)
//!     claimer --wanted--> creator
//!     module account --locked--> claimer, record removed     (Claimed)
//! ```
//!
//! Coins move through an injected [`BankKeeper`].

pub mod error;
pub mod expected_keepers;
pub mod keeper;
pub mod msg_server;
pub mod types;

pub use error::{EscrowError, Result};
pub use expected_keepers::BankKeeper;
pub use keeper::{Keeper, MODULE_NAME};
pub use msg_server::MsgServer;
pub use types::*;
