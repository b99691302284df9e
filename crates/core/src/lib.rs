//! Core primitives shared by the minikeeper modules.
//!
//! This crate provides the small set of types every keeper needs:
//! - Addresses and the injected identifier validator ([`AddressCodec`])
//! - Coins (denomination + amount)
//! - Blake3 hashing for module accounts and store commitments

pub mod address;
pub mod coin;
pub mod hash;

// Re-export commonly used types at the crate root
pub use address::{Address, AddressCodec, AddressError, HexAddressCodec, ADDRESS_LEN};
pub use coin::{validate_denom, Coin, CoinError};
pub use hash::{hash, Hash, StateHasher};
