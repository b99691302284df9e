//! Bank module errors.

use minikeeper_collections::CollectionError;
use minikeeper_core::AddressError;
use minikeeper_storage::StorageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BankError {
    #[error("collection error: {0}")]
    Collection(#[from] CollectionError),

    #[error("invalid address {address:?}: {source}")]
    InvalidIdentifier {
        address: String,
        source: AddressError,
    },

    #[error("insufficient balance: address {address}, required {required}, available {available}")]
    InsufficientBalance {
        address: String,
        required: u64,
        available: u64,
    },

    #[error("balance overflow for {address}")]
    BalanceOverflow { address: String },

    #[error("invalid denom: expected {expected}, got {got}")]
    InvalidDenom { expected: String, got: String },

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("invalid bank configuration: {0}")]
    InvalidConfig(String),
}

impl From<StorageError> for BankError {
    fn from(e: StorageError) -> Self {
        BankError::Collection(CollectionError::Backend(e))
    }
}

pub type Result<T> = std::result::Result<T, BankError>;
