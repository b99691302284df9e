//! Escrow module errors.

use minikeeper_bank::BankError;
use minikeeper_collections::CollectionError;
use minikeeper_core::{AddressError, CoinError};
use minikeeper_storage::StorageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EscrowError {
    #[error("collection error: {0}")]
    Collection(#[from] CollectionError),

    #[error("bank: {0}")]
    Bank(#[from] BankError),

    #[error("{0} already has an open escrow")]
    DuplicateEscrow(String),

    #[error("no escrow for {0}")]
    NotFound(String),

    #[error("invalid address {address:?}: {source}")]
    InvalidIdentifier {
        address: String,
        source: AddressError,
    },

    #[error("invalid coin: {0}")]
    InvalidCoin(#[from] CoinError),

    #[error("denom {0} is not handled by the bank")]
    UnsupportedDenom(String),

    #[error("cannot lock a zero amount")]
    ZeroAmount,
}

impl EscrowError {
    pub fn is_not_found(&self) -> bool {
        match self {
            EscrowError::NotFound(_) => true,
            EscrowError::Collection(e) => e.is_not_found(),
            _ => false,
        }
    }
}

impl From<StorageError> for EscrowError {
    fn from(e: StorageError) -> Self {
        EscrowError::Collection(CollectionError::Backend(e))
    }
}

pub type Result<T> = std::result::Result<T, EscrowError>;
