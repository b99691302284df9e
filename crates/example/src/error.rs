//! Example module errors.

use minikeeper_collections::CollectionError;
use minikeeper_core::AddressError;
use minikeeper_storage::StorageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExampleError {
    #[error("collection error: {0}")]
    Collection(#[from] CollectionError),

    #[error("invalid address {address:?}: {source}")]
    InvalidIdentifier {
        address: String,
        source: AddressError,
    },

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("invalid params: {0}")]
    InvalidParams(String),

    #[error("tweet text is empty")]
    EmptyText,

    #[error("tweet is {len} characters, limit is {max}")]
    TweetTooLong { len: usize, max: u64 },

    #[error("tweet {0} not found")]
    TweetNotFound(u64),

    #[error("{voter} already liked tweet {id}")]
    AlreadyLiked { id: u64, voter: String },

    #[error("counter overflow for {0}")]
    CounterOverflow(String),

    #[error("invalid genesis: {0}")]
    InvalidGenesis(String),
}

impl ExampleError {
    /// Whether the error reports a missing record, from this module or from
    /// a collection lookup.
    pub fn is_not_found(&self) -> bool {
        match self {
            ExampleError::TweetNotFound(_) => true,
            ExampleError::Collection(e) => e.is_not_found(),
            _ => false,
        }
    }
}

impl From<StorageError> for ExampleError {
    fn from(e: StorageError) -> Self {
        ExampleError::Collection(CollectionError::Backend(e))
    }
}

pub type Result<T> = std::result::Result<T, ExampleError>;
