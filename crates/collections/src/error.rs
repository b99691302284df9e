//! Collection and codec errors.

use minikeeper_storage::StorageError;
use thiserror::Error;

/// Errors raised while turning values into bytes or back.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("{codec}: expected {expected} bytes, got {got}")]
    InvalidLength {
        codec: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("{codec}: invalid utf-8")]
    InvalidUtf8 { codec: &'static str },

    #[error("{codec}: {reason}")]
    Malformed { codec: &'static str, reason: String },
}

/// Errors raised by schemas and collections.
#[derive(Debug, Error)]
pub enum CollectionError {
    /// The key has no value. Callers are expected to branch on this.
    #[error("{collection}: key {key} not found")]
    NotFound { collection: String, key: String },

    /// Stored bytes do not match the collection's encoding.
    #[error("{collection}: corrupt stored data: {source}")]
    Decode {
        collection: String,
        source: CodecError,
    },

    #[error("{collection}: cannot encode: {source}")]
    Encode {
        collection: String,
        source: CodecError,
    },

    #[error("prefix collision: {first} (0x{first_prefix}) overlaps {second} (0x{second_prefix})")]
    PrefixCollision {
        first: String,
        first_prefix: String,
        second: String,
        second_prefix: String,
    },

    #[error("collection {0} has an empty prefix")]
    EmptyPrefix(String),

    #[error("duplicate collection name: {0}")]
    DuplicateName(String),

    #[error("invalid collection name: {0:?}")]
    InvalidName(String),

    #[error("{0}: counter overflow")]
    Overflow(String),

    #[error("backend error: {0}")]
    Backend(#[from] StorageError),
}

impl CollectionError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, CollectionError::NotFound { .. })
    }
}

/// Result type for collection operations.
pub type Result<T> = std::result::Result<T, CollectionError>;
