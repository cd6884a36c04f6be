//! Page store error types.

use arbor_core::NodeKey;
use thiserror::Error;

use crate::integrity::Violations;

/// Errors raised by the revision store.
#[derive(Debug, Error)]
pub enum PageError {
    /// Key is not live in the pending revision.
    #[error("node not found: {0}")]
    NodeNotFound(NodeKey),

    /// Key already has an unfinished clone.
    #[error("node {0} is already prepared for modification")]
    AlreadyPrepared(NodeKey),

    /// Finish without a matching prepare.
    #[error("node {0} was not prepared for modification")]
    NotPrepared(NodeKey),

    /// Commit attempted while clones are still unfinished.
    #[error("cannot commit with unfinished modifications: {keys:?}")]
    ModificationsInFlight { keys: Vec<NodeKey> },

    /// No more keys can be allocated.
    #[error("node key space exhausted")]
    KeySpaceExhausted,

    /// The revision about to be published breaks structural invariants.
    #[error("integrity check failed: {0}")]
    Integrity(Violations),

    /// Failure of the underlying storage.
    #[error("storage failure: {message}")]
    Storage { message: String },
}

impl PageError {
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }
}

/// Result type for page operations.
pub type PageResult<T> = Result<T, PageError>;
