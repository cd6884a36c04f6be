//! Mutation error types.

use arbor_core::{NodeError, NodeKey, NodeKind};
use arbor_page::PageError;
use thiserror::Error;

/// Result type for mutation operations.
pub type MutationResult<T> = Result<T, MutationError>;

/// Errors that can occur while mutating the tree.
#[derive(Debug, Error)]
pub enum MutationError {
    #[error("Cannot place {content} content {position} of {anchor} node")]
    InvalidNodeKindForPosition {
        position: &'static str,
        anchor: NodeKind,
        content: NodeKind,
    },

    #[error("Moving a subtree {position} is not supported")]
    UnsupportedMove { position: &'static str },

    #[error("Invariant violation: {message}")]
    InvariantViolation { message: String },

    #[error("Store failure: {0}")]
    Store(#[from] PageError),

    #[error(transparent)]
    Node(#[from] NodeError),

    #[error("Node not found: {0}")]
    NodeNotFound(NodeKey),

    #[error("Cannot move {from} relative to {to}, which lies inside its own subtree")]
    MoveIntoOwnSubtree { from: NodeKey, to: NodeKey },

    #[error("The document root cannot be removed")]
    CannotRemoveDocumentRoot,

    #[error("Write transaction is poisoned by an earlier failure and must be aborted")]
    Poisoned,
}

impl MutationError {
    pub fn invalid_node_kind(position: &'static str, anchor: NodeKind, content: NodeKind) -> Self {
        Self::InvalidNodeKindForPosition {
            position,
            anchor,
            content,
        }
    }

    pub fn unsupported_move(position: &'static str) -> Self {
        Self::UnsupportedMove { position }
    }

    pub fn invariant(message: impl Into<String>) -> Self {
        Self::InvariantViolation {
            message: message.into(),
        }
    }

    /// Whether the write transaction can keep going after this error.
    ///
    /// Caller-contract failures are detected before anything is modified.
    /// Invariant violations and store failures are not recoverable.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::InvalidNodeKindForPosition { .. }
            | Self::UnsupportedMove { .. }
            | Self::Node(_)
            | Self::NodeNotFound(_)
            | Self::MoveIntoOwnSubtree { .. }
            | Self::CannotRemoveDocumentRoot => true,
            Self::InvariantViolation { .. } | Self::Store(_) | Self::Poisoned => false,
        }
    }
}
