//! Common error types for the node model.

use crate::{NodeKey, NodeKind};
use thiserror::Error;

/// Errors raised by node construction and field access.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NodeError {
    /// A prefix or local name is not a valid XML NCName.
    #[error("invalid XML name: {name:?}")]
    InvalidName { name: String },

    /// The node does not have the field being accessed.
    #[error("node {key} is a {actual} node, expected {expected}")]
    KindMismatch {
        key: NodeKey,
        expected: &'static str,
        actual: NodeKind,
    },
}

impl NodeError {
    pub fn invalid_name(name: impl Into<String>) -> Self {
        Self::InvalidName { name: name.into() }
    }

    pub fn kind_mismatch(key: NodeKey, expected: &'static str, actual: NodeKind) -> Self {
        Self::KindMismatch {
            key,
            expected,
            actual,
        }
    }
}

/// Result type for node operations.
pub type NodeResult<T> = Result<T, NodeError>;
