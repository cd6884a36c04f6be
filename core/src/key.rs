//! Node keys.
//!
//! A key is a 64-bit value that is:
//! - Unique within a resource and never reused after removal
//! - Stable across copy-on-write clones
//! - Opaque to external users
//!
//! Absent links are `None` in memory. The raw encoding reserves the two
//! topmost values as "no node".

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeKey(u64);

impl NodeKey {
    /// Key of the document root in every revision.
    pub const DOCUMENT_ROOT: NodeKey = NodeKey(0);

    /// Raw sentinel for an absent link.
    pub const NULL_RAW: u64 = u64::MAX;

    /// Raw sentinel for a key that has not been assigned yet.
    pub const UNASSIGNED_RAW: u64 = u64::MAX - 1;

    /// Largest raw value usable as a real key.
    pub const MAX_RAW: u64 = u64::MAX - 2;

    /// Create a key from a raw value. The value must not be a sentinel.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Decode a raw value, mapping both sentinels to `None`.
    pub fn from_raw(raw: u64) -> Option<Self> {
        (raw <= Self::MAX_RAW).then_some(Self(raw))
    }

    /// Encode an optional link, mapping `None` to the null sentinel.
    pub fn encode(key: Option<NodeKey>) -> u64 {
        key.map_or(Self::NULL_RAW, |k| k.0)
    }

    /// Get the raw value.
    pub fn raw(&self) -> u64 {
        self.0
    }

    /// Returns true if this is the document root key.
    pub fn is_document_root(&self) -> bool {
        *self == Self::DOCUMENT_ROOT
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}
