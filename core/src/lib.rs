//! Arbor Core Types
//!
//! This crate provides the node model used throughout Arbor:
//! - Identity (NodeKey and its raw null sentinels)
//! - Node kinds and qualified names
//! - Insertable content items
//! - The node value type with its structural links
//! - Read-only node views for traversal consumers
//! - The key-based lookup trait shared by revisions and write transactions
//! - Common error types

mod content;
mod error;
mod immutable;
mod key;
mod kind;
mod lookup;
mod name;
mod node;

pub use content::*;
pub use error::*;
pub use immutable::*;
pub use key::*;
pub use kind::*;
pub use lookup::*;
pub use name::*;
pub use node::*;
