//! Arbor Mutation
//!
//! Insert, move, copy and remove nodes while keeping the parent, sibling
//! and child-count links of the tree consistent.
//!
//! Responsibilities:
//! - Validate content kinds against the chosen insert position
//! - Splice fresh and moved nodes into sibling chains
//! - Merge text nodes that would otherwise end up adjacent
//! - Drive every node change through prepare/finish on the page transaction
//!
//! # Module Structure
//!
//! - `insert_pos` - The closed set of insert positions and their dispatch
//! - `ops/` - Individual link-rewriting algorithms (attach, detach, remove, copy)
//! - `wtx` - The cursor-based write transaction callers use
//! - `error` - Error types for mutation failures

mod error;
mod insert_pos;
mod ops;
mod wtx;

pub use error::{MutationError, MutationResult};
pub use insert_pos::InsertPos;
pub use wtx::NodeWriteTrx;
