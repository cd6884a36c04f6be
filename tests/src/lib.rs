//! Arbor integration test support.
//!
//! - `render` - Compact XML rendering of a tree for shape comparisons
//! - `assertion` - Chain helpers and the structural consistency assertion
//! - `flaky` - A page transaction that fails on demand
//! - `setup` - Store fixtures and test tracing


pub mod prelude {
    pub use crate::assertion::{assert_consistent, chain_values, sibling_chain};
    pub use crate::flaky::FlakyPageTrx;
    pub use crate::render::{render, render_document};
    pub use crate::setup::{init_tracing, qname, store};

    pub use arbor_core::{Content, NodeKey, NodeKind, NodeLookup, QName};
    pub use arbor_mutation::{InsertPos, MutationError, NodeWriteTrx};
    pub use arbor_page::{PageError, PageTransaction, ResourceStore, StoreConfig};
}
