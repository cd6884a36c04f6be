//! Arbor Page
//!
//! Copy-on-write revision storage for the node model.
//!
//! Responsibilities:
//! - Keep committed revisions immutable and shareable between readers
//! - Hand out revision-local clones for modification (prepare/finish)
//! - Allocate node keys and track removals in the pending revision
//! - Verify structural integrity before a revision is published
//!
//! # Module Structure
//!
//! - `revision` - Immutable revision snapshots
//! - `store` - The resource store owning the revision history
//! - `trx` - The `PageTransaction` collaborator trait and its scoped guard
//! - `write` - The in-memory copy-on-write write transaction
//! - `integrity` - Structural invariant verification
//! - `config` - Store configuration
//! - `error` - Error types for store failures

mod config;
mod error;
mod integrity;
mod revision;
mod store;
mod trx;
mod write;

pub use config::StoreConfig;
pub use error::{PageError, PageResult};
pub use integrity::{verify, Violation, Violations};
pub use revision::Revision;
pub use store::ResourceStore;
pub use trx::{NodeGuard, PageTransaction};
pub use write::PageWriteTrx;
