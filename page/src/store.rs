//! The resource store.

use std::sync::Arc;

use crate::{PageWriteTrx, Revision, StoreConfig};

/// Owns the revision history of one resource.
///
/// `begin_write` borrows the store mutably, so at most one write
/// transaction exists at a time. Readers clone an `Arc<Revision>` first and
/// keep reading it while later revisions are written.
#[derive(Debug)]
pub struct ResourceStore {
    config: StoreConfig,
    revisions: Vec<Arc<Revision>>,
}

impl ResourceStore {
    /// Create a store holding the bootstrap revision.
    pub fn new(config: StoreConfig) -> Self {
        tracing::debug!(resource = %config.resource_name, "creating resource store");
        Self {
            config,
            revisions: vec![Arc::new(Revision::bootstrap())],
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// The most recently committed revision.
    pub fn latest(&self) -> Arc<Revision> {
        match self.revisions.last() {
            Some(revision) => Arc::clone(revision),
            None => Arc::new(Revision::bootstrap()),
        }
    }

    /// A committed revision by number.
    pub fn revision(&self, number: u64) -> Option<Arc<Revision>> {
        usize::try_from(number)
            .ok()
            .and_then(|index| self.revisions.get(index))
            .cloned()
    }

    pub fn revision_count(&self) -> usize {
        self.revisions.len()
    }

    /// Start the single write transaction against the latest revision.
    pub fn begin_write(&mut self) -> PageWriteTrx<'_> {
        let base = self.latest();
        tracing::debug!(
            resource = %self.config.resource_name,
            base = base.number(),
            "beginning write transaction"
        );
        PageWriteTrx::new(self, base)
    }

    pub(crate) fn publish(&mut self, revision: Revision) -> Arc<Revision> {
        let revision = Arc::new(revision);
        self.revisions.push(Arc::clone(&revision));
        revision
    }
}

impl Default for ResourceStore {
    fn default() -> Self {
        Self::new(StoreConfig::default())
    }
}
