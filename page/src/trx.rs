//! The page-transaction collaborator interface.
//!
//! The mutation engine never writes nodes in place. It asks the page
//! transaction for a revision-local clone, edits the clone, and hands it
//! back with `finish_modification`. [`NodeGuard`] wraps that pairing so the
//! clone is either finished or discarded on every exit path.

use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use arbor_core::{Content, Node, NodeKey, NodeLookup};

use crate::{PageResult, Revision};

/// Copy-on-write access to the pending revision.
pub trait PageTransaction: NodeLookup {
    /// Number the pending revision will get on commit.
    fn revision_number(&self) -> u64;

    /// Create a node with a fresh, never reused key.
    fn create_node(&mut self, parent: Option<NodeKey>, content: Content) -> PageResult<NodeKey>;

    /// Return a revision-local clone of `key` and mark it in flight.
    fn prepare_for_modification(&mut self, key: NodeKey) -> PageResult<Node>;

    /// Make a prepared clone canonical for its key.
    fn finish_modification(&mut self, node: Node) -> PageResult<()>;

    /// Drop an in-flight clone without applying it.
    fn discard_modification(&mut self, key: NodeKey);

    /// Delete a node from the pending revision.
    fn remove(&mut self, key: NodeKey) -> PageResult<()>;

    /// Count of applied modifications (creates, finishes, removes).
    fn modification_count(&self) -> u64;

    /// Publish the pending revision.
    fn commit(self) -> PageResult<Arc<Revision>>
    where
        Self: Sized;

    /// Drop the pending revision.
    fn abort(self)
    where
        Self: Sized;

    /// Scoped form of prepare/finish.
    fn modify(&mut self, key: NodeKey) -> PageResult<NodeGuard<'_, Self>>
    where
        Self: Sized,
    {
        let node = self.prepare_for_modification(key)?;
        Ok(NodeGuard {
            trx: self,
            node: Some(node),
        })
    }
}

/// A prepared clone that is discarded unless finished.
pub struct NodeGuard<'t, T: PageTransaction + ?Sized> {
    trx: &'t mut T,
    node: Option<Node>,
}

impl<'t, T: PageTransaction + ?Sized> NodeGuard<'t, T> {
    /// Commit the clone into the pending revision.
    pub fn finish(mut self) -> PageResult<()> {
        match self.node.take() {
            Some(node) => self.trx.finish_modification(node),
            None => Ok(()),
        }
    }

    /// Drop the clone explicitly.
    pub fn discard(self) {}
}

impl<T: PageTransaction + ?Sized> Deref for NodeGuard<'_, T> {
    type Target = Node;

    fn deref(&self) -> &Node {
        self.node.as_ref().expect("guard holds its node until finished")
    }
}

impl<T: PageTransaction + ?Sized> DerefMut for NodeGuard<'_, T> {
    fn deref_mut(&mut self) -> &mut Node {
        self.node.as_mut().expect("guard holds its node until finished")
    }
}

impl<T: PageTransaction + ?Sized> Drop for NodeGuard<'_, T> {
    fn drop(&mut self) {
        if let Some(node) = self.node.take() {
            tracing::trace!(key = %node.key(), "discarding unfinished modification");
            self.trx.discard_modification(node.key());
        }
    }
}
