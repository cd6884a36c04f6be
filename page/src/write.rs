//! In-memory copy-on-write write transaction.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::Arc;

use arbor_core::{Content, Node, NodeKey, NodeLookup};

use crate::integrity::verify;
use crate::{PageError, PageResult, PageTransaction, ResourceStore, Revision};

/// The pending revision built on top of a committed base.
///
/// Changed and created nodes live in an overlay; everything else is read
/// through to the base revision, whose nodes are never touched.
pub struct PageWriteTrx<'s> {
    store: &'s mut ResourceStore,
    base: Arc<Revision>,
    pending: HashMap<NodeKey, Arc<Node>>,
    removed: HashSet<NodeKey>,
    in_flight: HashSet<NodeKey>,
    next_key: u64,
    modification_count: u64,
}

impl<'s> PageWriteTrx<'s> {
    pub(crate) fn new(store: &'s mut ResourceStore, base: Arc<Revision>) -> Self {
        let next_key = base.next_key();
        Self {
            store,
            base,
            pending: HashMap::new(),
            removed: HashSet::new(),
            in_flight: HashSet::new(),
            next_key,
            modification_count: 0,
        }
    }

    /// The revision this transaction started from.
    pub fn base(&self) -> &Arc<Revision> {
        &self.base
    }

    /// Keys currently prepared but neither finished nor discarded.
    pub fn in_flight(&self) -> Vec<NodeKey> {
        let mut keys: Vec<_> = self.in_flight.iter().copied().collect();
        keys.sort();
        keys
    }

    fn allocate_key(&mut self) -> PageResult<NodeKey> {
        if self.next_key > NodeKey::MAX_RAW {
            return Err(PageError::KeySpaceExhausted);
        }
        let key = NodeKey::new(self.next_key);
        self.next_key += 1;
        Ok(key)
    }
}

impl NodeLookup for PageWriteTrx<'_> {
    fn lookup(&self, key: NodeKey) -> Option<&Node> {
        if self.removed.contains(&key) {
            return None;
        }
        match self.pending.get(&key) {
            Some(node) => Some(node.as_ref()),
            None => self.base.lookup(key),
        }
    }

    fn live_keys(&self) -> Vec<NodeKey> {
        let keys: BTreeSet<_> = self
            .base
            .nodes()
            .keys()
            .chain(self.pending.keys())
            .filter(|key| !self.removed.contains(*key))
            .copied()
            .collect();
        keys.into_iter().collect()
    }
}

impl PageTransaction for PageWriteTrx<'_> {
    fn revision_number(&self) -> u64 {
        self.base.number() + 1
    }

    fn create_node(&mut self, parent: Option<NodeKey>, content: Content) -> PageResult<NodeKey> {
        let key = self.allocate_key()?;
        tracing::trace!(key = %key, kind = %content.kind(), "creating node");
        self.pending.insert(key, Arc::new(Node::new(key, parent, content)));
        self.modification_count += 1;
        Ok(key)
    }

    fn prepare_for_modification(&mut self, key: NodeKey) -> PageResult<Node> {
        if self.in_flight.contains(&key) {
            return Err(PageError::AlreadyPrepared(key));
        }
        let node = self.lookup(key).cloned().ok_or(PageError::NodeNotFound(key))?;
        self.in_flight.insert(key);
        tracing::trace!(key = %key, "prepared for modification");
        Ok(node)
    }

    fn finish_modification(&mut self, node: Node) -> PageResult<()> {
        let key = node.key();
        if !self.in_flight.remove(&key) {
            return Err(PageError::NotPrepared(key));
        }
        tracing::trace!(key = %key, "finished modification");
        self.pending.insert(key, Arc::new(node));
        self.modification_count += 1;
        Ok(())
    }

    fn discard_modification(&mut self, key: NodeKey) {
        self.in_flight.remove(&key);
    }

    fn remove(&mut self, key: NodeKey) -> PageResult<()> {
        if self.lookup(key).is_none() {
            return Err(PageError::NodeNotFound(key));
        }
        tracing::trace!(key = %key, "removing node");
        self.in_flight.remove(&key);
        self.pending.remove(&key);
        self.removed.insert(key);
        self.modification_count += 1;
        Ok(())
    }

    fn modification_count(&self) -> u64 {
        self.modification_count
    }

    fn commit(self) -> PageResult<Arc<Revision>> {
        if !self.in_flight.is_empty() {
            return Err(PageError::ModificationsInFlight {
                keys: self.in_flight(),
            });
        }

        let number = self.revision_number();
        let mut nodes = self.base.nodes().clone();
        for key in &self.removed {
            nodes.remove(key);
        }
        nodes.extend(self.pending);
        let revision = Revision::from_parts(number, nodes, self.next_key);

        if self.store.config().verify_on_commit {
            let violations = verify(&revision);
            if !violations.is_empty() {
                tracing::warn!(
                    revision = number,
                    violations = violations.len(),
                    "refusing to publish inconsistent revision"
                );
                return Err(PageError::Integrity(violations));
            }
        }

        tracing::debug!(
            resource = %self.store.config().resource_name,
            revision = number,
            modifications = self.modification_count,
            "committed revision"
        );
        Ok(self.store.publish(revision))
    }

    fn abort(self) {
        tracing::debug!(
            resource = %self.store.config().resource_name,
            discarded = self.modification_count,
            "aborted write transaction"
        );
    }
}
