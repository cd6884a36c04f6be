//! Immutable revision snapshots.

use std::collections::HashMap;
use std::sync::Arc;

use arbor_core::{Node, NodeKey, NodeLookup};

/// An immutable, fully linked snapshot of the tree.
///
/// Nodes are held behind `Arc` so that a revision built from another shares
/// every node it did not change.
#[derive(Debug, Clone)]
pub struct Revision {
    number: u64,
    nodes: HashMap<NodeKey, Arc<Node>>,
    next_key: u64,
}

impl Revision {
    /// Revision 0: only the document root.
    pub(crate) fn bootstrap() -> Self {
        let root = Node::document_root();
        let mut nodes = HashMap::new();
        nodes.insert(root.key(), Arc::new(root));
        Self {
            number: 0,
            nodes,
            next_key: NodeKey::DOCUMENT_ROOT.raw() + 1,
        }
    }

    pub(crate) fn from_parts(number: u64, nodes: HashMap<NodeKey, Arc<Node>>, next_key: u64) -> Self {
        Self {
            number,
            nodes,
            next_key,
        }
    }

    pub(crate) fn nodes(&self) -> &HashMap<NodeKey, Arc<Node>> {
        &self.nodes
    }

    pub(crate) fn next_key(&self) -> u64 {
        self.next_key
    }

    /// Revision number, 0 for the bootstrap revision.
    pub fn number(&self) -> u64 {
        self.number
    }

    /// Number of live nodes, including the document root.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The shared handle of a node, for identity comparisons across revisions.
    pub fn shared(&self, key: NodeKey) -> Option<&Arc<Node>> {
        self.nodes.get(&key)
    }
}

impl NodeLookup for Revision {
    fn lookup(&self, key: NodeKey) -> Option<&Node> {
        self.nodes.get(&key).map(Arc::as_ref)
    }

    fn live_keys(&self) -> Vec<NodeKey> {
        let mut keys: Vec<_> = self.nodes.keys().copied().collect();
        keys.sort();
        keys
    }
}
