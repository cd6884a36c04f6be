//! Key-based node lookup.

use crate::{ImmutableNode, Node, NodeKey};

/// Anything that resolves node keys: committed revisions and pending
/// write transactions alike.
pub trait NodeLookup {
    /// Resolve a key to its current node.
    fn lookup(&self, key: NodeKey) -> Option<&Node>;

    /// All live keys, in ascending order.
    fn live_keys(&self) -> Vec<NodeKey>;

    /// Resolve a key to a read-only view.
    fn immutable(&self, key: NodeKey) -> Option<ImmutableNode<'_>> {
        self.lookup(key).map(ImmutableNode::new)
    }

    /// Iterate the children of `parent` from its first child rightwards.
    fn children(&self, parent: NodeKey) -> Children<'_, Self> {
        let next = self.lookup(parent).and_then(|n| n.first_child_key());
        Children { lookup: self, next }
    }
}

/// Iterator over a sibling chain.
pub struct Children<'a, L: ?Sized> {
    lookup: &'a L,
    next: Option<NodeKey>,
}

impl<'a, L: NodeLookup + ?Sized> Iterator for Children<'a, L> {
    type Item = ImmutableNode<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.lookup.lookup(self.next?)?;
        self.next = node.right_sibling_key();
        Some(ImmutableNode::new(node))
    }
}
