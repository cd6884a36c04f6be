//! Read-only node views.
//!
//! Traversal and serialization consumers only ever see nodes through these
//! wrappers. They expose accessors and nothing else, so a mutation attempt
//! through a view does not compile.

use crate::{ElementData, Node, NodeKey, NodeKind, QName};

/// Read-only view over any node.
#[derive(Debug, Clone, Copy)]
pub struct ImmutableNode<'a> {
    node: &'a Node,
}

impl<'a> ImmutableNode<'a> {
    pub fn new(node: &'a Node) -> Self {
        Self { node }
    }

    pub fn key(&self) -> NodeKey {
        self.node.key()
    }

    pub fn kind(&self) -> NodeKind {
        self.node.kind()
    }

    pub fn parent_key(&self) -> Option<NodeKey> {
        self.node.parent_key()
    }

    pub fn first_child_key(&self) -> Option<NodeKey> {
        self.node.first_child_key()
    }

    pub fn left_sibling_key(&self) -> Option<NodeKey> {
        self.node.left_sibling_key()
    }

    pub fn right_sibling_key(&self) -> Option<NodeKey> {
        self.node.right_sibling_key()
    }

    pub fn child_count(&self) -> u64 {
        self.node.child_count()
    }

    pub fn has_first_child(&self) -> bool {
        self.first_child_key().is_some()
    }

    pub fn has_left_sibling(&self) -> bool {
        self.left_sibling_key().is_some()
    }

    pub fn has_right_sibling(&self) -> bool {
        self.right_sibling_key().is_some()
    }

    pub fn name(&self) -> Option<&'a QName> {
        self.node.name()
    }

    pub fn value(&self) -> Option<&'a str> {
        self.node.value()
    }

    pub fn as_document(&self) -> Option<ImmutableDocument<'a>> {
        (self.kind() == NodeKind::DocumentRoot).then_some(ImmutableDocument { node: self.node })
    }

    pub fn as_element(&self) -> Option<ImmutableElement<'a>> {
        self.node.element().map(|data| ImmutableElement {
            node: self.node,
            data,
        })
    }

    pub fn as_text(&self) -> Option<ImmutableText<'a>> {
        match (self.kind(), self.node.value()) {
            (NodeKind::Text, Some(value)) => Some(ImmutableText {
                key: self.key(),
                value,
            }),
            _ => None,
        }
    }
}

/// Read-only view over the document root.
#[derive(Debug, Clone, Copy)]
pub struct ImmutableDocument<'a> {
    node: &'a Node,
}

impl<'a> ImmutableDocument<'a> {
    pub fn key(&self) -> NodeKey {
        self.node.key()
    }

    /// The root element, if one has been inserted.
    pub fn root_element_key(&self) -> Option<NodeKey> {
        self.node.first_child_key()
    }

    pub fn child_count(&self) -> u64 {
        self.node.child_count()
    }
}

/// Read-only view over an element.
#[derive(Debug, Clone, Copy)]
pub struct ImmutableElement<'a> {
    node: &'a Node,
    data: &'a ElementData,
}

impl<'a> ImmutableElement<'a> {
    pub fn key(&self) -> NodeKey {
        self.node.key()
    }

    pub fn name(&self) -> &'a QName {
        &self.data.name
    }

    pub fn attribute_keys(&self) -> impl Iterator<Item = NodeKey> + 'a {
        self.data.attribute_keys()
    }

    pub fn namespace_keys(&self) -> impl Iterator<Item = NodeKey> + 'a {
        self.data.namespace_keys()
    }

    pub fn attribute_count(&self) -> usize {
        self.data.attribute_count()
    }

    pub fn namespace_count(&self) -> usize {
        self.data.namespace_count()
    }

    pub fn attribute_key(&self, name: &QName) -> Option<NodeKey> {
        self.data.attribute_key(name)
    }

    pub fn child_count(&self) -> u64 {
        self.node.child_count()
    }
}

/// Read-only view over a text node.
#[derive(Debug, Clone, Copy)]
pub struct ImmutableText<'a> {
    key: NodeKey,
    value: &'a str,
}

impl<'a> ImmutableText<'a> {
    pub fn key(&self) -> NodeKey {
        self.key
    }

    pub fn value(&self) -> &'a str {
        self.value
    }
}
