//! Node structures.
//!
//! Every node has a key and a parent key. Structural nodes (document root,
//! elements, text) additionally carry [`Links`] into the sibling/child shape
//! of the tree. Elements own ordered attribute and namespace slots.

use crate::{Content, NodeError, NodeKey, NodeKind, NodeResult, QName};

/// Structural links of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Links {
    /// First child, or `None` if childless.
    pub first_child: Option<NodeKey>,
    /// Left sibling, or `None` at the start of the chain.
    pub left_sibling: Option<NodeKey>,
    /// Right sibling, or `None` at the end of the chain.
    pub right_sibling: Option<NodeKey>,
    /// Number of nodes in the chain starting at `first_child`.
    pub child_count: u64,
}

/// Element-specific data: the name and the non-structural slots.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementData {
    /// The element name.
    pub name: QName,
    attributes: Vec<(QName, NodeKey)>,
    namespaces: Vec<(QName, NodeKey)>,
}

impl ElementData {
    pub fn new(name: QName) -> Self {
        Self {
            name,
            attributes: Vec::new(),
            namespaces: Vec::new(),
        }
    }

    /// Attribute keys in insertion order.
    pub fn attribute_keys(&self) -> impl Iterator<Item = NodeKey> + '_ {
        self.attributes.iter().map(|(_, key)| *key)
    }

    /// Namespace keys in insertion order.
    pub fn namespace_keys(&self) -> impl Iterator<Item = NodeKey> + '_ {
        self.namespaces.iter().map(|(_, key)| *key)
    }

    pub fn attribute_count(&self) -> usize {
        self.attributes.len()
    }

    pub fn namespace_count(&self) -> usize {
        self.namespaces.len()
    }

    /// Key of the attribute with the given name, if any.
    pub fn attribute_key(&self, name: &QName) -> Option<NodeKey> {
        self.attributes
            .iter()
            .find(|(n, _)| n.matches(name))
            .map(|(_, key)| *key)
    }

    /// Key of the namespace declaration for `prefix`, if any.
    pub fn namespace_key(&self, prefix: &str) -> Option<NodeKey> {
        self.namespaces
            .iter()
            .find(|(n, _)| n.prefix() == prefix)
            .map(|(_, key)| *key)
    }

    /// Bind an attribute slot. A slot with the same name keeps its position
    /// and its previous key is returned.
    pub fn put_attribute(&mut self, name: QName, key: NodeKey) -> Option<NodeKey> {
        match self.attributes.iter_mut().find(|(n, _)| n.matches(&name)) {
            Some(slot) => {
                let old = slot.1;
                *slot = (name, key);
                Some(old)
            }
            None => {
                self.attributes.push((name, key));
                None
            }
        }
    }

    /// Bind a namespace slot keyed by prefix. Returns the replaced key.
    pub fn put_namespace(&mut self, name: QName, key: NodeKey) -> Option<NodeKey> {
        match self
            .namespaces
            .iter_mut()
            .find(|(n, _)| n.prefix() == name.prefix())
        {
            Some(slot) => {
                let old = slot.1;
                *slot = (name, key);
                Some(old)
            }
            None => {
                self.namespaces.push((name, key));
                None
            }
        }
    }

    /// Drop the attribute or namespace slot pointing at `key`.
    pub fn remove_slot(&mut self, key: NodeKey) -> bool {
        let before = self.attributes.len() + self.namespaces.len();
        self.attributes.retain(|(_, k)| *k != key);
        self.namespaces.retain(|(_, k)| *k != key);
        before != self.attributes.len() + self.namespaces.len()
    }
}

/// Kind-specific node body.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeBody {
    DocumentRoot { links: Links },
    Element { links: Links, element: ElementData },
    Text { links: Links, value: String },
    Attribute { name: QName, value: String },
    Namespace { name: QName },
}

/// A node in the document tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    key: NodeKey,
    parent: Option<NodeKey>,
    body: NodeBody,
}

impl Node {
    /// Create an unlinked node carrying `content`.
    pub fn new(key: NodeKey, parent: Option<NodeKey>, content: Content) -> Self {
        let links = Links::default();
        let body = match content {
            Content::DocumentRoot => NodeBody::DocumentRoot { links },
            Content::Element(name) => NodeBody::Element {
                links,
                element: ElementData::new(name),
            },
            Content::Text(value) => NodeBody::Text { links, value },
            Content::Attribute { name, value } => NodeBody::Attribute { name, value },
            Content::Namespace(name) => NodeBody::Namespace { name },
        };
        Self { key, parent, body }
    }

    /// The document root node.
    pub fn document_root() -> Self {
        Self::new(NodeKey::DOCUMENT_ROOT, None, Content::DocumentRoot)
    }

    pub fn key(&self) -> NodeKey {
        self.key
    }

    pub fn parent_key(&self) -> Option<NodeKey> {
        self.parent
    }

    pub fn set_parent_key(&mut self, parent: Option<NodeKey>) {
        self.parent = parent;
    }

    pub fn body(&self) -> &NodeBody {
        &self.body
    }

    pub fn kind(&self) -> NodeKind {
        match self.body {
            NodeBody::DocumentRoot { .. } => NodeKind::DocumentRoot,
            NodeBody::Element { .. } => NodeKind::Element,
            NodeBody::Text { .. } => NodeKind::Text,
            NodeBody::Attribute { .. } => NodeKind::Attribute,
            NodeBody::Namespace { .. } => NodeKind::Namespace,
        }
    }

    pub fn is_structural(&self) -> bool {
        self.kind().is_structural()
    }

    /// Structural links, `None` for attribute and namespace nodes.
    pub fn links(&self) -> Option<&Links> {
        match &self.body {
            NodeBody::DocumentRoot { links }
            | NodeBody::Element { links, .. }
            | NodeBody::Text { links, .. } => Some(links),
            NodeBody::Attribute { .. } | NodeBody::Namespace { .. } => None,
        }
    }

    pub fn links_mut(&mut self) -> Option<&mut Links> {
        match &mut self.body {
            NodeBody::DocumentRoot { links }
            | NodeBody::Element { links, .. }
            | NodeBody::Text { links, .. } => Some(links),
            NodeBody::Attribute { .. } | NodeBody::Namespace { .. } => None,
        }
    }

    pub fn first_child_key(&self) -> Option<NodeKey> {
        self.links().and_then(|l| l.first_child)
    }

    pub fn left_sibling_key(&self) -> Option<NodeKey> {
        self.links().and_then(|l| l.left_sibling)
    }

    pub fn right_sibling_key(&self) -> Option<NodeKey> {
        self.links().and_then(|l| l.right_sibling)
    }

    pub fn child_count(&self) -> u64 {
        self.links().map_or(0, |l| l.child_count)
    }

    /// Qualified name of elements, attributes and namespaces.
    pub fn name(&self) -> Option<&QName> {
        match &self.body {
            NodeBody::Element { element, .. } => Some(&element.name),
            NodeBody::Attribute { name, .. } | NodeBody::Namespace { name } => Some(name),
            NodeBody::DocumentRoot { .. } | NodeBody::Text { .. } => None,
        }
    }

    /// Value of text and attribute nodes.
    pub fn value(&self) -> Option<&str> {
        match &self.body {
            NodeBody::Text { value, .. } | NodeBody::Attribute { value, .. } => Some(value),
            _ => None,
        }
    }

    /// Replace the value of a text or attribute node.
    pub fn set_value(&mut self, new_value: String) -> NodeResult<()> {
        let (key, kind) = (self.key, self.kind());
        match &mut self.body {
            NodeBody::Text { value, .. } | NodeBody::Attribute { value, .. } => {
                *value = new_value;
                Ok(())
            }
            _ => Err(NodeError::kind_mismatch(key, "text or attribute", kind)),
        }
    }

    pub fn element(&self) -> Option<&ElementData> {
        match &self.body {
            NodeBody::Element { element, .. } => Some(element),
            _ => None,
        }
    }

    pub fn element_mut(&mut self) -> Option<&mut ElementData> {
        match &mut self.body {
            NodeBody::Element { element, .. } => Some(element),
            _ => None,
        }
    }
}
