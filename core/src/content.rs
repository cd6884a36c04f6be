//! Content items carried by insertions.

use crate::{Node, NodeBody, NodeKind, NodeResult, QName};

/// The payload of a node without any of its links.
///
/// An insertion grafts a fresh node carrying one of these onto an anchor.
#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    DocumentRoot,
    Element(QName),
    Text(String),
    Attribute { name: QName, value: String },
    Namespace(QName),
}

impl Content {
    /// Element content with an unprefixed name.
    pub fn element(local_name: &str) -> NodeResult<Self> {
        Ok(Content::Element(QName::new(local_name)?))
    }

    /// Text content.
    pub fn text(value: impl Into<String>) -> Self {
        Content::Text(value.into())
    }

    /// Attribute content with an unprefixed name.
    pub fn attribute(local_name: &str, value: impl Into<String>) -> NodeResult<Self> {
        Ok(Content::Attribute {
            name: QName::new(local_name)?,
            value: value.into(),
        })
    }

    /// Namespace declaration content.
    pub fn namespace(prefix: &str, uri: &str) -> NodeResult<Self> {
        Ok(Content::Namespace(QName::namespace_decl(prefix, uri)?))
    }

    /// The kind of node this content produces.
    pub fn kind(&self) -> NodeKind {
        match self {
            Content::DocumentRoot => NodeKind::DocumentRoot,
            Content::Element(_) => NodeKind::Element,
            Content::Text(_) => NodeKind::Text,
            Content::Attribute { .. } => NodeKind::Attribute,
            Content::Namespace(_) => NodeKind::Namespace,
        }
    }

    /// Extract the content of an existing node. Links and attribute slots
    /// are not part of the content.
    pub fn from_node(node: &Node) -> Self {
        match node.body() {
            NodeBody::DocumentRoot { .. } => Content::DocumentRoot,
            NodeBody::Element { element, .. } => Content::Element(element.name.clone()),
            NodeBody::Text { value, .. } => Content::Text(value.clone()),
            NodeBody::Attribute { name, value } => Content::Attribute {
                name: name.clone(),
                value: value.clone(),
            },
            NodeBody::Namespace { name } => Content::Namespace(name.clone()),
        }
    }
}
