//! Content kinds.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of node kinds.
///
/// Attribute and Namespace nodes are non-structural: they hang off their
/// owning element and never take part in a sibling chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    DocumentRoot,
    Element,
    Text,
    Attribute,
    Namespace,
}

impl NodeKind {
    /// Returns true if nodes of this kind carry parent/sibling/child links.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            NodeKind::DocumentRoot | NodeKind::Element | NodeKind::Text
        )
    }

    /// Returns true for text nodes.
    pub fn is_text(&self) -> bool {
        matches!(self, NodeKind::Text)
    }

    /// Lowercase name used in messages.
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::DocumentRoot => "document-root",
            NodeKind::Element => "element",
            NodeKind::Text => "text",
            NodeKind::Attribute => "attribute",
            NodeKind::Namespace => "namespace",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
