//! Insert positions.
//!
//! A closed set of placements relative to an anchor node. Each position
//! knows which anchor and content kinds it accepts, how to graft a fresh
//! node (`insert_node`) and how to move an existing subtree there
//! (`process_move`).

use std::fmt;

use arbor_core::{Content, NodeKey, NodeKind, NodeLookup};
use arbor_page::PageTransaction;

use crate::error::{MutationError, MutationResult};
use crate::ops;

/// Where a node goes relative to its anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InsertPos {
    /// First child of an element or the document root.
    AsFirstChild,
    /// Immediately left of an element or text node. Insert only.
    AsLeftSibling,
    /// Immediately right of an element or text node.
    AsRightSibling,
    /// Attribute or namespace of an element.
    AsNonStructural,
}

impl InsertPos {
    pub fn name(self) -> &'static str {
        match self {
            InsertPos::AsFirstChild => "as first child",
            InsertPos::AsLeftSibling => "as left sibling",
            InsertPos::AsRightSibling => "as right sibling",
            InsertPos::AsNonStructural => "as non-structural node",
        }
    }

    /// Structural positions take part in sibling chains and move the
    /// cursor onto the inserted node.
    pub fn is_structural(self) -> bool {
        !matches!(self, InsertPos::AsNonStructural)
    }

    pub fn supports_move(self) -> bool {
        matches!(self, InsertPos::AsFirstChild | InsertPos::AsRightSibling)
    }

    /// Kind table for anchors and content.
    pub fn accepts(self, anchor: NodeKind, content: NodeKind) -> bool {
        use NodeKind::*;
        match self {
            InsertPos::AsFirstChild => {
                matches!(anchor, Element | DocumentRoot) && matches!(content, Element | Text)
            }
            InsertPos::AsLeftSibling | InsertPos::AsRightSibling => {
                matches!(anchor, Element | Text) && matches!(content, Element | Text)
            }
            InsertPos::AsNonStructural => {
                anchor == Element && matches!(content, Attribute | Namespace)
            }
        }
    }

    /// Check that `content` may be placed at this position relative to
    /// `anchor`. Runs before anything is modified.
    pub fn check<L: NodeLookup + ?Sized>(
        self,
        lookup: &L,
        anchor: NodeKey,
        content: NodeKind,
    ) -> MutationResult<()> {
        let node = ops::node(lookup, anchor)?;
        let anchor_kind = node.kind();
        let invalid = || MutationError::invalid_node_kind(self.name(), anchor_kind, content);

        if !self.accepts(anchor_kind, content) {
            return Err(invalid());
        }

        let new_parent = match self {
            InsertPos::AsFirstChild => Some(anchor_kind),
            InsertPos::AsLeftSibling | InsertPos::AsRightSibling => {
                let parent = node.parent_key().ok_or_else(|| {
                    MutationError::invariant(format!("{anchor} is not attached to a parent"))
                })?;
                Some(ops::node(lookup, parent)?.kind())
            }
            InsertPos::AsNonStructural => None,
        };
        if content.is_text() && new_parent == Some(NodeKind::DocumentRoot) {
            return Err(invalid());
        }
        Ok(())
    }

    /// Graft a fresh node carrying `content` at this position relative to
    /// `anchor` and return its key.
    ///
    /// Structural nodes are created unlinked and spliced in with the same
    /// algorithms moves use, so after a text merge the returned key is the
    /// surviving node holding the merged value.
    pub fn insert_node<T: PageTransaction>(
        self,
        trx: &mut T,
        anchor: NodeKey,
        content: &Content,
    ) -> MutationResult<NodeKey> {
        self.check(trx, anchor, content.kind())?;

        let attach = match self {
            InsertPos::AsFirstChild => ops::attach_as_first_child::<T>,
            InsertPos::AsLeftSibling => ops::attach_as_left_sibling::<T>,
            InsertPos::AsRightSibling => ops::attach_as_right_sibling::<T>,
            InsertPos::AsNonStructural => {
                return ops::attach_non_structural(trx, anchor, content.clone());
            }
        };
        let key = trx.create_node(None, content.clone())?;
        attach(trx, key, anchor)?;
        Ok(key)
    }

    /// Move the existing subtree rooted at `from` to this position relative
    /// to `to`, relinking its old parent and neighbours as well as the
    /// destination.
    pub fn process_move<T: PageTransaction>(
        self,
        trx: &mut T,
        from: NodeKey,
        to: NodeKey,
    ) -> MutationResult<()> {
        ops::move_subtree(trx, self, from, to)
    }
}

impl fmt::Display for InsertPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
