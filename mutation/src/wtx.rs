//! Cursor-based write transaction.
//!
//! `NodeWriteTrx` owns a page transaction and a cursor. Inserts and moves
//! are anchored at the cursor and leave it on the affected node. Every
//! mutating call runs through one wrapper that poisons the transaction when
//! a failure happens after the pending revision was already changed.

use std::sync::Arc;

use arbor_core::{Content, ImmutableNode, Node, NodeKey, NodeKind, NodeLookup, QName};
use arbor_page::{PageTransaction, Revision};

use crate::error::{MutationError, MutationResult};
use crate::insert_pos::InsertPos;
use crate::ops;

/// Write transaction over the pending revision.
pub struct NodeWriteTrx<T: PageTransaction> {
    page: T,
    cursor: NodeKey,
    poisoned: bool,
}

impl<T: PageTransaction> NodeWriteTrx<T> {
    /// Wrap a page transaction. The cursor starts at the document root.
    pub fn new(page: T) -> Self {
        Self {
            page,
            cursor: NodeKey::DOCUMENT_ROOT,
            poisoned: false,
        }
    }

    /// The underlying page transaction.
    pub fn page(&self) -> &T {
        &self.page
    }

    pub fn is_poisoned(&self) -> bool {
        self.poisoned
    }

    /// Number the pending revision will get on commit.
    pub fn revision_number(&self) -> u64 {
        self.page.revision_number()
    }

    fn ensure_usable(&self) -> MutationResult<()> {
        if self.poisoned {
            return Err(MutationError::Poisoned);
        }
        Ok(())
    }

    fn run<R, F>(&mut self, operation: &'static str, f: F) -> MutationResult<R>
    where
        F: FnOnce(&mut T, NodeKey) -> MutationResult<R>,
    {
        self.ensure_usable()?;
        let before = self.page.modification_count();
        let result = f(&mut self.page, self.cursor);
        if let Err(err) = &result {
            if self.page.modification_count() != before {
                self.poisoned = true;
                tracing::warn!(operation, error = %err, "write transaction poisoned");
            } else {
                tracing::debug!(operation, error = %err, "operation rejected");
            }
        }
        result
    }

    // ========== Cursor ==========

    /// Key of the node under the cursor.
    pub fn node_key(&self) -> NodeKey {
        self.cursor
    }

    pub fn current(&self) -> Option<ImmutableNode<'_>> {
        self.page.immutable(self.cursor)
    }

    pub fn kind(&self) -> Option<NodeKind> {
        self.page.lookup(self.cursor).map(Node::kind)
    }

    pub fn name(&self) -> Option<&QName> {
        self.page.lookup(self.cursor).and_then(Node::name)
    }

    pub fn value(&self) -> Option<&str> {
        self.page.lookup(self.cursor).and_then(Node::value)
    }

    /// Move the cursor to `key` if it is live.
    pub fn move_to(&mut self, key: NodeKey) -> bool {
        if self.page.lookup(key).is_some() {
            self.cursor = key;
            true
        } else {
            false
        }
    }

    pub fn move_to_document_root(&mut self) -> bool {
        self.move_to(NodeKey::DOCUMENT_ROOT)
    }

    pub fn move_to_parent(&mut self) -> bool {
        self.follow(Node::parent_key)
    }

    pub fn move_to_first_child(&mut self) -> bool {
        self.follow(Node::first_child_key)
    }

    pub fn move_to_left_sibling(&mut self) -> bool {
        self.follow(Node::left_sibling_key)
    }

    pub fn move_to_right_sibling(&mut self) -> bool {
        self.follow(Node::right_sibling_key)
    }

    fn follow(&mut self, link: fn(&Node) -> Option<NodeKey>) -> bool {
        match self.page.lookup(self.cursor).and_then(link) {
            Some(key) => self.move_to(key),
            None => false,
        }
    }

    // ========== Insertion ==========

    /// Insert `content` at `pos` relative to the cursor.
    ///
    /// Structural inserts leave the cursor on the returned node; a
    /// non-structural insert returns it to the anchor.
    pub fn insert(&mut self, pos: InsertPos, content: &Content) -> MutationResult<NodeKey> {
        let key = self.run("insert", |page, anchor| pos.insert_node(page, anchor, content))?;
        tracing::debug!(key = %key, anchor = %self.cursor, position = %pos, kind = %content.kind(), "inserted node");
        if pos.is_structural() {
            self.cursor = key;
        }
        Ok(key)
    }

    pub fn insert_element_as_first_child(&mut self, name: QName) -> MutationResult<NodeKey> {
        self.insert(InsertPos::AsFirstChild, &Content::Element(name))
    }

    pub fn insert_element_as_left_sibling(&mut self, name: QName) -> MutationResult<NodeKey> {
        self.insert(InsertPos::AsLeftSibling, &Content::Element(name))
    }

    pub fn insert_element_as_right_sibling(&mut self, name: QName) -> MutationResult<NodeKey> {
        self.insert(InsertPos::AsRightSibling, &Content::Element(name))
    }

    pub fn insert_text_as_first_child(&mut self, value: impl Into<String>) -> MutationResult<NodeKey> {
        self.insert(InsertPos::AsFirstChild, &Content::text(value))
    }

    pub fn insert_text_as_left_sibling(&mut self, value: impl Into<String>) -> MutationResult<NodeKey> {
        self.insert(InsertPos::AsLeftSibling, &Content::text(value))
    }

    pub fn insert_text_as_right_sibling(&mut self, value: impl Into<String>) -> MutationResult<NodeKey> {
        self.insert(InsertPos::AsRightSibling, &Content::text(value))
    }

    /// Insert an attribute on the element under the cursor and move onto it.
    pub fn insert_attribute(&mut self, name: QName, value: impl Into<String>) -> MutationResult<NodeKey> {
        let content = Content::Attribute {
            name,
            value: value.into(),
        };
        let key = self.insert(InsertPos::AsNonStructural, &content)?;
        self.cursor = key;
        Ok(key)
    }

    /// Insert a namespace declaration on the element under the cursor and
    /// move onto it.
    pub fn insert_namespace(&mut self, name: QName) -> MutationResult<NodeKey> {
        let key = self.insert(InsertPos::AsNonStructural, &Content::Namespace(name))?;
        self.cursor = key;
        Ok(key)
    }

    // ========== Moves ==========

    /// Move the subtree rooted at `from` to be the first child of the cursor.
    pub fn move_subtree_to_first_child(&mut self, from: NodeKey) -> MutationResult<NodeKey> {
        self.move_subtree(InsertPos::AsFirstChild, from)
    }

    /// Move the subtree rooted at `from` to be the right sibling of the cursor.
    pub fn move_subtree_to_right_sibling(&mut self, from: NodeKey) -> MutationResult<NodeKey> {
        self.move_subtree(InsertPos::AsRightSibling, from)
    }

    /// Always fails with [`MutationError::UnsupportedMove`]. Move the
    /// subtree to the right of the anchor's left sibling instead.
    pub fn move_subtree_to_left_sibling(&mut self, from: NodeKey) -> MutationResult<NodeKey> {
        self.move_subtree(InsertPos::AsLeftSibling, from)
    }

    fn move_subtree(&mut self, pos: InsertPos, from: NodeKey) -> MutationResult<NodeKey> {
        self.run("move", |page, anchor| ops::move_subtree(page, pos, from, anchor))?;
        tracing::debug!(from = %from, anchor = %self.cursor, position = %pos, "moved subtree");
        self.cursor = from;
        Ok(from)
    }

    // ========== Copies ==========

    pub fn copy_subtree_as_first_child<L: NodeLookup + ?Sized>(
        &mut self,
        source: &L,
        key: NodeKey,
    ) -> MutationResult<NodeKey> {
        self.copy_subtree(InsertPos::AsFirstChild, source, key)
    }

    pub fn copy_subtree_as_left_sibling<L: NodeLookup + ?Sized>(
        &mut self,
        source: &L,
        key: NodeKey,
    ) -> MutationResult<NodeKey> {
        self.copy_subtree(InsertPos::AsLeftSibling, source, key)
    }

    pub fn copy_subtree_as_right_sibling<L: NodeLookup + ?Sized>(
        &mut self,
        source: &L,
        key: NodeKey,
    ) -> MutationResult<NodeKey> {
        self.copy_subtree(InsertPos::AsRightSibling, source, key)
    }

    fn copy_subtree<L: NodeLookup + ?Sized>(
        &mut self,
        pos: InsertPos,
        source: &L,
        key: NodeKey,
    ) -> MutationResult<NodeKey> {
        let copied = self.run("copy", |page, anchor| {
            ops::copy_subtree(page, pos, anchor, source, key)
        })?;
        self.cursor = copied;
        Ok(copied)
    }

    // ========== Removal and values ==========

    /// Remove the node under the cursor with its subtree.
    pub fn remove(&mut self) -> MutationResult<()> {
        let removed = self.cursor;
        let next = self.run("remove", ops::remove_node::<T>)?;
        tracing::debug!(key = %removed, cursor = %next, "removed node");
        self.cursor = next;
        Ok(())
    }

    /// Replace the value of the text or attribute node under the cursor.
    pub fn set_value(&mut self, value: impl Into<String>) -> MutationResult<()> {
        let value = value.into();
        self.run("set value", |page, key| ops::set_value(page, key, value))
    }

    // ========== Completion ==========

    /// Publish the pending revision.
    pub fn commit(self) -> MutationResult<Arc<Revision>> {
        if self.poisoned {
            self.page.abort();
            return Err(MutationError::Poisoned);
        }
        Ok(self.page.commit()?)
    }

    /// Discard the pending revision.
    pub fn abort(self) {
        self.page.abort();
    }
}

impl<T: PageTransaction> NodeLookup for NodeWriteTrx<T> {
    fn lookup(&self, key: NodeKey) -> Option<&Node> {
        self.page.lookup(key)
    }

    fn live_keys(&self) -> Vec<NodeKey> {
        self.page.live_keys()
    }
}
