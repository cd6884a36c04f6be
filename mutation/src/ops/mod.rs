//! Link-rewriting operations.
//!
//! Every operation reads node state fresh through key lookups and writes
//! through `modify`/`finish` on the page transaction. Nothing is cached
//! across a finish.

mod copy;
mod detach;
mod first_child;
mod left_sibling;
mod move_subtree;
mod non_structural;
mod remove;
mod right_sibling;

pub use copy::copy_subtree;
pub use detach::detach;
pub use first_child::attach_as_first_child;
pub use left_sibling::attach_as_left_sibling;
pub use move_subtree::move_subtree;
pub use non_structural::attach_non_structural;
pub use remove::{remove_node, set_value};
pub use right_sibling::attach_as_right_sibling;

use arbor_core::{Links, Node, NodeKey, NodeKind, NodeLookup};
use arbor_page::PageTransaction;

use crate::error::{MutationError, MutationResult};

/// Snapshot of a structural node's shape, read fresh for each step.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Shape {
    pub key: NodeKey,
    pub kind: NodeKind,
    pub parent: Option<NodeKey>,
    pub links: Links,
}

impl Shape {
    pub fn is_text(&self) -> bool {
        self.kind.is_text()
    }
}

pub(crate) fn node<L: NodeLookup + ?Sized>(lookup: &L, key: NodeKey) -> MutationResult<&Node> {
    lookup.lookup(key).ok_or(MutationError::NodeNotFound(key))
}

pub(crate) fn shape<L: NodeLookup + ?Sized>(lookup: &L, key: NodeKey) -> MutationResult<Shape> {
    let node = node(lookup, key)?;
    let links = node
        .links()
        .copied()
        .ok_or_else(|| MutationError::invariant(format!("{key} is not a structural node")))?;
    Ok(Shape {
        key,
        kind: node.kind(),
        parent: node.parent_key(),
        links,
    })
}

/// Shape of `key` when it exists and is a text node.
pub(crate) fn text_shape<L: NodeLookup + ?Sized>(
    lookup: &L,
    key: Option<NodeKey>,
) -> MutationResult<Option<Shape>> {
    match key {
        Some(key) => Ok(Some(shape(lookup, key)?).filter(Shape::is_text)),
        None => Ok(None),
    }
}

pub(crate) fn text_value<L: NodeLookup + ?Sized>(lookup: &L, key: NodeKey) -> MutationResult<String> {
    let node = node(lookup, key)?;
    match (node.kind(), node.value()) {
        (NodeKind::Text, Some(value)) => Ok(value.to_string()),
        _ => Err(MutationError::invariant(format!("{key} is not a text node"))),
    }
}

pub(crate) fn links_mut(node: &mut Node) -> MutationResult<&mut Links> {
    let key = node.key();
    node.links_mut()
        .ok_or_else(|| MutationError::invariant(format!("{key} has no structural links")))
}

/// Prepare `key`, apply `f` to the clone and finish it. The clone is
/// discarded if `f` fails.
pub(crate) fn update<T, F>(trx: &mut T, key: NodeKey, f: F) -> MutationResult<()>
where
    T: PageTransaction,
    F: FnOnce(&mut Node) -> MutationResult<()>,
{
    let mut node = trx.modify(key)?;
    if let Err(err) = f(&mut *node) {
        node.discard();
        return Err(err);
    }
    node.finish()?;
    Ok(())
}

pub(crate) fn update_links<T, F>(trx: &mut T, key: NodeKey, f: F) -> MutationResult<()>
where
    T: PageTransaction,
    F: FnOnce(&mut Links),
{
    update(trx, key, |node| {
        f(links_mut(node)?);
        Ok(())
    })
}

/// Point `left`'s right link at `to`, or make `to` the parent's first
/// child when there is no left neighbour.
pub(crate) fn relink_from_left<T: PageTransaction>(
    trx: &mut T,
    left: Option<NodeKey>,
    to: Option<NodeKey>,
    first_child: &mut Option<NodeKey>,
) -> MutationResult<()> {
    match left {
        Some(left) => update_links(trx, left, |l| l.right_sibling = to),
        None => {
            *first_child = to;
            Ok(())
        }
    }
}

/// Point `right`'s left link at `to`.
pub(crate) fn relink_from_right<T: PageTransaction>(
    trx: &mut T,
    right: Option<NodeKey>,
    to: Option<NodeKey>,
) -> MutationResult<()> {
    match right {
        Some(right) => update_links(trx, right, |l| l.left_sibling = to),
        None => Ok(()),
    }
}

/// Give `key` its new position and, when given, its merged text value.
pub(crate) fn place<T: PageTransaction>(
    trx: &mut T,
    key: NodeKey,
    parent: NodeKey,
    left: Option<NodeKey>,
    right: Option<NodeKey>,
    value: Option<String>,
) -> MutationResult<()> {
    update(trx, key, |node| {
        node.set_parent_key(Some(parent));
        if let Some(value) = value {
            node.set_value(value)?;
        }
        let links = links_mut(node)?;
        links.left_sibling = left;
        links.right_sibling = right;
        Ok(())
    })
}

/// Write the parent's first child and adjust its child count by the number
/// of chain entries gained and lost.
pub(crate) fn settle_parent<T: PageTransaction>(
    trx: &mut T,
    parent: NodeKey,
    first_child: Option<NodeKey>,
    gained: u64,
    lost: u64,
) -> MutationResult<()> {
    update(trx, parent, |node| {
        let links = links_mut(node)?;
        let total = links.child_count + gained;
        links.child_count = total.checked_sub(lost).ok_or_else(|| {
            MutationError::invariant(format!("{parent} has {total} children, cannot lose {lost}"))
        })?;
        links.first_child = first_child;
        Ok(())
    })
}
