//! Copy subtrees from another revision.

use arbor_core::{Content, Node, NodeKey, NodeLookup};
use arbor_page::PageTransaction;

use super::node;
use crate::error::MutationResult;
use crate::insert_pos::InsertPos;

/// Copy the subtree rooted at `key` in `source` to `pos` relative to
/// `anchor`. The copy gets fresh keys. Returns the key of the copied root.
pub fn copy_subtree<T, L>(
    trx: &mut T,
    pos: InsertPos,
    anchor: NodeKey,
    source: &L,
    key: NodeKey,
) -> MutationResult<NodeKey>
where
    T: PageTransaction,
    L: NodeLookup + ?Sized,
{
    let root = node(source, key)?;
    let copied = pos.insert_node(trx, anchor, &Content::from_node(root))?;
    if pos.is_structural() {
        copy_contents(trx, source, root, copied)?;
    }
    tracing::debug!(source = %key, copied = %copied, position = %pos, "copied subtree");
    Ok(copied)
}

fn copy_contents<T, L>(trx: &mut T, source: &L, original: &Node, target: NodeKey) -> MutationResult<()>
where
    T: PageTransaction,
    L: NodeLookup + ?Sized,
{
    if let Some(element) = original.element() {
        for slot in element.namespace_keys().chain(element.attribute_keys()) {
            let item = node(source, slot)?;
            InsertPos::AsNonStructural.insert_node(trx, target, &Content::from_node(item))?;
        }
    }

    let mut previous = None;
    for child in source.children(original.key()) {
        let child = node(source, child.key())?;
        let content = Content::from_node(child);
        let copied = match previous {
            None => InsertPos::AsFirstChild.insert_node(trx, target, &content)?,
            Some(previous) => InsertPos::AsRightSibling.insert_node(trx, previous, &content)?,
        };
        copy_contents(trx, source, child, copied)?;
        previous = Some(copied);
    }
    Ok(())
}
