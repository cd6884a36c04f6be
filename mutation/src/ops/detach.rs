//! Unlink a structural node from its sibling chain.

use arbor_core::NodeKey;
use arbor_page::PageTransaction;

use super::{
    links_mut, relink_from_left, relink_from_right, settle_parent, shape, text_shape, text_value,
    update, update_links,
};
use crate::error::{MutationError, MutationResult};

/// Unlink `from` from its parent's chain and clear its sibling links.
///
/// `leaving` says whether `from` leaves its parent; only then does the
/// parent's child count drop for `from` itself. If the unlink makes two
/// text nodes adjacent they are merged into one carrying left + right. The
/// left node survives unless the right one is `keep`.
///
/// `from` keeps its parent key; the caller re-attaches or removes it.
/// Returns the key of the merged text node, if a merge happened.
pub fn detach<T: PageTransaction>(
    trx: &mut T,
    from: NodeKey,
    leaving: bool,
    keep: Option<NodeKey>,
) -> MutationResult<Option<NodeKey>> {
    let node = shape(trx, from)?;
    let parent_key = node
        .parent
        .ok_or_else(|| MutationError::invariant(format!("{from} has no parent to detach from")))?;
    let parent = shape(trx, parent_key)?;
    let mut first_child = parent.links.first_child;
    let (left, right) = (node.links.left_sibling, node.links.right_sibling);

    let merged = match (text_shape(trx, left)?, text_shape(trx, right)?) {
        (Some(left), Some(right)) => {
            let value = text_value(trx, left.key)? + &text_value(trx, right.key)?;
            let survivor = if keep == Some(right.key) {
                let outer = left.links.left_sibling;
                relink_from_left(trx, outer, Some(right.key), &mut first_child)?;
                update(trx, right.key, |node| {
                    node.set_value(value)?;
                    links_mut(node)?.left_sibling = outer;
                    Ok(())
                })?;
                trx.remove(left.key)?;
                right.key
            } else {
                let outer = right.links.right_sibling;
                relink_from_right(trx, outer, Some(left.key))?;
                update(trx, left.key, |node| {
                    node.set_value(value)?;
                    links_mut(node)?.right_sibling = outer;
                    Ok(())
                })?;
                trx.remove(right.key)?;
                left.key
            };
            Some(survivor)
        }
        _ => {
            relink_from_left(trx, left, right, &mut first_child)?;
            relink_from_right(trx, right, left)?;
            None
        }
    };

    let lost = u64::from(leaving) + u64::from(merged.is_some());
    settle_parent(trx, parent_key, first_child, 0, lost)?;
    update_links(trx, from, |l| {
        l.left_sibling = None;
        l.right_sibling = None;
    })?;

    tracing::trace!(from = %from, parent = %parent_key, merged = ?merged, "detached");
    Ok(merged)
}
