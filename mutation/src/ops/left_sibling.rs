//! Attach a fresh node as the left sibling of an anchor.

use arbor_core::NodeKey;
use arbor_page::PageTransaction;

use super::{
    place, relink_from_left, relink_from_right, settle_parent, shape, text_shape, text_value,
};
use crate::error::{MutationError, MutationResult};

/// Make `from` the left sibling of `anchor`. Mirror image of
/// [`attach_as_right_sibling`](super::attach_as_right_sibling), used for
/// insertion only.
pub fn attach_as_left_sibling<T: PageTransaction>(
    trx: &mut T,
    from: NodeKey,
    anchor: NodeKey,
) -> MutationResult<()> {
    let incoming = shape(trx, from)?;
    let target = shape(trx, anchor)?;
    let parent_key = target
        .parent
        .ok_or_else(|| MutationError::invariant(format!("{anchor} has no parent")))?;
    let parent = shape(trx, parent_key)?;
    let gained = u64::from(incoming.parent != Some(parent_key));
    let mut first_child = parent.links.first_child;

    let lost = if incoming.is_text() && target.is_text() {
        let value = text_value(trx, from)? + &text_value(trx, anchor)?;
        let (left, right) = (target.links.left_sibling, target.links.right_sibling);
        relink_from_right(trx, right, Some(from))?;
        relink_from_left(trx, left, Some(from), &mut first_child)?;
        place(trx, from, parent_key, left, right, Some(value))?;
        trx.remove(anchor)?;
        1
    } else if let (true, Some(previous)) = (
        incoming.is_text(),
        text_shape(trx, target.links.left_sibling)?,
    ) {
        let value = text_value(trx, previous.key)? + &text_value(trx, from)?;
        let left = previous.links.left_sibling;
        relink_from_right(trx, Some(anchor), Some(from))?;
        relink_from_left(trx, left, Some(from), &mut first_child)?;
        place(trx, from, parent_key, left, Some(anchor), Some(value))?;
        trx.remove(previous.key)?;
        1
    } else {
        let left = target.links.left_sibling;
        relink_from_right(trx, Some(anchor), Some(from))?;
        relink_from_left(trx, left, Some(from), &mut first_child)?;
        place(trx, from, parent_key, left, Some(anchor), None)?;
        0
    };

    settle_parent(trx, parent_key, first_child, gained, lost)?;

    tracing::trace!(from = %from, anchor = %anchor, merged = lost == 1, "attached as left sibling");
    Ok(())
}
