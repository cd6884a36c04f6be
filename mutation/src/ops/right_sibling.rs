//! Attach a node as the right sibling of an anchor.

use arbor_core::NodeKey;
use arbor_page::PageTransaction;

use super::{
    place, relink_from_left, relink_from_right, settle_parent, shape, text_shape, text_value,
};
use crate::error::{MutationError, MutationResult};

/// Make `from` the right sibling of `anchor`.
///
/// Text adjacency is resolved around the anchor:
/// - anchor and `from` both text: `from` takes the anchor's slot with the
///   value anchor + from, and the anchor is removed;
/// - the anchor's right sibling and `from` both text: `from` gets the value
///   from + right and the right sibling is removed;
/// - otherwise `from` is spliced between the anchor and its right sibling.
pub fn attach_as_right_sibling<T: PageTransaction>(
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
        let value = text_value(trx, anchor)? + &text_value(trx, from)?;
        let (left, right) = (target.links.left_sibling, target.links.right_sibling);
        relink_from_right(trx, right, Some(from))?;
        relink_from_left(trx, left, Some(from), &mut first_child)?;
        place(trx, from, parent_key, left, right, Some(value))?;
        trx.remove(anchor)?;
        1
    } else if let (true, Some(next)) = (
        incoming.is_text(),
        text_shape(trx, target.links.right_sibling)?,
    ) {
        let value = text_value(trx, from)? + &text_value(trx, next.key)?;
        let right = next.links.right_sibling;
        relink_from_right(trx, right, Some(from))?;
        relink_from_left(trx, Some(anchor), Some(from), &mut first_child)?;
        place(trx, from, parent_key, Some(anchor), right, Some(value))?;
        trx.remove(next.key)?;
        1
    } else {
        let right = target.links.right_sibling;
        relink_from_right(trx, right, Some(from))?;
        relink_from_left(trx, Some(anchor), Some(from), &mut first_child)?;
        place(trx, from, parent_key, Some(anchor), right, None)?;
        0
    };

    settle_parent(trx, parent_key, first_child, gained, lost)?;

    tracing::trace!(from = %from, anchor = %anchor, merged = lost == 1, "attached as right sibling");
    Ok(())
}
