//! Attach a node as the first child of an anchor.

use arbor_core::NodeKey;
use arbor_page::PageTransaction;

use super::{place, relink_from_right, settle_parent, shape, text_shape, text_value};
use crate::error::MutationResult;

/// Make `from` the first child of `anchor`.
///
/// `from` must not be linked into any chain. When both `from` and the
/// current first child are text, the first child's value is appended to
/// `from` and the first child is removed. The child count only grows when
/// `from` comes from another parent.
pub fn attach_as_first_child<T: PageTransaction>(
    trx: &mut T,
    from: NodeKey,
    anchor: NodeKey,
) -> MutationResult<()> {
    let incoming = shape(trx, from)?;
    let target = shape(trx, anchor)?;
    let gained = u64::from(incoming.parent != Some(anchor));

    let mut right = target.links.first_child;
    let mut value = None;
    let mut lost = 0;

    match text_shape(trx, right)? {
        Some(first) if incoming.is_text() => {
            value = Some(text_value(trx, from)? + &text_value(trx, first.key)?);
            right = first.links.right_sibling;
            relink_from_right(trx, right, Some(from))?;
            trx.remove(first.key)?;
            lost = 1;
        }
        _ => relink_from_right(trx, right, Some(from))?,
    }

    place(trx, from, anchor, None, right, value)?;
    settle_parent(trx, anchor, Some(from), gained, lost)?;

    tracing::trace!(from = %from, anchor = %anchor, merged = lost == 1, "attached as first child");
    Ok(())
}
