//! Move an existing subtree to a new position.

use arbor_core::{NodeKey, NodeLookup};
use arbor_page::PageTransaction;

use super::{attach_as_first_child, attach_as_right_sibling, detach, node, shape};
use crate::error::{MutationError, MutationResult};
use crate::insert_pos::InsertPos;

/// Move the subtree rooted at `from` to `pos` relative to `to`.
///
/// Both sides are relinked: `from` is detached from its old parent and
/// neighbours before it is attached at the destination. All checks run
/// before the first modification. A move to the position `from` already
/// occupies changes nothing.
pub fn move_subtree<T: PageTransaction>(
    trx: &mut T,
    pos: InsertPos,
    from: NodeKey,
    to: NodeKey,
) -> MutationResult<()> {
    if !pos.supports_move() {
        return Err(MutationError::unsupported_move(pos.name()));
    }
    let kind = node(trx, from)?.kind();
    pos.check(trx, to, kind)?;
    if from == to || is_ancestor(trx, from, to)? {
        return Err(MutationError::MoveIntoOwnSubtree { from, to });
    }

    let moving = shape(trx, from)?;
    let anchor = shape(trx, to)?;
    let (in_place, leaving) = match pos {
        InsertPos::AsFirstChild => (
            anchor.links.first_child == Some(from),
            moving.parent != Some(to),
        ),
        _ => (
            anchor.links.right_sibling == Some(from),
            moving.parent != anchor.parent,
        ),
    };
    if in_place {
        tracing::debug!(from = %from, to = %to, position = %pos, "subtree already in place");
        return Ok(());
    }

    let keep = (pos == InsertPos::AsRightSibling).then_some(to);
    detach(trx, from, leaving, keep)?;
    match pos {
        InsertPos::AsFirstChild => attach_as_first_child(trx, from, to),
        _ => attach_as_right_sibling(trx, from, to),
    }
}

/// Whether `ancestor` lies on the parent path of `key`.
fn is_ancestor<L: NodeLookup + ?Sized>(
    lookup: &L,
    ancestor: NodeKey,
    key: NodeKey,
) -> MutationResult<bool> {
    let mut current = node(lookup, key)?.parent_key();
    while let Some(parent) = current {
        if parent == ancestor {
            return Ok(true);
        }
        current = node(lookup, parent)?.parent_key();
    }
    Ok(false)
}
