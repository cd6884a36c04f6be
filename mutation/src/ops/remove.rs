//! Remove nodes and change values.

use arbor_core::{NodeKey, NodeKind, NodeLookup};
use arbor_page::PageTransaction;

use super::{detach, node, update};
use crate::error::{MutationError, MutationResult};

/// Remove `key` and everything below it. Returns the node the cursor
/// should move to: the right sibling, else the left sibling, else the
/// parent (the owning element for attributes and namespaces).
pub fn remove_node<T: PageTransaction>(trx: &mut T, key: NodeKey) -> MutationResult<NodeKey> {
    let target = node(trx, key)?;
    let kind = target.kind();
    let parent = target
        .parent_key()
        .ok_or(MutationError::CannotRemoveDocumentRoot);
    let (left, right) = (target.left_sibling_key(), target.right_sibling_key());

    match kind {
        NodeKind::DocumentRoot => Err(MutationError::CannotRemoveDocumentRoot),
        NodeKind::Attribute | NodeKind::Namespace => {
            let owner = parent?;
            update(trx, owner, |node| {
                match node.element_mut().map(|element| element.remove_slot(key)) {
                    Some(true) => Ok(()),
                    _ => Err(MutationError::invariant(format!(
                        "{owner} does not hold a slot for {key}"
                    ))),
                }
            })?;
            trx.remove(key)?;
            Ok(owner)
        }
        NodeKind::Element | NodeKind::Text => {
            let parent = parent?;
            let doomed = subtree_keys(trx, key)?;
            detach(trx, key, true, None)?;
            for doomed in doomed {
                trx.remove(doomed)?;
            }
            let next = [right, left]
                .into_iter()
                .flatten()
                .find(|k| trx.lookup(*k).is_some())
                .unwrap_or(parent);
            Ok(next)
        }
    }
}

/// Keys of `root`, its descendants and their attributes and namespaces.
fn subtree_keys<L: NodeLookup + ?Sized>(lookup: &L, root: NodeKey) -> MutationResult<Vec<NodeKey>> {
    let mut keys = Vec::new();
    let mut stack = vec![root];
    while let Some(key) = stack.pop() {
        let current = node(lookup, key)?;
        keys.push(key);
        if let Some(element) = current.element() {
            keys.extend(element.attribute_keys());
            keys.extend(element.namespace_keys());
        }
        stack.extend(lookup.children(key).map(|child| child.key()));
    }
    Ok(keys)
}

/// Replace the value of a text or attribute node.
pub fn set_value<T: PageTransaction>(trx: &mut T, key: NodeKey, value: String) -> MutationResult<()> {
    update(trx, key, |node| {
        node.set_value(value)?;
        Ok(())
    })
}
