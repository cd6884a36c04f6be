//! Attach attributes and namespace declarations to an element.

use arbor_core::{Content, NodeKey};
use arbor_page::PageTransaction;

use super::update;
use crate::error::{MutationError, MutationResult};

/// Create an attribute or namespace node owned by `anchor` and bind it in
/// the element's slots. A slot with the same name keeps its position; the
/// node it pointed at is removed. Sibling chains and child counts are
/// never touched.
pub fn attach_non_structural<T: PageTransaction>(
    trx: &mut T,
    anchor: NodeKey,
    content: Content,
) -> MutationResult<NodeKey> {
    let (name, namespace) = match &content {
        Content::Attribute { name, .. } => (name.clone(), false),
        Content::Namespace(name) => (name.clone(), true),
        other => {
            return Err(MutationError::invariant(format!(
                "{} content is not non-structural",
                other.kind()
            )))
        }
    };

    let key = trx.create_node(Some(anchor), content)?;
    let mut replaced = None;
    update(trx, anchor, |node| {
        let element = node
            .element_mut()
            .ok_or_else(|| MutationError::invariant(format!("{anchor} is not an element")))?;
        replaced = if namespace {
            element.put_namespace(name, key)
        } else {
            element.put_attribute(name, key)
        };
        Ok(())
    })?;

    if let Some(old) = replaced {
        trx.remove(old)?;
    }
    tracing::trace!(key = %key, owner = %anchor, replaced = ?replaced, "attached non-structural node");
    Ok(key)
}
