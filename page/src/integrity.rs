//! Structural integrity verification.
//!
//! Walks the tree from the document root and reports every broken link
//! invariant: sibling symmetry, first-child and parent links, child counts,
//! adjacent text, misplaced non-structural nodes, and nodes that are live
//! but unreachable.

use std::collections::HashSet;
use std::fmt;

use arbor_core::{Node, NodeKey, NodeKind, NodeLookup};

/// A single broken invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Short rule identifier, e.g. `sibling-symmetry`.
    pub rule: &'static str,
    /// Human-readable description.
    pub message: String,
    /// The offending node, when one can be named.
    pub key: Option<NodeKey>,
}

impl Violation {
    pub fn new(rule: &'static str, message: impl Into<String>) -> Self {
        Self {
            rule,
            message: message.into(),
            key: None,
        }
    }

    pub fn with_key(mut self, key: NodeKey) -> Self {
        self.key = Some(key);
        self
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.rule, self.message)
    }
}

/// Collection of violations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Violations {
    violations: Vec<Violation>,
}

impl Violations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, violation: Violation) {
        self.violations.push(violation);
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn all(&self) -> &[Violation] {
        &self.violations
    }

    /// Check whether any violation broke `rule`.
    pub fn has_rule(&self, rule: &str) -> bool {
        self.violations.iter().any(|v| v.rule == rule)
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, violation) in self.violations.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{violation}")?;
        }
        Ok(())
    }
}

impl IntoIterator for Violations {
    type Item = Violation;
    type IntoIter = std::vec::IntoIter<Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.into_iter()
    }
}

impl<'a> IntoIterator for &'a Violations {
    type Item = &'a Violation;
    type IntoIter = std::slice::Iter<'a, Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.iter()
    }
}

/// Verify the structural invariants of everything `lookup` can see.
pub fn verify<L: NodeLookup + ?Sized>(lookup: &L) -> Violations {
    let mut checker = Checker {
        lookup,
        violations: Violations::new(),
        reachable: HashSet::new(),
    };
    checker.run();
    checker.violations
}

struct Checker<'a, L: ?Sized> {
    lookup: &'a L,
    violations: Violations,
    reachable: HashSet<NodeKey>,
}

impl<L: NodeLookup + ?Sized> Checker<'_, L> {
    fn report(&mut self, rule: &'static str, key: NodeKey, message: String) {
        self.violations.push(Violation::new(rule, message).with_key(key));
    }

    fn run(&mut self) {
        let lookup = self.lookup;
        let Some(root) = lookup.lookup(NodeKey::DOCUMENT_ROOT) else {
            self.violations.push(Violation::new(
                "missing-document-root",
                "document root is not live",
            ));
            return;
        };
        if root.kind() != NodeKind::DocumentRoot || root.parent_key().is_some() {
            self.report(
                "document-root",
                root.key(),
                format!("key {} must be a parentless document root", root.key()),
            );
        }

        self.reachable.insert(NodeKey::DOCUMENT_ROOT);
        let mut stack = vec![NodeKey::DOCUMENT_ROOT];
        while let Some(key) = stack.pop() {
            if let Some(parent) = lookup.lookup(key) {
                self.check_slots(parent);
                self.check_chain(parent, &mut stack);
            }
        }

        for key in lookup.live_keys() {
            if !self.reachable.contains(&key) {
                self.report("orphan", key, format!("{key} is live but unreachable"));
            }
        }
    }

    fn check_slots(&mut self, owner: &Node) {
        let Some(element) = owner.element() else {
            return;
        };
        let lookup = self.lookup;
        for key in element.attribute_keys().chain(element.namespace_keys()) {
            self.reachable.insert(key);
            match lookup.lookup(key) {
                None => self.report(
                    "dangling-link",
                    owner.key(),
                    format!("{} has a slot pointing at missing {key}", owner.key()),
                ),
                Some(node) if node.is_structural() || node.parent_key() != Some(owner.key()) => {
                    self.report(
                        "non-structural-owner",
                        key,
                        format!("{key} is not a non-structural node owned by {}", owner.key()),
                    )
                }
                Some(_) => {}
            }
        }
    }

    fn check_chain(&mut self, parent: &Node, stack: &mut Vec<NodeKey>) {
        let lookup = self.lookup;
        let parent_key = parent.key();
        let mut seen = HashSet::new();
        let mut previous: Option<&Node> = None;
        let mut count = 0u64;
        let mut next = parent.first_child_key();

        while let Some(key) = next {
            if !seen.insert(key) {
                self.report("cycle", key, format!("sibling chain of {parent_key} revisits {key}"));
                break;
            }
            let Some(node) = lookup.lookup(key) else {
                self.report(
                    "dangling-link",
                    previous.map_or(parent_key, Node::key),
                    format!("link to missing {key} in chain of {parent_key}"),
                );
                break;
            };
            if !node.is_structural() || node.kind() == NodeKind::DocumentRoot {
                self.report(
                    "non-structural-in-chain",
                    key,
                    format!("{} node {key} in chain of {parent_key}", node.kind()),
                );
                break;
            }

            let expected_left = previous.map(Node::key);
            if node.left_sibling_key() != expected_left {
                let rule = if previous.is_none() {
                    "first-child-left"
                } else {
                    "sibling-symmetry"
                };
                self.report(
                    rule,
                    key,
                    format!(
                        "{key} has left sibling {:?}, expected {:?}",
                        node.left_sibling_key(),
                        expected_left
                    ),
                );
            }
            if node.parent_key() != Some(parent_key) {
                self.report(
                    "parent-link",
                    key,
                    format!("{key} has parent {:?}, expected {parent_key}", node.parent_key()),
                );
            }
            if previous.is_some_and(|p| p.kind().is_text()) && node.kind().is_text() {
                self.report("adjacent-text", key, format!("{key} follows another text node"));
            }
            if node.kind().is_text() && (node.first_child_key().is_some() || node.child_count() > 0) {
                self.report("text-children", key, format!("text node {key} has children"));
            }

            if !self.reachable.insert(key) {
                self.report("shared-node", key, format!("{key} is reachable twice"));
                break;
            }
            stack.push(key);
            count += 1;
            previous = Some(node);
            next = node.right_sibling_key();
        }

        if count != parent.child_count() {
            self.report(
                "child-count",
                parent_key,
                format!(
                    "{parent_key} records {} children but its chain has {count}",
                    parent.child_count()
                ),
            );
        }
    }
}
