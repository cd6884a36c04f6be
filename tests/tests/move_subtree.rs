//! Subtree moves.

use arbor_page::PageWriteTrx;
use arbor_tests::prelude::*;
use pretty_assertions::assert_eq;

type Wtx<'s> = NodeWriteTrx<PageWriteTrx<'s>>;

/// r -> [e -> [c1, c2], g -> [x -> ["inner"]]]
struct Fixture {
    r: NodeKey,
    e: NodeKey,
    c1: NodeKey,
    c2: NodeKey,
    g: NodeKey,
    x: NodeKey,
}

fn build(wtx: &mut Wtx<'_>) -> Fixture {
    let r = wtx.insert_element_as_first_child(qname("r")).unwrap();
    let e = wtx.insert_element_as_first_child(qname("e")).unwrap();
    let c1 = wtx.insert_element_as_first_child(qname("c1")).unwrap();
    let c2 = wtx.insert_element_as_right_sibling(qname("c2")).unwrap();
    wtx.move_to(e);
    let g = wtx.insert_element_as_right_sibling(qname("g")).unwrap();
    let x = wtx.insert_element_as_first_child(qname("x")).unwrap();
    wtx.insert_text_as_first_child("inner").unwrap();
    Fixture { r, e, c1, c2, g, x }
}

#[test]
fn test_move_to_current_position_changes_nothing() {
    // GIVEN
    let mut store = store();
    let mut wtx = NodeWriteTrx::new(store.begin_write());
    let f = build(&mut wtx);
    let before = render(&wtx, f.r);
    let count_before = wtx.page().modification_count();

    // WHEN: c1 is already e's first child, c2 already c1's right sibling
    wtx.move_to(f.e);
    wtx.move_subtree_to_first_child(f.c1).unwrap();
    wtx.move_to(f.c1);
    wtx.move_subtree_to_right_sibling(f.c2).unwrap();

    // THEN
    assert_eq!(render(&wtx, f.r), before);
    assert_eq!(wtx.page().modification_count(), count_before);
    assert_eq!(wtx.node_key(), f.c2);
    assert_consistent(&wtx);
}

#[test]
fn test_first_child_move_within_parent() {
    // GIVEN
    let mut store = store();
    let mut wtx = NodeWriteTrx::new(store.begin_write());
    let f = build(&mut wtx);

    // WHEN
    wtx.move_to(f.e);
    let moved = wtx.move_subtree_to_first_child(f.c2).unwrap();

    // THEN
    assert_eq!(moved, f.c2);
    assert_eq!(wtx.node_key(), f.c2);
    assert_eq!(sibling_chain(&wtx, f.e), vec![f.c2, f.c1]);
    assert_eq!(wtx.lookup(f.e).unwrap().child_count(), 2);
    assert_eq!(wtx.lookup(f.c1).unwrap().right_sibling_key(), None);
    assert_consistent(&wtx);
}

#[test]
fn test_move_across_parents_carries_subtree() {
    // GIVEN
    let mut store = store();
    let mut wtx = NodeWriteTrx::new(store.begin_write());
    let f = build(&mut wtx);

    // WHEN
    wtx.move_to(f.c1);
    wtx.move_subtree_to_right_sibling(f.x).unwrap();

    // THEN
    assert_eq!(render(&wtx, f.e), "<e><c1/><x>inner</x><c2/></e>");
    assert_eq!(render(&wtx, f.g), "<g/>");
    assert_eq!(wtx.lookup(f.e).unwrap().child_count(), 3);
    assert_eq!(wtx.lookup(f.g).unwrap().child_count(), 0);
    assert_eq!(wtx.lookup(f.g).unwrap().first_child_key(), None);
    assert_eq!(wtx.lookup(f.x).unwrap().parent_key(), Some(f.e));
    assert_consistent(&wtx);
    wtx.commit().unwrap();
}

#[test]
fn test_leaving_merges_neighbouring_text_into_left() {
    // GIVEN: e -> ["a", <m>, "b"], g -> []
    let mut store = store();
    let mut wtx = NodeWriteTrx::new(store.begin_write());
    let r = wtx.insert_element_as_first_child(qname("r")).unwrap();
    let e = wtx.insert_element_as_first_child(qname("e")).unwrap();
    let a = wtx.insert_text_as_first_child("a").unwrap();
    let m = wtx.insert_element_as_right_sibling(qname("m")).unwrap();
    let b = wtx.insert_text_as_right_sibling("b").unwrap();
    wtx.move_to(e);
    let g = wtx.insert_element_as_right_sibling(qname("g")).unwrap();

    // WHEN
    wtx.move_subtree_to_first_child(m).unwrap();

    // THEN
    assert_eq!(sibling_chain(&wtx, e), vec![a]);
    assert_eq!(wtx.lookup(a).and_then(|n| n.value()), Some("ab"));
    assert!(wtx.lookup(b).is_none());
    assert_eq!(wtx.lookup(e).unwrap().child_count(), 1);
    assert_eq!(sibling_chain(&wtx, g), vec![m]);
    assert_eq!(render(&wtx, r), "<r><e>ab</e><g><m/></g></r>");
    assert_consistent(&wtx);
}

#[test]
fn test_detach_merge_keeps_the_anchor() {
    // GIVEN: e -> [<h>, "a", <m>, "b"]
    let mut store = store();
    let mut wtx = NodeWriteTrx::new(store.begin_write());
    let e = wtx.insert_element_as_first_child(qname("e")).unwrap();
    let h = wtx.insert_element_as_first_child(qname("h")).unwrap();
    let a = wtx.insert_text_as_right_sibling("a").unwrap();
    let m = wtx.insert_element_as_right_sibling(qname("m")).unwrap();
    let b = wtx.insert_text_as_right_sibling("b").unwrap();

    // WHEN: move m to the right of "b"
    wtx.move_subtree_to_right_sibling(m).unwrap();

    // THEN: "a" and "b" merge into the anchor, which m follows
    assert_eq!(sibling_chain(&wtx, e), vec![h, b, m]);
    assert_eq!(wtx.lookup(b).and_then(|n| n.value()), Some("ab"));
    assert!(wtx.lookup(a).is_none());
    assert_eq!(wtx.lookup(b).unwrap().left_sibling_key(), Some(h));
    assert_eq!(wtx.lookup(e).unwrap().child_count(), 3);
    assert_eq!(render(&wtx, e), "<e><h/>ab<m/></e>");
    assert_consistent(&wtx);
}

#[test]
fn test_text_moved_next_to_text_takes_its_slot() {
    // GIVEN: e -> ["x", <f>], g -> ["y"]
    let mut store = store();
    let mut wtx = NodeWriteTrx::new(store.begin_write());
    wtx.insert_element_as_first_child(qname("r")).unwrap();
    let e = wtx.insert_element_as_first_child(qname("e")).unwrap();
    let x = wtx.insert_text_as_first_child("x").unwrap();
    let f = wtx.insert_element_as_right_sibling(qname("f")).unwrap();
    wtx.move_to(e);
    let g = wtx.insert_element_as_right_sibling(qname("g")).unwrap();
    let y = wtx.insert_text_as_first_child("y").unwrap();

    // WHEN
    wtx.move_to(x);
    wtx.move_subtree_to_right_sibling(y).unwrap();

    // THEN
    assert_eq!(sibling_chain(&wtx, e), vec![y, f]);
    assert_eq!(wtx.lookup(y).and_then(|n| n.value()), Some("xy"));
    assert!(wtx.lookup(x).is_none());
    assert_eq!(wtx.lookup(e).unwrap().first_child_key(), Some(y));
    assert_eq!(wtx.lookup(e).unwrap().child_count(), 2);
    assert_eq!(wtx.lookup(g).unwrap().child_count(), 0);
    assert_consistent(&wtx);
}

#[test]
fn test_move_into_own_subtree_is_rejected() {
    // GIVEN
    let mut store = store();
    let mut wtx = NodeWriteTrx::new(store.begin_write());
    let f = build(&mut wtx);
    let before = render(&wtx, f.r);

    // WHEN
    wtx.move_to(f.c1);
    let into_child = wtx.move_subtree_to_first_child(f.e);
    let onto_self = wtx.move_subtree_to_right_sibling(f.c1);

    // THEN
    assert!(matches!(into_child, Err(MutationError::MoveIntoOwnSubtree { .. })));
    assert!(matches!(onto_self, Err(MutationError::MoveIntoOwnSubtree { .. })));
    assert!(!wtx.is_poisoned());
    assert_eq!(wtx.node_key(), f.c1);
    assert_eq!(render(&wtx, f.r), before);
    wtx.commit().unwrap();
}

#[test]
fn test_left_sibling_move_is_unsupported() {
    // GIVEN
    let mut store = store();
    let mut wtx = NodeWriteTrx::new(store.begin_write());
    let f = build(&mut wtx);

    // WHEN
    wtx.move_to(f.c2);
    let result = wtx.move_subtree_to_left_sibling(f.x);

    // THEN
    assert!(matches!(result, Err(MutationError::UnsupportedMove { .. })));
    assert!(!wtx.is_poisoned());
    assert_eq!(sibling_chain(&wtx, f.g), vec![f.x]);
}

#[test]
fn test_move_out_and_back_matches_direct_build() {
    // GIVEN: e -> [c1, x, c2] built directly
    let mut direct = store();
    let mut wtx = NodeWriteTrx::new(direct.begin_write());
    let e = wtx.insert_element_as_first_child(qname("e")).unwrap();
    wtx.insert_element_as_first_child(qname("c1")).unwrap();
    wtx.insert_element_as_right_sibling(qname("x")).unwrap();
    wtx.insert_element_as_right_sibling(qname("c2")).unwrap();
    let expected = render(&wtx, e);
    wtx.commit().unwrap();

    // WHEN: the same shape reached by moving x to the front and back again
    let mut moved = store();
    let mut wtx = NodeWriteTrx::new(moved.begin_write());
    let e = wtx.insert_element_as_first_child(qname("e")).unwrap();
    let c1 = wtx.insert_element_as_first_child(qname("c1")).unwrap();
    let x = wtx.insert_element_as_right_sibling(qname("x")).unwrap();
    wtx.insert_element_as_right_sibling(qname("c2")).unwrap();
    wtx.move_to(e);
    wtx.move_subtree_to_first_child(x).unwrap();
    wtx.move_to(c1);
    wtx.move_subtree_to_right_sibling(x).unwrap();

    // THEN
    assert_eq!(expected, "<e><c1/><x/><c2/></e>");
    assert_eq!(render(&wtx, e), expected);
    assert_eq!(wtx.lookup(e).unwrap().child_count(), 3);
    assert_consistent(&wtx);
    let revision = wtx.commit().unwrap();
    assert_eq!(render_document(revision.as_ref()), render_document(direct.latest().as_ref()));
}

#[test]
fn test_strategy_move_relinks_both_sides() {
    // GIVEN: e -> [a, b, c] built through the strategies on a bare page transaction
    let mut store = store();
    let mut trx = store.begin_write();
    let element = |name: &str| Content::element(name).unwrap();
    let e = InsertPos::AsFirstChild
        .insert_node(&mut trx, NodeKey::DOCUMENT_ROOT, &element("e"))
        .unwrap();
    let a = InsertPos::AsFirstChild.insert_node(&mut trx, e, &element("a")).unwrap();
    let b = InsertPos::AsRightSibling.insert_node(&mut trx, a, &element("b")).unwrap();
    let c = InsertPos::AsRightSibling.insert_node(&mut trx, b, &element("c")).unwrap();

    // WHEN
    InsertPos::AsRightSibling.process_move(&mut trx, a, c).unwrap();

    // THEN
    assert_eq!(sibling_chain(&trx, e), vec![b, c, a]);
    assert_eq!(trx.lookup(e).unwrap().first_child_key(), Some(b));
    assert_eq!(trx.lookup(e).unwrap().child_count(), 3);
    assert_eq!(trx.lookup(b).unwrap().left_sibling_key(), None);
    assert_consistent(&trx);

    // WHEN: back to the front through the first-child strategy
    InsertPos::AsFirstChild.process_move(&mut trx, a, e).unwrap();

    // THEN
    assert_eq!(sibling_chain(&trx, e), vec![a, b, c]);
    assert_eq!(trx.lookup(c).unwrap().right_sibling_key(), None);
    assert_consistent(&trx);
    trx.commit().unwrap();
}

#[test]
fn test_strategy_move_rejects_unsupported_positions_before_changes() {
    let mut store = store();
    let mut trx = store.begin_write();
    let e = InsertPos::AsFirstChild
        .insert_node(&mut trx, NodeKey::DOCUMENT_ROOT, &Content::element("e").unwrap())
        .unwrap();
    let a = InsertPos::AsFirstChild
        .insert_node(&mut trx, e, &Content::element("a").unwrap())
        .unwrap();
    let count = trx.modification_count();

    let left = InsertPos::AsLeftSibling.process_move(&mut trx, a, a);
    let own = InsertPos::AsFirstChild.process_move(&mut trx, e, a);

    assert!(matches!(left, Err(MutationError::UnsupportedMove { .. })));
    assert!(matches!(own, Err(MutationError::MoveIntoOwnSubtree { .. })));
    assert_eq!(trx.modification_count(), count);
    assert_consistent(&trx);
}
