//! Left- and right-sibling insertion.

use arbor_tests::prelude::*;

mod right_sibling {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_splices_between_anchor_and_right_sibling() {
        // GIVEN: e -> [<a>, <c>]
        let mut store = store();
        let mut wtx = NodeWriteTrx::new(store.begin_write());
        let e = wtx.insert_element_as_first_child(qname("e")).unwrap();
        let a = wtx.insert_element_as_first_child(qname("a")).unwrap();
        let c = wtx.insert_element_as_right_sibling(qname("c")).unwrap();
        wtx.move_to(a);

        // WHEN
        let b = wtx.insert_element_as_right_sibling(qname("b")).unwrap();

        // THEN
        assert_eq!(sibling_chain(&wtx, e), vec![a, b, c]);
        assert_eq!(wtx.lookup(a).unwrap().right_sibling_key(), Some(b));
        assert_eq!(wtx.lookup(b).unwrap().left_sibling_key(), Some(a));
        assert_eq!(wtx.lookup(b).unwrap().right_sibling_key(), Some(c));
        assert_eq!(wtx.lookup(c).unwrap().left_sibling_key(), Some(b));
        assert_eq!(wtx.lookup(e).unwrap().child_count(), 3);
        assert_eq!(wtx.node_key(), b);
        assert_consistent(&wtx);
    }

    #[test]
    fn test_text_after_text_takes_anchor_slot() {
        // GIVEN: e -> ["x", <f>]
        let mut store = store();
        let mut wtx = NodeWriteTrx::new(store.begin_write());
        let e = wtx.insert_element_as_first_child(qname("e")).unwrap();
        let x = wtx.insert_text_as_first_child("x").unwrap();
        let f = wtx.insert_element_as_right_sibling(qname("f")).unwrap();
        wtx.move_to(x);

        // WHEN
        let y = wtx.insert_text_as_right_sibling("y").unwrap();

        // THEN
        assert_eq!(sibling_chain(&wtx, e), vec![y, f]);
        assert_eq!(chain_values(&wtx, e), vec!["\"xy\"", "<f>"]);
        assert!(wtx.lookup(x).is_none());
        assert_eq!(wtx.lookup(e).unwrap().first_child_key(), Some(y));
        assert_eq!(wtx.lookup(e).unwrap().child_count(), 2);
        assert_eq!(wtx.node_key(), y);
        assert_consistent(&wtx);
    }

    #[test]
    fn test_text_before_text_neighbour_absorbs_it() {
        // GIVEN: e -> [<a>, "z"]
        let mut store = store();
        let mut wtx = NodeWriteTrx::new(store.begin_write());
        let e = wtx.insert_element_as_first_child(qname("e")).unwrap();
        let a = wtx.insert_element_as_first_child(qname("a")).unwrap();
        let z = wtx.insert_text_as_right_sibling("z").unwrap();
        wtx.move_to(a);

        // WHEN
        let y = wtx.insert_text_as_right_sibling("y").unwrap();

        // THEN
        assert_eq!(sibling_chain(&wtx, e), vec![a, y]);
        assert_eq!(wtx.lookup(y).and_then(|n| n.value()), Some("yz"));
        assert!(wtx.lookup(z).is_none());
        assert_eq!(wtx.lookup(e).unwrap().child_count(), 2);
        assert_consistent(&wtx);
    }

    #[test]
    fn test_merge_preserves_byte_order() {
        let mut store = store();
        let mut wtx = NodeWriteTrx::new(store.begin_write());
        let e = wtx.insert_element_as_first_child(qname("e")).unwrap();
        wtx.insert_text_as_first_child("ä").unwrap();

        wtx.insert_text_as_right_sibling("ß").unwrap();

        assert_eq!(render(&wtx, e), "<e>äß</e>");
    }

    #[test]
    fn test_sibling_of_root_element_may_not_be_text() {
        let mut store = store();
        let mut wtx = NodeWriteTrx::new(store.begin_write());
        wtx.insert_element_as_first_child(qname("root")).unwrap();

        let result = wtx.insert_text_as_right_sibling("loose");

        assert!(matches!(
            result,
            Err(MutationError::InvalidNodeKindForPosition { .. })
        ));
        assert!(!wtx.is_poisoned());
    }
}

mod left_sibling {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_becomes_first_child_when_anchor_was_first() {
        // GIVEN: e -> [<b>]
        let mut store = store();
        let mut wtx = NodeWriteTrx::new(store.begin_write());
        let e = wtx.insert_element_as_first_child(qname("e")).unwrap();
        let b = wtx.insert_element_as_first_child(qname("b")).unwrap();

        // WHEN
        let a = wtx.insert_element_as_left_sibling(qname("a")).unwrap();

        // THEN
        assert_eq!(sibling_chain(&wtx, e), vec![a, b]);
        assert_eq!(wtx.lookup(e).unwrap().first_child_key(), Some(a));
        assert_eq!(wtx.lookup(e).unwrap().child_count(), 2);
        assert_consistent(&wtx);
    }

    #[test]
    fn test_splices_before_anchor() {
        // GIVEN: e -> [<a>, <c>]
        let mut store = store();
        let mut wtx = NodeWriteTrx::new(store.begin_write());
        let e = wtx.insert_element_as_first_child(qname("e")).unwrap();
        let a = wtx.insert_element_as_first_child(qname("a")).unwrap();
        let c = wtx.insert_element_as_right_sibling(qname("c")).unwrap();

        // WHEN
        let b = wtx.insert_element_as_left_sibling(qname("b")).unwrap();

        // THEN
        assert_eq!(sibling_chain(&wtx, e), vec![a, b, c]);
        assert_eq!(render(&wtx, e), "<e><a/><b/><c/></e>");
        assert_consistent(&wtx);
    }

    #[test]
    fn test_text_before_text_anchor_merges() {
        // GIVEN: e -> ["y"]
        let mut store = store();
        let mut wtx = NodeWriteTrx::new(store.begin_write());
        let e = wtx.insert_element_as_first_child(qname("e")).unwrap();
        let y = wtx.insert_text_as_first_child("y").unwrap();

        // WHEN
        let x = wtx.insert_text_as_left_sibling("x").unwrap();

        // THEN
        assert_eq!(sibling_chain(&wtx, e), vec![x]);
        assert_eq!(wtx.value(), Some("xy"));
        assert!(wtx.lookup(y).is_none());
        assert_eq!(wtx.lookup(e).unwrap().child_count(), 1);
        assert_consistent(&wtx);
    }

    #[test]
    fn test_text_after_text_neighbour_absorbs_it() {
        // GIVEN: e -> ["x", <b>]
        let mut store = store();
        let mut wtx = NodeWriteTrx::new(store.begin_write());
        let e = wtx.insert_element_as_first_child(qname("e")).unwrap();
        let x = wtx.insert_text_as_first_child("x").unwrap();
        let b = wtx.insert_element_as_right_sibling(qname("b")).unwrap();

        // WHEN
        let y = wtx.insert_text_as_left_sibling("y").unwrap();

        // THEN
        assert_eq!(sibling_chain(&wtx, e), vec![y, b]);
        assert_eq!(wtx.lookup(y).and_then(|n| n.value()), Some("xy"));
        assert!(wtx.lookup(x).is_none());
        assert_eq!(wtx.lookup(e).unwrap().first_child_key(), Some(y));
        assert_eq!(wtx.lookup(e).unwrap().child_count(), 2);
        assert_consistent(&wtx);
        wtx.commit().unwrap();
    }
}
