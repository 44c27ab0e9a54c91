//! Engine operation tests: structural invariants and editing scenarios

use std::collections::HashSet;

use rstest::rstest;
use serde_json::Map;

use blocktree::domain::node::{BlockNode, Tree};
use blocktree::domain::ops::{
    add_child, find, insert_into, move_node, move_node_to, remove_node, update_node, walk,
    Direction,
};

fn leaf(id: &str) -> BlockNode {
    BlockNode {
        id: id.to_string(),
        block_type: "text".to_string(),
        props: Map::new(),
        children: None,
    }
}

fn container(id: &str, children: Vec<BlockNode>) -> BlockNode {
    BlockNode {
        id: id.to_string(),
        block_type: "section".to_string(),
        props: Map::new(),
        children: Some(children),
    }
}

fn all_ids(tree: &[BlockNode]) -> Vec<String> {
    let mut ids = Vec::new();
    walk(tree, &mut |n, _, _, _| ids.push(n.id.clone()));
    ids
}

// ============================================================
// Invariant Tests
// ============================================================

#[test]
fn given_operation_sequence_when_editing_then_ids_stay_pairwise_distinct() {
    let tree: Tree = vec![
        container("p", vec![leaf("x"), leaf("y")]),
        container("q", vec![]),
        leaf("z"),
    ];

    let tree = add_child(&tree, Some("q"), leaf("w"));
    let tree = insert_into(&tree, Some("p"), 1, leaf("v"));
    let tree = move_node_to(&tree, "x", Some("q"), 0);
    let tree = move_node(&tree, "z", Direction::Up);
    let tree = update_node(&tree, "y", |n| n);
    let tree = remove_node(&tree, "v");

    let ids = all_ids(&tree);
    let unique: HashSet<_> = ids.iter().collect();
    assert_eq!(ids.len(), unique.len(), "duplicate id after edits: {:?}", ids);
    assert_eq!(ids.len(), 5);
}

#[test]
fn given_any_move_target_when_moving_then_node_is_never_inside_itself() {
    let tree: Tree = vec![container(
        "outer",
        vec![container("inner", vec![leaf("deep")])],
    )];

    for target in ["outer", "inner"] {
        let out = move_node_to(&tree, "outer", Some(target), 0);
        assert_eq!(out, tree, "move into {} must be rejected", target);
    }
}

#[test]
fn given_move_when_completed_then_no_node_is_duplicated_or_lost() {
    let tree: Tree = vec![
        container("p", vec![leaf("x"), leaf("y")]),
        container("q", vec![]),
    ];
    let before = all_ids(&tree);

    let out = move_node_to(&tree, "x", Some("q"), 0);

    let mut after = all_ids(&out);
    let mut expected = before.clone();
    after.sort();
    expected.sort();
    assert_eq!(after, expected);
}

// ============================================================
// No-op Round-trip Tests
// ============================================================

#[test]
fn given_self_as_target_parent_when_moving_then_tree_is_unchanged() {
    let tree: Tree = vec![container("p", vec![leaf("x")])];
    assert_eq!(move_node_to(&tree, "p", Some("p"), 3), tree);
}

#[test]
fn given_nonexistent_id_when_removing_then_tree_is_unchanged() {
    let tree: Tree = vec![container("p", vec![leaf("x")]), leaf("y")];
    assert_eq!(remove_node(&tree, "nonexistent"), tree);
}

#[test]
fn given_nonexistent_id_when_finding_then_returns_none() {
    let tree: Tree = vec![container("p", vec![leaf("x")])];
    assert!(find(&tree, "nonexistent").is_none());
}

#[test]
fn given_nonexistent_id_when_updating_then_tree_is_unchanged() {
    let tree: Tree = vec![container("p", vec![leaf("x")])];
    let out = update_node(&tree, "nonexistent", |mut n| {
        n.props.insert("k".into(), serde_json::json!(1));
        n
    });
    assert_eq!(out, tree);
}

// ============================================================
// Order Preservation Tests
// ============================================================

#[test]
fn given_update_when_applied_then_sibling_order_and_count_are_kept() {
    let tree: Tree = vec![container("p", vec![leaf("a"), leaf("b"), leaf("c")])];
    let out = update_node(&tree, "b", |mut n| {
        n.props.insert("value".into(), serde_json::json!("edited"));
        n
    });
    let ids: Vec<_> = out[0]
        .children
        .as_ref()
        .unwrap()
        .iter()
        .map(|n| n.id.clone())
        .collect();
    assert_eq!(ids, vec!["a", "b", "c"]);
}

#[test]
fn given_remove_when_applied_then_exactly_one_subtree_goes_and_order_is_kept() {
    let tree: Tree = vec![
        leaf("a"),
        container("b", vec![leaf("b1")]),
        leaf("c"),
        leaf("d"),
    ];
    let out = remove_node(&tree, "b");
    let ids: Vec<_> = out.iter().map(|n| n.id.clone()).collect();
    assert_eq!(ids, vec!["a", "c", "d"]);
    assert!(find(&out, "b1").is_none());
}

// ============================================================
// Boundary Tests
// ============================================================

#[rstest]
#[case(Direction::Up, "first")]
#[case(Direction::Down, "last")]
fn given_boundary_sibling_when_moving_then_noop_and_idempotent(
    #[case] direction: Direction,
    #[case] which: &str,
) {
    let tree: Tree = vec![leaf("first"), leaf("middle"), leaf("last")];
    let once = move_node(&tree, which, direction);
    assert_eq!(once, tree);
    let twice = move_node(&once, which, direction);
    assert_eq!(twice, tree);
}

// ============================================================
// Scenario Tests
// ============================================================

#[test]
fn given_empty_container_when_adding_child_then_child_appears_under_it() {
    // [A] with A container-capable; addChild(A, B) -> [A{children:[B]}]
    let tree: Tree = vec![container("A", vec![])];
    let out = add_child(&tree, Some("A"), leaf("B"));
    assert_eq!(out.len(), 1);
    let children = out[0].children.as_ref().unwrap();
    assert_eq!(children.len(), 1);
    assert_eq!(children[0].id, "B");
}

#[test]
fn given_two_roots_when_moving_second_up_then_order_flips_and_sticks() {
    // [A, B]; move B up -> [B, A]; move B up again -> [B, A]
    let tree: Tree = vec![leaf("A"), leaf("B")];
    let out = move_node(&tree, "B", Direction::Up);
    let ids: Vec<_> = out.iter().map(|n| n.id.clone()).collect();
    assert_eq!(ids, vec!["B", "A"]);

    let again = move_node(&out, "B", Direction::Up);
    let ids: Vec<_> = again.iter().map(|n| n.id.clone()).collect();
    assert_eq!(ids, vec!["B", "A"]);
}

#[test]
fn given_same_parent_downward_move_when_applied_then_index_correction_holds() {
    // [P{children:[X, Y]}]; moveNodeTo(X, P, 2) -> [P{children:[Y, X]}]
    let tree: Tree = vec![container("P", vec![leaf("X"), leaf("Y")])];
    let out = move_node_to(&tree, "X", Some("P"), 2);
    let ids: Vec<_> = out[0]
        .children
        .as_ref()
        .unwrap()
        .iter()
        .map(|n| n.id.clone())
        .collect();
    assert_eq!(ids, vec!["Y", "X"]);
}

#[test]
fn given_descendant_as_target_when_moving_then_cycle_is_rejected() {
    // [P{children:[C]}]; moveNodeTo(P, C, 0) is a no-op
    let tree: Tree = vec![container("P", vec![container("C", vec![])])];
    let out = move_node_to(&tree, "P", Some("C"), 0);
    assert_eq!(out, tree);
}

#[test]
fn given_out_of_range_index_when_inserting_then_clamped_to_end() {
    // insertInto(none, 99, N) on 2 roots -> N at index 2
    let tree: Tree = vec![leaf("a"), leaf("b")];
    let out = insert_into(&tree, None, 99, leaf("N"));
    let ids: Vec<_> = out.iter().map(|n| n.id.clone()).collect();
    assert_eq!(ids, vec!["a", "b", "N"]);
}

// ============================================================
// Snapshot Isolation Tests
// ============================================================

#[test]
fn given_previous_snapshot_when_editing_then_snapshot_is_untouched() {
    let tree: Tree = vec![container("p", vec![leaf("x")])];
    let snapshot = tree.clone();

    let _ = add_child(&tree, Some("p"), leaf("new"));
    let _ = remove_node(&tree, "x");
    let _ = move_node_to(&tree, "x", None, 0);

    assert_eq!(tree, snapshot);
}
