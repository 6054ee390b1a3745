//! Drag registry: structured snapshots and liveness.

use crate::helpers::{budgeted, BoardFixture};

#[test]
fn snapshot_reflects_live_state() {
    let mut fx = BoardFixture::new();
    let (_card, card_node) = fx.draggable(budgeted("card1", 3));
    fx.board.initialize_all();

    assert!(fx.board.registry().claims_node(card_node));
    let snapshot = fx.board.registry().snapshot_for_node(card_node).unwrap();
    assert_eq!(snapshot.drag_id.as_str(), "card1");
    assert_eq!(snapshot.clone_drop_max, 3);
    assert_eq!(snapshot.clone_drop_remaining, 3);
    assert!(snapshot.allow_list().is_empty());
}

#[test]
fn uninitialized_draggable_has_no_snapshot() {
    let mut fx = BoardFixture::new();
    let (_card, card_node) = fx.draggable(budgeted("card1", 2));

    // attached but never initialized: claimed, but nothing to read yet
    assert!(fx.board.registry().claims_node(card_node));
    assert!(fx.board.registry().snapshot_for_node(card_node).is_none());
}

#[test]
fn dead_instances_stop_resolving() {
    let mut fx = BoardFixture::new();
    let (_card, card_node) = fx.draggable(budgeted("card1", 2));
    fx.board.initialize_all();

    let registry = fx.board.registry().clone();
    assert_eq!(registry.len(), 1);

    drop(fx.board);
    assert!(!registry.claims_node(card_node));
    assert!(registry.snapshot_for_node(card_node).is_none());
    registry.prune();
    assert!(registry.is_empty());
}

#[test]
fn unknown_nodes_are_unclaimed() {
    let mut fx = BoardFixture::new();
    let plain_node = fx.tree.create_node();
    let (_card, _node) = fx.draggable(budgeted("card1", 2));
    fx.board.initialize_all();

    assert!(!fx.board.registry().claims_node(plain_node));
}
