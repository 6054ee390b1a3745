//! Re-initialization protocol: id-scoped resets, idempotent
//! re-subscription, occupancy resets.

use crate::helpers::{budgeted, capped, BoardFixture};
use dropboard::{Channel, DroppableConfig, ResetScope};

#[test]
fn scoped_reset_touches_only_matching_draggables() {
    let mut fx = BoardFixture::new();
    let (a, a_node) = fx.draggable(budgeted("a", 2));
    let (b, b_node) = fx.draggable(budgeted("b", 2));
    let (_zone, zone_node) = fx.droppable(DroppableConfig::new("zoneA"));
    fx.board.initialize_all();

    assert!(fx.drag_drop(a_node, zone_node));
    assert!(fx.drag_drop(b_node, zone_node));
    assert_eq!(a.remaining_clones(), Some(1));
    assert_eq!(b.remaining_clones(), Some(1));

    fx.board.initialize_draggables(ResetScope::only(["a"]));

    // "a" is back to its configured budget, "b" is untouched
    assert_eq!(a.remaining_clones(), Some(2));
    assert!(!a.is_dropped());
    assert_eq!(b.remaining_clones(), Some(1));
    assert!(b.is_dropped());
}

#[test]
fn unscoped_reset_touches_everything() {
    let mut fx = BoardFixture::new();
    let (a, a_node) = fx.draggable(budgeted("a", 3));
    let (b, b_node) = fx.draggable(budgeted("b", 3));
    let (_zone, zone_node) = fx.droppable(DroppableConfig::new("zoneA"));
    fx.board.initialize_all();

    assert!(fx.drag_drop(a_node, zone_node));
    assert!(fx.drag_drop(b_node, zone_node));

    fx.board.initialize_draggables(ResetScope::All);

    assert_eq!(a.remaining_clones(), Some(3));
    assert_eq!(b.remaining_clones(), Some(3));
    assert_eq!(
        fx.tree.attribute(a_node, "data-clone-drop").as_deref(),
        Some("3"),
    );
}

#[test]
fn repeated_resets_never_stack_drop_listeners() {
    let mut fx = BoardFixture::new();
    let (card, card_node) = fx.draggable(budgeted("card1", 5));
    let (_zone, zone_node) = fx.droppable(DroppableConfig::new("zoneA"));
    for _ in 0..4 {
        fx.board.initialize_all();
    }

    assert_eq!(fx.board.bus().subscriber_count(Channel::ElementDropped), 1);

    // one accepted drop decrements exactly once
    assert!(fx.drag_drop(card_node, zone_node));
    assert_eq!(card.remaining_clones(), Some(4));
}

#[test]
fn zone_reset_clears_occupancy_and_reopens_acceptance() {
    let mut fx = BoardFixture::new();
    let (_card, card_node) = fx.draggable(budgeted("card1", 1));
    let (zone, zone_node) = fx.droppable(capped("zoneA", 1));
    fx.board.initialize_all();

    assert!(fx.drag_drop(card_node, zone_node));
    assert_eq!(fx.engine.would_accept(zone_node, card_node), Some(false));

    fx.board.initialize_droppables(ResetScope::All);

    assert_eq!(zone.total_drops(), Some(0));
    assert_eq!(fx.engine.would_accept(zone_node, card_node), Some(true));
    assert!(fx.drag_drop(card_node, zone_node));
    assert_eq!(zone.total_drops(), Some(1));
}

#[test]
fn scoped_zone_reset_skips_other_zones() {
    let mut fx = BoardFixture::new();
    let (_card, card_node) = fx.draggable(budgeted("card1", 2));
    let (zone_a, a_node) = fx.droppable(DroppableConfig::new("zoneA"));
    let (zone_b, b_node) = fx.droppable(DroppableConfig::new("zoneB"));
    fx.board.initialize_all();

    assert!(fx.drag_drop(card_node, a_node));
    assert!(fx.drag_drop(card_node, b_node));

    fx.board.initialize_droppables(ResetScope::only(["zoneA"]));

    assert_eq!(zone_a.total_drops(), Some(0));
    assert_eq!(zone_b.total_drops(), Some(1));
}
