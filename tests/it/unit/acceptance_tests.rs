//! Acceptance rule: allow-list intersection and the capacity equality.

use crate::helpers::{budgeted, capped, BoardFixture};
use dropboard::{DraggableConfig, DropId, DroppableConfig};

#[test]
fn empty_allow_list_matches_any_zone() {
    let mut fx = BoardFixture::new();
    let (_card, card_node) = fx.draggable(DraggableConfig::new("card1"));
    let (_zone, zone_node) = fx.droppable(DroppableConfig::new("zoneA"));
    fx.board.initialize_all();

    assert_eq!(fx.engine.would_accept(zone_node, card_node), Some(true));
}

#[test]
fn allow_list_gates_by_zone_id() {
    let mut fx = BoardFixture::new();
    let mut config = DraggableConfig::new("card1");
    config.drop_col_ids = vec![DropId::from("zoneA"), DropId::from("zoneB")];
    let (_card, card_node) = fx.draggable(config);
    let (_a, zone_a) = fx.droppable(DroppableConfig::new("zoneA"));
    let (_c, zone_c) = fx.droppable(DroppableConfig::new("zoneC"));
    fx.board.initialize_all();

    assert_eq!(fx.engine.would_accept(zone_a, card_node), Some(true));
    assert_eq!(fx.engine.would_accept(zone_c, card_node), Some(false));
}

#[test]
fn capacity_closes_exactly_at_the_cap() {
    let mut fx = BoardFixture::new();
    let (_card, card_node) = fx.draggable(budgeted("card1", 1));
    let (zone, zone_node) = fx.droppable(capped("zoneA", 1));
    fx.board.initialize_all();

    assert_eq!(fx.engine.would_accept(zone_node, card_node), Some(true));
    assert!(fx.drag_drop(card_node, zone_node));
    assert_eq!(zone.total_drops(), Some(1));

    // occupancy equals the cap: closed
    assert_eq!(fx.engine.would_accept(zone_node, card_node), Some(false));
    assert!(!fx.drag_drop(card_node, zone_node));
    assert_eq!(zone.total_drops(), Some(1));
}

#[test]
fn unlimited_capacity_never_closes() {
    let mut fx = BoardFixture::new();
    let (_card, card_node) = fx.draggable(DraggableConfig::new("card1"));
    let (zone, zone_node) = fx.droppable(DroppableConfig::new("zoneA"));
    fx.board.initialize_all();

    for _ in 0..5 {
        assert!(fx.drag_drop(card_node, zone_node));
    }
    assert_eq!(zone.total_drops(), Some(5));
    assert_eq!(fx.engine.would_accept(zone_node, card_node), Some(true));
}

#[test]
fn acceptance_reopens_when_count_passes_cap() {
    // the capacity check is an equality, not an ordering: occupancy
    // that drifts past the cap re-opens the zone
    let mut fx = BoardFixture::new();
    let (_card, card_node) = fx.draggable(DraggableConfig::new("card1"));
    let (zone, zone_node) = fx.droppable(capped("zoneA", 1));
    fx.board.initialize_all();

    assert!(fx.drag_drop(card_node, zone_node));
    assert_eq!(fx.engine.would_accept(zone_node, card_node), Some(false));

    // an engine that skips the gate pushes occupancy past the cap
    fx.engine.press(card_node);
    fx.engine.force_drop(zone_node);
    assert_eq!(zone.total_drops(), Some(2));

    assert_eq!(fx.engine.would_accept(zone_node, card_node), Some(true));
}

#[test]
fn hover_feedback_follows_acceptance() {
    let mut fx = BoardFixture::new();
    let mut allowed = DraggableConfig::new("card1");
    allowed.drop_col_ids = vec![DropId::from("zoneA")];
    let (_card, card_node) = fx.draggable(allowed);

    let mut excluded = DraggableConfig::new("card2");
    excluded.drop_col_ids = vec![DropId::from("zoneB")];
    let (_other, other_node) = fx.draggable(excluded);

    let mut zone_config = DroppableConfig::new("zoneA");
    zone_config.hover_class = "glow".to_string();
    let (_zone, zone_node) = fx.droppable(zone_config);
    fx.board.initialize_all();

    fx.engine.press(card_node);
    assert!(fx.engine.hover(zone_node));
    assert!(fx.tree.has_class(zone_node, "glow"));
    fx.engine.release();
    assert!(!fx.tree.has_class(zone_node, "glow"));

    fx.engine.press(other_node);
    assert!(!fx.engine.hover(zone_node));
    assert!(!fx.tree.has_class(zone_node, "glow"));
    fx.engine.release();
}
