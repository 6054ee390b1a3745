//! Single-drop locking and the inactive configuration.

use crate::helpers::{budgeted, BoardFixture};
use dropboard::{BindingState, DraggableConfig, DroppableConfig, GestureEngine, ResetScope};

#[test]
fn single_drop_lock_removes_the_binding() {
    let mut fx = BoardFixture::new();
    let mut config = budgeted("card1", 1);
    config.single_drop = true;
    let (card, card_node) = fx.draggable(config);
    let (zone, zone_node) = fx.droppable(DroppableConfig::new("zoneA"));
    fx.board.initialize_all();

    assert!(fx.drag_drop(card_node, zone_node));
    assert_eq!(card.binding(), BindingState::Retired);
    assert!(!fx.engine.has_draggable(card_node));

    // a further gesture is structurally impossible
    assert_eq!(fx.engine.press(card_node), None);
    assert_eq!(zone.total_drops(), Some(1));
}

#[test]
fn single_drop_lock_survives_resets() {
    let mut fx = BoardFixture::new();
    let mut config = budgeted("card1", 3);
    config.single_drop = true;
    let (card, card_node) = fx.draggable(config);
    let (_zone, zone_node) = fx.droppable(DroppableConfig::new("zoneA"));
    fx.board.initialize_all();

    assert!(fx.drag_drop(card_node, zone_node));
    assert_eq!(card.binding(), BindingState::Retired);

    fx.board.initialize_draggables(ResetScope::All);

    // counters come back, the binding does not
    assert_eq!(card.remaining_clones(), Some(3));
    assert!(!card.is_dropped());
    assert_eq!(card.binding(), BindingState::Retired);
    assert!(!fx.engine.has_draggable(card_node));
    assert_eq!(fx.engine.press(card_node), None);
}

#[test]
fn inactive_draggable_never_binds() {
    let mut fx = BoardFixture::new();
    let mut config = DraggableConfig::new("card1");
    config.active = false;
    let (card, card_node) = fx.draggable(config);
    fx.board.initialize_all();

    assert_eq!(card.binding(), BindingState::Unbound);
    assert!(!fx.engine.has_draggable(card_node));
    assert!(fx.tree.has_class(card_node, "drag-disable"));
    assert_eq!(fx.engine.press(card_node), None);

    // counters still initialize for inspection
    assert_eq!(card.remaining_clones(), Some(1));
}

#[test]
fn fresh_attachment_starts_a_fresh_lock() {
    let mut fx = BoardFixture::new();
    let mut config = budgeted("card1", 1);
    config.single_drop = true;
    let (card, card_node) = fx.draggable(config.clone());
    let (_zone, zone_node) = fx.droppable(DroppableConfig::new("zoneA"));
    fx.board.initialize_all();

    assert!(fx.drag_drop(card_node, zone_node));
    assert_eq!(card.binding(), BindingState::Retired);

    // a re-created element is a new instance with its own lock
    let (fresh, fresh_node) = fx.draggable(config);
    fresh.initialize(&ResetScope::All).unwrap();
    assert_eq!(fresh.binding(), BindingState::Bound);
    assert!(fx.engine.has_draggable(fresh_node));
}
