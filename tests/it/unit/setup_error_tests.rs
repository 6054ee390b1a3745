//! Setup failures: the missing-identity configuration error and its
//! isolation to the failing instance.

use crate::helpers::BoardFixture;
use dropboard::{
    BindingState, ConfigError, DraggableConfig, DroppableConfig, GestureEngine, ResetScope,
};

#[test]
fn missing_drag_id_aborts_only_that_instance() {
    let mut fx = BoardFixture::new();
    let (broken, broken_node) = fx.draggable(DraggableConfig::default());
    let (sibling, sibling_node) = fx.draggable(DraggableConfig::new("card1"));
    fx.board.initialize_all();

    assert_eq!(broken.config_error(), Some(ConfigError::MissingDragId));
    assert!(!fx.engine.has_draggable(broken_node));
    assert_eq!(broken.remaining_clones(), None);

    // the sibling came up normally
    assert_eq!(sibling.config_error(), None);
    assert_eq!(sibling.binding(), BindingState::Bound);
    assert!(fx.engine.has_draggable(sibling_node));
}

#[test]
fn missing_drop_id_aborts_only_that_instance() {
    let mut fx = BoardFixture::new();
    let (broken, broken_node) = fx.droppable(DroppableConfig::default());
    let (sibling, sibling_node) = fx.droppable(DroppableConfig::new("zoneA"));
    fx.board.initialize_all();

    assert_eq!(broken.config_error(), Some(ConfigError::MissingDropId));
    assert!(!fx.engine.has_droppable(broken_node));
    assert!(!broken.is_bound());
    assert_eq!(broken.total_drops(), None);

    assert_eq!(sibling.config_error(), None);
    assert!(fx.engine.has_droppable(sibling_node));
    assert!(sibling.is_bound());
    assert_eq!(sibling.total_drops(), Some(0));
}

#[test]
fn direct_initialize_surfaces_the_error() {
    let mut fx = BoardFixture::new();
    let (broken, _node) = fx.draggable(DraggableConfig::default());

    assert_eq!(
        broken.initialize(&ResetScope::All),
        Err(ConfigError::MissingDragId),
    );
    assert_eq!(
        broken.config_error().unwrap().to_string(),
        "required field 'data-drag-id' not found",
    );
}

#[test]
fn id_scoped_reset_never_trips_the_missing_id_error() {
    let mut fx = BoardFixture::new();
    let (broken, _node) = fx.draggable(DraggableConfig::default());

    fx.board.initialize_draggables(ResetScope::only(["card1"]));
    assert_eq!(broken.config_error(), None);
}
