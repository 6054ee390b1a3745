//! Crate-wide constants.
//!
//! Centralizes default values, class names, and attribute names so the
//! state machines and the headless backends agree on them.

// ============================================================================
// Gesture Defaults
// ============================================================================

/// Default bounding region for a drag gesture
pub const DEFAULT_CONTAINMENT: &str = "body";

/// Cursor style while a draggable gesture is active
pub const DRAG_CURSOR: &str = "move";

/// Source element opacity while dragging with the ghost look enabled
pub const GHOST_OPACITY: f32 = 0.5;

/// Source element opacity while dragging with the ghost look disabled
pub const HIDDEN_OPACITY: f32 = 0.0;

/// Opacity restored when a gesture stops
pub const FULL_OPACITY: f32 = 1.0;

// ============================================================================
// Budget Defaults
// ============================================================================

/// Default number of times a draggable may be consumed
pub const DEFAULT_CLONE_BUDGET: u32 = 1;

/// Capacity value meaning "no limit" for a drop zone
pub const UNLIMITED_DROPS: i64 = -1;

// ============================================================================
// Class Names
// ============================================================================

/// Class added to a draggable element that is configured inactive
pub const DRAG_DISABLED_CLASS: &str = "drag-disable";

// ============================================================================
// Attribute Names (declarative surface + outward mirrors)
// ============================================================================

/// Draggable identity
pub const DRAG_ID_ATTR: &str = "data-drag-id";

/// Class applied to the transient drag visual
pub const DRAG_CLASS_ATTR: &str = "data-drag-class";

/// Comma-separated allow-list of destination zone ids
pub const DROP_COL_ID_ATTR: &str = "data-drop-col-id";

/// Bounding region for the gesture
pub const CONTAINMENT_ATTR: &str = "data-containment";

/// Clone budget; also mirrors the remaining count back onto the node
pub const CLONE_DROP_ATTR: &str = "data-clone-drop";

/// Outward mirror of the configured clone budget
pub const MAX_CLONE_DROP_ATTR: &str = "data-max-clone-drop";

/// Set to "false" to disable the gesture entirely
pub const DRAG_ACTIVE_ATTR: &str = "data-drag-active";

/// Set to "true" to lock the draggable after its first drop
pub const SINGLE_DROP_ATTR: &str = "data-single-drop";

/// Set to "true" for the semi-transparent ghost look while dragging
pub const DRAG_CLONE_ATTR: &str = "data-drag-clone";

/// Class applied to the transferred node after a drop
pub const DROP_CLASS_ATTR: &str = "data-drop-class";

/// Drop zone identity
pub const DROP_ID_ATTR: &str = "data-drop-id";

/// Class applied to a zone while an acceptable draggable hovers it
pub const DROP_HOVER_CLASS_ATTR: &str = "data-drop-hover-class";

/// Set to "true" to keep the transferred node out of the zone's subtree
pub const PREVENT_APPEND_ATTR: &str = "data-prevent-append";

/// Zone capacity; -1 means unlimited
pub const MAX_DROP_ALLOW_ATTR: &str = "data-max-drop-allow";
