//! Gesture engine contract.
//!
//! The engine owns pointer tracking: it decides when a drag starts,
//! which zone is hovered, and where the release lands. The coordination
//! core hands it per-element binding specs and reacts through the
//! callbacks they carry.
//!
//! Engines must invoke callbacks without holding their own internal
//! locks: callbacks re-enter the engine (a confirmed single-use drop
//! deregisters its binding, a transferred clone registers a new one).

use crate::platform::tree::NodeId;

/// Nodes involved in one gesture callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GestureFrame {
    /// The element the gesture started on
    pub source: NodeId,
    /// The transient drag visual (a structural clone of the source)
    pub helper: NodeId,
}

/// Queried by the engine at release time; `true` returns the dragged
/// visual to its origin.
pub type RevertFn = Box<dyn Fn() -> bool + Send>;

/// Start/stop notification.
pub type FrameFn = Box<dyn FnMut(&GestureFrame) + Send>;

/// Acceptance check for a candidate source node over a zone.
pub type AcceptFn = Box<dyn Fn(NodeId) -> bool + Send>;

/// Accepted-drop notification.
pub type DropFn = Box<dyn FnMut(&GestureFrame) + Send>;

/// Binding registered for one draggable element.
pub struct DragGestureSpec {
    /// Consulted at release time; the core answers "not dropped"
    pub revert: RevertFn,
    /// Bounding region for the pointer motion
    pub containment: String,
    /// Cursor style while dragging
    pub cursor: &'static str,
    pub on_start: FrameFn,
    pub on_stop: FrameFn,
}

/// Binding registered for one drop zone.
pub struct DropGestureSpec {
    /// Gate consulted on hover and on release
    pub accept: AcceptFn,
    /// Class the engine applies to the zone while an accepted candidate
    /// hovers it; empty disables the feedback
    pub hover_class: String,
    pub on_drop: DropFn,
}

/// Pointer-tracking collaborator.
///
/// Registration is keyed by node; registering a node again replaces its
/// previous binding.
pub trait GestureEngine: Send {
    fn register_draggable(&mut self, node: NodeId, spec: DragGestureSpec);

    fn deregister_draggable(&mut self, node: NodeId);

    fn register_droppable(&mut self, node: NodeId, spec: DropGestureSpec);

    fn deregister_droppable(&mut self, node: NodeId);

    /// Whether a draggable binding currently exists for the node.
    fn has_draggable(&self, node: NodeId) -> bool;

    /// Whether a droppable binding currently exists for the node.
    fn has_droppable(&self, node: NodeId) -> bool;
}
