//! Drag-and-drop state coordination.
//!
//! `dropboard` coordinates many-to-many drag-and-drop interactions:
//! each draggable carries a clone budget and an optional single-use
//! lock, each drop zone a capacity limit and an acceptance rule, and
//! the two sides communicate only through a broadcast bus. Pointer
//! tracking and visual-tree mutation are collaborator traits
//! ([`platform::GestureEngine`], [`platform::VisualTree`]); headless
//! in-memory backends ship for tests and embedders without a windowing
//! system.
//!
//! ## Architecture
//!
//! ```text
//! gesture engine ──drop──► DroppableZone ──broadcast──► every DraggableState
//!                              │                              │
//!                    transfer clone/original       budget/lock mutation,
//!                    append, occupancy + 1         revert answered "no"
//! ```
//!
//! Re-initialization is a first-class protocol: broadcasting on the
//! init channels re-runs either side's setup, optionally scoped to a
//! set of identities, without ever stacking duplicate listeners.

pub mod board;
pub mod constants;
pub mod drag;
pub mod drop;
pub mod error;
pub mod events;
pub mod platform;
pub mod registry;
pub mod types;

pub use board::{AmbientBudget, DropBoard};
pub use drag::{BindingState, DraggableHandle, DraggableState};
pub use drop::{DropValidator, DroppableHandle, DroppableZone};
pub use error::ConfigError;
pub use events::{Bus, BusEvent, Channel, Subscription};
pub use platform::{GestureEngine, HeadlessEngine, HeadlessTree, NodeId, Platform, VisualTree};
pub use registry::DragRegistry;
pub use types::{
    AttrMap, DragId, DragSnapshot, DraggableConfig, DropId, DropReceipt, DroppableConfig,
    ResetScope,
};
