//! Board coordinator - owns the wiring every instance shares.
//!
//! A [`DropBoard`] ties one bus, one platform, and one drag registry
//! together and owns every attached state machine. Dropping the board
//! retires all of them: engine callbacks and bus subscriptions resolve
//! through weak references and simply stop firing.

use parking_lot::Mutex;
use std::sync::Arc;

use crate::drag::{DraggableHandle, DraggableState};
use crate::drop::{DroppableHandle, DroppableZone};
use crate::events::{Bus, BusEvent};
use crate::platform::{NodeId, Platform};
use crate::registry::DragRegistry;
use crate::types::{AttrMap, DraggableConfig, DroppableConfig, ResetScope};

/// Shared wiring handed to every instance at attach time.
#[derive(Clone)]
pub(crate) struct CoreCtx {
    pub bus: Bus,
    pub platform: Platform,
    pub registry: DragRegistry,
    pub budget: AmbientBudget,
}

/// Optional shared drop-budget counter, a surrounding-application
/// affordance injected explicitly.
///
/// When set, every gesture start decrements it (stopping at zero).
/// Nothing in the coordination core depends on it.
#[derive(Clone, Default)]
pub struct AmbientBudget {
    value: Arc<Mutex<Option<i64>>>,
}

impl AmbientBudget {
    pub fn set(&self, value: i64) {
        *self.value.lock() = Some(value);
    }

    pub fn clear(&self) {
        *self.value.lock() = None;
    }

    pub fn get(&self) -> Option<i64> {
        *self.value.lock()
    }

    pub(crate) fn decrement(&self) {
        if let Some(value) = self.value.lock().as_mut() {
            if *value > 0 {
                *value -= 1;
            }
        }
    }
}

/// Top-level owner of a drag-and-drop surface.
pub struct DropBoard {
    ctx: CoreCtx,
    draggables: Vec<DraggableHandle>,
    droppables: Vec<DroppableHandle>,
}

impl DropBoard {
    /// Board with its own private bus.
    pub fn new(platform: Platform) -> Self {
        Self::with_bus(platform, Bus::new())
    }

    /// Board on a caller-provided bus, e.g. [`crate::events::global`]
    /// when the whole process is one drag-and-drop context.
    pub fn with_bus(platform: Platform, bus: Bus) -> Self {
        Self {
            ctx: CoreCtx {
                bus,
                platform,
                registry: DragRegistry::new(),
                budget: AmbientBudget::default(),
            },
            draggables: Vec::new(),
            droppables: Vec::new(),
        }
    }

    pub fn bus(&self) -> &Bus {
        &self.ctx.bus
    }

    pub fn registry(&self) -> &DragRegistry {
        &self.ctx.registry
    }

    pub fn ambient_budget(&self) -> &AmbientBudget {
        &self.ctx.budget
    }

    // ------------------------------------------------------------------
    // Attachment
    // ------------------------------------------------------------------

    /// Attach a draggable element. The instance stays inert until an
    /// `InitializeDraggables` broadcast (or a direct
    /// [`DraggableHandle::initialize`]) runs its init.
    pub fn attach_draggable(&mut self, config: DraggableConfig, node: NodeId) -> DraggableHandle {
        let handle = DraggableHandle::new(DraggableState::attach(config, node, &self.ctx));
        self.draggables.push(handle.clone());
        handle
    }

    /// Attach a draggable from its `data-*` attribute surface.
    pub fn attach_draggable_attrs(&mut self, attrs: &AttrMap, node: NodeId) -> DraggableHandle {
        self.attach_draggable(DraggableConfig::from_attributes(attrs), node)
    }

    /// Attach a drop zone. Inert until `InitializeDroppables` (or
    /// [`DroppableHandle::initialize`]) runs its init.
    pub fn attach_droppable(&mut self, config: DroppableConfig, node: NodeId) -> DroppableHandle {
        let handle = DroppableHandle::new(DroppableZone::attach(config, node, &self.ctx));
        self.droppables.push(handle.clone());
        handle
    }

    /// Attach a drop zone from its `data-*` attribute surface.
    pub fn attach_droppable_attrs(&mut self, attrs: &AttrMap, node: NodeId) -> DroppableHandle {
        self.attach_droppable(DroppableConfig::from_attributes(attrs), node)
    }

    // ------------------------------------------------------------------
    // Reset protocol
    // ------------------------------------------------------------------

    /// Broadcast draggable re-initialization, optionally id-scoped.
    pub fn initialize_draggables(&self, scope: ResetScope) {
        self.ctx.bus.publish(BusEvent::InitializeDraggables(scope));
    }

    /// Broadcast droppable re-initialization, optionally id-scoped.
    pub fn initialize_droppables(&self, scope: ResetScope) {
        self.ctx.bus.publish(BusEvent::InitializeDroppables(scope));
    }

    /// Initialize both element kinds unconditionally.
    pub fn initialize_all(&self) {
        self.initialize_droppables(ResetScope::All);
        self.initialize_draggables(ResetScope::All);
    }

    pub fn draggables(&self) -> &[DraggableHandle] {
        &self.draggables
    }

    pub fn droppables(&self) -> &[DroppableHandle] {
        &self.droppables
    }
}
