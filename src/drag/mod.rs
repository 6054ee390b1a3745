//! Draggable state machine.
//!
//! One [`DraggableState`] per draggable element. It owns the drag
//! identity, the remaining clone budget, the dropped flag, and the
//! single-drop lock; it reacts to gesture start/stop callbacks from the
//! engine and to drop confirmations broadcast by zones.
//!
//! Init runs on every `InitializeDraggables` broadcast whose scope
//! matches, tearing down the previous drop subscription before
//! installing a fresh one, so resets are idempotent.

mod state;

pub use state::BindingState;

use std::sync::Arc;

use parking_lot::Mutex;

use crate::board::CoreCtx;
use crate::constants::{
    CLONE_DROP_ATTR, DRAG_CURSOR, DRAG_DISABLED_CLASS, DRAG_ID_ATTR, FULL_OPACITY, GHOST_OPACITY,
    HIDDEN_OPACITY, MAX_CLONE_DROP_ATTR,
};
use crate::error::ConfigError;
use crate::events::{BusEvent, Channel, Subscription};
use crate::platform::{DragGestureSpec, GestureFrame, NodeId};
use crate::types::{DragId, DragSnapshot, DraggableConfig, DropId, DropReceipt, ResetScope};

/// Runtime state derived from a [`DraggableConfig`] by a successful init.
#[derive(Clone, Debug)]
pub struct DraggableDescriptor {
    pub drag_id: DragId,
    pub drag_class: String,
    pub drop_col_ids: Vec<DropId>,
    pub containment: String,
    pub clone_drop_max: u32,
    /// Counts down per accepted drop, floored at 1
    pub clone_drop_remaining: u32,
    pub active: bool,
    pub single_drop: bool,
    pub drag_clone: bool,
    pub drop_class: String,
    /// True between an accepted drop and the next gesture start
    pub dropped: bool,
}

/// Per-draggable state machine.
pub struct DraggableState {
    config: DraggableConfig,
    node: NodeId,
    ctx: CoreCtx,
    desc: Option<DraggableDescriptor>,
    binding: BindingState,
    config_error: Option<ConfigError>,
    /// Held for its Drop impl: keeps the init-channel registration alive
    _init_sub: Option<Subscription>,
    drop_sub: Option<Subscription>,
}

impl DraggableState {
    /// Create the instance and wire it to the init channel. Init itself
    /// runs only when an `InitializeDraggables` broadcast arrives (or
    /// through [`DraggableHandle::initialize`]).
    pub(crate) fn attach(
        config: DraggableConfig,
        node: NodeId,
        ctx: &CoreCtx,
    ) -> Arc<Mutex<Self>> {
        let state = Arc::new(Mutex::new(Self {
            config,
            node,
            ctx: ctx.clone(),
            desc: None,
            binding: BindingState::Unbound,
            config_error: None,
            _init_sub: None,
            drop_sub: None,
        }));

        let weak = Arc::downgrade(&state);
        let init_sub = ctx.bus.subscribe(Channel::InitializeDraggables, move |event| {
            if let BusEvent::InitializeDraggables(scope) = event {
                if let Some(this) = weak.upgrade() {
                    let _ = DraggableState::run_init(&this, scope);
                }
            }
        });
        {
            let mut s = state.lock();
            s._init_sub = Some(init_sub);
            if let Some(id) = s.config.drag_id.clone() {
                ctx.registry.insert(id, node, &state);
            }
        }
        state
    }

    /// (Re)run the init logic.
    ///
    /// Resets the dropped flag and the clone budget, mirrors the budget
    /// onto the node, replaces the drop subscription, and registers or
    /// tears down the gesture binding according to the config.
    pub(crate) fn run_init(
        this: &Arc<Mutex<Self>>,
        scope: &ResetScope,
    ) -> Result<(), ConfigError> {
        let weak = Arc::downgrade(this);
        let mut guard = this.lock();
        let s = &mut *guard;

        let id = s.config.drag_id.clone();
        if !scope.includes(id.as_ref().map(DragId::as_str)) {
            tracing::debug!(drag_id = ?id, "draggable outside reset scope, skipping");
            return Ok(());
        }
        let Some(drag_id) = id else {
            tracing::error!("draggable setup failed: {}", ConfigError::MissingDragId);
            s.config_error = Some(ConfigError::MissingDragId);
            return Err(ConfigError::MissingDragId);
        };
        s.config_error = None;

        let max = s.config.clone_drop_max.max(1);
        s.desc = Some(DraggableDescriptor {
            drag_id: drag_id.clone(),
            drag_class: s.config.drag_class.clone(),
            drop_col_ids: s.config.drop_col_ids.clone(),
            containment: s.config.containment.clone(),
            clone_drop_max: max,
            clone_drop_remaining: max,
            active: s.config.active,
            single_drop: s.config.single_drop,
            drag_clone: s.config.drag_clone,
            drop_class: s.config.drop_class.clone(),
            dropped: false,
        });

        // outward mirror for external consumers; nothing internal reads
        // these back
        {
            let mut tree = s.ctx.platform.tree.lock();
            tree.set_attribute(s.node, DRAG_ID_ATTR, drag_id.as_str());
            tree.set_attribute(s.node, CLONE_DROP_ATTR, &max.to_string());
            tree.set_attribute(s.node, MAX_CLONE_DROP_ATTR, &max.to_string());
        }

        // tear down before install so resets never stack listeners
        drop(s.drop_sub.take());
        let drop_weak = weak.clone();
        s.drop_sub = Some(s.ctx.bus.subscribe(Channel::ElementDropped, move |event| {
            if let BusEvent::ElementDropped(receipt) = event {
                if let Some(this) = drop_weak.upgrade() {
                    this.lock().handle_drop_receipt(receipt);
                }
            }
        }));

        if !s.config.active {
            s.ctx.platform.tree.lock().add_class(s.node, DRAG_DISABLED_CLASS);
            s.ctx.platform.engine.lock().deregister_draggable(s.node);
            s.binding = BindingState::Unbound;
            return Ok(());
        }
        if s.binding.is_retired() {
            // the single-drop lock outlives any reset
            return Ok(());
        }

        let revert_weak = weak.clone();
        let start_weak = weak.clone();
        let stop_weak = weak;
        let spec = DragGestureSpec {
            revert: Box::new(move || {
                revert_weak
                    .upgrade()
                    .map_or(true, |this| !this.lock().is_dropped())
            }),
            containment: s.config.containment.clone(),
            cursor: DRAG_CURSOR,
            on_start: Box::new(move |frame| {
                if let Some(this) = start_weak.upgrade() {
                    this.lock().handle_gesture_start(frame);
                }
            }),
            on_stop: Box::new(move |frame| {
                if let Some(this) = stop_weak.upgrade() {
                    this.lock().handle_gesture_stop(frame);
                }
            }),
        };
        s.ctx.platform.engine.lock().register_draggable(s.node, spec);
        s.binding = BindingState::Bound;
        Ok(())
    }

    fn handle_gesture_start(&mut self, frame: &GestureFrame) {
        let Some(desc) = self.desc.as_mut() else {
            return;
        };
        desc.dropped = false;
        let drag_class = desc.drag_class.clone();
        let opacity = if desc.drag_clone {
            GHOST_OPACITY
        } else {
            HIDDEN_OPACITY
        };
        {
            let mut tree = self.ctx.platform.tree.lock();
            tree.add_class(frame.helper, &drag_class);
            tree.set_opacity(self.node, opacity);
        }
        self.ctx.budget.decrement();
    }

    fn handle_gesture_stop(&mut self, _frame: &GestureFrame) {
        self.ctx
            .platform
            .tree
            .lock()
            .set_opacity(self.node, FULL_OPACITY);
    }

    fn handle_drop_receipt(&mut self, receipt: &DropReceipt) {
        let Some(desc) = self.desc.as_mut() else {
            return;
        };
        if receipt.drag_id != desc.drag_id {
            return;
        }
        desc.dropped = true;
        if desc.clone_drop_remaining != 1 {
            // floor at 1: the final budget unit is spent by transferring
            // the original, not by the counter
            desc.clone_drop_remaining -= 1;
        }
        let remaining = desc.clone_drop_remaining;
        let single_drop = desc.single_drop;

        self.ctx.platform.tree.lock().set_attribute(
            self.node,
            CLONE_DROP_ATTR,
            &remaining.to_string(),
        );
        if single_drop {
            self.ctx.platform.engine.lock().deregister_draggable(self.node);
            self.binding = BindingState::Retired;
        }
    }

    /// Structured view for the drop path; `None` until init succeeded.
    pub fn snapshot(&self) -> Option<DragSnapshot> {
        let desc = self.desc.as_ref()?;
        Some(DragSnapshot {
            drag_id: desc.drag_id.clone(),
            clone_drop_max: desc.clone_drop_max,
            clone_drop_remaining: desc.clone_drop_remaining,
            config: self.config.clone(),
        })
    }

    pub fn remaining_clones(&self) -> Option<u32> {
        self.desc.as_ref().map(|d| d.clone_drop_remaining)
    }

    pub fn is_dropped(&self) -> bool {
        self.desc.as_ref().is_some_and(|d| d.dropped)
    }

    pub fn binding(&self) -> BindingState {
        self.binding
    }

    pub fn config_error(&self) -> Option<ConfigError> {
        self.config_error.clone()
    }

    pub fn drag_id(&self) -> Option<DragId> {
        self.desc.as_ref().map(|d| d.drag_id.clone())
    }

    pub fn node(&self) -> NodeId {
        self.node
    }
}

/// Owning handle to one draggable state machine.
///
/// Dropping the last handle retires the instance: its bus subscriptions
/// and registry entry stop resolving.
#[derive(Clone)]
pub struct DraggableHandle {
    state: Arc<Mutex<DraggableState>>,
}

impl DraggableHandle {
    pub(crate) fn new(state: Arc<Mutex<DraggableState>>) -> Self {
        Self { state }
    }

    /// Run init directly instead of through a broadcast.
    pub fn initialize(&self, scope: &ResetScope) -> Result<(), ConfigError> {
        DraggableState::run_init(&self.state, scope)
    }

    /// Remaining clone budget; `None` until init succeeded.
    pub fn remaining_clones(&self) -> Option<u32> {
        self.state.lock().remaining_clones()
    }

    /// True between an accepted drop and the next gesture start.
    pub fn is_dropped(&self) -> bool {
        self.state.lock().is_dropped()
    }

    pub fn binding(&self) -> BindingState {
        self.state.lock().binding()
    }

    pub fn config_error(&self) -> Option<ConfigError> {
        self.state.lock().config_error()
    }

    pub fn drag_id(&self) -> Option<DragId> {
        self.state.lock().drag_id()
    }

    pub fn node(&self) -> NodeId {
        self.state.lock().node()
    }

    pub fn snapshot(&self) -> Option<DragSnapshot> {
        self.state.lock().snapshot()
    }
}
