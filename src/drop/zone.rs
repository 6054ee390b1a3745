//! Drop zone state machine.
//!
//! One [`DroppableZone`] per target element. It owns the drop identity,
//! the occupancy counter, the capacity limit, and the acceptance rule;
//! on an accepted drop it resolves the transferred node, updates
//! occupancy, and broadcasts the confirmation every draggable listens
//! for.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::board::CoreCtx;
use crate::drag::DraggableHandle;
use crate::drop::transfer;
use crate::error::ConfigError;
use crate::events::{BusEvent, Channel, Subscription};
use crate::platform::{DropGestureSpec, GestureFrame, NodeId};
use crate::types::{DragSnapshot, DropId, DropReceipt, DroppableConfig, ResetScope};

/// Caller-supplied hook invoked after each accepted drop.
///
/// Fire-and-forget: a returned error is logged and never vetoes the
/// drop.
pub type DropValidator = Box<dyn FnMut(&DropReceipt) -> anyhow::Result<()> + Send>;

/// Runtime state derived from a [`DroppableConfig`] by a successful init.
#[derive(Clone, Debug)]
pub struct DroppableDescriptor {
    pub drop_id: DropId,
    pub hover_class: String,
    pub prevent_append: bool,
    /// -1 means unlimited
    pub max_drop_allow: i64,
    /// Occupancy, reset to 0 on every init
    pub total_drop: i64,
}

/// Per-zone state machine.
pub struct DroppableZone {
    config: DroppableConfig,
    node: NodeId,
    ctx: CoreCtx,
    desc: Option<DroppableDescriptor>,
    validator: Option<DropValidator>,
    /// Clone draggables spawned by drops into this zone
    spawned: Vec<DraggableHandle>,
    config_error: Option<ConfigError>,
    /// Held for its Drop impl: keeps the init-channel registration alive
    _init_sub: Option<Subscription>,
    bound: bool,
}

impl DroppableZone {
    /// Create the instance and wire it to the init channel.
    pub(crate) fn attach(
        config: DroppableConfig,
        node: NodeId,
        ctx: &CoreCtx,
    ) -> Arc<Mutex<Self>> {
        let state = Arc::new(Mutex::new(Self {
            config,
            node,
            ctx: ctx.clone(),
            desc: None,
            validator: None,
            spawned: Vec::new(),
            config_error: None,
            _init_sub: None,
            bound: false,
        }));

        let weak = Arc::downgrade(&state);
        let init_sub = ctx.bus.subscribe(Channel::InitializeDroppables, move |event| {
            if let BusEvent::InitializeDroppables(scope) = event {
                if let Some(this) = weak.upgrade() {
                    let _ = DroppableZone::run_init(&this, scope);
                }
            }
        });
        state.lock()._init_sub = Some(init_sub);
        state
    }

    /// (Re)run the init logic: reset occupancy and register the
    /// acceptance gate, hover feedback, and drop handler with the
    /// engine. Re-registration replaces the previous binding.
    pub(crate) fn run_init(
        this: &Arc<Mutex<Self>>,
        scope: &ResetScope,
    ) -> Result<(), ConfigError> {
        let weak = Arc::downgrade(this);
        let mut guard = this.lock();
        let s = &mut *guard;

        let id = s.config.drop_id.clone();
        if !scope.includes(id.as_ref().map(DropId::as_str)) {
            tracing::debug!(drop_id = ?id, "drop zone outside reset scope, skipping");
            return Ok(());
        }
        let Some(drop_id) = id else {
            tracing::error!("drop zone setup failed: {}", ConfigError::MissingDropId);
            s.config_error = Some(ConfigError::MissingDropId);
            return Err(ConfigError::MissingDropId);
        };
        s.config_error = None;

        s.desc = Some(DroppableDescriptor {
            drop_id,
            hover_class: s.config.hover_class.clone(),
            prevent_append: s.config.prevent_append,
            max_drop_allow: s.config.max_drop_allow,
            total_drop: 0,
        });

        let accept_weak = weak.clone();
        let registry = s.ctx.registry.clone();
        let drop_weak = weak;
        let bus = s.ctx.bus.clone();
        let spec = DropGestureSpec {
            accept: Box::new(move |candidate| {
                let Some(zone) = accept_weak.upgrade() else {
                    return false;
                };
                let snapshot = registry.snapshot_for_node(candidate);
                zone.lock().accepts(snapshot.as_ref())
            }),
            hover_class: s.config.hover_class.clone(),
            on_drop: Box::new(move |frame| {
                let Some(zone) = drop_weak.upgrade() else {
                    return;
                };
                let (receipt, validator) = {
                    let mut z = zone.lock();
                    match z.handle_drop(frame) {
                        Some(receipt) => (receipt, z.validator.take()),
                        None => return,
                    }
                };
                bus.publish(BusEvent::ElementDropped(receipt.clone()));
                if let Some(mut validate) = validator {
                    if let Err(err) = validate(&receipt) {
                        tracing::warn!(
                            drop_id = %receipt.drop_id,
                            error = %err,
                            "drop validation hook failed",
                        );
                    }
                    let mut z = zone.lock();
                    if z.validator.is_none() {
                        z.validator = Some(validate);
                    }
                }
            }),
        };
        s.ctx.platform.engine.lock().register_droppable(s.node, spec);
        s.bound = true;
        Ok(())
    }

    /// Acceptance rule for a candidate draggable.
    ///
    /// The capacity check is an equality on purpose: -1 reads as
    /// unlimited because occupancy never equals it, and a count that
    /// drifts past the cap re-opens acceptance.
    pub fn accepts(&self, candidate: Option<&DragSnapshot>) -> bool {
        let Some(desc) = self.desc.as_ref() else {
            return false;
        };
        let allow_ok = candidate.is_none_or(|snap| {
            snap.allow_list().is_empty() || snap.allow_list().contains(&desc.drop_id)
        });
        allow_ok && desc.total_drop != desc.max_drop_allow
    }

    /// Perform the accepted drop: resolve the transferred node, append
    /// it unless configured not to, and bump occupancy. Returns the
    /// receipt to broadcast, or `None` when no live draggable claims
    /// the dropped node.
    fn handle_drop(&mut self, frame: &GestureFrame) -> Option<DropReceipt> {
        let (prevent_append, drop_id) = {
            let desc = self.desc.as_ref()?;
            (desc.prevent_append, desc.drop_id.clone())
        };

        let Some(resolved) = transfer::resolve(frame.source, &self.ctx) else {
            tracing::debug!(node = ?frame.source, "dropped node has no live draggable, ignoring");
            return None;
        };
        if let Some(handle) = resolved.rebound {
            self.spawned.push(handle);
        }
        if !prevent_append {
            self.ctx
                .platform
                .tree
                .lock()
                .append_child(self.node, resolved.node);
        }
        if let Some(desc) = self.desc.as_mut() {
            desc.total_drop += 1;
        }

        Some(DropReceipt {
            drag_id: resolved.source_id,
            drop_id,
        })
    }

    pub fn total_drops(&self) -> Option<i64> {
        self.desc.as_ref().map(|d| d.total_drop)
    }

    pub fn drop_id(&self) -> Option<DropId> {
        self.desc.as_ref().map(|d| d.drop_id.clone())
    }

    pub fn config_error(&self) -> Option<ConfigError> {
        self.config_error.clone()
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Whether a gesture binding is currently registered.
    pub fn is_bound(&self) -> bool {
        self.bound
    }

    /// Clone draggables spawned by drops into this zone.
    pub fn spawned(&self) -> &[DraggableHandle] {
        &self.spawned
    }
}

/// Owning handle to one drop zone state machine.
#[derive(Clone)]
pub struct DroppableHandle {
    state: Arc<Mutex<DroppableZone>>,
}

impl DroppableHandle {
    pub(crate) fn new(state: Arc<Mutex<DroppableZone>>) -> Self {
        Self { state }
    }

    /// Run init directly instead of through a broadcast.
    pub fn initialize(&self, scope: &ResetScope) -> Result<(), ConfigError> {
        DroppableZone::run_init(&self.state, scope)
    }

    /// Occupancy; `None` until init succeeded.
    pub fn total_drops(&self) -> Option<i64> {
        self.state.lock().total_drops()
    }

    pub fn drop_id(&self) -> Option<DropId> {
        self.state.lock().drop_id()
    }

    pub fn config_error(&self) -> Option<ConfigError> {
        self.state.lock().config_error()
    }

    pub fn node(&self) -> NodeId {
        self.state.lock().node()
    }

    /// Whether a gesture binding is currently registered.
    pub fn is_bound(&self) -> bool {
        self.state.lock().is_bound()
    }

    /// Install the post-drop validation hook.
    pub fn set_validator(&self, validator: DropValidator) {
        self.state.lock().validator = Some(validator);
    }

    /// Clone draggables spawned by drops into this zone.
    pub fn spawned(&self) -> Vec<DraggableHandle> {
        self.state.lock().spawned().to_vec()
    }
}
