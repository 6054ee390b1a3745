//! Registry of live draggables.
//!
//! Zones resolve the draggable behind a dropped node here and read a
//! structured [`DragSnapshot`] from it - the drop path never reads
//! bookkeeping back off the visual tree. Entries are weak: the board
//! (or the zone that spawned a clone) owns each state machine, and a
//! dead entry simply stops resolving.

use std::collections::HashMap;
use std::sync::{Arc, Weak};

use parking_lot::Mutex;

use crate::drag::DraggableState;
use crate::platform::NodeId;
use crate::types::{DragId, DragSnapshot};

#[derive(Default)]
struct RegistryInner {
    by_id: HashMap<DragId, Weak<Mutex<DraggableState>>>,
    by_node: HashMap<NodeId, DragId>,
}

/// Shared lookup of live draggable state machines.
#[derive(Clone, Default)]
pub struct DragRegistry {
    inner: Arc<Mutex<RegistryInner>>,
}

impl DragRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(
        &self,
        id: DragId,
        node: NodeId,
        state: &Arc<Mutex<DraggableState>>,
    ) {
        let mut inner = self.inner.lock();
        inner.by_node.insert(node, id.clone());
        inner.by_id.insert(id, Arc::downgrade(state));
    }

    pub(crate) fn state_for_node(&self, node: NodeId) -> Option<Arc<Mutex<DraggableState>>> {
        let weak = {
            let inner = self.inner.lock();
            let id = inner.by_node.get(&node)?;
            inner.by_id.get(id)?.clone()
        };
        weak.upgrade()
    }

    /// Structured view of the draggable behind a node, if it is live
    /// and initialized.
    pub fn snapshot_for_node(&self, node: NodeId) -> Option<DragSnapshot> {
        let state = self.state_for_node(node)?;
        let snapshot = state.lock().snapshot();
        snapshot
    }

    /// Structured view of the draggable with the given identity.
    pub fn snapshot(&self, id: &DragId) -> Option<DragSnapshot> {
        let weak = self.inner.lock().by_id.get(id)?.clone();
        let state = weak.upgrade()?;
        let snapshot = state.lock().snapshot();
        snapshot
    }

    /// Whether any live draggable claims the node.
    pub fn claims_node(&self, node: NodeId) -> bool {
        self.state_for_node(node).is_some()
    }

    /// Drop entries whose state machines are gone.
    pub fn prune(&self) {
        let mut inner = self.inner.lock();
        inner.by_id.retain(|_, weak| weak.strong_count() > 0);
        let by_id = std::mem::take(&mut inner.by_id);
        inner.by_node.retain(|_, id| by_id.contains_key(id));
        inner.by_id = by_id;
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.inner
            .lock()
            .by_id
            .values()
            .filter(|weak| weak.strong_count() > 0)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
