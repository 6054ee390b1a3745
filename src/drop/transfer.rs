//! Transfer resolution - which node actually moves into a zone.
//!
//! A draggable mid-budget transfers a structural clone and keeps its
//! original in place; the final budget unit transfers the original
//! itself. Clones are re-bound on the spot so they become independently
//! interactive draggables.

use crate::board::CoreCtx;
use crate::constants::{CLONE_DROP_ATTR, DEFAULT_CLONE_BUDGET, DRAG_ID_ATTR, FULL_OPACITY};
use crate::drag::{DraggableHandle, DraggableState};
use crate::platform::NodeId;
use crate::types::{DragId, ResetScope};

pub(crate) struct Transfer {
    /// Node to place into the zone
    pub node: NodeId,
    /// Identity of the consumed source (never the derived clone id)
    pub source_id: DragId,
    /// Freshly bound clone draggable, owned by the accepting zone
    pub rebound: Option<DraggableHandle>,
}

/// Decide what transfers for a drop originating from `source`.
///
/// Resolution reads the source's structured registry snapshot; a node
/// that no live draggable claims resolves to nothing and the drop is
/// ignored upstream.
pub(crate) fn resolve(source: NodeId, ctx: &CoreCtx) -> Option<Transfer> {
    let snapshot = ctx.registry.snapshot_for_node(source)?;

    let (node, rebound) = if snapshot.clone_drop_remaining != 1 {
        let ordinal = snapshot.clone_drop_max - snapshot.clone_drop_remaining + 1;
        let derived = snapshot.drag_id.derived(ordinal);
        let clone = {
            let mut tree = ctx.platform.tree.lock();
            let clone = tree.clone_node(source);
            tree.set_opacity(clone, FULL_OPACITY);
            tree.remove_attribute(clone, CLONE_DROP_ATTR);
            tree.set_attribute(clone, DRAG_ID_ATTR, derived.as_str());
            clone
        };

        // the clone re-enters the system as a fresh draggable with the
        // default budget
        let mut config = snapshot.config.clone();
        config.drag_id = Some(derived);
        config.clone_drop_max = DEFAULT_CLONE_BUDGET;
        let state = DraggableState::attach(config, clone, ctx);
        let handle = DraggableHandle::new(state.clone());
        let _ = DraggableState::run_init(&state, &ResetScope::All);

        (clone, Some(handle))
    } else {
        (source, None)
    };

    if !snapshot.config.drop_class.is_empty() {
        ctx.platform
            .tree
            .lock()
            .add_class(node, &snapshot.config.drop_class);
    }

    Some(Transfer {
        node,
        source_id: snapshot.drag_id,
        rebound,
    })
}
