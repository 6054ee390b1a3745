//! In-memory collaborator backends.
//!
//! [`HeadlessTree`] stores nodes as plain records; [`HeadlessEngine`]
//! simulates pointer interactions in strict gesture order
//! (press -> hover* -> release). Both are cheap-to-clone handles over
//! shared state, so a test can keep a handle for driving/inspection
//! after moving a clone into a [`Platform`](crate::platform::Platform).
//!
//! The engine never holds its own lock while invoking a callback:
//! binding specs are taken out of their slot, invoked, and restored
//! only if the slot was not deregistered or replaced in the meantime.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::platform::gesture::{DragGestureSpec, DropGestureSpec, GestureEngine, GestureFrame};
use crate::platform::tree::{NodeId, VisualTree};
use crate::platform::SharedTree;

// ============================================================================
// HeadlessTree
// ============================================================================

#[derive(Clone, Debug, Default)]
struct NodeData {
    attrs: HashMap<String, String>,
    classes: Vec<String>,
    opacity: f32,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
}

#[derive(Default)]
struct TreeData {
    nodes: HashMap<NodeId, NodeData>,
    next_id: u64,
}

impl TreeData {
    fn alloc(&mut self) -> NodeId {
        self.next_id += 1;
        let id = NodeId::from_raw(self.next_id);
        self.nodes.insert(
            id,
            NodeData {
                opacity: 1.0,
                ..NodeData::default()
            },
        );
        id
    }

    fn clone_subtree(&mut self, node: NodeId) -> NodeId {
        let template = self.nodes.get(&node).cloned().unwrap_or_default();
        let copy = self.alloc();
        let mut children = Vec::with_capacity(template.children.len());
        for child in &template.children {
            let child_copy = self.clone_subtree(*child);
            if let Some(c) = self.nodes.get_mut(&child_copy) {
                c.parent = Some(copy);
            }
            children.push(child_copy);
        }
        if let Some(data) = self.nodes.get_mut(&copy) {
            data.attrs = template.attrs;
            data.classes = template.classes;
            data.opacity = template.opacity;
            data.children = children;
        }
        copy
    }

    fn detach(&mut self, child: NodeId) {
        if let Some(parent) = self.nodes.get(&child).and_then(|n| n.parent) {
            if let Some(p) = self.nodes.get_mut(&parent) {
                p.children.retain(|c| *c != child);
            }
        }
    }
}

/// In-memory visual tree.
#[derive(Clone, Default)]
pub struct HeadlessTree {
    data: Arc<Mutex<TreeData>>,
}

impl HeadlessTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a fresh detached node.
    pub fn create_node(&self) -> NodeId {
        self.data.lock().alloc()
    }

    // ------------------------------------------------------------------
    // Inspection
    // ------------------------------------------------------------------

    pub fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.data.lock().nodes.get(&node)?.attrs.get(name).cloned()
    }

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.data
            .lock()
            .nodes
            .get(&node)
            .is_some_and(|n| n.classes.iter().any(|c| c == class))
    }

    pub fn opacity(&self, node: NodeId) -> f32 {
        self.data.lock().nodes.get(&node).map_or(1.0, |n| n.opacity)
    }

    pub fn children(&self, parent: NodeId) -> Vec<NodeId> {
        self.data
            .lock()
            .nodes
            .get(&parent)
            .map(|n| n.children.clone())
            .unwrap_or_default()
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.data.lock().nodes.get(&node)?.parent
    }

    pub fn node_count(&self) -> usize {
        self.data.lock().nodes.len()
    }
}

impl VisualTree for HeadlessTree {
    fn clone_node(&mut self, node: NodeId) -> NodeId {
        self.data.lock().clone_subtree(node)
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) {
        let mut data = self.data.lock();
        data.detach(child);
        if let Some(c) = data.nodes.get_mut(&child) {
            c.parent = Some(parent);
        }
        if let Some(p) = data.nodes.get_mut(&parent) {
            p.children.push(child);
        }
    }

    fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        if let Some(n) = self.data.lock().nodes.get_mut(&node) {
            n.attrs.insert(name.to_string(), value.to_string());
        }
    }

    fn remove_attribute(&mut self, node: NodeId, name: &str) {
        if let Some(n) = self.data.lock().nodes.get_mut(&node) {
            n.attrs.remove(name);
        }
    }

    fn add_class(&mut self, node: NodeId, class: &str) {
        if class.is_empty() {
            return;
        }
        if let Some(n) = self.data.lock().nodes.get_mut(&node) {
            if !n.classes.iter().any(|c| c == class) {
                n.classes.push(class.to_string());
            }
        }
    }

    fn remove_class(&mut self, node: NodeId, class: &str) {
        if let Some(n) = self.data.lock().nodes.get_mut(&node) {
            n.classes.retain(|c| c != class);
        }
    }

    fn set_opacity(&mut self, node: NodeId, opacity: f32) {
        if let Some(n) = self.data.lock().nodes.get_mut(&node) {
            n.opacity = opacity;
        }
    }
}

// ============================================================================
// HeadlessEngine
// ============================================================================

#[derive(Default)]
struct EngineData {
    // a slot holding None marks a binding whose spec is out being invoked
    draggables: HashMap<NodeId, Option<DragGestureSpec>>,
    droppables: HashMap<NodeId, Option<DropGestureSpec>>,
    active: Option<GestureFrame>,
    hovered: Option<(NodeId, String)>,
    last_revert: Option<bool>,
}

/// In-memory gesture engine.
///
/// Driving methods simulate one pointer: `press` starts a drag and
/// creates the helper clone, `hover` applies zone feedback, and the
/// `release_*` methods end the gesture, firing drop/stop callbacks and
/// querying the revert predicate in interaction order.
#[derive(Clone)]
pub struct HeadlessEngine {
    data: Arc<Mutex<EngineData>>,
    tree: SharedTree,
}

impl HeadlessEngine {
    pub fn new(tree: SharedTree) -> Self {
        Self {
            data: Arc::new(Mutex::new(EngineData::default())),
            tree,
        }
    }

    // ------------------------------------------------------------------
    // Driving (simulated pointer)
    // ------------------------------------------------------------------

    /// Start a drag on `source`. Returns the helper node, or `None`
    /// when the node has no binding or a drag is already active.
    pub fn press(&self, source: NodeId) -> Option<NodeId> {
        if self.data.lock().active.is_some() {
            return None;
        }
        let mut spec = self.take_drag(source)?;
        let helper = self.tree.lock().clone_node(source);
        let frame = GestureFrame { source, helper };
        (spec.on_start)(&frame);
        self.put_drag(source, spec);
        let mut data = self.data.lock();
        data.active = Some(frame);
        data.last_revert = None;
        Some(helper)
    }

    /// Move the active drag over a zone. Returns whether the zone
    /// accepts the candidate; hover feedback is applied on acceptance.
    pub fn hover(&self, zone: NodeId) -> bool {
        let Some(frame) = self.data.lock().active else {
            return false;
        };
        self.clear_hover();
        let Some(spec) = self.take_drop(zone) else {
            return false;
        };
        let accepted = (spec.accept)(frame.source);
        if accepted && !spec.hover_class.is_empty() {
            self.tree.lock().add_class(zone, &spec.hover_class);
            self.data.lock().hovered = Some((zone, spec.hover_class.clone()));
        }
        self.put_drop(zone, spec);
        accepted
    }

    /// Release the active drag over a zone. The zone's drop handler
    /// fires only when the acceptance gate passes; the draggable's stop
    /// callback and revert predicate run either way.
    pub fn release_over(&self, zone: NodeId) -> bool {
        self.finish(Some(zone), true)
    }

    /// Release the active drag away from any zone.
    pub fn release(&self) {
        self.finish(None, true);
    }

    /// Release over a zone without consulting the acceptance gate.
    ///
    /// Harness affordance for exercising capacity drift; a conforming
    /// engine always gates.
    pub fn force_drop(&self, zone: NodeId) -> bool {
        self.finish(Some(zone), false)
    }

    /// Evaluate a zone's acceptance gate against a candidate source
    /// node. `None` when the zone has no binding.
    pub fn would_accept(&self, zone: NodeId, candidate: NodeId) -> Option<bool> {
        let spec = self.take_drop(zone)?;
        let accepted = (spec.accept)(candidate);
        self.put_drop(zone, spec);
        Some(accepted)
    }

    // ------------------------------------------------------------------
    // Observation
    // ------------------------------------------------------------------

    /// The in-flight gesture, if any.
    pub fn active_drag(&self) -> Option<GestureFrame> {
        self.data.lock().active
    }

    /// Revert decision of the most recently finished gesture.
    pub fn last_revert(&self) -> Option<bool> {
        self.data.lock().last_revert
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn finish(&self, zone: Option<NodeId>, gate: bool) -> bool {
        let Some(frame) = self.data.lock().active else {
            return false;
        };
        // hold the drag spec for the whole gesture tail so stop/revert
        // still run when a drop callback deregisters the binding
        let drag_spec = self.take_drag(frame.source);

        let mut accepted = false;
        if let Some(zone) = zone {
            if let Some(mut spec) = self.take_drop(zone) {
                accepted = !gate || (spec.accept)(frame.source);
                if accepted {
                    (spec.on_drop)(&frame);
                }
                self.put_drop(zone, spec);
            }
        }

        let mut revert = None;
        if let Some(mut spec) = drag_spec {
            (spec.on_stop)(&frame);
            revert = Some((spec.revert)());
            self.put_drag(frame.source, spec);
        }

        self.clear_hover();
        let mut data = self.data.lock();
        data.active = None;
        data.last_revert = revert;
        accepted
    }

    fn clear_hover(&self) {
        if let Some((zone, class)) = self.data.lock().hovered.take() {
            self.tree.lock().remove_class(zone, &class);
        }
    }

    fn take_drag(&self, node: NodeId) -> Option<DragGestureSpec> {
        self.data.lock().draggables.get_mut(&node).and_then(Option::take)
    }

    fn put_drag(&self, node: NodeId, spec: DragGestureSpec) {
        if let Some(slot) = self.data.lock().draggables.get_mut(&node) {
            if slot.is_none() {
                *slot = Some(spec);
            }
        }
    }

    fn take_drop(&self, node: NodeId) -> Option<DropGestureSpec> {
        self.data.lock().droppables.get_mut(&node).and_then(Option::take)
    }

    fn put_drop(&self, node: NodeId, spec: DropGestureSpec) {
        if let Some(slot) = self.data.lock().droppables.get_mut(&node) {
            if slot.is_none() {
                *slot = Some(spec);
            }
        }
    }
}

impl GestureEngine for HeadlessEngine {
    fn register_draggable(&mut self, node: NodeId, spec: DragGestureSpec) {
        self.data.lock().draggables.insert(node, Some(spec));
    }

    fn deregister_draggable(&mut self, node: NodeId) {
        self.data.lock().draggables.remove(&node);
    }

    fn register_droppable(&mut self, node: NodeId, spec: DropGestureSpec) {
        self.data.lock().droppables.insert(node, Some(spec));
    }

    fn deregister_droppable(&mut self, node: NodeId) {
        self.data.lock().droppables.remove(&node);
    }

    fn has_draggable(&self, node: NodeId) -> bool {
        self.data.lock().draggables.contains_key(&node)
    }

    fn has_droppable(&self, node: NodeId) -> bool {
        self.data.lock().droppables.contains_key(&node)
    }
}
