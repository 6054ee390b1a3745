//! Collaborator interfaces consumed by the state machines.
//!
//! The gesture engine (pointer tracking) and the visual tree (node
//! mutation) are external concerns; this module pins down the contract
//! the coordination core needs from each, plus headless in-memory
//! implementations used by the test suite and by embedders without a
//! windowing system.
//!
//! ## Modules
//!
//! - `gesture` - gesture engine trait, binding specs, callback frames
//! - `tree` - visual tree trait and node handles
//! - `headless` - in-memory backends with pointer-order driving methods

pub mod gesture;
pub mod headless;
pub mod tree;

use std::sync::Arc;

use parking_lot::Mutex;

pub use gesture::{DragGestureSpec, DropGestureSpec, GestureEngine, GestureFrame};
pub use headless::{HeadlessEngine, HeadlessTree};
pub use tree::{NodeId, VisualTree};

/// Shared handle to the gesture engine collaborator.
pub type SharedEngine = Arc<Mutex<Box<dyn GestureEngine>>>;

/// Shared handle to the visual tree collaborator.
pub type SharedTree = Arc<Mutex<Box<dyn VisualTree>>>;

/// The pair of collaborators every instance talks to.
///
/// Cheap to clone; clones share the same engine and tree.
#[derive(Clone)]
pub struct Platform {
    pub engine: SharedEngine,
    pub tree: SharedTree,
}

impl Platform {
    pub fn new(engine: impl GestureEngine + 'static, tree: impl VisualTree + 'static) -> Self {
        Self {
            engine: Arc::new(Mutex::new(Box::new(engine))),
            tree: Arc::new(Mutex::new(Box::new(tree))),
        }
    }

    /// Fully in-memory platform.
    ///
    /// Returns the platform plus direct handles to the backends: the
    /// engine handle drives simulated pointer interactions, the tree
    /// handle inspects node state.
    pub fn headless() -> (Self, HeadlessEngine, HeadlessTree) {
        let tree = HeadlessTree::new();
        let shared_tree: SharedTree = Arc::new(Mutex::new(Box::new(tree.clone())));
        let engine = HeadlessEngine::new(Arc::clone(&shared_tree));
        let platform = Self {
            engine: Arc::new(Mutex::new(Box::new(engine.clone()))),
            tree: shared_tree,
        };
        (platform, engine, tree)
    }
}
