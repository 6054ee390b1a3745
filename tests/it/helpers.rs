//! Test helpers and builders for reducing boilerplate in tests.
//!
//! `BoardFixture` wires a board to the headless backends and keeps
//! direct handles to both, so tests can drive simulated pointer
//! gestures through the engine and inspect node state through the
//! tree.

use dropboard::{
    DraggableConfig, DraggableHandle, DropBoard, DroppableConfig, DroppableHandle, HeadlessEngine,
    HeadlessTree, NodeId, Platform,
};

/// Route `RUST_LOG`-filtered tracing output into test stderr.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A board wired to headless backends.
///
/// # Example
/// ```ignore
/// let mut fx = BoardFixture::new();
/// let (card, card_node) = fx.draggable(DraggableConfig::new("card1"));
/// let (zone, zone_node) = fx.droppable(DroppableConfig::new("zoneA"));
/// fx.board.initialize_all();
/// assert!(fx.drag_drop(card_node, zone_node));
/// ```
pub struct BoardFixture {
    pub board: DropBoard,
    pub engine: HeadlessEngine,
    pub tree: HeadlessTree,
}

impl BoardFixture {
    pub fn new() -> Self {
        init_tracing();
        let (platform, engine, tree) = Platform::headless();
        Self {
            board: DropBoard::new(platform),
            engine,
            tree,
        }
    }

    /// Attach a draggable on a fresh node.
    pub fn draggable(&mut self, config: DraggableConfig) -> (DraggableHandle, NodeId) {
        let node = self.tree.create_node();
        let handle = self.board.attach_draggable(config, node);
        (handle, node)
    }

    /// Attach a drop zone on a fresh node.
    pub fn droppable(&mut self, config: DroppableConfig) -> (DroppableHandle, NodeId) {
        let node = self.tree.create_node();
        let handle = self.board.attach_droppable(config, node);
        (handle, node)
    }

    /// One full press-release gesture. Returns whether the drop was
    /// accepted.
    pub fn drag_drop(&self, source: NodeId, zone: NodeId) -> bool {
        self.engine.press(source);
        self.engine.release_over(zone)
    }
}

impl Default for BoardFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Draggable config with an identity and a clone budget.
pub fn budgeted(id: &str, clone_drop_max: u32) -> DraggableConfig {
    let mut config = DraggableConfig::new(id);
    config.clone_drop_max = clone_drop_max;
    config
}

/// Droppable config with an identity and a capacity.
pub fn capped(id: &str, max_drop_allow: i64) -> DroppableConfig {
    let mut config = DroppableConfig::new(id);
    config.max_drop_allow = max_drop_allow;
    config
}
