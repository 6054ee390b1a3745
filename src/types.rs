//! Core types for the drag-and-drop coordination system.
//!
//! This module defines the identity newtypes, the declarative
//! configuration structs for both element kinds, the reset-scope filter
//! used by the re-initialization protocol, and the structured payloads
//! that flow between the two state machines.
//!
//! Configuration has two surfaces: structured (serde, e.g. JSON) and a
//! flat string attribute map mirroring the `data-*` vocabulary. Both
//! produce the same config structs with the same defaults.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::constants::{
    CLONE_DROP_ATTR, CONTAINMENT_ATTR, DEFAULT_CLONE_BUDGET, DEFAULT_CONTAINMENT, DRAG_ACTIVE_ATTR,
    DRAG_CLASS_ATTR, DRAG_CLONE_ATTR, DRAG_ID_ATTR, DROP_CLASS_ATTR, DROP_COL_ID_ATTR,
    DROP_HOVER_CLASS_ATTR, DROP_ID_ATTR, MAX_DROP_ALLOW_ATTR, PREVENT_APPEND_ATTR,
    SINGLE_DROP_ATTR, UNLIMITED_DROPS,
};

/// Flat string attribute map, the declarative per-element surface.
pub type AttrMap = HashMap<String, String>;

// ============================================================================
// Identity Types
// ============================================================================

/// Unique identifier of a draggable element.
///
/// Duplicate ids across live draggables are undefined behavior and are
/// not validated.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DragId(String);

impl DragId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Identity assigned to the n-th transferred clone of this draggable.
    pub fn derived(&self, ordinal: u32) -> DragId {
        DragId(format!("{}_{}", self.0, ordinal))
    }
}

impl fmt::Display for DragId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DragId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for DragId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Unique identifier of a drop zone.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DropId(String);

impl DropId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DropId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DropId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for DropId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

// ============================================================================
// Draggable Configuration
// ============================================================================

/// Declarative configuration of one draggable element.
///
/// Every field except the identity has a default; a missing identity is
/// only rejected at init time so that a misconfigured element degrades
/// into an inert one instead of failing the whole surface.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct DraggableConfig {
    /// Unique identity, required at init
    pub drag_id: Option<DragId>,
    /// Class applied to the transient drag visual
    pub drag_class: String,
    /// Allowed destination zones; empty means "accept any"
    pub drop_col_ids: Vec<DropId>,
    /// Bounding region for the gesture
    pub containment: String,
    /// Number of times this draggable may be consumed, at least 1
    #[serde(rename = "clone-drop")]
    pub clone_drop_max: u32,
    /// When false the gesture is disabled entirely
    #[serde(rename = "drag-active")]
    pub active: bool,
    /// When true the first accepted drop permanently locks the draggable
    pub single_drop: bool,
    /// When true the source stays half-visible (ghost) while dragging
    pub drag_clone: bool,
    /// Class applied to the transferred node after a drop
    pub drop_class: String,
}

impl Default for DraggableConfig {
    fn default() -> Self {
        Self {
            drag_id: None,
            drag_class: String::new(),
            drop_col_ids: Vec::new(),
            containment: DEFAULT_CONTAINMENT.to_string(),
            clone_drop_max: DEFAULT_CLONE_BUDGET,
            active: true,
            single_drop: false,
            drag_clone: false,
            drop_class: String::new(),
        }
    }
}

impl DraggableConfig {
    /// Config with just an identity and all defaults.
    pub fn new(drag_id: impl Into<DragId>) -> Self {
        Self {
            drag_id: Some(drag_id.into()),
            ..Self::default()
        }
    }

    /// Parse the `data-*` attribute surface.
    ///
    /// Unknown attributes are ignored; malformed values fall back to the
    /// field default.
    pub fn from_attributes(attrs: &AttrMap) -> Self {
        Self {
            drag_id: attrs.get(DRAG_ID_ATTR).map(|v| DragId::new(v.clone())),
            drag_class: attrs.get(DRAG_CLASS_ATTR).cloned().unwrap_or_default(),
            drop_col_ids: attrs
                .get(DROP_COL_ID_ATTR)
                .map(|v| parse_id_list(v))
                .unwrap_or_default(),
            containment: attrs
                .get(CONTAINMENT_ATTR)
                .cloned()
                .unwrap_or_else(|| DEFAULT_CONTAINMENT.to_string()),
            clone_drop_max: attrs
                .get(CLONE_DROP_ATTR)
                .and_then(|v| v.trim().parse::<u32>().ok())
                .unwrap_or(DEFAULT_CLONE_BUDGET)
                .max(1),
            active: attrs.get(DRAG_ACTIVE_ATTR).map(String::as_str) != Some("false"),
            single_drop: parse_flag(attrs.get(SINGLE_DROP_ATTR)),
            drag_clone: parse_flag(attrs.get(DRAG_CLONE_ATTR)),
            drop_class: attrs.get(DROP_CLASS_ATTR).cloned().unwrap_or_default(),
        }
    }

    /// Parse the structured JSON surface.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

// ============================================================================
// Droppable Configuration
// ============================================================================

/// Declarative configuration of one drop zone.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct DroppableConfig {
    /// Unique identity, required at init
    pub drop_id: Option<DropId>,
    /// Class applied while an acceptable draggable hovers the zone
    #[serde(rename = "drop-hover-class")]
    pub hover_class: String,
    /// When true the transferred node is not moved into the zone's subtree
    pub prevent_append: bool,
    /// Capacity; -1 means unlimited
    pub max_drop_allow: i64,
}

impl Default for DroppableConfig {
    fn default() -> Self {
        Self {
            drop_id: None,
            hover_class: String::new(),
            prevent_append: false,
            max_drop_allow: UNLIMITED_DROPS,
        }
    }
}

impl DroppableConfig {
    /// Config with just an identity and all defaults.
    pub fn new(drop_id: impl Into<DropId>) -> Self {
        Self {
            drop_id: Some(drop_id.into()),
            ..Self::default()
        }
    }

    /// Parse the `data-*` attribute surface.
    pub fn from_attributes(attrs: &AttrMap) -> Self {
        Self {
            drop_id: attrs.get(DROP_ID_ATTR).map(|v| DropId::new(v.clone())),
            hover_class: attrs.get(DROP_HOVER_CLASS_ATTR).cloned().unwrap_or_default(),
            prevent_append: parse_flag(attrs.get(PREVENT_APPEND_ATTR)),
            max_drop_allow: attrs
                .get(MAX_DROP_ALLOW_ATTR)
                .and_then(|v| v.trim().parse::<i64>().ok())
                .unwrap_or(UNLIMITED_DROPS),
        }
    }

    /// Parse the structured JSON surface.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

fn parse_flag(value: Option<&String>) -> bool {
    value.map(String::as_str) == Some("true")
}

fn parse_id_list(value: &str) -> Vec<DropId> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(DropId::from)
        .collect()
}

// ============================================================================
// Reset Protocol
// ============================================================================

/// Identity filter carried by a re-initialization broadcast.
///
/// `All` re-runs init on every instance. `Ids` restricts the reset to
/// the named identities; an empty list behaves like `All`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResetScope {
    #[default]
    All,
    Ids(Vec<String>),
}

impl ResetScope {
    /// Scope restricted to the given identities.
    pub fn only<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Ids(ids.into_iter().map(Into::into).collect())
    }

    /// Whether an instance with the given identity should run its init.
    ///
    /// `None` identities (not yet validated) only match an unrestricted
    /// scope, so an id-filtered reset never trips the missing-id error.
    pub fn includes(&self, id: Option<&str>) -> bool {
        match self {
            Self::All => true,
            Self::Ids(ids) if ids.is_empty() => true,
            Self::Ids(ids) => match id {
                Some(id) => ids.iter().any(|candidate| candidate == id),
                None => false,
            },
        }
    }
}

// ============================================================================
// Event Payloads
// ============================================================================

/// Payload broadcast once per accepted drop.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropReceipt {
    /// Identity of the consumed draggable (always the original, never a
    /// derived clone id)
    pub drag_id: DragId,
    /// Identity of the accepting zone
    pub drop_id: DropId,
}

/// Structured view of a live draggable, read by the drop path.
///
/// Replaces attribute read-back from the visual node: zones resolve the
/// source's budget and declared classes through the registry instead of
/// the tree.
#[derive(Clone, Debug)]
pub struct DragSnapshot {
    /// Validated identity
    pub drag_id: DragId,
    /// Configured clone budget
    pub clone_drop_max: u32,
    /// Drops left before the original itself transfers
    pub clone_drop_remaining: u32,
    /// Full declarative config, used when re-binding a transferred clone
    pub config: DraggableConfig,
}

impl DragSnapshot {
    /// Declared destination allow-list; empty means any zone matches.
    pub fn allow_list(&self) -> &[DropId] {
        &self.config.drop_col_ids
    }
}
