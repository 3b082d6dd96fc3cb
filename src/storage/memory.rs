//! In-memory warehouse store.
//!
//! This is the reference implementation of `GraphStore` and `ShelfStore`.
//! It uses plain collections protected by RwLock behind an `Arc`, so clones
//! share the same data.
//!
//! ## Limitations
//!
//! - **Per-collection locks**: a layout import swaps nodes and connections
//!   under both write locks, but shelf writes are independent. Readers can
//!   observe a node snapshot and a shelf snapshot from different moments,
//!   which is exactly the inconsistency the route engine must tolerate.
//! - **Node ↔ shelf association** is derived from each shelf's location
//!   at read time; a shelf whose node was removed simply stops appearing.

use std::collections::{BTreeMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use parking_lot::RwLock;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::*;
use crate::{Error, Result};
use super::{GraphStore, ShelfStore};

const DEFAULT_LEVELS: u32 = 2;
const MAX_LEVELS: u32 = 10;

// ============================================================================
// Input records
// ============================================================================

/// Node as it appears in a bulk layout document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutNode {
    pub name: String,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub is_home: bool,
    #[serde(default)]
    pub is_tag: bool,
    #[serde(default)]
    pub tag_color: Option<String>,
}

impl From<LayoutNode> for WarehouseNode {
    fn from(n: LayoutNode) -> Self {
        WarehouseNode {
            name: n.name,
            coordinates: Coordinates::new(n.x, n.y),
            is_home: n.is_home,
            is_tag: n.is_tag,
            tag_color: n.tag_color,
            shelf: None,
        }
    }
}

/// A complete node + connection layout, replaced wholesale on import.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WarehouseLayout {
    pub nodes: Vec<LayoutNode>,
    pub connections: Vec<Connection>,
}

impl WarehouseLayout {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::InvalidInput(format!("layout: {e}")))
    }

    pub fn node(mut self, node: WarehouseNode) -> Self {
        self.nodes.push(LayoutNode {
            name: node.name,
            x: node.coordinates.x,
            y: node.coordinates.y,
            is_home: node.is_home,
            is_tag: node.is_tag,
            tag_color: node.tag_color,
        });
        self
    }

    pub fn connect(mut self, from: &str, to: &str, distance: f64) -> Self {
        self.connections.push(Connection::new(from, to, distance));
        self
    }

    fn validate(&self) -> Result<()> {
        let mut names = HashSet::with_capacity(self.nodes.len());
        for node in &self.nodes {
            if node.name.is_empty() {
                return Err(Error::ConstraintViolation("node name must not be empty".into()));
            }
            if !names.insert(node.name.as_str()) {
                return Err(Error::ConstraintViolation(format!(
                    "duplicate node name '{}'", node.name
                )));
            }
        }

        let mut pairs = HashSet::with_capacity(self.connections.len());
        for conn in &self.connections {
            for end in [&conn.from_node, &conn.to_node] {
                if !names.contains(end.as_str()) {
                    return Err(Error::ConstraintViolation(format!(
                        "connection {} -> {} references unknown node '{end}'",
                        conn.from_node, conn.to_node
                    )));
                }
            }
            if !conn.has_valid_distance() {
                return Err(Error::ConstraintViolation(format!(
                    "connection {} -> {} has invalid distance {}",
                    conn.from_node, conn.to_node, conn.distance
                )));
            }
            if !pairs.insert((conn.from_node.as_str(), conn.to_node.as_str())) {
                return Err(Error::ConstraintViolation(format!(
                    "duplicate connection {} -> {}",
                    conn.from_node, conn.to_node
                )));
            }
        }
        Ok(())
    }
}

/// Parameters for creating a shelf.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewShelf {
    pub name: String,
    pub tag: String,
    #[serde(default)]
    pub color: Option<String>,
    /// Defaults to 2.
    #[serde(default)]
    pub levels: Option<u32>,
    pub initial_height: f64,
    pub level_height: f64,
    /// Name of the hosting node.
    pub location: String,
}

/// Parameters for storing a box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewBox {
    pub name: String,
    #[serde(default)]
    pub tag: Option<String>,
    pub dimensions: Dimensions,
    pub weight: f64,
    pub color: String,
}

// ============================================================================
// MemoryStore
// ============================================================================

/// In-memory warehouse storage.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<MemoryInner>,
}

#[derive(Default)]
struct MemoryInner {
    /// Snapshot order is insertion order.
    nodes: RwLock<Vec<WarehouseNode>>,
    connections: RwLock<Vec<Connection>>,
    shelves: RwLock<BTreeMap<ShelfId, Shelf>>,
    next_shelf_id: AtomicU64,
    next_slot_id: AtomicU64,
    next_box_id: AtomicU64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all nodes and connections. Shelves are kept.
    pub fn import_layout(&self, layout: WarehouseLayout) -> Result<()> {
        layout.validate()?;
        let mut nodes = self.inner.nodes.write();
        let mut connections = self.inner.connections.write();
        *nodes = layout.nodes.into_iter().map(WarehouseNode::from).collect();
        *connections = layout.connections;
        debug!(nodes = nodes.len(), connections = connections.len(), "layout imported");
        Ok(())
    }

    /// Create a shelf hosted at an existing node, with empty slots `1..=levels`.
    pub fn create_shelf(&self, new: NewShelf) -> Result<ShelfId> {
        let levels = new.levels.unwrap_or(DEFAULT_LEVELS);
        if !(1..=MAX_LEVELS).contains(&levels) {
            return Err(Error::InvalidInput(format!(
                "levels must be between 1 and {MAX_LEVELS}, got {levels}"
            )));
        }
        if new.name.is_empty() || new.tag.is_empty() {
            return Err(Error::InvalidInput("shelf name and tag must not be empty".into()));
        }
        if !(new.initial_height > 0.0 && new.level_height > 0.0) {
            return Err(Error::InvalidInput("shelf heights must be positive".into()));
        }
        if !self.inner.nodes.read().iter().any(|n| n.name == new.location) {
            return Err(Error::NotFound(format!("Location {}", new.location)));
        }

        let mut shelves = self.inner.shelves.write();
        if shelves.values().any(|s| s.name == new.name) {
            return Err(Error::ConstraintViolation(format!(
                "shelf name '{}' already exists", new.name
            )));
        }
        if shelves.values().any(|s| s.location.as_deref() == Some(new.location.as_str())) {
            return Err(Error::ConstraintViolation(format!(
                "node '{}' already hosts a shelf", new.location
            )));
        }

        let id = ShelfId(self.inner.next_shelf_id.fetch_add(1, Ordering::Relaxed) + 1);
        let slots = (1..=levels)
            .map(|level| {
                let slot_id = self.inner.next_slot_id.fetch_add(1, Ordering::Relaxed) + 1;
                Slot::empty(SlotId(slot_id), level)
            })
            .collect();

        shelves.insert(id, Shelf {
            id,
            name: new.name,
            tag: new.tag,
            color: new.color,
            levels,
            initial_height: new.initial_height,
            level_height: new.level_height,
            location: Some(new.location),
            slots,
        });
        Ok(id)
    }

    /// Store a box in the slot at `level` of `shelf`. The slot must be empty.
    pub fn place_box(&self, shelf: ShelfId, level: u32, new: NewBox) -> Result<BoxId> {
        if new.name.is_empty() {
            return Err(Error::InvalidInput("box name must not be empty".into()));
        }
        let mut shelves = self.inner.shelves.write();
        let shelf = shelves
            .get_mut(&shelf)
            .ok_or_else(|| Error::NotFound(format!("Shelf {shelf}")))?;

        if level == 0 || level > shelf.levels {
            return Err(Error::InvalidInput(format!(
                "invalid level {level}; shelf only has {} levels", shelf.levels
            )));
        }
        let slot = shelf
            .slots
            .iter_mut()
            .find(|s| s.level == level)
            .ok_or_else(|| Error::NotFound(format!("Slot at level {level}")))?;
        if slot.is_occupied() {
            return Err(Error::ConstraintViolation(format!(
                "level {level} is already occupied"
            )));
        }

        let id = BoxId(self.inner.next_box_id.fetch_add(1, Ordering::Relaxed) + 1);
        slot.stored = Some(StoredBox {
            id,
            name: new.name,
            tag: new.tag.filter(|t| !t.is_empty()),
            dimensions: new.dimensions,
            weight: new.weight,
            color: new.color,
        });
        Ok(id)
    }

    /// Take a box out of its slot. Returns true if it existed.
    pub fn remove_box(&self, id: BoxId) -> Result<bool> {
        let mut shelves = self.inner.shelves.write();
        for shelf in shelves.values_mut() {
            for slot in &mut shelf.slots {
                if slot.stored.as_ref().is_some_and(|b| b.id == id) {
                    slot.stored = None;
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }

    /// Delete a shelf and everything on it. Returns true if it existed.
    pub fn delete_shelf(&self, id: ShelfId) -> Result<bool> {
        Ok(self.inner.shelves.write().remove(&id).is_some())
    }

    /// Drop every node, connection and shelf.
    pub fn clear(&self) {
        self.inner.nodes.write().clear();
        self.inner.connections.write().clear();
        self.inner.shelves.write().clear();
    }
}

// ============================================================================
// Store impls
// ============================================================================

#[async_trait]
impl GraphStore for MemoryStore {
    async fn nodes(&self) -> Result<Vec<WarehouseNode>> {
        let nodes = self.inner.nodes.read();
        let shelves = self.inner.shelves.read();
        Ok(nodes
            .iter()
            .map(|node| {
                let mut node = node.clone();
                node.shelf = shelves
                    .values()
                    .find(|s| s.location.as_deref() == Some(node.name.as_str()))
                    .map(Shelf::summary);
                node
            })
            .collect())
    }

    async fn connections(&self) -> Result<Vec<Connection>> {
        Ok(self.inner.connections.read().clone())
    }
}

#[async_trait]
impl ShelfStore for MemoryStore {
    async fn shelf(&self, id: ShelfId) -> Result<Option<Shelf>> {
        Ok(self.inner.shelves.read().get(&id).cloned())
    }

    async fn box_by_tag(&self, tag: &str) -> Result<Option<BoxPlacement>> {
        let shelves = self.inner.shelves.read();
        for shelf in shelves.values() {
            for slot in &shelf.slots {
                if let Some(stored) = slot.stored.as_ref().filter(|b| b.matches_tag(tag)) {
                    return Ok(Some(BoxPlacement {
                        stored: stored.clone(),
                        location: Some(BoxLocation {
                            slot_id: slot.id,
                            level: slot.level,
                            shelf_id: shelf.id,
                            shelf_name: shelf.name.clone(),
                        }),
                    }));
                }
            }
        }
        Ok(None)
    }
}

// ============================================================================
// Tests
// ============================================================================
