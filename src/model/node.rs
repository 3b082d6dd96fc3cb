//! Warehouse location node.

use serde::{Deserialize, Serialize};
use super::ShelfId;

/// Planar coordinates of a node. `y` grows downward (screen convention).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coordinates {
    pub x: f64,
    pub y: f64,
}

impl Coordinates {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Straight-line distance to another point.
    pub fn distance_to(&self, other: &Coordinates) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    pub fn as_pair(&self) -> [f64; 2] {
        [self.x, self.y]
    }
}

/// Shelf summary attached to the node that hosts it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShelfSummary {
    pub id: ShelfId,
    pub name: String,
    pub tag: String,
    pub color: Option<String>,
    pub levels: u32,
    pub initial_height: f64,
    pub level_height: f64,
}

/// A named location in the warehouse graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WarehouseNode {
    pub name: String,
    pub coordinates: Coordinates,
    #[serde(default)]
    pub is_home: bool,
    #[serde(default)]
    pub is_tag: bool,
    #[serde(default)]
    pub tag_color: Option<String>,
    #[serde(default)]
    pub shelf: Option<ShelfSummary>,
}

impl WarehouseNode {
    pub fn new(name: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            name: name.into(),
            coordinates: Coordinates::new(x, y),
            is_home: false,
            is_tag: false,
            tag_color: None,
            shelf: None,
        }
    }

    pub fn home(mut self) -> Self {
        self.is_home = true;
        self
    }

    pub fn tag(mut self) -> Self {
        self.is_tag = true;
        self
    }

    pub fn with_tag_color(mut self, color: impl Into<String>) -> Self {
        self.tag_color = Some(color.into());
        self
    }

    pub fn with_shelf(mut self, shelf: ShelfSummary) -> Self {
        self.shelf = Some(shelf);
        self
    }

    pub fn shelf_id(&self) -> Option<ShelfId> {
        self.shelf.as_ref().map(|s| s.id)
    }
}
