//! Shelf / slot / box storage hierarchy.
//!
//! A shelf owns one slot per level (levels are numbered from 1) and every slot
//! holds at most one box.

use serde::{Deserialize, Serialize};
use super::ShelfSummary;

/// Opaque shelf identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShelfId(pub u64);

/// Opaque slot identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotId(pub u64);

/// Opaque box identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BoxId(pub u64);

macro_rules! display_id {
    ($($t:ty),*) => {$(
        impl std::fmt::Display for $t {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    )*};
}

display_id!(ShelfId, SlotId, BoxId);

/// Physical box dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
}

/// A stored box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredBox {
    pub id: BoxId,
    pub name: String,
    /// Tag used for target lookups. Empty tags never match.
    pub tag: Option<String>,
    pub dimensions: Dimensions,
    pub weight: f64,
    pub color: String,
}

impl StoredBox {
    pub fn matches_tag(&self, tag: &str) -> bool {
        !tag.is_empty() && self.tag.as_deref() == Some(tag)
    }
}

/// One level of a shelf.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slot {
    pub id: SlotId,
    pub level: u32,
    pub stored: Option<StoredBox>,
}

impl Slot {
    pub fn empty(id: SlotId, level: u32) -> Self {
        Self { id, level, stored: None }
    }

    pub fn is_occupied(&self) -> bool {
        self.stored.is_some()
    }
}

/// A shelf with its slots ordered by level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shelf {
    pub id: ShelfId,
    pub name: String,
    pub tag: String,
    pub color: Option<String>,
    pub levels: u32,
    pub initial_height: f64,
    pub level_height: f64,
    /// Name of the node hosting this shelf.
    pub location: Option<String>,
    pub slots: Vec<Slot>,
}

impl Shelf {
    pub fn occupied_slots(&self) -> u32 {
        self.slots.iter().filter(|s| s.is_occupied()).count() as u32
    }

    pub fn slot_at(&self, level: u32) -> Option<&Slot> {
        self.slots.iter().find(|s| s.level == level)
    }

    pub fn summary(&self) -> ShelfSummary {
        ShelfSummary {
            id: self.id,
            name: self.name.clone(),
            tag: self.tag.clone(),
            color: self.color.clone(),
            levels: self.levels,
            initial_height: self.initial_height,
            level_height: self.level_height,
        }
    }
}

/// Where a box currently sits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxLocation {
    pub slot_id: SlotId,
    pub level: u32,
    pub shelf_id: ShelfId,
    pub shelf_name: String,
}

/// A box together with its location, as returned by tag lookups.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxPlacement {
    pub stored: StoredBox,
    pub location: Option<BoxLocation>,
}
