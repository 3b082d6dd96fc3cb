//! Shelf and box detail views attached to a route.

use serde::{Deserialize, Serialize};
use crate::model::*;

/// Slot occupancy summary for a shelf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Capacity {
    pub total: u32,
    pub occupied: u32,
    pub available: u32,
    pub is_full: bool,
}

impl Capacity {
    /// `total` is the shelf's declared level count. A store that reports more
    /// occupied slots than levels yields `available == 0` rather than wrapping.
    pub fn of(shelf: &Shelf) -> Self {
        let total = shelf.levels;
        let occupied = shelf.occupied_slots();
        let available = total.saturating_sub(occupied);
        Self { total, occupied, available, is_full: available == 0 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxSummary {
    pub id: BoxId,
    pub tag: Option<String>,
    pub name: String,
    pub dimensions: Dimensions,
    pub weight: f64,
    pub color: String,
}

impl From<&StoredBox> for BoxSummary {
    fn from(b: &StoredBox) -> Self {
        Self {
            id: b.id,
            tag: b.tag.clone(),
            name: b.name.clone(),
            dimensions: b.dimensions,
            weight: b.weight,
            color: b.color.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotDetail {
    pub id: SlotId,
    pub level: u32,
    pub is_occupied: bool,
    #[serde(rename = "box")]
    pub stored: Option<BoxSummary>,
}

/// Full shelf view: identity, capacity, and slots ordered by level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShelfDetail {
    pub id: ShelfId,
    pub name: String,
    pub tag: String,
    pub color: Option<String>,
    pub initial_height: f64,
    pub slot_height: f64,
    pub levels: u32,
    pub capacity: Capacity,
    pub slots: Vec<SlotDetail>,
}

impl From<&Shelf> for ShelfDetail {
    fn from(shelf: &Shelf) -> Self {
        let mut slots: Vec<SlotDetail> = shelf
            .slots
            .iter()
            .map(|slot| SlotDetail {
                id: slot.id,
                level: slot.level,
                is_occupied: slot.is_occupied(),
                stored: slot.stored.as_ref().map(BoxSummary::from),
            })
            .collect();
        slots.sort_by_key(|s| s.level);

        Self {
            id: shelf.id,
            name: shelf.name.clone(),
            tag: shelf.tag.clone(),
            color: shelf.color.clone(),
            initial_height: shelf.initial_height,
            slot_height: shelf.level_height,
            levels: shelf.levels,
            capacity: Capacity::of(shelf),
            slots,
        }
    }
}

/// The box matching the requested tag, with where it currently sits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxDetail {
    #[serde(flatten)]
    pub summary: BoxSummary,
    pub location: Option<BoxLocation>,
}

impl From<&BoxPlacement> for BoxDetail {
    fn from(p: &BoxPlacement) -> Self {
        Self {
            summary: BoxSummary::from(&p.stored),
            location: p.location.clone(),
        }
    }
}

/// Shelf found at a node along the path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathShelf {
    pub node_name: String,
    pub shelf: ShelfDetail,
}
