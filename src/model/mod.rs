//! # Warehouse Model
//!
//! Clean DTOs for the warehouse graph and its storage hierarchy.
//! These types cross every boundary: store ↔ graph builder ↔ search ↔ response.
//!
//! Design rule: this module is pure data with no I/O and no async.

pub mod node;
pub mod connection;
pub mod shelf;
pub mod instruction;

pub use node::{WarehouseNode, Coordinates, ShelfSummary};
pub use connection::Connection;
pub use shelf::{
    Shelf, Slot, StoredBox, Dimensions, BoxLocation, BoxPlacement,
    ShelfId, SlotId, BoxId,
};
pub use instruction::{Instruction, Movement};
