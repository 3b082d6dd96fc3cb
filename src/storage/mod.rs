//! # Store Contracts
//!
//! The route engine reads from two collaborators it does not own:
//!
//! | Trait | Supplies |
//! |-------|----------|
//! | `GraphStore` | full node and connection snapshot |
//! | `ShelfStore` | shelf detail by id, box by tag |
//!
//! Both are assumed eventually consistent and independently queryable: a
//! shelf referenced by a node may be gone by the time it is looked up, and
//! callers must tolerate that rather than fail.
//!
//! ## Implementations
//!
//! | Store | Module | Description |
//! |-------|--------|-------------|
//! | `MemoryStore` | `memory` | In-memory for testing/embedding |

pub mod memory;

use async_trait::async_trait;
use crate::model::*;
use crate::Result;

pub use memory::{MemoryStore, WarehouseLayout, NewShelf, NewBox};

// ============================================================================
// GraphStore Trait
// ============================================================================

/// Read access to the warehouse network.
///
/// I/O failures should be reported as `Error::StoreUnavailable`.
#[async_trait]
pub trait GraphStore: Send + Sync + 'static {
    /// Every node, each with the summary of the shelf it hosts (if any).
    async fn nodes(&self) -> Result<Vec<WarehouseNode>>;

    /// Every directed connection.
    async fn connections(&self) -> Result<Vec<Connection>>;
}

// ============================================================================
// ShelfStore Trait
// ============================================================================

/// Read access to shelves, slots and boxes.
#[async_trait]
pub trait ShelfStore: Send + Sync + 'static {
    /// A shelf with its slots (ordered by level) and their boxes.
    /// Returns None if not found.
    async fn shelf(&self, id: ShelfId) -> Result<Option<Shelf>>;

    /// The first box whose tag equals `tag`, with its current location.
    async fn box_by_tag(&self, tag: &str) -> Result<Option<BoxPlacement>>;
}
