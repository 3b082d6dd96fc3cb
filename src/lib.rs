//! # warehouse-route - Route Planning for Warehouse Robots
//!
//! Finds the cheapest path from a warehouse's home location to a tagged
//! location and turns it into discrete robot movement commands, annotated
//! with the shelves and boxes met along the way.
//!
//! ## Design Principles
//!
//! 1. **Trait-first**: `GraphStore` and `ShelfStore` are the contract with storage
//! 2. **Snapshot-private state**: each request builds its own `RouteGraph`;
//!    nothing mutable is shared between requests (robot heading included)
//! 3. **One search**: Dijkstra and A* are the same routine with a different heuristic
//! 4. **Supplementary enrichment**: shelf lookups degrade to `null`, never fail a route
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use warehouse_route::{Router, RouteRequest, MemoryStore, WarehouseLayout, WarehouseNode};
//!
//! # async fn example() -> warehouse_route::Result<()> {
//! let store = MemoryStore::new();
//! store.import_layout(
//!     WarehouseLayout::default()
//!         .node(WarehouseNode::new("H", 0.0, 0.0).home())
//!         .node(WarehouseNode::new("TAG1", 3.0, 0.0).tag())
//!         .connect("H", "TAG1", 3.0),
//! )?;
//!
//! let router = Router::open_memory(store);
//! let route = router.route(&RouteRequest::new("TAG1")).await?;
//! for step in &route.instructions {
//!     println!("{} {} -> {}", step.step.instruction, step.step.from, step.step.to);
//! }
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod config;
pub mod storage;
pub mod graph;
pub mod search;
pub mod instructions;
pub mod enrich;
pub mod route;

// ============================================================================
// Re-exports: Model (the DTOs)
// ============================================================================

pub use model::{
    WarehouseNode, Coordinates, Connection, Shelf, Slot, StoredBox,
    Instruction, Movement, ShelfId, SlotId, BoxId,
};

// ============================================================================
// Re-exports: Storage, config, engine
// ============================================================================

pub use storage::{GraphStore, ShelfStore, MemoryStore, WarehouseLayout, NewShelf, NewBox};
pub use config::{RouteConfig, NetworkModel, SearchHeuristic};
pub use graph::RouteGraph;
pub use search::PathResult;
pub use instructions::Heading;
pub use enrich::{ShelfDetail, BoxDetail, PathShelf};
pub use route::{RouteRequest, RouteResult, RouteResponse, ErrorBody};

use tracing::{debug, error, info, warn};

// ============================================================================
// Top-level Router handle
// ============================================================================

/// The primary entry point. A `Router` wraps the two stores and answers
/// route lookups against them.
pub struct Router<G: GraphStore, S: ShelfStore> {
    graphs: G,
    shelves: S,
    config: RouteConfig,
}

impl<G: GraphStore, S: ShelfStore> Router<G, S> {
    /// Create a Router over the given stores with the default configuration.
    pub fn with_stores(graphs: G, shelves: S) -> Self {
        Self { graphs, shelves, config: RouteConfig::default() }
    }

    pub fn with_config(mut self, config: RouteConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &RouteConfig {
        &self.config
    }

    /// Route from home to the node tagged `request.name`.
    ///
    /// Internal faults are logged here with full context; callers should
    /// only expose [`Error::public_message`].
    pub async fn route(&self, request: &RouteRequest) -> Result<RouteResult> {
        let result = route::handle(&self.graphs, &self.shelves, &self.config, request).await;
        match &result {
            Ok(route) => info!(
                tag = %request.name,
                hops = route.instructions.len(),
                distance = route.distance,
                "route computed"
            ),
            Err(e) if e.category() == ErrorCategory::ServerError => {
                error!(tag = %request.name, code = e.code(), error = %e, "route request failed")
            }
            Err(e) if e.category().is_operator_fault() => {
                warn!(tag = %request.name, code = e.code(), error = %e, "warehouse not set up for routing")
            }
            Err(e) => debug!(tag = %request.name, code = e.code(), error = %e, "route request rejected"),
        }
        result
    }

    /// Cheapest path between two named nodes on the current snapshot, using
    /// the configured network model and heuristic.
    pub async fn find_path(&self, from: &str, to: &str) -> Result<PathResult> {
        let graph = route::load_graph(&self.graphs, &self.config).await?;
        search::find_path_with(&graph, from, to, self.config.heuristic)
    }

    /// Handle a raw JSON request body and produce a status code and JSON body.
    pub async fn respond(&self, body: &str) -> RouteResponse {
        let outcome = match RouteRequest::from_json(body) {
            Ok(request) => self.route(&request).await,
            Err(e) => Err(e),
        };
        let serialized =
            outcome.and_then(|route| serde_json::to_value(&route).map_err(Error::from));

        match serialized {
            Ok(body) => RouteResponse { status: 200, body },
            Err(e) => {
                if matches!(e, Error::Serialization(_)) {
                    error!(error = %e, "route response could not be serialized");
                }
                let body = serde_json::to_value(ErrorBody::from(&e))
                    .unwrap_or(serde_json::Value::Null);
                RouteResponse { status: e.category().status_code(), body }
            }
        }
    }

    /// Access the graph store (for advanced use).
    pub fn graph_store(&self) -> &G {
        &self.graphs
    }

    /// Access the shelf store (for advanced use).
    pub fn shelf_store(&self) -> &S {
        &self.shelves
    }
}

/// Router over a single in-memory store serving both roles.
impl Router<MemoryStore, MemoryStore> {
    pub fn open_memory(store: MemoryStore) -> Self {
        Self::with_stores(store.clone(), store)
    }
}

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Tag node \"{0}\" not found.")]
    TagNotFound(String),

    #[error("Home node not found.")]
    HomeNotConfigured,

    #[error("No path found from {from} to {to}.")]
    NoPathFound { from: String, to: String },

    #[error("Node not found: {0}")]
    NodeNotFound(String),

    #[error("Malformed graph: {0}")]
    MalformedGraph(String),

    #[error("Path node without position: {0}")]
    InvalidPathNode(String),

    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Who is at fault, and how it should be reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Bad request from the caller.
    ClientError,
    /// Warehouse data is not set up for routing.
    ConfigError,
    /// The requested thing does not exist or is unreachable.
    NotFound,
    /// Internal or storage fault; details are logged, not returned.
    ServerError,
}

impl ErrorCategory {
    /// Faults the caller cannot fix by changing the request.
    pub fn is_operator_fault(self) -> bool {
        matches!(self, ErrorCategory::ConfigError | ErrorCategory::ServerError)
    }

    pub fn status_code(self) -> u16 {
        match self {
            ErrorCategory::ClientError => 400,
            ErrorCategory::NotFound => 404,
            ErrorCategory::ConfigError | ErrorCategory::ServerError => 500,
        }
    }
}

impl Error {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            Error::InvalidInput(_) => "INVALID_INPUT",
            Error::TagNotFound(_) => "TAG_NOT_FOUND",
            Error::HomeNotConfigured => "HOME_NOT_CONFIGURED",
            Error::NoPathFound { .. } => "NO_PATH_FOUND",
            Error::NodeNotFound(_) => "NODE_NOT_FOUND",
            Error::MalformedGraph(_) => "MALFORMED_GRAPH",
            Error::InvalidPathNode(_) => "INVALID_PATH_NODE",
            Error::StoreUnavailable(_) => "STORE_UNAVAILABLE",
            Error::NotFound(_) => "NOT_FOUND",
            Error::ConstraintViolation(_) => "CONSTRAINT_VIOLATION",
            Error::Serialization(_) => "INTERNAL_ERROR",
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::InvalidInput(_)
            | Error::TagNotFound(_)
            | Error::ConstraintViolation(_) => ErrorCategory::ClientError,
            Error::HomeNotConfigured => ErrorCategory::ConfigError,
            Error::NoPathFound { .. }
            | Error::NodeNotFound(_)
            | Error::NotFound(_) => ErrorCategory::NotFound,
            Error::MalformedGraph(_)
            | Error::InvalidPathNode(_)
            | Error::StoreUnavailable(_)
            | Error::Serialization(_) => ErrorCategory::ServerError,
        }
    }

    /// Message safe to return to a caller. Server faults collapse to a
    /// generic message.
    pub fn public_message(&self) -> String {
        match self.category() {
            ErrorCategory::ServerError => "Internal server error".to_string(),
            _ => self.to_string(),
        }
    }
}
