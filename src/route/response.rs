//! Request and response shapes of a route lookup.

use serde::{Deserialize, Serialize};

use crate::enrich::{BoxDetail, PathShelf, ShelfDetail};
use crate::model::{Instruction, WarehouseNode};
use crate::{Error, Result};

/// A route lookup: the tag to route to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteRequest {
    pub name: String,
}

impl RouteRequest {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Parse a JSON request body. Malformed bodies are [`Error::InvalidInput`].
    pub fn from_json(body: &str) -> Result<Self> {
        serde_json::from_str(body).map_err(|e| Error::InvalidInput(format!("request body: {e}")))
    }

    /// The target tag, if the request is well formed.
    pub fn target(&self) -> Result<&str> {
        if self.name.trim().is_empty() {
            return Err(Error::InvalidInput("name must be a non-empty string".into()));
        }
        Ok(&self.name)
    }
}

/// An instruction together with the shelf at its destination node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutedInstruction {
    #[serde(flatten)]
    pub step: Instruction,
    pub shelf: Option<ShelfDetail>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRef {
    pub name: String,
    pub coordinates: [f64; 2],
}

impl From<&WarehouseNode> for NodeRef {
    fn from(node: &WarehouseNode) -> Self {
        Self { name: node.name.clone(), coordinates: node.coordinates.as_pair() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetRef {
    pub name: String,
    pub coordinates: [f64; 2],
    pub has_shelf: bool,
}

impl From<&WarehouseNode> for TargetRef {
    fn from(node: &WarehouseNode) -> Self {
        Self {
            name: node.name.clone(),
            coordinates: node.coordinates.as_pair(),
            has_shelf: node.shelf.is_some(),
        }
    }
}

/// A computed route with its instructions and storage context.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteResult {
    pub path: Vec<String>,
    pub distance: f64,
    pub instructions: Vec<RoutedInstruction>,
    pub start_node: NodeRef,
    pub target_node: TargetRef,
    pub destination_shelf: Option<ShelfDetail>,
    pub matching_box: Option<BoxDetail>,
    /// Shelves along the path in path order; nodes without a shelf omitted.
    pub path_shelves: Vec<PathShelf>,
}

/// Body returned for a failed lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub code: String,
}

impl From<&Error> for ErrorBody {
    fn from(err: &Error) -> Self {
        Self { error: err.public_message(), code: err.code().to_string() }
    }
}

/// Status code plus JSON body, ready to hand to any HTTP layer.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteResponse {
    pub status: u16,
    pub body: serde_json::Value,
}
