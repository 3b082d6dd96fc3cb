//! Route planning configuration.

use serde::{Deserialize, Serialize};
use crate::{Error, Result};

/// How connections are interpreted when the route graph is built.
///
/// The choice is made once, in the graph builder, so every search
/// strategy sees the same network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NetworkModel {
    /// Each connection is traversable only from `from_node` to `to_node`.
    #[default]
    Directed,
    /// Each connection also implies its reverse, unless the reverse is
    /// stored explicitly (the explicit weight wins).
    Bidirectional,
}

/// Heuristic used by the shortest-path search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchHeuristic {
    /// No heuristic: plain Dijkstra.
    #[default]
    Zero,
    /// Straight-line distance to the goal: A*.
    ///
    /// Only admissible when every edge weight is at least the Euclidean
    /// distance between its endpoints; otherwise results may be suboptimal.
    Euclidean,
}

/// Configuration for a [`Router`](crate::Router).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteConfig {
    pub network: NetworkModel,
    pub heuristic: SearchHeuristic,
}

impl RouteConfig {
    pub fn with_network(mut self, network: NetworkModel) -> Self {
        self.network = network;
        self
    }

    pub fn with_heuristic(mut self, heuristic: SearchHeuristic) -> Self {
        self.heuristic = heuristic;
        self
    }

    /// Load from a JSON document. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| Error::InvalidInput(format!("route config: {e}")))
    }
}
