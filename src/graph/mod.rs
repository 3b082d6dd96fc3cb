//! # Route Graph
//!
//! In-memory adjacency structure assembled from a store snapshot.
//!
//! The builder is a pure transformation: it validates the snapshot, interns
//! node names to dense indices, and produces
//!
//! - a position index: name → node (coordinates, flags, optional shelf summary)
//! - an adjacency index: node → `[(neighbor, weight)]`
//!
//! Edges are strictly the stored connections under [`NetworkModel::Directed`].
//! Dangling connection endpoints are rejected, never dropped.

use hashbrown::HashMap;
use smallvec::SmallVec;
use tracing::warn;

use crate::config::NetworkModel;
use crate::model::{Connection, Coordinates, WarehouseNode};
use crate::{Error, Result};

/// Outgoing edge in the adjacency index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    /// Index of the neighbor node.
    pub to: usize,
    pub weight: f64,
}

/// Read-only, request-private view of the warehouse network.
#[derive(Debug, Clone)]
pub struct RouteGraph {
    nodes: Vec<WarehouseNode>,
    index: HashMap<String, usize>,
    adjacency: Vec<SmallVec<[Edge; 4]>>,
    network: NetworkModel,
}

impl RouteGraph {
    /// Build from a node list and a connection list.
    ///
    /// Fails with [`Error::MalformedGraph`] on duplicate node names, on a
    /// connection whose endpoint is not in `nodes`, or on a negative or
    /// non-finite distance.
    pub fn build(
        nodes: Vec<WarehouseNode>,
        connections: &[Connection],
        network: NetworkModel,
    ) -> Result<Self> {
        let mut index = HashMap::with_capacity(nodes.len());
        for (i, node) in nodes.iter().enumerate() {
            if index.insert(node.name.clone(), i).is_some() {
                return Err(Error::MalformedGraph(format!(
                    "duplicate node name '{}'", node.name
                )));
            }
        }

        let mut graph = Self {
            adjacency: vec![SmallVec::new(); nodes.len()],
            nodes,
            index,
            network,
        };

        for conn in connections {
            let (from, to) = graph.resolve_endpoints(conn)?;
            if graph.edge_between(from, to).is_some() {
                warn!(from = %conn.from_node, to = %conn.to_node, "duplicate connection ignored");
                continue;
            }
            graph.adjacency[from].push(Edge { to, weight: conn.distance });
        }

        if network == NetworkModel::Bidirectional {
            for conn in connections {
                let (from, to) = graph.resolve_endpoints(conn)?;
                if graph.edge_between(to, from).is_none() {
                    graph.adjacency[to].push(Edge { to: from, weight: conn.distance });
                }
            }
        }

        Ok(graph)
    }

    fn resolve_endpoints(&self, conn: &Connection) -> Result<(usize, usize)> {
        if !conn.has_valid_distance() {
            return Err(Error::MalformedGraph(format!(
                "connection {} -> {} has invalid distance {}",
                conn.from_node, conn.to_node, conn.distance
            )));
        }
        let from = self.index_of(&conn.from_node).ok_or_else(|| {
            Error::MalformedGraph(format!(
                "connection {} -> {} references unknown node '{}'",
                conn.from_node, conn.to_node, conn.from_node
            ))
        })?;
        let to = self.index_of(&conn.to_node).ok_or_else(|| {
            Error::MalformedGraph(format!(
                "connection {} -> {} references unknown node '{}'",
                conn.from_node, conn.to_node, conn.to_node
            ))
        })?;
        Ok((from, to))
    }

    fn edge_between(&self, from: usize, to: usize) -> Option<&Edge> {
        self.adjacency[from].iter().find(|e| e.to == to)
    }

    // ========================================================================
    // Position index
    // ========================================================================

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Node at a dense index. Panics if out of range.
    pub fn node(&self, idx: usize) -> &WarehouseNode {
        &self.nodes[idx]
    }

    pub fn get(&self, name: &str) -> Option<&WarehouseNode> {
        self.index_of(name).map(|i| &self.nodes[i])
    }

    pub fn coordinates(&self, name: &str) -> Option<Coordinates> {
        self.get(name).map(|n| n.coordinates)
    }

    pub fn nodes(&self) -> &[WarehouseNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // ========================================================================
    // Adjacency index
    // ========================================================================

    pub fn neighbors(&self, idx: usize) -> &[Edge] {
        &self.adjacency[idx]
    }

    /// Weight of the directed edge `from -> to`, if present.
    pub fn edge_weight(&self, from: &str, to: &str) -> Option<f64> {
        let from = self.index_of(from)?;
        let to = self.index_of(to)?;
        self.edge_between(from, to).map(|e| e.weight)
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(|a| a.len()).sum()
    }

    pub fn network(&self) -> NetworkModel {
        self.network
    }

    // ========================================================================
    // Designated nodes
    // ========================================================================

    /// The home node. If several are flagged, the first in snapshot order wins.
    pub fn home(&self) -> Option<&WarehouseNode> {
        let mut homes = self.nodes.iter().filter(|n| n.is_home);
        let first = homes.next()?;
        let extra = homes.count();
        if extra > 0 {
            warn!(home = %first.name, extra, "multiple home nodes in snapshot");
        }
        Some(first)
    }

    /// The routing target named `tag`. Only nodes flagged `is_tag` qualify.
    pub fn tag_node(&self, tag: &str) -> Option<&WarehouseNode> {
        self.get(tag).filter(|n| n.is_tag)
    }
}
