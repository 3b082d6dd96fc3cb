//! Shortest-path search over a [`RouteGraph`].
//!
//! One search routine serves every consumer. The heuristic is a parameter:
//! [`SearchHeuristic::Zero`] gives Dijkstra, [`SearchHeuristic::Euclidean`]
//! gives A*. Both run over the same adjacency index, so they agree on the
//! network model chosen when the graph was built.
//!
//! Ties between frontier entries of equal priority are broken by ascending
//! node name, which makes the result independent of hash or insertion order.
//! On relaxation the first strictly shorter predecessor is kept.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use serde::{Deserialize, Serialize};

use crate::config::SearchHeuristic;
use crate::graph::RouteGraph;
use crate::{Error, Result};

/// Result of a search. An unreachable goal yields an empty path and cost −1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathResult {
    pub path: Vec<String>,
    pub cost: f64,
}

impl PathResult {
    pub fn not_found() -> Self {
        Self { path: Vec::new(), cost: -1.0 }
    }

    pub fn is_found(&self) -> bool {
        !self.path.is_empty()
    }

    /// Number of edges along the path.
    pub fn hops(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

/// Frontier entry. `BinaryHeap` is a max-heap, so ordering is reversed.
#[derive(Debug, Clone, Copy)]
struct Frontier {
    priority: f64,
    rank: usize,
    node: usize,
}

impl PartialEq for Frontier {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Frontier {}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .priority
            .total_cmp(&self.priority)
            .then_with(|| other.rank.cmp(&self.rank))
    }
}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Lexicographic rank of every node name, indexed by node index.
fn name_ranks(graph: &RouteGraph) -> Vec<usize> {
    let mut order: Vec<usize> = (0..graph.len()).collect();
    order.sort_by(|a, b| graph.node(*a).name.cmp(&graph.node(*b).name));
    let mut ranks = vec![0; graph.len()];
    for (rank, idx) in order.into_iter().enumerate() {
        ranks[idx] = rank;
    }
    ranks
}

/// Dijkstra from `start` to `goal`.
pub fn find_path(graph: &RouteGraph, start: &str, goal: &str) -> Result<PathResult> {
    find_path_with(graph, start, goal, SearchHeuristic::Zero)
}

/// Minimum-cost path from `start` to `goal` using the given heuristic.
///
/// Fails with [`Error::NodeNotFound`] if either endpoint is not in the graph.
/// `start == goal` is a valid zero-cost path of one node.
pub fn find_path_with(
    graph: &RouteGraph,
    start: &str,
    goal: &str,
    heuristic: SearchHeuristic,
) -> Result<PathResult> {
    let s = graph
        .index_of(start)
        .ok_or_else(|| Error::NodeNotFound(start.to_string()))?;
    let g = graph
        .index_of(goal)
        .ok_or_else(|| Error::NodeNotFound(goal.to_string()))?;

    if s == g {
        return Ok(PathResult { path: vec![start.to_string()], cost: 0.0 });
    }

    let n = graph.len();
    let ranks = name_ranks(graph);
    let goal_pos = graph.node(g).coordinates;
    let estimate = |idx: usize| match heuristic {
        SearchHeuristic::Zero => 0.0,
        SearchHeuristic::Euclidean => graph.node(idx).coordinates.distance_to(&goal_pos),
    };

    let mut dist = vec![f64::INFINITY; n];
    let mut prev: Vec<Option<usize>> = vec![None; n];
    let mut settled = vec![false; n];
    let mut heap = BinaryHeap::new();

    dist[s] = 0.0;
    heap.push(Frontier { priority: estimate(s), rank: ranks[s], node: s });

    while let Some(Frontier { node, .. }) = heap.pop() {
        if settled[node] {
            continue;
        }
        settled[node] = true;
        if node == g {
            break;
        }

        for edge in graph.neighbors(node) {
            if settled[edge.to] {
                continue;
            }
            let alt = dist[node] + edge.weight;
            if alt < dist[edge.to] {
                dist[edge.to] = alt;
                prev[edge.to] = Some(node);
                heap.push(Frontier {
                    priority: alt + estimate(edge.to),
                    rank: ranks[edge.to],
                    node: edge.to,
                });
            }
        }
    }

    if !dist[g].is_finite() {
        return Ok(PathResult::not_found());
    }

    // Walk predecessors back from the goal; the chain must end at start.
    let mut path = vec![g];
    let mut current = g;
    while let Some(p) = prev[current] {
        path.push(p);
        current = p;
        if path.len() > n {
            break;
        }
    }
    if current != s {
        return Ok(PathResult::not_found());
    }

    path.reverse();
    Ok(PathResult {
        path: path.into_iter().map(|i| graph.node(i).name.clone()).collect(),
        cost: dist[g],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NetworkModel;
    use crate::model::{Connection, WarehouseNode};

    fn graph(conns: &[Connection], network: NetworkModel) -> RouteGraph {
        let nodes = vec![
            WarehouseNode::new("A", 0.0, 0.0),
            WarehouseNode::new("B", 1.0, 0.0),
            WarehouseNode::new("C", 1.0, 1.0),
            WarehouseNode::new("D", 0.0, 1.0),
        ];
        RouteGraph::build(nodes, conns, network).unwrap()
    }

    #[test]
    fn test_same_node() {
        let g = graph(&[], NetworkModel::Directed);
        let r = find_path(&g, "B", "B").unwrap();
        assert_eq!(r.path, vec!["B"]);
        assert_eq!(r.cost, 0.0);
    }

    #[test]
    fn test_simple_chain() {
        let g = graph(
            &[Connection::new("A", "B", 5.0), Connection::new("B", "C", 5.0)],
            NetworkModel::Directed,
        );
        let r = find_path(&g, "A", "C").unwrap();
        assert_eq!(r.path, vec!["A", "B", "C"]);
        assert_eq!(r.cost, 10.0);
        assert_eq!(r.hops(), 2);
    }

    #[test]
    fn test_prefers_cheaper_detour() {
        let g = graph(
            &[
                Connection::new("A", "C", 10.0),
                Connection::new("A", "B", 2.0),
                Connection::new("B", "C", 3.0),
            ],
            NetworkModel::Directed,
        );
        let r = find_path(&g, "A", "C").unwrap();
        assert_eq!(r.path, vec!["A", "B", "C"]);
        assert_eq!(r.cost, 5.0);
    }

    #[test]
    fn test_direction_matters() {
        let g = graph(&[Connection::new("A", "B", 1.0)], NetworkModel::Directed);
        let r = find_path(&g, "B", "A").unwrap();
        assert!(!r.is_found());
        assert_eq!(r.cost, -1.0);

        let g = graph(&[Connection::new("A", "B", 1.0)], NetworkModel::Bidirectional);
        let r = find_path(&g, "B", "A").unwrap();
        assert_eq!(r.path, vec!["B", "A"]);
    }

    #[test]
    fn test_unknown_endpoint() {
        let g = graph(&[], NetworkModel::Directed);
        assert!(matches!(find_path(&g, "A", "Q"), Err(Error::NodeNotFound(n)) if n == "Q"));
        assert!(matches!(find_path(&g, "Q", "A"), Err(Error::NodeNotFound(_))));
    }

    #[test]
    fn test_cycle_is_safe() {
        let g = graph(
            &[
                Connection::new("A", "B", 1.0),
                Connection::new("B", "A", 1.0),
                Connection::new("B", "D", 4.0),
            ],
            NetworkModel::Directed,
        );
        let r = find_path(&g, "A", "D").unwrap();
        assert_eq!(r.path, vec!["A", "B", "D"]);
        assert_eq!(r.cost, 5.0);
    }

    #[test]
    fn test_tie_break_by_name() {
        // A->B->C and A->D->C both cost 2; B sorts before D.
        let g = graph(
            &[
                Connection::new("A", "D", 1.0),
                Connection::new("A", "B", 1.0),
                Connection::new("D", "C", 1.0),
                Connection::new("B", "C", 1.0),
            ],
            NetworkModel::Directed,
        );
        let r = find_path(&g, "A", "C").unwrap();
        assert_eq!(r.path, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_astar_agrees_with_dijkstra() {
        let conns = [
            Connection::new("A", "B", 1.0),
            Connection::new("B", "C", 1.0),
            Connection::new("A", "D", 1.0),
            Connection::new("D", "C", 3.0),
        ];
        let g = graph(&conns, NetworkModel::Directed);
        let d = find_path_with(&g, "A", "C", SearchHeuristic::Zero).unwrap();
        let a = find_path_with(&g, "A", "C", SearchHeuristic::Euclidean).unwrap();
        assert_eq!(d, a);
    }
}
