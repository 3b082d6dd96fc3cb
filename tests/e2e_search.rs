//! Shortest-path search against independently computed answers.
//!
//! Small random directed graphs are checked against an exhaustive
//! simple-path enumeration; the rest pin down edge cases.

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use warehouse_route::search::{find_path, find_path_with};
use warehouse_route::{
    Connection, Error, NetworkModel, RouteGraph, SearchHeuristic, WarehouseNode,
};

fn name(i: usize) -> String {
    format!("N{i}")
}

fn build(n: usize, edges: &[(usize, usize, u32)], network: NetworkModel) -> RouteGraph {
    let nodes = (0..n).map(|i| WarehouseNode::new(name(i), i as f64, 0.0)).collect();
    let connections: Vec<Connection> = edges
        .iter()
        .map(|&(a, b, w)| Connection::new(name(a), name(b), w as f64))
        .collect();
    RouteGraph::build(nodes, &connections, network).unwrap()
}

/// Minimum cost over every simple path, or None if unreachable.
fn brute_force(graph: &RouteGraph, start: usize, goal: usize) -> Option<f64> {
    fn walk(
        graph: &RouteGraph,
        at: usize,
        goal: usize,
        seen: &mut Vec<bool>,
        cost: f64,
        best: &mut Option<f64>,
    ) {
        if at == goal {
            *best = Some(best.map_or(cost, |b: f64| b.min(cost)));
            return;
        }
        for edge in graph.neighbors(at) {
            if !seen[edge.to] {
                seen[edge.to] = true;
                walk(graph, edge.to, goal, seen, cost + edge.weight, best);
                seen[edge.to] = false;
            }
        }
    }

    let mut seen = vec![false; graph.len()];
    seen[start] = true;
    let mut best = None;
    walk(graph, start, goal, &mut seen, 0.0, &mut best);
    best
}

fn path_cost(graph: &RouteGraph, path: &[String]) -> f64 {
    path.windows(2)
        .map(|pair| graph.edge_weight(&pair[0], &pair[1]).expect("path uses a missing edge"))
        .sum()
}

fn random_graph() -> impl Strategy<Value = (usize, Vec<(usize, usize, u32)>)> {
    (2usize..7).prop_flat_map(|n| {
        let edge = (0..n, 0..n, 0u32..20).prop_filter("no self loops", |(a, b, _)| a != b);
        (Just(n), prop::collection::vec(edge, 0..16))
    })
}

// ============================================================================
// 1. Optimality against exhaustive search
// ============================================================================

proptest! {
    #[test]
    fn prop_dijkstra_is_optimal((n, edges) in random_graph(), start in 0usize..7, goal in 0usize..7) {
        let graph = build(n, &edges, NetworkModel::Directed);
        let (start, goal) = (start % n, goal % n);
        let found = find_path(&graph, &name(start), &name(goal)).unwrap();

        match brute_force(&graph, start, goal) {
            Some(best) => {
                prop_assert_eq!(found.cost, best);
                prop_assert_eq!(found.path.first(), Some(&name(start)));
                prop_assert_eq!(found.path.last(), Some(&name(goal)));
                prop_assert_eq!(path_cost(&graph, &found.path), found.cost);
            }
            None => {
                prop_assert!(found.path.is_empty());
                prop_assert_eq!(found.cost, -1.0);
            }
        }
    }

    #[test]
    fn prop_bidirectional_search_is_symmetric((n, edges) in random_graph(), a in 0usize..7, b in 0usize..7) {
        let graph = build(n, &edges, NetworkModel::Bidirectional);
        let (a, b) = (a % n, b % n);
        let forward = find_path(&graph, &name(a), &name(b)).unwrap();
        let backward = find_path(&graph, &name(b), &name(a)).unwrap();
        prop_assert_eq!(forward.is_found(), backward.is_found());
        prop_assert_eq!(brute_force(&graph, a, b).unwrap_or(-1.0), forward.cost);
    }
}

// ============================================================================
// 2. Edge cases
// ============================================================================

#[test]
fn test_start_equals_goal() {
    let graph = build(3, &[(0, 1, 1)], NetworkModel::Directed);
    let found = find_path(&graph, "N2", "N2").unwrap();
    assert_eq!(found.path, vec!["N2"]);
    assert_eq!(found.cost, 0.0);
}

#[test]
fn test_unreachable() {
    let graph = build(3, &[(0, 1, 1), (2, 1, 1)], NetworkModel::Directed);
    let found = find_path(&graph, "N0", "N2").unwrap();
    assert!(found.path.is_empty());
    assert_eq!(found.cost, -1.0);
}

#[test]
fn test_unknown_endpoint() {
    let graph = build(2, &[(0, 1, 1)], NetworkModel::Directed);
    assert!(matches!(find_path(&graph, "N0", "Q"), Err(Error::NodeNotFound(_))));
    assert!(matches!(find_path(&graph, "Q", "N0"), Err(Error::NodeNotFound(_))));
}

#[test]
fn test_zero_weight_edges() {
    let graph = build(3, &[(0, 1, 0), (1, 2, 0), (0, 2, 1)], NetworkModel::Directed);
    let found = find_path(&graph, "N0", "N2").unwrap();
    assert_eq!(found.path, vec!["N0", "N1", "N2"]);
    assert_eq!(found.cost, 0.0);
}

// ============================================================================
// 3. A* agrees with Dijkstra
// ============================================================================

#[test]
fn test_astar_matches_dijkstra_on_grid() {
    // 4x4 grid, unit spacing, edges weighted by Euclidean length (admissible).
    let mut nodes = Vec::new();
    let mut connections = Vec::new();
    for y in 0..4 {
        for x in 0..4 {
            nodes.push(WarehouseNode::new(format!("G{x}{y}"), x as f64, y as f64));
            if x + 1 < 4 {
                connections.push(Connection::new(format!("G{x}{y}"), format!("G{}{y}", x + 1), 1.0));
            }
            if y + 1 < 4 {
                connections.push(Connection::new(format!("G{x}{y}"), format!("G{x}{}", y + 1), 1.0));
            }
        }
    }
    let graph = RouteGraph::build(nodes, &connections, NetworkModel::Bidirectional).unwrap();

    for (from, to) in [("G00", "G33"), ("G30", "G03"), ("G12", "G21"), ("G33", "G00")] {
        let dijkstra = find_path_with(&graph, from, to, SearchHeuristic::Zero).unwrap();
        let astar = find_path_with(&graph, from, to, SearchHeuristic::Euclidean).unwrap();
        assert_eq!(astar.cost, dijkstra.cost, "{from} -> {to}");
        assert_eq!(path_cost(&graph, &astar.path), astar.cost);
    }
}
