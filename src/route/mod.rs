//! Route request handling.
//!
//! One request runs as:
//!
//! ```text
//! validate ─► fetch nodes ∥ connections ─► build graph
//!   ─► resolve target tag, home ─► shortest path ─► instructions
//!   ─► enrich (concurrent, order-preserving) ─► RouteResult
//! ```
//!
//! The only suspension points are store calls. Graph building, search and
//! instruction generation are synchronous and run on the calling task.

pub mod response;

use tracing::{debug, instrument};

use crate::config::RouteConfig;
use crate::enrich::enrich;
use crate::graph::RouteGraph;
use crate::instructions;
use crate::search::find_path_with;
use crate::storage::{GraphStore, ShelfStore};
use crate::{Error, Result};

pub use response::{
    RouteRequest, RouteResult, RoutedInstruction, NodeRef, TargetRef,
    ErrorBody, RouteResponse,
};

/// Fetch a consistent-enough snapshot of the network and build the graph.
pub async fn load_graph<G>(graphs: &G, config: &RouteConfig) -> Result<RouteGraph>
where
    G: GraphStore + ?Sized,
{
    let (nodes, connections) = futures::try_join!(graphs.nodes(), graphs.connections())?;
    RouteGraph::build(nodes, &connections, config.network)
}

/// Route from the home node to the node tagged `request.name`.
#[instrument(skip_all, fields(tag = %request.name))]
pub async fn handle<G, S>(
    graphs: &G,
    shelves: &S,
    config: &RouteConfig,
    request: &RouteRequest,
) -> Result<RouteResult>
where
    G: GraphStore + ?Sized,
    S: ShelfStore + ?Sized,
{
    let tag = request.target()?;
    let graph = load_graph(graphs, config).await?;
    debug!(nodes = graph.len(), edges = graph.edge_count(), "graph snapshot built");

    let target = graph
        .tag_node(tag)
        .ok_or_else(|| Error::TagNotFound(tag.to_string()))?;
    let home = graph.home().ok_or(Error::HomeNotConfigured)?;

    let found = find_path_with(&graph, &home.name, &target.name, config.heuristic)?;
    if !found.is_found() {
        return Err(Error::NoPathFound { from: home.name.clone(), to: target.name.clone() });
    }
    let steps = instructions::generate(&found.path, &graph)?;

    let enrichment = enrich(
        shelves,
        &graph,
        &found.path,
        &steps,
        target.shelf_id(),
        tag,
    )
    .await;

    let path_shelves = enrichment.visited_shelves(&found.path);
    let instructions = steps
        .into_iter()
        .zip(enrichment.instruction_shelves)
        .map(|(step, shelf)| RoutedInstruction { step, shelf })
        .collect();

    Ok(RouteResult {
        distance: found.cost,
        instructions,
        start_node: NodeRef::from(home),
        target_node: TargetRef::from(target),
        destination_shelf: enrichment.destination_shelf,
        matching_box: enrichment.matching_box,
        path_shelves,
        path: found.path,
    })
}
