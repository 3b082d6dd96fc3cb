//! Route enrichment: attach shelf, slot and box context to a computed route.
//!
//! All lookups are issued concurrently. Results are collected index-aligned
//! with their inputs (`join_all`), so output order follows the path and
//! instruction order no matter which lookup finishes first.
//!
//! Shelf context is supplementary: a failed or dangling lookup degrades that
//! one entry to `None` and never fails the route.

pub mod detail;

use futures::future::join_all;
use tracing::{debug, warn};

use crate::graph::RouteGraph;
use crate::model::{Instruction, ShelfId};
use crate::storage::ShelfStore;

pub use detail::{ShelfDetail, SlotDetail, BoxSummary, BoxDetail, Capacity, PathShelf};

/// Enrichment results, aligned with the inputs they were computed from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Enrichment {
    /// One entry per instruction: the shelf at its `to` node.
    pub instruction_shelves: Vec<Option<ShelfDetail>>,
    /// One entry per path node: the shelf hosted there.
    pub path_shelves: Vec<Option<ShelfDetail>>,
    pub destination_shelf: Option<ShelfDetail>,
    pub matching_box: Option<BoxDetail>,
}

impl Enrichment {
    /// Path shelves paired with their node names, nodes without a shelf dropped.
    pub fn visited_shelves(&self, path: &[String]) -> Vec<PathShelf> {
        path.iter()
            .zip(&self.path_shelves)
            .filter_map(|(name, shelf)| {
                shelf.clone().map(|shelf| PathShelf { node_name: name.clone(), shelf })
            })
            .collect()
    }
}

/// Resolve shelf details for every instruction and path node, the
/// destination's shelf, and the box tagged `target_tag`.
pub async fn enrich<S>(
    store: &S,
    graph: &RouteGraph,
    path: &[String],
    instructions: &[Instruction],
    destination: Option<ShelfId>,
    target_tag: &str,
) -> Enrichment
where
    S: ShelfStore + ?Sized,
{
    let instruction_lookups = join_all(
        instructions.iter().map(|step| shelf_detail(store, step.shelf_id)),
    );
    let path_lookups = join_all(path.iter().map(|name| {
        shelf_detail(store, graph.get(name).and_then(|node| node.shelf_id()))
    }));

    let (instruction_shelves, path_shelves, destination_shelf, matching_box) = futures::join!(
        instruction_lookups,
        path_lookups,
        shelf_detail(store, destination),
        find_matching_box(store, target_tag),
    );

    Enrichment { instruction_shelves, path_shelves, destination_shelf, matching_box }
}

/// Shelf detail for `id`, or `None` if there is no id, the shelf is gone,
/// or the store failed.
pub async fn shelf_detail<S>(store: &S, id: Option<ShelfId>) -> Option<ShelfDetail>
where
    S: ShelfStore + ?Sized,
{
    let id = id?;
    match store.shelf(id).await {
        Ok(Some(shelf)) => Some(ShelfDetail::from(&shelf)),
        Ok(None) => {
            debug!(shelf = %id, "shelf referenced by node no longer exists");
            None
        }
        Err(e) => {
            warn!(shelf = %id, error = %e, "shelf lookup failed; detail omitted");
            None
        }
    }
}

async fn find_matching_box<S>(store: &S, tag: &str) -> Option<BoxDetail>
where
    S: ShelfStore + ?Sized,
{
    match store.box_by_tag(tag).await {
        Ok(found) => found.as_ref().map(BoxDetail::from),
        Err(e) => {
            warn!(%tag, error = %e, "box lookup failed; matching box omitted");
            None
        }
    }
}
