//! Enrichment ordering under out-of-order store completion.

use std::time::Duration;

use async_trait::async_trait;
use pretty_assertions::assert_eq;
use warehouse_route::enrich::{enrich, shelf_detail};
use warehouse_route::instructions::generate;
use warehouse_route::model::BoxPlacement;
use warehouse_route::route::load_graph;
use warehouse_route::{
    MemoryStore, NewShelf, RouteConfig, RouteRequest, Router, Shelf, ShelfId, ShelfStore,
    WarehouseLayout, WarehouseNode,
};

/// Delays each shelf lookup so that higher ids complete first.
struct SlowShelves {
    inner: MemoryStore,
}

#[async_trait]
impl ShelfStore for SlowShelves {
    async fn shelf(&self, id: ShelfId) -> warehouse_route::Result<Option<Shelf>> {
        let delay = 60u64.saturating_sub(id.0 * 10);
        tokio::time::sleep(Duration::from_millis(delay)).await;
        self.inner.shelf(id).await
    }

    async fn box_by_tag(&self, tag: &str) -> warehouse_route::Result<Option<BoxPlacement>> {
        self.inner.box_by_tag(tag).await
    }
}

/// P0(home) -> P1 -> P2 -> P3 -> P4(tag), each hosting a shelf except P0.
fn corridor() -> MemoryStore {
    let store = MemoryStore::new();
    let mut layout = WarehouseLayout::default().node(WarehouseNode::new("P0", 0.0, 0.0).home());
    for i in 1..5 {
        let node = WarehouseNode::new(format!("P{i}"), i as f64, 0.0);
        layout = layout.node(if i == 4 { node.tag() } else { node });
        layout = layout.connect(&format!("P{}", i - 1), &format!("P{i}"), 1.0);
    }
    store.import_layout(layout).unwrap();

    for i in 1..5 {
        store
            .create_shelf(NewShelf {
                name: format!("Shelf-{i}"),
                tag: format!("S{i}"),
                color: None,
                levels: None,
                initial_height: 0.2,
                level_height: 0.4,
                location: format!("P{i}"),
            })
            .unwrap();
    }
    store
}

// ============================================================================
// 1. Path order survives reversed completion order
// ============================================================================

#[tokio::test]
async fn test_path_shelves_keep_path_order() {
    let store = corridor();
    let router = Router::with_stores(store.clone(), SlowShelves { inner: store });
    let route = router.route(&RouteRequest::new("P4")).await.unwrap();

    assert_eq!(route.path, vec!["P0", "P1", "P2", "P3", "P4"]);
    let nodes: Vec<&str> = route.path_shelves.iter().map(|p| p.node_name.as_str()).collect();
    assert_eq!(nodes, vec!["P1", "P2", "P3", "P4"]);
    let names: Vec<&str> = route.path_shelves.iter().map(|p| p.shelf.name.as_str()).collect();
    assert_eq!(names, vec!["Shelf-1", "Shelf-2", "Shelf-3", "Shelf-4"]);

    let per_step: Vec<Option<&str>> = route
        .instructions
        .iter()
        .map(|i| i.shelf.as_ref().map(|s| s.name.as_str()))
        .collect();
    assert_eq!(
        per_step,
        vec![Some("Shelf-1"), Some("Shelf-2"), Some("Shelf-3"), Some("Shelf-4")]
    );
    assert_eq!(route.destination_shelf.map(|s| s.name), Some("Shelf-4".to_string()));
}

#[tokio::test]
async fn test_enrich_aligns_with_inputs() {
    let store = corridor();
    let slow = SlowShelves { inner: store.clone() };
    let graph = load_graph(&store, &RouteConfig::default()).await.unwrap();
    let path: Vec<String> = (0..5).map(|i| format!("P{i}")).collect();
    let steps = generate(&path, &graph).unwrap();

    let enrichment = enrich(&slow, &graph, &path, &steps, None, "").await;

    assert_eq!(enrichment.path_shelves.len(), path.len());
    assert_eq!(enrichment.instruction_shelves.len(), steps.len());
    assert!(enrichment.path_shelves[0].is_none());
    for (i, shelf) in enrichment.path_shelves.iter().enumerate().skip(1) {
        assert_eq!(shelf.as_ref().map(|s| s.tag.clone()), Some(format!("S{i}")));
    }
    assert!(enrichment.destination_shelf.is_none());
    assert!(enrichment.matching_box.is_none());
}

// ============================================================================
// 2. Shelf detail
// ============================================================================

#[tokio::test]
async fn test_shelf_detail_lookup() {
    let store = corridor();
    assert!(shelf_detail(&store, None).await.is_none());
    assert!(shelf_detail(&store, Some(ShelfId(999))).await.is_none());

    let detail = shelf_detail(&store, Some(ShelfId(1))).await.unwrap();
    assert_eq!(detail.levels, 2);
    assert_eq!(detail.slots.len(), 2);
    assert_eq!(detail.capacity.available, 2);
    assert!(detail.slots.iter().all(|s| !s.is_occupied && s.stored.is_none()));
}
