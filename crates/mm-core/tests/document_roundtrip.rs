//! Integration tests: scene → JSON → scene round-trip.
//!
//! Verifies that no data is lost when saving and re-loading a document,
//! and that older or partial documents still load.

use mm_core::kurbo::Point;
use mm_core::*;
use pretty_assertions::assert_eq;
use serde_json::Value;

// ─── Helpers ─────────────────────────────────────────────────────────────

/// A three-level tree with two roots and a panned, zoomed view.
fn sample() -> (Scene, ViewTransform) {
    let mut scene = Scene::new();
    let root = scene.create_node(Point::new(400.0, 120.0), "Launch plan", "#4CAF50", None);
    let design = scene.create_node(Point::new(250.0, 270.0), "Design", "#2196F3", Some(root));
    let build = scene.create_node(Point::new(550.0, 270.0), "Build", "#FFEB3B", Some(root));
    scene.create_node(Point::new(250.0, 420.0), "Mockups & copy", "#2196F3", Some(design));
    scene.create_node(Point::new(550.0, 420.0), "CI \"nightly\"", "#FFEB3B", Some(build));
    scene.create_node(Point::new(-80.25, 33.5), "Loose idea", "#9C27B0", None);
    scene.move_node(design, 12.75, -3.0);

    let mut view = ViewTransform::new(-35.5, 18.0, 1.0);
    view.zoom_at(Point::new(300.0, 200.0), 1.1);
    (scene, view)
}

fn emit(scene: &Scene, view: &ViewTransform) -> String {
    emit_document(scene, view).expect("emit failed")
}

// ─── Round-trip ──────────────────────────────────────────────────────────

#[test]
fn serialize_deserialize_serialize_is_stable() {
    let (scene, view) = sample();
    let first = emit(&scene, &view);
    let doc = parse_document(&first).expect("re-parse failed");
    let second = emit(&doc.scene, &doc.view);
    assert_eq!(first, second);
}

#[test]
fn roundtrip_preserves_nodes_and_links() {
    let (scene, view) = sample();
    let doc = parse_document(&emit(&scene, &view)).unwrap();

    assert_eq!(doc.scene.nodes(), scene.nodes());
    assert_eq!(doc.scene.connections(), scene.connections());
    assert_eq!(doc.view, view);
    assert_eq!(doc.scene.connections().len(), 4);
}

#[test]
fn loaded_scene_stays_editable() {
    let (scene, view) = sample();
    let mut doc = parse_document(&emit(&scene, &view)).unwrap();

    let root = doc.scene.nodes()[0].id;
    let extra = doc
        .scene
        .create_node(Point::new(0.0, 0.0), "Extra", "#000000", Some(root));
    assert!(doc.scene.get(root).unwrap().children.contains(&extra));

    let removed = doc.scene.delete_node(root);
    assert_eq!(removed.len(), 6);
    assert_eq!(doc.scene.len(), 1);
    assert!(doc.scene.connections().is_empty());
}

#[test]
fn document_shape_matches_format() {
    let (scene, view) = sample();
    let value: Value = serde_json::from_str(&emit(&scene, &view)).unwrap();

    let mut keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(keys, vec!["connections", "nodes", "offsetX", "offsetY", "scale"]);

    let first = &value["nodes"][0];
    for key in [
        "id", "x", "y", "text", "color", "width", "height", "parentId", "children",
    ] {
        assert!(first.get(key).is_some(), "node field {key} missing");
    }
    assert!(first["parentId"].is_null());
    assert_eq!(value["connections"][0]["parentId"], first["id"]);
}

// ─── Older documents ─────────────────────────────────────────────────────

#[test]
fn legacy_document_without_sizes_or_view() {
    let json = r##"{
        "nodes": [
            {"id": "1", "x": 0, "y": 0, "text": "A", "color": "#4CAF50", "parentId": null, "children": ["2"]},
            {"id": "2", "x": 0, "y": 150, "text": "B", "color": "#4CAF50", "parentId": "1"}
        ],
        "connections": [{"parentId": "1", "childId": "2"}]
    }"##;
    let doc = parse_document(json).unwrap();
    assert_eq!(doc.scene.len(), 2);
    assert!(doc.scene.nodes().iter().all(|n| n.width == 150.0 && n.height == 50.0));
    assert_eq!(doc.view, ViewTransform::default());

    let reemitted = emit(&doc.scene, &doc.view);
    let again = parse_document(&reemitted).unwrap();
    assert_eq!(again.scene.nodes(), doc.scene.nodes());
}
