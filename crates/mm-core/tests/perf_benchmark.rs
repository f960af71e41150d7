use mm_core::kurbo::Point;
use mm_core::{Scene, ViewTransform, emit_document, parse_document};
use std::time::Instant;

#[test]
#[ignore] // Run manually with `cargo test --test perf_benchmark -- --nocapture --ignored`
fn benchmark_large_document_load() {
    // A wide, shallow map: 500 roots with 100 children each
    let mut scene = Scene::new();
    for r in 0..500 {
        let root = scene.create_node(Point::new(r as f64 * 200.0, 0.0), "root", "#4CAF50", None);
        for c in 0..100 {
            let color = format!("#{:06X}", (r * 100 + c) & 0xFF_FFFF);
            scene.create_node(Point::new(0.0, c as f64 * 150.0), "child", color, Some(root));
        }
    }
    let json = emit_document(&scene, &ViewTransform::default()).expect("emit failed");

    let start = Instant::now();
    let doc = parse_document(&json).expect("parse failed");
    let duration = start.elapsed();

    assert_eq!(doc.scene.len(), 50_500);
    println!("Loaded 50,500 nodes ({} bytes) in {:?}", json.len(), duration);
}
