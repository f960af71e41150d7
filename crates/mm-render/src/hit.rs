//! Hit testing: point → node lookup.
//!
//! Walks the node table in reverse creation order (last painted = topmost)
//! and returns the first node whose box contains the point, edges included.

use kurbo::Point;
use mm_core::{NodeId, Scene, ViewTransform};

/// Find the topmost node under a screen-space position.
/// Returns `None` if no node is hit (background).
pub fn find_node_at(scene: &Scene, view: &ViewTransform, screen: Point) -> Option<NodeId> {
    hit_test(scene, view.screen_to_world(screen))
}

/// Find the topmost node containing a world-space point.
pub fn hit_test(scene: &Scene, world: Point) -> Option<NodeId> {
    scene
        .nodes()
        .iter()
        .rev()
        .find(|node| node.contains_point(world))
        .map(|node| node.id)
}
