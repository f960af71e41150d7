//! Scene → surface drawing commands.
//!
//! Draw order is fixed: every connection first, then every node in
//! creation order, so nodes always cover the curves running into them.
//! The same [`draw_scene`] serves the live view and the print export;
//! only the transform and the selection differ.

use crate::surface::Surface;
use crate::text::{contrast_color, wrap_text};
use kurbo::{Affine, BezPath, Point, Shape};
use mm_core::{NodeId, Scene, ViewTransform};
use mm_core::model::Node;

/// Colors and metrics used by the renderer.
#[derive(Debug, Clone)]
pub struct RenderTheme {
    pub node_stroke: &'static str,
    pub node_stroke_width: f64,
    pub selected_stroke: &'static str,
    pub selected_stroke_width: f64,
    pub corner_radius: f64,
    pub edge_color: &'static str,
    pub edge_width: f64,
    /// Vertical distance of the curve control points from each endpoint.
    pub curve_offset: f64,
    pub arrow_length: f64,
    /// Half-angle of the arrowhead, in radians.
    pub arrow_spread: f64,
    pub font: &'static str,
    pub line_height: f64,
    /// Horizontal space reserved inside the node box (both sides together).
    pub text_padding: f64,
    pub dark_text: &'static str,
    pub light_text: &'static str,
}

impl Default for RenderTheme {
    fn default() -> Self {
        Self {
            node_stroke: "#2c3e50",
            node_stroke_width: 2.0,
            selected_stroke: "#3498db",
            selected_stroke_width: 3.0,
            corner_radius: 20.0,
            edge_color: "#666",
            edge_width: 2.0,
            curve_offset: 50.0,
            arrow_length: 10.0,
            arrow_spread: std::f64::consts::FRAC_PI_6,
            font: "14px Arial",
            line_height: 18.0,
            text_padding: 20.0,
            dark_text: "#000000",
            light_text: "#ffffff",
        }
    }
}

/// Render one frame of the live view: clear, then draw the scene under
/// the current pan/zoom, highlighting `selected`.
pub fn render_scene<S: Surface + ?Sized>(
    surface: &mut S,
    scene: &Scene,
    view: &ViewTransform,
    selected: Option<NodeId>,
    theme: &RenderTheme,
) {
    surface.clear();
    draw_scene(surface, scene, view.affine(), selected, theme);
}

/// Draw all connections, then all nodes, under `transform`.
pub fn draw_scene<S: Surface + ?Sized>(
    surface: &mut S,
    scene: &Scene,
    transform: Affine,
    selected: Option<NodeId>,
    theme: &RenderTheme,
) {
    log::trace!(
        "draw {} nodes, {} connections",
        scene.len(),
        scene.connections().len()
    );
    surface.set_transform(transform);

    for conn in scene.connections() {
        // Connections with a missing endpoint are skipped
        let (Some(parent), Some(child)) = (scene.get(conn.parent_id), scene.get(conn.child_id))
        else {
            continue;
        };
        draw_connection(surface, parent, child, theme);
    }

    surface.set_font(theme.font);
    for node in scene.nodes() {
        draw_node(surface, node, selected == Some(node.id), theme);
    }
}

// ─── Connections ────────────────────────────────────────────────────────────

/// Cubic from the parent's bottom-center to the child's top-center.
/// Control points sit `offset` below the start and `offset` above the end,
/// giving the same S-shape whatever the relative positions.
pub fn connection_path(parent: &Node, child: &Node, offset: f64) -> BezPath {
    let start = parent.bottom_center();
    let end = child.top_center();
    let mut path = BezPath::new();
    path.move_to(start);
    path.curve_to(
        Point::new(start.x, start.y + offset),
        Point::new(end.x, end.y - offset),
        end,
    );
    path
}

/// Closed arrowhead with its tip at `tip`, pointing along `angle`.
pub fn arrowhead(tip: Point, angle: f64, length: f64, spread: f64) -> BezPath {
    let mut path = BezPath::new();
    path.move_to(tip);
    path.line_to(Point::new(
        tip.x - length * (angle - spread).cos(),
        tip.y - length * (angle - spread).sin(),
    ));
    path.line_to(Point::new(
        tip.x - length * (angle + spread).cos(),
        tip.y - length * (angle + spread).sin(),
    ));
    path.close_path();
    path
}

fn draw_connection<S: Surface + ?Sized>(
    surface: &mut S,
    parent: &Node,
    child: &Node,
    theme: &RenderTheme,
) {
    let curve = connection_path(parent, child, theme.curve_offset);
    surface.stroke_path(&curve, theme.edge_color, theme.edge_width);

    // Tangent at the end runs from the second control point to the tip.
    let tip = child.top_center();
    let control = Point::new(tip.x, tip.y - theme.curve_offset);
    let angle = (tip.y - control.y).atan2(tip.x - control.x);
    let head = arrowhead(tip, angle, theme.arrow_length, theme.arrow_spread);
    surface.fill_path(&head, theme.edge_color);
}

// ─── Nodes ──────────────────────────────────────────────────────────────────

/// The node outline: its box with rounded corners.
pub fn node_outline(node: &Node, radius: f64) -> BezPath {
    let radius = radius.min(node.width / 2.0).min(node.height / 2.0).max(0.0);
    node.rect().to_rounded_rect(radius).to_path(0.1)
}

fn draw_node<S: Surface + ?Sized>(
    surface: &mut S,
    node: &Node,
    is_selected: bool,
    theme: &RenderTheme,
) {
    let outline = node_outline(node, theme.corner_radius);
    surface.fill_path(&outline, &node.color);
    if is_selected {
        surface.stroke_path(&outline, theme.selected_stroke, theme.selected_stroke_width);
    } else {
        surface.stroke_path(&outline, theme.node_stroke, theme.node_stroke_width);
    }

    let max_width = node.width - theme.text_padding;
    let lines = wrap_text(&node.text, max_width, |s| surface.measure_text(s));
    if lines.is_empty() {
        return;
    }

    let color = contrast_color(&node.color, theme.dark_text, theme.light_text);
    let mut y = node.y - (lines.len() - 1) as f64 * theme.line_height / 2.0;
    for line in &lines {
        surface.fill_text(line, Point::new(node.x, y), color);
        y += theme.line_height;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DisplayList, DrawOp};
    use kurbo::PathEl;
    use mm_core::Connection;
    use pretty_assertions::assert_eq;

    fn two_level() -> (Scene, NodeId, NodeId) {
        let mut scene = Scene::new();
        let a = scene.create_node(Point::new(0.0, 0.0), "Parent", "#4CAF50", None);
        let b = scene.create_node(Point::new(100.0, 150.0), "Child", "#2c3e50", Some(a));
        (scene, a, b)
    }

    #[test]
    fn connections_are_drawn_before_nodes() {
        let (scene, _, _) = two_level();
        let mut list = DisplayList::new();
        render_scene(&mut list, &scene, &ViewTransform::default(), None, &RenderTheme::default());

        assert_eq!(list.ops[0], DrawOp::Clear);
        assert!(matches!(list.ops[1], DrawOp::Transform(_)));
        // curve stroke, then arrow fill, before any node fill
        match (&list.ops[2], &list.ops[3]) {
            (DrawOp::Stroke { color: c1, .. }, DrawOp::Fill { color: c2, .. }) => {
                assert_eq!(c1, "#666");
                assert_eq!(c2, "#666");
            }
            other => panic!("unexpected ops {other:?}"),
        }
        assert_eq!(list.texts(), vec!["Parent", "Child"]);
    }

    #[test]
    fn connection_curve_uses_fixed_offsets() {
        let (scene, a, b) = two_level();
        let path = connection_path(scene.get(a).unwrap(), scene.get(b).unwrap(), 50.0);
        let els = path.elements();
        assert_eq!(els[0], PathEl::MoveTo(Point::new(0.0, 25.0)));
        assert_eq!(
            els[1],
            PathEl::CurveTo(
                Point::new(0.0, 75.0),
                Point::new(100.0, 75.0),
                Point::new(100.0, 125.0)
            )
        );
    }

    #[test]
    fn arrowhead_points_down_into_child() {
        let tip = Point::new(0.0, 0.0);
        let head = arrowhead(tip, std::f64::consts::FRAC_PI_2, 10.0, std::f64::consts::FRAC_PI_6);
        let els = head.elements();
        assert_eq!(els.len(), 4);
        for el in &els[1..3] {
            let PathEl::LineTo(p) = el else {
                panic!("expected line, got {el:?}")
            };
            // both barbs trail above the tip
            assert!(p.y < 0.0);
            assert!((p.distance(tip) - 10.0).abs() < 1e-9);
        }
    }

    #[test]
    fn selected_node_gets_highlight_stroke() {
        let (scene, a, _) = two_level();
        let mut list = DisplayList::new();
        render_scene(&mut list, &scene, &ViewTransform::default(), Some(a), &RenderTheme::default());
        let strokes = list.strokes();
        assert_eq!(strokes, vec![("#666", 2.0), ("#3498db", 3.0), ("#2c3e50", 2.0)]);
    }

    #[test]
    fn label_color_contrasts_with_fill() {
        let (scene, _, _) = two_level();
        let mut list = DisplayList::new();
        render_scene(&mut list, &scene, &ViewTransform::default(), None, &RenderTheme::default());
        let colors: Vec<&str> = list
            .ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { color, .. } => Some(color.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(colors, vec!["#000000", "#ffffff"]);
    }

    #[test]
    fn wrapped_label_is_vertically_centered() {
        let mut scene = Scene::new();
        // 130 units of room at 7 per char: three lines
        scene.create_node(
            Point::new(0.0, 100.0),
            "alpha beta gamma delta epsilon zeta eta",
            "#ffffff",
            None,
        );
        let mut list = DisplayList::new();
        render_scene(&mut list, &scene, &ViewTransform::default(), None, &RenderTheme::default());

        let ys: Vec<f64> = list
            .ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { at, .. } => Some(at.y),
                _ => None,
            })
            .collect();
        assert_eq!(ys, vec![82.0, 100.0, 118.0]);
    }

    #[test]
    fn orphan_connection_is_skipped() {
        let mut a = Node::new(NodeId::intern("orphan-parent"), Point::ZERO, "A", "#fff");
        a.children.push(NodeId::intern("missing-child"));
        let scene = Scene::from_parts(
            vec![a],
            vec![Connection {
                parent_id: NodeId::intern("orphan-parent"),
                child_id: NodeId::intern("missing-child"),
            }],
        )
        .unwrap();

        let mut list = DisplayList::new();
        render_scene(&mut list, &scene, &ViewTransform::default(), None, &RenderTheme::default());
        // only the node's own stroke
        assert_eq!(list.strokes(), vec![("#2c3e50", 2.0)]);
    }

    #[test]
    fn view_transform_is_applied() {
        let (scene, _, _) = two_level();
        let view = ViewTransform::new(40.0, -10.0, 2.0);
        let mut list = DisplayList::new();
        render_scene(&mut list, &scene, &view, None, &RenderTheme::default());
        assert_eq!(list.ops[1], DrawOp::Transform(view.affine()));
    }
}
