//! Tool system for canvas interactions.
//!
//! A tool translates input events into `SceneMutation` values that the
//! editor applies. The mind map has a single pointer tool: press on a node
//! to select and drag it, press on empty canvas to pan, wheel to zoom.

use crate::input::InputEvent;
use crate::mutation::SceneMutation;
use kurbo::Point;
use mm_core::{EditorConfig, NodeId};

/// Trait for tools that handle input and produce mutations.
pub trait Tool {
    /// Handle an input event, returning zero or more mutations.
    ///
    /// `hit_node` is the node under the pointer (pointer-down only) and
    /// `scale` the current zoom, needed to turn screen deltas into world
    /// deltas.
    fn handle(
        &mut self,
        event: &InputEvent,
        hit_node: Option<NodeId>,
        scale: f64,
    ) -> Vec<SceneMutation>;
}

/// What the pointer is dragging between press and release.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Drag {
    Node { id: NodeId, last: Point },
    Pan { last: Point },
}

// ─── Select Tool ─────────────────────────────────────────────────────────

pub struct SelectTool {
    /// Active gesture. `None` between gestures.
    drag: Option<Drag>,
    zoom_in_factor: f64,
    zoom_out_factor: f64,
}

impl Default for SelectTool {
    fn default() -> Self {
        Self::new(&EditorConfig::default())
    }
}

impl SelectTool {
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            drag: None,
            zoom_in_factor: config.zoom_in_factor,
            zoom_out_factor: config.zoom_out_factor,
        }
    }

    pub fn drag(&self) -> Option<Drag> {
        self.drag
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Drop any gesture in progress (e.g. the dragged node was deleted).
    pub fn cancel(&mut self) {
        self.drag = None;
    }
}

impl Tool for SelectTool {
    fn handle(
        &mut self,
        event: &InputEvent,
        hit_node: Option<NodeId>,
        scale: f64,
    ) -> Vec<SceneMutation> {
        if event.ends_gesture() {
            self.drag = None;
            return vec![];
        }
        match *event {
            InputEvent::PointerDown { x, y } => {
                let last = Point::new(x, y);
                match hit_node {
                    Some(id) => {
                        self.drag = Some(Drag::Node { id, last });
                        vec![SceneMutation::Select { id: Some(id) }]
                    }
                    None => {
                        self.drag = Some(Drag::Pan { last });
                        vec![SceneMutation::Select { id: None }]
                    }
                }
            }
            InputEvent::PointerMove { x, y } => {
                let now = Point::new(x, y);
                match &mut self.drag {
                    Some(Drag::Node { id, last }) => {
                        let delta = (now - *last) / scale;
                        *last = now;
                        vec![SceneMutation::MoveNode {
                            id: *id,
                            dx: delta.x,
                            dy: delta.y,
                        }]
                    }
                    Some(Drag::Pan { last }) => {
                        let delta = now - *last;
                        *last = now;
                        vec![SceneMutation::Pan {
                            dx: delta.x,
                            dy: delta.y,
                        }]
                    }
                    None => vec![],
                }
            }
            InputEvent::Wheel { x, y, delta_y } => {
                let factor = if delta_y < 0.0 {
                    self.zoom_in_factor
                } else if delta_y > 0.0 {
                    self.zoom_out_factor
                } else {
                    return vec![];
                };
                vec![SceneMutation::Zoom { x, y, factor }]
            }
            // Double click is a command, handled by the editor.
            InputEvent::DoubleClick { .. }
            | InputEvent::PointerUp { .. }
            | InputEvent::PointerLeave => vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn down(x: f64, y: f64) -> InputEvent {
        InputEvent::PointerDown { x, y }
    }

    fn moved(x: f64, y: f64) -> InputEvent {
        InputEvent::PointerMove { x, y }
    }

    #[test]
    fn press_on_node_selects_and_drags() {
        let mut tool = SelectTool::default();
        let id = NodeId::intern("tool-drag");

        let out = tool.handle(&down(10.0, 10.0), Some(id), 2.0);
        assert_eq!(out, vec![SceneMutation::Select { id: Some(id) }]);

        // screen delta (20, -10) at scale 2 → world (10, -5)
        let out = tool.handle(&moved(30.0, 0.0), None, 2.0);
        assert_eq!(
            out,
            vec![SceneMutation::MoveNode {
                id,
                dx: 10.0,
                dy: -5.0
            }]
        );

        // deltas are incremental
        let out = tool.handle(&moved(32.0, 0.0), None, 2.0);
        assert_eq!(
            out,
            vec![SceneMutation::MoveNode {
                id,
                dx: 1.0,
                dy: 0.0
            }]
        );
    }

    #[test]
    fn press_on_empty_canvas_pans_in_screen_units() {
        let mut tool = SelectTool::default();
        let out = tool.handle(&down(0.0, 0.0), None, 3.0);
        assert_eq!(out, vec![SceneMutation::Select { id: None }]);

        let out = tool.handle(&moved(15.0, 5.0), None, 3.0);
        assert_eq!(out, vec![SceneMutation::Pan { dx: 15.0, dy: 5.0 }]);
    }

    #[test]
    fn release_clears_drag_state() {
        let mut tool = SelectTool::default();
        tool.handle(&down(0.0, 0.0), Some(NodeId::intern("tool-up")), 1.0);
        assert!(tool.is_dragging());
        tool.handle(&InputEvent::PointerUp { x: 0.0, y: 0.0 }, None, 1.0);
        assert!(!tool.is_dragging());
        assert!(tool.handle(&moved(50.0, 50.0), None, 1.0).is_empty());
    }

    #[test]
    fn leave_ends_gesture() {
        let mut tool = SelectTool::default();
        tool.handle(&down(0.0, 0.0), None, 1.0);
        tool.handle(&InputEvent::PointerLeave, None, 1.0);
        assert_eq!(tool.drag(), None);
        assert!(tool.handle(&moved(5.0, 5.0), None, 1.0).is_empty());
    }

    #[test]
    fn move_without_press_does_nothing() {
        let mut tool = SelectTool::default();
        assert!(tool.handle(&moved(5.0, 5.0), None, 1.0).is_empty());
    }

    #[test]
    fn wheel_direction_picks_factor() {
        let mut tool = SelectTool::default();
        let wheel = |delta_y| InputEvent::Wheel {
            x: 100.0,
            y: 50.0,
            delta_y,
        };
        assert_eq!(
            tool.handle(&wheel(-3.0), None, 1.0),
            vec![SceneMutation::Zoom {
                x: 100.0,
                y: 50.0,
                factor: 1.1
            }]
        );
        assert_eq!(
            tool.handle(&wheel(3.0), None, 1.0),
            vec![SceneMutation::Zoom {
                x: 100.0,
                y: 50.0,
                factor: 0.9
            }]
        );
        assert!(tool.handle(&wheel(0.0), None, 1.0).is_empty());
    }
}
