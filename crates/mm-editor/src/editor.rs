//! The editor controller: one document, one view, one selection.
//!
//! The editor owns all mutable state. Gestures are turned into
//! [`SceneMutation`]s by the pointer tool; commands (add, edit, delete,
//! clear, save, load) build the same mutations directly. Everything is
//! applied through [`Editor::apply_mutation`].

use crate::host::Host;
use crate::input::InputEvent;
use crate::mutation::SceneMutation;
use crate::tools::{Drag, SelectTool, Tool};
use kurbo::{Point, Size};
use mm_core::model::Node;
use mm_core::{
    DocumentError, EditorConfig, NodeId, Scene, ViewTransform, emit_document, parse_document,
};
use mm_render::{ExportFrame, RenderTheme, Surface, export_svg, find_node_at, render_export};

const CLEAR_PROMPT: &str = "Are you sure you want to clear the entire mind map?";

pub struct Editor {
    scene: Scene,
    view: ViewTransform,
    /// Held by id and resolved on use.
    selected: Option<NodeId>,
    tool: SelectTool,
    config: EditorConfig,
    /// Canvas size in screen pixels.
    viewport: Size,
}

impl Editor {
    pub fn new(config: EditorConfig, viewport: Size) -> Self {
        Self {
            scene: Scene::new(),
            view: ViewTransform::default(),
            selected: None,
            tool: SelectTool::new(&config),
            config,
            viewport,
        }
    }

    // ─── Accessors ───────────────────────────────────────────────────────

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn view(&self) -> &ViewTransform {
        &self.view
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    pub fn selected(&self) -> Option<NodeId> {
        self.selected
    }

    pub fn selected_node(&self) -> Option<&Node> {
        self.selected.and_then(|id| self.scene.get(id))
    }

    /// The gesture in progress, if any.
    pub fn drag(&self) -> Option<Drag> {
        self.tool.drag()
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.viewport = Size::new(width, height);
    }

    // ─── Mutations ───────────────────────────────────────────────────────

    /// Apply one mutation. Returns whether anything changed.
    pub fn apply_mutation(&mut self, mutation: SceneMutation) -> bool {
        if mutation.touches_document() {
            log::debug!("apply {mutation:?}");
        } else {
            log::trace!("apply {mutation:?}");
        }
        match mutation {
            SceneMutation::Select { id } => {
                let id = id.filter(|id| self.scene.contains(*id));
                let changed = self.selected != id;
                self.selected = id;
                changed
            }
            SceneMutation::MoveNode { id, dx, dy } => self.scene.move_node(id, dx, dy),
            SceneMutation::Pan { dx, dy } => {
                self.view.pan(dx, dy);
                true
            }
            SceneMutation::Zoom { x, y, factor } => {
                let applied = self.view.zoom_at(Point::new(x, y), factor);
                if !applied {
                    log::debug!("zoom step rejected at scale {}", self.view.scale());
                }
                applied
            }
            SceneMutation::AddRoot { x, y } => {
                let id = self.scene.create_node(
                    Point::new(x, y),
                    self.config.root_text.clone(),
                    self.config.node_color.clone(),
                    None,
                );
                self.selected = Some(id);
                true
            }
            SceneMutation::AddChild { parent } => {
                let Some(p) = self.scene.get(parent) else {
                    log::warn!("cannot add child: {parent} not found");
                    return false;
                };
                let at = Point::new(p.x, p.y + self.config.child_offset);
                let color = p.color.clone();
                let id = self.scene.create_node(
                    at,
                    self.config.child_text.clone(),
                    color,
                    Some(parent),
                );
                self.selected = Some(id);
                true
            }
            SceneMutation::EditNode { id, text, color } => {
                let text = if text.is_empty() {
                    self.config.untitled_text.as_str()
                } else {
                    text.as_str()
                };
                self.scene.set_label(id, text, &color)
            }
            SceneMutation::DeleteNode { id } => {
                let removed = self.scene.delete_node(id);
                if self.selected.is_some_and(|sel| removed.contains(&sel)) {
                    self.selected = None;
                }
                if let Some(Drag::Node { id: dragged, .. }) = self.tool.drag()
                    && removed.contains(&dragged)
                {
                    self.tool.cancel();
                }
                !removed.is_empty()
            }
            SceneMutation::Clear => {
                self.scene.clear();
                self.view = ViewTransform::default();
                self.selected = None;
                self.tool.cancel();
                true
            }
        }
    }

    fn apply_all(&mut self, mutations: Vec<SceneMutation>) -> bool {
        mutations
            .into_iter()
            .fold(false, |changed, m| self.apply_mutation(m) | changed)
    }

    fn open_selected<H: Host + ?Sized>(&self, host: &mut H) {
        if let Some(node) = self.selected_node() {
            host.open_editor(node);
        }
    }

    // ─── Input ───────────────────────────────────────────────────────────

    /// Route one input event. Returns whether the canvas needs a redraw.
    pub fn handle<H: Host + ?Sized>(&mut self, event: &InputEvent, host: &mut H) -> bool {
        match *event {
            InputEvent::DoubleClick { x, y } => {
                let screen = Point::new(x, y);
                match find_node_at(&self.scene, &self.view, screen) {
                    Some(id) => {
                        self.apply_mutation(SceneMutation::Select { id: Some(id) });
                    }
                    None => {
                        let world = self.view.screen_to_world(screen);
                        self.apply_mutation(SceneMutation::AddRoot {
                            x: world.x,
                            y: world.y,
                        });
                    }
                }
                self.open_selected(host);
                true
            }
            InputEvent::PointerDown { .. } => {
                let hit = event
                    .position()
                    .and_then(|p| find_node_at(&self.scene, &self.view, p));
                let mutations = self.tool.handle(event, hit, self.view.scale());
                self.apply_all(mutations);
                // Always repaint: the selection highlight may have moved.
                true
            }
            _ => {
                let mutations = self.tool.handle(event, None, self.view.scale());
                self.apply_all(mutations)
            }
        }
    }

    // ─── Commands ────────────────────────────────────────────────────────

    /// Create a root node at the center of the viewport and open its editor.
    pub fn add_node<H: Host + ?Sized>(&mut self, host: &mut H) -> Option<NodeId> {
        let center = Point::new(self.viewport.width / 2.0, self.viewport.height / 2.0);
        let world = self.view.screen_to_world(center);
        self.apply_mutation(SceneMutation::AddRoot {
            x: world.x,
            y: world.y,
        });
        self.open_selected(host);
        self.selected
    }

    /// Create a child below the selected node and open its editor.
    /// Does nothing without a selection.
    pub fn add_child<H: Host + ?Sized>(&mut self, host: &mut H) -> Option<NodeId> {
        let parent = self.selected?;
        if !self.apply_mutation(SceneMutation::AddChild { parent }) {
            return None;
        }
        self.open_selected(host);
        self.selected
    }

    /// Apply the node editor form to the selected node.
    pub fn edit_selected(&mut self, text: &str, color: &str) -> bool {
        let Some(id) = self.selected else {
            return false;
        };
        self.apply_mutation(SceneMutation::EditNode {
            id,
            text: text.to_string(),
            color: color.to_string(),
        })
    }

    /// Delete the selected node and its subtree. Returns how many nodes went.
    pub fn delete_selected(&mut self) -> usize {
        let Some(id) = self.selected else {
            return 0;
        };
        let before = self.scene.len();
        self.apply_mutation(SceneMutation::DeleteNode { id });
        before - self.scene.len()
    }

    /// Empty the map after the user confirms.
    pub fn clear<H: Host + ?Sized>(&mut self, host: &mut H) -> bool {
        if !host.confirm(CLEAR_PROMPT) {
            return false;
        }
        log::info!("clearing {} nodes", self.scene.len());
        self.apply_mutation(SceneMutation::Clear)
    }

    // ─── Persistence ─────────────────────────────────────────────────────

    pub fn to_json(&self) -> Result<String, DocumentError> {
        emit_document(&self.scene, &self.view)
    }

    /// Serialize and hand the document to the host's save prompt.
    pub fn save<H: Host + ?Sized>(&self, host: &mut H) -> bool {
        let json = match self.to_json() {
            Ok(json) => json,
            Err(e) => {
                log::error!("save failed: {e}");
                host.report_error(&format!("Error saving file: {e}"));
                return false;
            }
        };
        match host.save_file(json.as_bytes(), &self.config.file_name) {
            Ok(()) => {
                log::info!("saved {} nodes ({} bytes)", self.scene.len(), json.len());
                true
            }
            Err(e) => {
                log::warn!("host could not save: {e}");
                false
            }
        }
    }

    /// Replace the document with `json`. On error nothing changes.
    pub fn load_json(&mut self, json: &str) -> Result<(), DocumentError> {
        let doc = parse_document(json)?;
        log::info!(
            "loaded {} nodes, {} connections",
            doc.scene.len(),
            doc.scene.connections().len()
        );
        self.scene = doc.scene;
        self.view = doc.view;
        self.selected = None;
        self.tool.cancel();
        Ok(())
    }

    /// Complete a file-open prompt. `None` means the user cancelled.
    /// Errors go to the host and leave the current document in place.
    pub fn finish_load<H: Host + ?Sized>(&mut self, bytes: Option<&[u8]>, host: &mut H) -> bool {
        let Some(bytes) = bytes else {
            log::debug!("load cancelled");
            return false;
        };
        let json = match std::str::from_utf8(bytes) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("rejected document: {e}");
                host.report_error(&format!("Error loading file: {e}"));
                return false;
            }
        };
        match self.load_json(json) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("rejected document: {e}");
                host.report_error(&format!("Error loading file: {e}"));
                false
            }
        }
    }

    // ─── Rendering ───────────────────────────────────────────────────────

    /// Draw the live view.
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S, theme: &RenderTheme) {
        mm_render::render_scene(surface, &self.scene, &self.view, self.selected, theme);
    }

    /// The print page for the current map, or `None` when it is empty.
    pub fn export_frame(&self) -> Option<ExportFrame> {
        ExportFrame::for_scene(&self.scene, self.config.export_padding)
    }

    /// Draw the print export onto `surface` (sized from the returned frame).
    /// The live view and selection are left alone.
    pub fn export<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        theme: &RenderTheme,
    ) -> Option<ExportFrame> {
        let frame = self.export_frame()?;
        log::info!("export {}x{}", frame.width(), frame.height());
        render_export(surface, &self.scene, &frame, theme);
        Some(frame)
    }

    pub fn export_svg(&self, theme: &RenderTheme) -> Option<String> {
        export_svg(&self.scene, self.config.export_padding, theme)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::RecordingHost;

    fn editor() -> Editor {
        Editor::new(EditorConfig::default(), Size::new(800.0, 600.0))
    }

    #[test]
    fn add_node_lands_in_viewport_center() {
        let mut ed = editor();
        let mut host = RecordingHost::new();
        ed.apply_mutation(SceneMutation::Pan { dx: 100.0, dy: 0.0 });

        let id = ed.add_node(&mut host).unwrap();
        let node = ed.scene().get(id).unwrap();
        assert_eq!((node.x, node.y), (300.0, 300.0));
        assert_eq!(node.text, "New Node");
        assert_eq!(node.color, "#4CAF50");
        assert_eq!(ed.selected(), Some(id));
        assert_eq!(host.opened, vec![id.to_string()]);
    }

    #[test]
    fn add_child_inherits_color_and_sits_below() {
        let mut ed = editor();
        let mut host = RecordingHost::new();
        let root = ed.add_node(&mut host).unwrap();
        ed.edit_selected("Topic", "#FF5722");

        let child = ed.add_child(&mut host).unwrap();
        let node = ed.scene().get(child).unwrap();
        assert_eq!(node.parent_id, Some(root));
        assert_eq!(node.color, "#FF5722");
        assert_eq!(node.text, "New Child");
        assert_eq!((node.x, node.y), (400.0, 450.0));
        assert_eq!(ed.selected(), Some(child));
    }

    #[test]
    fn add_child_without_selection_is_noop() {
        let mut ed = editor();
        let mut host = RecordingHost::new();
        assert_eq!(ed.add_child(&mut host), None);
        assert!(ed.scene().is_empty());
        assert!(host.opened.is_empty());
    }

    #[test]
    fn empty_edit_falls_back_to_untitled() {
        let mut ed = editor();
        let mut host = RecordingHost::new();
        let id = ed.add_node(&mut host).unwrap();
        assert!(ed.edit_selected("", "#000000"));
        let node = ed.scene().get(id).unwrap();
        assert_eq!(node.text, "Untitled");
        assert_eq!(node.color, "#000000");
    }

    #[test]
    fn deleting_ancestor_of_selection_clears_it() {
        let mut ed = editor();
        let mut host = RecordingHost::new();
        let root = ed.add_node(&mut host).unwrap();
        let child = ed.add_child(&mut host).unwrap();
        assert_eq!(ed.selected(), Some(child));

        assert!(ed.apply_mutation(SceneMutation::DeleteNode { id: root }));
        assert_eq!(ed.selected(), None);
        assert!(ed.scene().is_empty());
    }

    #[test]
    fn select_ignores_unknown_ids() {
        let mut ed = editor();
        ed.apply_mutation(SceneMutation::Select {
            id: Some(NodeId::intern("not-in-scene")),
        });
        assert_eq!(ed.selected(), None);
    }

    #[test]
    fn clear_needs_confirmation() {
        let mut ed = editor();
        let mut host = RecordingHost::new();
        ed.add_node(&mut host);
        ed.apply_mutation(SceneMutation::Zoom {
            x: 0.0,
            y: 0.0,
            factor: 1.1,
        });

        host.confirm_answer = false;
        assert!(!ed.clear(&mut host));
        assert_eq!(ed.scene().len(), 1);

        host.confirm_answer = true;
        assert!(ed.clear(&mut host));
        assert!(ed.scene().is_empty());
        assert_eq!(ed.selected(), None);
        assert_eq!(*ed.view(), ViewTransform::default());
        assert_eq!(host.confirmations.len(), 2);
    }
}
