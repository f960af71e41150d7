//! WASM bridge for the mind map editor, exposing the Rust editor to JavaScript.
//!
//! Compiled via `wasm-pack build --target web`. The page owns the buttons,
//! the node editor form and the file dialogs; it forwards canvas events
//! here, calls `render` when a handler returns `true`, and polls the
//! `take_*` methods for requests the editor made of it.

mod render2d;

use kurbo::Size;
use mm_core::EditorConfig;
use mm_core::model::Node;
use mm_editor::{Editor, Host, InputEvent};
use mm_render::RenderTheme;
use render2d::Canvas2dSurface;
use wasm_bindgen::prelude::*;
use web_sys::CanvasRenderingContext2d;

/// Set up logging and the panic hook once the module is instantiated.
#[wasm_bindgen(start)]
pub fn start() {
    let _ = console_log::init_with_level(log::Level::Debug);
    console_error_panic_hook::set_once();
    log::info!("mind map wasm ready");
}

// ─── Host side ───────────────────────────────────────────────────────────

/// Requests the editor made during one call, picked up by JS afterwards.
#[derive(Default)]
struct PendingHost {
    /// Answer for the next `confirm`, supplied by JS with the call.
    confirmed: bool,
    save: Option<String>,
    error: Option<String>,
    open_editor: Option<String>,
}

impl Host for PendingHost {
    fn save_file(&mut self, bytes: &[u8], _file_name: &str) -> Result<(), String> {
        let json = std::str::from_utf8(bytes).map_err(|e| e.to_string())?;
        self.save = Some(json.to_string());
        Ok(())
    }

    fn confirm(&mut self, _message: &str) -> bool {
        std::mem::take(&mut self.confirmed)
    }

    fn report_error(&mut self, message: &str) {
        self.error = Some(message.to_string());
    }

    fn open_editor(&mut self, node: &Node) {
        self.open_editor = Some(node_form_json(node));
    }
}

/// `{"id","text","color"}` for the node editor form.
fn node_form_json(node: &Node) -> String {
    serde_json::json!({
        "id": node.id.as_str(),
        "text": node.text,
        "color": node.color,
    })
    .to_string()
}

// ─── Canvas controller ───────────────────────────────────────────────────

/// The main WASM-facing canvas controller.
///
/// Holds the editor and the theme. All interaction from the page goes
/// through this struct.
#[wasm_bindgen]
pub struct MindMapCanvas {
    editor: Editor,
    host: PendingHost,
    theme: RenderTheme,
}

#[wasm_bindgen]
impl MindMapCanvas {
    /// Create a controller for a canvas of the given size.
    #[wasm_bindgen(constructor)]
    pub fn new(width: f64, height: f64) -> Self {
        Self::from_config(EditorConfig::default(), width, height)
    }

    /// Create a controller with overrides from a JSON config object.
    pub fn with_config(width: f64, height: f64, config_json: &str) -> Result<MindMapCanvas, JsValue> {
        let config = EditorConfig::from_json(config_json)
            .map_err(|e| JsValue::from_str(&format!("invalid config: {e}")))?;
        Ok(Self::from_config(config, width, height))
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.editor.resize(width, height);
    }

    /// Render the live view to a Canvas2D context.
    pub fn render(&self, ctx: &CanvasRenderingContext2d) {
        let size = self.editor.viewport();
        let mut surface = Canvas2dSurface::new(ctx, size.width, size.height);
        self.editor.render(&mut surface, &self.theme);
    }

    // ─── Pointer input (returns true when a re-render is needed) ─────────

    pub fn handle_pointer_down(&mut self, x: f64, y: f64) -> bool {
        self.dispatch(InputEvent::PointerDown { x, y })
    }

    pub fn handle_pointer_move(&mut self, x: f64, y: f64) -> bool {
        self.dispatch(InputEvent::PointerMove { x, y })
    }

    pub fn handle_pointer_up(&mut self, x: f64, y: f64) -> bool {
        self.dispatch(InputEvent::PointerUp { x, y })
    }

    pub fn handle_pointer_leave(&mut self) -> bool {
        self.dispatch(InputEvent::PointerLeave)
    }

    pub fn handle_wheel(&mut self, x: f64, y: f64, delta_y: f64) -> bool {
        self.dispatch(InputEvent::Wheel { x, y, delta_y })
    }

    /// Double click. May request the node editor (see `take_open_editor`).
    pub fn handle_double_click(&mut self, x: f64, y: f64) -> bool {
        self.dispatch(InputEvent::DoubleClick { x, y })
    }

    // ─── Commands ────────────────────────────────────────────────────────

    /// Add a root node at the viewport center. Returns its id.
    pub fn add_node(&mut self) -> Option<String> {
        self.editor
            .add_node(&mut self.host)
            .map(|id| id.as_str().to_string())
    }

    /// Add a child under the selection. Returns its id, or `None` without
    /// a selection.
    pub fn add_child(&mut self) -> Option<String> {
        self.editor
            .add_child(&mut self.host)
            .map(|id| id.as_str().to_string())
    }

    /// Apply the node editor form to the selected node.
    pub fn edit_selected(&mut self, text: &str, color: &str) -> bool {
        self.editor.edit_selected(text, color)
    }

    /// Delete the selection and its subtree. Returns how many nodes went.
    pub fn delete_selected(&mut self) -> u32 {
        self.editor.delete_selected() as u32
    }

    /// Clear the map. `confirmed` is the user's answer to the page's prompt.
    pub fn clear(&mut self, confirmed: bool) -> bool {
        self.host.confirmed = confirmed;
        self.editor.clear(&mut self.host)
    }

    pub fn has_selection(&self) -> bool {
        self.editor.selected().is_some()
    }

    /// The selected node as `{"id","text","color"}`.
    pub fn selected_node_json(&self) -> Option<String> {
        self.editor.selected_node().map(node_form_json)
    }

    // ─── Save / load ─────────────────────────────────────────────────────

    /// Serialize the document. Returns the JSON to offer as a download.
    pub fn save(&mut self) -> Option<String> {
        if self.editor.save(&mut self.host) {
            self.host.save.take()
        } else {
            None
        }
    }

    /// Suggested download name for `save`.
    pub fn file_name(&self) -> String {
        self.editor.config().file_name.clone()
    }

    /// Complete a file-open dialog. `None` means the user cancelled.
    /// On failure the message is available from `take_error`.
    pub fn finish_load(&mut self, bytes: Option<Vec<u8>>) -> bool {
        self.editor.finish_load(bytes.as_deref(), &mut self.host)
    }

    // ─── Host requests ───────────────────────────────────────────────────

    /// Error to show the user, if one was reported since the last call.
    pub fn take_error(&mut self) -> Option<String> {
        self.host.error.take()
    }

    /// Node the editor form should open for, as `{"id","text","color"}`.
    pub fn take_open_editor(&mut self) -> Option<String> {
        self.host.open_editor.take()
    }

    // ─── Print export ────────────────────────────────────────────────────

    /// `[width, height]` of the print page, empty when there is nothing
    /// to print. Size the export canvas with it before `render_export`.
    pub fn export_size(&self) -> Vec<f64> {
        self.editor
            .export_frame()
            .map(|frame| vec![frame.width(), frame.height()])
            .unwrap_or_default()
    }

    /// Draw the print export into a second canvas. The live view is untouched.
    pub fn render_export(&self, ctx: &CanvasRenderingContext2d) -> bool {
        let Some(frame) = self.editor.export_frame() else {
            return false;
        };
        let mut surface = Canvas2dSurface::new(ctx, frame.width(), frame.height());
        self.editor.export(&mut surface, &self.theme).is_some()
    }

    /// The print export as a standalone SVG document.
    pub fn export_svg(&self) -> Option<String> {
        self.editor.export_svg(&self.theme)
    }
}

impl MindMapCanvas {
    fn from_config(config: EditorConfig, width: f64, height: f64) -> Self {
        Self {
            editor: Editor::new(config, Size::new(width, height)),
            host: PendingHost::default(),
            theme: RenderTheme::default(),
        }
    }

    fn dispatch(&mut self, event: InputEvent) -> bool {
        self.editor.handle(&event, &mut self.host)
    }
}

// ─── Standalone validation (no canvas needed) ────────────────────────────

/// Validate a saved document. Returns JSON: `{"ok":true,"nodes":N}` or
/// `{"ok":false,"error":"..."}`.
#[wasm_bindgen]
pub fn validate(json: &str) -> String {
    match mm_core::parse_document(json) {
        Ok(doc) => serde_json::json!({ "ok": true, "nodes": doc.scene.len() }).to_string(),
        Err(e) => serde_json::json!({ "ok": false, "error": e.to_string() }).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn double_click_requests_editor_form() {
        let mut canvas = MindMapCanvas::new(800.0, 600.0);
        assert!(canvas.handle_double_click(100.0, 100.0));
        let form: serde_json::Value =
            serde_json::from_str(&canvas.take_open_editor().unwrap()).unwrap();
        assert_eq!(form["text"], "New Node");
        assert_eq!(form["color"], "#4CAF50");
        assert!(canvas.take_open_editor().is_none());
    }

    #[test]
    fn clear_uses_supplied_answer_once() {
        let mut canvas = MindMapCanvas::new(800.0, 600.0);
        canvas.add_node();
        assert!(!canvas.clear(false));
        assert!(canvas.has_selection());
        assert!(canvas.clear(true));
        assert!(!canvas.has_selection());
        assert!(canvas.export_size().is_empty());
    }

    #[test]
    fn save_and_reload() {
        let mut canvas = MindMapCanvas::new(800.0, 600.0);
        canvas.add_node();
        canvas.add_child();
        let json = canvas.save().unwrap();
        assert_eq!(canvas.file_name(), "mindmap.json");

        let mut other = MindMapCanvas::new(800.0, 600.0);
        assert!(other.finish_load(Some(json.into_bytes())));
        assert_eq!(other.export_size(), vec![250.0, 300.0]);
    }

    #[test]
    fn bad_load_reports_error() {
        let mut canvas = MindMapCanvas::new(800.0, 600.0);
        assert!(!canvas.finish_load(Some(b"[]".to_vec())));
        assert!(canvas.take_error().unwrap().starts_with("Error loading file"));
        assert!(!canvas.finish_load(None));
        assert!(canvas.take_error().is_none());
    }

    #[test]
    fn validate_reports_node_count() {
        let ok: serde_json::Value = serde_json::from_str(&validate(r#"{"nodes":[]}"#)).unwrap();
        assert_eq!(ok, serde_json::json!({ "ok": true, "nodes": 0 }));
        let bad: serde_json::Value = serde_json::from_str(&validate("nope")).unwrap();
        assert_eq!(bad["ok"], false);
    }
}
