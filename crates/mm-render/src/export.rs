//! Print export: draw the whole map, unselected, onto a page sized to fit.
//!
//! The export frame is the union of every node box grown by a padding on
//! each side. Rendering into it shifts the frame's top-left corner to the
//! surface origin and never touches the live view.

use crate::paint::{RenderTheme, draw_scene};
use crate::surface::Surface;
use kurbo::{Affine, Rect};
use mm_core::Scene;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExportFrame {
    /// World-space area covered by the page.
    pub bounds: Rect,
}

impl ExportFrame {
    /// Frame around all nodes plus `padding`. An empty scene has no frame.
    pub fn for_scene(scene: &Scene, padding: f64) -> Option<Self> {
        let bounds = scene.bounds()?.inflate(padding, padding);
        Some(Self { bounds })
    }

    pub fn width(&self) -> f64 {
        self.bounds.width()
    }

    pub fn height(&self) -> f64 {
        self.bounds.height()
    }

    /// World → page mapping (a pure translation).
    pub fn transform(&self) -> Affine {
        Affine::translate(-self.bounds.origin().to_vec2())
    }
}

/// Draw `scene` for print. No node is highlighted.
pub fn render_export<S: Surface + ?Sized>(
    surface: &mut S,
    scene: &Scene,
    frame: &ExportFrame,
    theme: &RenderTheme,
) {
    log::debug!(
        "exporting {} nodes into {}x{} page",
        scene.len(),
        frame.width(),
        frame.height()
    );
    surface.clear();
    draw_scene(surface, scene, frame.transform(), None, theme);
}
