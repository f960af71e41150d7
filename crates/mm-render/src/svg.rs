//! SVG backend: a [`Surface`] that writes an SVG document.
//!
//! Each transform change opens a new `<g>` group so path data stays in
//! world units. Text is measured with a fixed average advance per char,
//! which is close enough for a headless export.

use crate::export::{ExportFrame, render_export};
use crate::paint::RenderTheme;
use crate::surface::Surface;
use kurbo::{Affine, BezPath, Point};
use mm_core::Scene;
use std::fmt::Write;

/// Average glyph advance as a fraction of the font size.
const CHAR_ADVANCE: f64 = 0.55;

pub struct SvgSurface {
    width: f64,
    height: f64,
    body: String,
    group_open: bool,
    font_size: f64,
    font_family: String,
}

impl SvgSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            body: String::new(),
            group_open: false,
            font_size: 14.0,
            font_family: "Arial".to_string(),
        }
    }

    /// Close any open group and return the finished document.
    pub fn finish(mut self) -> String {
        self.close_group();
        let (w, h) = (self.width, self.height);
        let mut svg = format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n"
        );
        svg.push_str(&format!("<rect width=\"{w}\" height=\"{h}\" fill=\"#ffffff\" />\n"));
        svg.push_str(&self.body);
        svg.push_str("</svg>\n");
        svg
    }

    fn close_group(&mut self) {
        if self.group_open {
            self.body.push_str("</g>\n");
            self.group_open = false;
        }
    }
}

impl Surface for SvgSurface {
    fn clear(&mut self) {
        self.body.clear();
        self.group_open = false;
    }

    fn set_transform(&mut self, transform: Affine) {
        self.close_group();
        let [a, b, c, d, e, f] = transform.as_coeffs();
        let _ = writeln!(
            self.body,
            "<g transform=\"matrix({a} {b} {c} {d} {e} {f})\">"
        );
        self.group_open = true;
    }

    fn fill_path(&mut self, path: &BezPath, color: &str) {
        let _ = writeln!(
            self.body,
            "  <path d=\"{}\" fill=\"{}\" />",
            path.to_svg(),
            escape(color)
        );
    }

    fn stroke_path(&mut self, path: &BezPath, color: &str, width: f64) {
        let _ = writeln!(
            self.body,
            "  <path d=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{width}\" />",
            path.to_svg(),
            escape(color)
        );
    }

    fn set_font(&mut self, font: &str) {
        // "<size>px <family>"
        let mut parts = font.splitn(2, ' ');
        if let Some(size) = parts
            .next()
            .and_then(|s| s.strip_suffix("px"))
            .and_then(|s| s.parse::<f64>().ok())
        {
            self.font_size = size;
        }
        if let Some(family) = parts.next() {
            self.font_family = family.trim().to_string();
        }
    }

    fn measure_text(&mut self, text: &str) -> f64 {
        text.chars().count() as f64 * self.font_size * CHAR_ADVANCE
    }

    fn fill_text(&mut self, text: &str, at: Point, color: &str) {
        let _ = writeln!(
            self.body,
            "  <text x=\"{}\" y=\"{}\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\" text-anchor=\"middle\" dominant-baseline=\"middle\">{}</text>",
            at.x,
            at.y,
            escape(&self.font_family),
            self.font_size,
            escape(color),
            escape(text)
        );
    }
}

/// Escape the XML special characters.
fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Render the print export of `scene` as an SVG string.
/// Returns `None` for an empty scene.
pub fn export_svg(scene: &Scene, padding: f64, theme: &RenderTheme) -> Option<String> {
    let frame = ExportFrame::for_scene(scene, padding)?;
    let mut surface = SvgSurface::new(frame.width(), frame.height());
    render_export(&mut surface, scene, &frame, theme);
    Some(surface.finish())
}
