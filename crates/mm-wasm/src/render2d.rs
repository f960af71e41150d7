//! Canvas2D backend.
//!
//! Implements the renderer's `Surface` over an HTML `<canvas>` via
//! `CanvasRenderingContext2d`. Paths are replayed element by element;
//! the world → screen mapping is handed to the context as its transform.

use kurbo::{Affine, BezPath, PathEl, Point};
use mm_render::Surface;
use web_sys::CanvasRenderingContext2d;

pub struct Canvas2dSurface<'a> {
    ctx: &'a CanvasRenderingContext2d,
    width: f64,
    height: f64,
}

impl<'a> Canvas2dSurface<'a> {
    pub fn new(ctx: &'a CanvasRenderingContext2d, width: f64, height: f64) -> Self {
        Self { ctx, width, height }
    }

    fn trace(&self, path: &BezPath) {
        let ctx = self.ctx;
        ctx.begin_path();
        for el in path.elements() {
            match *el {
                PathEl::MoveTo(p) => ctx.move_to(p.x, p.y),
                PathEl::LineTo(p) => ctx.line_to(p.x, p.y),
                PathEl::QuadTo(c, p) => ctx.quadratic_curve_to(c.x, c.y, p.x, p.y),
                PathEl::CurveTo(c1, c2, p) => ctx.bezier_curve_to(c1.x, c1.y, c2.x, c2.y, p.x, p.y),
                PathEl::ClosePath => ctx.close_path(),
            }
        }
    }
}

impl Surface for Canvas2dSurface<'_> {
    fn clear(&mut self) {
        // Clear in device space whatever the current transform is
        let _ = self.ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);
        self.ctx.clear_rect(0.0, 0.0, self.width, self.height);
    }

    fn set_transform(&mut self, transform: Affine) {
        let [a, b, c, d, e, f] = transform.as_coeffs();
        let _ = self.ctx.set_transform(a, b, c, d, e, f);
    }

    fn fill_path(&mut self, path: &BezPath, color: &str) {
        self.trace(path);
        self.ctx.set_fill_style_str(color);
        self.ctx.fill();
    }

    fn stroke_path(&mut self, path: &BezPath, color: &str, width: f64) {
        self.trace(path);
        self.ctx.set_stroke_style_str(color);
        self.ctx.set_line_width(width);
        self.ctx.stroke();
    }

    fn set_font(&mut self, font: &str) {
        self.ctx.set_font(font);
    }

    fn measure_text(&mut self, text: &str) -> f64 {
        self.ctx
            .measure_text(text)
            .map(|m| m.width())
            .unwrap_or(0.0)
    }

    fn fill_text(&mut self, text: &str, at: Point, color: &str) {
        self.ctx.set_fill_style_str(color);
        self.ctx.set_text_align("center");
        self.ctx.set_text_baseline("middle");
        let _ = self.ctx.fill_text(text, at.x, at.y);
    }
}
