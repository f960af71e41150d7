//! The drawing-surface seam.
//!
//! The renderer only ever talks to a [`Surface`]: a canvas that can fill
//! and stroke `kurbo` paths, measure and draw text, and carry a current
//! world → device transform. Backends live elsewhere (HTML canvas in
//! `mm-wasm`, SVG in [`crate::svg`]); [`DisplayList`] records calls for
//! tests and headless use.

use kurbo::{Affine, BezPath, Point};

pub trait Surface {
    /// Wipe the whole surface, regardless of the current transform.
    fn clear(&mut self);

    /// Replace the current transform. Geometry passed afterwards is in
    /// world units and mapped through `transform`.
    fn set_transform(&mut self, transform: Affine);

    fn fill_path(&mut self, path: &BezPath, color: &str);

    fn stroke_path(&mut self, path: &BezPath, color: &str, width: f64);

    /// CSS-style font shorthand, e.g. `14px Arial`.
    fn set_font(&mut self, font: &str);

    /// Advance width of `text` in world units for the current font.
    fn measure_text(&mut self, text: &str) -> f64;

    /// Draw `text` centered horizontally and vertically on `at`.
    fn fill_text(&mut self, text: &str, at: Point, color: &str);
}

/// One recorded surface call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Clear,
    Transform(Affine),
    Fill { path: BezPath, color: String },
    Stroke { path: BezPath, color: String, width: f64 },
    Font(String),
    Text { text: String, at: Point, color: String },
}

/// A [`Surface`] that records every call.
///
/// Text is measured as `chars × char_width`, which keeps wrapping
/// deterministic without a font engine.
#[derive(Debug, Clone)]
pub struct DisplayList {
    pub ops: Vec<DrawOp>,
    pub char_width: f64,
}

impl Default for DisplayList {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplayList {
    pub fn new() -> Self {
        Self {
            ops: Vec::new(),
            // roughly the average advance of 14px Arial
            char_width: 7.0,
        }
    }

    /// The text runs drawn since the last clear, in order.
    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Stroke calls as `(color, width)` pairs, in order.
    pub fn strokes(&self) -> Vec<(&str, f64)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Stroke { color, width, .. } => Some((color.as_str(), *width)),
                _ => None,
            })
            .collect()
    }
}

impl Surface for DisplayList {
    fn clear(&mut self) {
        self.ops.clear();
        self.ops.push(DrawOp::Clear);
    }

    fn set_transform(&mut self, transform: Affine) {
        self.ops.push(DrawOp::Transform(transform));
    }

    fn fill_path(&mut self, path: &BezPath, color: &str) {
        self.ops.push(DrawOp::Fill {
            path: path.clone(),
            color: color.to_string(),
        });
    }

    fn stroke_path(&mut self, path: &BezPath, color: &str, width: f64) {
        self.ops.push(DrawOp::Stroke {
            path: path.clone(),
            color: color.to_string(),
            width,
        });
    }

    fn set_font(&mut self, font: &str) {
        self.ops.push(DrawOp::Font(font.to_string()));
    }

    fn measure_text(&mut self, text: &str) -> f64 {
        text.chars().count() as f64 * self.char_width
    }

    fn fill_text(&mut self, text: &str, at: Point, color: &str) {
        self.ops.push(DrawOp::Text {
            text: text.to_string(),
            at,
            color: color.to_string(),
        });
    }
}
