//! Pan/zoom view transform: screen ↔ world mapping.
//!
//! `screen = world * scale + offset`. Panning works in screen units;
//! zooming multiplies the scale around a fixed screen point. The scale is
//! kept inside [`MIN_SCALE`, `MAX_SCALE`] at all times: a zoom step that
//! would leave the range is rejected as a whole.

use kurbo::{Affine, Point, Vec2};

pub const MIN_SCALE: f64 = 0.2;
pub const MAX_SCALE: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    pub offset_x: f64,
    pub offset_y: f64,
    scale: f64,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self {
            offset_x: 0.0,
            offset_y: 0.0,
            scale: 1.0,
        }
    }
}

impl ViewTransform {
    /// Build a transform, forcing `scale` into the valid range.
    /// Non-finite or non-positive scales fall back to 1.
    pub fn new(offset_x: f64, offset_y: f64, scale: f64) -> Self {
        let scale = if scale.is_finite() && scale > 0.0 {
            scale.clamp(MIN_SCALE, MAX_SCALE)
        } else {
            1.0
        };
        Self {
            offset_x,
            offset_y,
            scale,
        }
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn offset(&self) -> Vec2 {
        Vec2::new(self.offset_x, self.offset_y)
    }

    pub fn world_to_screen(&self, p: Point) -> Point {
        Point::new(
            p.x * self.scale + self.offset_x,
            p.y * self.scale + self.offset_y,
        )
    }

    pub fn screen_to_world(&self, p: Point) -> Point {
        Point::new(
            (p.x - self.offset_x) / self.scale,
            (p.y - self.offset_y) / self.scale,
        )
    }

    /// Shift the view by a screen-space delta (independent of zoom).
    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.offset_x += dx;
        self.offset_y += dy;
    }

    /// Zoom by `factor` keeping `anchor` (screen space) over the same world
    /// point. Returns false, leaving the view untouched, when the new scale
    /// would fall outside the allowed range.
    pub fn zoom_at(&mut self, anchor: Point, factor: f64) -> bool {
        let new_scale = self.scale * factor;
        if !(MIN_SCALE..=MAX_SCALE).contains(&new_scale) {
            return false;
        }
        self.offset_x = anchor.x - (anchor.x - self.offset_x) * factor;
        self.offset_y = anchor.y - (anchor.y - self.offset_y) * factor;
        self.scale = new_scale;
        true
    }

    /// The same mapping as a `kurbo::Affine` (world → screen).
    pub fn affine(&self) -> Affine {
        Affine::translate(self.offset()) * Affine::scale(self.scale)
    }
}
