//! Input abstraction layer.
//!
//! Normalizes mouse and touch events into a unified `InputEvent` enum
//! consumed by the editor. Coordinates are canvas-relative screen pixels.

use kurbo::Point;

/// A normalized input event from any pointing device.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Pointer pressed (mouse down, touch start).
    PointerDown { x: f64, y: f64 },

    /// Pointer moved. Ignored unless a gesture is in progress.
    PointerMove { x: f64, y: f64 },

    /// Pointer released.
    PointerUp { x: f64, y: f64 },

    /// Pointer left the surface or the gesture was cancelled by the host.
    /// Ends any gesture exactly like `PointerUp`.
    PointerLeave,

    /// Wheel step at a pointer position. Negative `delta_y` zooms in.
    Wheel { x: f64, y: f64, delta_y: f64 },

    /// Double click / double tap.
    DoubleClick { x: f64, y: f64 },
}

impl InputEvent {
    /// Extract position if this event carries one.
    pub fn position(&self) -> Option<Point> {
        match self {
            Self::PointerDown { x, y }
            | Self::PointerMove { x, y }
            | Self::PointerUp { x, y }
            | Self::Wheel { x, y, .. }
            | Self::DoubleClick { x, y } => Some(Point::new(*x, *y)),
            Self::PointerLeave => None,
        }
    }

    /// Whether this event ends a pointer gesture.
    pub fn ends_gesture(&self) -> bool {
        matches!(self, Self::PointerUp { .. } | Self::PointerLeave)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positions() {
        assert_eq!(InputEvent::PointerDown { x: 1.0, y: 2.0 }.position(), Some(Point::new(1.0, 2.0)));
        assert_eq!(
            InputEvent::Wheel {
                x: 3.0,
                y: 4.0,
                delta_y: -120.0
            }
            .position(),
            Some(Point::new(3.0, 4.0))
        );
        assert_eq!(InputEvent::PointerLeave.position(), None);
    }

    #[test]
    fn gesture_end() {
        assert!(InputEvent::PointerUp { x: 0.0, y: 0.0 }.ends_gesture());
        assert!(InputEvent::PointerLeave.ends_gesture());
        assert!(!InputEvent::PointerMove { x: 0.0, y: 0.0 }.ends_gesture());
    }
}
