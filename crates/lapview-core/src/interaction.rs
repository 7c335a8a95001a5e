//! Pan/zoom interaction state
//!
//! The view is an affine map from plot space to screen:
//! `screen = plot * scale + camera`. Dragging moves the camera, the wheel
//! changes the scale additively and shifts the scroll offset so the point
//! under the cursor stays put.

use crate::geometry::{Point, Vector};
use crate::hit_test::{Highlight, PrimitiveKind};
use crate::types::DriverId;

/// Whether a pan gesture is in progress
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    /// Pointer position minus camera at press time
    Dragging { anchor: Vector },
}

/// Pointer input in plot-area coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerInput {
    Down(Point),
    Up,
    Leave,
    Move(Point),
    Wheel { position: Point, delta_y: f32, ctrl: bool },
}

/// Camera, zoom, scroll and hover state of one chart
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    /// Zoom factor, kept uniform on both axes
    pub scale: Vector,
    pub scroll: Vector,
    pub camera: Vector,
    pub drag: DragState,
    pub highlight: Option<Highlight>,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            scale: Vector::new(1.0, 1.0),
            scroll: Vector::ZERO,
            camera: Vector::ZERO,
            drag: DragState::Idle,
            highlight: None,
        }
    }
}

impl ViewState {
    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging { .. })
    }

    pub fn pointer_down(&mut self, pointer: Point) {
        self.drag = DragState::Dragging {
            anchor: Vector::new(pointer.x - self.camera.x, pointer.y - self.camera.y),
        };
    }

    pub fn pointer_up(&mut self) {
        self.drag = DragState::Idle;
    }

    /// Pan while dragging, returns true when the camera moved
    pub fn pointer_move(&mut self, pointer: Point) -> bool {
        match self.drag {
            DragState::Dragging { anchor } => {
                self.camera = Vector::new(pointer.x - anchor.x, pointer.y - anchor.y);
                true
            }
            DragState::Idle => false,
        }
    }

    /// Zoom around the pointer, returns true when the view changed
    ///
    /// `scale += step * sign(-delta_y)`; ctrl+wheel and a zero delta are
    /// ignored. A step that would go below `min_scale` is dropped.
    pub fn wheel(&mut self, pointer: Point, delta_y: f32, ctrl: bool, step: f32, min_scale: f32) -> bool {
        if ctrl || delta_y == 0.0 || !delta_y.is_finite() {
            return false;
        }
        let direction = if delta_y > 0.0 { -1.0 } else { 1.0 };
        let previous = self.scale;
        let next = Vector::new(previous.x + step * direction, previous.y + step * direction);
        // Small epsilon so 0.1 - 0.1 accumulated in f32 still counts as the floor
        if next.x < min_scale - 1e-4 || next.y < min_scale - 1e-4 {
            log::debug!("wheel: Scale {:.1} at minimum, ignoring", previous.x);
            return false;
        }

        let cx = pointer.x - self.camera.x;
        let cy = pointer.y - self.camera.y;
        self.scale = next;
        self.scroll.x += cx / previous.x - cx / next.x;
        self.scroll.y += cy / previous.y - cy / next.y;
        log::debug!(
            "wheel: Scale {:.1} -> {:.1}, scroll ({:.1}, {:.1})",
            previous.x,
            next.x,
            self.scroll.x,
            self.scroll.y
        );
        true
    }

    /// Screen position to plot space
    pub fn to_plot(&self, screen: Point) -> Point {
        Point::new(
            (screen.x - self.camera.x) / self.scale.x,
            (screen.y - self.camera.y) / self.scale.y,
        )
    }

    /// Plot space to screen position
    pub fn to_screen(&self, plot: Point) -> Point {
        Point::new(
            plot.x * self.scale.x + self.camera.x,
            plot.y * self.scale.y + self.camera.y,
        )
    }

    pub fn highlighted_driver(&self) -> Option<DriverId> {
        self.highlight.map(|h| h.driver_id)
    }

    pub fn highlighted_kind(&self) -> Option<PrimitiveKind> {
        self.highlight.map(|h| h.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Data-space point under the cursor: plot position plus scroll
    fn anchored(view: &ViewState, cursor: Point) -> (f32, f32) {
        let plot = view.to_plot(cursor);
        (plot.x + view.scroll.x, plot.y + view.scroll.y)
    }

    #[test]
    fn test_wheel_up_zooms_in() {
        let mut view = ViewState::default();
        assert!(view.wheel(Point::new(100.0, 100.0), -1.0, false, 0.1, 0.1));
        assert!((view.scale.x - 1.1).abs() < 1e-6);
        assert_eq!(view.scale.x, view.scale.y);
    }

    #[test]
    fn test_wheel_ignored_cases() {
        let mut view = ViewState::default();
        assert!(!view.wheel(Point::ORIGIN, 0.0, false, 0.1, 0.1));
        assert!(!view.wheel(Point::ORIGIN, -3.0, true, 0.1, 0.1));
        assert_eq!(view, ViewState::default());
    }

    #[test]
    fn test_zoom_keeps_point_under_cursor() {
        let mut view = ViewState {
            camera: Vector::new(40.0, -25.0),
            ..ViewState::default()
        };
        let cursor = Point::new(512.0, 300.0);
        let before = anchored(&view, cursor);
        for delta in [-1.0, -1.0, -1.0, 1.0, -1.0, 1.0, 1.0, 1.0, 1.0] {
            view.wheel(cursor, delta, false, 0.1, 0.1);
            let now = anchored(&view, cursor);
            assert!((now.0 - before.0).abs() < 1e-2);
            assert!((now.1 - before.1).abs() < 1e-2);
        }
    }

    #[test]
    fn test_min_scale_clamp() {
        let mut view = ViewState::default();
        for _ in 0..20 {
            view.wheel(Point::new(10.0, 10.0), 1.0, false, 0.1, 0.1);
        }
        assert!(view.scale.x > 0.05);
        let scroll = view.scroll;
        assert!(!view.wheel(Point::new(10.0, 10.0), 1.0, false, 0.1, 0.1));
        assert_eq!(view.scroll, scroll);
    }

    #[test]
    fn test_drag_moves_camera() {
        let mut view = ViewState::default();
        assert!(!view.pointer_move(Point::new(5.0, 5.0)));

        view.pointer_down(Point::new(100.0, 100.0));
        assert!(view.is_dragging());
        assert!(view.pointer_move(Point::new(130.0, 90.0)));
        assert_eq!(view.camera, Vector::new(30.0, -10.0));

        view.pointer_up();
        view.pointer_down(Point::new(0.0, 0.0));
        view.pointer_move(Point::new(10.0, 10.0));
        assert_eq!(view.camera, Vector::new(40.0, 0.0));
        view.pointer_up();
        assert!(!view.pointer_move(Point::new(500.0, 500.0)));
    }

    #[test]
    fn test_screen_roundtrip() {
        let view = ViewState {
            scale: Vector::new(1.5, 1.5),
            camera: Vector::new(12.0, -8.0),
            ..ViewState::default()
        };
        let p = Point::new(33.0, 77.0);
        let back = view.to_plot(view.to_screen(p));
        assert!((back.x - p.x).abs() < 1e-4 && (back.y - p.y).abs() < 1e-4);
    }
}
