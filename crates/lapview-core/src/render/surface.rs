//! Drawing surface abstraction
//!
//! The engine never talks to a GUI toolkit. Each frame it issues fully
//! specified instructions against a [`Surface`]: a layer (clip rectangle +
//! affine transform) followed by primitives in that layer's coordinates.
//! Line widths and radii are in layer units too, so a line that should stay
//! one screen pixel wide is issued with width `1 / scale`.

use crate::geometry::{Point, Size, Vector};
use crate::style::Rgba;

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Rectangle spanned by two corners in any order
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            x: a.x.min(b.x),
            y: a.y.min(b.y),
            width: (a.x - b.x).abs(),
            height: (a.y - b.y).abs(),
        }
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.x + self.width && p.y >= self.y && p.y <= self.y + self.height
    }
}

/// `screen = local * scale + translate`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform2D {
    pub translate: Vector,
    pub scale: f32,
}

impl Transform2D {
    pub const IDENTITY: Transform2D = Transform2D {
        translate: Vector::ZERO,
        scale: 1.0,
    };

    pub fn new(translate: Vector, scale: f32) -> Self {
        Self { translate, scale }
    }

    pub fn apply(&self, p: Point) -> Point {
        Point::new(
            p.x * self.scale + self.translate.x,
            p.y * self.scale + self.translate.y,
        )
    }

    pub fn apply_rect(&self, r: Rect) -> Rect {
        let origin = self.apply(Point::new(r.x, r.y));
        Rect::new(origin.x, origin.y, r.width * self.scale, r.height * self.scale)
    }

    /// Scale a length (line width, radius)
    pub fn apply_length(&self, length: f32) -> f32 {
        length * self.scale
    }
}

impl Default for Transform2D {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Drawing layers, issued back to front
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    /// Grid and boxplots, under camera and zoom
    Plot,
    /// Vertical axis strip: zoomed, follows the camera vertically only
    AxisStrip,
    /// Lap time labels left of the axis
    TickLabels,
    /// Finish position and name under each box
    DriverLabels,
    /// Hover detail label
    Overlay,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HAlign {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VAlign {
    Top,
    #[default]
    Center,
    /// `position.y` is the text baseline
    Baseline,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextLabel {
    pub content: String,
    pub position: Point,
    pub size: f32,
    pub color: Rgba,
    pub bold: bool,
    pub align_x: HAlign,
    pub align_y: VAlign,
}

impl TextLabel {
    pub fn new(content: impl Into<String>, position: Point, size: f32, color: Rgba) -> Self {
        Self {
            content: content.into(),
            position,
            size,
            color,
            bold: false,
            align_x: HAlign::Left,
            align_y: VAlign::Center,
        }
    }

    pub fn aligned(mut self, align_x: HAlign, align_y: VAlign) -> Self {
        self.align_x = align_x;
        self.align_y = align_y;
        self
    }

    pub fn bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    /// Rough rendered width, used to size label boxes
    pub fn approx_width(&self) -> f32 {
        self.content.chars().count() as f32 * self.size * 0.6
    }
}

/// Target of the per-frame draw instructions
pub trait Surface {
    /// Start a new frame covering `size` (the whole chart widget)
    fn begin_frame(&mut self, size: Size);

    /// Following primitives are clipped to `clip` (screen space) and drawn through `transform`
    fn begin_layer(&mut self, layer: Layer, clip: Rect, transform: Transform2D);

    /// Reset a region to the background colour
    fn clear(&mut self, rect: Rect, color: Rgba);

    fn fill_rect(&mut self, rect: Rect, color: Rgba);

    fn stroke_rect(&mut self, rect: Rect, width: f32, color: Rgba);

    fn stroke_line(&mut self, from: Point, to: Point, width: f32, color: Rgba);

    fn fill_circle(&mut self, center: Point, radius: f32, color: Rgba);

    fn stroke_circle(&mut self, center: Point, radius: f32, width: f32, color: Rgba);

    fn fill_text(&mut self, text: TextLabel);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transform_apply() {
        let t = Transform2D::new(Vector::new(150.0, -20.0), 2.0);
        assert_eq!(t.apply(Point::new(10.0, 10.0)), Point::new(170.0, 0.0));
        assert_eq!(t.apply_length(0.5), 1.0);
        assert_eq!(
            t.apply_rect(Rect::new(0.0, 0.0, 5.0, 5.0)),
            Rect::new(150.0, -20.0, 10.0, 10.0)
        );
    }

    #[test]
    fn test_rect_from_corners() {
        let r = Rect::from_corners(Point::new(10.0, 50.0), Point::new(0.0, 20.0));
        assert_eq!(r, Rect::new(0.0, 20.0, 10.0, 30.0));
        assert!(r.contains(Point::new(5.0, 30.0)));
        assert!(!r.contains(Point::new(11.0, 30.0)));
    }
}
