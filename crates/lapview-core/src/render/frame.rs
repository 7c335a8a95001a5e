//! Recording surface
//!
//! [`DrawList`] stores a frame's instructions grouped by layer so a GUI
//! adapter can replay them later, and so tests can inspect what was drawn.

use super::surface::{Layer, Rect, Surface, TextLabel, Transform2D};
use crate::geometry::{Point, Size};
use crate::style::Rgba;

/// One recorded primitive, in its layer's coordinates
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear { rect: Rect, color: Rgba },
    FillRect { rect: Rect, color: Rgba },
    StrokeRect { rect: Rect, width: f32, color: Rgba },
    Line { from: Point, to: Point, width: f32, color: Rgba },
    FillCircle { center: Point, radius: f32, color: Rgba },
    StrokeCircle { center: Point, radius: f32, width: f32, color: Rgba },
    Text(TextLabel),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedLayer {
    pub layer: Layer,
    pub clip: Rect,
    pub transform: Transform2D,
    pub commands: Vec<DrawCommand>,
}

/// A complete frame of draw instructions
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DrawList {
    size: Size,
    layers: Vec<RecordedLayer>,
    /// Frames recorded into this list so far
    generation: u64,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn layers(&self) -> &[RecordedLayer] {
        &self.layers
    }

    pub fn layer(&self, layer: Layer) -> Option<&RecordedLayer> {
        self.layers.iter().find(|l| l.layer == layer)
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_empty(&self) -> bool {
        self.layers.iter().all(|l| l.commands.is_empty())
    }

    /// All text drawn in `layer`
    pub fn texts(&self, layer: Layer) -> Vec<&TextLabel> {
        self.layer(layer)
            .map(|l| {
                l.commands
                    .iter()
                    .filter_map(|c| match c {
                        DrawCommand::Text(t) => Some(t),
                        _ => None,
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    fn push(&mut self, command: DrawCommand) {
        if self.layers.is_empty() {
            // Primitives before any layer draw in screen space
            self.layers.push(RecordedLayer {
                layer: Layer::Overlay,
                clip: Rect::new(0.0, 0.0, self.size.width, self.size.height),
                transform: Transform2D::IDENTITY,
                commands: Vec::new(),
            });
        }
        if let Some(layer) = self.layers.last_mut() {
            layer.commands.push(command);
        }
    }
}

impl Surface for DrawList {
    fn begin_frame(&mut self, size: Size) {
        self.size = size;
        self.layers.clear();
        self.generation += 1;
    }

    fn begin_layer(&mut self, layer: Layer, clip: Rect, transform: Transform2D) {
        self.layers.push(RecordedLayer {
            layer,
            clip,
            transform,
            commands: Vec::new(),
        });
    }

    fn clear(&mut self, rect: Rect, color: Rgba) {
        self.push(DrawCommand::Clear { rect, color });
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        self.push(DrawCommand::FillRect { rect, color });
    }

    fn stroke_rect(&mut self, rect: Rect, width: f32, color: Rgba) {
        self.push(DrawCommand::StrokeRect { rect, width, color });
    }

    fn stroke_line(&mut self, from: Point, to: Point, width: f32, color: Rgba) {
        self.push(DrawCommand::Line {
            from,
            to,
            width,
            color,
        });
    }

    fn fill_circle(&mut self, center: Point, radius: f32, color: Rgba) {
        self.push(DrawCommand::FillCircle {
            center,
            radius,
            color,
        });
    }

    fn stroke_circle(&mut self, center: Point, radius: f32, width: f32, color: Rgba) {
        self.push(DrawCommand::StrokeCircle {
            center,
            radius,
            width,
            color,
        });
    }

    fn fill_text(&mut self, text: TextLabel) {
        self.push(DrawCommand::Text(text));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_by_layer() {
        let mut list = DrawList::new();
        list.begin_frame(Size::new(800.0, 600.0));
        list.begin_layer(Layer::Plot, Rect::new(150.0, 0.0, 650.0, 520.0), Transform2D::IDENTITY);
        list.stroke_line(Point::ORIGIN, Point::new(10.0, 0.0), 1.0, Rgba::WHITE);
        list.begin_layer(Layer::TickLabels, Rect::new(0.0, 0.0, 130.0, 520.0), Transform2D::IDENTITY);
        list.fill_text(TextLabel::new("1:30.000", Point::new(41.0, 100.0), 22.0, Rgba::WHITE));

        assert_eq!(list.layers().len(), 2);
        assert_eq!(list.layer(Layer::Plot).unwrap().commands.len(), 1);
        assert_eq!(list.texts(Layer::TickLabels)[0].content, "1:30.000");
        assert!(list.texts(Layer::Plot).is_empty());
    }

    #[test]
    fn test_begin_frame_resets() {
        let mut list = DrawList::new();
        list.begin_frame(Size::new(100.0, 100.0));
        list.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), Rgba::BLACK);
        assert!(!list.is_empty());
        assert_eq!(list.layers()[0].layer, Layer::Overlay);

        list.begin_frame(Size::new(100.0, 100.0));
        assert!(list.is_empty());
        assert_eq!(list.generation(), 2);
    }
}
