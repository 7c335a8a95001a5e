//! Draw list replay
//!
//! Each recorded layer becomes one clipped region of the iced frame. Inside
//! `Frame::with_clip` coordinates are relative to the clip origin, so every
//! point goes through the layer transform first and is then shifted back by
//! the clip position.

use iced::alignment::{Horizontal, Vertical};
use iced::font::Weight;
use iced::widget::canvas::{Frame, Path, Stroke, Text};
use iced::{Color, Font, Point, Rectangle, Size};

use lapview_core::geometry;
use lapview_core::render::{DrawCommand, DrawList, HAlign, Rect, TextLabel, Transform2D, VAlign};
use lapview_core::style::Rgba;

pub fn to_color(color: Rgba) -> Color {
    Color::from_rgba(color.r, color.g, color.b, color.a)
}

fn to_rectangle(rect: Rect) -> Rectangle {
    Rectangle {
        x: rect.x,
        y: rect.y,
        width: rect.width.max(0.0),
        height: rect.height.max(0.0),
    }
}

/// Maps one layer's coordinates onto its clipped sub-frame
#[derive(Debug, Clone, Copy)]
struct LayerSpace {
    transform: Transform2D,
    origin: Point,
}

impl LayerSpace {
    fn point(&self, p: geometry::Point) -> Point {
        let screen = self.transform.apply(p);
        Point::new(screen.x - self.origin.x, screen.y - self.origin.y)
    }

    fn length(&self, length: f32) -> f32 {
        self.transform.apply_length(length)
    }

    fn rect(&self, rect: Rect) -> (Point, Size) {
        let screen = self.transform.apply_rect(rect);
        (
            Point::new(screen.x - self.origin.x, screen.y - self.origin.y),
            Size::new(screen.width, screen.height),
        )
    }
}

/// Paint every recorded layer onto `frame`, back to front
pub fn replay(frame: &mut Frame, list: &DrawList) {
    for layer in list.layers() {
        if layer.commands.is_empty() {
            continue;
        }
        let clip = to_rectangle(layer.clip);
        if clip.width == 0.0 || clip.height == 0.0 {
            continue;
        }
        let space = LayerSpace {
            transform: layer.transform,
            origin: clip.position(),
        };
        frame.with_clip(clip, |frame| {
            for command in &layer.commands {
                draw_command(frame, &space, command);
            }
        });
    }
}

fn draw_command(frame: &mut Frame, space: &LayerSpace, command: &DrawCommand) {
    match command {
        DrawCommand::Clear { rect, color } | DrawCommand::FillRect { rect, color } => {
            let (top_left, size) = space.rect(*rect);
            frame.fill_rectangle(top_left, size, to_color(*color));
        }
        DrawCommand::StrokeRect { rect, width, color } => {
            let (top_left, size) = space.rect(*rect);
            frame.stroke(
                &Path::rectangle(top_left, size),
                Stroke::default()
                    .with_color(to_color(*color))
                    .with_width(space.length(*width)),
            );
        }
        DrawCommand::Line {
            from,
            to,
            width,
            color,
        } => {
            frame.stroke(
                &Path::line(space.point(*from), space.point(*to)),
                Stroke::default()
                    .with_color(to_color(*color))
                    .with_width(space.length(*width)),
            );
        }
        DrawCommand::FillCircle {
            center,
            radius,
            color,
        } => {
            frame.fill(
                &Path::circle(space.point(*center), space.length(*radius)),
                to_color(*color),
            );
        }
        DrawCommand::StrokeCircle {
            center,
            radius,
            width,
            color,
        } => {
            frame.stroke(
                &Path::circle(space.point(*center), space.length(*radius)),
                Stroke::default()
                    .with_color(to_color(*color))
                    .with_width(space.length(*width)),
            );
        }
        DrawCommand::Text(label) => frame.fill_text(to_text(space, label)),
    }
}

fn to_horizontal(align: HAlign) -> Horizontal {
    match align {
        HAlign::Left => Horizontal::Left,
        HAlign::Center => Horizontal::Center,
        HAlign::Right => Horizontal::Right,
    }
}

fn to_vertical(align: VAlign) -> Vertical {
    match align {
        VAlign::Top => Vertical::Top,
        VAlign::Center => Vertical::Center,
        // iced has no baseline alignment; the bottom edge is close enough for these sizes
        VAlign::Baseline => Vertical::Bottom,
    }
}

fn to_text(space: &LayerSpace, label: &TextLabel) -> Text {
    let font = if label.bold {
        Font {
            weight: Weight::Bold,
            ..Font::DEFAULT
        }
    } else {
        Font::DEFAULT
    };
    Text {
        content: label.content.clone(),
        position: space.point(label.position),
        size: space.length(label.size).into(),
        color: to_color(label.color),
        font,
        align_x: to_horizontal(label.align_x).into(),
        align_y: to_vertical(label.align_y).into(),
        ..Text::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lapview_core::geometry::Vector;

    #[test]
    fn test_to_color() {
        let color = to_color(Rgba::new(1.0, 0.5, 0.0, 0.25));
        assert_eq!(color, Color::from_rgba(1.0, 0.5, 0.0, 0.25));
    }

    #[test]
    fn test_layer_space_subtracts_clip_origin() {
        let space = LayerSpace {
            transform: Transform2D::new(Vector::new(150.0, 10.0), 2.0),
            origin: Point::new(150.0, 0.0),
        };
        assert_eq!(space.point(geometry::Point::new(5.0, 5.0)), Point::new(10.0, 20.0));
        assert_eq!(space.length(1.5), 3.0);

        let (top_left, size) = space.rect(Rect::new(0.0, 0.0, 10.0, 4.0));
        assert_eq!(top_left, Point::new(0.0, 10.0));
        assert_eq!(size, Size::new(20.0, 8.0));
    }

    #[test]
    fn test_text_alignment_and_weight() {
        let space = LayerSpace {
            transform: Transform2D::IDENTITY,
            origin: Point::ORIGIN,
        };
        let label = TextLabel::new("P1", geometry::Point::new(20.0, 30.0), 20.0, Rgba::WHITE)
            .aligned(HAlign::Center, VAlign::Baseline)
            .bold(true);
        let text = to_text(&space, &label);
        assert_eq!(text.content, "P1");
        assert_eq!(text.position, Point::new(20.0, 30.0));
        assert_eq!(text.font.weight, Weight::Bold);
        assert_eq!(text.align_y, Vertical::Bottom);
    }

    #[test]
    fn test_negative_clip_is_empty() {
        let rect = to_rectangle(Rect::new(0.0, 0.0, -5.0, 10.0));
        assert_eq!(rect.width, 0.0);
        assert_eq!(rect.height, 10.0);
    }
}
