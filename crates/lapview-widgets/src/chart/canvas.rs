//! Canvas Program for the boxplot chart
//!
//! The canvas covers the whole chart: gutter on the left, plot area, footer
//! below. Pointer input is reported to the engine in plot-area coordinates
//! (origin at the plot's top-left corner).

use super::replay::replay;
use iced::widget::canvas::{self, Event, Frame, Geometry, Program};
use iced::{keyboard, mouse, Point, Rectangle, Size, Theme};

use lapview_core::geometry;
use lapview_core::interaction::PointerInput;
use lapview_core::render::DrawList;

// =============================================================================
// Chart Layout
// =============================================================================

/// Where the plot area sits inside the canvas bounds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartGeometry {
    pub gutter_width: f32,
    pub footer_height: f32,
}

impl ChartGeometry {
    /// Plot area size for a canvas of `bounds` size
    pub fn plot_size(&self, bounds: Size) -> Size {
        Size::new(
            (bounds.width - self.gutter_width).max(0.0),
            (bounds.height - self.footer_height).max(0.0),
        )
    }

    /// Canvas-relative position to plot-area coordinates
    pub fn to_plot_area(&self, position: Point) -> geometry::Point {
        geometry::Point::new(position.x - self.gutter_width, position.y)
    }

    pub fn is_over_plot(&self, position: Point, bounds: Size) -> bool {
        let plot = self.plot_size(bounds);
        position.x >= self.gutter_width
            && position.x <= self.gutter_width + plot.width
            && position.y >= 0.0
            && position.y <= plot.height
    }
}

// =============================================================================
// Canvas Interaction State
// =============================================================================

/// Widget-local state the engine does not track
#[derive(Debug, Clone, Copy, Default)]
pub struct ChartInteraction {
    /// Ctrl held: wheel events are left to the host (browser-style page zoom)
    pub ctrl_held: bool,
    /// Left button pressed inside the plot; moves keep flowing outside it
    pub is_dragging: bool,
    /// Pointer was over the plot on the last move
    pub is_hovering: bool,
    /// Bounds seen on the last event, to detect resizes
    pub last_size: Option<Size>,
}

/// Translate one iced event into engine pointer input
///
/// `position` is the cursor relative to the canvas, `None` when it is
/// outside the canvas bounds.
pub fn pointer_input(
    chart: &ChartGeometry,
    interaction: &mut ChartInteraction,
    event: &Event,
    bounds: Size,
    position: Option<Point>,
) -> Option<PointerInput> {
    let over_plot = position.filter(|p| chart.is_over_plot(*p, bounds));

    match event {
        Event::Keyboard(keyboard::Event::ModifiersChanged(modifiers)) => {
            interaction.ctrl_held = modifiers.control();
            None
        }
        Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
            let p = over_plot?;
            interaction.is_dragging = true;
            Some(PointerInput::Down(chart.to_plot_area(p)))
        }
        Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)) => {
            if interaction.is_dragging {
                interaction.is_dragging = false;
                Some(PointerInput::Up)
            } else {
                None
            }
        }
        Event::Mouse(mouse::Event::CursorMoved { .. }) => match over_plot {
            Some(p) => {
                interaction.is_hovering = true;
                Some(PointerInput::Move(chart.to_plot_area(p)))
            }
            None if interaction.is_dragging => {
                // Keep panning while the button is held outside the plot
                let p = position?;
                Some(PointerInput::Move(chart.to_plot_area(p)))
            }
            None if interaction.is_hovering => {
                interaction.is_hovering = false;
                Some(PointerInput::Leave)
            }
            None => None,
        },
        Event::Mouse(mouse::Event::CursorLeft) => {
            let was_active = interaction.is_hovering || interaction.is_dragging;
            interaction.is_hovering = false;
            interaction.is_dragging = false;
            was_active.then_some(PointerInput::Leave)
        }
        Event::Mouse(mouse::Event::WheelScrolled { delta }) => {
            let p = over_plot?;
            // iced reports scrolling up as positive y; the engine wants DOM sign
            let delta_y = match delta {
                mouse::ScrollDelta::Lines { y, .. } => -*y,
                mouse::ScrollDelta::Pixels { y, .. } => -*y,
            };
            Some(PointerInput::Wheel {
                position: chart.to_plot_area(p),
                delta_y,
                ctrl: interaction.ctrl_held,
            })
        }
        _ => None,
    }
}

// =============================================================================
// Chart Canvas Program
// =============================================================================

/// Canvas program for the boxplot chart
///
/// Draws the pre-recorded `draw_list` and reports pointer input through
/// `on_pointer`. `on_resize` is called with the new plot-area size whenever
/// the canvas bounds change.
pub struct ChartCanvas<'a, Message, P, R>
where
    P: Fn(PointerInput) -> Message,
    R: Fn(geometry::Size) -> Message,
{
    pub draw_list: &'a DrawList,
    pub chart: ChartGeometry,
    pub on_pointer: P,
    pub on_resize: R,
}

impl<'a, Message, P, R> Program<Message> for ChartCanvas<'a, Message, P, R>
where
    Message: Clone,
    P: Fn(PointerInput) -> Message,
    R: Fn(geometry::Size) -> Message,
{
    type State = ChartInteraction;

    fn update(
        &self,
        interaction: &mut Self::State,
        event: &Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<canvas::Action<Message>> {
        let size = bounds.size();
        if interaction.last_size != Some(size) {
            interaction.last_size = Some(size);
            let plot = self.chart.plot_size(size);
            log::debug!("ChartCanvas: Bounds {}x{}, plot {}x{}", size.width, size.height, plot.width, plot.height);
            return Some(canvas::Action::publish((self.on_resize)(geometry::Size::new(
                plot.width,
                plot.height,
            ))));
        }

        let input = pointer_input(
            &self.chart,
            interaction,
            event,
            size,
            cursor.position_in(bounds),
        )?;
        let action = canvas::Action::publish((self.on_pointer)(input));
        // Wheel zoom must not scroll an enclosing scrollable
        if matches!(input, PointerInput::Wheel { .. }) {
            Some(action.and_capture())
        } else {
            Some(action)
        }
    }

    fn mouse_interaction(
        &self,
        interaction: &Self::State,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        if interaction.is_dragging {
            mouse::Interaction::Grabbing
        } else if cursor
            .position_in(bounds)
            .is_some_and(|p| self.chart.is_over_plot(p, bounds.size()))
        {
            mouse::Interaction::Grab
        } else {
            mouse::Interaction::default()
        }
    }

    fn draw(
        &self,
        _interaction: &Self::State,
        renderer: &iced::Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        replay(&mut frame, self.draw_list);
        vec![frame.into_geometry()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHART: ChartGeometry = ChartGeometry {
        gutter_width: 150.0,
        footer_height: 80.0,
    };
    const BOUNDS: Size = Size::new(950.0, 680.0);

    fn feed(interaction: &mut ChartInteraction, event: Event, position: Option<Point>) -> Option<PointerInput> {
        pointer_input(&CHART, interaction, &event, BOUNDS, position)
    }

    #[test]
    fn test_plot_size_excludes_gutter_and_footer() {
        assert_eq!(CHART.plot_size(BOUNDS), Size::new(800.0, 600.0));
        assert_eq!(CHART.plot_size(Size::new(100.0, 50.0)), Size::new(0.0, 0.0));
    }

    #[test]
    fn test_press_and_move_in_plot_coordinates() {
        let mut interaction = ChartInteraction::default();
        let input = feed(
            &mut interaction,
            Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)),
            Some(Point::new(200.0, 100.0)),
        );
        assert_eq!(input, Some(PointerInput::Down(geometry::Point::new(50.0, 100.0))));
        assert!(interaction.is_dragging);

        // Still reported while dragging over the gutter
        let input = feed(
            &mut interaction,
            Event::Mouse(mouse::Event::CursorMoved {
                position: Point::new(100.0, 100.0),
            }),
            Some(Point::new(100.0, 100.0)),
        );
        assert_eq!(input, Some(PointerInput::Move(geometry::Point::new(-50.0, 100.0))));

        let input = feed(
            &mut interaction,
            Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)),
            Some(Point::new(100.0, 100.0)),
        );
        assert_eq!(input, Some(PointerInput::Up));
        assert!(!interaction.is_dragging);
    }

    #[test]
    fn test_press_outside_plot_is_ignored() {
        let mut interaction = ChartInteraction::default();
        let input = feed(
            &mut interaction,
            Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)),
            Some(Point::new(40.0, 100.0)),
        );
        assert_eq!(input, None);
        assert!(!interaction.is_dragging);
    }

    #[test]
    fn test_leaving_plot_reports_leave_once() {
        let mut interaction = ChartInteraction::default();
        let moved = |p: Point| Event::Mouse(mouse::Event::CursorMoved { position: p });

        assert!(matches!(
            feed(&mut interaction, moved(Point::new(300.0, 300.0)), Some(Point::new(300.0, 300.0))),
            Some(PointerInput::Move(_))
        ));
        // Into the footer
        assert_eq!(
            feed(&mut interaction, moved(Point::new(300.0, 650.0)), Some(Point::new(300.0, 650.0))),
            Some(PointerInput::Leave)
        );
        assert_eq!(
            feed(&mut interaction, moved(Point::new(300.0, 660.0)), Some(Point::new(300.0, 660.0))),
            None
        );
    }

    #[test]
    fn test_wheel_sign_and_ctrl() {
        let mut interaction = ChartInteraction::default();
        let up = Event::Mouse(mouse::Event::WheelScrolled {
            delta: mouse::ScrollDelta::Lines { x: 0.0, y: 1.0 },
        });
        let input = feed(&mut interaction, up.clone(), Some(Point::new(550.0, 300.0)));
        assert_eq!(
            input,
            Some(PointerInput::Wheel {
                position: geometry::Point::new(400.0, 300.0),
                delta_y: -1.0,
                ctrl: false,
            })
        );

        feed(
            &mut interaction,
            Event::Keyboard(keyboard::Event::ModifiersChanged(keyboard::Modifiers::CTRL)),
            None,
        );
        let input = feed(&mut interaction, up, Some(Point::new(550.0, 300.0)));
        assert!(matches!(input, Some(PointerInput::Wheel { ctrl: true, .. })));
    }
}
