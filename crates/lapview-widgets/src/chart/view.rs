//! Chart view function
//!
//! ```ignore
//! fn view(&self) -> Element<Message> {
//!     let chart = boxplot_chart(
//!         &self.draw_list,
//!         ChartGeometry { gutter_width: 150.0, footer_height: 80.0 },
//!         Message::Pointer,
//!         Message::PlotResized,
//!     );
//!     column![toolbar, chart].into()
//! }
//! ```

use super::canvas::{ChartCanvas, ChartGeometry};
use iced::widget::Canvas;
use iced::{Element, Length};

use lapview_core::geometry;
use lapview_core::interaction::PointerInput;
use lapview_core::render::DrawList;

/// Create the boxplot chart element
///
/// # Arguments
///
/// * `draw_list` - The last frame recorded by the render loop
/// * `chart` - Gutter and footer sizes, to locate the plot area
/// * `on_pointer` - Called with pointer input in plot-area coordinates
/// * `on_resize` - Called with the plot-area size when the widget is resized
pub fn boxplot_chart<'a, Message>(
    draw_list: &'a DrawList,
    chart: ChartGeometry,
    on_pointer: impl Fn(PointerInput) -> Message + 'a,
    on_resize: impl Fn(geometry::Size) -> Message + 'a,
) -> Element<'a, Message>
where
    Message: Clone + 'a,
{
    Canvas::new(ChartCanvas {
        draw_list,
        chart,
        on_pointer,
        on_resize,
    })
    .width(Length::Fill)
    .height(Length::Fill)
    .into()
}
