//! Boxplot chart canvas
//!
//! - `canvas`: the `Program` implementation and event translation
//! - `replay`: draw list to iced `Frame`
//! - `view`: the `boxplot_chart` view function

mod canvas;
mod replay;
mod view;

pub use canvas::{ChartCanvas, ChartGeometry, ChartInteraction};
pub use replay::{replay, to_color};
pub use view::boxplot_chart;
