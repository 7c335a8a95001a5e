//! iced widgets for lapview
//!
//! The boxplot engine in `lapview-core` never touches a GUI toolkit: it
//! records each frame into a [`DrawList`](lapview_core::render::DrawList).
//! This crate replays that list onto an iced canvas and feeds iced mouse
//! events back to the engine as pointer input.
//!
//! ## Architecture (iced 0.14 patterns)
//!
//! - **State**: owned by the application (`ChartSession` + the recorded `DrawList`)
//! - **View functions**: take state + callbacks, return `Element<Message>`
//! - **Canvas Programs**: replay draw instructions and translate events into callbacks
//!
//! ## View Functions
//!
//! - `boxplot_chart`: the full chart (gutter, plot, footer) with pan, zoom and hover

pub mod chart;

pub use chart::{boxplot_chart, to_color, ChartCanvas, ChartGeometry};
