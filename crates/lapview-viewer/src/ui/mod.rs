//! UI module for the lap-time viewer
//!
//! Built with iced. The chart itself is a canvas from `lapview-widgets`
//! replaying frames recorded by the core render loop.

pub mod app;
pub mod options_panel;

pub use app::LapviewApp;
