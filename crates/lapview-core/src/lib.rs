//! Lapview Core - Boxplot engine for per-driver lap time analysis
//!
//! Data flow: a raw [`EventDataset`] goes through the [`pipeline`] into a
//! prepared dataset, the [`geometry`] builder turns it into per-driver
//! records, the [`render`] loop paints them and the [`hit_test`] module maps
//! the pointer back to a primitive. [`session::ChartSession`] ties it all
//! together for a host application.

pub mod config;
pub mod error;
pub mod geometry;
pub mod interaction;
pub mod loader;
pub mod options;
pub mod pipeline;
pub mod render;
pub mod session;
pub mod style;
pub mod transform;
pub mod types;

pub use error::{DatasetError, DatasetResult};
pub use session::ChartSession;
pub use types::*;
