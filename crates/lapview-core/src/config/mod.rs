//! Shared configuration utilities
//!
//! Generic YAML loading used by the style file and the viewer's own
//! configuration, plus the standard config locations.
//!
//! # Usage
//!
//! ```ignore
//! use lapview_core::config::{load_config, default_config_path};
//!
//! let config: MyAppConfig = load_config(&default_config_path("config.yaml"));
//! ```

mod io;
mod paths;

pub use io::load_config;
pub use paths::{default_config_dir, default_config_path};
