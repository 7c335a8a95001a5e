//! Viewer configuration
//!
//! Configuration is stored as YAML in the user's config directory.
//! Default location: ~/.config/lapview/config.yaml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use lapview_core::config;
use lapview_core::options::ViewOptions;
use lapview_core::render::RenderMode;
use lapview_core::DriverId;

/// Root configuration structure
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Driver whose boxplot is highlighted as "you"
    pub user_id: Option<DriverId>,
    /// Diagram toggles, restored between sessions
    pub options: ViewOptions,
    pub render_mode: RenderMode,
    pub window: WindowConfig,
    /// Dataset opened when none is given on the command line
    pub dataset_path: Option<PathBuf>,
}

/// Initial window size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1400.0,
            height: 860.0,
        }
    }
}

/// Get the default config file path
///
/// Returns: ~/.config/lapview/config.yaml
pub fn default_config_path() -> PathBuf {
    config::default_config_path("config.yaml")
}

/// Get the default style file path
///
/// Returns: ~/.config/lapview/style.yaml
pub fn default_style_path() -> PathBuf {
    config::default_config_path("style.yaml")
}

/// Load configuration, falling back to defaults when missing or invalid
pub fn load_config(path: &Path) -> ViewerConfig {
    let config: ViewerConfig = config::load_config(path);
    log::info!(
        "load_config: User {:?}, render mode {:?}, window {}x{}",
        config.user_id,
        config.render_mode,
        config.window.width,
        config.window.height
    );
    config
}

/// Save configuration to a YAML file
///
/// Creates parent directories if they don't exist.
pub fn save_config(config: &ViewerConfig, path: &Path) -> Result<()> {
    log::info!("save_config: Saving to {:?}", path);

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
    }

    let yaml = serde_yaml::to_string(config).context("Failed to serialize config to YAML")?;

    std::fs::write(path, yaml)
        .with_context(|| format!("Failed to write config file: {:?}", path))?;

    log::info!("save_config: Config saved successfully");
    Ok(())
}
