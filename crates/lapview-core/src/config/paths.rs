//! Standard configuration locations

use std::path::PathBuf;

/// Get the lapview config directory
///
/// Returns: `~/.config/lapview` (platform config dir, falling back to home)
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
        .join("lapview")
}

/// Get the path of a config file, e.g. `config.yaml` or `style.yaml`
pub fn default_config_path(filename: &str) -> PathBuf {
    default_config_dir().join(filename)
}
