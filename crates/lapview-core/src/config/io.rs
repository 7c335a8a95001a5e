//! Generic configuration loading

use serde::de::DeserializeOwned;
use std::path::Path;

/// Load configuration from a YAML file
///
/// If the file doesn't exist, returns default config.
/// If the file exists but is invalid, logs a warning and returns default config.
///
/// # Example
///
/// ```ignore
/// let style: StyleConfig = load_config(Path::new("style.yaml"));
/// ```
pub fn load_config<T>(path: &Path) -> T
where
    T: DeserializeOwned + Default,
{
    log::info!("load_config: Loading from {:?}", path);

    if !path.exists() {
        log::info!("load_config: Config file doesn't exist, using defaults");
        return T::default();
    }

    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) => {
            log::warn!("load_config: Failed to read config file: {}, using defaults", e);
            return T::default();
        }
    };

    match serde_yaml::from_str::<T>(&contents) {
        Ok(config) => {
            log::info!("load_config: Loaded config from {:?}", path);
            config
        }
        Err(e) => {
            log::warn!("load_config: Failed to parse config: {}, using defaults", e);
            T::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Deserialize)]
    #[serde(default)]
    struct TestConfig {
        value: i32,
        name: String,
    }

    impl Default for TestConfig {
        fn default() -> Self {
            Self {
                value: 7,
                name: "default".to_string(),
            }
        }
    }

    #[test]
    fn test_load_nonexistent_returns_default() {
        let config: TestConfig = load_config(Path::new("/nonexistent/path/config.yaml"));
        assert_eq!(config, TestConfig::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "value: 42\n").unwrap();

        let config: TestConfig = load_config(&path);
        assert_eq!(config.value, 42);
        assert_eq!(config.name, "default");
    }

    #[test]
    fn test_invalid_yaml_returns_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "value: [not, a, number\n").unwrap();

        let config: TestConfig = load_config(&path);
        assert_eq!(config, TestConfig::default());
    }
}
