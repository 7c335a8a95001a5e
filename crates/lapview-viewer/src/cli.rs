//! Command line arguments
//!
//! `lapview-viewer [DATASET.json] [--user ID] [--on-dirty]`

use anyhow::{bail, Context, Result};
use std::path::PathBuf;

use lapview_core::render::RenderMode;
use lapview_core::DriverId;

use crate::config::ViewerConfig;

pub const USAGE: &str = "usage: lapview-viewer [DATASET.json] [--user ID] [--on-dirty]";

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CliArgs {
    pub dataset: Option<PathBuf>,
    pub user_id: Option<DriverId>,
    /// Repaint only after input instead of every frame
    pub on_dirty: bool,
    pub help: bool,
}

impl CliArgs {
    /// Parse arguments, program name excluded
    pub fn parse<I>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut parsed = CliArgs::default();
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--user" => {
                    let value = args.next().context("--user needs a driver id")?;
                    let id = value
                        .parse::<u64>()
                        .with_context(|| format!("Invalid driver id: {}", value))?;
                    parsed.user_id = Some(DriverId(id));
                }
                "--on-dirty" => parsed.on_dirty = true,
                "-h" | "--help" => parsed.help = true,
                flag if flag.starts_with("--") => bail!("Unknown flag: {}", flag),
                path => {
                    if parsed.dataset.is_some() {
                        bail!("Only one dataset can be opened, got extra {}", path);
                    }
                    parsed.dataset = Some(PathBuf::from(path));
                }
            }
        }
        Ok(parsed)
    }

    /// Command line wins over the config file
    pub fn apply(&self, config: &mut ViewerConfig) {
        if let Some(path) = &self.dataset {
            config.dataset_path = Some(path.clone());
        }
        if let Some(id) = self.user_id {
            config.user_id = Some(id);
        }
        if self.on_dirty {
            config.render_mode = RenderMode::OnDirty;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_all_flags() {
        let cli = CliArgs::parse(args(&["event.json", "--user", "42", "--on-dirty"])).unwrap();
        assert_eq!(cli.dataset, Some(PathBuf::from("event.json")));
        assert_eq!(cli.user_id, Some(DriverId(42)));
        assert!(cli.on_dirty);
        assert!(!cli.help);
    }

    #[test]
    fn test_parse_errors() {
        assert!(CliArgs::parse(args(&["--user"])).is_err());
        assert!(CliArgs::parse(args(&["--user", "abc"])).is_err());
        assert!(CliArgs::parse(args(&["--verbose"])).is_err());
        assert!(CliArgs::parse(args(&["a.json", "b.json"])).is_err());
    }

    #[test]
    fn test_apply_overrides_config() {
        let mut config = ViewerConfig {
            user_id: Some(DriverId(1)),
            dataset_path: Some(PathBuf::from("old.json")),
            ..ViewerConfig::default()
        };
        let cli = CliArgs::parse(args(&["--user", "9", "--on-dirty"])).unwrap();
        cli.apply(&mut config);
        assert_eq!(config.user_id, Some(DriverId(9)));
        assert_eq!(config.render_mode, RenderMode::OnDirty);
        // No dataset on the command line keeps the configured one
        assert_eq!(config.dataset_path, Some(PathBuf::from("old.json")));
    }
}
