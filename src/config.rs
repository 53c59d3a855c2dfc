// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Configuration management for the statistics engine

pub mod environment;
pub mod stats_config;

use std::path::PathBuf;

use crate::constants::defaults;

pub use stats_config::{StatsConfig, TitleTable};

/// Per-user config file location, e.g. `~/.config/running-page-stats/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join(defaults::CONFIG_DIR).join("config.toml"))
}

/// Load configuration and apply environment overrides
pub fn load_with_env(path: Option<String>) -> anyhow::Result<StatsConfig> {
    let mut config = StatsConfig::load(path)?;
    environment::apply_env_overrides(&mut config)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_path_is_namespaced() {
        if let Some(path) = default_config_path() {
            assert!(path.ends_with("running-page-stats/config.toml"));
        }
    }

    #[test]
    fn test_load_explicit_path() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("config.toml");
        fs::write(&config_path, "rich_title = false\ntreadmill_marker = \"Treadmill\"\n")?;

        let config = StatsConfig::load(Some(config_path.to_string_lossy().to_string()))?;
        assert!(!config.rich_title);
        assert_eq!(config.treadmill_marker, "Treadmill");
        Ok(())
    }

    #[test]
    fn test_load_explicit_missing_path_fails() {
        assert!(StatsConfig::load(Some("/nonexistent/config.toml".to_string())).is_err());
    }
}
