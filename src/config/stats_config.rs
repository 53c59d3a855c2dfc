// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Statistics configuration: title vocabulary, rich-title mode and dataset location

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{defaults, period_keys, titles};

/// Main statistics configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsConfig {
    /// Prefer user-supplied names and city-qualified titles over bare type titles
    pub rich_title: bool,
    /// Period titles containing this marker are pinned first in the grouped view
    pub treadmill_marker: String,
    /// Convert decoded paths from GCJ-02 to WGS-84
    pub fix_map_offset: bool,
    /// Location of the activity dataset
    pub activities_path: PathBuf,
    /// Display titles per canonical period key
    pub titles: TitleTable,
}

/// Mapping from canonical period key to display title.
///
/// A `[titles]` table in the config file is merged over the default titles,
/// so it only needs the keys it renames. Keys without an entry fall back to
/// the plain-run title.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "HashMap<String, String>", into = "HashMap<String, String>")]
pub struct TitleTable {
    titles: HashMap<String, String>,
}

impl From<HashMap<String, String>> for TitleTable {
    fn from(overrides: HashMap<String, String>) -> Self {
        let mut table = Self::default();
        table.titles.extend(overrides);
        table
    }
}

impl From<TitleTable> for HashMap<String, String> {
    fn from(table: TitleTable) -> Self {
        table.titles
    }
}

impl TitleTable {
    /// Display title for a canonical key
    pub fn title_for(&self, key: &str) -> &str {
        self.titles
            .get(key)
            .or_else(|| self.titles.get(period_keys::RUN))
            .map(String::as_str)
            .unwrap_or(titles::RUN_TITLE)
    }

    /// Override or add a title
    pub fn set(&mut self, key: impl Into<String>, title: impl Into<String>) {
        self.titles.insert(key.into(), title.into());
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }
}

impl Default for TitleTable {
    fn default() -> Self {
        Self {
            titles: titles::DEFAULT_TITLES
                .iter()
                .map(|(key, title)| ((*key).to_string(), (*title).to_string()))
                .collect(),
        }
    }
}

impl StatsConfig {
    /// Load configuration from file or use defaults
    ///
    /// Lookup order: explicit path, `stats_config.toml` in the working
    /// directory, the platform config directory, then embedded defaults.
    pub fn load(path: Option<String>) -> Result<Self> {
        if let Some(config_path) = path {
            return Self::load_from_file(&config_path);
        }

        if Path::new(defaults::CONFIG_FILE).exists() {
            return Self::load_from_file(defaults::CONFIG_FILE);
        }

        if let Some(user_path) = super::default_config_path() {
            if user_path.exists() {
                return Self::load_from_file(&user_path.to_string_lossy());
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read stats config file: {}", path))?;

        let config: StatsConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse stats config file: {}", path))?;

        Ok(config)
    }

    /// Write the configuration as TOML, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize stats config")?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write stats config file: {}", path.display()))?;

        Ok(())
    }

    /// Display title for a canonical key
    pub fn title_for(&self, key: &str) -> &str {
        self.titles.title_for(key)
    }
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            rich_title: true,
            treadmill_marker: titles::INDOOR_RUN_TITLE.to_string(),
            fix_map_offset: false,
            activities_path: PathBuf::from(defaults::ACTIVITIES_FILE),
            titles: TitleTable::default(),
        }
    }
}
