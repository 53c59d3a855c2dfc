// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Environment-based overrides applied on top of the file configuration

use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;
use tracing::{debug, info};

use super::StatsConfig;
use crate::constants::env_vars;

/// Apply overrides from the process environment, reading `.env` first if present
pub fn apply_env_overrides(config: &mut StatsConfig) -> Result<()> {
    if let Err(e) = dotenv::dotenv() {
        debug!("No .env file loaded: {}", e);
    }

    apply_overrides_from(config, |key| env::var(key).ok())
}

/// Apply overrides from an arbitrary key lookup
pub fn apply_overrides_from<F>(config: &mut StatsConfig, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(path) = lookup(env_vars::ACTIVITIES_PATH) {
        info!(path = %path, "Dataset path overridden from environment");
        config.activities_path = PathBuf::from(path);
    }

    if let Some(value) = lookup(env_vars::RICH_TITLE) {
        config.rich_title = parse_flag(&value)
            .with_context(|| format!("Invalid {} value: {}", env_vars::RICH_TITLE, value))?;
    }

    if let Some(value) = lookup(env_vars::FIX_MAP_OFFSET) {
        config.fix_map_offset = parse_flag(&value)
            .with_context(|| format!("Invalid {} value: {}", env_vars::FIX_MAP_OFFSET, value))?;
    }

    Ok(())
}

/// Parse a boolean flag: `1/0`, `true/false`, `yes/no`, `on/off`
fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(anyhow::anyhow!("expected a boolean, got '{}'", other)),
    }
}
