// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Tracing setup and the structured events emitted by the engine.
//!
//! Log lines go to stderr so that command output on stdout stays machine-readable.

use anyhow::{Context, Result};
use std::env;
use std::io;
use std::str::FromStr;
use tracing::{debug, info, warn};
use tracing_subscriber::fmt::{self, format::FmtSpan};
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use crate::constants::env_vars;
use crate::models::RunId;
use crate::stats::StatsSummary;

const DEFAULT_FILTER: &str = "warn";

/// Subscriber settings for the CLI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `warn` or `running_page_stats::stats=debug`
    pub filter: String,
    pub format: LogFormat,
    /// Source file and line of each event
    pub source_location: bool,
    /// Thread ids and names
    pub threads: bool,
    /// Span open/close events
    pub spans: bool,
}

/// Line format of the fmt layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    Json,
    Pretty,
    #[default]
    Compact,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "pretty" => Ok(LogFormat::Pretty),
            "compact" | "" => Ok(LogFormat::Compact),
            other => Err(anyhow::anyhow!("unknown log format '{}'", other)),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: DEFAULT_FILTER.to_string(),
            format: LogFormat::default(),
            source_location: false,
            threads: false,
            spans: false,
        }
    }
}

impl LoggingConfig {
    /// Settings from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Settings from an arbitrary key lookup.
    ///
    /// An unknown format name falls back to compact output; the toggles are
    /// on whenever their variable is set.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            filter: lookup(env_vars::LOG_FILTER).unwrap_or_else(|| DEFAULT_FILTER.to_string()),
            format: lookup(env_vars::LOG_FORMAT)
                .and_then(|name| name.parse().ok())
                .unwrap_or_default(),
            source_location: lookup(env_vars::LOG_SOURCE_LOCATION).is_some(),
            threads: lookup(env_vars::LOG_THREADS).is_some(),
            spans: lookup(env_vars::LOG_SPANS).is_some(),
        }
    }

    /// Install the global subscriber; fails if one is already installed
    pub fn init(&self) -> Result<()> {
        let filter = EnvFilter::try_new(&self.filter)
            .with_context(|| format!("Invalid log filter: {}", self.filter))?;
        let layer = fmt::layer()
            .with_writer(io::stderr)
            .with_file(self.source_location)
            .with_line_number(self.source_location)
            .with_thread_ids(self.threads)
            .with_thread_names(self.threads)
            .with_span_events(if self.spans {
                FmtSpan::NEW | FmtSpan::CLOSE
            } else {
                FmtSpan::NONE
            });

        let subscriber = tracing_subscriber::registry().with(filter);
        match self.format {
            LogFormat::Json => subscriber.with(layer.json()).try_init(),
            LogFormat::Pretty => subscriber.with(layer.pretty()).try_init(),
            LogFormat::Compact => subscriber.with(layer.compact()).try_init(),
        }
        .context("Failed to install tracing subscriber")?;

        debug!(
            log.filter = %self.filter,
            log.format = ?self.format,
            version = env!("CARGO_PKG_VERSION"),
            "Logging ready"
        );
        Ok(())
    }
}

/// Install the subscriber configured by `RUST_LOG` and the `LOG_*` variables
pub fn init_from_env() -> Result<()> {
    LoggingConfig::from_env().init()
}

/// Structured log events emitted by the statistics engine
pub struct StatsLogger;

impl StatsLogger {
    /// Log a successful dataset load
    pub fn log_dataset_loaded(origin: &str, activity_count: usize, duration_ms: u64) {
        info!(
            dataset.origin = %origin,
            dataset.activities = %activity_count,
            dataset.duration_ms = %duration_ms,
            "Activity dataset loaded"
        );
    }

    /// Log the outcome of the one-time aggregation fold
    pub fn log_aggregation(summary: &StatsSummary, period_titles: usize, duration_ms: u64) {
        info!(
            stats.activities = %summary.activities,
            stats.years = %summary.years,
            stats.countries = %summary.countries,
            stats.provinces = %summary.provinces,
            stats.cities = %summary.cities,
            stats.period_titles = %period_titles,
            stats.duration_ms = %duration_ms,
            "Activity statistics aggregated"
        );
    }

    /// Log the manual location correction being applied to a record
    pub fn log_location_override(location_text: &str, corrected_city: &str) {
        warn!(
            location.text = %location_text,
            location.city = %corrected_city,
            "Location data correction applied"
        );
    }

    /// Log an activity whose encoded path could not be decoded
    pub fn log_path_decode_failure(run_id: RunId, error: &str) {
        warn!(
            activity.run_id = %run_id,
            path.error = %error,
            "Failed to decode activity path"
        );
    }
}
