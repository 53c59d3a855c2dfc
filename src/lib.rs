// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! # Running Page Stats
//!
//! Derives location, classification and aggregate statistics from a static
//! collection of exercise activities, as exported for a personal running page.
//!
//! ## Features
//!
//! - **Location inference**: country, province and city from free-text
//!   reverse-geocoding output, with municipality handling
//! - **Classification**: runs reclassified into trail, track, treadmill,
//!   half- and full-marathon periods by subtype and distance
//! - **Aggregation**: per-city distance, provinces, countries, years and
//!   period frequency tables, computed once per dataset
//! - **Filtering**: click-through filters by year, city, title and type
//!
//! ## Architecture
//!
//! - **Models**: activity records and derived values
//! - **Stats**: resolver, classifier, period tables and the aggregating engine
//! - **Dataset**: loading the activity JSON
//! - **Config**: title vocabulary and display switches
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use running_page_stats::config::StatsConfig;
//! use running_page_stats::stats::StatsEngine;
//! use std::path::Path;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = StatsConfig::load(None)?;
//!     let engine = StatsEngine::from_path(Path::new("activities.json"), config)?;
//!
//!     let stats = engine.stats();
//!     println!("This year: {}", stats.this_year);
//!     for entry in &stats.sorted_run_period {
//!         println!("{}: {}", entry.title, entry.count);
//!     }
//!
//!     Ok(())
//! }
//! ```

/// Common data models for activity data
pub mod models;

/// Configuration management and persistence
pub mod config;

/// Application constants and fixed vocabularies
pub mod constants;

/// Error types
pub mod errors;

/// Structured logging
pub mod logging;

/// Loading the static activity collection
pub mod dataset;

/// Location inference, classification and aggregation
pub mod stats;
