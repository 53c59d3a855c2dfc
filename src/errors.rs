// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Error types for the fallible edges of the crate.
//!
//! The statistics engine itself never fails: malformed records degrade to
//! empty locations and zero distances. Only loading data and parsing user
//! input can produce a [`StatsError`].

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum StatsError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse activities from {origin}: {source}")]
    Json {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unknown filter kind '{0}' (expected year, city, title, type or type-name)")]
    InvalidFilter(String),
}

pub type Result<T> = std::result::Result<T, StatsError>;
