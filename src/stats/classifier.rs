// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Activity type classification and display titles.
//!
//! Runs are reclassified by subtype and distance into a closed set of
//! period keys; every other activity type passes through unchanged.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::location::LocationResolver;
use crate::config::{StatsConfig, TitleTable};
use crate::constants::{activity_types, period_keys, thresholds};
use crate::models::Activity;

/// Canonical period key produced by [`classify`]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum PeriodKey {
    Run,
    Trail,
    Track,
    IndoorRun,
    HalfMarathon,
    FullMarathon,
    TrailRun,
    /// Non-run activity type, kept verbatim
    Other(String),
}

impl PeriodKey {
    pub fn as_str(&self) -> &str {
        match self {
            PeriodKey::Run => period_keys::RUN,
            PeriodKey::Trail => period_keys::TRAIL,
            PeriodKey::Track => period_keys::TRACK,
            PeriodKey::IndoorRun => period_keys::INDOOR_RUN,
            PeriodKey::HalfMarathon => period_keys::HALF_MARATHON,
            PeriodKey::FullMarathon => period_keys::FULL_MARATHON,
            PeriodKey::TrailRun => period_keys::TRAIL_RUN,
            PeriodKey::Other(key) => key,
        }
    }

    pub fn from_key(key: &str) -> Self {
        match key {
            period_keys::RUN => PeriodKey::Run,
            period_keys::TRAIL => PeriodKey::Trail,
            period_keys::TRACK => PeriodKey::Track,
            period_keys::INDOOR_RUN => PeriodKey::IndoorRun,
            period_keys::HALF_MARATHON => PeriodKey::HalfMarathon,
            period_keys::FULL_MARATHON => PeriodKey::FullMarathon,
            period_keys::TRAIL_RUN => PeriodKey::TrailRun,
            other => PeriodKey::Other(other.to_string()),
        }
    }

    /// Keys counted by the city-independent period table.
    ///
    /// `Trail` shares the trail-run title, so it is counted alongside `TrailRun`.
    pub fn is_race_distance(&self) -> bool {
        matches!(
            self,
            PeriodKey::HalfMarathon | PeriodKey::FullMarathon | PeriodKey::TrailRun | PeriodKey::Trail
        )
    }
}

impl fmt::Display for PeriodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<PeriodKey> for String {
    fn from(key: PeriodKey) -> Self {
        key.as_str().to_string()
    }
}

impl From<String> for PeriodKey {
    fn from(key: String) -> Self {
        PeriodKey::from_key(&key)
    }
}

/// Marathon bucket for a distance in meters, lower bounds inclusive
pub fn marathon_bucket(distance_m: f64) -> Option<PeriodKey> {
    let distance_km = distance_m / 1000.0;
    if distance_km >= thresholds::FULL_MARATHON_KM {
        Some(PeriodKey::FullMarathon)
    } else if distance_km >= thresholds::HALF_MARATHON_KM {
        Some(PeriodKey::HalfMarathon)
    } else {
        None
    }
}

/// Classify an activity into its canonical period key
pub fn classify(activity: &Activity) -> PeriodKey {
    match activity.activity_type.as_str() {
        activity_types::RUN => match activity.subtype.as_str() {
            activity_types::SUBTYPE_TRAIL => PeriodKey::Trail,
            activity_types::SUBTYPE_TRACK => PeriodKey::Track,
            _ if activity.subtype == activity_types::SUBTYPE_INDOOR
                || activity.location_text().is_none() =>
            {
                PeriodKey::IndoorRun
            }
            _ => marathon_bucket(activity.distance).unwrap_or(PeriodKey::Run),
        },
        activity_types::TRAIL_RUN => {
            marathon_bucket(activity.distance).unwrap_or(PeriodKey::TrailRun)
        }
        other => PeriodKey::Other(other.to_string()),
    }
}

/// Produces display titles using the configured title table
#[derive(Debug, Clone)]
pub struct TypeClassifier {
    titles: TitleTable,
    rich_title: bool,
}

impl TypeClassifier {
    pub fn new(config: &StatsConfig) -> Self {
        Self {
            titles: config.titles.clone(),
            rich_title: config.rich_title,
        }
    }

    pub fn classify(&self, activity: &Activity) -> PeriodKey {
        classify(activity)
    }

    /// Display title for a canonical key
    pub fn title_for(&self, key: &PeriodKey) -> &str {
        self.titles.title_for(key.as_str())
    }

    /// Bare type title, ignoring names, cities and rich-title mode
    pub fn title_no_city(&self, activity: &Activity) -> &str {
        self.title_for(&classify(activity))
    }

    /// Display title for an activity.
    ///
    /// In rich-title mode a non-empty activity name wins, then
    /// `"<city> <type title>"` when the city is known. Otherwise the bare
    /// type title is returned.
    pub fn title(&self, activity: &Activity, resolver: &LocationResolver) -> String {
        if !self.rich_title {
            return self.title_no_city(activity).to_string();
        }

        if !activity.name.is_empty() {
            return activity.name.clone();
        }

        let type_title = self.title_no_city(activity);
        let city = resolver.resolve(activity).city;
        if city.is_empty() || type_title.is_empty() {
            type_title.to_string()
        } else {
            format!("{} {}", city, type_title)
        }
    }
}
