// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Location inference from free-text reverse-geocoding output.
//!
//! Location text looks like `"天河区, 广州市, 广东省, 510000, 中国"`, sometimes
//! followed by a dictionary dump carrying `'latitude'` and `'longitude'`.
//! Parsing is best-effort and never fails: anything that cannot be
//! recognized is left empty.

use std::collections::HashMap;
use std::sync::RwLock;
use tracing::debug;

use super::cities::is_known_city;
use super::matchers::{extract_coordinate, Matcher};
use crate::constants::regions;
use crate::logging::StatsLogger;
use crate::models::{Activity, Location, RunId};

/// Memoizing resolver keyed by activity identifier.
///
/// The first location computed for an identifier is kept for the lifetime
/// of the resolver, even if a later activity with the same identifier
/// carries different text.
#[derive(Debug, Default)]
pub struct LocationResolver {
    cache: RwLock<HashMap<RunId, Location>>,
}

impl LocationResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve the location of an activity, computing it at most once per identifier
    pub fn resolve(&self, activity: &Activity) -> Location {
        {
            let cache = self.cache.read().unwrap_or_else(|e| e.into_inner());
            if let Some(location) = cache.get(&activity.run_id) {
                debug!(activity.run_id = %activity.run_id, "Location cache hit");
                return location.clone();
            }
        }

        let parsed = parse_location(activity.location_country.as_deref());
        debug!(
            activity.run_id = %activity.run_id,
            location.country = %parsed.country,
            location.province = %parsed.province,
            location.city = %parsed.city,
            "Location resolved"
        );

        // A concurrent resolver may have inserted first; its value wins
        let mut cache = self.cache.write().unwrap_or_else(|e| e.into_inner());
        cache.entry(activity.run_id).or_insert(parsed).clone()
    }

    /// Number of identifiers resolved so far
    pub fn cached_len(&self) -> usize {
        self.cache.read().unwrap_or_else(|e| e.into_inner()).len()
    }
}

/// Parse a location from free text without caching
pub fn parse_location(text: Option<&str>) -> Location {
    let Some(text) = text else {
        return Location::default();
    };

    let mut location = Location {
        city: Matcher::City
            .all(text)
            .into_iter()
            .find(|candidate| is_known_city(candidate))
            .unwrap_or_default()
            .to_string(),
        ..Location::default()
    };

    if let Some(province) = Matcher::Province.first(text) {
        location.province = province.to_string();
        location.coordinate = extract_coordinate(text);
    }

    location.country = country_segment(text).unwrap_or_default().to_string();

    if regions::MUNICIPALITIES.contains(&location.city.as_str()) {
        location.province = std::mem::take(&mut location.city);
        location.city = Matcher::District
            .last(text)
            .map_or(location.province.clone(), str::to_string);
    }

    // Single known-bad record; see `regions::LOCATION_OVERRIDE_NEEDLE`
    if text.contains(regions::LOCATION_OVERRIDE_NEEDLE) {
        StatsLogger::log_location_override(text, regions::LOCATION_OVERRIDE_CITY);
        location.city = regions::LOCATION_OVERRIDE_CITY.to_string();
    }

    location
}

/// Country from the last comma segment, or the third segment as a fallback
fn country_segment(text: &str) -> Option<&str> {
    let segments: Vec<&str> = text.split(',').collect();
    let last = segments.last().and_then(|segment| Matcher::Country.first(*segment));
    last.or_else(|| segments.get(2).and_then(|segment| Matcher::Country.first(*segment)))
}
