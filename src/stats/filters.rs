// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Click-through filters and date ordering over the activity collection

use chrono::NaiveDateTime;
use std::cmp::Reverse;
use std::fmt;
use std::str::FromStr;

use super::classifier::PeriodKey;
use crate::config::TitleTable;
use crate::constants::{activity_types, defaults, thresholds};
use crate::errors::StatsError;
use crate::models::{char_prefix, Activity};

/// Predicate over an activity and a filter value
pub type Predicate<'a> = dyn Fn(&Activity, &str) -> bool + 'a;

/// The attribute a filter value is compared against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    Year,
    City,
    Title,
    Type,
    TypeName,
}

impl FilterKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            FilterKind::Year => "year",
            FilterKind::City => "city",
            FilterKind::Title => "title",
            FilterKind::Type => "type",
            FilterKind::TypeName => "type-name",
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterKind {
    type Err = StatsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "year" => Ok(FilterKind::Year),
            "city" => Ok(FilterKind::City),
            "title" => Ok(FilterKind::Title),
            "type" => Ok(FilterKind::Type),
            "type-name" | "type_name" | "typename" => Ok(FilterKind::TypeName),
            _ => Err(StatsError::InvalidFilter(s.to_string())),
        }
    }
}

/// Start-time ordering of filtered activities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateOrder {
    #[default]
    NewestFirst,
    OldestFirst,
}

/// Filter then sort a slice of activities.
///
/// `item == "Total"` disables the primary filter. The optional secondary
/// `(item, predicate)` pair always applies. Each start time is parsed once
/// and the sort is stable, so equal timestamps keep dataset order.
pub fn filter_and_sort<'a, F>(
    activities: &'a [Activity],
    item: &str,
    filter: F,
    order: DateOrder,
    secondary: Option<(&str, &Predicate<'_>)>,
) -> Vec<&'a Activity>
where
    F: Fn(&Activity, &str) -> bool,
{
    let mut selected: Vec<&Activity> = activities
        .iter()
        .filter(|&activity| item == defaults::TOTAL_ITEM || filter(activity, item))
        .filter(|&activity| secondary.map_or(true, |(value, predicate)| predicate(activity, value)))
        .collect();

    match order {
        DateOrder::NewestFirst => {
            selected.sort_by_cached_key(|activity| Reverse(start_time(activity)))
        }
        DateOrder::OldestFirst => selected.sort_by_cached_key(|activity| start_time(activity)),
    }
    selected
}

/// Local start year equals `year`
pub fn filter_year(activity: &Activity, year: &str) -> bool {
    !activity.start_date_local.is_empty() && char_prefix(&activity.start_date_local, 4) == year
}

/// Location text contains `city`
pub fn filter_city(activity: &Activity, city: &str) -> bool {
    activity.location_text().is_some_and(|text| text.contains(city))
}

/// Raw activity type equals `activity_type`
pub fn filter_type(activity: &Activity, activity_type: &str) -> bool {
    activity.activity_type == activity_type
}

/// Match a race display title against raw type and distance.
///
/// The full- and half-marathon titles select runs and trail runs by
/// distance, the trail-run title selects runs with the trail subtype, and
/// any other value is compared with the raw type.
pub fn filter_type_name(activity: &Activity, type_name: &str, titles: &TitleTable) -> bool {
    let is_run = activity.activity_type == activity_types::RUN
        || activity.activity_type == activity_types::TRAIL_RUN;

    if type_name == titles.title_for(PeriodKey::FullMarathon.as_str()) {
        is_run && activity.distance >= thresholds::FULL_MARATHON_METERS
    } else if type_name == titles.title_for(PeriodKey::HalfMarathon.as_str()) {
        is_run
            && activity.distance >= thresholds::HALF_MARATHON_METERS
            && activity.distance < thresholds::FULL_MARATHON_METERS
    } else if type_name == titles.title_for(PeriodKey::TrailRun.as_str()) {
        activity.activity_type == activity_types::RUN
            && activity.subtype == activity_types::SUBTYPE_TRAIL
    } else {
        filter_type(activity, type_name)
    }
}

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
];

/// Local start time; unparsable timestamps sort as the Unix epoch
pub fn start_time(activity: &Activity) -> NaiveDateTime {
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(&activity.start_date_local, format).ok())
        .unwrap_or_default()
}
