// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Top-level aggregation over the activity collection.
//!
//! [`aggregate`] folds every activity once into a [`StatsResult`].
//! [`StatsEngine`] owns the collection together with the location cache
//! and memoizes that result for the lifetime of the process.

use serde::Serialize;
use std::collections::{BTreeSet, HashSet};
use std::path::Path;
use std::sync::OnceLock;
use std::time::Instant;

use super::classifier::{PeriodKey, TypeClassifier};
use super::country::normalize_country;
use super::filters::{
    filter_and_sort, filter_city, filter_type, filter_type_name, filter_year, DateOrder, FilterKind,
    Predicate,
};
use super::location::LocationResolver;
use super::path::path_for_run;
use super::period::{record_period, record_period_no_city, sort_run_period};
use super::tally::{CityDistances, PeriodCounts};
use crate::config::StatsConfig;
use crate::constants::thresholds;
use crate::dataset;
use crate::errors::Result;
use crate::logging::StatsLogger;
use crate::models::{Activity, Coordinate, Location, PeriodEntry};

/// All derived views over the activity collection
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResult {
    /// Cumulative distance in meters per city, cities of two or more characters only
    pub cities: CityDistances,
    /// Distinct provinces in first-seen order
    pub provinces: Vec<String>,
    /// Distinct normalized countries in first-seen order
    pub countries: Vec<String>,
    /// Distinct years, newest first
    pub years: Vec<String>,
    /// Occurrences per activity title
    pub run_period: PeriodCounts,
    /// Occurrences per race-distance title, independent of city
    pub run_period_no_city: PeriodCounts,
    /// `run_period` ordered for display
    pub sorted_run_period: Vec<PeriodEntry>,
    /// Most recent year, empty when there are no activities
    pub this_year: String,
    pub activity_count: usize,
}

/// Sizes of the derived views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatsSummary {
    pub activities: usize,
    pub years: usize,
    pub countries: usize,
    pub provinces: usize,
    pub cities: usize,
}

impl StatsResult {
    /// Cities ordered by cumulative distance, longest first
    pub fn cities_by_distance(&self) -> Vec<(&str, f64)> {
        let mut cities: Vec<(&str, f64)> = self.cities.iter().map(|(city, &m)| (city, m)).collect();
        cities.sort_by(|a, b| b.1.total_cmp(&a.1));
        cities
    }

    /// Race-distance titles ordered by count, most frequent first
    pub fn period_ranking(&self) -> Vec<PeriodEntry> {
        let mut ranking: Vec<PeriodEntry> = self
            .run_period_no_city
            .iter()
            .map(|(title, &count)| PeriodEntry::new(title, count))
            .collect();
        ranking.sort_by(|a, b| b.count.cmp(&a.count));
        ranking
    }

    pub fn summary(&self) -> StatsSummary {
        StatsSummary {
            activities: self.activity_count,
            years: self.years.len(),
            countries: self.countries.len(),
            provinces: self.provinces.len(),
            cities: self.cities.len(),
        }
    }
}

/// Accumulator local to a single [`aggregate`] call
#[derive(Default)]
struct StatsBuilder {
    cities: CityDistances,
    provinces: Vec<String>,
    seen_provinces: HashSet<String>,
    countries: Vec<String>,
    seen_countries: HashSet<String>,
    years: BTreeSet<String>,
    run_period: PeriodCounts,
    run_period_no_city: PeriodCounts,
    activity_count: usize,
}

impl StatsBuilder {
    fn record(
        &mut self,
        activity: &Activity,
        location: Location,
        title: &str,
        classifier: &TypeClassifier,
    ) {
        self.activity_count += 1;

        if !title.is_empty() {
            record_period(&mut self.run_period, title);
            record_period_no_city(&mut self.run_period_no_city, activity, classifier);
        }

        if location.city.chars().count() >= thresholds::MIN_CITY_NAME_CHARS {
            self.cities.add(&location.city, activity.distance);
        }

        if !location.province.is_empty() && self.seen_provinces.insert(location.province.clone()) {
            self.provinces.push(location.province);
        }

        if !location.country.is_empty() {
            let country = normalize_country(&location.country);
            if self.seen_countries.insert(country.clone()) {
                self.countries.push(country);
            }
        }

        self.years.insert(activity.year());
    }

    fn finish(self, treadmill_marker: &str) -> StatsResult {
        let years: Vec<String> = self.years.into_iter().rev().collect();
        let this_year = years.first().cloned().unwrap_or_default();
        let sorted_run_period = sort_run_period(&self.run_period, treadmill_marker);

        StatsResult {
            cities: self.cities,
            provinces: self.provinces,
            countries: self.countries,
            years,
            run_period: self.run_period,
            run_period_no_city: self.run_period_no_city,
            sorted_run_period,
            this_year,
            activity_count: self.activity_count,
        }
    }
}

/// Fold the activity collection into every derived view
pub fn aggregate(
    activities: &[Activity],
    classifier: &TypeClassifier,
    resolver: &LocationResolver,
    treadmill_marker: &str,
) -> StatsResult {
    let mut builder = StatsBuilder::default();
    for activity in activities {
        let location = resolver.resolve(activity);
        let title = classifier.title(activity, resolver);
        builder.record(activity, location, &title, classifier);
    }
    builder.finish(treadmill_marker)
}

/// Owns the activity collection and memoizes everything derived from it
pub struct StatsEngine {
    activities: Vec<Activity>,
    config: StatsConfig,
    resolver: LocationResolver,
    classifier: TypeClassifier,
    stats: OnceLock<StatsResult>,
}

impl StatsEngine {
    pub fn new(activities: Vec<Activity>, config: StatsConfig) -> Self {
        let classifier = TypeClassifier::new(&config);
        Self {
            activities,
            config,
            resolver: LocationResolver::new(),
            classifier,
            stats: OnceLock::new(),
        }
    }

    /// Load the dataset at `path` and build an engine over it
    pub fn from_path(path: &Path, config: StatsConfig) -> Result<Self> {
        let activities = dataset::load_activities(path)?;
        Ok(Self::new(activities, config))
    }

    pub fn activities(&self) -> &[Activity] {
        &self.activities
    }

    pub fn config(&self) -> &StatsConfig {
        &self.config
    }

    /// Aggregate statistics, computed on first call
    pub fn stats(&self) -> &StatsResult {
        self.stats.get_or_init(|| {
            let started = Instant::now();
            let result = aggregate(
                &self.activities,
                &self.classifier,
                &self.resolver,
                &self.config.treadmill_marker,
            );
            StatsLogger::log_aggregation(
                &result.summary(),
                result.run_period.len(),
                started.elapsed().as_millis() as u64,
            );
            result
        })
    }

    pub fn location(&self, activity: &Activity) -> Location {
        self.resolver.resolve(activity)
    }

    pub fn classify(&self, activity: &Activity) -> PeriodKey {
        self.classifier.classify(activity)
    }

    pub fn title(&self, activity: &Activity) -> String {
        self.classifier.title(activity, &self.resolver)
    }

    pub fn title_no_city(&self, activity: &Activity) -> &str {
        self.classifier.title_no_city(activity)
    }

    pub fn path_for_run(&self, activity: &Activity) -> Vec<Coordinate> {
        path_for_run(activity, &self.resolver, self.config.fix_map_offset)
    }

    /// Predicate implementing a filter kind
    pub fn predicate(&self, kind: FilterKind) -> Box<Predicate<'_>> {
        match kind {
            FilterKind::Year => Box::new(filter_year),
            FilterKind::City => Box::new(filter_city),
            FilterKind::Type => Box::new(filter_type),
            FilterKind::Title => {
                Box::new(move |activity: &Activity, title: &str| self.title(activity) == title)
            }
            FilterKind::TypeName => Box::new(move |activity: &Activity, type_name: &str| {
                filter_type_name(activity, type_name, &self.config.titles)
            }),
        }
    }

    /// Activities matching `(kind, value)` and an optional second filter, sorted by start time
    pub fn filter(
        &self,
        kind: FilterKind,
        value: &str,
        secondary: Option<(FilterKind, &str)>,
        oldest_first: bool,
    ) -> Vec<&Activity> {
        let primary = self.predicate(kind);
        let secondary = secondary.map(|(kind, value)| (value, self.predicate(kind)));
        let secondary_ref = secondary
            .as_ref()
            .map(|(value, predicate)| (*value, predicate.as_ref()));
        let order = if oldest_first {
            DateOrder::OldestFirst
        } else {
            DateOrder::NewestFirst
        };

        filter_and_sort(&self.activities, value, primary.as_ref(), order, secondary_ref)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(run_id: i64, date: &str, distance: f64, location: Option<&str>) -> Activity {
        Activity {
            run_id,
            activity_type: "Run".to_string(),
            distance,
            start_date_local: date.to_string(),
            location_country: location.map(str::to_string),
            ..Default::default()
        }
    }

    fn engine(activities: Vec<Activity>) -> StatsEngine {
        StatsEngine::new(activities, StatsConfig::default())
    }

    #[test]
    fn test_empty_collection() {
        let engine = engine(Vec::new());
        let stats = engine.stats();
        assert_eq!(stats.this_year, "");
        assert!(stats.years.is_empty());
        assert!(stats.sorted_run_period.is_empty());
        assert_eq!(stats.summary().activities, 0);
    }

    #[test]
    fn test_years_sorted_descending() {
        let engine = engine(vec![
            run(1, "2021-03-01 07:00:00", 5_000.0, None),
            run(2, "2023-03-01 07:00:00", 5_000.0, None),
            run(3, "2022-03-01 07:00:00", 5_000.0, None),
        ]);
        let stats = engine.stats();
        assert_eq!(stats.years, vec!["2023", "2022", "2021"]);
        assert_eq!(stats.this_year, "2023");
    }

    #[test]
    fn test_city_distance_and_sets() {
        let engine = engine(vec![
            run(1, "2024-01-01 07:00:00", 5_000.0, Some("天河区, 广州市, 广东省, 中国")),
            run(2, "2024-01-02 07:00:00", 7_000.0, Some("越秀区, 广州市, 广东省, 中国")),
            run(3, "2024-01-03 07:00:00", 3_000.0, Some("Main St, Springfield, 美利坚合众国")),
        ]);
        let stats = engine.stats();

        assert_eq!(stats.cities.get("广州市"), Some(&12_000.0));
        assert_eq!(stats.provinces, vec!["广东省"]);
        assert_eq!(stats.countries, vec!["中国", "美国"]);
        assert_eq!(stats.run_period.get("广州市 跑步"), Some(&2));
        assert_eq!(stats.cities_by_distance()[0], ("广州市", 12_000.0));
    }

    #[test]
    fn test_single_character_city_not_tallied() {
        let classifier = TypeClassifier::new(&StatsConfig::default());
        let activity = run(1, "2024-01-01 07:00:00", 5_000.0, Some("中国"));
        let location = |city: &str| Location {
            country: "中国".to_string(),
            city: city.to_string(),
            ..Location::default()
        };

        let mut builder = StatsBuilder::default();
        builder.record(&activity, location("市"), "市 跑步", &classifier);
        builder.record(&activity, location("广州市"), "广州市 跑步", &classifier);
        builder.record(&activity, location("津市"), "津市 跑步", &classifier);
        let stats = builder.finish("跑步机");

        assert!(!stats.cities.contains_key("市"));
        assert_eq!(stats.cities.get("广州市"), Some(&5_000.0));
        assert_eq!(stats.cities.get("津市"), Some(&5_000.0));
        assert_eq!(stats.cities.len(), 2);
        // The title is still counted even when the city is dropped
        assert_eq!(stats.run_period.get("市 跑步"), Some(&1));
        assert_eq!(stats.activity_count, 3);
    }

    #[test]
    fn test_stats_memoized() {
        let engine = engine(vec![run(1, "2024-01-01 07:00:00", 5_000.0, None)]);
        let first = engine.stats() as *const StatsResult;
        let second = engine.stats() as *const StatsResult;
        assert_eq!(first, second);
    }

    #[test]
    fn test_period_ranking() {
        let mut trail = run(3, "2024-01-03 07:00:00", 45_000.0, Some("中国"));
        trail.subtype = "trail".to_string();
        let engine = engine(vec![
            run(1, "2024-01-01 07:00:00", 42_500.0, Some("中国")),
            run(2, "2024-01-02 07:00:00", 21_500.0, Some("中国")),
            trail,
        ]);

        let ranking = engine.stats().period_ranking();
        assert_eq!(ranking[0], PeriodEntry::new("全程马拉松", 2));
        assert_eq!(ranking.len(), 3);
    }

    #[test]
    fn test_filter_by_kind() {
        let engine = engine(vec![
            run(1, "2023-01-01 07:00:00", 5_000.0, Some("天河区, 广州市, 广东省, 中国")),
            run(2, "2024-01-01 07:00:00", 5_000.0, Some("天河区, 广州市, 广东省, 中国")),
            run(3, "2024-02-01 07:00:00", 5_000.0, Some("西湖区, 杭州市, 浙江省, 中国")),
        ]);

        let by_title = engine.filter(FilterKind::Title, "广州市 跑步", None, false);
        assert_eq!(by_title.iter().map(|a| a.run_id).collect::<Vec<_>>(), vec![2, 1]);

        let narrowed =
            engine.filter(FilterKind::Year, "2024", Some((FilterKind::City, "杭州")), true);
        assert_eq!(narrowed.iter().map(|a| a.run_id).collect::<Vec<_>>(), vec![3]);
    }
}
