// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Period frequency tables and the city-grouped period ordering

use std::cmp::Reverse;
use std::collections::HashMap;

use super::classifier::{marathon_bucket, PeriodKey, TypeClassifier};
use super::location::LocationResolver;
use super::tally::PeriodCounts;
use crate::models::{Activity, PeriodEntry};

/// Count one occurrence of a (possibly city-qualified) title
pub fn record_period(counts: &mut PeriodCounts, title: &str) {
    if !title.is_empty() {
        counts.increment(title);
    }
}

/// Count an activity in the city-independent race table.
///
/// Membership is decided by the period key: half marathons, full marathons,
/// trail runs and runs with the trail subtype. Titles only label the
/// counters. A trail activity additionally counts towards the marathon
/// bucket of its raw distance, so one activity may add to the trail-run
/// counter and to at most one of the two marathon counters.
pub fn record_period_no_city(
    counts: &mut PeriodCounts,
    activity: &Activity,
    classifier: &TypeClassifier,
) {
    let key = classifier.classify(activity);
    if !key.is_race_distance() {
        return;
    }

    counts.increment(classifier.title_for(&key));
    if matches!(key, PeriodKey::Trail | PeriodKey::TrailRun) {
        if let Some(bucket) = marathon_bucket(activity.distance) {
            counts.increment(classifier.title_for(&bucket));
        }
    }
}

/// Occurrences of each activity title
pub fn build_run_period(
    activities: &[Activity],
    classifier: &TypeClassifier,
    resolver: &LocationResolver,
) -> PeriodCounts {
    let mut counts = PeriodCounts::new();
    for activity in activities {
        record_period(&mut counts, &classifier.title(activity, resolver));
    }
    counts
}

/// Occurrences of race-distance titles, independent of city
pub fn build_run_period_no_city(
    activities: &[Activity],
    classifier: &TypeClassifier,
) -> PeriodCounts {
    let mut counts = PeriodCounts::new();
    for activity in activities {
        record_period_no_city(&mut counts, activity, classifier);
    }
    counts
}

struct CityGroup<'a> {
    total: u32,
    items: Vec<(&'a str, u32)>,
}

/// Order period titles for display.
///
/// A title without a city qualifier, or one containing `treadmill_marker`,
/// is pinned first (the last such title seen wins). The remaining titles
/// are split at their first space into city and type, grouped by city,
/// groups ordered by total count descending and members by count
/// descending. Ties keep first-seen order.
pub fn sort_run_period(run_period: &PeriodCounts, treadmill_marker: &str) -> Vec<PeriodEntry> {
    let mut treadmill: Option<(&str, u32)> = None;
    let mut groups: Vec<CityGroup<'_>> = Vec::new();
    let mut group_index: HashMap<&str, usize> = HashMap::new();

    for (title, &count) in run_period.iter() {
        let names_treadmill = !treadmill_marker.is_empty() && title.contains(treadmill_marker);
        let city = match title.split_once(' ') {
            Some((city, _)) if !names_treadmill => city,
            _ => {
                treadmill = Some((title, count));
                continue;
            }
        };

        let slot = *group_index.entry(city).or_insert_with(|| {
            groups.push(CityGroup {
                total: 0,
                items: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].total += count;
        groups[slot].items.push((title, count));
    }

    groups.sort_by_key(|group| Reverse(group.total));

    treadmill
        .into_iter()
        .chain(groups.into_iter().flat_map(|mut group| {
            group.items.sort_by_key(|&(_, count)| Reverse(count));
            group.items
        }))
        .map(|(title, count)| PeriodEntry::new(title, count))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StatsConfig;

    fn titles(entries: &[PeriodEntry]) -> Vec<&str> {
        entries.iter().map(|entry| entry.title.as_str()).collect()
    }

    fn trail_run(distance: f64) -> Activity {
        Activity {
            activity_type: "Trail Run".to_string(),
            distance,
            ..Default::default()
        }
    }

    #[test]
    fn test_grouped_order() {
        let run_period: PeriodCounts = [
            ("Treadmill", 5),
            ("Shanghai Run", 10),
            ("Shanghai Trail", 3),
            ("Beijing Run", 8),
        ]
        .into_iter()
        .collect();

        let sorted = sort_run_period(&run_period, "Treadmill");
        assert_eq!(
            titles(&sorted),
            vec!["Treadmill", "Shanghai Run", "Shanghai Trail", "Beijing Run"]
        );
        assert_eq!(sorted[0].count, 5);
    }

    #[test]
    fn test_group_total_beats_single_entry() {
        let run_period: PeriodCounts = [
            ("杭州市 跑步", 6),
            ("上海市 跑步", 7),
            ("杭州市 越野跑", 4),
        ]
        .into_iter()
        .collect();

        let sorted = sort_run_period(&run_period, "跑步机");
        assert_eq!(titles(&sorted), vec!["杭州市 跑步", "杭州市 越野跑", "上海市 跑步"]);
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let run_period: PeriodCounts = [
            ("B city Run", 2),
            ("A city Run", 2),
            ("B city Ride", 2),
            ("A city Ride", 2),
        ]
        .into_iter()
        .collect();

        let sorted = sort_run_period(&run_period, "跑步机");
        assert_eq!(
            titles(&sorted),
            vec!["B city Run", "B city Ride", "A city Run", "A city Ride"]
        );
    }

    #[test]
    fn test_marker_pins_city_qualified_treadmill() {
        let run_period: PeriodCounts = [("上海市 跑步", 3), ("上海市 跑步机", 9)].into_iter().collect();
        let sorted = sort_run_period(&run_period, "跑步机");
        assert_eq!(titles(&sorted), vec!["上海市 跑步机", "上海市 跑步"]);
    }

    #[test]
    fn test_last_unqualified_title_wins() {
        let run_period: PeriodCounts = [("跑步机", 4), ("上海市 跑步", 1), ("骑行", 2)].into_iter().collect();
        let sorted = sort_run_period(&run_period, "跑步机");
        assert_eq!(titles(&sorted), vec!["骑行", "上海市 跑步"]);
    }

    #[test]
    fn test_empty_table() {
        assert!(sort_run_period(&PeriodCounts::new(), "跑步机").is_empty());
    }

    #[test]
    fn test_trail_run_type_classifies_by_distance() {
        let classifier = TypeClassifier::new(&StatsConfig::default());
        let counts = build_run_period_no_city(
            &[trail_run(43_000.0), trail_run(25_000.0), trail_run(10_000.0)],
            &classifier,
        );

        // 43 km and 25 km trail runs classify as marathons, only 10 km stays a trail run
        assert_eq!(counts.get("越野跑"), Some(&1));
        assert_eq!(counts.get("全程马拉松"), Some(&1));
        assert_eq!(counts.get("半程马拉松"), Some(&1));
    }

    #[test]
    fn test_trail_subtype_counts_marathon_bucket() {
        let classifier = TypeClassifier::new(&StatsConfig::default());
        let activity = Activity {
            activity_type: "Run".to_string(),
            subtype: "trail".to_string(),
            distance: 43_000.0,
            location_country: Some("中国".to_string()),
            ..Default::default()
        };

        let counts = build_run_period_no_city(&[activity], &classifier);
        assert_eq!(counts.get("越野跑"), Some(&1));
        assert_eq!(counts.get("全程马拉松"), Some(&1));
        assert_eq!(counts.get("半程马拉松"), None);
    }

    #[test]
    fn test_partial_title_table_keeps_plain_runs_out() {
        let config: StatsConfig = toml::from_str(
            r#"
[titles]
"Run" = "Run"
"Trail Run" = "Trail"
"#,
        )
        .unwrap();
        let classifier = TypeClassifier::new(&config);
        let easy = Activity {
            run_id: 1,
            activity_type: "Run".to_string(),
            distance: 5_000.0,
            location_country: Some("天河区, 广州市, 广东省, 中国".to_string()),
            ..Default::default()
        };

        assert!(build_run_period_no_city(&[easy.clone()], &classifier).is_empty());

        let half = Activity {
            distance: 21_500.0,
            ..easy
        };
        let counts = build_run_period_no_city(&[half, trail_run(15_000.0)], &classifier);
        assert_eq!(counts.get("半程马拉松"), Some(&1));
        assert_eq!(counts.get("Trail"), Some(&1));
        assert!(!counts.contains_key("Run"));
    }

    #[test]
    fn test_non_race_titles_are_ignored() {
        let classifier = TypeClassifier::new(&StatsConfig::default());
        let ride = Activity {
            activity_type: "cycling".to_string(),
            distance: 100_000.0,
            ..Default::default()
        };
        assert!(build_run_period_no_city(&[ride], &classifier).is_empty());
    }

    #[test]
    fn test_build_run_period_counts_titles() {
        let classifier = TypeClassifier::new(&StatsConfig::default());
        let resolver = LocationResolver::new();
        let activities = vec![
            Activity {
                run_id: 1,
                activity_type: "Run".to_string(),
                distance: 5_000.0,
                location_country: Some("徐汇区, 上海市, 中国".to_string()),
                ..Default::default()
            },
            Activity {
                run_id: 2,
                activity_type: "Run".to_string(),
                distance: 6_000.0,
                location_country: Some("黄浦区, 上海市, 中国".to_string()),
                ..Default::default()
            },
            Activity {
                run_id: 3,
                name: "Club night".to_string(),
                activity_type: "Run".to_string(),
                ..Default::default()
            },
        ];

        let counts = build_run_period(&activities, &classifier, &resolver);
        assert_eq!(counts.get("徐汇区 跑步"), Some(&1));
        assert_eq!(counts.get("黄浦区 跑步"), Some(&1));
        assert_eq!(counts.get("Club night"), Some(&1));
    }
}
