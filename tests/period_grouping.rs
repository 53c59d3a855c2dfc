// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Period tables and the city-grouped display order

use running_page_stats::config::StatsConfig;
use running_page_stats::models::Activity;
use running_page_stats::stats::{
    build_run_period, build_run_period_no_city, sort_run_period, LocationResolver, PeriodCounts,
    TypeClassifier,
};

fn run(run_id: i64, subtype: &str, distance: f64, location: Option<&str>) -> Activity {
    Activity {
        run_id,
        activity_type: "Run".to_string(),
        subtype: subtype.to_string(),
        distance,
        start_date_local: "2024-06-01 07:00:00".to_string(),
        location_country: location.map(str::to_string),
        ..Default::default()
    }
}

fn titles(counts: &PeriodCounts, marker: &str) -> Vec<(String, u32)> {
    sort_run_period(counts, marker)
        .into_iter()
        .map(|entry| (entry.title, entry.count))
        .collect()
}

#[test]
fn test_treadmill_first_then_city_groups() {
    let run_period: PeriodCounts = [
        ("Treadmill", 5),
        ("Shanghai Run", 10),
        ("Shanghai Trail", 3),
        ("Beijing Run", 8),
    ]
    .into_iter()
    .collect();

    assert_eq!(
        titles(&run_period, "Treadmill"),
        vec![
            ("Treadmill".to_string(), 5),
            ("Shanghai Run".to_string(), 10),
            ("Shanghai Trail".to_string(), 3),
            ("Beijing Run".to_string(), 8),
        ]
    );
}

#[test]
fn test_grouping_preserves_every_entry() {
    let run_period: PeriodCounts = [
        ("杭州市 跑步", 4),
        ("跑步机", 2),
        ("徐汇区 跑步", 9),
        ("杭州市 越野跑", 6),
        ("徐汇区 操场跑", 1),
    ]
    .into_iter()
    .collect();

    let sorted = titles(&run_period, "跑步机");
    assert_eq!(sorted.len(), run_period.len());
    assert_eq!(sorted[0], ("跑步机".to_string(), 2));

    let total: u32 = sorted.iter().map(|(_, count)| count).sum();
    assert_eq!(total, 22);
}

#[test]
fn test_tables_from_activities() {
    let classifier = TypeClassifier::new(&StatsConfig::default());
    let resolver = LocationResolver::new();
    let activities = vec![
        run(1, "", 5_000.0, Some("徐汇区, 上海市, 中国")),
        run(2, "", 8_000.0, Some("静安区, 上海市, 中国")),
        run(3, "indoor_running", 6_000.0, None),
        run(4, "", 21_500.0, Some("西湖区, 杭州市, 浙江省, 中国")),
        run(5, "trail", 43_000.0, Some("西湖区, 杭州市, 浙江省, 中国")),
    ];

    let run_period = build_run_period(&activities, &classifier, &resolver);
    assert_eq!(run_period.get("徐汇区 跑步"), Some(&1));
    assert_eq!(run_period.get("静安区 跑步"), Some(&1));
    assert_eq!(run_period.get("跑步机"), Some(&1));
    assert_eq!(run_period.get("杭州市 半程马拉松"), Some(&1));
    assert_eq!(run_period.get("杭州市 越野跑"), Some(&1));

    let no_city = build_run_period_no_city(&activities, &classifier);
    assert_eq!(no_city.get("半程马拉松"), Some(&1));
    assert_eq!(no_city.get("越野跑"), Some(&1));
    assert_eq!(no_city.get("全程马拉松"), Some(&1));
    assert_eq!(no_city.get("跑步"), None);

    let sorted = sort_run_period(&run_period, "跑步机");
    assert_eq!(sorted[0].title, "跑步机");
}

#[test]
fn test_custom_marker_from_config() {
    let mut config = StatsConfig::default();
    config.titles.set("indoor_running", "Treadmill");
    config.treadmill_marker = "Treadmill".to_string();

    let classifier = TypeClassifier::new(&config);
    let resolver = LocationResolver::new();
    let activities = vec![
        run(1, "", 5_000.0, Some("天河区, 广州市, 广东省, 中国")),
        run(2, "indoor_running", 5_000.0, Some("天河区, 广州市, 广东省, 中国")),
    ];

    let run_period = build_run_period(&activities, &classifier, &resolver);
    let sorted = sort_run_period(&run_period, &config.treadmill_marker);
    assert_eq!(sorted[0].title, "广州市 Treadmill");
    assert_eq!(sorted[1].title, "广州市 跑步");
}
