// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Location resolution and country normalization through the public API

use running_page_stats::models::{Activity, Location};
use running_page_stats::stats::{normalize_country, parse_location, LocationResolver};
use std::sync::Arc;
use std::thread;

fn activity(run_id: i64, location: Option<&str>) -> Activity {
    Activity {
        run_id,
        activity_type: "Run".to_string(),
        location_country: location.map(str::to_string),
        ..Default::default()
    }
}

#[test]
fn test_trailing_dictionary_moves_country_to_third_segment() {
    let location = parse_location(Some(
        "龙华区, 海口市, 海南省, 570000, 中国 {'latitude': 20.0440, 'longitude': 110.1999}",
    ));

    assert_eq!(
        location,
        Location {
            country: "海南省".to_string(),
            province: "海南省".to_string(),
            city: "海口市".to_string(),
            coordinate: Some((110.1999, 20.0440)),
        }
    );
}

#[test]
fn test_autonomous_prefecture_and_region() {
    let location = parse_location(Some("景洪市, 西双版纳傣族自治州, 云南省, 中国"));
    assert_eq!(location.city, "西双版纳傣族自治州");
    assert_eq!(location.province, "云南省");

    let location = parse_location(Some("城关区, 拉萨市, 西藏自治区, 中国"));
    assert_eq!(location.city, "拉萨市");
    assert_eq!(location.province, "西藏自治区");
}

#[test]
fn test_special_administrative_region_is_municipality() {
    let location = parse_location(Some("香港特别行政区, 油尖旺区, 中国"));
    assert_eq!(location.province, "香港特别行政区");
    assert_eq!(location.city, "油尖旺区");
}

#[test]
fn test_overseas_location_keeps_country_only() {
    let location = parse_location(Some("Shibuya, Tokyo, 日本"));
    assert_eq!(location.city, "");
    assert_eq!(location.province, "");
    assert_eq!(location.country, "日本");
    assert_eq!(normalize_country(&location.country), "日本");
}

#[test]
fn test_empty_text_is_empty_location() {
    assert!(parse_location(Some("")).is_empty());
    assert!(parse_location(None).is_empty());
}

#[test]
fn test_cache_wins_for_shared_identifier() {
    let resolver = LocationResolver::new();
    let original = resolver.resolve(&activity(7, Some("鼓楼区, 南京市, 江苏省, 中国")));
    let changed = resolver.resolve(&activity(7, None));

    assert_eq!(original, changed);
    assert_eq!(changed.city, "南京市");
}

#[test]
fn test_concurrent_resolution_is_value_stable() {
    let resolver = Arc::new(LocationResolver::new());
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let resolver = Arc::clone(&resolver);
            thread::spawn(move || {
                (0..50)
                    .map(|run_id| resolver.resolve(&activity(run_id, Some("思明区, 厦门市, 福建省, 中国"))))
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    for handle in handles {
        let locations = handle.join().unwrap();
        assert!(locations.iter().all(|location| location.city == "厦门市"));
    }
    assert_eq!(resolver.cached_len(), 50);
}

#[test]
fn test_country_normalization_is_idempotent() {
    for raw in ["美利坚合众国", "大不列颠及北爱尔兰联合王国(英国)", "奧地利", "新西兰", ""] {
        let once = normalize_country(raw);
        assert_eq!(normalize_country(&once), once);
    }
}
