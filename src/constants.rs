// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! # Constants Module
//!
//! Fixed vocabularies and thresholds shared by the statistics engine.
//! Values that users are expected to tune live in [`crate::config`] instead.

/// Activity type and subtype strings as they appear in the dataset
pub mod activity_types {
    /// Primary run type
    pub const RUN: &str = "Run";

    /// Dedicated trail-run type
    pub const TRAIL_RUN: &str = "Trail Run";

    /// Run subtypes reported by COROS exports
    pub const SUBTYPE_TRAIL: &str = "trail";
    pub const SUBTYPE_TRACK: &str = "track";
    pub const SUBTYPE_INDOOR: &str = "indoor_running";
}

/// Canonical period keys produced by the classifier
pub mod period_keys {
    pub const RUN: &str = "Run";
    pub const TRAIL: &str = "trail";
    pub const TRACK: &str = "track";
    pub const INDOOR_RUN: &str = "indoor_running";
    pub const HALF_MARATHON: &str = "Half Marathon";
    pub const FULL_MARATHON: &str = "Full Marathon";
    pub const TRAIL_RUN: &str = "Trail Run";
}

/// Distance thresholds, lower bound inclusive
pub mod thresholds {
    /// Full marathon distance in kilometers
    pub const FULL_MARATHON_KM: f64 = 42.2;

    /// Half marathon distance in kilometers
    pub const HALF_MARATHON_KM: f64 = 21.1;

    /// Full marathon distance in meters, used by the display-name filter
    pub const FULL_MARATHON_METERS: f64 = 42_200.0;

    /// Half marathon distance in meters, used by the display-name filter
    pub const HALF_MARATHON_METERS: f64 = 21_100.0;

    /// Cities shorter than this (in characters) are dropped from the distance table
    pub const MIN_CITY_NAME_CHARS: usize = 2;
}

/// Default display titles keyed by canonical period key
pub mod titles {
    pub const RUN_TITLE: &str = "跑步";
    pub const FULL_MARATHON_RUN_TITLE: &str = "全程马拉松";
    pub const HALF_MARATHON_RUN_TITLE: &str = "半程马拉松";
    pub const TRAIL_RUN_TITLE: &str = "越野跑";
    pub const RIDE_TITLE: &str = "骑行";
    pub const INDOOR_RIDE_TITLE: &str = "室内骑行";
    pub const VIRTUAL_RIDE_TITLE: &str = "虚拟骑行";
    pub const HIKE_TITLE: &str = "徒步";
    pub const ROWING_TITLE: &str = "划船";
    pub const SWIM_TITLE: &str = "游泳";
    pub const ROAD_TRIP_TITLE: &str = "自驾";
    pub const FLIGHT_TITLE: &str = "飞行";
    pub const KAYAKING_TITLE: &str = "皮划艇";
    pub const SNOWBOARD_TITLE: &str = "单板滑雪";
    pub const SKI_TITLE: &str = "双板滑雪";

    // COROS activity vocabulary
    pub const WALK_TITLE: &str = "健走";
    pub const GENERIC_TITLE: &str = "户外有氧";
    pub const TRACK_RUN_TITLE: &str = "操场跑";
    pub const INDOOR_RUN_TITLE: &str = "跑步机";

    /// Canonical key to title pairs used to seed the default title table
    pub const DEFAULT_TITLES: &[(&str, &str)] = &[
        ("Run", RUN_TITLE),
        ("Full Marathon", FULL_MARATHON_RUN_TITLE),
        ("Half Marathon", HALF_MARATHON_RUN_TITLE),
        ("cycling", RIDE_TITLE),
        ("hiking", HIKE_TITLE),
        ("walking", WALK_TITLE),
        ("generic", GENERIC_TITLE),
        ("swimming", SWIM_TITLE),
        ("trail", TRAIL_RUN_TITLE),
        ("track", TRACK_RUN_TITLE),
        ("indoor_running", INDOOR_RUN_TITLE),
        ("Trail Run", TRAIL_RUN_TITLE),
        ("Ride", RIDE_TITLE),
        ("Indoor Ride", INDOOR_RIDE_TITLE),
        ("VirtualRide", VIRTUAL_RIDE_TITLE),
        ("Hike", HIKE_TITLE),
        ("Rowing", ROWING_TITLE),
        ("Swim", SWIM_TITLE),
        ("RoadTrip", ROAD_TRIP_TITLE),
        ("Flight", FLIGHT_TITLE),
        ("Kayaking", KAYAKING_TITLE),
        ("Snowboard", SNOWBOARD_TITLE),
        ("Ski", SKI_TITLE),
    ];
}

/// Administrative-region vocabulary for the location resolver
pub mod regions {
    /// Directly-administered cities, treated as province level
    pub const MUNICIPALITIES: &[&str] = &[
        "北京市",
        "上海市",
        "天津市",
        "重庆市",
        "香港特别行政区",
        "澳门特别行政区",
    ];

    /// One record in the dataset reverse-geocodes to the wrong city.
    /// Any location text containing this road name is forced to `LOCATION_OVERRIDE_CITY`.
    /// This is a single data patch; extend it to a table before adding a second one.
    pub const LOCATION_OVERRIDE_NEEDLE: &str = "芙蓉中路";
    pub const LOCATION_OVERRIDE_CITY: &str = "长沙市";
}

/// Environment variable names read by [`crate::config::environment`] and [`crate::logging`]
pub mod env_vars {
    pub const ACTIVITIES_PATH: &str = "RUN_STATS_ACTIVITIES";
    pub const RICH_TITLE: &str = "RUN_STATS_RICH_TITLE";
    pub const FIX_MAP_OFFSET: &str = "RUN_STATS_FIX_MAP";

    // Logging
    pub const LOG_FILTER: &str = "RUST_LOG";
    pub const LOG_FORMAT: &str = "LOG_FORMAT";
    pub const LOG_SOURCE_LOCATION: &str = "LOG_INCLUDE_LOCATION";
    pub const LOG_THREADS: &str = "LOG_INCLUDE_THREAD";
    pub const LOG_SPANS: &str = "LOG_INCLUDE_SPANS";
}

/// Defaults for files and display strings
pub mod defaults {
    /// Dataset file name when nothing else is configured
    pub const ACTIVITIES_FILE: &str = "activities.json";

    /// Config file looked up in the working directory
    pub const CONFIG_FILE: &str = "stats_config.toml";

    /// Directory under the platform config dir
    pub const CONFIG_DIR: &str = "running-page-stats";

    /// Filter item that selects every activity
    pub const TOTAL_ITEM: &str = "Total";

    /// Name shown for unnamed activities
    pub const UNNAMED_ACTIVITY: &str = "Run";

    /// Suffix shown when an activity has no recorded path
    pub const NO_MAP_DATA: &str = "(No map data for this run)";

    /// Polyline precision used by the dataset exporter
    pub const POLYLINE_PRECISION: u32 = 5;
}

/// Unit conversions
pub mod units {
    pub const METERS_PER_KILOMETER: f64 = 1000.0;
    pub const SECONDS_PER_MINUTE: u64 = 60;
    pub const MINUTES_PER_HOUR: u64 = 60;
    pub const HOURS_PER_DAY: u64 = 24;
}
