// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Named text matchers over runs of CJK ideographs.
//!
//! Each administrative level is a run of at least two ideographs followed by
//! a fixed suffix set. Patterns are compiled once on first use.

use regex::Regex;
use std::sync::OnceLock;

use crate::models::Coordinate;

/// A single named pattern used by the location resolver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Matcher {
    /// Prefecture-level names: `市`, `自治州`, `特别行政区`, `盟`, `地区`
    City,
    /// County-level names: `区`, `县`
    District,
    /// Province-level names: `省`, `自治区`
    Province,
    /// Widest span starting and ending with an ideograph
    Country,
}

impl Matcher {
    pub const fn name(self) -> &'static str {
        match self {
            Matcher::City => "city",
            Matcher::District => "district",
            Matcher::Province => "province",
            Matcher::Country => "country",
        }
    }

    pub const fn pattern(self) -> &'static str {
        match self {
            Matcher::City => r"[\x{4e00}-\x{9fa5}]{2,}(?:市|自治州|特别行政区|盟|地区)",
            Matcher::District => r"[\x{4e00}-\x{9fa5}]{2,}(?:区|县)",
            Matcher::Province => r"[\x{4e00}-\x{9fa5}]{2,}(?:省|自治区)",
            Matcher::Country => r"[\x{4e00}-\x{9fa5}].*[\x{4e00}-\x{9fa5}]",
        }
    }

    /// Compiled pattern, `None` only if the hardcoded pattern fails to compile
    fn regex(self) -> Option<&'static Regex> {
        static CITY: OnceLock<Option<Regex>> = OnceLock::new();
        static DISTRICT: OnceLock<Option<Regex>> = OnceLock::new();
        static PROVINCE: OnceLock<Option<Regex>> = OnceLock::new();
        static COUNTRY: OnceLock<Option<Regex>> = OnceLock::new();

        let cell = match self {
            Matcher::City => &CITY,
            Matcher::District => &DISTRICT,
            Matcher::Province => &PROVINCE,
            Matcher::Country => &COUNTRY,
        };
        cell.get_or_init(|| Regex::new(self.pattern()).ok()).as_ref()
    }

    /// Leftmost match
    pub fn first(self, text: &str) -> Option<&str> {
        self.regex()?.find(text).map(|m| m.as_str())
    }

    /// All non-overlapping matches in scan order
    pub fn all(self, text: &str) -> Vec<&str> {
        self.regex()
            .map(|re| re.find_iter(text).map(|m| m.as_str()).collect())
            .unwrap_or_default()
    }

    /// Rightmost of the non-overlapping matches
    pub fn last(self, text: &str) -> Option<&str> {
        self.regex()?.find_iter(text).last().map(|m| m.as_str())
    }
}

/// Extract a `(longitude, latitude)` pair from text carrying
/// `'latitude': <n>` followed later by `'longitude': <n>`.
pub fn extract_coordinate(text: &str) -> Option<Coordinate> {
    static COORDINATE: OnceLock<Option<Regex>> = OnceLock::new();
    let re = COORDINATE
        .get_or_init(|| Regex::new(r"'latitude': (-?\d+\.\d+).*?'longitude': (-?\d+\.\d+)").ok())
        .as_ref()?;

    let captures = re.captures(text)?;
    let latitude: f64 = captures.get(1)?.as_str().parse().ok()?;
    let longitude: f64 = captures.get(2)?.as_str().parse().ok()?;
    Some((longitude, latitude))
}
