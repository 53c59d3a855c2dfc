// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! # Data Models
//!
//! Core data structures consumed and produced by the statistics engine.
//!
//! ## Design Principles
//!
//! - **Best-effort input**: every field of an [`Activity`] may be absent or `null`
//!   in the source JSON and falls back to an empty/zero value
//! - **Value semantics**: derived structures compare by value so cached and
//!   recomputed results can be checked for equality
//! - **Serializable**: all models serialize to JSON for the CLI and for
//!   presentation collaborators
//!
//! ## Core Models
//!
//! - [`Activity`]: A single exercise record from the static dataset
//! - [`Location`]: Country/province/city inferred from free-text location
//! - [`PeriodEntry`]: One row of a period frequency table

use serde::{Deserialize, Deserializer, Serialize};

use crate::constants::{defaults, units};

/// Identifier of an activity in the dataset
pub type RunId = i64;

/// A `(longitude, latitude)` pair in degrees
pub type Coordinate = (f64, f64);

/// Represents a single exercise activity from the static dataset
///
/// # Examples
///
/// ```rust
/// use running_page_stats::models::Activity;
///
/// let activity = Activity {
///     run_id: 1,
///     name: "Morning Run".to_string(),
///     distance: 5000.0,
///     moving_time: "0:25:00".to_string(),
///     activity_type: "Run".to_string(),
///     start_date_local: "2024-03-01 07:00:00".to_string(),
///     location_country: Some("天河区, 广州市, 广东省, 510000, 中国".to_string()),
///     ..Default::default()
/// };
/// assert_eq!(activity.year(), "2024");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    /// Unique identifier
    #[serde(default)]
    pub run_id: RunId,
    /// User-supplied name, may be empty
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Distance in meters
    #[serde(default, deserialize_with = "null_as_default")]
    pub distance: f64,
    /// Moving time text, `H:MM:SS` or `N days, H:MM:SS`
    #[serde(default, deserialize_with = "null_as_default")]
    pub moving_time: String,
    /// Primary activity type (`Run`, `Trail Run`, `cycling`, ...)
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub activity_type: String,
    /// Provider subtype (`trail`, `track`, `indoor_running`, ...)
    #[serde(default, deserialize_with = "null_as_default")]
    pub subtype: String,
    /// UTC start timestamp text
    #[serde(default, deserialize_with = "null_as_default")]
    pub start_date: String,
    /// Local start timestamp text, `YYYY-MM-DD HH:MM:SS`
    #[serde(default, deserialize_with = "null_as_default")]
    pub start_date_local: String,
    /// Free-text reverse-geocoded location description
    #[serde(default)]
    pub location_country: Option<String>,
    /// Encoded path (Google polyline format, precision 5)
    #[serde(default)]
    pub summary_polyline: Option<String>,
    #[serde(default)]
    pub average_heartrate: Option<f64>,
    #[serde(default)]
    pub elevation_gain: Option<f64>,
    /// Average speed in meters per second
    #[serde(default, deserialize_with = "null_as_default")]
    pub average_speed: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub streak: u32,
}

impl Activity {
    /// Distance in kilometers
    pub fn distance_km(&self) -> f64 {
        self.distance / units::METERS_PER_KILOMETER
    }

    /// Location text, if present and non-empty
    pub fn location_text(&self) -> Option<&str> {
        self.location_country.as_deref().filter(|text| !text.is_empty())
    }

    /// Whether the activity carries an encoded path
    pub fn has_path(&self) -> bool {
        self.summary_polyline
            .as_deref()
            .is_some_and(|path| !path.is_empty())
    }

    /// Year bucket: the first four characters of the local start timestamp.
    ///
    /// Malformed timestamps are not validated and yield whatever their prefix is.
    pub fn year(&self) -> String {
        char_prefix(&self.start_date_local, 4).to_string()
    }

    /// Moving time in whole seconds, 0 when the text is missing or malformed
    pub fn moving_time_seconds(&self) -> u64 {
        convert_moving_time_to_seconds(&self.moving_time)
    }

    /// One-line description used by list views:
    /// `"<name> <date> <km> KM "` with a marker when no path was recorded.
    pub fn title_for_show(&self) -> String {
        let date = char_prefix(&self.start_date_local, 11);
        let name = if self.name.is_empty() {
            defaults::UNNAMED_ACTIVITY
        } else {
            self.name.as_str()
        };
        let no_map = if self.has_path() { "" } else { defaults::NO_MAP_DATA };
        format!("{} {} {:.2} KM {}", name, date, self.distance_km(), no_map)
    }
}

/// Location inferred from an activity's free-text description.
///
/// Absent information is represented by empty strings and a `None` coordinate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub country: String,
    pub province: String,
    pub city: String,
    pub coordinate: Option<Coordinate>,
}

impl Location {
    pub fn is_empty(&self) -> bool {
        self.country.is_empty()
            && self.province.is_empty()
            && self.city.is_empty()
            && self.coordinate.is_none()
    }
}

/// One row of a period frequency table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodEntry {
    /// Bare period title or `"<city> <period title>"`
    pub title: String,
    pub count: u32,
}

impl PeriodEntry {
    pub fn new(title: impl Into<String>, count: u32) -> Self {
        Self {
            title: title.into(),
            count,
        }
    }
}

/// Parse moving-time text into seconds.
///
/// Accepts `"H:MM:SS"` and `"N days, H:MM:SS"`. Missing, malformed or
/// overflowing text yields 0.
pub fn convert_moving_time_to_seconds(moving_time: &str) -> u64 {
    if moving_time.is_empty() {
        return 0;
    }

    let (days, clock) = match moving_time.split_once(", ") {
        Some((day_part, clock)) => (leading_integer(day_part).unwrap_or(0), clock),
        None => (0, moving_time),
    };

    let parts: Vec<&str> = clock.split(':').collect();
    let [hours, minutes, seconds] = parts.as_slice() else {
        return 0;
    };

    let (Ok(hours), Ok(minutes), Ok(seconds)) = (
        hours.trim().parse::<u64>(),
        minutes.trim().parse::<u64>(),
        seconds.trim().parse::<f64>(),
    ) else {
        return 0;
    };

    days
        .checked_mul(units::HOURS_PER_DAY)
        .and_then(|h| h.checked_add(hours))
        .and_then(|h| h.checked_mul(units::MINUTES_PER_HOUR))
        .and_then(|m| m.checked_add(minutes))
        .and_then(|m| m.checked_mul(units::SECONDS_PER_MINUTE))
        .and_then(|s| s.checked_add(seconds.max(0.0).floor() as u64))
        .unwrap_or(0)
}

/// Short run time: `"<s>s"` under a minute, otherwise `"<minutes>min"`
pub fn format_run_time(moving_time: &str) -> String {
    let total_seconds = convert_moving_time_to_seconds(moving_time);
    let seconds = total_seconds % units::SECONDS_PER_MINUTE;
    let minutes = total_seconds / units::SECONDS_PER_MINUTE;
    if minutes == 0 {
        format!("{}s", seconds)
    } else {
        format!("{}min", minutes)
    }
}

/// Pace per kilometer from a speed in m/s, formatted as `M'SS"`
pub fn format_pace(speed: f64) -> String {
    if !speed.is_finite() || speed == 0.0 {
        return "0".to_string();
    }
    let pace = (units::METERS_PER_KILOMETER / 60.0) * (1.0 / speed);
    let minutes = pace.floor();
    let seconds = ((pace - minutes) * 60.0).floor();
    format!("{}'{:02}\"", minutes as i64, seconds as i64)
}

/// Group digit runs with thousands separators; short strings pass through.
pub fn int_comma(value: &str) -> String {
    if value.chars().count() <= 5 {
        return value.to_string();
    }

    let chars: Vec<char> = value.chars().collect();
    let mut out = String::with_capacity(value.len() + value.len() / 3);
    let mut i = 0;
    while i < chars.len() {
        if !chars[i].is_ascii_digit() {
            out.push(chars[i]);
            i += 1;
            continue;
        }
        let start = i;
        while i < chars.len() && chars[i].is_ascii_digit() {
            i += 1;
        }
        let run = &chars[start..i];
        for (offset, digit) in run.iter().enumerate() {
            if offset > 0 && (run.len() - offset) % 3 == 0 {
                out.push(',');
            }
            out.push(*digit);
        }
    }
    out
}

/// First `n` characters of `text` (not bytes)
pub(crate) fn char_prefix(text: &str, n: usize) -> &str {
    match text.char_indices().nth(n) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

fn leading_integer(text: &str) -> Option<u64> {
    let digits: String = text
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
