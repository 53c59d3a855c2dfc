// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Loading the static activity collection

use std::fs;
use std::path::Path;
use std::time::Instant;

use crate::errors::{Result, StatsError};
use crate::logging::StatsLogger;
use crate::models::Activity;

/// Read a JSON array of activities from disk
pub fn load_activities(path: &Path) -> Result<Vec<Activity>> {
    let started = Instant::now();
    let content = fs::read_to_string(path).map_err(|source| StatsError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let origin = path.display().to_string();
    let activities = parse_json(&content, &origin)?;
    StatsLogger::log_dataset_loaded(&origin, activities.len(), started.elapsed().as_millis() as u64);
    Ok(activities)
}

/// Parse a JSON array of activities held in memory
pub fn parse_activities(json: &str) -> Result<Vec<Activity>> {
    parse_json(json, "<memory>")
}

fn parse_json(json: &str, origin: &str) -> Result<Vec<Activity>> {
    serde_json::from_str(json).map_err(|source| StatsError::Json {
        origin: origin.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = r#"[
        {
            "run_id": 1,
            "name": "",
            "distance": 10021.5,
            "moving_time": "0:52:10",
            "type": "Run",
            "subtype": "generic",
            "start_date": "2024-03-01 23:00:00",
            "start_date_local": "2024-03-02 07:00:00",
            "location_country": "天河区, 广州市, 广东省, 510000, 中国",
            "summary_polyline": "_p~iF~ps|U_ulLnnqC_mqNvxq`@",
            "average_heartrate": 148.2,
            "average_speed": 3.2,
            "streak": 1
        },
        {
            "run_id": 2,
            "type": "cycling",
            "start_date_local": "2024-03-03 09:00:00",
            "location_country": null,
            "distance": null
        }
    ]"#;

    #[test]
    fn test_parse_activities() {
        let activities = parse_activities(SAMPLE).unwrap();
        assert_eq!(activities.len(), 2);
        assert_eq!(activities[0].distance, 10021.5);
        assert!(activities[0].has_path());
        assert_eq!(activities[1].distance, 0.0);
        assert_eq!(activities[1].location_country, None);
    }

    #[test]
    fn test_load_activities_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let activities = load_activities(file.path()).unwrap();
        assert_eq!(activities[0].run_id, 1);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_activities(Path::new("/nonexistent/activities.json")).unwrap_err();
        assert!(matches!(err, StatsError::Io { .. }));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let err = parse_activities("{not json").unwrap_err();
        assert!(matches!(err, StatsError::Json { ref origin, .. } if origin == "<memory>"));
    }
}
