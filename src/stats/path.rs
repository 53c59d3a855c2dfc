// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Activity paths decoded from Google encoded polylines

use std::f64::consts::PI;

use super::location::LocationResolver;
use crate::constants::defaults;
use crate::logging::StatsLogger;
use crate::models::{Activity, Coordinate};

/// Krasovsky 1940 semi-major axis used by GCJ-02
const GCJ_SEMI_MAJOR_AXIS: f64 = 6_378_245.0;
const GCJ_ECCENTRICITY_SQUARED: f64 = 0.006_693_421_622_965_943;
const GCJ_REFINE_ITERATIONS: usize = 5;
const GCJ_REFINE_TOLERANCE: f64 = 1e-7;

/// Decode an encoded polyline into `(longitude, latitude)` points
pub fn decode_path(encoded: &str) -> Result<Vec<Coordinate>, String> {
    let line = polyline::decode_polyline(encoded, defaults::POLYLINE_PRECISION)
        .map_err(|e| e.to_string())?;
    Ok(line.coords().map(|c| (c.x, c.y)).collect())
}

/// Path of an activity for map display.
///
/// Decode failures yield an empty path. A path made of two identical points
/// is replaced by the coordinate found in the location text, if any.
pub fn path_for_run(
    activity: &Activity,
    resolver: &LocationResolver,
    fix_map_offset: bool,
) -> Vec<Coordinate> {
    let Some(encoded) = activity.summary_polyline.as_deref().filter(|s| !s.is_empty()) else {
        return Vec::new();
    };

    let mut points = match decode_path(encoded) {
        Ok(points) => points,
        Err(e) => {
            StatsLogger::log_path_decode_failure(activity.run_id, &e);
            return Vec::new();
        }
    };

    if fix_map_offset {
        for point in &mut points {
            *point = gcj02_to_wgs84(*point);
        }
    }

    if let [first, second] = points.as_slice() {
        if first == second {
            if let Some(coordinate) = resolver.resolve(activity).coordinate {
                if coordinate.0 != 0.0 && coordinate.1 != 0.0 {
                    return vec![coordinate, coordinate];
                }
            }
        }
    }

    points
}

/// Whether a point lies outside the region where GCJ-02 applies
fn out_of_china((lon, lat): Coordinate) -> bool {
    !(72.004..=137.8347).contains(&lon) || !(0.8293..=55.8271).contains(&lat)
}

fn transform_lat(x: f64, y: f64) -> f64 {
    let mut ret = -100.0 + 2.0 * x + 3.0 * y + 0.2 * y * y + 0.1 * x * y + 0.2 * x.abs().sqrt();
    ret += (20.0 * (6.0 * x * PI).sin() + 20.0 * (2.0 * x * PI).sin()) * 2.0 / 3.0;
    ret += (20.0 * (y * PI).sin() + 40.0 * (y / 3.0 * PI).sin()) * 2.0 / 3.0;
    ret += (160.0 * (y / 12.0 * PI).sin() + 320.0 * (y * PI / 30.0).sin()) * 2.0 / 3.0;
    ret
}

fn transform_lon(x: f64, y: f64) -> f64 {
    let mut ret = 300.0 + x + 2.0 * y + 0.1 * x * x + 0.1 * x * y + 0.1 * x.abs().sqrt();
    ret += (20.0 * (6.0 * x * PI).sin() + 20.0 * (2.0 * x * PI).sin()) * 2.0 / 3.0;
    ret += (20.0 * (x * PI).sin() + 40.0 * (x / 3.0 * PI).sin()) * 2.0 / 3.0;
    ret += (150.0 * (x / 12.0 * PI).sin() + 300.0 * (x / 30.0 * PI).sin()) * 2.0 / 3.0;
    ret
}

/// GCJ-02 offset to add to a WGS-84 point
fn gcj02_delta((lon, lat): Coordinate) -> Coordinate {
    let d_lat = transform_lat(lon - 105.0, lat - 35.0);
    let d_lon = transform_lon(lon - 105.0, lat - 35.0);
    let rad_lat = lat / 180.0 * PI;
    let magic = 1.0 - GCJ_ECCENTRICITY_SQUARED * rad_lat.sin() * rad_lat.sin();
    let sqrt_magic = magic.sqrt();
    (
        (d_lon * 180.0) / (GCJ_SEMI_MAJOR_AXIS / sqrt_magic * rad_lat.cos() * PI),
        (d_lat * 180.0)
            / ((GCJ_SEMI_MAJOR_AXIS * (1.0 - GCJ_ECCENTRICITY_SQUARED)) / (magic * sqrt_magic) * PI),
    )
}

/// Forward conversion from WGS-84 to GCJ-02
pub fn wgs84_to_gcj02(point: Coordinate) -> Coordinate {
    if out_of_china(point) {
        return point;
    }
    let (d_lon, d_lat) = gcj02_delta(point);
    (point.0 + d_lon, point.1 + d_lat)
}

/// Inverse conversion from GCJ-02 to WGS-84, refined iteratively
pub fn gcj02_to_wgs84(point: Coordinate) -> Coordinate {
    if out_of_china(point) {
        return point;
    }

    let (d_lon, d_lat) = gcj02_delta(point);
    let mut wgs = (point.0 - d_lon, point.1 - d_lat);
    for _ in 0..GCJ_REFINE_ITERATIONS {
        let forward = wgs84_to_gcj02(wgs);
        let error = (point.0 - forward.0, point.1 - forward.1);
        if error.0.abs() < GCJ_REFINE_TOLERANCE && error.1.abs() < GCJ_REFINE_TOLERANCE {
            break;
        }
        wgs = (wgs.0 + error.0, wgs.1 + error.1);
    }
    wgs
}
