//! Route statistics over an original track and its simplified form.
//!
//! Distances travelled (`straight_line_distance`, `path_distance`), duration and
//! maximum speed describe the original track. The segment list and the
//! direction-change count describe the simplified track's shape.
//!
//! The engine always returns a record. A pair of points that cannot be measured
//! is logged and skipped, and missing or malformed timestamps and speeds are
//! ignored.
//!
//! ## Example
//! ```rust
//! use track_reducer::{compute_statistics, reduce, TrackPoint};
//!
//! let track = vec![
//!     TrackPoint::new(0.0, 0.0).with_timestamp("2024-05-01T10:00:00Z"),
//!     TrackPoint::new(0.0, 0.1).with_speed(4.5),
//!     TrackPoint::new(0.0, 0.2).with_timestamp("2024-05-01T12:30:00Z"),
//! ];
//! let reduced = reduce(&track);
//! let stats = compute_statistics(&track, &reduced);
//! assert_eq!(stats.duration_hours, 2.5);
//! assert_eq!(stats.max_speed, 4.5);
//! ```

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::geo_utils::{bearing, distance, round_to};
use crate::TrackPoint;

/// Bearing difference in degrees above which consecutive segments count as a
/// direction change.
pub const BEARING_CHANGE_TOLERANCE: f64 = 1.0;

/// Decimal places on reported lengths, percentages, hours and speeds.
pub const OUTPUT_PRECISION: u32 = 2;

/// Timestamp layouts tried after RFC 3339, interpreted as UTC.
const NAIVE_TIMESTAMP_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Configuration for statistics computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticsConfig {
    /// Minimum bearing difference (degrees) counted as a direction change.
    /// Default: 1.0
    pub bearing_change_tolerance: f64,
}

impl Default for StatisticsConfig {
    fn default() -> Self {
        Self {
            bearing_change_tolerance: BEARING_CHANGE_TOLERANCE,
        }
    }
}

/// One leg of the simplified route.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Segment {
    /// Initial bearing in degrees
    pub bearing: f64,
    /// Length in nautical miles
    pub length: f64,
}

/// Statistics for one route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteStatistics {
    pub original_point_count: usize,
    pub reduced_point_count: usize,
    /// Share of points dropped, e.g. `"42.86%"`
    pub reduction: String,
    /// First to last original point, nautical miles
    pub straight_line_distance: f64,
    /// Sum of original segment lengths, nautical miles
    pub path_distance: f64,
    /// Legs of the simplified route in order
    pub segments: Vec<Segment>,
    /// Consecutive simplified legs whose bearings differ beyond the tolerance
    pub direction_change_count: usize,
    /// Elapsed time between first and last original timestamps
    pub duration_hours: f64,
    /// Highest speed annotation on the original track
    pub max_speed: f64,
}

impl Default for RouteStatistics {
    fn default() -> Self {
        Self {
            original_point_count: 0,
            reduced_point_count: 0,
            reduction: format_percentage(0.0),
            straight_line_distance: 0.0,
            path_distance: 0.0,
            segments: Vec::new(),
            direction_change_count: 0,
            duration_hours: 0.0,
            max_speed: 0.0,
        }
    }
}

impl RouteStatistics {
    /// JSON representation for attaching to a serialized route.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

/// Compute statistics for a route with the default configuration.
///
/// Returns [`RouteStatistics::default`] if either sequence is empty.
pub fn compute_statistics(original: &[TrackPoint], reduced: &[TrackPoint]) -> RouteStatistics {
    compute_statistics_with_config(original, reduced, &StatisticsConfig::default())
}

/// Compute statistics for a route.
pub fn compute_statistics_with_config(
    original: &[TrackPoint],
    reduced: &[TrackPoint],
    config: &StatisticsConfig,
) -> RouteStatistics {
    if original.is_empty() || reduced.is_empty() {
        return RouteStatistics::default();
    }

    let ratio = (1.0 - reduced.len() as f64 / original.len() as f64) * 100.0;
    let (segments, direction_change_count) = segment_summary(reduced, config);

    RouteStatistics {
        original_point_count: original.len(),
        reduced_point_count: reduced.len(),
        reduction: format_percentage(ratio),
        straight_line_distance: straight_line_distance(original),
        path_distance: path_distance(original),
        segments,
        direction_change_count,
        duration_hours: duration_hours(original),
        max_speed: max_speed(original),
    }
}

fn format_percentage(value: f64) -> String {
    format!("{:.2}%", value)
}

fn straight_line_distance(points: &[TrackPoint]) -> f64 {
    let (first, last) = match (points.first(), points.last()) {
        (Some(first), Some(last)) if points.len() >= 2 => (first, last),
        _ => return 0.0,
    };

    match distance(first, last) {
        Ok(nm) => round_to(nm, OUTPUT_PRECISION),
        Err(e) => {
            log::warn!("track_reducer: straight-line distance skipped: {}", e);
            0.0
        }
    }
}

fn path_distance(points: &[TrackPoint]) -> f64 {
    let mut total = 0.0;
    for (i, pair) in points.windows(2).enumerate() {
        match distance(&pair[0], &pair[1]) {
            Ok(nm) => total += nm,
            Err(e) => log::warn!(
                "track_reducer: skipping segment {}-{} in path distance: {}",
                i,
                i + 1,
                e
            ),
        }
    }
    round_to(total, OUTPUT_PRECISION)
}

/// Legs of the simplified route and the number of bearing changes between them.
fn segment_summary(points: &[TrackPoint], config: &StatisticsConfig) -> (Vec<Segment>, usize) {
    let mut segments = Vec::with_capacity(points.len().saturating_sub(1));
    let mut changes = 0;
    let mut previous_bearing: Option<f64> = None;

    for (i, pair) in points.windows(2).enumerate() {
        let measured = bearing(&pair[0], &pair[1])
            .and_then(|deg| distance(&pair[0], &pair[1]).map(|nm| (deg, nm)));

        let (deg, nm) = match measured {
            Ok(measured) => measured,
            Err(e) => {
                log::warn!("track_reducer: skipping segment {}-{}: {}", i, i + 1, e);
                continue;
            }
        };

        if let Some(previous) = previous_bearing {
            if (deg - previous).abs() > config.bearing_change_tolerance {
                changes += 1;
            }
        }
        previous_bearing = Some(deg);

        segments.push(Segment {
            bearing: round_to(deg, OUTPUT_PRECISION),
            length: round_to(nm, OUTPUT_PRECISION),
        });
    }

    (segments, changes)
}

fn duration_hours(points: &[TrackPoint]) -> f64 {
    let (first, last) = match (
        points.first().and_then(|p| p.timestamp.as_deref()),
        points.last().and_then(|p| p.timestamp.as_deref()),
    ) {
        (Some(first), Some(last)) => (first, last),
        _ => return 0.0,
    };

    match (parse_timestamp(first), parse_timestamp(last)) {
        (Some(start), Some(end)) => {
            let millis = (end - start).num_milliseconds() as f64;
            round_to(millis / 3_600_000.0, OUTPUT_PRECISION)
        }
        _ => {
            log::warn!(
                "track_reducer: unparsable timestamps {:?} / {:?}, duration set to 0",
                first,
                last
            );
            0.0
        }
    }
}

fn max_speed(points: &[TrackPoint]) -> f64 {
    let mut max: Option<f64> = None;
    for speed in points.iter().filter_map(|p| p.speed.as_ref()) {
        match speed.as_f64() {
            Some(value) => max = Some(max.map_or(value, |m: f64| m.max(value))),
            None => log::debug!("track_reducer: ignoring speed value {:?}", speed),
        }
    }
    max.map_or(0.0, |m| round_to(m, OUTPUT_PRECISION))
}

/// Parse a track timestamp.
///
/// Accepts RFC 3339 (`2024-05-01T10:00:00Z`, `2024-05-01T12:00:00+02:00`) and
/// zone-less `2024-05-01T10:00:00` / `2024-05-01 10:00:00`, which are taken as UTC.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }

    NAIVE_TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|naive| naive.and_utc())
}
