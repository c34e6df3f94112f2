//! # Track Reducer
//!
//! GPS track simplification and route statistics.
//!
//! This library provides:
//! - Direction-run simplification that drops points which do not change a track's shape
//! - Great-circle distance and initial bearing in nautical miles / degrees
//! - Route statistics over the original and simplified tracks
//!
//! Parsing and writing track files is left to the caller: the library works on
//! [`TrackPoint`] sequences and hands back [`RouteStatistics`] records.
//!
//! ## Quick Start
//!
//! ```rust
//! use track_reducer::{compute_statistics, reduce, TrackPoint};
//!
//! let track = vec![
//!     TrackPoint::new(43.307228, -1.0),
//!     TrackPoint::new(43.306211, -1.0),
//!     TrackPoint::new(43.305673, -1.0),
//!     TrackPoint::new(43.302485, -1.0),
//!     TrackPoint::new(43.305502, -1.0),
//! ];
//!
//! let reduced = reduce(&track);
//! let stats = compute_statistics(&track, &reduced);
//! println!("{} -> {} points ({})", stats.original_point_count, stats.reduced_point_count, stats.reduction);
//! ```

use serde::{Deserialize, Serialize};

// Unified error handling
pub mod error;
pub use error::{OptionExt, Result, TrackError};

// Great-circle distance and bearing
pub mod geo_utils;
pub use geo_utils::{bearing, distance};

// Per-axis direction tracking
pub mod direction;
pub use direction::{axis_direction, current_directions, has_changed, AxisDirection, DirectionState};

// Direction-run simplification
pub mod simplify;
pub use simplify::reduce;

// Route statistics
pub mod statistics;
pub use statistics::{
    compute_statistics, compute_statistics_with_config, RouteStatistics, Segment,
    StatisticsConfig,
};

// Algorithm toolbox - flat access to all algorithms
pub mod algorithms;

// ============================================================================
// Core Types
// ============================================================================

/// A coordinate or numeric annotation as it arrives from a track file.
///
/// Track formats carry decimal degrees as text, JSON producers usually send
/// numbers; both are accepted and normalized when a calculation needs them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CoordinateValue {
    Number(f64),
    Text(String),
}

impl CoordinateValue {
    /// Parse to a finite `f64`, failing with `InvalidCoordinateValue`.
    pub fn to_degrees(&self, field: &str) -> Result<f64> {
        let parsed = match self {
            CoordinateValue::Number(value) => Some(*value),
            CoordinateValue::Text(text) => text.trim().parse::<f64>().ok(),
        };

        match parsed {
            Some(value) if value.is_finite() => Ok(value),
            _ => Err(TrackError::InvalidCoordinateValue {
                field: field.to_string(),
                value: self.to_string(),
            }),
        }
    }

    /// Numeric value if it parses, `None` otherwise.
    pub fn as_f64(&self) -> Option<f64> {
        self.to_degrees("value").ok()
    }
}

impl std::fmt::Display for CoordinateValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CoordinateValue::Number(value) => write!(f, "{}", value),
            CoordinateValue::Text(text) => write!(f, "{}", text),
        }
    }
}

impl From<f64> for CoordinateValue {
    fn from(value: f64) -> Self {
        CoordinateValue::Number(value)
    }
}

impl From<&str> for CoordinateValue {
    fn from(value: &str) -> Self {
        CoordinateValue::Text(value.to_string())
    }
}

impl From<String> for CoordinateValue {
    fn from(value: String) -> Self {
        CoordinateValue::Text(value)
    }
}

/// One sample on a GPS track.
///
/// `elevation`, `timestamp` and `speed` are carried through untouched by the
/// simplifier. The statistics engine reads `timestamp` and `speed`.
///
/// # Example
/// ```
/// use track_reducer::TrackPoint;
/// let point = TrackPoint::new(51.5074, -0.1278).with_timestamp("2024-05-01T10:00:00Z");
/// assert!(point.is_valid());
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TrackPoint {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<CoordinateValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lon: Option<CoordinateValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elevation: Option<CoordinateValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<CoordinateValue>,
}

impl TrackPoint {
    /// Create a point from numeric decimal degrees.
    pub fn new(lat: f64, lon: f64) -> Self {
        Self {
            lat: Some(CoordinateValue::Number(lat)),
            lon: Some(CoordinateValue::Number(lon)),
            ..Self::default()
        }
    }

    /// Create a point from decimal-degree strings, as found in GPX attributes.
    pub fn from_text(lat: &str, lon: &str) -> Self {
        Self {
            lat: Some(lat.into()),
            lon: Some(lon.into()),
            ..Self::default()
        }
    }

    pub fn with_elevation(mut self, elevation: f64) -> Self {
        self.elevation = Some(elevation.into());
        self
    }

    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }

    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = Some(speed.into());
        self
    }

    /// Validated latitude in degrees.
    pub fn latitude(&self) -> Result<f64> {
        validated(self.lat.as_ref(), "lat", 90.0)
    }

    /// Validated longitude in degrees.
    pub fn longitude(&self) -> Result<f64> {
        validated(self.lon.as_ref(), "lon", 180.0)
    }

    /// Check if the point has present, numeric, in-range coordinates.
    pub fn is_valid(&self) -> bool {
        self.latitude().is_ok() && self.longitude().is_ok()
    }

    /// Latitude for comparison only. Missing or unparsable values become NaN,
    /// which compares as neither greater nor smaller than anything.
    pub(crate) fn raw_latitude(&self) -> f64 {
        self.lat.as_ref().and_then(|v| v.as_f64()).unwrap_or(f64::NAN)
    }

    pub(crate) fn raw_longitude(&self) -> f64 {
        self.lon.as_ref().and_then(|v| v.as_f64()).unwrap_or(f64::NAN)
    }
}

fn validated(value: Option<&CoordinateValue>, field: &str, limit: f64) -> Result<f64> {
    let degrees = value.ok_or_invalid_input(field)?.to_degrees(field)?;
    if degrees.abs() > limit {
        return Err(TrackError::OutOfRangeCoordinate {
            field: field.to_string(),
            value: degrees,
        });
    }
    Ok(degrees)
}

/// A route or track segment as decoded from a track file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Route {
    /// Route name, if the source format carries one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub points: Vec<TrackPoint>,
}

impl Route {
    pub fn new(name: Option<String>, points: Vec<TrackPoint>) -> Self {
        Self { name, points }
    }
}

/// A route after simplification, with statistics attached for re-serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedRoute {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Simplified points
    pub points: Vec<TrackPoint>,
    /// Statistics over the original and simplified points
    pub statistics: RouteStatistics,
}

// ============================================================================
// Core Functions
// ============================================================================

/// Simplify a route and compute its statistics.
///
/// # Example
/// ```
/// use track_reducer::{process_route, Route, TrackPoint};
///
/// let route = Route::new(
///     Some("harbour".to_string()),
///     vec![
///         TrackPoint::new(43.30, -1.00),
///         TrackPoint::new(43.29, -1.00),
///         TrackPoint::new(43.28, -1.00),
///         TrackPoint::new(43.27, -1.00),
///     ],
/// );
///
/// let processed = process_route(&route);
/// assert_eq!(processed.points.len(), 3);
/// assert_eq!(processed.statistics.original_point_count, 4);
/// ```
pub fn process_route(route: &Route) -> ProcessedRoute {
    let reduced = reduce(&route.points);
    let statistics = compute_statistics(&route.points, &reduced);

    log::debug!(
        "track_reducer: route {:?} reduced {} -> {} points ({})",
        route.name.as_deref().unwrap_or("<unnamed>"),
        statistics.original_point_count,
        statistics.reduced_point_count,
        statistics.reduction
    );

    ProcessedRoute {
        name: route.name.clone(),
        points: reduced,
        statistics,
    }
}

/// Process every route of a track file in order.
pub fn process_routes(routes: &[Route]) -> Vec<ProcessedRoute> {
    routes.iter().map(process_route).collect()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_validation() {
        assert!(TrackPoint::new(51.5074, -0.1278).is_valid());
        assert!(TrackPoint::from_text("51.5074", "-0.1278").is_valid());
        assert!(!TrackPoint::new(91.0, 0.0).is_valid());
        assert!(!TrackPoint::new(0.0, 181.0).is_valid());
        assert!(!TrackPoint::new(f64::NAN, 0.0).is_valid());
        assert!(!TrackPoint::default().is_valid());
    }

    #[test]
    fn test_boundary_coordinates_are_valid() {
        assert!(TrackPoint::new(90.0, 180.0).is_valid());
        assert!(TrackPoint::new(-90.0, -180.0).is_valid());
    }

    #[test]
    fn test_coordinate_errors() {
        let missing = TrackPoint {
            lon: Some(1.0.into()),
            ..TrackPoint::default()
        };
        assert!(matches!(
            missing.latitude(),
            Err(TrackError::InvalidInput { .. })
        ));

        let garbage = TrackPoint::from_text("north", "1.0");
        assert!(matches!(
            garbage.latitude(),
            Err(TrackError::InvalidCoordinateValue { .. })
        ));

        let far = TrackPoint::new(10.0, -180.5);
        assert_eq!(
            far.longitude(),
            Err(TrackError::OutOfRangeCoordinate {
                field: "lon".to_string(),
                value: -180.5
            })
        );
    }

    #[test]
    fn test_raw_coordinates_are_lenient() {
        let garbage = TrackPoint::from_text("north", " 2.5 ");
        assert!(garbage.raw_latitude().is_nan());
        assert_eq!(garbage.raw_longitude(), 2.5);
    }

    #[test]
    fn test_point_deserializes_numbers_and_strings() {
        let json = r#"{"lat": "43.307228", "lon": -1.5, "speed": "4.2"}"#;
        let point: TrackPoint = serde_json::from_str(json).unwrap();
        assert_eq!(point.latitude().unwrap(), 43.307228);
        assert_eq!(point.longitude().unwrap(), -1.5);
        assert_eq!(point.speed.as_ref().and_then(|s| s.as_f64()), Some(4.2));
        assert!(point.timestamp.is_none());
    }

    #[test]
    fn test_process_routes_keeps_order() {
        let routes = vec![
            Route::new(Some("a".to_string()), vec![TrackPoint::new(1.0, 1.0)]),
            Route::new(Some("b".to_string()), vec![]),
        ];
        let processed = process_routes(&routes);
        assert_eq!(processed.len(), 2);
        assert_eq!(processed[0].name.as_deref(), Some("a"));
        assert_eq!(processed[0].points.len(), 1);
        assert_eq!(processed[1].statistics, RouteStatistics::default());
    }
}
