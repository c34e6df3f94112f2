//! # Algorithm Toolbox
//!
//! Flat access to every track algorithm, for callers that want one import path
//! instead of the module layout.
//!
//! ## Core Algorithms
//!
//! - **Simplification**: direction-run reduction of a track
//! - **Statistics**: distances, segment bearings, duration and speed of a route
//!
//! ## Geographic Utilities
//!
//! - **Haversine Distance**: great-circle distance in nautical miles
//! - **Initial Bearing**: compass heading between two points
//!
//! # Example
//!
//! ```rust
//! use track_reducer::algorithms::{bearing, distance, reduce, TrackPoint};
//!
//! let start = TrackPoint::new(65.0, 179.9);
//! let end = TrackPoint::new(65.0, -179.9);
//! let nm = distance(&start, &end).unwrap();
//! let heading = bearing(&start, &end).unwrap();
//! println!("{:.2} nm on {:.0} degrees", nm, heading);
//!
//! let track = vec![start.clone(), end.clone()];
//! assert_eq!(reduce(&track).len(), 2);
//! ```

// =============================================================================
// Core Types (re-exported from lib)
// =============================================================================

pub use crate::{CoordinateValue, ProcessedRoute, Route, TrackError, TrackPoint};

// =============================================================================
// Geographic Utilities
// =============================================================================

pub use crate::geo_utils::{
    bearing, distance, round_to, DISTANCE_PRECISION, EARTH_RADIUS_NM, METERS_PER_NAUTICAL_MILE,
};

// =============================================================================
// Direction Tracking
// =============================================================================

pub use crate::direction::{
    axis_direction, current_directions, has_changed, AxisDirection, DirectionState,
};

// =============================================================================
// Simplification
// =============================================================================

/// Drop points that lie inside a direction run.
pub use crate::simplify::reduce;

// =============================================================================
// Statistics
// =============================================================================

pub use crate::statistics::{
    compute_statistics, compute_statistics_with_config, parse_timestamp, RouteStatistics,
    Segment, StatisticsConfig, BEARING_CHANGE_TOLERANCE, OUTPUT_PRECISION,
};

/// Simplify a route and compute its statistics.
pub use crate::{process_route, process_routes};
