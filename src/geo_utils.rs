//! # Geographic Utilities
//!
//! Great-circle distance and initial bearing between two track points.
//!
//! | Function | Description |
//! |----------|-------------|
//! | [`distance`] | Haversine distance in nautical miles |
//! | [`bearing`] | Initial great-circle bearing in degrees, `[0, 360)` |
//! | [`round_to`] | Round to a fixed number of decimal places |
//!
//! Both calculations validate their inputs: missing coordinates fail with
//! [`TrackError::InvalidInput`](crate::TrackError::InvalidInput), unparsable ones
//! with `InvalidCoordinateValue` and out-of-range ones with `OutOfRangeCoordinate`.
//!
//! ## Algorithm Notes
//!
//! The Haversine formula is evaluated by the `geo` crate on a sphere of mean
//! Earth radius 6 371 008.8 m, i.e. about 3440.069 nautical miles. Longitude
//! differences are taken through the trigonometric functions, so tracks that
//! cross the antimeridian take the short way around.

use geo::{Bearing, Distance, Haversine, Point};

use crate::{Result, TrackPoint};

/// Metres in one nautical mile.
pub const METERS_PER_NAUTICAL_MILE: f64 = 1852.0;

/// Mean Earth radius (6371.0088 km) in nautical miles.
pub const EARTH_RADIUS_NM: f64 = 6_371_008.8 / METERS_PER_NAUTICAL_MILE;

/// Decimal places kept on raw distances to suppress floating-point jitter.
pub const DISTANCE_PRECISION: u32 = 6;

/// Round `value` to `decimals` decimal places.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Validate a point and convert it to a `geo::Point` (x = longitude, y = latitude).
fn to_geo_point(point: &TrackPoint) -> Result<Point<f64>> {
    let lat = point.latitude()?;
    let lon = point.longitude()?;
    Ok(Point::new(lon, lat))
}

/// Great-circle distance between two points in nautical miles.
///
/// The result is rounded to six decimal places and is exactly `0` for
/// identical points.
///
/// # Example
///
/// ```rust
/// use track_reducer::{distance, TrackPoint};
///
/// let a = TrackPoint::new(0.0, 0.0);
/// let b = TrackPoint::new(0.1, 0.0);
/// let nm = distance(&a, &b).unwrap();
/// assert!((nm - 6.0).abs() < 0.01);
/// ```
pub fn distance(a: &TrackPoint, b: &TrackPoint) -> Result<f64> {
    let from = to_geo_point(a)?;
    let to = to_geo_point(b)?;
    let meters = Haversine::distance(from, to);
    Ok(round_to(meters / METERS_PER_NAUTICAL_MILE, DISTANCE_PRECISION))
}

/// Initial great-circle bearing from `a` to `b` in degrees clockwise from north.
///
/// Returns `0` when both points share the same latitude and longitude.
///
/// # Example
///
/// ```rust
/// use track_reducer::{bearing, TrackPoint};
///
/// let a = TrackPoint::new(0.0, 0.0);
/// let east = TrackPoint::new(0.0, 1.0);
/// assert!((bearing(&a, &east).unwrap() - 90.0).abs() < 1e-9);
/// ```
pub fn bearing(a: &TrackPoint, b: &TrackPoint) -> Result<f64> {
    let from = to_geo_point(a)?;
    let to = to_geo_point(b)?;

    if from == to {
        return Ok(0.0);
    }

    let degrees = Haversine::bearing(from, to);
    Ok((degrees + 360.0) % 360.0)
}
