//! Unified error handling for the track-reducer library.
//!
//! Only the geometry calculations can fail. The simplifier never raises and the
//! statistics engine absorbs per-pair failures, so these errors reach a caller
//! only through direct `distance`/`bearing` calls or coordinate parsing.

use std::fmt;

/// Unified error type for track-reducer operations.
#[derive(Debug, Clone, PartialEq)]
pub enum TrackError {
    /// A point is missing a required coordinate field
    InvalidInput { field: String },
    /// A coordinate could not be parsed to a number
    InvalidCoordinateValue { field: String, value: String },
    /// A coordinate is outside |lat| <= 90 / |lon| <= 180
    OutOfRangeCoordinate { field: String, value: f64 },
}

impl fmt::Display for TrackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackError::InvalidInput { field } => {
                write!(f, "Invalid input: point is missing '{}'", field)
            }
            TrackError::InvalidCoordinateValue { field, value } => {
                write!(f, "Invalid coordinate value for '{}': {:?}", field, value)
            }
            TrackError::OutOfRangeCoordinate { field, value } => {
                write!(f, "Coordinate '{}' out of range: {}", field, value)
            }
        }
    }
}

impl std::error::Error for TrackError {}

/// Result type alias for track-reducer operations.
pub type Result<T> = std::result::Result<T, TrackError>;

/// Extension trait for converting Option to TrackError.
pub trait OptionExt<T> {
    /// Convert Option to Result with an invalid input error naming the missing field.
    fn ok_or_invalid_input(self, field: &str) -> Result<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_invalid_input(self, field: &str) -> Result<T> {
        self.ok_or_else(|| TrackError::InvalidInput {
            field: field.to_string(),
        })
    }
}
