//! Per-axis direction tracking.
//!
//! A step between two points is summarized by the sign of its latitude change
//! and the sign of its longitude change. Comparison is strict: any difference,
//! however small, is a direction, and only exact equality is [`AxisDirection::Steady`].
//! Noisy tracks therefore keep many points; this is accepted behavior.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::TrackPoint;

/// Sign of change along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AxisDirection {
    Decreasing,
    #[default]
    Steady,
    Increasing,
}

impl AxisDirection {
    /// The sign as `-1`, `0` or `1`.
    pub fn sign(self) -> i8 {
        match self {
            AxisDirection::Decreasing => -1,
            AxisDirection::Steady => 0,
            AxisDirection::Increasing => 1,
        }
    }
}

/// Latitude and longitude signs of the most recent retained step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct DirectionState {
    pub lat: AxisDirection,
    pub lon: AxisDirection,
}

impl DirectionState {
    pub fn new(lat: AxisDirection, lon: AxisDirection) -> Self {
        Self { lat, lon }
    }
}

/// Compare one coordinate against its previous value without tolerance.
///
/// Values that cannot be ordered (NaN) compare as `Steady`.
pub fn axis_direction(current: f64, previous: f64) -> AxisDirection {
    match current.partial_cmp(&previous) {
        Some(Ordering::Greater) => AxisDirection::Increasing,
        Some(Ordering::Less) => AxisDirection::Decreasing,
        Some(Ordering::Equal) | None => AxisDirection::Steady,
    }
}

/// Direction of the step from `previous` to `current`.
///
/// Returns the all-steady state if either point is absent. Coordinates are not
/// range-checked here.
pub fn current_directions(
    current: Option<&TrackPoint>,
    previous: Option<&TrackPoint>,
) -> DirectionState {
    match (current, previous) {
        (Some(current), Some(previous)) => DirectionState {
            lat: axis_direction(current.raw_latitude(), previous.raw_latitude()),
            lon: axis_direction(current.raw_longitude(), previous.raw_longitude()),
        },
        _ => DirectionState::default(),
    }
}

/// Whether the step from `previous` to `current` leaves the tracked direction.
///
/// With no previous point this is always `true`, so the first point of a track
/// is always kept.
pub fn has_changed(
    current: &TrackPoint,
    previous: Option<&TrackPoint>,
    state: &DirectionState,
) -> bool {
    if previous.is_none() {
        return true;
    }
    current_directions(Some(current), previous) != *state
}
