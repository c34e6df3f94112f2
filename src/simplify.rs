//! Direction-run simplification.
//!
//! A run of points along which latitude and longitude keep the same sign of
//! change adds no shape information: only its end points matter. The
//! simplifier keeps the first two points (the second anchors the initial
//! direction), the point before every sign flip on either axis, and the last
//! point. Exact equality on an axis is a direction of its own, distinct from
//! both increasing and decreasing.
//!
//! The simplifier compares raw coordinate values and never validates ranges,
//! so malformed coordinates can affect which points are kept but cannot make
//! it fail.

use crate::direction::{current_directions, has_changed};
use crate::TrackPoint;

/// Drop the points of a track that lie inside a direction run.
///
/// The output is an ordered subsequence of the input that always contains the
/// first and last input points. Inputs of two or fewer points are returned
/// unchanged. Reducing an already reduced track returns it unchanged.
///
/// # Example
/// ```
/// use track_reducer::{reduce, TrackPoint};
///
/// let lats = [43.307228, 43.306211, 43.305673, 43.302485, 43.302471, 43.305502, 43.315637];
/// let track: Vec<TrackPoint> = lats.iter().map(|&lat| TrackPoint::new(lat, -1.5)).collect();
///
/// let reduced = reduce(&track);
/// assert_eq!(reduced, vec![
///     track[0].clone(),
///     track[1].clone(),
///     track[4].clone(),
///     track[6].clone(),
/// ]);
/// ```
pub fn reduce(points: &[TrackPoint]) -> Vec<TrackPoint> {
    if points.len() <= 2 {
        return points.to_vec();
    }

    let mut kept: Vec<usize> = vec![0, 1];
    let mut state = current_directions(Some(&points[1]), Some(&points[0]));

    for index in 2..points.len() {
        let current = &points[index - 1];
        let next = &points[index];

        if has_changed(next, Some(current), &state) {
            // The point before the flip closes the run
            if kept.last() != Some(&(index - 1)) {
                kept.push(index - 1);
            }
            state = current_directions(Some(next), Some(current));
        }
    }

    let last = points.len() - 1;
    if kept.last() != Some(&last) {
        kept.push(last);
    }

    kept.into_iter().map(|i| points[i].clone()).collect()
}
