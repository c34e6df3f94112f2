//! End-to-end tests: decoded route -> simplification -> statistics -> JSON.
//!
//! Run with: `cargo test --test route_pipeline`

use track_reducer::{
    bearing, compute_statistics, distance, process_route, process_routes, reduce, ProcessedRoute,
    Route, RouteStatistics, TrackError, TrackPoint,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Harbour exit: heading south, turning back north.
fn reference_route() -> Route {
    let json = r#"{
        "name": "harbour exit",
        "points": [
            {"lat": "43.307228", "lon": "-1.987654", "timestamp": "2024-05-01T08:00:00Z", "speed": "3.1"},
            {"lat": "43.306211", "lon": "-1.987654", "elevation": 2.0},
            {"lat": "43.305673", "lon": "-1.987654", "speed": 5.4},
            {"lat": "43.302485", "lon": "-1.987654"},
            {"lat": "43.302471", "lon": "-1.987654", "speed": "n/a"},
            {"lat": "43.305502", "lon": "-1.987654"},
            {"lat": "43.315637", "lon": "-1.987654", "timestamp": "2024-05-01T08:45:00Z"}
        ]
    }"#;
    serde_json::from_str(json).unwrap()
}

// ============================================================================
// Geometry
// ============================================================================

#[test]
fn test_geometry_properties() {
    let points = [
        TrackPoint::new(0.0, 0.0),
        TrackPoint::new(43.307228, -1.987654),
        TrackPoint::new(-33.8688, 151.2093),
        TrackPoint::new(65.0, 179.9),
        TrackPoint::new(65.0, -179.9),
    ];

    for a in &points {
        assert_eq!(distance(a, a).unwrap(), 0.0);
        assert_eq!(bearing(a, a).unwrap(), 0.0);
        for b in &points {
            let ab = distance(a, b).unwrap();
            let ba = distance(b, a).unwrap();
            assert!(ab >= 0.0);
            assert!((ab - ba).abs() <= 1e-6, "{} vs {}", ab, ba);
        }
    }

    let antimeridian = distance(&points[3], &points[4]).unwrap();
    assert!(antimeridian < 100.0);
}

#[test]
fn test_geometry_errors_propagate_to_direct_callers() {
    let good = TrackPoint::new(1.0, 1.0);

    let no_lon = TrackPoint {
        lat: Some(1.0.into()),
        ..TrackPoint::default()
    };
    assert!(matches!(
        bearing(&good, &no_lon),
        Err(TrackError::InvalidInput { .. })
    ));
    assert!(matches!(
        distance(&TrackPoint::from_text("43,30", "1.0"), &good),
        Err(TrackError::InvalidCoordinateValue { .. })
    ));
    assert!(matches!(
        distance(&good, &TrackPoint::new(-90.5, 0.0)),
        Err(TrackError::OutOfRangeCoordinate { .. })
    ));
}

// ============================================================================
// Pipeline
// ============================================================================

#[test]
fn test_reference_route_pipeline() {
    init_logging();
    let route = reference_route();
    let processed = process_route(&route);

    assert_eq!(processed.name.as_deref(), Some("harbour exit"));
    assert_eq!(
        processed.points,
        vec![
            route.points[0].clone(),
            route.points[1].clone(),
            route.points[4].clone(),
            route.points[6].clone(),
        ]
    );

    let stats = &processed.statistics;
    assert_eq!(stats.original_point_count, 7);
    assert_eq!(stats.reduced_point_count, 4);
    assert_eq!(stats.reduction, "42.86%");
    assert_eq!(stats.segments.len(), 3);
    assert_eq!(stats.duration_hours, 0.75);
    assert_eq!(stats.max_speed, 5.4);

    // South, south, then north: one direction change
    assert!((stats.segments[0].bearing - 180.0).abs() < 0.01);
    assert!((stats.segments[1].bearing - 180.0).abs() < 0.01);
    assert!(stats.segments[2].bearing.abs() < 0.01);
    assert_eq!(stats.direction_change_count, 1);

    // The track doubles back, so it travelled further than it ended up
    assert!(stats.path_distance > stats.straight_line_distance);
    assert!(stats.straight_line_distance > 0.0);
}

#[test]
fn test_reduce_twice_is_stable() {
    let route = reference_route();
    let once = reduce(&route.points);
    assert_eq!(reduce(&once), once);
}

#[test]
fn test_short_routes() {
    let empty = Route::default();
    let single = Route::new(None, vec![TrackPoint::new(10.0, 10.0)]);
    let pair = Route::new(
        None,
        vec![TrackPoint::new(10.0, 10.0), TrackPoint::new(10.1, 10.1)],
    );

    let processed = process_routes(&[empty, single.clone(), pair.clone()]);
    assert!(processed[0].points.is_empty());
    assert_eq!(processed[0].statistics, RouteStatistics::default());
    assert_eq!(processed[1].points, single.points);
    assert_eq!(processed[2].points, pair.points);
    assert_eq!(processed[2].statistics.segments.len(), 1);
}

#[test]
fn test_malformed_point_does_not_abort_statistics() {
    init_logging();
    let points = vec![
        TrackPoint::new(0.0, 0.0),
        TrackPoint::new(0.0, 0.1),
        TrackPoint::new(120.0, 0.15),
        TrackPoint::new(0.0, 0.2),
    ];
    let reduced = reduce(&points);
    let stats = compute_statistics(&points, &reduced);

    assert_eq!(stats.original_point_count, 4);
    assert!((stats.path_distance - 6.0).abs() < 0.011);
    assert!((stats.straight_line_distance - 12.01).abs() < 0.011);
}

#[test]
fn test_processed_route_serializes() {
    let processed = process_route(&reference_route());
    let json = serde_json::to_value(&processed).unwrap();

    assert_eq!(json["name"], "harbour exit");
    assert_eq!(json["points"][0]["lat"], "43.307228");
    assert_eq!(json["points"][1]["elevation"], 2.0);
    assert_eq!(json["statistics"]["reduction"], "42.86%");
    assert_eq!(json["statistics"], processed.statistics.to_json());

    let back: ProcessedRoute = serde_json::from_value(json).unwrap();
    assert_eq!(back.points.len(), processed.points.len());
    assert_eq!(back.points[0], processed.points[0]);
    assert_eq!(back.statistics.direction_change_count, 1);
}
