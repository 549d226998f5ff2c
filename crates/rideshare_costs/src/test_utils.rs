use crate::model::{Coordinate, Location, RouteSegment};

pub fn location(lat: f64, lng: f64) -> Location {
    Location::new(
        Coordinate::new(lat, lng).unwrap(),
        format!("{}, {}", lat, lng),
    )
}

pub fn segment(start: (f64, f64), end: (f64, f64), distance_km: f64) -> RouteSegment {
    RouteSegment::new(
        location(start.0, start.1),
        location(end.0, end.1),
        distance_km,
    )
}

#[track_caller]
pub fn assert_approx(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {} to be approximately {}",
        actual,
        expected
    );
}
