#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::atomic::{AtomicU32, Ordering},
    time::Duration,
};

use rideshare_costs::{
    model::{Coordinate, Location, RouteSegment, Vehicle},
    resolution::SegmentResolver,
};
use rideshare_providers::{
    error::{GeocodeError, RouteError},
    geocoding::{GeocodedPlace, Geocoder},
    routing::RouteDistanceProvider,
};

pub const BENGALURU: (f64, f64) = (12.97, 77.59);
pub const MYSURU: (f64, f64) = (12.30, 76.65);
pub const KENGERI: (f64, f64) = (12.91, 77.48);
pub const MADDUR: (f64, f64) = (12.58, 77.04);
pub const RAMANAGARA: (f64, f64) = (12.72, 77.28);
pub const MANDYA: (f64, f64) = (12.52, 76.90);
pub const HOSUR: (f64, f64) = (12.74, 77.83);
pub const KRISHNAGIRI: (f64, f64) = (12.52, 78.21);

pub fn vehicle() -> Vehicle {
    Vehicle::new(15.0, 100.0)
}

pub fn location(name: &str, (lat, lng): (f64, f64)) -> Location {
    Location::new(Coordinate::new(lat, lng).unwrap(), name)
}

pub fn segment(from: (f64, f64), to: (f64, f64), distance_km: f64) -> RouteSegment {
    RouteSegment::new(location("from", from), location("to", to), distance_km)
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

/// Answers from a fixed gazetteer, anything else is not found.
#[derive(Default)]
pub struct FakeGeocoder {
    places: HashMap<String, (f64, f64)>,
    unavailable: bool,
    delay: Duration,
    calls: AtomicU32,
}

impl FakeGeocoder {
    pub fn new() -> Self {
        Self::default()
            .with_place("Bengaluru", BENGALURU)
            .with_place("Mysuru", MYSURU)
            .with_place("Kengeri", KENGERI)
            .with_place("Maddur", MADDUR)
            .with_place("Ramanagara", RAMANAGARA)
            .with_place("Mandya", MANDYA)
            .with_place("Hosur", HOSUR)
            .with_place("Krishnagiri", KRISHNAGIRI)
    }

    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    pub fn with_place(mut self, name: &str, position: (f64, f64)) -> Self {
        self.places.insert(name.to_string(), position);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Geocoder for FakeGeocoder {
    async fn geocode(&self, address: &str) -> Result<GeocodedPlace, GeocodeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let address = address.trim();
        if address.is_empty() {
            return Err(GeocodeError::EmptyAddress);
        }
        if self.unavailable {
            return Err(GeocodeError::Unavailable(String::from("connection refused")));
        }

        let (lat, lng) = self
            .places
            .get(address)
            .copied()
            .ok_or_else(|| GeocodeError::NotFound {
                address: address.to_string(),
            })?;

        Ok(place(address, (lat, lng)))
    }

    async fn suggest(&self, query: &str, limit: usize) -> Result<Vec<GeocodedPlace>, GeocodeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.unavailable {
            return Err(GeocodeError::Unavailable(String::from("connection refused")));
        }

        let query = query.trim().to_lowercase();
        let mut names: Vec<&String> = self
            .places
            .keys()
            .filter(|name| name.to_lowercase().starts_with(&query))
            .collect();
        names.sort();

        Ok(names
            .into_iter()
            .take(limit)
            .map(|name| place(name, self.places[name]))
            .collect())
    }

    async fn reverse(&self, point: geo_types::Point) -> Result<GeocodedPlace, GeocodeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.unavailable {
            return Err(GeocodeError::Unavailable(String::from("connection refused")));
        }

        self.places
            .iter()
            .find(|(_, (lat, lng))| *lat == point.y() && *lng == point.x())
            .map(|(name, position)| place(name, *position))
            .ok_or_else(|| GeocodeError::NotFound {
                address: format!("{}, {}", point.y(), point.x()),
            })
    }
}

fn place(name: &str, (lat, lng): (f64, f64)) -> GeocodedPlace {
    GeocodedPlace {
        point: geo_types::Point::new(lng, lat),
        display_name: format!("{}, Karnataka, India", name),
    }
}

#[derive(Debug, Clone, Copy)]
pub enum FakeRoute {
    Distance(f64),
    Unavailable,
    NoRoute,
}

/// Distances per (origin, destination), `otherwise` for any other pair.
pub struct FakeRouter {
    routes: Vec<((f64, f64), (f64, f64), f64)>,
    otherwise: FakeRoute,
    calls: AtomicU32,
}

impl FakeRouter {
    pub fn new(otherwise: FakeRoute) -> Self {
        Self {
            routes: vec![],
            otherwise,
            calls: AtomicU32::new(0),
        }
    }

    pub fn with_route(mut self, from: (f64, f64), to: (f64, f64), distance_km: f64) -> Self {
        self.routes.push((from, to, distance_km));
        self
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

impl RouteDistanceProvider for FakeRouter {
    async fn distance_km(
        &self,
        origin: geo_types::Point,
        destination: geo_types::Point,
    ) -> Result<f64, RouteError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let known = self.routes.iter().find(|(from, to, _)| {
            *from == (origin.y(), origin.x()) && *to == (destination.y(), destination.x())
        });

        match (known, self.otherwise) {
            (Some((_, _, distance_km)), _) => Ok(*distance_km),
            (None, FakeRoute::Distance(distance_km)) => Ok(distance_km),
            (None, FakeRoute::Unavailable) => {
                Err(RouteError::Unavailable(String::from("operation timed out")))
            }
            (None, FakeRoute::NoRoute) => Err(RouteError::NoRouteFound(String::from(
                "404 - Route could not be found",
            ))),
        }
    }
}

/// Bengaluru to Mysuru is 150 km, every other pair is 50 km.
pub fn router() -> FakeRouter {
    FakeRouter::new(FakeRoute::Distance(50.0)).with_route(BENGALURU, MYSURU, 150.0)
}

pub fn resolver(
    geocoder: FakeGeocoder,
    router: FakeRouter,
) -> SegmentResolver<FakeGeocoder, FakeRouter> {
    SegmentResolver::new(geocoder, router, 10.0)
}
