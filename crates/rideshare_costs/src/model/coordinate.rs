use serde::{Deserialize, Serialize};

use crate::error::InvalidCoordinate;

/// A WGS84 position. Construction guarantees lat in [-90, 90] and lng in [-180, 180].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinate")]
pub struct Coordinate {
    lat: f64,
    lng: f64,
}

#[derive(Deserialize)]
struct RawCoordinate {
    lat: f64,
    lng: f64,
}

impl TryFrom<RawCoordinate> for Coordinate {
    type Error = InvalidCoordinate;

    fn try_from(raw: RawCoordinate) -> Result<Self, Self::Error> {
        Coordinate::new(raw.lat, raw.lng)
    }
}

impl Coordinate {
    pub const ZERO: Coordinate = Coordinate { lat: 0.0, lng: 0.0 };

    pub fn new(lat: f64, lng: f64) -> Result<Self, InvalidCoordinate> {
        if (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lng) {
            Ok(Self { lat, lng })
        } else {
            Err(InvalidCoordinate { lat, lng })
        }
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lng(&self) -> f64 {
        self.lng
    }
}

impl From<Coordinate> for geo_types::Point<f64> {
    fn from(coordinate: Coordinate) -> Self {
        geo_types::Point::new(coordinate.lng, coordinate.lat)
    }
}

impl From<&Coordinate> for geo_types::Coord<f64> {
    fn from(coordinate: &Coordinate) -> Self {
        geo_types::Coord {
            x: coordinate.lng,
            y: coordinate.lat,
        }
    }
}

impl TryFrom<geo_types::Point<f64>> for Coordinate {
    type Error = InvalidCoordinate;

    fn try_from(point: geo_types::Point<f64>) -> Result<Self, Self::Error> {
        Coordinate::new(point.y(), point.x())
    }
}
