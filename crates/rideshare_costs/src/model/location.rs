use rideshare_providers::geocoding::GeocodedPlace;
use serde::{Deserialize, Serialize};

use crate::{error::InvalidCoordinate, model::coordinate::Coordinate};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    #[serde(flatten)]
    coordinate: Coordinate,
    address: String,
}

impl Location {
    pub fn new(coordinate: Coordinate, address: impl Into<String>) -> Self {
        Self {
            coordinate,
            address: address.into(),
        }
    }

    pub fn coordinate(&self) -> Coordinate {
        self.coordinate
    }

    pub fn lat(&self) -> f64 {
        self.coordinate.lat()
    }

    pub fn lng(&self) -> f64 {
        self.coordinate.lng()
    }

    pub fn address(&self) -> &str {
        &self.address
    }
}

impl TryFrom<GeocodedPlace> for Location {
    type Error = InvalidCoordinate;

    fn try_from(place: GeocodedPlace) -> Result<Self, Self::Error> {
        Ok(Location::new(
            Coordinate::try_from(place.point)?,
            place.display_name,
        ))
    }
}

impl From<&Location> for geo_types::Point<f64> {
    fn from(location: &Location) -> Self {
        location.coordinate.into()
    }
}

impl From<&Location> for geo_types::Coord<f64> {
    fn from(location: &Location) -> Self {
        (&location.coordinate).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_flat() {
        let location = Location::new(Coordinate::new(12.5, 77.25).unwrap(), "Bengaluru");
        let value = serde_json::to_value(&location).unwrap();

        assert_eq!(
            value,
            serde_json::json!({ "lat": 12.5, "lng": 77.25, "address": "Bengaluru" })
        );
    }

    #[test]
    fn test_from_geocoded_place_uses_display_name() {
        let place = GeocodedPlace {
            point: geo_types::Point::new(77.25, 12.5),
            display_name: String::from("Bengaluru, Karnataka, India"),
        };

        let location = Location::try_from(place).unwrap();

        assert_eq!(location.lat(), 12.5);
        assert_eq!(location.lng(), 77.25);
        assert_eq!(location.address(), "Bengaluru, Karnataka, India");
    }
}
