use serde::{Deserialize, Serialize};

use crate::{model::location::Location, overlap::BBox};

/// A pickup/drop pair plus its road distance. `was_estimated` is set when the routing
/// provider could not be reached and the default distance was used instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteSegment {
    start: Location,
    end: Location,
    distance_km: f64,
    #[serde(default)]
    was_estimated: bool,
}

impl RouteSegment {
    pub fn new(start: Location, end: Location, distance_km: f64) -> Self {
        Self {
            start,
            end,
            distance_km,
            was_estimated: false,
        }
    }

    pub fn estimated(start: Location, end: Location, distance_km: f64) -> Self {
        Self {
            start,
            end,
            distance_km,
            was_estimated: true,
        }
    }

    pub fn start(&self) -> &Location {
        &self.start
    }

    pub fn end(&self) -> &Location {
        &self.end
    }

    pub fn distance_km(&self) -> f64 {
        self.distance_km
    }

    pub fn was_estimated(&self) -> bool {
        self.was_estimated
    }

    pub fn bbox(&self) -> BBox {
        let mut bbox = BBox::default();
        bbox.extend(&self.start);
        bbox.extend(&self.end);
        bbox
    }
}
