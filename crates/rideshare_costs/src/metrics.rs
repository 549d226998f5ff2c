use std::collections::BTreeMap;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::{
    allocator::{validate_segment, validate_vehicle},
    error::CostError,
    model::{Passenger, RouteSegment, Vehicle},
};

/// A finalized ride, as handed to a ride store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RideMetrics {
    pub id: String,
    pub route: RouteSegment,
    pub vehicle: Vehicle,
    pub passengers: Vec<Passenger>,
    pub total_cost: f64,
    /// Keyed by passenger id, names are not unique.
    pub cost_per_passenger: BTreeMap<String, f64>,
    pub total_distance_km: f64,
    pub created_at: Timestamp,
}

impl RideMetrics {
    /// Checks a record that did not come out of a session.
    pub fn validate(&self) -> Result<(), CostError> {
        validate_vehicle(&self.vehicle)?;
        validate_segment(&self.route)?;

        for passenger in &self.passengers {
            validate_segment(passenger.segment())?;

            if !self.cost_per_passenger.contains_key(passenger.id()) {
                return Err(CostError::InvalidSegment(format!(
                    "no cost recorded for passenger {}",
                    passenger.id()
                )));
            }
        }

        if self.cost_per_passenger.len() != self.passengers.len() {
            return Err(CostError::InvalidSegment(String::from(
                "costs recorded for unknown passengers",
            )));
        }

        let totals = [self.total_cost, self.total_distance_km]
            .into_iter()
            .chain(self.cost_per_passenger.values().copied());

        for value in totals {
            if !value.is_finite() || value < 0.0 {
                return Err(CostError::InvalidSegment(format!(
                    "totals must be non negative numbers, got {}",
                    value
                )));
            }
        }

        Ok(())
    }
}
