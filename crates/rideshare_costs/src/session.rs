use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::{
    allocator::{self, CostBreakdown, PassengerQuote},
    error::{CostError, SessionError},
    metrics::RideMetrics,
    model::{Passenger, RouteSegment, Vehicle},
};

/// One interactive cost calculation: a vehicle, its primary route and the passengers
/// added so far, in insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RideSession {
    id: String,
    vehicle: Vehicle,
    primary: RouteSegment,
    passengers: Vec<Passenger>,
    created_at: Timestamp,
}

impl RideSession {
    pub fn new(vehicle: Vehicle, primary: RouteSegment) -> Result<Self, CostError> {
        allocator::validate_vehicle(&vehicle)?;
        allocator::validate_segment(&primary)?;

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            vehicle,
            primary,
            passengers: vec![],
            created_at: Timestamp::now(),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn vehicle(&self) -> &Vehicle {
        &self.vehicle
    }

    pub fn primary(&self) -> &RouteSegment {
        &self.primary
    }

    pub fn passengers(&self) -> &[Passenger] {
        &self.passengers
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Prices `segment` against the passengers already on board without adding it.
    pub fn quote(&self, segment: &RouteSegment) -> Result<PassengerQuote, CostError> {
        allocator::quote_passenger(&self.primary, &self.vehicle, &self.passengers, segment)
    }

    /// Prices and appends a passenger. Nothing is appended when pricing fails.
    pub fn add_passenger(
        &mut self,
        name: &str,
        segment: RouteSegment,
    ) -> Result<&Passenger, SessionError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SessionError::EmptyPassengerName);
        }

        let quote = self.quote(&segment)?;
        info!(
            "Session {}: adding {:?} for {:.2} (overlap {:.2}, multiplier {:.2})",
            self.id, name, quote.cost, quote.overlap_discount, quote.cost_multiplier
        );

        self.passengers
            .push(Passenger::new(name.to_string(), segment, quote.cost));

        Ok(&self.passengers[self.passengers.len() - 1])
    }

    pub fn breakdown(&self) -> Result<CostBreakdown, CostError> {
        allocator::allocate(&self.primary, &self.vehicle, &self.passengers, None)
    }

    pub fn to_metrics(&self) -> Result<RideMetrics, CostError> {
        let breakdown = self.breakdown()?;

        Ok(RideMetrics {
            id: self.id.clone(),
            route: self.primary.clone(),
            vehicle: self.vehicle,
            passengers: self.passengers.clone(),
            total_cost: breakdown.total_cost,
            cost_per_passenger: breakdown
                .passengers
                .into_iter()
                .map(|passenger| (passenger.id, passenger.cost))
                .collect(),
            total_distance_km: breakdown.total_distance_km,
            created_at: self.created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{assert_approx, segment};

    fn session() -> RideSession {
        RideSession::new(
            Vehicle::new(15.0, 100.0),
            segment((12.0, 77.0), (13.0, 78.0), 150.0),
        )
        .unwrap()
    }

    #[test]
    fn test_new_rejects_invalid_vehicle() {
        let result = RideSession::new(
            Vehicle::new(0.0, 100.0),
            segment((12.0, 77.0), (13.0, 78.0), 150.0),
        );

        assert!(matches!(result, Err(CostError::InvalidVehicle(_))));
    }

    #[test]
    fn test_add_passenger() {
        let mut session = session();

        let passenger = session
            .add_passenger(" Ravi ", segment((12.2, 77.2), (12.8, 77.8), 50.0))
            .unwrap();

        assert_eq!(passenger.name(), "Ravi");
        assert_approx(passenger.cost(), 260.0);

        let breakdown = session.breakdown().unwrap();
        assert_approx(breakdown.total_cost, 1460.0);
        assert_approx(breakdown.total_distance_km, 200.0);
    }

    #[test]
    fn test_failed_addition_leaves_passengers_unchanged() {
        let mut session = session();

        assert!(matches!(
            session.add_passenger("  ", segment((12.2, 77.2), (12.8, 77.8), 50.0)),
            Err(SessionError::EmptyPassengerName)
        ));
        assert!(matches!(
            session.add_passenger("Ravi", segment((12.2, 77.2), (12.8, 77.8), -5.0)),
            Err(SessionError::Cost(CostError::InvalidSegment(_)))
        ));

        assert!(session.passengers().is_empty());
    }

    #[test]
    fn test_quote_does_not_mutate() {
        let session = session();

        let quote = session
            .quote(&segment((12.2, 77.2), (12.8, 77.8), 50.0))
            .unwrap();

        assert_approx(quote.cost, 260.0);
        assert!(session.passengers().is_empty());
    }

    #[test]
    fn test_to_metrics() {
        let mut session = session();
        let id = session
            .add_passenger("Ravi", segment((12.2, 77.2), (12.8, 77.8), 50.0))
            .unwrap()
            .id()
            .to_string();

        let metrics = session.to_metrics().unwrap();

        assert_eq!(metrics.id, session.id());
        assert_eq!(metrics.passengers.len(), 1);
        assert_approx(metrics.total_cost, 1460.0);
        assert_approx(metrics.total_distance_km, 200.0);
        assert_approx(metrics.cost_per_passenger[&id], 260.0);
        assert!(metrics.validate().is_ok());
    }
}
