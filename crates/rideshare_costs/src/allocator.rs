use serde::{Deserialize, Serialize};

use crate::{
    error::CostError,
    model::{Passenger, RouteSegment, Vehicle},
    overlap::overlap,
};

/// Maintenance surcharge, as a share of the fuel cost.
pub const MAINTENANCE_RATE: f64 = 0.20;
/// Discount per unit of overlap with an existing route.
pub const OVERLAP_DISCOUNT_RATE: f64 = 0.3;
/// Discount per passenger on board, the new one included.
pub const PER_PASSENGER_DISCOUNT_RATE: f64 = 0.05;
/// Passengers are never paid to ride.
pub const MIN_COST_MULTIPLIER: f64 = 0.0;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SegmentCost {
    pub fuel_cost: f64,
    pub maintenance_cost: f64,
    pub base_cost: f64,
}

/// Price of a passenger segment against the current state of a ride.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PassengerQuote {
    pub distance_km: f64,
    pub overlap_discount: f64,
    pub cost_multiplier: f64,
    pub segment_cost: SegmentCost,
    pub cost: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassengerCost {
    pub id: String,
    pub name: String,
    pub distance_km: f64,
    pub cost: f64,
    pub was_estimated: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub primary_distance_km: f64,
    pub primary: SegmentCost,
    pub passengers: Vec<PassengerCost>,
    pub total_distance_km: f64,
    pub total_cost: f64,
    pub total_fuel_litres: f64,
    /// Set when a segment was priced without being added.
    pub pending: Option<PassengerQuote>,
}

pub fn validate_vehicle(vehicle: &Vehicle) -> Result<(), CostError> {
    if !vehicle.average_mileage.is_finite() || vehicle.average_mileage <= 0.0 {
        return Err(CostError::InvalidVehicle(format!(
            "average mileage must be a positive number, got {}",
            vehicle.average_mileage
        )));
    }

    if !vehicle.fuel_price.is_finite() || vehicle.fuel_price < 0.0 {
        return Err(CostError::InvalidVehicle(format!(
            "fuel price cannot be negative, got {}",
            vehicle.fuel_price
        )));
    }

    Ok(())
}

pub fn validate_segment(segment: &RouteSegment) -> Result<(), CostError> {
    validate_distance(segment.distance_km())
}

fn validate_distance(distance_km: f64) -> Result<(), CostError> {
    if !distance_km.is_finite() || distance_km < 0.0 {
        return Err(CostError::InvalidSegment(format!(
            "distance must be a non negative number, got {}",
            distance_km
        )));
    }

    Ok(())
}

/// Fuel plus maintenance for driving `distance_km` with `vehicle`.
pub fn segment_cost(distance_km: f64, vehicle: &Vehicle) -> Result<SegmentCost, CostError> {
    validate_vehicle(vehicle)?;
    validate_distance(distance_km)?;

    let fuel_cost = distance_km / vehicle.average_mileage * vehicle.fuel_price;
    let maintenance_cost = fuel_cost * MAINTENANCE_RATE;

    Ok(SegmentCost {
        fuel_cost,
        maintenance_cost,
        base_cost: fuel_cost + maintenance_cost,
    })
}

/// Best overlap of `segment` against the primary route or any passenger already on board.
pub fn overlap_discount(
    segment: &RouteSegment,
    primary: &RouteSegment,
    passengers: &[Passenger],
) -> f64 {
    passengers
        .iter()
        .map(|passenger| overlap(segment, passenger.segment()))
        .fold(overlap(segment, primary), f64::max)
}

/// `passenger_count` includes the passenger being priced.
pub fn cost_multiplier(overlap_discount: f64, passenger_count: usize) -> f64 {
    let multiplier = 1.0
        - overlap_discount * OVERLAP_DISCOUNT_RATE
        - passenger_count as f64 * PER_PASSENGER_DISCOUNT_RATE;

    multiplier.max(MIN_COST_MULTIPLIER)
}

pub fn quote_passenger(
    primary: &RouteSegment,
    vehicle: &Vehicle,
    passengers: &[Passenger],
    segment: &RouteSegment,
) -> Result<PassengerQuote, CostError> {
    validate_segment(primary)?;
    let segment_cost = segment_cost(segment.distance_km(), vehicle)?;

    let overlap_discount = overlap_discount(segment, primary, passengers);
    let cost_multiplier = cost_multiplier(overlap_discount, passengers.len() + 1);

    Ok(PassengerQuote {
        distance_km: segment.distance_km(),
        overlap_discount,
        cost_multiplier,
        segment_cost,
        cost: segment_cost.base_cost * cost_multiplier,
    })
}

/// Folds the primary route and the passengers already priced into totals. The pending
/// segment, if any, is quoted against the current passengers and kept out of the totals.
pub fn allocate(
    primary: &RouteSegment,
    vehicle: &Vehicle,
    passengers: &[Passenger],
    pending: Option<&RouteSegment>,
) -> Result<CostBreakdown, CostError> {
    let primary_cost = segment_cost(primary.distance_km(), vehicle)?;

    let mut total_distance_km = primary.distance_km();
    let mut total_cost = primary_cost.base_cost;
    let mut passenger_costs = Vec::with_capacity(passengers.len());

    for passenger in passengers {
        validate_segment(passenger.segment())?;

        total_distance_km += passenger.segment().distance_km();
        total_cost += passenger.cost();

        passenger_costs.push(PassengerCost {
            id: passenger.id().to_string(),
            name: passenger.name().to_string(),
            distance_km: passenger.segment().distance_km(),
            cost: passenger.cost(),
            was_estimated: passenger.segment().was_estimated(),
        });
    }

    let pending = pending
        .map(|segment| quote_passenger(primary, vehicle, passengers, segment))
        .transpose()?;

    Ok(CostBreakdown {
        primary_distance_km: primary.distance_km(),
        primary: primary_cost,
        passengers: passenger_costs,
        total_distance_km,
        total_cost,
        total_fuel_litres: total_distance_km / vehicle.average_mileage,
        pending,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{assert_approx, segment};

    const VEHICLE: Vehicle = Vehicle {
        average_mileage: 15.0,
        fuel_price: 100.0,
    };

    #[test]
    fn test_segment_cost() {
        let cost = segment_cost(150.0, &VEHICLE).unwrap();

        assert_approx(cost.fuel_cost, 1000.0);
        assert_approx(cost.maintenance_cost, 200.0);
        assert_approx(cost.base_cost, 1200.0);
    }

    #[test]
    fn test_zero_distance_costs_nothing() {
        let cost = segment_cost(0.0, &VEHICLE).unwrap();
        assert_eq!(cost, SegmentCost::default());
    }

    #[test]
    fn test_invalid_vehicle() {
        for vehicle in [
            Vehicle::new(0.0, 100.0),
            Vehicle::new(-3.0, 100.0),
            Vehicle::new(f64::NAN, 100.0),
            Vehicle::new(15.0, -1.0),
        ] {
            assert!(matches!(
                segment_cost(10.0, &vehicle),
                Err(CostError::InvalidVehicle(_))
            ));
        }
    }

    #[test]
    fn test_invalid_segment() {
        for distance_km in [-0.1, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                segment_cost(distance_km, &VEHICLE),
                Err(CostError::InvalidSegment(_))
            ));
        }
    }

    #[test]
    fn test_cost_multiplier() {
        assert_approx(cost_multiplier(1.0, 1), 0.65);
        assert_approx(cost_multiplier(0.0, 1), 0.95);
        assert_approx(cost_multiplier(0.5, 2), 0.75);
    }

    #[test]
    fn test_cost_multiplier_is_clamped_at_zero() {
        // 1 - 0.3 - 14 * 0.05 = 0
        assert_approx(cost_multiplier(1.0, 14), 0.0);
        assert_eq!(cost_multiplier(1.0, 15), MIN_COST_MULTIPLIER);
        assert_eq!(cost_multiplier(1.0, 100), MIN_COST_MULTIPLIER);
    }

    #[test]
    fn test_allocate_without_passengers() {
        let primary = segment((12.0, 77.0), (13.0, 78.0), 150.0);

        let breakdown = allocate(&primary, &VEHICLE, &[], None).unwrap();

        assert_approx(breakdown.primary.base_cost, 1200.0);
        assert_approx(breakdown.total_cost, 1200.0);
        assert_approx(breakdown.total_distance_km, 150.0);
        assert_approx(breakdown.total_fuel_litres, 10.0);
        assert!(breakdown.passengers.is_empty());
        assert!(breakdown.pending.is_none());
    }

    #[test]
    fn test_pending_quote_uses_best_overlap() {
        let primary = segment((12.0, 77.0), (13.0, 78.0), 150.0);
        let inside = segment((12.2, 77.2), (12.8, 77.8), 50.0);

        let breakdown = allocate(&primary, &VEHICLE, &[], Some(&inside)).unwrap();
        let quote = breakdown.pending.unwrap();

        assert_approx(quote.overlap_discount, 1.0);
        assert_approx(quote.cost_multiplier, 0.65);
        assert_approx(quote.segment_cost.base_cost, 400.0);
        assert_approx(quote.cost, 260.0);

        // the pending passenger is not part of the totals
        assert_approx(breakdown.total_cost, 1200.0);
    }

    #[test]
    fn test_overlap_discount_considers_passengers() {
        let primary = segment((0.0, 0.0), (1.0, 1.0), 100.0);
        let far = segment((10.0, 10.0), (11.0, 11.0), 100.0);
        let on_board = Passenger::new(String::from("Asha"), far.clone(), 0.0);

        assert_eq!(overlap_discount(&far, &primary, &[]), 0.0);
        assert_eq!(overlap_discount(&far, &primary, &[on_board]), 1.0);
    }
}
