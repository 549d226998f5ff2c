use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    /// km per litre, must be positive
    pub average_mileage: f64,
    /// currency units per litre
    pub fuel_price: f64,
}

impl Vehicle {
    pub fn new(average_mileage: f64, fuel_price: f64) -> Self {
        Self {
            average_mileage,
            fuel_price,
        }
    }
}
