use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::segment::RouteSegment;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Passenger {
    id: String,
    name: String,
    segment: RouteSegment,
    cost: f64,
}

impl Passenger {
    /// Only the cost allocator prices passengers, the cost is never taken from user input.
    pub(crate) fn new(name: String, segment: RouteSegment, cost: f64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            segment,
            cost,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn segment(&self) -> &RouteSegment {
        &self.segment
    }

    pub fn cost(&self) -> f64 {
        self.cost
    }
}
