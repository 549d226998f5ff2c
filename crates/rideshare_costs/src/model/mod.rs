pub mod coordinate;
pub mod location;
pub mod passenger;
pub mod segment;
pub mod vehicle;

pub use coordinate::Coordinate;
pub use location::Location;
pub use passenger::Passenger;
pub use segment::RouteSegment;
pub use vehicle::Vehicle;
