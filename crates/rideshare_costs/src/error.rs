use std::fmt;

use rideshare_providers::error::{GeocodeError, RouteError};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("Invalid coordinate: lat {lat}, lng {lng}")]
pub struct InvalidCoordinate {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CostError {
    #[error("Invalid vehicle: {0}")]
    InvalidVehicle(String),

    #[error("Invalid segment: {0}")]
    InvalidSegment(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    End,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Start => write!(f, "start"),
            Endpoint::End => write!(f, "end"),
        }
    }
}

#[derive(Debug, Error)]
pub enum SegmentError {
    #[error("Could not resolve {endpoint} address: {source}")]
    Geocode {
        endpoint: Endpoint,
        #[source]
        source: GeocodeError,
    },

    #[error(transparent)]
    Route(#[from] RouteError),

    #[error(transparent)]
    Location(#[from] InvalidCoordinate),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Invalid ride id: {0:?}")]
    InvalidId(String),
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Segment(#[from] SegmentError),

    #[error(transparent)]
    Cost(#[from] CostError),

    #[error("Passenger name is empty")]
    EmptyPassengerName,

    #[error("Session not found: {0}")]
    SessionNotFound(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl SessionError {
    /// Short message meant to be shown as is to the person filling the form.
    pub fn user_message(&self) -> String {
        match self {
            SessionError::Segment(SegmentError::Geocode { endpoint, source }) => match source {
                GeocodeError::EmptyAddress => format!("Please enter the {} address.", endpoint),
                GeocodeError::NotFound { address } => format!(
                    "Could not find the {} address \"{}\". Check the spelling or try a nearby landmark.",
                    endpoint, address
                ),
                GeocodeError::Rejected(_) => format!(
                    "The location service could not look up the {} address. Try writing it differently.",
                    endpoint
                ),
                GeocodeError::Unavailable(_) => String::from(
                    "The location service is not responding. Please try again in a moment.",
                ),
            },
            SessionError::Segment(SegmentError::Route(RouteError::NoRouteFound(_))) => {
                String::from("No drivable route was found between these addresses.")
            }
            SessionError::Segment(SegmentError::Route(RouteError::Unavailable(_))) => {
                String::from("The routing service is not responding. Please try again in a moment.")
            }
            SessionError::Segment(SegmentError::Location(_)) => {
                String::from("The location service returned an invalid position for this address.")
            }
            SessionError::Cost(CostError::InvalidVehicle(_)) => {
                String::from("The vehicle mileage must be greater than zero and the fuel price cannot be negative.")
            }
            SessionError::Cost(CostError::InvalidSegment(_)) => {
                String::from("The route distance is invalid. Please enter the addresses again.")
            }
            SessionError::EmptyPassengerName => String::from("Please enter the passenger's name."),
            SessionError::SessionNotFound(_) => {
                String::from("This ride no longer exists. Please start a new calculation.")
            }
            SessionError::Store(_) => String::from("The ride could not be saved. Please try again."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_names_the_endpoint_and_address() {
        let err = SessionError::from(SegmentError::Geocode {
            endpoint: Endpoint::End,
            source: GeocodeError::NotFound {
                address: String::from("Atlantis"),
            },
        });

        let message = err.user_message();
        assert!(message.contains("end address"));
        assert!(message.contains("Atlantis"));
    }

    #[test]
    fn test_user_message_does_not_leak_provider_details() {
        let err = SessionError::from(SegmentError::Route(RouteError::NoRouteFound(String::from(
            "404 - {\"error\":{\"code\":2010}}",
        ))));

        assert!(!err.user_message().contains("2010"));
    }

    #[test]
    fn test_rejected_lookup_is_not_reported_as_transient() {
        let err = SessionError::from(SegmentError::Geocode {
            endpoint: Endpoint::Start,
            source: GeocodeError::Rejected(String::from("400 - Bad request")),
        });

        let message = err.user_message();
        assert!(message.contains("start address"));
        assert!(!message.contains("try again"));
        assert!(!message.contains("400"));
    }
}
