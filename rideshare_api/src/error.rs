use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use rideshare_costs::error::{SegmentError, SessionError, StoreError};
use rideshare_providers::error::{GeocodeError, RouteError};
use serde::Serialize;
use tracing::error;

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    UnprocessableEntity(String),
    ServiceUnavailable(String),
    InternalServerError(String),
}

#[derive(Serialize)]
struct ErrorBody {
    message: String,
}

impl From<anyhow::Error> for ApiError {
    fn from(error: anyhow::Error) -> Self {
        ApiError::InternalServerError(error.to_string())
    }
}

impl From<StoreError> for ApiError {
    fn from(error: StoreError) -> Self {
        SessionError::Store(error).into()
    }
}

impl From<SessionError> for ApiError {
    fn from(error: SessionError) -> Self {
        let message = error.user_message();

        match &error {
            SessionError::Segment(SegmentError::Geocode { source, .. }) => match source {
                GeocodeError::EmptyAddress | GeocodeError::NotFound { .. } => {
                    ApiError::BadRequest(message)
                }
                GeocodeError::Rejected(_) => ApiError::UnprocessableEntity(message),
                GeocodeError::Unavailable(_) => ApiError::ServiceUnavailable(message),
            },
            SessionError::Segment(SegmentError::Route(RouteError::NoRouteFound(_))) => {
                ApiError::UnprocessableEntity(message)
            }
            SessionError::Segment(SegmentError::Route(RouteError::Unavailable(_))) => {
                ApiError::ServiceUnavailable(message)
            }
            SessionError::Cost(_) | SessionError::EmptyPassengerName => {
                ApiError::BadRequest(message)
            }
            SessionError::SessionNotFound(_) => ApiError::NotFound(message),
            SessionError::Segment(SegmentError::Location(_)) | SessionError::Store(_) => {
                error!("{}", error);
                ApiError::InternalServerError(message)
            }
        }
    }
}

/// Lookups made outside a session, where there is no endpoint to name.
impl From<GeocodeError> for ApiError {
    fn from(error: GeocodeError) -> Self {
        match error {
            GeocodeError::EmptyAddress => {
                ApiError::BadRequest(String::from("Please enter an address."))
            }
            GeocodeError::NotFound { address } => {
                ApiError::NotFound(format!("No location found for \"{}\".", address))
            }
            GeocodeError::Rejected(_) => ApiError::UnprocessableEntity(String::from(
                "The location service could not process this lookup.",
            )),
            GeocodeError::Unavailable(_) => ApiError::ServiceUnavailable(String::from(
                "The location service is not responding. Please try again in a moment.",
            )),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, message),
            ApiError::UnprocessableEntity(message) => (StatusCode::UNPROCESSABLE_ENTITY, message),
            ApiError::ServiceUnavailable(message) => (StatusCode::SERVICE_UNAVAILABLE, message),
            ApiError::InternalServerError(message) => {
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            }
        };

        (status, Json(ErrorBody { message })).into_response()
    }
}
