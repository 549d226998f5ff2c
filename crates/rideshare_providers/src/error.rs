use thiserror::Error;

/// Failure of a single HTTP exchange with a provider, before it is classified
/// into one of the provider-facing errors below.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Deserialization error: {0}")]
    Deserialize(#[from] serde_json::Error),
}

impl TransportError {
    /// Timeouts, connection failures, rate limiting and 5xx responses may succeed on a retry.
    pub fn is_transient(&self) -> bool {
        match self {
            TransportError::Request(err) => {
                err.is_timeout()
                    || err.is_connect()
                    || err.is_request()
                    || err.is_body()
                    || err.status().is_some_and(|status| status.is_server_error())
            }
            TransportError::Api { status, .. } => *status == 429 || *status >= 500,
            TransportError::Deserialize(_) => false,
        }
    }
}

#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("Address is empty")]
    EmptyAddress,

    #[error("No location found for address: {address}")]
    NotFound { address: String },

    #[error("Geocoding provider rejected the request: {0}")]
    Rejected(String),

    #[error("Geocoding provider unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Error)]
pub enum RouteError {
    #[error("Routing provider unavailable: {0}")]
    Unavailable(String),

    #[error("No route found: {0}")]
    NoRouteFound(String),
}

#[derive(Debug, Error)]
pub enum FuelPriceError {
    #[error("Fuel price feed unavailable: {0}")]
    Unavailable(String),

    #[error("Fuel price feed returned an invalid price: {0}")]
    InvalidPrice(f64),
}
