use std::future::Future;

use serde_json::Value;
use tracing::{debug, instrument};

use crate::{
    config::{HttpConfig, RoutingConfig},
    error::{RouteError, TransportError},
    http::{build_client, read_json},
    retry::RetryPolicy,
};

const METERS_PER_KILOMETER: f64 = 1000.0;

pub trait RouteDistanceProvider: Send + Sync {
    /// Road network distance in kilometres between two points (x = longitude, y = latitude).
    fn distance_km(
        &self,
        origin: geo_types::Point,
        destination: geo_types::Point,
    ) -> impl Future<Output = Result<f64, RouteError>> + Send;
}

/// https://openrouteservice.org/dev/#/api-docs/v2/directions/{profile}/get
pub struct OpenRouteServiceClient {
    config: RoutingConfig,
    retry: RetryPolicy,
    client: reqwest::Client,
}

impl OpenRouteServiceClient {
    pub fn new(
        config: RoutingConfig,
        http: &HttpConfig,
        user_agent: &str,
    ) -> Result<Self, reqwest::Error> {
        Ok(Self {
            config,
            retry: http.retry_policy(),
            client: build_client(http, user_agent)?,
        })
    }

    async fn directions(
        &self,
        origin: geo_types::Point,
        destination: geo_types::Point,
    ) -> Result<Value, TransportError> {
        let url = format!(
            "{}/v2/directions/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.profile
        );

        let start = format!("{},{}", origin.x(), origin.y());
        let end = format!("{},{}", destination.x(), destination.y());

        let mut request = self
            .client
            .get(url)
            .query(&[("start", start.as_str()), ("end", end.as_str())]);

        if let Some(api_key) = &self.config.api_key {
            request = request.query(&[("api_key", api_key.as_str())]);
        }

        let response = request.send().await?;
        read_json(response).await
    }
}

impl RouteDistanceProvider for OpenRouteServiceClient {
    #[instrument(skip(self))]
    async fn distance_km(
        &self,
        origin: geo_types::Point,
        destination: geo_types::Point,
    ) -> Result<f64, RouteError> {
        let body = self
            .retry
            .run("directions", || self.directions(origin, destination))
            .await
            .map_err(classify_transport_error)?;

        let distance_km = parse_route_distance_km(&body)?;
        debug!("Route distance {} km", distance_km);

        Ok(distance_km)
    }
}

/// The provider answered but refused the request (or answered garbage): there is no usable
/// route. Everything else means it could not be reached.
fn classify_transport_error(err: TransportError) -> RouteError {
    match err {
        TransportError::Api { status, message } if !(status == 429 || status >= 500) => {
            RouteError::NoRouteFound(format!("{} - {}", status, message))
        }
        TransportError::Deserialize(err) => RouteError::NoRouteFound(err.to_string()),
        other => RouteError::Unavailable(other.to_string()),
    }
}

/// Extracts `features[0].properties.summary.distance` (meters) as kilometres.
pub fn parse_route_distance_km(body: &Value) -> Result<f64, RouteError> {
    let features = body
        .get("features")
        .and_then(Value::as_array)
        .ok_or_else(|| RouteError::NoRouteFound(String::from("response has no features")))?;

    let feature = features
        .first()
        .ok_or_else(|| RouteError::NoRouteFound(String::from("response has no route feature")))?;

    let distance = feature
        .pointer("/properties/summary/distance")
        .and_then(Value::as_f64)
        .ok_or_else(|| {
            RouteError::NoRouteFound(String::from("route feature has no numeric distance"))
        })?;

    if !distance.is_finite() || distance < 0.0 {
        return Err(RouteError::NoRouteFound(format!(
            "route feature has an invalid distance: {}",
            distance
        )));
    }

    Ok(distance / METERS_PER_KILOMETER)
}
