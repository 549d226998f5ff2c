use std::future::Future;

use serde::Deserialize;
use tracing::{debug, instrument};

use crate::{
    config::{GeocoderConfig, HttpConfig},
    error::{GeocodeError, TransportError},
    http::{build_client, read_json},
    retry::RetryPolicy,
};

/// Queries shorter than this are not worth a suggestion lookup.
pub const MIN_SUGGEST_QUERY_CHARS: usize = 3;

pub const DEFAULT_SUGGEST_LIMIT: usize = 5;

const MAX_SUGGEST_LIMIT: usize = 20;

/// Top ranked match of a geocoding query.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodedPlace {
    /// x is the longitude, y the latitude
    pub point: geo_types::Point,
    pub display_name: String,
}

impl GeocodedPlace {
    pub fn lat(&self) -> f64 {
        self.point.y()
    }

    pub fn lng(&self) -> f64 {
        self.point.x()
    }
}

pub trait Geocoder: Send + Sync {
    /// Resolves a free-text address. `NotFound` is a user error and must not be retried,
    /// `Unavailable` is only returned once the transport retries are exhausted.
    fn geocode(
        &self,
        address: &str,
    ) -> impl Future<Output = Result<GeocodedPlace, GeocodeError>> + Send;

    /// Up to `limit` candidates for a partially typed address, best first. Queries shorter
    /// than [`MIN_SUGGEST_QUERY_CHARS`] have no suggestions.
    fn suggest(
        &self,
        query: &str,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<GeocodedPlace>, GeocodeError>> + Send;

    /// The address at a position (x = longitude, y = latitude).
    fn reverse(
        &self,
        point: geo_types::Point,
    ) -> impl Future<Output = Result<GeocodedPlace, GeocodeError>> + Send;
}

#[derive(Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
    display_name: Option<String>,
}

/// `/reverse` answers 200 with an error object when nothing is at the position.
#[derive(Deserialize)]
#[serde(untagged)]
enum NominatimReverse {
    Place(NominatimPlace),
    Error { error: String },
}

pub struct NominatimClient {
    config: GeocoderConfig,
    retry: RetryPolicy,
    client: reqwest::Client,
}

impl NominatimClient {
    pub fn new(config: GeocoderConfig, http: &HttpConfig) -> Result<Self, reqwest::Error> {
        let client = build_client(http, &config.user_agent)?;
        Ok(Self {
            config,
            retry: http.retry_policy(),
            client,
        })
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), endpoint)
    }

    async fn search(&self, query: &str, limit: usize) -> Result<Vec<NominatimPlace>, TransportError> {
        let limit = limit.to_string();

        let mut params = vec![("q", query), ("format", "json"), ("limit", limit.as_str())];
        if let Some(country_codes) = &self.config.country_codes {
            params.push(("countrycodes", country_codes.as_str()));
        }

        let response = self.client.get(self.url("search")).query(&params).send().await?;
        read_json(response).await
    }

    async fn reverse_lookup(
        &self,
        point: geo_types::Point,
    ) -> Result<NominatimReverse, TransportError> {
        let lat = point.y().to_string();
        let lon = point.x().to_string();

        let response = self
            .client
            .get(self.url("reverse"))
            .query(&[("lat", lat.as_str()), ("lon", lon.as_str()), ("format", "json")])
            .send()
            .await?;
        read_json(response).await
    }
}

impl Geocoder for NominatimClient {
    #[instrument(skip(self))]
    async fn geocode(&self, address: &str) -> Result<GeocodedPlace, GeocodeError> {
        let query = address.trim();
        if query.is_empty() {
            return Err(GeocodeError::EmptyAddress);
        }

        let places = self
            .retry
            .run("geocode", || self.search(query, 1))
            .await
            .map_err(classify_transport_error)?;

        let place = places
            .into_iter()
            .next()
            .ok_or_else(|| GeocodeError::NotFound {
                address: query.to_string(),
            })?;

        let place = parse_place(place, query)?;
        debug!(
            "Geocoded {:?} to ({}, {}) {:?}",
            query,
            place.lat(),
            place.lng(),
            place.display_name
        );

        Ok(place)
    }

    #[instrument(skip(self))]
    async fn suggest(&self, query: &str, limit: usize) -> Result<Vec<GeocodedPlace>, GeocodeError> {
        let query = query.trim();
        if query.chars().count() < MIN_SUGGEST_QUERY_CHARS || limit == 0 {
            return Ok(vec![]);
        }

        let places = self
            .retry
            .run("suggest", || self.search(query, limit.min(MAX_SUGGEST_LIMIT)))
            .await
            .map_err(classify_transport_error)?;

        let suggestions: Vec<GeocodedPlace> = places
            .into_iter()
            .filter_map(|place| parse_place(place, query).ok())
            .collect();
        debug!("{} suggestions for {:?}", suggestions.len(), query);

        Ok(suggestions)
    }

    #[instrument(skip(self))]
    async fn reverse(&self, point: geo_types::Point) -> Result<GeocodedPlace, GeocodeError> {
        let label = format!("{}, {}", point.y(), point.x());
        if !(-90.0..=90.0).contains(&point.y()) || !(-180.0..=180.0).contains(&point.x()) {
            return Err(GeocodeError::NotFound { address: label });
        }

        let answer = self
            .retry
            .run("reverse", || self.reverse_lookup(point))
            .await
            .map_err(classify_transport_error)?;

        match answer {
            NominatimReverse::Place(place) => parse_place(place, &label),
            NominatimReverse::Error { error } => {
                debug!("Nothing at {}: {}", label, error);
                Err(GeocodeError::NotFound { address: label })
            }
        }
    }
}

/// A refused request or an unreadable answer will not change on a retry; only what the
/// retry policy gave up on means the provider is unavailable.
fn classify_transport_error(err: TransportError) -> GeocodeError {
    match err {
        TransportError::Api { status, message } if !(status == 429 || status >= 500) => {
            GeocodeError::Rejected(format!("{} - {}", status, message))
        }
        TransportError::Deserialize(err) => GeocodeError::Rejected(err.to_string()),
        other => GeocodeError::Unavailable(other.to_string()),
    }
}

fn parse_place(place: NominatimPlace, query: &str) -> Result<GeocodedPlace, GeocodeError> {
    let not_found = || GeocodeError::NotFound {
        address: query.to_string(),
    };

    let lat: f64 = place.lat.trim().parse().map_err(|_| not_found())?;
    let lng: f64 = place.lon.trim().parse().map_err(|_| not_found())?;

    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
        return Err(not_found());
    }

    Ok(GeocodedPlace {
        point: geo_types::Point::new(lng, lat),
        display_name: place
            .display_name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| query.to_string()),
    })
}
