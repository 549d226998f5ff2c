use rideshare_providers::{
    error::RouteError, fuel_price::FuelPriceFeed, geocoding::Geocoder,
    routing::RouteDistanceProvider,
};
use tracing::{debug, instrument, warn};

use crate::{
    error::{Endpoint, SegmentError},
    model::{Location, RouteSegment},
};

/// Outcome of a lookup that has a safe default. Hard failures are the `Err` side of
/// the surrounding `Result`.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution<T> {
    Resolved(T),
    Estimated { value: T, cause: String },
}

impl<T> Resolution<T> {
    pub fn value(&self) -> &T {
        match self {
            Resolution::Resolved(value) => value,
            Resolution::Estimated { value, .. } => value,
        }
    }

    pub fn into_value(self) -> T {
        match self {
            Resolution::Resolved(value) => value,
            Resolution::Estimated { value, .. } => value,
        }
    }

    pub fn is_estimated(&self) -> bool {
        matches!(self, Resolution::Estimated { .. })
    }
}

/// Turns addresses into priced-ready segments using a geocoder and a routing provider.
pub struct SegmentResolver<G, R> {
    geocoder: G,
    router: R,
    default_distance_km: f64,
}

impl<G, R> SegmentResolver<G, R>
where
    G: Geocoder,
    R: RouteDistanceProvider,
{
    pub fn new(geocoder: G, router: R, default_distance_km: f64) -> Self {
        Self {
            geocoder,
            router,
            default_distance_km,
        }
    }

    pub fn geocoder(&self) -> &G {
        &self.geocoder
    }

    pub fn router(&self) -> &R {
        &self.router
    }

    pub fn default_distance_km(&self) -> f64 {
        self.default_distance_km
    }

    pub async fn resolve_location(
        &self,
        endpoint: Endpoint,
        address: &str,
    ) -> Result<Location, SegmentError> {
        let place = self
            .geocoder
            .geocode(address)
            .await
            .map_err(|source| SegmentError::Geocode { endpoint, source })?;

        Ok(Location::try_from(place)?)
    }

    /// Road distance between two locations. An unreachable provider yields the default
    /// distance, a provider that answers without a route is an error.
    pub async fn resolve_distance(
        &self,
        origin: &Location,
        destination: &Location,
    ) -> Result<Resolution<f64>, RouteError> {
        match self
            .router
            .distance_km(origin.into(), destination.into())
            .await
        {
            Ok(distance_km) => Ok(Resolution::Resolved(distance_km)),
            Err(RouteError::Unavailable(cause)) => {
                warn!(
                    "Routing unavailable, using the default distance of {} km: {}",
                    self.default_distance_km, cause
                );
                Ok(Resolution::Estimated {
                    value: self.default_distance_km,
                    cause,
                })
            }
            Err(err) => Err(err),
        }
    }

    #[instrument(skip(self))]
    pub async fn resolve_segment(
        &self,
        start: &str,
        end: &str,
    ) -> Result<RouteSegment, SegmentError> {
        let (start, end) = tokio::try_join!(
            self.resolve_location(Endpoint::Start, start),
            self.resolve_location(Endpoint::End, end),
        )?;

        let segment = match self.resolve_distance(&start, &end).await? {
            Resolution::Resolved(distance_km) => RouteSegment::new(start, end, distance_km),
            Resolution::Estimated { value, .. } => RouteSegment::estimated(start, end, value),
        };

        debug!(
            "Resolved segment {:?} -> {:?}: {} km (estimated: {})",
            segment.start().address(),
            segment.end().address(),
            segment.distance_km(),
            segment.was_estimated()
        );

        Ok(segment)
    }
}

/// Current fuel price, or `default_price` when the feed cannot be used.
pub async fn resolve_fuel_price<F: FuelPriceFeed>(feed: &F, default_price: f64) -> Resolution<f64> {
    match feed.current_price().await {
        Ok(quote) => Resolution::Resolved(quote.price),
        Err(err) => {
            warn!(
                "Fuel price unavailable, using the default of {}: {}",
                default_price, err
            );
            Resolution::Estimated {
                value: default_price,
                cause: err.to_string(),
            }
        }
    }
}
