mod test_utils;

use jiff::Timestamp;
use rideshare_costs::{
    error::{Endpoint, SegmentError},
    resolution::{Resolution, resolve_fuel_price},
};
use rideshare_providers::{
    error::{FuelPriceError, GeocodeError, RouteError},
    fuel_price::{FuelPriceFeed, FuelPriceQuote},
};
use test_utils::{
    BENGALURU, FakeGeocoder, FakeRoute, FakeRouter, MYSURU, location, resolver, router,
};

struct FixedFeed(Option<f64>);

impl FuelPriceFeed for FixedFeed {
    async fn current_price(&self) -> Result<FuelPriceQuote, FuelPriceError> {
        match self.0 {
            Some(price) => Ok(FuelPriceQuote {
                price,
                currency: String::from("INR"),
                unit: String::from("litre"),
                timestamp: Timestamp::now(),
            }),
            None => Err(FuelPriceError::Unavailable(String::from(
                "connection refused",
            ))),
        }
    }
}

#[tokio::test]
async fn test_resolve_segment() {
    let resolver = resolver(FakeGeocoder::new(), router());

    let segment = resolver
        .resolve_segment(" Bengaluru ", "Mysuru")
        .await
        .unwrap();

    assert_eq!(segment.start().lat(), BENGALURU.0);
    assert_eq!(segment.start().lng(), BENGALURU.1);
    assert_eq!(segment.end().address(), "Mysuru, Karnataka, India");
    assert_eq!(segment.distance_km(), 150.0);
    assert!(!segment.was_estimated());
}

#[tokio::test]
async fn test_unavailable_distance_is_estimated() {
    let resolver = resolver(FakeGeocoder::new(), FakeRouter::new(FakeRoute::Unavailable));

    let distance = resolver
        .resolve_distance(&location("a", BENGALURU), &location("b", MYSURU))
        .await
        .unwrap();

    assert!(distance.is_estimated());
    assert_eq!(*distance.value(), 10.0);
    assert!(matches!(
        distance,
        Resolution::Estimated { ref cause, .. } if cause.contains("timed out")
    ));

    let segment = resolver.resolve_segment("Bengaluru", "Mysuru").await.unwrap();
    assert_eq!(segment.distance_km(), 10.0);
    assert!(segment.was_estimated());
}

#[tokio::test]
async fn test_no_route_is_not_estimated() {
    let resolver = resolver(FakeGeocoder::new(), FakeRouter::new(FakeRoute::NoRoute));

    let result = resolver
        .resolve_distance(&location("a", BENGALURU), &location("b", MYSURU))
        .await;

    assert!(matches!(result, Err(RouteError::NoRouteFound(_))));
}

#[tokio::test]
async fn test_geocode_failure_skips_routing() {
    let resolver = resolver(FakeGeocoder::new(), router());

    let result = resolver.resolve_segment("Bengaluru", "").await;

    assert!(matches!(
        result,
        Err(SegmentError::Geocode {
            endpoint: Endpoint::End,
            source: GeocodeError::EmptyAddress,
        })
    ));
    assert_eq!(resolver.router().calls(), 0);
}

#[tokio::test]
async fn test_both_endpoints_are_geocoded_concurrently() {
    let resolver = resolver(
        FakeGeocoder::new().with_delay(std::time::Duration::from_millis(300)),
        router(),
    );

    let started = std::time::Instant::now();
    resolver.resolve_segment("Bengaluru", "Mysuru").await.unwrap();

    assert_eq!(resolver.geocoder().calls(), 2);
    assert!(started.elapsed() < std::time::Duration::from_millis(550));
}

#[tokio::test]
async fn test_fuel_price_fallback() {
    let price = resolve_fuel_price(&FixedFeed(Some(102.5)), 100.0).await;
    assert_eq!(price, Resolution::Resolved(102.5));

    let price = resolve_fuel_price(&FixedFeed(None), 100.0).await;
    assert!(price.is_estimated());
    assert_eq!(price.into_value(), 100.0);
}
