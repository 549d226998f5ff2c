#![allow(dead_code)]

use std::{
    sync::{
        Arc,
        atomic::{AtomicU32, Ordering},
    },
    time::Duration,
};

use axum::Router;
use rideshare_providers::config::{
    FuelPriceConfig, GeocoderConfig, HttpConfig, ProvidersConfig, RoutingConfig,
};

/// Serves `router` on an ephemeral local port and returns its base url.
pub async fn spawn_server(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    format!("http://{}", address)
}

pub fn fast_http_config() -> HttpConfig {
    HttpConfig {
        timeout: Duration::from_millis(300),
        max_attempts: 3,
        backoff: Duration::from_millis(10),
    }
}

pub fn geocoder_config(base_url: &str) -> GeocoderConfig {
    GeocoderConfig {
        base_url: base_url.to_string(),
        ..ProvidersConfig::default().geocoder
    }
}

pub fn routing_config(base_url: &str) -> RoutingConfig {
    RoutingConfig {
        base_url: base_url.to_string(),
        api_key: Some(String::from("test-key")),
        profile: String::from("driving-car"),
    }
}

pub fn fuel_price_config(url: &str) -> FuelPriceConfig {
    FuelPriceConfig {
        url: url.to_string(),
    }
}

#[derive(Clone, Default)]
pub struct HitCounter(Arc<AtomicU32>);

impl HitCounter {
    pub fn hit(&self) -> u32 {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn count(&self) -> u32 {
        self.0.load(Ordering::SeqCst)
    }
}
