use std::future::Future;

use jiff::Timestamp;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{
    config::{FuelPriceConfig, HttpConfig},
    error::FuelPriceError,
    http::{build_client, read_json},
    retry::RetryPolicy,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FuelPriceQuote {
    pub price: f64,
    pub currency: String,
    pub unit: String,
    pub timestamp: Timestamp,
}

pub trait FuelPriceFeed: Send + Sync {
    fn current_price(&self) -> impl Future<Output = Result<FuelPriceQuote, FuelPriceError>> + Send;
}

pub struct HttpFuelPriceFeed {
    config: FuelPriceConfig,
    retry: RetryPolicy,
    client: reqwest::Client,
}

impl HttpFuelPriceFeed {
    pub fn new(
        config: FuelPriceConfig,
        http: &HttpConfig,
        user_agent: &str,
    ) -> Result<Self, reqwest::Error> {
        Ok(Self {
            config,
            retry: http.retry_policy(),
            client: build_client(http, user_agent)?,
        })
    }
}

impl FuelPriceFeed for HttpFuelPriceFeed {
    #[instrument(skip(self))]
    async fn current_price(&self) -> Result<FuelPriceQuote, FuelPriceError> {
        let quote: FuelPriceQuote = self
            .retry
            .run("fuel price", || async move {
                let response = self.client.get(&self.config.url).send().await?;
                read_json(response).await
            })
            .await
            .map_err(|err| FuelPriceError::Unavailable(err.to_string()))?;

        if !quote.price.is_finite() || quote.price < 0.0 {
            return Err(FuelPriceError::InvalidPrice(quote.price));
        }

        Ok(quote)
    }
}

/// Mock quote for India: around 100 INR per litre, give or take one.
pub fn mock_fuel_price_quote() -> FuelPriceQuote {
    let mut rng = rand::rng();

    FuelPriceQuote {
        price: 100.0 + rng.random_range(-1.0..=1.0),
        currency: String::from("INR"),
        unit: String::from("litre"),
        timestamp: Timestamp::now(),
    }
}
