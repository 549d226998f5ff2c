use crate::{
    config::ProvidersConfig, fuel_price::HttpFuelPriceFeed, geocoding::NominatimClient,
    routing::OpenRouteServiceClient,
};

/// The HTTP backed providers, built from a single configuration.
pub struct ProviderClients {
    pub geocoder: NominatimClient,
    pub router: OpenRouteServiceClient,
    pub fuel_price: HttpFuelPriceFeed,
}

impl ProviderClients {
    pub fn from_config(config: &ProvidersConfig) -> Result<Self, reqwest::Error> {
        let user_agent = config.geocoder.user_agent.as_str();

        Ok(Self {
            geocoder: NominatimClient::new(config.geocoder.clone(), &config.http)?,
            router: OpenRouteServiceClient::new(config.routing.clone(), &config.http, user_agent)?,
            fuel_price: HttpFuelPriceFeed::new(
                config.fuel_price.clone(),
                &config.http,
                user_agent,
            )?,
        })
    }
}
