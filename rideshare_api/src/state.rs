use std::sync::Arc;

use rideshare_costs::{
    error::StoreError, resolution::SegmentResolver, session_manager::SessionManager,
    store::RideStore,
};
use rideshare_providers::{
    config::{FallbackConfig, ProvidersConfig},
    fuel_price::HttpFuelPriceFeed,
    geocoding::NominatimClient,
    provider_clients::ProviderClients,
    routing::OpenRouteServiceClient,
};

use crate::error::ApiError;

pub struct AppState {
    pub sessions: SessionManager<NominatimClient, OpenRouteServiceClient>,
    pub fuel_price: HttpFuelPriceFeed,
    pub store: Arc<dyn RideStore>,
    pub fallback: FallbackConfig,
}

impl AppState {
    pub fn from_config(
        config: &ProvidersConfig,
        store: Arc<dyn RideStore>,
    ) -> Result<Self, reqwest::Error> {
        let clients = ProviderClients::from_config(config)?;

        Ok(Self {
            sessions: SessionManager::new(SegmentResolver::new(
                clients.geocoder,
                clients.router,
                config.fallback.default_distance_km,
            )),
            fuel_price: clients.fuel_price,
            store,
            fallback: config.fallback.clone(),
        })
    }

    /// Runs `operation` against the ride store on the blocking pool.
    pub async fn with_store<T, F>(&self, operation: F) -> Result<T, ApiError>
    where
        F: FnOnce(&dyn RideStore) -> Result<T, StoreError> + Send + 'static,
        T: Send + 'static,
    {
        let store = self.store.clone();
        let result = tokio::task::spawn_blocking(move || operation(store.as_ref()))
            .await
            .map_err(|err| ApiError::InternalServerError(err.to_string()))?;

        Ok(result?)
    }
}
