use rideshare_costs::{error::SessionError, resolution::SegmentResolver};
use rideshare_providers::{config::ProvidersConfig, provider_clients::ProviderClients};

use crate::table::segment_table;

pub async fn run(start: &str, end: &str) -> anyhow::Result<()> {
    let config = ProvidersConfig::from_env()?;
    let clients = ProviderClients::from_config(&config)?;
    let resolver = SegmentResolver::new(
        clients.geocoder,
        clients.router,
        config.fallback.default_distance_km,
    );

    match resolver.resolve_segment(start, end).await {
        Ok(segment) => {
            println!("{}", segment_table(&segment));
            Ok(())
        }
        Err(err) => {
            let err = SessionError::from(err);
            let message = err.user_message();
            Err(anyhow::Error::new(err).context(message))
        }
    }
}
