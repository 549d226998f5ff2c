mod error;
mod fuel_prices;
mod geocode;
mod pagination;
mod rides;
mod route;
mod routes;
mod sessions;
mod state;


use std::{sync::Arc, time::Duration};

use anyhow::Context;
use axum::serve;
use jiff::SignedDuration;
use rideshare_costs::store::{InMemoryRideStore, JsonFolderRideStore, RideStore};
use rideshare_providers::config::ProvidersConfig;
use tracing::{Level, info};

use crate::routes::app;
use crate::state::AppState;

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

const API_ADDR_ENV_VAR: &str = "RIDESHARE_API_ADDR";
const STORE_FOLDER_ENV_VAR: &str = "RIDESHARE_STORE_FOLDER";
const SESSION_TTL_ENV_VAR: &str = "RIDESHARE_SESSION_TTL_MINUTES";
const DEFAULT_API_ADDR: &str = "127.0.0.1:5000";
const DEFAULT_SESSION_TTL_MINUTES: i64 = 24 * 60;
const SESSION_SWEEP_INTERVAL: Duration = Duration::from_secs(5 * 60);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::from_filename("./.env.local").ok();
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let config = ProvidersConfig::from_env()?;

    let store: Arc<dyn RideStore> = match std::env::var(STORE_FOLDER_ENV_VAR) {
        Ok(folder) => {
            info!("Storing rides in {}", folder);
            Arc::new(JsonFolderRideStore::new(folder)?)
        }
        Err(_) => {
            info!("{} is not set, rides are kept in memory", STORE_FOLDER_ENV_VAR);
            Arc::new(InMemoryRideStore::new())
        }
    };

    let state = Arc::new(AppState::from_config(&config, store)?);
    spawn_session_sweeper(state.clone(), session_ttl()?);

    let address =
        std::env::var(API_ADDR_ENV_VAR).unwrap_or_else(|_| DEFAULT_API_ADDR.to_string());
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;

    info!("Listening on {}", address);
    serve(listener, app(state)).await?;

    Ok(())
}

fn session_ttl() -> anyhow::Result<SignedDuration> {
    let minutes = match std::env::var(SESSION_TTL_ENV_VAR) {
        Ok(value) => value
            .trim()
            .parse::<i64>()
            .with_context(|| format!("Invalid {}: {:?}", SESSION_TTL_ENV_VAR, value))?,
        Err(_) => DEFAULT_SESSION_TTL_MINUTES,
    };

    Ok(SignedDuration::from_mins(minutes))
}

/// Closes sessions that were opened but never saved or discarded.
fn spawn_session_sweeper(state: Arc<AppState>, ttl: SignedDuration) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(SESSION_SWEEP_INTERVAL);
        loop {
            interval.tick().await;
            let closed = state.sessions.sweep_expired(ttl).await;
            if closed > 0 {
                info!("Closed {} expired sessions", closed);
            }
        }
    });
}
