use std::{fs::File, io::BufReader, path::PathBuf};

use anyhow::Context;
use clap::Args;
use rideshare_costs::{
    error::SessionError,
    model::Vehicle,
    resolution::{SegmentResolver, resolve_fuel_price},
    session::RideSession,
    store::RideStore,
};
use rideshare_providers::{config::ProvidersConfig, provider_clients::ProviderClients};
use serde::Deserialize;
use tracing::{info, warn};

use crate::{store::open_store, table::breakdown_table};

#[derive(Args)]
pub struct QuoteArgs {
    /// JSON file describing the vehicle, the route and the passengers
    #[arg(short = 'i', long)]
    input: PathBuf,

    /// Store the ride once priced
    #[arg(long)]
    save: bool,

    /// Folder holding the rides (default: $RIDESHARE_STORE_FOLDER or ./rides)
    #[arg(long)]
    store: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
pub struct QuoteVehicle {
    pub average_mileage: f64,
    pub fuel_price: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct QuotePassenger {
    pub name: String,
    pub pickup: String,
    pub drop: String,
}

#[derive(Debug, Deserialize)]
pub struct QuoteInput {
    pub vehicle: QuoteVehicle,
    pub start: String,
    pub end: String,
    #[serde(default)]
    pub passengers: Vec<QuotePassenger>,
}

fn read_input(path: &PathBuf) -> anyhow::Result<QuoteInput> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let reader = BufReader::new(file);
    Ok(serde_json::from_reader(reader)?)
}

fn user_error(err: impl Into<SessionError>) -> anyhow::Error {
    let err = err.into();
    let message = err.user_message();
    anyhow::Error::new(err).context(message)
}

pub async fn run(args: QuoteArgs) -> anyhow::Result<()> {
    let input = read_input(&args.input)?;

    let config = ProvidersConfig::from_env()?;
    let clients = ProviderClients::from_config(&config)?;
    let resolver = SegmentResolver::new(
        clients.geocoder,
        clients.router,
        config.fallback.default_distance_km,
    );

    let fuel_price = match input.vehicle.fuel_price {
        Some(price) => price,
        None => resolve_fuel_price(&clients.fuel_price, config.fallback.default_fuel_price)
            .await
            .into_value(),
    };
    let vehicle = Vehicle::new(input.vehicle.average_mileage, fuel_price);

    let primary = resolver
        .resolve_segment(&input.start, &input.end)
        .await
        .map_err(user_error)?;
    let mut session = RideSession::new(vehicle, primary).map_err(user_error)?;

    // one at a time, each passenger is priced against the ones before
    for passenger in &input.passengers {
        let segment = match resolver
            .resolve_segment(&passenger.pickup, &passenger.drop)
            .await
        {
            Ok(segment) => segment,
            Err(err) => {
                warn!(
                    "Skipping {}: {}",
                    passenger.name,
                    SessionError::from(err).user_message()
                );
                continue;
            }
        };

        if let Err(err) = session.add_passenger(&passenger.name, segment) {
            warn!("Skipping {}: {}", passenger.name, err.user_message());
        }
    }

    let breakdown = session.breakdown().map_err(user_error)?;
    println!("{}", breakdown_table(&session, &breakdown));

    if args.save {
        let store = open_store(args.store)?;
        store.save(&session.to_metrics().map_err(user_error)?)?;
        info!(
            "Saved ride {} to {}",
            session.id(),
            store.folder().display()
        );
    }

    Ok(())
}
