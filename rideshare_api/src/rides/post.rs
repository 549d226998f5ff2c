use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode};
use rideshare_costs::metrics::RideMetrics;
use tracing::info;

use crate::{error::ApiError, state::AppState};

/// Stores a ride that was finalized elsewhere.
pub async fn post_handler(
    State(state): State<Arc<AppState>>,
    Json(ride): Json<RideMetrics>,
) -> Result<(StatusCode, Json<RideMetrics>), ApiError> {
    ride.validate()
        .map_err(|err| ApiError::BadRequest(err.to_string()))?;

    let ride = state
        .with_store(move |store| store.save(&ride).map(|()| ride))
        .await?;
    info!("Stored ride {}", ride.id);

    Ok((StatusCode::CREATED, Json(ride)))
}
