use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use rideshare_costs::metrics::RideMetrics;

use crate::{error::ApiError, state::AppState};

pub async fn save_handler(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Result<(StatusCode, Json<RideMetrics>), ApiError> {
    let metrics = state
        .sessions
        .save(&session_id, state.store.clone())
        .await?;

    Ok((StatusCode::CREATED, Json(metrics)))
}
