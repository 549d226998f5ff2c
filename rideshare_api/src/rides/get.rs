use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State},
};
use rideshare_costs::metrics::RideMetrics;

use crate::{
    error::ApiError,
    pagination::{PaginatedResponse, Pagination},
    state::AppState,
};

/// Stored rides, most recent first.
pub async fn get_handler(
    State(state): State<Arc<AppState>>,
    Query(pagination): Query<Pagination>,
) -> Result<Json<PaginatedResponse<RideMetrics>>, ApiError> {
    let rides = state.with_store(|store| store.list()).await?;
    Ok(Json(pagination.paginate(rides)))
}
