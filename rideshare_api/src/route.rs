use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use rideshare_costs::{error::SessionError, model::RouteSegment};
use serde::Deserialize;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct RouteQuery {
    start: String,
    end: String,
}

/// Resolves a segment without opening a session.
pub async fn route_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RouteQuery>,
) -> Result<Json<RouteSegment>, ApiError> {
    let segment = state
        .sessions
        .resolver()
        .resolve_segment(&query.start, &query.end)
        .await
        .map_err(SessionError::from)?;

    Ok(Json(segment))
}
