use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
};
use rideshare_costs::error::SessionError;

use crate::{error::ApiError, sessions::SessionResponse, state::AppState};

pub async fn get_handler(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Result<Json<SessionResponse>, ApiError> {
    let session = state.sessions.get(&session_id).await?;
    let breakdown = session.breakdown().map_err(SessionError::from)?;

    Ok(Json(SessionResponse { session, breakdown }))
}
