use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
};

use crate::{error::ApiError, state::AppState};

pub async fn delete_handler(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.sessions.discard(&session_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
