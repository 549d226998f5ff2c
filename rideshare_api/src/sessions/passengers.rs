use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use rideshare_costs::{allocator::PassengerQuote, session_manager::PassengerAdded};
use serde::Deserialize;

use crate::{error::ApiError, state::AppState};

#[derive(Deserialize)]
pub struct PostPassengerBody {
    name: String,
    pickup: String,
    drop: String,
}

#[derive(Deserialize)]
pub struct QuoteBody {
    pickup: String,
    drop: String,
}

pub async fn post_handler(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
    Json(body): Json<PostPassengerBody>,
) -> Result<(StatusCode, Json<PassengerAdded>), ApiError> {
    let added = state
        .sessions
        .add_passenger(&session_id, &body.name, &body.pickup, &body.drop)
        .await?;

    Ok((StatusCode::CREATED, Json(added)))
}

pub async fn quote_handler(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
    Json(body): Json<QuoteBody>,
) -> Result<Json<PassengerQuote>, ApiError> {
    let quote = state
        .sessions
        .quote_passenger(&session_id, &body.pickup, &body.drop)
        .await?;

    Ok(Json(quote))
}
