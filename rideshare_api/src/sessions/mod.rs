mod delete;
mod get;
mod passengers;
mod post;
mod save;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use rideshare_costs::{allocator::CostBreakdown, session::RideSession};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct SessionResponse {
    pub session: RideSession,
    pub breakdown: CostBreakdown,
}

pub fn session_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", post(post::post_handler))
        .route(
            "/{session_id}",
            get(get::get_handler).delete(delete::delete_handler),
        )
        .route("/{session_id}/passengers", post(passengers::post_handler))
        .route("/{session_id}/quote", post(passengers::quote_handler))
        .route("/{session_id}/save", post(save::save_handler))
}
