mod get;
mod post;

use std::sync::Arc;

use axum::{Router, routing::get};

use crate::state::AppState;

pub fn ride_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(get::get_handler).post(post::post_handler))
}
