use std::sync::Arc;

use axum::Router;
use axum::http::Method;
use axum::routing::get;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};

use crate::fuel_prices::fuel_prices_handler;
use crate::geocode::geocode_routes;
use crate::rides::ride_routes;
use crate::route::route_handler;
use crate::sessions::session_routes;
use crate::state::AppState;

pub fn app(state: Arc<AppState>) -> Router {
    let cors_layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_origin(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/fuel-prices", get(fuel_prices_handler))
        .route("/api/route", get(route_handler))
        .nest("/api/geocode", geocode_routes())
        .nest("/api/sessions", session_routes())
        .nest("/api/rides", ride_routes())
        .layer(ServiceBuilder::new().layer(cors_layer))
        .with_state(state)
}
