use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use rideshare_costs::model::{Coordinate, Location};
use rideshare_providers::geocoding::{DEFAULT_SUGGEST_LIMIT, Geocoder};
use serde::Deserialize;
use tracing::warn;

use crate::{error::ApiError, state::AppState};

pub fn geocode_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/suggest", get(suggest_handler))
        .route("/reverse", get(reverse_handler))
}

#[derive(Deserialize)]
pub struct SuggestQuery {
    q: String,
    limit: Option<usize>,
}

/// Address autocomplete.
pub async fn suggest_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SuggestQuery>,
) -> Result<Json<Vec<Location>>, ApiError> {
    let places = state
        .sessions
        .resolver()
        .geocoder()
        .suggest(&query.q, query.limit.unwrap_or(DEFAULT_SUGGEST_LIMIT))
        .await?;

    Ok(Json(
        places
            .into_iter()
            .filter_map(|place| Location::try_from(place).ok())
            .collect(),
    ))
}

#[derive(Deserialize)]
pub struct ReverseQuery {
    lat: f64,
    lng: f64,
}

/// The address at a position, for "use my current location".
pub async fn reverse_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ReverseQuery>,
) -> Result<Json<Location>, ApiError> {
    let coordinate = Coordinate::new(query.lat, query.lng)
        .map_err(|err| ApiError::BadRequest(err.to_string()))?;

    let place = state
        .sessions
        .resolver()
        .geocoder()
        .reverse(coordinate.into())
        .await?;

    let location = Location::try_from(place).map_err(|err| {
        warn!("Reverse geocoding returned an invalid position: {}", err);
        ApiError::InternalServerError(String::from(
            "The location service returned an invalid position.",
        ))
    })?;

    Ok(Json(location))
}
