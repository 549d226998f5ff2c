use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rideshare_costs::{error::SessionError, model::Vehicle, resolution::resolve_fuel_price};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{error::ApiError, sessions::SessionResponse, state::AppState};

#[derive(Deserialize)]
pub struct VehicleBody {
    average_mileage: f64,
    /// Taken from the fuel price feed when absent.
    fuel_price: Option<f64>,
}

#[derive(Deserialize)]
pub struct PostSessionBody {
    vehicle: VehicleBody,
    start: String,
    end: String,
}

#[derive(Serialize)]
pub struct PostSessionResponse {
    #[serde(flatten)]
    session: SessionResponse,
    fuel_price_estimated: bool,
}

impl IntoResponse for PostSessionResponse {
    fn into_response(self) -> Response {
        (StatusCode::CREATED, Json(self)).into_response()
    }
}

pub async fn post_handler(
    State(state): State<Arc<AppState>>,
    Json(body): Json<PostSessionBody>,
) -> Result<PostSessionResponse, ApiError> {
    let (fuel_price, fuel_price_estimated) = match body.vehicle.fuel_price {
        Some(price) => (price, false),
        None => {
            let resolution =
                resolve_fuel_price(&state.fuel_price, state.fallback.default_fuel_price).await;
            (*resolution.value(), resolution.is_estimated())
        }
    };

    let vehicle = Vehicle::new(body.vehicle.average_mileage, fuel_price);
    let session = state
        .sessions
        .open_session(vehicle, &body.start, &body.end)
        .await?;
    info!("Session {} opened at {} per litre", session.id(), fuel_price);

    let breakdown = session.breakdown().map_err(SessionError::from)?;

    Ok(PostSessionResponse {
        session: SessionResponse { session, breakdown },
        fuel_price_estimated,
    })
}
