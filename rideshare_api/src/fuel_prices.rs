use axum::Json;
use rideshare_providers::fuel_price::{FuelPriceQuote, mock_fuel_price_quote};

/// Stand-in for a real fuel price feed.
pub async fn fuel_prices_handler() -> Json<FuelPriceQuote> {
    Json(mock_fuel_price_quote())
}
