pub mod config;
pub mod error;
pub mod fuel_price;
pub mod geocoding;
mod http;
pub mod provider_clients;
pub mod retry;
pub mod routing;
