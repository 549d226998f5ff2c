use std::{str::FromStr, time::Duration};

use thiserror::Error;

use crate::retry::RetryPolicy;

pub const DEFAULT_GEOCODER_URL: &str = "https://nominatim.openstreetmap.org";
pub const DEFAULT_ROUTING_URL: &str = "https://api.openrouteservice.org";
pub const DEFAULT_FUEL_PRICE_URL: &str = "http://127.0.0.1:5000/api/fuel-prices";
pub const DEFAULT_USER_AGENT: &str = concat!("rideshare/", env!("CARGO_PKG_VERSION"));

/// Distance used when the routing provider cannot be reached.
pub const DEFAULT_DISTANCE_KM: f64 = 10.0;

/// Price per litre used when the fuel price feed cannot be reached.
pub const DEFAULT_FUEL_PRICE: f64 = 100.0;

const GEOCODER_URL_ENV_VAR: &str = "RIDESHARE_GEOCODER_URL";
const GEOCODER_COUNTRY_CODES_ENV_VAR: &str = "RIDESHARE_GEOCODER_COUNTRY_CODES";
const USER_AGENT_ENV_VAR: &str = "RIDESHARE_USER_AGENT";
const ROUTING_URL_ENV_VAR: &str = "RIDESHARE_ROUTING_URL";
const ROUTING_API_KEY_ENV_VAR: &str = "OPENROUTESERVICE_API_KEY";
const ROUTING_PROFILE_ENV_VAR: &str = "RIDESHARE_ROUTING_PROFILE";
const FUEL_PRICE_URL_ENV_VAR: &str = "RIDESHARE_FUEL_PRICE_URL";
const HTTP_TIMEOUT_ENV_VAR: &str = "RIDESHARE_HTTP_TIMEOUT_MS";
const HTTP_MAX_ATTEMPTS_ENV_VAR: &str = "RIDESHARE_HTTP_MAX_ATTEMPTS";
const HTTP_BACKOFF_ENV_VAR: &str = "RIDESHARE_HTTP_BACKOFF_MS";
const DEFAULT_DISTANCE_ENV_VAR: &str = "RIDESHARE_DEFAULT_DISTANCE_KM";
const DEFAULT_FUEL_PRICE_ENV_VAR: &str = "RIDESHARE_DEFAULT_FUEL_PRICE";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value:?}")]
    InvalidValue { name: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct GeocoderConfig {
    pub base_url: String,
    /// Comma separated ISO 3166-1 alpha-2 codes, e.g. "in"
    pub country_codes: Option<String>,
    /// Nominatim's usage policy requires an identifying user agent
    pub user_agent: String,
}

#[derive(Debug, Clone)]
pub struct RoutingConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub profile: String,
}

#[derive(Debug, Clone)]
pub struct FuelPriceConfig {
    pub url: String,
}

#[derive(Debug, Clone)]
pub struct HttpConfig {
    pub timeout: Duration,
    pub max_attempts: u32,
    pub backoff: Duration,
}

impl HttpConfig {
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_attempts,
            backoff: self.backoff,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FallbackConfig {
    pub default_distance_km: f64,
    pub default_fuel_price: f64,
}

/// Everything the provider clients need, passed explicitly into their constructors.
#[derive(Debug, Clone)]
pub struct ProvidersConfig {
    pub geocoder: GeocoderConfig,
    pub routing: RoutingConfig,
    pub fuel_price: FuelPriceConfig,
    pub http: HttpConfig,
    pub fallback: FallbackConfig,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            geocoder: GeocoderConfig {
                base_url: DEFAULT_GEOCODER_URL.to_string(),
                country_codes: Some(String::from("in")),
                user_agent: DEFAULT_USER_AGENT.to_string(),
            },
            routing: RoutingConfig {
                base_url: DEFAULT_ROUTING_URL.to_string(),
                api_key: None,
                profile: String::from("driving-car"),
            },
            fuel_price: FuelPriceConfig {
                url: DEFAULT_FUEL_PRICE_URL.to_string(),
            },
            http: HttpConfig {
                timeout: Duration::from_secs(10),
                max_attempts: 3,
                backoff: Duration::from_secs(1),
            },
            fallback: FallbackConfig {
                default_distance_km: DEFAULT_DISTANCE_KM,
                default_fuel_price: DEFAULT_FUEL_PRICE,
            },
        }
    }
}

impl ProvidersConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from the defaults, overridden by whatever `lookup` returns.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup(GEOCODER_URL_ENV_VAR) {
            config.geocoder.base_url = url;
        }
        if let Some(codes) = lookup(GEOCODER_COUNTRY_CODES_ENV_VAR) {
            // An empty value disables the country filter
            config.geocoder.country_codes = Some(codes).filter(|codes| !codes.trim().is_empty());
        }
        if let Some(user_agent) = lookup(USER_AGENT_ENV_VAR) {
            config.geocoder.user_agent = user_agent;
        }
        if let Some(url) = lookup(ROUTING_URL_ENV_VAR) {
            config.routing.base_url = url;
        }
        if let Some(api_key) = lookup(ROUTING_API_KEY_ENV_VAR) {
            config.routing.api_key = Some(api_key).filter(|key| !key.is_empty());
        }
        if let Some(profile) = lookup(ROUTING_PROFILE_ENV_VAR) {
            config.routing.profile = profile;
        }
        if let Some(url) = lookup(FUEL_PRICE_URL_ENV_VAR) {
            config.fuel_price.url = url;
        }
        if let Some(value) = lookup(HTTP_TIMEOUT_ENV_VAR) {
            config.http.timeout = Duration::from_millis(parse_var(HTTP_TIMEOUT_ENV_VAR, &value)?);
        }
        if let Some(value) = lookup(HTTP_MAX_ATTEMPTS_ENV_VAR) {
            let max_attempts: u32 = parse_var(HTTP_MAX_ATTEMPTS_ENV_VAR, &value)?;
            if max_attempts == 0 {
                return Err(ConfigError::InvalidValue {
                    name: HTTP_MAX_ATTEMPTS_ENV_VAR,
                    value,
                });
            }
            config.http.max_attempts = max_attempts;
        }
        if let Some(value) = lookup(HTTP_BACKOFF_ENV_VAR) {
            config.http.backoff = Duration::from_millis(parse_var(HTTP_BACKOFF_ENV_VAR, &value)?);
        }
        if let Some(value) = lookup(DEFAULT_DISTANCE_ENV_VAR) {
            config.fallback.default_distance_km =
                parse_non_negative(DEFAULT_DISTANCE_ENV_VAR, &value)?;
        }
        if let Some(value) = lookup(DEFAULT_FUEL_PRICE_ENV_VAR) {
            config.fallback.default_fuel_price =
                parse_non_negative(DEFAULT_FUEL_PRICE_ENV_VAR, &value)?;
        }

        Ok(config)
    }
}

fn parse_var<T: FromStr>(name: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        name,
        value: value.to_string(),
    })
}

fn parse_non_negative(name: &'static str, value: &str) -> Result<f64, ConfigError> {
    let parsed: f64 = parse_var(name, value)?;
    if parsed.is_finite() && parsed >= 0.0 {
        Ok(parsed)
    } else {
        Err(ConfigError::InvalidValue {
            name,
            value: value.to_string(),
        })
    }
}
