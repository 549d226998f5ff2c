use serde::de::DeserializeOwned;

use crate::{config::HttpConfig, error::TransportError};

pub(crate) fn build_client(
    http: &HttpConfig,
    user_agent: &str,
) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .timeout(http.timeout)
        .user_agent(user_agent)
        .build()
}

/// Reads a successful response as JSON, or turns an error status into `TransportError::Api`.
pub(crate) async fn read_json<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, TransportError> {
    if response.status().is_success() {
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    } else {
        let status = response.status().as_u16();
        let message = response.text().await.unwrap_or_default();
        Err(TransportError::Api { status, message })
    }
}
