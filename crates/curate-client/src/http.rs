//! Shared reqwest plumbing for the service clients

use crate::error::{ClientError, Result};
use crate::types::EndpointConfig;
use reqwest::{header, Client, StatusCode};
use std::time::Duration;

/// Build a reqwest client carrying the endpoint's bearer key and timeout
pub(crate) fn build_client(config: &EndpointConfig) -> Result<Client> {
    let mut headers = header::HeaderMap::new();
    if let Some(ref api_key) = config.api_key {
        let value = header::HeaderValue::from_str(&format!("Bearer {}", api_key))
            .map_err(|e| ClientError::Config(format!("invalid API key: {}", e)))?;
        headers.insert(header::AUTHORIZATION, value);
    }

    Client::builder()
        .default_headers(headers)
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()
        .map_err(|e| ClientError::Config(format!("failed to build HTTP client: {}", e)))
}

/// Join a base URL and a path without doubling slashes
pub(crate) fn join(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Map non-success statuses to errors and decode the body
pub(crate) async fn handle_response<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T> {
    let response = check_status(response).await?;
    let body = response.json().await?;
    Ok(body)
}

/// Map non-success statuses to errors, leaving the body unread
pub(crate) async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
    if response.status() == StatusCode::NOT_FOUND {
        let url = response.url().path().to_string();
        return Err(ClientError::NotFound(url));
    }

    if !response.status().is_success() {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        return Err(ClientError::Server {
            status,
            message: body,
        });
    }

    Ok(response)
}
