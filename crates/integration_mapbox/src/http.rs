//! Shared HTTP plumbing for the Mapbox clients

use std::time::Duration;

use reqwest::{Client, Response, StatusCode};
use reqwest::Url;

use crate::config::MapboxConfig;
use crate::error::MapboxError;

/// Build the HTTP client used by both Mapbox clients
pub(crate) fn build_client(config: &MapboxConfig) -> Result<Client, MapboxError> {
    Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .user_agent(concat!("taxifare/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| MapboxError::ConnectionFailed(e.to_string()))
}

/// Fail unless an access token is configured
pub(crate) fn require_token(config: &MapboxConfig) -> Result<(), MapboxError> {
    if config.access_token_str().is_none_or(str::is_empty) {
        return Err(MapboxError::ConfigurationError(
            "access_token must be set".to_string(),
        ));
    }
    Ok(())
}

/// Join path segments onto the base URL, percent-encoding each one
pub(crate) fn endpoint(base_url: &str, segments: &[&str]) -> Result<Url, MapboxError> {
    let mut url = Url::parse(base_url)
        .map_err(|e| MapboxError::ConfigurationError(format!("invalid base_url: {e}")))?;
    url.path_segments_mut()
        .map_err(|()| MapboxError::ConfigurationError("base_url cannot be a base".to_string()))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Map a transport error
pub(crate) fn send_error(e: &reqwest::Error, timeout_secs: u64) -> MapboxError {
    if e.is_timeout() {
        MapboxError::Timeout { timeout_secs }
    } else {
        MapboxError::ConnectionFailed(e.to_string())
    }
}

/// Check the status and read the body
pub(crate) async fn read_body(response: Response) -> Result<String, MapboxError> {
    let status = response.status();
    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(MapboxError::RateLimitExceeded {
            retry_after_secs: response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok()),
        });
    }

    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(MapboxError::Unauthorized(format!("HTTP {status}")));
    }

    if !status.is_success() {
        return Err(MapboxError::RequestFailed(format!("HTTP {status}")));
    }

    response
        .text()
        .await
        .map_err(|e| MapboxError::ParseError(e.to_string()))
}
