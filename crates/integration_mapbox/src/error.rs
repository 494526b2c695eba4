//! Mapbox error types

use thiserror::Error;

/// Errors that can occur during Mapbox operations
#[derive(Debug, Error)]
pub enum MapboxError {
    /// Connection to the Mapbox API failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// HTTP request returned a non-success status
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Failed to parse the response
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded, retry after {retry_after_secs:?} seconds")]
    RateLimitExceeded {
        /// Seconds to wait before retrying (if provided by API)
        retry_after_secs: Option<u64>,
    },

    /// Access token missing, invalid or lacking the required scope
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Address could not be resolved to coordinates
    #[error("Address not found: {0}")]
    AddressNotFound(String),

    /// No driving route between the two coordinates
    #[error("No route found from {from} to {to}")]
    NoRoute {
        /// Origin description
        from: String,
        /// Destination description
        to: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Request timeout
    #[error("Request timed out after {timeout_secs} seconds")]
    Timeout {
        /// The timeout duration in seconds
        timeout_secs: u64,
    },
}

impl MapboxError {
    /// Returns true if this error is retryable
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailed(_)
                | Self::RequestFailed(_)
                | Self::Timeout { .. }
                | Self::RateLimitExceeded { .. }
        )
    }

    /// Returns true if the provider answered but found nothing
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::AddressNotFound(_) | Self::NoRoute { .. })
    }
}
