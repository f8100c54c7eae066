//! Provider error types

use thiserror::Error;

/// Errors that can occur when calling the routing engine
#[derive(Debug, Error)]
pub enum TransitError {
    /// Connection to the routing engine failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Routing engine answered with an error status
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Failed to parse response from the routing engine
    #[error("Parse error: {0}")]
    ParseError(String),

    /// GraphQL errors without data
    #[error("Query rejected: {0}")]
    QueryRejected(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded, retry after {retry_after_secs:?} seconds")]
    RateLimitExceeded {
        /// Seconds to wait before retrying (if provided by API)
        retry_after_secs: Option<u64>,
    },

    /// Request timeout
    #[error("Request timed out after {timeout_secs} seconds")]
    Timeout {
        /// The timeout duration in seconds
        timeout_secs: u64,
    },
}

impl TransitError {
    pub(crate) fn from_reqwest(e: &reqwest::Error, timeout_secs: u64) -> Self {
        if e.is_timeout() {
            Self::Timeout { timeout_secs }
        } else {
            Self::ConnectionFailed(e.to_string())
        }
    }
}

/// Errors that can occur during geocoding
#[derive(Debug, Error)]
pub enum GeocodingError {
    /// Connection to geocoding service failed
    #[error("Geocoding connection failed: {0}")]
    ConnectionFailed(String),

    /// Geocoding service answered with an error status
    #[error("Geocoding request failed: {0}")]
    RequestFailed(String),

    /// Failed to parse geocoding response
    #[error("Geocoding parse error: {0}")]
    ParseError(String),

    /// Request timeout
    #[error("Geocoding request timed out")]
    Timeout,
}

impl GeocodingError {
    pub(crate) fn from_reqwest(e: &reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout
        } else {
            Self::ConnectionFailed(e.to_string())
        }
    }

    /// Whether the service could not be reached at all
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::ConnectionFailed(_) | Self::Timeout)
    }
}
