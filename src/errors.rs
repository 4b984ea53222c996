use thiserror::Error;

/// Result type alias for PagerDuty operations
pub type Result<T> = std::result::Result<T, PagerDutyError>;

/// Errors that can occur when submitting events to PagerDuty
#[derive(Debug, Error)]
pub enum PagerDutyError {
    /// Failed to build HTTP client
    #[error("Failed to build HTTP client: {0}")]
    BuildHttpClient(#[source] reqwest::Error),

    /// Failed to encode the event as JSON
    #[error("Failed to serialize event: {0}")]
    Serialize(#[source] serde_json::Error),

    /// The event endpoint URL could not be constructed
    #[error("Invalid event endpoint URL: {0}")]
    InvalidUrl(#[source] url::ParseError),

    /// HTTP request failed before a response was received
    #[error("HTTP request failed: {0}")]
    Request(#[source] reqwest_middleware::Error),

    /// The response body could not be read
    #[error("Failed to read response body: {0}")]
    ReadBody(#[source] reqwest::Error),

    /// The response body is not a valid acknowledgment
    #[error("Failed to deserialize response: {source}")]
    Deserialize {
        #[source]
        source: serde_json::Error,
        /// Raw response body
        body: String,
    },

    /// PagerDuty rejected the event with a non-success status code
    #[error("PagerDuty API error: HTTP {status} - {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Raw response body
        message: String,
    },
}

impl PagerDutyError {
    /// Check if the error is retryable
    ///
    /// Returns `true` for:
    /// - Network/connection errors
    /// - Timeout errors
    /// - Connections dropped while reading the response body
    /// - Server errors (5xx status codes)
    ///
    /// The client itself never retries; this is a hint for callers.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Request(reqwest_middleware::Error::Reqwest(err)) => {
                err.is_connect() || err.is_timeout()
            }
            Self::ReadBody(err) => err.is_timeout() || err.is_body() || err.is_decode(),
            Self::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }
}
