//! Error types for the Pangea client

use thiserror::Error;

/// Result type alias for Pangea client operations
pub type Result<T> = std::result::Result<T, PangeaError>;

/// Errors surfaced by the Pangea client
#[derive(Debug, Error)]
pub enum PangeaError {
    /// Client configuration is unusable
    #[error("Configuration error: {0}")]
    Config(String),

    /// Service URL could not be built
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Transport failure (connect, TLS, timeout, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Pangea answered with a non-success envelope
    #[error("Pangea API error: {status}: {summary} (request_id: {request_id:?})")]
    Api {
        status: String,
        summary: String,
        request_id: Option<String>,
    },

    /// Pangea queued the request for asynchronous processing (HTTP 202)
    #[error("Request accepted for async processing (request_id: {request_id:?})")]
    Accepted { request_id: Option<String> },

    /// Body was not a Pangea response envelope
    #[error("Unexpected response (HTTP {status}): {body}")]
    UnexpectedResponse { status: u16, body: String },

    /// Payload could not be encoded or the result could not be decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PangeaError {
    /// Whether the error came from the remote service rather than the transport
    pub fn is_api_error(&self) -> bool {
        matches!(self, PangeaError::Api { .. })
    }
}
