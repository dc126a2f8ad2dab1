//! Error types for GraphQL transports.

use thiserror::Error;

/// Errors raised before a GraphQL response body could be obtained.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The HTTP request could not be sent or its body could not be read.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    /// Variables or the response body could not be (de)serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The backend behind an in-process transport has shut down.
    #[error("Backend unavailable: {0}")]
    Unavailable(String),

    /// A scripted transport received a request it had no expectation for.
    #[error("Unexpected request: {0}")]
    Unexpected(String),
}
