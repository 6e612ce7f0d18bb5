//! Railway client error types.

/// Errors from the upstream railway HTTP client.
#[derive(Debug, thiserror::Error)]
pub enum RailwayError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Transport succeeded but the endpoint returned an error status.
    #[error("upstream error {status}: {message}")]
    Api { status: u16, message: String },

    /// The query reached the endpoint but was rejected at application level
    /// (non-200 `httpstatus` in the envelope).
    #[error("query rejected by upstream: {0}")]
    Rejected(String),

    /// JSON deserialization failed.
    #[error("JSON parse error: {message}")]
    Json { message: String },
}
