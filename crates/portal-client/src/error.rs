//! Client error types.

use thiserror::Error;

/// Errors from talking to the Portal API.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The response body did not match the expected shape.
    #[error("parse error: {0}")]
    Parse(String),

    /// 429 Too Many Requests.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    /// No `backend.base_url` configured.
    #[error("backend base URL is not configured")]
    NotConfigured,
}
