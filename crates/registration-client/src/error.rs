//! Registration client errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Classified server failure with HTTP status and optional server
    /// error code.
    #[error("{message}")]
    Api {
        status: u16,
        error_code: Option<String>,
        message: String,
    },

    /// The request was cancelled by the client-side timeout.
    #[error("Request timeout - please try again")]
    Timeout,

    /// Transport-level failure (connection refused, DNS, TLS).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ApiError {
    /// HTTP status, when the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Server-provided error code, when present.
    pub fn error_code(&self) -> Option<&str> {
        match self {
            ApiError::Api { error_code, .. } => error_code.as_deref(),
            _ => None,
        }
    }
}
