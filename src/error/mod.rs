//! Error types for ingot.

use thiserror::Error;

/// Primary error type for all ingot operations.
#[derive(Error, Debug)]
pub enum IngotError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Rate limited: retry after {retry_after_ms:?}ms")]
    RateLimited { retry_after_ms: Option<u64> },

    #[error("Stream error: {0}")]
    Stream(String),
}

impl IngotError {
    /// Create an API error from a status code and response body.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }
}

/// Map a non-success HTTP status to the matching error variant.
pub fn status_to_error(status: u16, body: &str) -> IngotError {
    match status {
        401 | 403 => IngotError::Authentication(body.to_string()),
        429 => IngotError::RateLimited {
            retry_after_ms: extract_retry_after(body),
        },
        _ => IngotError::api(status, body),
    }
}

fn extract_retry_after(body: &str) -> Option<u64> {
    // Try to parse retry-after from a JSON error body
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("error")
                .and_then(|e| e.get("retry_after"))
                .and_then(|r| r.as_f64())
                .map(|s| (s * 1000.0) as u64)
        })
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, IngotError>;
