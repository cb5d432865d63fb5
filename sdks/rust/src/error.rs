//! Error types for the `secretdesk` SDK.

/// All errors that can occur when using the `secretdesk` SDK.
#[derive(Debug, thiserror::Error)]
pub enum SecretDeskError {
    /// Invalid client configuration.
    #[error("secretdesk config error: {0}")]
    Config(String),

    /// The server rejected the credentials (401).
    #[error("secretdesk auth error: {0}")]
    Auth(String),

    /// API returned a non-success status.
    #[error("secretdesk API error {status_code}: {message}")]
    Api {
        /// HTTP status code.
        status_code: u16,
        /// Error message from the API.
        message: String,
    },

    /// Request timed out.
    #[error("secretdesk request timed out")]
    Timeout,

    /// Network or HTTP client error.
    #[error("secretdesk network error: {0}")]
    Network(#[from] reqwest::Error),

    /// JSON serialization/deserialization error.
    #[error("secretdesk json error: {0}")]
    Json(#[from] serde_json::Error),
}
