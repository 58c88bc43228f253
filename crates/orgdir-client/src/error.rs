//! Client error types.

/// Errors that can occur when using the directory client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API key was missing or rejected.
    #[error("forbidden: {message}")]
    Forbidden {
        /// Server message.
        message: String,
    },

    /// No organization matched the query.
    #[error("not found: {message}")]
    NotFound {
        /// Server message.
        message: String,
    },

    /// Server returned any other error response.
    #[error("API error: {code} - {message}")]
    Api {
        /// Error code.
        code: String,
        /// Error message.
        message: String,
        /// HTTP status code.
        status: u16,
    },

    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Configuration(String),
}
