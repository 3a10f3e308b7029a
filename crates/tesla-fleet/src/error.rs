//! Error types for vehicle-command backend calls

use thiserror::Error;

/// Result type alias for backend client operations
pub type Result<T> = std::result::Result<T, FleetClientError>;

/// Errors that can occur while talking to the vehicle-command backend
#[derive(Error, Debug)]
pub enum FleetClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// IO error (reading the token file)
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// No usable access token
    #[error("Missing credentials: {0}")]
    MissingCredentials(String),

    /// Server returned an error response
    #[error("Server error {status}: {message}")]
    ServerError { status: u16, message: String },

    /// Failed to parse response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Timeout (request or vehicle wake-up)
    #[error("Request timed out")]
    Timeout,
}

impl FleetClientError {
    /// Create a server error from status code and message
    pub fn server_error(status: u16, message: impl Into<String>) -> Self {
        Self::ServerError {
            status,
            message: message.into(),
        }
    }
}
