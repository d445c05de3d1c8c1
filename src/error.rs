//! Error types and handling.

use reqwest::StatusCode;
use thiserror::Error;

/// Application-wide error type
#[derive(Error, Debug)]
pub enum AppError {
    /// HTTP transport failed or the body could not be decoded
    #[error("HTTP error: {0}")]
    Http(reqwest::Error),

    /// Request deadline elapsed before the server answered
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// Server answered with a non-success status
    #[error("Server returned {0}")]
    Status(StatusCode),

    /// Server refused the login (success flag false)
    #[error("{0}")]
    LoginRejected(String),

    /// Missing or malformed user input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),

    /// JSON (de)serialization of local state failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for AppError
pub type Result<T> = std::result::Result<T, AppError>;

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            let target = err
                .url()
                .map(|url| url.to_string())
                .unwrap_or_else(|| "request".to_string());
            return Self::Timeout(target);
        }
        if let Some(status) = err.status() {
            return Self::Status(status);
        }
        Self::Http(err)
    }
}

impl AppError {
    /// Create a config error with message
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a validation error with message
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}
