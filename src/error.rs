//! Error types for the unnotion library.

use std::io;
use thiserror::Error;

/// Result type alias for unnotion operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during an export run.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when writing output files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// HTTP transport failure (connection, TLS, timeout).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The remote API answered with a non-success status.
    #[error("API error {status}: {message}")]
    Api {
        /// HTTP status code returned by the API.
        status: u16,
        /// Error message from the response body, or the raw body.
        message: String,
    },

    /// Error decoding an API response body.
    #[error("JSON decoding error: {0}")]
    Json(#[from] serde_json::Error),

    /// The export configuration is incomplete or inconsistent.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
