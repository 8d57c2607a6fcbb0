//! Error taxonomy shared by the API layer, the genre pipeline and the CLI.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Authorization failed: {0}")]
    Auth(String),

    #[error("Playlist not found or not accessible: {0}")]
    NotFound(String),

    /// Transient, only seen between the client and the genre resolver.
    #[error("Rate limited by Spotify (retry after {retry_after:?}s)")]
    RateLimited { retry_after: Option<u64> },

    #[error("Spotify API error {status} after {attempts} attempts: {message}")]
    RetryExhausted {
        attempts: u32,
        status: u16,
        message: String,
    },

    #[error("Spotify API error {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse response: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Upstream HTTP status carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::RateLimited { .. } => Some(429),
            Error::RetryExhausted { status, .. } | Error::Upstream { status, .. } => Some(*status),
            Error::Http(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
