//! Error types for snapshot fetching.

use thiserror::Error;

/// Why a fetch produced no snapshot.
///
/// Every variant is cycle-local: the scheduler logs it and leaves the
/// display as it was.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The endpoint could not be reached.
    #[error("Connection failed: {0}")]
    Connection(String),

    /// The request failed after the connection was made.
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// The body was not a decodable metrics snapshot.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Reading a local snapshot file failed.
    #[error("Read error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() {
            FetchError::Connection(err.to_string())
        } else if err.is_decode() {
            FetchError::Parse(err.to_string())
        } else {
            FetchError::Http(err.to_string())
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Parse(err.to_string())
    }
}
