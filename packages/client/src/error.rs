//! Error types for the chat client.

use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// The server could not be reached
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The connection failed after it was established
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
