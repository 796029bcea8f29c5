//! Error types for the salesdash server.

use std::net::SocketAddr;

/// Server error type.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// The listen address could not be bound.
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    /// IO error while serving.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid listen address.
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// Watch error.
    #[error("File watch error: {0}")]
    Watch(String),
}

/// Result type for server operations.
pub type ServerResult<T> = Result<T, ServerError>;
