//! Server error types

use numeracy_core::ConfigurationError;
use thiserror::Error;

/// Errors that can occur in the numeracy server
#[derive(Debug, Error)]
pub enum ServerError {
    /// Failed to bind to the specified address
    #[error("failed to bind to {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    /// Rule files could not be loaded
    #[error("invalid task configuration: {0}")]
    Configuration(#[from] ConfigurationError),

    /// WebSocket error
    #[error("websocket error: {0}")]
    WebSocket(String),

    /// Internal server error
    #[error("internal error: {0}")]
    Internal(String),
}
