//! Session error types.

use thiserror::Error;

/// Errors that can occur while persisting or collecting sessions.
#[derive(Error, Debug)]
pub enum SessionError {
    /// Failed to perform a store operation.
    #[error("store operation failed: {0}")]
    Store(String),

    /// Failed to serialize session data.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
