//! Dispatch error types.

use thiserror::Error;

/// Errors that can occur while dispatching an action.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// The action name does not resolve to a registered action.
    #[error("unknown action: {0}")]
    UnknownAction(String),

    /// The action itself failed.
    #[error("action failed: {0}")]
    ActionFailed(#[from] anyhow::Error),

    /// The dispatcher namespace matches no recognized shape.
    #[error("invalid dispatcher namespace: {0}")]
    InvalidNamespace(String),

    /// The view engine failed to render.
    #[error("render failed: {0}")]
    Render(String),

    /// Failed to serialize a value result.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
