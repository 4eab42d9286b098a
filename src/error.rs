//! Error types for service-graph.

use thiserror::Error;

use crate::action::ActionError;

/// Discriminant for [`ServiceError`], for callers that branch on the kind
/// of failure rather than its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The registration name cannot serve as a dispatch target.
    InvalidName,
    /// The action's designated callback is not invocable.
    InvalidCallback,
    /// The registration name is already taken.
    DuplicateName,
    /// Dispatch found no action under the requested name.
    ActionNotFound,
    /// The action itself failed.
    Action,
    /// Typed argument or result conversion failed.
    Json,
}

/// Main error type for all service operations.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Registration name is empty or not usable as an operation name.
    #[error("Cannot register an Action without a useful name: \"{name}\"")]
    InvalidName { name: String },

    /// The action does not expose the callback it declares.
    #[error("Cannot register an Action without a valid callback: \"{callback}\" (registering \"{name}\")")]
    InvalidCallback { name: String, callback: String },

    /// An action is already registered under this name.
    #[error("Action \"{name}\" is already registered!")]
    DuplicateName { name: String },

    /// No action is registered under the dispatched name.
    #[error("Action \"{action}\" not found on service \"{service}\"")]
    ActionNotFound { action: String, service: String },

    /// Failure raised by the action's own callback, passed through as-is.
    #[error(transparent)]
    Action(#[from] ActionError),

    /// JSON conversion error for typed arguments or results.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ServiceError {
    /// Get the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ServiceError::InvalidName { .. } => ErrorKind::InvalidName,
            ServiceError::InvalidCallback { .. } => ErrorKind::InvalidCallback,
            ServiceError::DuplicateName { .. } => ErrorKind::DuplicateName,
            ServiceError::ActionNotFound { .. } => ErrorKind::ActionNotFound,
            ServiceError::Action(_) => ErrorKind::Action,
            ServiceError::Json(_) => ErrorKind::Json,
        }
    }

    /// Returns the action error if this failure came from the action itself.
    pub fn as_action_error(&self) -> Option<&ActionError> {
        match self {
            ServiceError::Action(e) => Some(e),
            _ => None,
        }
    }
}

/// Result type alias using ServiceError.
pub type Result<T> = std::result::Result<T, ServiceError>;
