//! Action-level errors.

use std::error::Error as StdError;

use thiserror::Error;

type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Error raised by an action's own callback.
///
/// Wraps whatever the callback failed with. A service hands it back to the
/// caller unchanged: its `Display` and `source` are those of the wrapped
/// error, and the wrapped error can be recovered with [`downcast_ref`](Self::downcast_ref)
/// or [`into_inner`](Self::into_inner).
#[derive(Debug, Error)]
#[error(transparent)]
pub struct ActionError(BoxError);

impl ActionError {
    /// Wrap an arbitrary error.
    pub fn new<E>(error: E) -> Self
    where
        E: Into<BoxError>,
    {
        Self(error.into())
    }

    /// Create an error from a plain message.
    pub fn msg(message: impl Into<String>) -> Self {
        Self::new(message.into())
    }

    /// Borrow the wrapped error as a concrete type.
    pub fn downcast_ref<E: StdError + 'static>(&self) -> Option<&E> {
        self.0.downcast_ref::<E>()
    }

    /// Whether the wrapped error is of type E.
    pub fn is<E: StdError + 'static>(&self) -> bool {
        self.0.is::<E>()
    }

    /// Take the wrapped error.
    pub fn into_inner(self) -> BoxError {
        self.0
    }
}

impl From<String> for ActionError {
    fn from(message: String) -> Self {
        Self::msg(message)
    }
}

impl From<&str> for ActionError {
    fn from(message: &str) -> Self {
        Self::msg(message)
    }
}

impl From<serde_json::Error> for ActionError {
    fn from(error: serde_json::Error) -> Self {
        Self::new(error)
    }
}
