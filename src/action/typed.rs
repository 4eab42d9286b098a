//! Typed callback wrapper.

use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::ActionError;
use crate::codec::{Args, ArgsCodec};

/// Wrapper that decodes positional arguments before calling a typed closure
/// and encodes its result afterwards.
pub struct TypedCallback<F, A, R>
where
    F: Fn(A) -> Result<R, ActionError> + Send + Sync + 'static,
    A: DeserializeOwned + 'static,
    R: Serialize + 'static,
{
    callback: F,
    _phantom: PhantomData<fn(A) -> R>,
}

impl<F, A, R> TypedCallback<F, A, R>
where
    F: Fn(A) -> Result<R, ActionError> + Send + Sync + 'static,
    A: DeserializeOwned + 'static,
    R: Serialize + 'static,
{
    /// Create a new typed callback.
    pub fn new(callback: F) -> Self {
        Self {
            callback,
            _phantom: PhantomData,
        }
    }

    /// Decode `args`, run the closure, and encode what it returns.
    ///
    /// Argument and result conversion failures are reported as
    /// [`ActionError`]s, the same as failures of the closure itself.
    pub fn call(&self, args: Args) -> Result<Value, ActionError> {
        let parsed: A = ArgsCodec::decode(args).map_err(ActionError::new)?;
        let output = (self.callback)(parsed)?;
        ArgsCodec::encode_value(&output).map_err(ActionError::new)
    }
}
