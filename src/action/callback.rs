//! Action built from named closures.
//!
//! [`CallbackAction`] holds a table of entry points and the name of the one
//! currently designated. It is the general-purpose way to plug behavior into
//! a [`Service`](crate::Service) without writing a dedicated type.
//!
//! # Example
//!
//! ```
//! use service_graph::action::{Action, CallbackAction};
//!
//! let mut action = CallbackAction::new()
//!     .handle_typed("upper", |(s,): (String,)| Ok(s.to_uppercase()))
//!     .handle_typed("lower", |(s,): (String,)| Ok(s.to_lowercase()));
//!
//! // The first entry point added is designated until told otherwise.
//! assert_eq!(action.callback_name(), "upper");
//!
//! action.set_callback_name("lower");
//! assert_eq!(action.callback_name(), "lower");
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::{Action, ActionError, TypedCallback};
use crate::codec::Args;

/// Shared positional callback.
pub type Callback = Arc<dyn Fn(Args) -> Result<Value, ActionError> + Send + Sync>;

/// Action whose entry points are closures registered by name.
#[derive(Clone, Default)]
pub struct CallbackAction {
    /// Designated entry point.
    callback_name: String,
    /// Entry points by name.
    callbacks: HashMap<String, Callback>,
}

impl CallbackAction {
    /// Create an action with no entry points.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry point taking the raw positional argument list.
    ///
    /// The first entry point added becomes the designated one unless a
    /// callback name was already set.
    pub fn handle<F>(mut self, name: &str, callback: F) -> Self
    where
        F: Fn(Args) -> Result<Value, ActionError> + Send + Sync + 'static,
    {
        if self.callback_name.is_empty() {
            self.callback_name = name.to_string();
        }
        self.callbacks.insert(name.to_string(), Arc::new(callback));
        self
    }

    /// Add an entry point with typed arguments and result.
    pub fn handle_typed<F, A, R>(self, name: &str, callback: F) -> Self
    where
        F: Fn(A) -> Result<R, ActionError> + Send + Sync + 'static,
        A: DeserializeOwned + 'static,
        R: Serialize + 'static,
    {
        let typed = TypedCallback::new(callback);
        self.handle(name, move |args| typed.call(args))
    }

    /// Designate the entry point, consuming and returning the action.
    pub fn with_callback_name(mut self, name: &str) -> Self {
        self.callback_name = name.to_string();
        self
    }

    /// Names of all entry points, in no particular order.
    pub fn callback_names(&self) -> impl Iterator<Item = &str> {
        self.callbacks.keys().map(|s| s.as_str())
    }
}

impl Action for CallbackAction {
    fn callback_name(&self) -> &str {
        &self.callback_name
    }

    fn set_callback_name(&mut self, name: &str) -> &mut Self {
        self.callback_name = name.to_string();
        self
    }

    fn has_callback(&self, name: &str) -> bool {
        self.callbacks.contains_key(name)
    }

    fn invoke(&self, callback: &str, args: Args) -> Result<Value, ActionError> {
        let entry = self
            .callbacks
            .get(callback)
            .ok_or_else(|| ActionError::msg(format!("no callback named \"{}\"", callback)))?;
        entry(args)
    }
}

impl fmt::Debug for CallbackAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackAction")
            .field("callback_name", &self.callback_name)
            .field("callbacks", &self.callbacks.keys().collect::<Vec<_>>())
            .finish()
    }
}
