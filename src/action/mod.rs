//! Action module - pluggable capability units.
//!
//! Provides:
//! - [`Action`] - the contract every pluggable unit implements
//! - [`CallbackAction`] - an action built from named closures
//! - [`TypedCallback`] - wraps a typed closure as a positional callback
//! - [`ActionError`] - failure raised by an action's own callback
//!
//! An action exposes one designated entry point, named by its callback
//! name. The name a [`Service`](crate::Service) registers it under is
//! independent, so several actions can share an internal callback name
//! while being exposed under distinct names.
//!
//! # Example
//!
//! ```
//! use service_graph::action::{Action, CallbackAction};
//! use serde_json::json;
//!
//! let action = CallbackAction::new()
//!     .handle_typed("sum", |(a, b): (i64, i64)| Ok(a + b));
//!
//! assert_eq!(action.callback_name(), "sum");
//! let result = action.invoke("sum", vec![json!(1), json!(2)]).unwrap();
//! assert_eq!(result, json!(3));
//! ```

mod callback;
mod error;
mod typed;

use std::sync::Arc;

use serde_json::Value;

use crate::codec::Args;

pub use callback::{Callback, CallbackAction};
pub use error::ActionError;
pub use typed::TypedCallback;

/// Trait for pluggable actions.
pub trait Action: Send + Sync + 'static {
    /// Name of the entry point this action exposes.
    fn callback_name(&self) -> &str;

    /// Set the entry point name. Not validated here; a service checks it
    /// at registration time.
    fn set_callback_name(&mut self, name: &str) -> &mut Self
    where
        Self: Sized;

    /// Whether `name` is an invocable entry point of this action.
    fn has_callback(&self, name: &str) -> bool;

    /// Run the entry point `callback` with a positional argument list.
    fn invoke(&self, callback: &str, args: Args) -> Result<Value, ActionError>;
}

/// Whether two handles refer to the same action instance.
///
/// Compares data addresses only, so the result does not depend on which
/// vtable a trait object was created with.
#[inline]
pub fn same_action(a: &Arc<dyn Action>, b: &Arc<dyn Action>) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}
