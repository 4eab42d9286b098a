//! Service module - registry and dispatch.
//!
//! Provides:
//! - [`Service`] - maps registration names to actions and dispatches calls
//! - [`ServiceBuilder`] / [`ServiceConfig`] - configuration
//! - [`NamePolicy`] - which registration names are accepted
//! - [`SharedService`] - lock-guarded handle for use across threads
//! - [`WeakService`] - non-owning handle for actions that call back in
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use service_graph::{CallbackAction, ErrorKind, Service};
//!
//! let mut service = Service::new();
//! service
//!     .register("greet", Arc::new(CallbackAction::new().handle_typed("run", |(who,): (String,)| {
//!         Ok(format!("hello {}", who))
//!     })))
//!     .unwrap();
//!
//! let greeting: String = service.call_with("greet", ("world",)).unwrap();
//! assert_eq!(greeting, "hello world");
//!
//! let err = service.call("cantFindMe", vec![]).unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::ActionNotFound);
//! ```

mod builder;
mod name;
mod registry;
mod shared;

pub use builder::{ServiceBuilder, ServiceConfig};
pub use name::{is_identifier, NamePolicy};
pub use registry::Service;
pub use shared::{SharedService, WeakService};
