//! # service-graph
//!
//! Compose a fixed service facade out of independently developed,
//! swappable actions.
//!
//! A [`Service`] holds named [`Action`]s and dispatches calls to them by
//! name at runtime. Each action exposes one designated entry point (its
//! callback name), which is independent of the name it is registered
//! under.
//!
//! ## Registration
//!
//! [`Service::register`] validates, in order:
//!
//! 1. the registration name against the service's [`NamePolicy`]
//! 2. that the action actually exposes its declared callback
//! 3. that the name is not already taken
//!
//! Each failure has its own [`ErrorKind`], and a failed registration never
//! changes the registry.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use service_graph::{CallbackAction, ErrorKind, Service};
//!
//! let mut service = Service::new();
//! let add = CallbackAction::new().handle_typed("sum", |(a, b): (i64, i64)| Ok(a + b));
//! service.register("addNumbers", Arc::new(add)).unwrap();
//!
//! let total: i64 = service.call_with("addNumbers", (1, 2)).unwrap();
//! assert_eq!(total, 3);
//!
//! let err = service.call("cantFindMe", vec![]).unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::ActionNotFound);
//! ```

pub mod action;
pub mod codec;
pub mod error;
pub mod service;

pub use action::{Action, ActionError, CallbackAction};
pub use codec::Args;
pub use error::{ErrorKind, Result, ServiceError};
pub use service::{NamePolicy, Service, ServiceBuilder, ServiceConfig, SharedService, WeakService};
