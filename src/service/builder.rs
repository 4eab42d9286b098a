//! Service configuration and builder.
//!
//! The [`ServiceBuilder`] provides a fluent API for configuring a service
//! and queueing registrations, which are validated when the service is
//! built.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use service_graph::{CallbackAction, NamePolicy, Service};
//!
//! let service = Service::builder()
//!     .label("math")
//!     .name_policy(NamePolicy::NonEmpty)
//!     .action(
//!         "math.add",
//!         Arc::new(CallbackAction::new().handle_typed("add", |(a, b): (i64, i64)| Ok(a + b))),
//!     )
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(service.label(), "math");
//! assert!(service.has_action("math.add"));
//! ```

use std::sync::Arc;

use super::{NamePolicy, Service, SharedService};
use crate::action::Action;
use crate::error::Result;

/// Service configuration.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Label identifying the service in diagnostics.
    pub label: String,
    /// Rule for acceptable registration names.
    pub name_policy: NamePolicy,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            label: std::any::type_name::<Service>().to_string(),
            name_policy: NamePolicy::default(),
        }
    }
}

/// Builder for configuring and creating a [`Service`].
pub struct ServiceBuilder {
    config: ServiceConfig,
    pending: Vec<(String, Arc<dyn Action>)>,
}

impl ServiceBuilder {
    /// Create a new service builder.
    pub fn new() -> Self {
        Self {
            config: ServiceConfig::default(),
            pending: Vec::new(),
        }
    }

    /// Set the label reported in not-found errors.
    ///
    /// Default: the service type name
    pub fn label(mut self, label: &str) -> Self {
        self.config.label = label.to_string();
        self
    }

    /// Set the registration name policy.
    ///
    /// Default: [`NamePolicy::Identifier`]
    pub fn name_policy(mut self, policy: NamePolicy) -> Self {
        self.config.name_policy = policy;
        self
    }

    /// Queue an action for registration under `name`.
    pub fn action(mut self, name: &str, action: Arc<dyn Action>) -> Self {
        self.pending.push((name.to_string(), action));
        self
    }

    /// Build the service, registering queued actions in order.
    ///
    /// # Errors
    ///
    /// Returns the first registration error encountered.
    pub fn build(self) -> Result<Service> {
        let mut service = Service::with_config(self.config);
        for (name, action) in self.pending {
            service.register(&name, action)?;
        }
        Ok(service)
    }

    /// Build the service and wrap it in a [`SharedService`].
    pub fn build_shared(self) -> Result<SharedService> {
        self.build().map(SharedService::new)
    }
}

impl Default for ServiceBuilder {
    fn default() -> Self {
        Self::new()
    }
}
