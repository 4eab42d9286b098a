//! Service registry for dispatching calls by action name.
//!
//! The registry maps registration names to actions. Calling an operation on
//! the service resolves the name to an action and invokes the action's own
//! designated callback, which need not share the registration name.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use service_graph::{CallbackAction, Service};
//!
//! let mut service = Service::new();
//!
//! let add = CallbackAction::new().handle_typed("sum", |(a, b): (i64, i64)| Ok(a + b));
//! service.register("addNumbers", Arc::new(add)).unwrap();
//!
//! let total: i64 = service.call_with("addNumbers", (1, 2)).unwrap();
//! assert_eq!(total, 3);
//! ```

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::{NamePolicy, ServiceBuilder, ServiceConfig};
use crate::action::{same_action, Action};
use crate::codec::{Args, ArgsCodec};
use crate::error::{Result, ServiceError};

/// Registry of named actions, dispatching calls to them.
pub struct Service {
    /// Label reported in diagnostics.
    label: String,
    /// Rule for registration names.
    name_policy: NamePolicy,
    /// Actions by registration name, in registration order.
    actions: IndexMap<String, Arc<dyn Action>>,
}

impl Service {
    /// Create an empty service with default configuration.
    pub fn new() -> Self {
        Self::with_config(ServiceConfig::default())
    }

    /// Create an empty service with the given configuration.
    pub fn with_config(config: ServiceConfig) -> Self {
        Self {
            label: config.label,
            name_policy: config.name_policy,
            actions: IndexMap::new(),
        }
    }

    /// Create a new service builder.
    pub fn builder() -> ServiceBuilder {
        ServiceBuilder::new()
    }

    /// Label identifying this service in errors.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Registration name policy in effect.
    pub fn name_policy(&self) -> NamePolicy {
        self.name_policy
    }

    /// Whether an action is registered under `name`.
    pub fn has_action(&self, name: &str) -> bool {
        self.actions.contains_key(name)
    }

    /// Get the action registered under `name`.
    pub fn get_action(&self, name: &str) -> Option<Arc<dyn Action>> {
        self.actions.get(name).cloned()
    }

    /// Snapshot of all registrations, in registration order.
    ///
    /// The returned map is independent of the live registry.
    pub fn action_list(&self) -> IndexMap<String, Arc<dyn Action>> {
        self.actions.clone()
    }

    /// Registered names, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.actions.keys().map(|s| s.as_str())
    }

    /// Number of registered actions.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Returns `true` if no actions are registered.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Register an action under `name`.
    ///
    /// Checks, in order: the name against the name policy, that the
    /// action exposes its declared callback, and that the name is free.
    /// On failure the registry is left untouched.
    ///
    /// # Errors
    ///
    /// - [`ServiceError::InvalidName`] if the name is unusable
    /// - [`ServiceError::InvalidCallback`] if the callback is not invocable
    /// - [`ServiceError::DuplicateName`] if the name is taken
    pub fn register(&mut self, name: &str, action: Arc<dyn Action>) -> Result<&mut Self> {
        if !self.name_policy.accepts(name) {
            tracing::warn!("Rejected action name {:?} on service {}", name, self.label);
            return Err(ServiceError::InvalidName {
                name: name.to_string(),
            });
        }

        let callback = action.callback_name();
        if callback.is_empty() || !action.has_callback(callback) {
            tracing::warn!(
                "Rejected action {:?}: callback {:?} is not invocable",
                name,
                callback
            );
            return Err(ServiceError::InvalidCallback {
                name: name.to_string(),
                callback: callback.to_string(),
            });
        }

        // Existing registrations are never replaced.
        if self.has_action(name) {
            tracing::warn!("Rejected action {:?}: already registered", name);
            return Err(ServiceError::DuplicateName {
                name: name.to_string(),
            });
        }

        tracing::debug!(
            "Registered action {} -> {} on service {}",
            name,
            callback,
            self.label
        );
        self.actions.insert(name.to_string(), action);
        Ok(self)
    }

    /// Remove the action registered under `name`. No-op if absent.
    pub fn remove(&mut self, name: &str) -> &mut Self {
        if self.actions.shift_remove(name).is_some() {
            tracing::debug!("Removed action {} from service {}", name, self.label);
        }
        self
    }

    /// Remove every registration bound to this action instance.
    pub fn remove_action(&mut self, action: &Arc<dyn Action>) -> &mut Self {
        let before = self.actions.len();
        self.actions.retain(|_, a| !same_action(a, action));
        let removed = before - self.actions.len();
        if removed > 0 {
            tracing::debug!(
                "Removed {} registration(s) of action from service {}",
                removed,
                self.label
            );
        }
        self
    }

    /// Resolve `name` to its registered action.
    pub(crate) fn resolve(&self, name: &str) -> Result<Arc<dyn Action>> {
        self.get_action(name).ok_or_else(|| {
            tracing::warn!("Action {:?} not found on service {}", name, self.label);
            ServiceError::ActionNotFound {
                action: name.to_string(),
                service: self.label.clone(),
            }
        })
    }

    /// Call the action registered under `name` with positional arguments.
    ///
    /// The action's designated callback is invoked and its result returned
    /// unchanged.
    ///
    /// # Errors
    ///
    /// - [`ServiceError::ActionNotFound`] if nothing is registered under `name`
    /// - [`ServiceError::Action`] carrying the action's own error
    pub fn call(&self, name: &str, args: Args) -> Result<Value> {
        let action = self.resolve(name)?;
        dispatch(name, action.as_ref(), args)
    }

    /// Call with typed arguments and result.
    ///
    /// `args` is encoded with [`ArgsCodec::encode`]; pass a tuple for
    /// several positional arguments.
    pub fn call_with<A, R>(&self, name: &str, args: A) -> Result<R>
    where
        A: Serialize,
        R: DeserializeOwned,
    {
        let args = ArgsCodec::encode(&args)?;
        let value = self.call(name, args)?;
        ArgsCodec::decode_value(value)
    }
}

/// Invoke the designated callback of a resolved action.
pub(crate) fn dispatch(name: &str, action: &dyn Action, args: Args) -> Result<Value> {
    tracing::debug!(
        "Dispatching {} to callback {} ({} args)",
        name,
        action.callback_name(),
        args.len()
    );
    Ok(action.invoke(action.callback_name(), args)?)
}

impl Default for Service {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Service")
            .field("label", &self.label)
            .field("count", &self.actions.len())
            .field("names", &self.actions.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{ActionError, CallbackAction};
    use crate::error::ErrorKind;
    use serde_json::json;

    fn action(callback: &str) -> Arc<dyn Action> {
        Arc::new(CallbackAction::new().handle(callback, |args| Ok(json!(args))))
    }

    #[test]
    fn test_has_action() {
        let mut service = Service::new();
        assert!(!service.has_action("hello"));

        service.register("hello", action("newInTown")).unwrap();
        assert!(service.has_action("hello"));
        assert!(!service.has_action("newInTown"));
    }

    #[test]
    fn test_get_action_is_same_instance() {
        let mut service = Service::new();
        let registered = action("doStuff");
        service.register("doStuff", Arc::clone(&registered)).unwrap();

        let found = service.get_action("doStuff").unwrap();
        assert!(same_action(&found, &registered));
        assert!(service.get_action("other").is_none());
    }

    #[test]
    fn test_action_list_is_ordered_snapshot() {
        let mut service = Service::new();
        let last = action("doStuff");
        service
            .register("first", action("x"))
            .unwrap()
            .register("doStuff", Arc::clone(&last))
            .unwrap();

        let mut list = service.action_list();
        let (name, tail) = list.last().unwrap();
        assert_eq!(name, "doStuff");
        assert!(same_action(tail, &last));

        list.clear();
        assert_eq!(service.len(), 2);
    }

    #[test]
    fn test_register_invalid_name() {
        let mut service = Service::new();
        for name in ["", "909", "add numbers"] {
            let err = service.register(name, action("doStuff")).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidName);
        }
        assert!(service.is_empty());
    }

    #[test]
    fn test_invalid_name_checked_before_callback() {
        let mut service = Service::new();
        let broken = Arc::new(CallbackAction::new().with_callback_name("nope"));

        let err = service.register("", broken).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidName);
    }

    #[test]
    fn test_register_invalid_callback() {
        let mut service = Service::new();
        let mut broken = CallbackAction::new().handle("doStuff", |_| Ok(Value::Null));
        broken.set_callback_name("theresNoWayThisWillWork");

        let err = service.register("doStuff", Arc::new(broken)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidCallback);
        assert!(err.to_string().contains("theresNoWayThisWillWork"));
        assert!(!service.has_action("doStuff"));
    }

    #[test]
    fn test_register_without_callbacks() {
        let mut service = Service::new();
        let err = service
            .register("empty", Arc::new(CallbackAction::new()))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidCallback);
    }

    #[test]
    fn test_invalid_callback_checked_before_duplicate() {
        let mut service = Service::new();
        service.register("doStuff", action("doStuff")).unwrap();

        let broken = Arc::new(CallbackAction::new().with_callback_name("nope"));
        let err = service.register("doStuff", broken).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidCallback);
    }

    #[test]
    fn test_register_duplicate_keeps_original() {
        let mut service = Service::new();
        let original = action("doStuff");
        service.register("doStuff", Arc::clone(&original)).unwrap();

        let err = service.register("doStuff", action("doStuff")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DuplicateName);
        assert_eq!(err.to_string(), "Action \"doStuff\" is already registered!");

        assert_eq!(service.len(), 1);
        assert!(same_action(&service.get_action("doStuff").unwrap(), &original));
    }

    #[test]
    fn test_same_action_under_two_names() {
        let mut service = Service::new();
        let shared = action("run");
        service
            .register("one", Arc::clone(&shared))
            .unwrap()
            .register("two", Arc::clone(&shared))
            .unwrap();

        assert_eq!(service.len(), 2);
        assert_eq!(service.call("two", vec![json!(1)]).unwrap(), json!([1]));
    }

    #[test]
    fn test_remove() {
        let mut service = Service::new();
        service.register("helpMe", action("helpMe")).unwrap();
        service.remove("helpMe");
        assert!(!service.has_action("helpMe"));

        let err = service.call("helpMe", Vec::new()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ActionNotFound);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut service = Service::new();
        service.register("keep", action("keep")).unwrap();
        service.remove("x").remove("x");

        assert!(!service.has_action("x"));
        assert_eq!(service.len(), 1);
    }

    #[test]
    fn test_remove_preserves_order() {
        let mut service = Service::new();
        for name in ["a", "b", "c"] {
            service.register(name, action("run")).unwrap();
        }
        service.remove("b");

        let names: Vec<&str> = service.names().collect();
        assert_eq!(names, vec!["a", "c"]);
    }

    #[test]
    fn test_remove_action_by_instance() {
        let mut service = Service::new();
        let shared = action("run");
        let other = action("run");
        service
            .register("a", Arc::clone(&shared))
            .unwrap()
            .register("b", Arc::clone(&other))
            .unwrap()
            .register("c", Arc::clone(&shared))
            .unwrap();

        service.remove_action(&shared);
        let names: Vec<&str> = service.names().collect();
        assert_eq!(names, vec!["b"]);

        service.remove_action(&shared);
        assert_eq!(service.len(), 1);
    }

    #[test]
    fn test_call_uses_designated_callback() {
        let mut service = Service::new();
        let action = CallbackAction::new()
            .handle("wrong", |_| Ok(json!("wrong")))
            .handle("right", |_| Ok(json!("right")))
            .with_callback_name("right");
        service.register("wrong", Arc::new(action)).unwrap();

        assert_eq!(service.call("wrong", Vec::new()).unwrap(), json!("right"));
    }

    #[test]
    fn test_call_not_found() {
        let service = Service::builder().label("billing").build().unwrap();
        let err = service.call("cantFindMe", Vec::new()).unwrap_err();

        match &err {
            ServiceError::ActionNotFound { action, service } => {
                assert_eq!(action, "cantFindMe");
                assert_eq!(service, "billing");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_call_propagates_action_error() {
        #[derive(Debug)]
        struct Declined;

        impl fmt::Display for Declined {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("card declined")
            }
        }

        impl std::error::Error for Declined {}

        let mut service = Service::new();
        let charge = CallbackAction::new().handle("charge", |_| Err(ActionError::new(Declined)));
        service.register("charge", Arc::new(charge)).unwrap();

        let err = service.call("charge", Vec::new()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Action);
        assert_eq!(err.to_string(), "card declined");
        assert!(err.as_action_error().unwrap().is::<Declined>());
    }

    #[test]
    fn test_call_with_typed() {
        let mut service = Service::new();
        let add = CallbackAction::new().handle_typed("sum", |(a, b): (i64, i64)| Ok(a + b));
        service.register("addNumbers", Arc::new(add)).unwrap();

        let total: i64 = service.call_with("addNumbers", (1, 2)).unwrap();
        assert_eq!(total, 3);

        let err = service.call_with::<_, String>("addNumbers", (1, 2)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Json);
    }

    #[test]
    fn test_debug_format() {
        let mut service = Service::builder().label("debuggable").build().unwrap();
        service.register("test", action("test")).unwrap();

        let debug = format!("{:?}", service);
        assert!(debug.contains("debuggable"));
        assert!(debug.contains("count: 1"));
        assert!(debug.contains("\"test\""));
    }
}
