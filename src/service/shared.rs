//! Shared, lock-guarded service handle.
//!
//! [`Service`] itself assumes one owner that registers, removes and
//! dispatches sequentially. [`SharedService`] wraps it in a read-write lock
//! so clones of the handle can be used from several threads.
//!
//! Dispatch holds the read lock only while resolving the action; the
//! callback runs unlocked, so an action may call back into the same handle
//! (including registering or removing actions) without deadlocking.
//!
//! An action stored in the service must not hold a strong [`SharedService`]
//! clone: that forms a reference cycle and the registry is never dropped.
//! Capture a [`WeakService`] from [`SharedService::downgrade`] instead.

use std::sync::{Arc, Weak};

use indexmap::IndexMap;
use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::registry::dispatch;
use super::Service;
use crate::action::Action;
use crate::codec::{Args, ArgsCodec};
use crate::error::Result;

/// Cloneable, thread-safe handle to a [`Service`].
#[derive(Clone, Default)]
pub struct SharedService {
    inner: Arc<RwLock<Service>>,
}

impl SharedService {
    /// Wrap an existing service.
    pub fn new(service: Service) -> Self {
        Self {
            inner: Arc::new(RwLock::new(service)),
        }
    }

    /// Label of the wrapped service.
    pub fn label(&self) -> String {
        self.inner.read().label().to_string()
    }

    /// Whether an action is registered under `name`.
    pub fn has_action(&self, name: &str) -> bool {
        self.inner.read().has_action(name)
    }

    /// Get the action registered under `name`.
    pub fn get_action(&self, name: &str) -> Option<Arc<dyn Action>> {
        self.inner.read().get_action(name)
    }

    /// Snapshot of all registrations, in registration order.
    pub fn action_list(&self) -> IndexMap<String, Arc<dyn Action>> {
        self.inner.read().action_list()
    }

    /// Number of registered actions.
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// Returns `true` if no actions are registered.
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Register an action under `name`. See [`Service::register`].
    pub fn register(&self, name: &str, action: Arc<dyn Action>) -> Result<&Self> {
        self.inner.write().register(name, action)?;
        Ok(self)
    }

    /// Remove the action registered under `name`. No-op if absent.
    pub fn remove(&self, name: &str) -> &Self {
        self.inner.write().remove(name);
        self
    }

    /// Remove every registration bound to this action instance.
    pub fn remove_action(&self, action: &Arc<dyn Action>) -> &Self {
        self.inner.write().remove_action(action);
        self
    }

    /// Call the action registered under `name`. See [`Service::call`].
    pub fn call(&self, name: &str, args: Args) -> Result<Value> {
        let action = self.inner.read().resolve(name)?;
        dispatch(name, action.as_ref(), args)
    }

    /// Call with typed arguments and result. See [`Service::call_with`].
    pub fn call_with<A, R>(&self, name: &str, args: A) -> Result<R>
    where
        A: Serialize,
        R: DeserializeOwned,
    {
        let args = ArgsCodec::encode(&args)?;
        let value = self.call(name, args)?;
        ArgsCodec::decode_value(value)
    }

    /// Create a non-owning handle to the same service.
    pub fn downgrade(&self) -> WeakService {
        WeakService {
            inner: Arc::downgrade(&self.inner),
        }
    }
}

/// Non-owning handle to a [`SharedService`].
#[derive(Clone, Default)]
pub struct WeakService {
    inner: Weak<RwLock<Service>>,
}

impl WeakService {
    /// Get a strong handle, or `None` if the service has been dropped.
    pub fn upgrade(&self) -> Option<SharedService> {
        self.inner.upgrade().map(|inner| SharedService { inner })
    }
}

impl std::fmt::Debug for WeakService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeakService")
            .field("alive", &(self.inner.strong_count() > 0))
            .finish()
    }
}

impl From<Service> for SharedService {
    fn from(service: Service) -> Self {
        Self::new(service)
    }
}

impl std::fmt::Debug for SharedService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("SharedService").field(&*self.inner.read()).finish()
    }
}
