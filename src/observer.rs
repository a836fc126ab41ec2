//! Diagnostic observers for dependency resolution.
//!
//! Observers receive resolution events synchronously, on the resolving
//! thread. They are the hook for logging, timing, and for telling a
//! zero-filled field apart from a successful injection.

use std::sync::Arc;
use std::time::Duration;

use crate::descriptors::ProviderKind;
use crate::error::DiError;

/// Observer trait for resolution events.
///
/// Only [`resolving`](Self::resolving) and [`resolved`](Self::resolved) are
/// required; the remaining hooks default to doing nothing.
///
/// # Performance
///
/// Observer calls are made synchronously during resolution. Keep
/// implementations lightweight.
///
/// # Examples
///
/// ```
/// use named_di::{Container, DiObserver, ProviderKind, Resolver};
/// use std::sync::{Arc, Mutex};
/// use std::time::Duration;
///
/// #[derive(Default)]
/// struct MissingFields(Mutex<Vec<String>>);
///
/// impl DiObserver for MissingFields {
///     fn resolving(&self, _name: &str) {}
///     fn resolved(&self, _name: &str, _kind: ProviderKind, _duration: Duration) {}
///     fn field_defaulted(&self, owner: &'static str, field: &'static str, _dependency: &str) {
///         self.0.lock().unwrap().push(format!("{}.{}", owner, field));
///     }
/// }
///
/// let observer = Arc::new(MissingFields::default());
/// let container = Container::new();
/// container.add_observer(observer.clone());
/// ```
pub trait DiObserver: Send + Sync {
    /// Called before a registered name is resolved.
    fn resolving(&self, name: &str);

    /// Called after a name resolved to an instance.
    fn resolved(&self, name: &str, kind: ProviderKind, duration: Duration);

    /// Called when a name has no provider.
    fn not_found(&self, _name: &str) {}

    /// Called when a factory reports failure.
    fn factory_failed(&self, _name: &str) {}

    /// Called when a field is left at its default because its dependency is missing.
    fn field_defaulted(&self, _owner: &'static str, _field: &'static str, _dependency: &str) {}

    /// Called when resolution of `name` fails with a fatal error.
    fn failed(&self, _name: &str, _error: &DiError) {}
}

/// Container for registered observers.
///
/// Designed to have minimal overhead when no observers are registered.
#[derive(Default, Clone)]
pub(crate) struct Observers {
    observers: Vec<Arc<dyn DiObserver>>,
}

impl Observers {
    pub(crate) fn new() -> Self {
        Self { observers: Vec::new() }
    }

    pub(crate) fn add(&mut self, observer: Arc<dyn DiObserver>) {
        self.observers.push(observer);
    }

    #[inline]
    pub(crate) fn has_observers(&self) -> bool {
        !self.observers.is_empty()
    }

    #[inline]
    pub(crate) fn resolving(&self, name: &str) {
        for observer in &self.observers {
            observer.resolving(name);
        }
    }

    #[inline]
    pub(crate) fn resolved(&self, name: &str, kind: ProviderKind, duration: Duration) {
        for observer in &self.observers {
            observer.resolved(name, kind, duration);
        }
    }

    #[inline]
    pub(crate) fn not_found(&self, name: &str) {
        for observer in &self.observers {
            observer.not_found(name);
        }
    }

    #[inline]
    pub(crate) fn factory_failed(&self, name: &str) {
        for observer in &self.observers {
            observer.factory_failed(name);
        }
    }

    #[inline]
    pub(crate) fn field_defaulted(&self, owner: &'static str, field: &'static str, dependency: &str) {
        for observer in &self.observers {
            observer.field_defaulted(owner, field, dependency);
        }
    }

    #[inline]
    pub(crate) fn failed(&self, name: &str, error: &DiError) {
        for observer in &self.observers {
            observer.failed(name, error);
        }
    }
}

/// Built-in observer that reports events through `tracing`.
///
/// Successful resolutions are logged at `DEBUG`, soft failures at `INFO`,
/// fatal errors at `WARN`. Every event carries the observer's prefix.
///
/// # Examples
///
/// ```
/// use named_di::{Container, LoggingObserver};
/// use std::sync::Arc;
///
/// let container = Container::new();
/// container.add_observer(Arc::new(LoggingObserver::with_prefix("bootstrap")));
/// ```
pub struct LoggingObserver {
    prefix: String,
}

impl LoggingObserver {
    /// Creates a new logging observer with default prefix.
    pub fn new() -> Self {
        Self {
            prefix: "named-di".to_string(),
        }
    }

    /// Creates a new logging observer with a custom prefix.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Prefix attached to every event.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

impl Default for LoggingObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl DiObserver for LoggingObserver {
    fn resolving(&self, name: &str) {
        tracing::trace!(prefix = %self.prefix, name, "resolving");
    }

    fn resolved(&self, name: &str, kind: ProviderKind, duration: Duration) {
        tracing::debug!(prefix = %self.prefix, name, ?kind, ?duration, "resolved");
    }

    fn not_found(&self, name: &str) {
        tracing::info!(prefix = %self.prefix, name, "not registered");
    }

    fn factory_failed(&self, name: &str) {
        tracing::info!(prefix = %self.prefix, name, "factory reported failure");
    }

    fn field_defaulted(&self, owner: &'static str, field: &'static str, dependency: &str) {
        tracing::info!(prefix = %self.prefix, owner, field, dependency, "field left at default");
    }

    fn failed(&self, name: &str, error: &DiError) {
        tracing::warn!(prefix = %self.prefix, name, %error, "resolution failed");
    }
}
