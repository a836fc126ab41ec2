//! Resolver traits for name resolution.

use std::sync::Arc;

use crate::error::{DiError, DiResult};
use crate::injector;
use crate::instance::Instance;
use crate::template::{Injectable, TypeTemplate};

/// Core resolver trait for object-safe name resolution.
///
/// Implemented by [`Container`](crate::Container), which starts a fresh
/// resolution per call, and by [`ResolverContext`](crate::ResolverContext),
/// which continues the resolution a factory is running in.
///
/// Most users should use the [`Resolver`] trait instead, which provides more
/// ergonomic generic methods built on top of this trait.
pub trait ResolverCore {
    /// Resolves `name` to an instance.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(instance))` - The name resolved
    /// * `Ok(None)` - Nothing is registered under `name`, or its factory
    ///   reported failure
    /// * `Err(DiError)` - Fatal error (type mismatch, circular dependency,
    ///   depth exceeded)
    fn resolve_name(&self, name: &str) -> DiResult<Option<Instance>>;
}

/// High-level resolver interface.
///
/// # Examples
///
/// ```
/// use named_di::{Container, Resolver};
/// use std::sync::Arc;
///
/// let container = Container::new();
/// container.register_value("foo", 1i32);
/// container.register_shared("greeting", Arc::new("hello".to_string()));
///
/// assert_eq!(container.get_value::<i32>("foo").unwrap(), Some(1));
/// let greeting = container.get_shared::<String>("greeting").unwrap().unwrap();
/// assert_eq!(greeting.as_str(), "hello");
/// assert!(container.get("bar").unwrap().is_none());
/// ```
pub trait Resolver: ResolverCore {
    /// Builds a `T` from an explicit template, without a registered name.
    fn inject_with<T>(&self, template: &TypeTemplate<T>) -> DiResult<T>
    where
        T: Default + Send + Sync + 'static;

    /// Resolves `name`. Absence is `Ok(None)`, never an error.
    fn get(&self, name: &str) -> DiResult<Option<Instance>> {
        self.resolve_name(name)
    }

    /// Resolves `name`, treating absence as [`DiError::NotFound`].
    ///
    /// # Examples
    ///
    /// ```
    /// use named_di::{Container, DiError, Resolver};
    ///
    /// let container = Container::new();
    /// container.register_factory::<String, _>("connection", |_| None);
    ///
    /// assert!(container.get("connection").unwrap().is_none());
    /// assert_eq!(
    ///     container.must_get("connection").unwrap_err(),
    ///     DiError::NotFound("connection".to_string())
    /// );
    /// ```
    fn must_get(&self, name: &str) -> DiResult<Instance> {
        self.resolve_name(name)?
            .ok_or_else(|| DiError::NotFound(name.to_string()))
    }

    /// Resolves `name` and copies the result out as a `T`.
    ///
    /// Works for value- and reference-shaped instances alike. Returns
    /// [`DiError::TypeMismatch`] if the instance is not a `T`.
    fn get_value<T>(&self, name: &str) -> DiResult<Option<T>>
    where
        T: Clone + Send + Sync + 'static,
    {
        match self.resolve_name(name)? {
            Some(instance) => injector::coerce_value::<T>(&instance)
                .map(Some)
                .ok_or_else(|| mismatch::<T>(name, &instance)),
            None => Ok(None),
        }
    }

    /// Resolves `name` as a shared `Arc<T>`.
    ///
    /// Reference-shaped instances are returned as the same `Arc`;
    /// value-shaped ones as a private copy.
    fn get_shared<T>(&self, name: &str) -> DiResult<Option<Arc<T>>>
    where
        T: Clone + Send + Sync + 'static,
    {
        match self.resolve_name(name)? {
            Some(instance) => injector::coerce_reference::<T>(&instance)
                .map(Some)
                .ok_or_else(|| mismatch::<T>(name, &instance)),
            None => Ok(None),
        }
    }

    /// Builds a `T` from its own template, without a registered name.
    fn inject<T: Injectable>(&self) -> DiResult<T> {
        self.inject_with(&T::template())
    }
}

fn mismatch<T>(name: &str, instance: &Instance) -> DiError {
    DiError::TypeMismatch {
        path: name.to_string(),
        dependency: name.to_string(),
        expected: std::any::type_name::<T>(),
        found: instance.type_name(),
    }
}
