//! Resolver context for dependency injection.
//!
//! This module contains the ResolverContext type which carries the state of
//! one in-flight resolution and is what factory functions receive.

use std::any::Any;
use std::cell::RefCell;

use crate::cancellation::CancellationToken;
use crate::container::Container;
use crate::error::{DiError, DiResult};
use crate::injector;
use crate::instance::Instance;
use crate::internal::{ResolutionStack, StackGuard};
use crate::observer::Observers;
use crate::resolution::Args;
use crate::template::TypeTemplate;
use crate::traits::{Resolver, ResolverCore};

/// Context passed to factory functions for resolving dependencies.
///
/// A context is created for every top-level call on a [`Container`] and
/// threaded through all nested resolutions. It tracks the names currently
/// being constructed, so re-entrant resolution is reported as
/// [`DiError::Circular`] instead of recursing forever.
///
/// Fatal errors raised anywhere below a factory are remembered by the
/// context. A factory that ignores an `Err` from a nested lookup does not
/// hide it: the error is reported once that factory returns. Lookups the
/// factory makes afterwards are unaffected.
///
/// # Examples
///
/// ```
/// use named_di::{Container, Resolver};
///
/// let container = Container::new();
/// container.register_value("host", "localhost".to_string());
/// container.register_value("port", 5432u16);
/// container.register_factory("db_uri", |ctx| {
///     let host = ctx.get_value::<String>("host").ok()??;
///     let port = ctx.get_value::<u16>("port").ok()??;
///     Some(format!("postgres://{}:{}", host, port))
/// });
///
/// let uri = container.get_value::<String>("db_uri").unwrap();
/// assert_eq!(uri.as_deref(), Some("postgres://localhost:5432"));
/// ```
pub struct ResolverContext<'a> {
    container: &'a Container,
    stack: ResolutionStack,
    fault: RefCell<Option<DiError>>,
    observers: Observers,
    cancellation: Option<CancellationToken>,
}

impl<'a> ResolverContext<'a> {
    pub(crate) fn new(container: &'a Container, cancellation: Option<CancellationToken>) -> Self {
        Self {
            container,
            stack: ResolutionStack::new(),
            fault: RefCell::new(None),
            observers: container.observers(),
            cancellation,
        }
    }

    /// The container this resolution runs against.
    pub fn container(&self) -> &'a Container {
        self.container
    }

    /// Cancellation token supplied by the caller, if any.
    pub fn cancellation(&self) -> Option<&CancellationToken> {
        self.cancellation.as_ref()
    }

    /// Returns true if the caller's token has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.cancellation.as_ref().is_some_and(CancellationToken::is_cancelled)
    }

    /// Number of factories and templates currently under construction.
    pub fn depth(&self) -> usize {
        self.stack.depth()
    }

    /// Names currently under construction, outermost first.
    pub fn path(&self) -> Vec<String> {
        self.stack.path()
    }

    /// Invokes the parameterized factory registered under `name` with `args`,
    /// as part of this resolution.
    ///
    /// See [`Container::make_instance`].
    pub fn make_instance<A: Any>(&self, name: &str, args: A) -> DiResult<Option<Instance>> {
        super::resolve_with(self, name, &Args::new(&args))
    }

    pub(crate) fn observers(&self) -> &Observers {
        &self.observers
    }

    pub(crate) fn enter(&self, name: &str) -> DiResult<StackGuard<'_>> {
        self.stack
            .enter(name, self.container.options().max_depth)
            .map_err(|error| self.latch(error))
    }

    /// Records a fatal error for this resolution; the first one wins.
    pub(crate) fn latch(&self, error: DiError) -> DiError {
        self.fault.borrow_mut().get_or_insert_with(|| error.clone());
        error
    }

    pub(crate) fn take_fault(&self) -> Option<DiError> {
        self.fault.borrow_mut().take()
    }

    pub(crate) fn restore_fault(&self, fault: Option<DiError>) {
        *self.fault.borrow_mut() = fault;
    }
}

impl ResolverCore for ResolverContext<'_> {
    fn resolve_name(&self, name: &str) -> DiResult<Option<Instance>> {
        super::resolve(self, name)
    }
}

impl Resolver for ResolverContext<'_> {
    fn inject_with<T>(&self, template: &TypeTemplate<T>) -> DiResult<T>
    where
        T: Default + Send + Sync + 'static,
    {
        injector::construct(template, self)
    }
}
