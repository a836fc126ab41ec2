//! The dependency container.

use std::any::Any;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::cancellation::CancellationToken;
use crate::config::ContainerOptions;
use crate::descriptors::ProviderDescriptor;
use crate::env::EnvSource;
use crate::error::DiResult;
use crate::injector;
use crate::instance::Instance;
use crate::observer::{DiObserver, LoggingObserver, Observers};
use crate::registration::{Provider, Registry};
use crate::resolution::{self, Args, ResolverContext};
use crate::template::{Injectable, TypeTemplate};
use crate::traits::{Resolver, ResolverCore};

/// Name-keyed dependency container.
///
/// Registration is expected to happen during a setup phase, after which the
/// container is only read. Registering later is still safe: the registry sits
/// behind a reader/writer lock, and lookups release the lock before any
/// factory or template runs, so concurrent resolutions never observe a
/// half-updated map. Share a container across threads with `Arc<Container>`.
///
/// # Examples
///
/// ```
/// use named_di::{Container, FieldSpec, Resolver, TypeTemplate};
///
/// #[derive(Default, Clone)]
/// struct Archana {
///     some_value: String,
/// }
///
/// let container = Container::new();
/// container
///     .register_value("foo", 1i32)
///     .register_value("SomeValue", "injected".to_string())
///     .register_template(
///         "Archana",
///         TypeTemplate::new()
///             .field(FieldSpec::value("SomeValue", |a: &mut Archana, v| a.some_value = v)),
///     );
///
/// let archana = container.get_shared::<Archana>("Archana").unwrap().unwrap();
/// assert_eq!(archana.some_value, "injected");
/// ```
pub struct Container {
    registry: RwLock<Registry>,
    observers: RwLock<Observers>,
    options: ContainerOptions,
}

impl Container {
    /// Creates an empty container with default options.
    pub fn new() -> Self {
        Self::with_options(ContainerOptions::default())
    }

    /// Creates an empty container.
    ///
    /// With `log_resolutions` set, a [`LoggingObserver`] is installed.
    pub fn with_options(options: ContainerOptions) -> Self {
        let mut observers = Observers::new();
        if options.log_resolutions {
            observers.add(Arc::new(LoggingObserver::new()));
        }
        Self {
            registry: RwLock::new(Registry::new()),
            observers: RwLock::new(observers),
            options,
        }
    }

    /// Options this container was created with.
    pub fn options(&self) -> &ContainerOptions {
        &self.options
    }

    // ----- Registration -----

    /// Registers `provider` under `name`, replacing any previous provider.
    pub fn register(&self, name: impl Into<String>, provider: Provider) -> &Self {
        let name = name.into();
        let kind = provider.kind();
        let replaced = self.registry.write().insert(name.clone(), provider);
        match replaced {
            Some(previous) => tracing::debug!(
                name = %name,
                ?kind,
                previous = ?previous.kind(),
                "replaced existing provider"
            ),
            None => tracing::trace!(name = %name, ?kind, "registered provider"),
        }
        self
    }

    /// Registers a plain value. Fields and callers receive copies.
    pub fn register_value<T: Send + Sync + 'static>(&self, name: impl Into<String>, value: T) -> &Self {
        self.register(name, Provider::value(value))
    }

    /// Registers a shared handle. Reference fields alias it.
    pub fn register_shared<T: Send + Sync + 'static>(&self, name: impl Into<String>, value: Arc<T>) -> &Self {
        self.register(name, Provider::shared(value))
    }

    /// Registers a factory invoked on every resolution of `name`.
    ///
    /// Returning `None` reports failure; callers see it as "not found".
    pub fn register_factory<T, F>(&self, name: impl Into<String>, factory: F) -> &Self
    where
        T: Send + Sync + 'static,
        F: Fn(&ResolverContext<'_>) -> Option<T> + Send + Sync + 'static,
    {
        self.register(name, Provider::factory(factory))
    }

    /// Registers a factory producing shared handles.
    pub fn register_shared_factory<T, F>(&self, name: impl Into<String>, factory: F) -> &Self
    where
        T: Send + Sync + 'static,
        F: Fn(&ResolverContext<'_>) -> Option<Arc<T>> + Send + Sync + 'static,
    {
        self.register(name, Provider::shared_factory(factory))
    }

    /// Registers a factory taking arguments of type `A`.
    ///
    /// Invoke it with [`make_instance`](Self::make_instance). Plain lookups
    /// reach it only when `A` is `()`.
    pub fn register_parameterized<A, T, F>(&self, name: impl Into<String>, factory: F) -> &Self
    where
        A: Any,
        T: Send + Sync + 'static,
        F: Fn(&ResolverContext<'_>, &A) -> Option<T> + Send + Sync + 'static,
    {
        self.register(name, Provider::parameterized(factory))
    }

    /// Registers `T` by its own template.
    pub fn register_type<T: Injectable>(&self, name: impl Into<String>) -> &Self {
        self.register(name, Provider::template::<T>())
    }

    /// Registers an explicit template.
    pub fn register_template<T>(&self, name: impl Into<String>, template: TypeTemplate<T>) -> &Self
    where
        T: Default + Send + Sync + 'static,
    {
        self.register(name, Provider::from_template(template))
    }

    /// Registers the value of environment variable `var` as a `String`.
    ///
    /// Returns false, registering nothing, if the variable is unset.
    ///
    /// # Examples
    ///
    /// ```
    /// use named_di::{Container, MapEnv, Resolver};
    ///
    /// let env = MapEnv::new().with("DB_URI", "postgres://localhost/app");
    /// let container = Container::new();
    ///
    /// assert!(container.register_env("DBURI", "DB_URI", &env));
    /// assert!(!container.register_env("REDIS", "REDIS_URL", &env));
    /// assert_eq!(
    ///     container.get_value::<String>("DBURI").unwrap().as_deref(),
    ///     Some("postgres://localhost/app")
    /// );
    /// ```
    pub fn register_env(&self, name: impl Into<String>, var: &str, source: &dyn EnvSource) -> bool {
        match source.var(var) {
            Some(value) => {
                self.register_value(name, value);
                true
            }
            None => {
                tracing::debug!(var, "environment variable not set");
                false
            }
        }
    }

    /// Removes the provider registered under `name`.
    pub fn remove(&self, name: &str) -> Option<Provider> {
        self.registry.write().remove(name)
    }

    /// Attaches an observer to all subsequent resolutions.
    pub fn add_observer(&self, observer: Arc<dyn DiObserver>) -> &Self {
        self.observers.write().add(observer);
        self
    }

    // ----- Introspection -----

    /// Returns the provider registered under `name`. No side effects.
    pub fn lookup(&self, name: &str) -> Option<Provider> {
        self.registry.read().get(name).cloned()
    }

    /// Returns true if `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.registry.read().contains_key(name)
    }

    /// Number of registered names.
    pub fn len(&self) -> usize {
        self.registry.read().len()
    }

    /// Returns true if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Describes every registration, sorted by name.
    pub fn descriptors(&self) -> Vec<ProviderDescriptor> {
        let mut descriptors: Vec<_> = self
            .registry
            .read()
            .iter()
            .map(|(name, provider)| ProviderDescriptor::describe(name, provider))
            .collect();
        descriptors.sort_by(|a, b| a.name.cmp(&b.name));
        descriptors
    }

    // ----- Resolution -----

    /// Resolves `name` with a cancellation token visible to factories
    /// through [`ResolverContext::cancellation`].
    ///
    /// The container does not act on the token itself.
    pub fn get_with_cancellation(&self, name: &str, token: CancellationToken) -> DiResult<Option<Instance>> {
        let ctx = ResolverContext::new(self, Some(token));
        resolution::resolve(&ctx, name)
    }

    /// Invokes the factory registered under `name` with caller-supplied `args`.
    ///
    /// Multiple arguments travel as a tuple. Values, templates and plain
    /// factories accept only `()`, which makes this the same as
    /// [`get`](Resolver::get). Arguments of any other type than the one the
    /// provider declares are a [`DiError::TypeMismatch`](crate::DiError::TypeMismatch)
    /// naming the expected argument type.
    ///
    /// # Examples
    ///
    /// ```
    /// use named_di::{Container, DiError, Resolver};
    ///
    /// let container = Container::new();
    /// container.register_value("scheme", "postgres".to_string());
    /// container.register_parameterized("db_uri", |ctx, (host, port): &(String, u16)| {
    ///     let scheme = ctx.get_value::<String>("scheme").ok()??;
    ///     Some(format!("{}://{}:{}", scheme, host, port))
    /// });
    ///
    /// let uri = container.make_instance("db_uri", ("db.local".to_string(), 5432u16)).unwrap().unwrap();
    /// assert_eq!(uri.downcast_ref::<String>().unwrap(), "postgres://db.local:5432");
    ///
    /// assert!(matches!(
    ///     container.make_instance("db_uri", 5432u16),
    ///     Err(DiError::TypeMismatch { .. })
    /// ));
    /// ```
    pub fn make_instance<A: Any>(&self, name: &str, args: A) -> DiResult<Option<Instance>> {
        let ctx = ResolverContext::new(self, None);
        resolution::resolve_with(&ctx, name, &Args::new(&args))
    }

    pub(crate) fn observers(&self) -> Observers {
        self.observers.read().clone()
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Container {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Container")
            .field("providers", &self.len())
            .field("options", &self.options)
            .finish()
    }
}

impl ResolverCore for Container {
    fn resolve_name(&self, name: &str) -> DiResult<Option<Instance>> {
        let ctx = ResolverContext::new(self, None);
        resolution::resolve(&ctx, name)
    }
}

impl Resolver for Container {
    fn inject_with<T>(&self, template: &TypeTemplate<T>) -> DiResult<T>
    where
        T: Default + Send + Sync + 'static,
    {
        let ctx = ResolverContext::new(self, None);
        injector::construct(template, &ctx)
    }
}
