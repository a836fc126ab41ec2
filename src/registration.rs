//! Provider registration types.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::descriptors::ProviderKind;
use crate::instance::Instance;
use crate::resolution::ResolverContext;
use crate::template::{Injectable, TemplateProvider, TypeTemplate};

/// Type-erased factory. `None` reports failure to produce an instance.
pub type FactoryFn = Arc<dyn Fn(&ResolverContext<'_>) -> Option<Instance> + Send + Sync>;

/// Type-erased factory taking caller-supplied arguments.
pub type ParamFactoryFn = Arc<dyn Fn(&ResolverContext<'_>, &dyn Any) -> Option<Instance> + Send + Sync>;

/// A factory that takes arguments of one declared type.
///
/// Only reachable through [`Container::make_instance`](crate::Container::make_instance)
/// (or plain lookups, when the argument type is `()`).
#[derive(Clone)]
pub struct ParamFactory {
    args_type: &'static str,
    accepts: fn(&dyn Any) -> bool,
    call: ParamFactoryFn,
}

impl ParamFactory {
    fn new<A, T, F>(factory: F) -> Self
    where
        A: Any,
        T: Send + Sync + 'static,
        F: Fn(&ResolverContext<'_>, &A) -> Option<T> + Send + Sync + 'static,
    {
        Self {
            args_type: std::any::type_name::<A>(),
            accepts: |args| args.is::<A>(),
            call: Arc::new(move |ctx: &ResolverContext<'_>, args: &dyn Any| {
                factory(ctx, args.downcast_ref::<A>()?).map(Instance::value)
            }),
        }
    }

    /// Declared argument type.
    pub fn args_type(&self) -> &'static str {
        self.args_type
    }

    pub(crate) fn accepts(&self, args: &dyn Any) -> bool {
        (self.accepts)(args)
    }

    pub(crate) fn call(&self, ctx: &ResolverContext<'_>, args: &dyn Any) -> Option<Instance> {
        (self.call)(ctx, args)
    }
}

impl fmt::Debug for ParamFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParamFactory").field("args_type", &self.args_type).finish()
    }
}

/// How a registered name is satisfied.
///
/// The kind is chosen by the caller at registration time; nothing is
/// inferred from the payload.
///
/// # Examples
///
/// ```rust
/// use named_di::{Container, Provider, ProviderKind, Resolver};
///
/// let container = Container::new();
/// container.register("foo", Provider::value(1i32));
/// container.register("answer", Provider::factory(|_| Some(42i32)));
///
/// assert_eq!(container.lookup("foo").unwrap().kind(), ProviderKind::Value);
/// assert_eq!(container.get_value::<i32>("answer").unwrap(), Some(42));
/// ```
#[derive(Clone)]
pub enum Provider {
    /// Pre-built instance, handed out as-is
    Value(Instance),
    /// Invoked on every resolution
    Factory(FactoryFn),
    /// Constructed and injected on every resolution
    Template(Arc<dyn TemplateProvider>),
    /// Invoked on every resolution with caller-supplied arguments
    Parameterized(ParamFactory),
}

impl Provider {
    /// A plain value.
    pub fn value<T: Send + Sync + 'static>(value: T) -> Self {
        Provider::Value(Instance::value(value))
    }

    /// A shared handle; every resolution returns the same `Arc`.
    pub fn shared<T: Send + Sync + 'static>(value: Arc<T>) -> Self {
        Provider::Value(Instance::shared(value))
    }

    /// A factory producing plain values.
    pub fn factory<T, F>(factory: F) -> Self
    where
        T: Send + Sync + 'static,
        F: Fn(&ResolverContext<'_>) -> Option<T> + Send + Sync + 'static,
    {
        Provider::Factory(Arc::new(move |ctx: &ResolverContext<'_>| factory(ctx).map(Instance::value)))
    }

    /// A factory producing shared handles.
    pub fn shared_factory<T, F>(factory: F) -> Self
    where
        T: Send + Sync + 'static,
        F: Fn(&ResolverContext<'_>) -> Option<Arc<T>> + Send + Sync + 'static,
    {
        Provider::Factory(Arc::new(move |ctx: &ResolverContext<'_>| factory(ctx).map(Instance::shared)))
    }

    /// A factory taking arguments of type `A`.
    pub fn parameterized<A, T, F>(factory: F) -> Self
    where
        A: Any,
        T: Send + Sync + 'static,
        F: Fn(&ResolverContext<'_>, &A) -> Option<T> + Send + Sync + 'static,
    {
        Provider::Parameterized(ParamFactory::new(factory))
    }

    /// The template `T` declares for itself.
    pub fn template<T: Injectable>() -> Self {
        Self::from_template(T::template())
    }

    /// An explicit template.
    pub fn from_template<T: Default + Send + Sync + 'static>(template: TypeTemplate<T>) -> Self {
        Provider::Template(Arc::new(template))
    }

    /// Kind of this provider.
    pub fn kind(&self) -> ProviderKind {
        match self {
            Provider::Value(_) => ProviderKind::Value,
            Provider::Factory(_) => ProviderKind::Factory,
            Provider::Template(_) => ProviderKind::Template,
            Provider::Parameterized(_) => ProviderKind::Parameterized,
        }
    }
}

impl fmt::Debug for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provider::Value(instance) => f.debug_tuple("Value").field(instance).finish(),
            Provider::Factory(_) => f.write_str("Factory(..)"),
            Provider::Template(template) => f.debug_tuple("Template").field(&template.type_name()).finish(),
            Provider::Parameterized(factory) => f.debug_tuple("Parameterized").field(factory).finish(),
        }
    }
}

#[cfg(feature = "ahash")]
type NameMap<V> = HashMap<String, V, ahash::RandomState>;
#[cfg(not(feature = "ahash"))]
type NameMap<V> = HashMap<String, V>;

/// Registry holding all providers by name
#[derive(Default)]
pub(crate) struct Registry {
    providers: NameMap<Provider>,
}

impl Registry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Inserts a provider, returning the one it replaced
    pub(crate) fn insert(&mut self, name: String, provider: Provider) -> Option<Provider> {
        self.providers.insert(name, provider)
    }

    #[inline]
    pub(crate) fn get(&self, name: &str) -> Option<&Provider> {
        self.providers.get(name)
    }

    #[inline]
    pub(crate) fn contains_key(&self, name: &str) -> bool {
        self.providers.contains_key(name)
    }

    pub(crate) fn remove(&mut self, name: &str) -> Option<Provider> {
        self.providers.remove(name)
    }

    pub(crate) fn len(&self) -> usize {
        self.providers.len()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&String, &Provider)> {
        self.providers.iter()
    }
}
