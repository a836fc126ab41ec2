//! Type templates: statically declared field tables that drive injection.
//!
//! A [`TypeTemplate`] describes how to build a composite type `T`: start from
//! `T::default()` and fill each declared field from the container. Each
//! [`FieldSpec`] carries a typed setter, so assignment is checked by the
//! compiler. The only runtime check left is whether the resolved instance
//! really holds the declared type.

use std::fmt;
use std::sync::Arc;

use crate::descriptors::FieldDescriptor;
use crate::error::DiResult;
use crate::injector;
use crate::instance::{Instance, Shape};
use crate::resolution::ResolverContext;

/// Setter failure: carries the type name of the instance that did not fit.
pub(crate) struct Mismatch {
    pub(crate) found: &'static str,
}

type Assign<T> = Box<dyn Fn(&mut T, &Instance) -> Result<(), Mismatch> + Send + Sync>;

/// One injectable field of a composite type.
///
/// The dependency name defaults to the field name; [`inject`](Self::inject)
/// overrides it.
///
/// # Examples
///
/// ```rust
/// use named_di::FieldSpec;
/// use std::sync::Arc;
///
/// #[derive(Default)]
/// struct Account {
///     id: String,
///     pool: Option<Arc<Vec<u8>>>,
/// }
///
/// let id = FieldSpec::value("id", |a: &mut Account, v: String| a.id = v).inject("accountId");
/// assert_eq!(id.lookup_name(), "accountId");
///
/// let pool = FieldSpec::reference("pool", |a: &mut Account, v: Arc<Vec<u8>>| a.pool = Some(v));
/// assert_eq!(pool.lookup_name(), "pool");
/// ```
pub struct FieldSpec<T> {
    name: &'static str,
    inject: Option<String>,
    shape: Shape,
    type_name: &'static str,
    assign: Assign<T>,
}

impl<T: 'static> FieldSpec<T> {
    /// Declares a value-like field of type `V`.
    ///
    /// The field receives its own copy of the resolved instance, whether that
    /// instance was registered as a value or as a shared handle.
    pub fn value<V, F>(name: &'static str, set: F) -> Self
    where
        V: Clone + Send + Sync + 'static,
        F: Fn(&mut T, V) + Send + Sync + 'static,
    {
        Self {
            name,
            inject: None,
            shape: Shape::Value,
            type_name: std::any::type_name::<V>(),
            assign: Box::new(move |target, instance| {
                let value = injector::coerce_value::<V>(instance).ok_or(Mismatch {
                    found: instance.type_name(),
                })?;
                set(target, value);
                Ok(())
            }),
        }
    }

    /// Declares a reference-like field holding an `Arc<V>`.
    ///
    /// Shared instances are aliased. Plain values are copied into a fresh
    /// `Arc` owned by the field alone.
    pub fn reference<V, F>(name: &'static str, set: F) -> Self
    where
        V: Clone + Send + Sync + 'static,
        F: Fn(&mut T, Arc<V>) + Send + Sync + 'static,
    {
        Self {
            name,
            inject: None,
            shape: Shape::Reference,
            type_name: std::any::type_name::<V>(),
            assign: Box::new(move |target, instance| {
                let value = injector::coerce_reference::<V>(instance).ok_or(Mismatch {
                    found: instance.type_name(),
                })?;
                set(target, value);
                Ok(())
            }),
        }
    }

    /// Resolves this field from `dependency` instead of the field name.
    pub fn inject(mut self, dependency: impl Into<String>) -> Self {
        self.inject = Some(dependency.into());
        self
    }

    /// Field name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Name the field is resolved from.
    pub fn lookup_name(&self) -> &str {
        self.inject.as_deref().unwrap_or(self.name)
    }

    /// Declared shape.
    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Declared type (the pointee for reference fields).
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub(crate) fn assign(&self, target: &mut T, instance: &Instance) -> Result<(), Mismatch> {
        (self.assign)(target, instance)
    }

    pub(crate) fn describe(&self) -> FieldDescriptor {
        FieldDescriptor {
            field: self.name,
            lookup: self.lookup_name().to_string(),
            shape: self.shape,
            type_name: self.type_name,
        }
    }
}

impl<T> fmt::Debug for FieldSpec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldSpec")
            .field("name", &self.name)
            .field("inject", &self.inject)
            .field("shape", &self.shape)
            .field("type_name", &self.type_name)
            .finish()
    }
}

/// Field table for a composite type.
///
/// Fields are populated in declaration order. Fields left out of the table
/// keep their `Default` value.
///
/// # Examples
///
/// ```rust
/// use named_di::{Container, FieldSpec, Resolver, TypeTemplate};
///
/// #[derive(Default, Clone)]
/// struct MyService {
///     some_value: i32,
///     other_value: String,
/// }
///
/// let template = TypeTemplate::<MyService>::new()
///     .field(FieldSpec::value("some_value", |s: &mut MyService, v| s.some_value = v).inject("foo"))
///     .field(FieldSpec::value("other_value", |s: &mut MyService, v| s.other_value = v).inject("bar"));
///
/// let container = Container::new();
/// container.register_value("foo", 1i32);
/// container.register_value("bar", "baz".to_string());
///
/// let service = container.inject_with(&template).unwrap();
/// assert_eq!(service.some_value, 1);
/// assert_eq!(service.other_value, "baz");
/// ```
pub struct TypeTemplate<T> {
    type_name: &'static str,
    fields: Vec<FieldSpec<T>>,
}

impl<T: Default + Send + Sync + 'static> TypeTemplate<T> {
    /// Creates an empty template for `T`.
    pub fn new() -> Self {
        Self {
            type_name: std::any::type_name::<T>(),
            fields: Vec::new(),
        }
    }

    /// Appends a field.
    pub fn field(mut self, spec: FieldSpec<T>) -> Self {
        self.fields.push(spec);
        self
    }

    /// Declared fields in order.
    pub fn fields(&self) -> &[FieldSpec<T>] {
        &self.fields
    }

    /// Name of `T`.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

impl<T: Default + Send + Sync + 'static> Default for TypeTemplate<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for TypeTemplate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeTemplate")
            .field("type_name", &self.type_name)
            .field("fields", &self.fields)
            .finish()
    }
}

/// Types that know their own field table.
///
/// Implement this once per composite type; the container calls
/// [`template`](Self::template) whenever the type is registered or injected.
///
/// # Examples
///
/// ```rust
/// use named_di::{Container, FieldSpec, Injectable, Resolver, TypeTemplate};
///
/// #[derive(Default, Clone)]
/// struct Child {
///     some_value: i32,
/// }
///
/// impl Injectable for Child {
///     fn template() -> TypeTemplate<Self> {
///         TypeTemplate::new()
///             .field(FieldSpec::value("some_value", |c: &mut Child, v| c.some_value = v).inject("foo"))
///     }
/// }
///
/// let container = Container::new();
/// container.register_value("foo", 7i32);
///
/// let child: Child = container.inject().unwrap();
/// assert_eq!(child.some_value, 7);
/// ```
pub trait Injectable: Default + Send + Sync + 'static {
    /// Returns the field table for `Self`.
    fn template() -> TypeTemplate<Self>;
}

/// Object-safe view of a [`TypeTemplate`], as stored in the registry.
pub trait TemplateProvider: Send + Sync {
    /// Name of the constructed type.
    fn type_name(&self) -> &'static str;

    /// Field table, for introspection.
    fn fields(&self) -> Vec<FieldDescriptor>;

    /// Builds a new, fully injected instance. Always reference-shaped.
    fn construct(&self, ctx: &ResolverContext<'_>) -> DiResult<Instance>;
}

impl<T: Default + Send + Sync + 'static> TemplateProvider for TypeTemplate<T> {
    fn type_name(&self) -> &'static str {
        self.type_name
    }

    fn fields(&self) -> Vec<FieldDescriptor> {
        self.fields.iter().map(FieldSpec::describe).collect()
    }

    fn construct(&self, ctx: &ResolverContext<'_>) -> DiResult<Instance> {
        let value = injector::construct(self, ctx)?;
        Ok(Instance::shared(Arc::new(value)))
    }
}
