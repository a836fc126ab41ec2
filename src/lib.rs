//! # named-di
//!
//! A name-keyed dependency injection container.
//!
//! ## Features
//!
//! - **Three provider kinds**: plain values, factories, and type templates
//! - **Field injection**: templates fill each field from a registered name,
//!   the field's own or an explicit override
//! - **Value/reference coercion**: a plain value can satisfy an `Arc` field
//!   (the field gets a private copy) and a shared handle can satisfy a value
//!   field (the field gets a copy of the target)
//! - **Parameterized factories**: [`Container::make_instance`] passes
//!   caller-supplied arguments to a factory
//! - **Transient resolution**: factories and templates run on every lookup
//! - **Circular dependency detection**: re-entrant resolution fails with the
//!   full path instead of overflowing the stack
//! - **Thread-safe**: the registry sits behind a reader/writer lock
//!
//! ## Quick Start
//!
//! ```rust
//! use named_di::{Container, FieldSpec, Injectable, Resolver, TypeTemplate};
//! use std::sync::Arc;
//!
//! #[derive(Default, Clone)]
//! struct Child {
//!     some_value: i32,
//! }
//!
//! impl Injectable for Child {
//!     fn template() -> TypeTemplate<Self> {
//!         TypeTemplate::new()
//!             .field(FieldSpec::value("SomeValue", |c: &mut Child, v| c.some_value = v).inject("foo"))
//!     }
//! }
//!
//! #[derive(Default)]
//! struct Parent {
//!     child: Option<Arc<Child>>,
//!     some_value: String,
//! }
//!
//! impl Injectable for Parent {
//!     fn template() -> TypeTemplate<Self> {
//!         TypeTemplate::new()
//!             .field(FieldSpec::reference("Child", |p: &mut Parent, v| p.child = Some(v)))
//!             .field(FieldSpec::value("SomeValue", |p: &mut Parent, v| p.some_value = v).inject("bar"))
//!     }
//! }
//!
//! let container = Container::new();
//! container
//!     .register_value("foo", 1i32)
//!     .register_value("bar", "baz".to_string())
//!     .register_type::<Child>("Child");
//!
//! let parent: Parent = container.inject().unwrap();
//! assert_eq!(parent.child.unwrap().some_value, 1);
//! assert_eq!(parent.some_value, "baz");
//! ```
//!
//! ## Missing dependencies
//!
//! A top-level name that is not registered resolves to `Ok(None)`. A field
//! whose dependency is not registered keeps its `Default` value and the
//! enclosing construction still succeeds; observers are told through
//! [`DiObserver::field_defaulted`]. Only [`Resolver::must_get`] turns absence
//! into an error.
//!
//! ```rust
//! use named_di::{Container, DiError, FieldSpec, Resolver, TypeTemplate};
//!
//! #[derive(Default, Clone)]
//! struct Person {
//!     first_name: String,
//!     last_name: String,
//! }
//!
//! let container = Container::new();
//! container.register_template(
//!     "person",
//!     TypeTemplate::new()
//!         .field(FieldSpec::value("FirstName", |p: &mut Person, v| p.first_name = v))
//!         .field(FieldSpec::value("LastName", |p: &mut Person, v| p.last_name = v)),
//! );
//!
//! let person = container.get_value::<Person>("person").unwrap().unwrap();
//! assert!(person.first_name.is_empty() && person.last_name.is_empty());
//!
//! assert!(matches!(container.must_get("nobody"), Err(DiError::NotFound(_))));
//! ```

pub mod cancellation;
pub mod config;
pub mod container;
pub mod descriptors;
pub mod env;
pub mod error;
pub mod instance;
pub mod observer;
pub mod registration;
pub mod resolution;
pub mod template;
pub mod traits;

// Internal modules
mod injector;
mod internal;

// Re-export core types
pub use cancellation::CancellationToken;
pub use config::ContainerOptions;
pub use container::Container;
pub use descriptors::{FieldDescriptor, ProviderDescriptor, ProviderKind};
pub use env::{EnvSource, MapEnv, ProcessEnv};
pub use error::{DiError, DiResult};
pub use instance::{Instance, Shape};
pub use observer::{DiObserver, LoggingObserver};
pub use registration::{FactoryFn, ParamFactory, ParamFactoryFn, Provider};
pub use resolution::ResolverContext;
pub use template::{FieldSpec, Injectable, TemplateProvider, TypeTemplate};
pub use traits::{Resolver, ResolverCore};
