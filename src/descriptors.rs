//! Provider descriptors for introspection and diagnostics.

use std::fmt;

use crate::instance::Shape;
use crate::registration::Provider;

/// Kind of a registered provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    /// Pre-built instance
    Value,
    /// Function invoked per resolution
    Factory,
    /// Type template constructed per resolution
    Template,
    /// Function invoked per resolution with caller-supplied arguments
    Parameterized,
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderKind::Value => f.write_str("value"),
            ProviderKind::Factory => f.write_str("factory"),
            ProviderKind::Template => f.write_str("template"),
            ProviderKind::Parameterized => f.write_str("parameterized factory"),
        }
    }
}

/// One field of a template, as declared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Field name
    pub field: &'static str,
    /// Name the field is resolved from
    pub lookup: String,
    /// Declared shape
    pub shape: Shape,
    /// Declared type
    pub type_name: &'static str,
}

/// Provider descriptor for introspection and diagnostics
///
/// # Examples
///
/// ```rust
/// use named_di::{Container, FieldSpec, ProviderKind, TypeTemplate};
///
/// #[derive(Default)]
/// struct Child {
///     some_value: i32,
/// }
///
/// let container = Container::new();
/// container.register_value("foo", 1i32);
/// container.register_factory("connection", |_| Some(0u64));
/// container.register_template(
///     "Child",
///     TypeTemplate::new().field(FieldSpec::value("SomeValue", |c: &mut Child, v| c.some_value = v).inject("foo")),
/// );
///
/// let descriptors = container.descriptors();
/// let names: Vec<_> = descriptors.iter().map(|d| d.name.as_str()).collect();
/// assert_eq!(names, ["Child", "connection", "foo"]);
///
/// let child = &descriptors[0];
/// assert_eq!(child.kind, ProviderKind::Template);
/// assert_eq!(child.fields[0].lookup, "foo");
///
/// assert_eq!(descriptors[1].type_name, None);
/// assert_eq!(descriptors[2].type_name, Some("i32"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderDescriptor {
    /// Registered name
    pub name: String,
    /// Provider kind
    pub kind: ProviderKind,
    /// Payload type for values, constructed type for templates; factories are opaque
    pub type_name: Option<&'static str>,
    /// Declared fields, for templates
    pub fields: Vec<FieldDescriptor>,
}

impl ProviderDescriptor {
    pub(crate) fn describe(name: &str, provider: &Provider) -> Self {
        let (type_name, fields) = match provider {
            Provider::Value(instance) => (Some(instance.type_name()), Vec::new()),
            Provider::Factory(_) | Provider::Parameterized(_) => (None, Vec::new()),
            Provider::Template(template) => (Some(template.type_name()), template.fields()),
        };
        Self {
            name: name.to_string(),
            kind: provider.kind(),
            type_name,
            fields,
        }
    }

    /// Returns true for template registrations.
    pub fn is_template(&self) -> bool {
        self.kind == ProviderKind::Template
    }

    /// Names this provider depends on, in field order.
    pub fn dependencies(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.lookup.as_str())
    }
}
