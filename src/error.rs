//! Error types for the dependency injection container.

use std::fmt;

/// Dependency injection errors
///
/// Only fatal conditions are errors. A name that is simply not registered (or
/// a factory that declines to produce an instance) is reported by
/// [`get`](crate::Resolver::get) as `Ok(None)`; [`NotFound`](DiError::NotFound)
/// is what [`must_get`](crate::Resolver::must_get) turns that into.
///
/// # Examples
///
/// ```rust
/// use named_di::{Container, DiError, Resolver};
///
/// let container = Container::new();
/// assert!(container.get("missing").unwrap().is_none());
///
/// match container.must_get("missing") {
///     Err(DiError::NotFound(name)) => assert_eq!(name, "missing"),
///     _ => unreachable!(),
/// }
/// ```
///
/// ```rust
/// use named_di::DiError;
///
/// let circular = DiError::Circular(vec!["A".into(), "B".into(), "A".into()]);
/// assert_eq!(circular.to_string(), "Circular dependency: A -> B -> A");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiError {
    /// Name not registered, or its factory reported failure
    NotFound(String),
    /// A resolved dependency cannot be coerced into the declared field type
    TypeMismatch {
        /// `Owner.field` for injected fields, the requested name for top-level lookups
        path: String,
        /// Name the instance was resolved from
        dependency: String,
        /// Declared field type
        expected: &'static str,
        /// Type of the resolved instance
        found: &'static str,
    },
    /// Circular dependency detected (includes path)
    Circular(Vec<String>),
    /// Maximum resolution depth exceeded
    DepthExceeded(usize),
}

impl DiError {
    /// Returns true for errors that indicate a misconfiguration rather than absence.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, DiError::NotFound(_))
    }
}

impl fmt::Display for DiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiError::NotFound(name) => write!(f, "Dependency not found: {}", name),
            DiError::TypeMismatch { path, dependency, expected, found } => write!(
                f,
                "Type mismatch at {} (from '{}'): expected {}, found {}",
                path, dependency, expected, found
            ),
            DiError::Circular(path) => {
                write!(f, "Circular dependency: {}", path.join(" -> "))
            }
            DiError::DepthExceeded(depth) => write!(f, "Max depth {} exceeded", depth),
        }
    }
}

impl std::error::Error for DiError {}

/// Result type for DI operations
pub type DiResult<T> = Result<T, DiError>;
