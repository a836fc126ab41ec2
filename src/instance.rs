//! Type-erased instances handed out by the container.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

// Type-erased Arc for storage
pub(crate) type AnyArc = Arc<dyn Any + Send + Sync>;

/// How an instance is meant to be consumed.
///
/// The shape drives coercion when an instance is injected into a field:
///
/// - **Value**: a plain value. Consumers take their own copy.
/// - **Reference**: a shared handle. Consumers that ask for a reference
///   alias the same allocation.
///
/// Values registered with [`register_value`](crate::Container::register_value)
/// and factories registered with
/// [`register_factory`](crate::Container::register_factory) produce
/// `Value`-shaped instances. Shared registrations and template-constructed
/// instances are `Reference`-shaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// Value-like: copied into whoever consumes it
    Value,
    /// Reference-like: shared by whoever consumes it
    Reference,
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Value => f.write_str("value"),
            Shape::Reference => f.write_str("reference"),
        }
    }
}

/// A resolved instance.
///
/// Cloning an `Instance` clones the handle, not the payload: every clone of a
/// registered value points at the same allocation.
///
/// # Examples
///
/// ```rust
/// use named_di::{Instance, Shape};
///
/// let port = Instance::value(8080u16);
/// assert_eq!(port.shape(), Shape::Value);
/// assert_eq!(port.downcast_ref::<u16>(), Some(&8080));
/// assert!(port.downcast_ref::<u32>().is_none());
///
/// let copy = port.clone();
/// assert!(port.ptr_eq(&copy));
/// ```
#[derive(Clone)]
pub struct Instance {
    payload: AnyArc,
    shape: Shape,
    type_name: &'static str,
}

impl Instance {
    /// Wraps a plain value.
    pub fn value<T: Send + Sync + 'static>(value: T) -> Self {
        Self {
            payload: Arc::new(value),
            shape: Shape::Value,
            type_name: std::any::type_name::<T>(),
        }
    }

    /// Wraps a shared handle. The `Arc` itself is stored, not a copy.
    pub fn shared<T: Send + Sync + 'static>(value: Arc<T>) -> Self {
        Self {
            payload: value,
            shape: Shape::Reference,
            type_name: std::any::type_name::<T>(),
        }
    }

    /// Shape of the instance.
    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Returns true if the instance is reference-like.
    pub fn is_reference(&self) -> bool {
        self.shape == Shape::Reference
    }

    /// Name of the payload type, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Returns true if the payload is a `T`.
    pub fn is<T: 'static>(&self) -> bool {
        self.payload.is::<T>()
    }

    /// Borrows the payload as a `T`.
    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        self.payload.downcast_ref::<T>()
    }

    /// Returns the shared payload as an `Arc<T>`, regardless of shape.
    pub fn downcast_arc<T: Send + Sync + 'static>(&self) -> Option<Arc<T>> {
        self.payload.clone().downcast::<T>().ok()
    }

    /// Returns true if both instances point at the same allocation.
    pub fn ptr_eq(&self, other: &Instance) -> bool {
        Arc::ptr_eq(&self.payload, &other.payload)
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance")
            .field("type_name", &self.type_name)
            .field("shape", &self.shape)
            .finish()
    }
}
