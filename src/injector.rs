//! Field injection and value/reference coercion.

use std::sync::Arc;

use crate::error::{DiError, DiResult};
use crate::instance::{Instance, Shape};
use crate::resolution::ResolverContext;
use crate::traits::ResolverCore;
use crate::template::TypeTemplate;

/// Coerces a resolved instance into a value-like field.
///
/// Both shapes store the payload behind an `Arc`, so a value-shaped instance
/// and the target of a reference-shaped one are copied the same way. `None`
/// means the payload is not a `V`.
pub(crate) fn coerce_value<V: Clone + 'static>(instance: &Instance) -> Option<V> {
    instance.downcast_ref::<V>().cloned()
}

/// Coerces a resolved instance into a reference-like field.
///
/// Reference-shaped instances are aliased. Value-shaped instances are copied
/// into a new allocation so the field never aliases the registered value.
pub(crate) fn coerce_reference<V: Clone + Send + Sync + 'static>(instance: &Instance) -> Option<Arc<V>> {
    match instance.shape() {
        Shape::Reference => instance.downcast_arc::<V>(),
        Shape::Value => instance.downcast_ref::<V>().map(|value| Arc::new(value.clone())),
    }
}

/// Builds a `T` from its template.
///
/// Missing dependencies leave the field at its default and construction
/// carries on. A dependency of the wrong type aborts with
/// [`DiError::TypeMismatch`].
pub(crate) fn construct<T>(template: &TypeTemplate<T>, ctx: &ResolverContext<'_>) -> DiResult<T>
where
    T: Default + Send + Sync + 'static,
{
    let mut target = T::default();

    for field in template.fields() {
        let dependency = field.lookup_name();
        match ctx.resolve_name(dependency)? {
            Some(instance) => {
                if let Err(mismatch) = field.assign(&mut target, &instance) {
                    let error = DiError::TypeMismatch {
                        path: format!("{}.{}", template.type_name(), field.name()),
                        dependency: dependency.to_string(),
                        expected: field.type_name(),
                        found: mismatch.found,
                    };
                    return Err(ctx.latch(error));
                }
            }
            None => {
                tracing::debug!(
                    owner = template.type_name(),
                    field = field.name(),
                    dependency,
                    "dependency missing, field left at default"
                );
                ctx.observers().field_defaulted(template.type_name(), field.name(), dependency);
            }
        }
    }

    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Conn {
        id: u32,
    }

    #[test]
    fn value_field_copies_both_shapes() {
        let plain = Instance::value(Conn { id: 1 });
        let shared = Instance::shared(Arc::new(Conn { id: 2 }));

        assert_eq!(coerce_value::<Conn>(&plain), Some(Conn { id: 1 }));
        assert_eq!(coerce_value::<Conn>(&shared), Some(Conn { id: 2 }));
    }

    #[test]
    fn reference_field_aliases_shared_instances() {
        let arc = Arc::new(Conn { id: 3 });
        let shared = Instance::shared(arc.clone());

        let field = coerce_reference::<Conn>(&shared).unwrap();
        assert!(Arc::ptr_eq(&arc, &field));
    }

    #[test]
    fn reference_field_copies_plain_values() {
        let plain = Instance::value(Conn { id: 4 });
        let original = plain.downcast_arc::<Conn>().unwrap();

        let field = coerce_reference::<Conn>(&plain).unwrap();
        assert!(!Arc::ptr_eq(&original, &field));
        assert_eq!(*field, Conn { id: 4 });
    }

    #[test]
    fn wrong_payload_does_not_coerce() {
        let plain = Instance::value("not a conn".to_string());
        assert!(coerce_value::<Conn>(&plain).is_none());
        assert!(coerce_reference::<Conn>(&plain).is_none());
    }
}
