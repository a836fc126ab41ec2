//! Name resolution.
//!
//! Resolution branches on the registered [`Provider`]: values are handed out
//! as they are, factories are invoked with the active [`ResolverContext`],
//! templates are handed to the injector. Nothing is cached; every call for a
//! factory or template builds a fresh instance.
//!
//! Every provider accepts an argument type. Parameterized factories declare
//! their own; all other providers accept only `()`, which is what plain
//! lookups pass.

use std::any::Any;
use std::time::Instant;

use crate::error::{DiError, DiResult};
use crate::instance::Instance;
use crate::registration::Provider;
use crate::template::TemplateProvider;

pub mod context;
pub use context::ResolverContext;

/// Caller-supplied arguments for one resolution.
pub(crate) struct Args<'a> {
    value: &'a dyn Any,
    type_name: &'static str,
}

impl<'a> Args<'a> {
    pub(crate) fn new<A: Any>(value: &'a A) -> Self {
        Self {
            value,
            type_name: std::any::type_name::<A>(),
        }
    }

    pub(crate) fn unit() -> Args<'static> {
        Args::new(&())
    }

    fn is_unit(&self) -> bool {
        self.value.is::<()>()
    }
}

pub(crate) fn resolve(ctx: &ResolverContext<'_>, name: &str) -> DiResult<Option<Instance>> {
    resolve_with(ctx, name, &Args::unit())
}

pub(crate) fn resolve_with(ctx: &ResolverContext<'_>, name: &str, args: &Args<'_>) -> DiResult<Option<Instance>> {
    let provider = match ctx.container().lookup(name) {
        Some(provider) => provider,
        None => {
            tracing::trace!(name, "no provider registered");
            ctx.observers().not_found(name);
            return Ok(None);
        }
    };

    let kind = provider.kind();
    let started = ctx.observers().has_observers().then(Instant::now);
    ctx.observers().resolving(name);

    let outcome = match provider {
        Provider::Parameterized(factory) => {
            if factory.accepts(args.value) {
                run_factory(ctx, name, || factory.call(ctx, args.value))
            } else {
                Err(ctx.latch(args_mismatch(name, factory.args_type(), args)))
            }
        }
        _ if !args.is_unit() => Err(ctx.latch(args_mismatch(name, "()", args))),
        Provider::Value(value) => Ok(Some(value)),
        Provider::Factory(factory) => run_factory(ctx, name, || factory(ctx)),
        Provider::Template(template) => construct_template(ctx, name, template.as_ref()),
    };

    match &outcome {
        Ok(Some(_)) => {
            if let Some(started) = started {
                ctx.observers().resolved(name, kind, started.elapsed());
            }
        }
        Ok(None) => {}
        Err(error) => {
            tracing::debug!(name, %error, "resolution failed");
            ctx.observers().failed(name, error);
        }
    }
    outcome
}

fn args_mismatch(name: &str, expected: &'static str, args: &Args<'_>) -> DiError {
    DiError::TypeMismatch {
        path: name.to_string(),
        dependency: name.to_string(),
        expected,
        found: args.type_name,
    }
}

fn run_factory<F>(ctx: &ResolverContext<'_>, name: &str, invoke: F) -> DiResult<Option<Instance>>
where
    F: FnOnce() -> Option<Instance>,
{
    let _guard = ctx.enter(name)?;

    // Faults latched while this factory runs belong to it alone
    let outer = ctx.take_fault();
    let produced = invoke();
    let swallowed = ctx.take_fault();
    ctx.restore_fault(outer);

    // The factory discarded a fatal error from a nested lookup
    if let Some(fault) = swallowed {
        return Err(ctx.latch(fault));
    }
    if produced.is_none() {
        tracing::debug!(name, "factory reported failure");
        ctx.observers().factory_failed(name);
    }
    Ok(produced)
}

fn construct_template(
    ctx: &ResolverContext<'_>,
    name: &str,
    template: &dyn TemplateProvider,
) -> DiResult<Option<Instance>> {
    let _guard = ctx.enter(name)?;
    template.construct(ctx).map(Some)
}
