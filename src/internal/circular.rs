//! Circular dependency detection infrastructure.

use std::cell::RefCell;

use crate::error::{DiError, DiResult};

/// Names currently being constructed on one resolution call stack.
///
/// Each top-level resolution owns its own stack, so independent resolutions
/// on other threads never see each other's entries.
#[derive(Default)]
pub(crate) struct ResolutionStack {
    names: RefCell<Vec<String>>,
}

impl ResolutionStack {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Pushes `name`, rejecting re-entry and runaway depth.
    ///
    /// The returned guard pops the name again when dropped.
    pub(crate) fn enter(&self, name: &str, max_depth: usize) -> DiResult<StackGuard<'_>> {
        let mut names = self.names.borrow_mut();

        // Circular detection BEFORE pushing the new name
        if names.iter().any(|n| n == name) {
            let mut path = names.clone();
            path.push(name.to_string());
            return Err(DiError::Circular(path));
        }

        if names.len() >= max_depth {
            return Err(DiError::DepthExceeded(names.len()));
        }

        names.push(name.to_string());
        Ok(StackGuard { stack: self })
    }

    pub(crate) fn depth(&self) -> usize {
        self.names.borrow().len()
    }

    pub(crate) fn path(&self) -> Vec<String> {
        self.names.borrow().clone()
    }
}

/// Guard for one entry of a [`ResolutionStack`]
pub(crate) struct StackGuard<'s> {
    stack: &'s ResolutionStack,
}

impl Drop for StackGuard<'_> {
    fn drop(&mut self) {
        self.stack.names.borrow_mut().pop();
    }
}
