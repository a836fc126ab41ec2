//! Cancellation tokens for factories that perform cancellable work.
//!
//! The container never cancels anything itself. A caller hands a token to
//! [`Container::get_with_cancellation`](crate::Container::get_with_cancellation)
//! and factories consult it through
//! [`ResolverContext::cancellation`](crate::ResolverContext::cancellation).

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A token that can be used to signal cancellation.
///
/// # Examples
///
/// ```
/// use named_di::{CancellationToken, Container};
///
/// let container = Container::new();
/// container.register_factory("connection", |ctx| {
///     if ctx.is_cancelled() {
///         return None;
///     }
///     Some("conn-1".to_string())
/// });
///
/// let token = CancellationToken::new();
/// assert!(container.get_with_cancellation("connection", token.clone()).unwrap().is_some());
///
/// token.cancel();
/// assert!(container.get_with_cancellation("connection", token).unwrap().is_none());
/// ```
#[derive(Clone, Default)]
pub struct CancellationToken {
    inner: Arc<CancellationTokenInner>,
}

#[derive(Default)]
struct CancellationTokenInner {
    cancelled: AtomicBool,
    parent: Option<CancellationToken>,
}

impl CancellationToken {
    /// Creates a new cancellation token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a child token that is cancelled when either it or this token is.
    ///
    /// ```
    /// use named_di::CancellationToken;
    ///
    /// let parent_token = CancellationToken::new();
    /// let child_token = parent_token.child_token();
    ///
    /// parent_token.cancel();
    /// assert!(child_token.is_cancelled());
    /// ```
    pub fn child_token(&self) -> Self {
        Self {
            inner: Arc::new(CancellationTokenInner {
                cancelled: AtomicBool::new(false),
                parent: Some(self.clone()),
            }),
        }
    }

    /// Cancels the token.
    pub fn cancel(&self) {
        self.inner.cancelled.store(true, Ordering::Release);
    }

    /// Returns true if cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        if self.inner.cancelled.load(Ordering::Acquire) {
            return true;
        }
        self.inner.parent.as_ref().is_some_and(CancellationToken::is_cancelled)
    }
}

impl fmt::Debug for CancellationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CancellationToken")
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}
