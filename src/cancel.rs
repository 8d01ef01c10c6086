//! Cancellation scope for in-flight requests.
//!
//! A page or navigation owns a [`RequestScope`] and runs its requests through
//! it. Cancelling the scope, or dropping its last owner, aborts every request
//! still pending; their callers observe [`ApiError::Cancelled`] instead of a
//! late response landing on a page that is gone.

#[cfg(test)]
#[path = "cancel_test.rs"]
mod cancel_test;

use std::cell::{Cell, RefCell};
use std::future::Future;
use std::rc::Rc;

use futures::future::{AbortHandle, AbortRegistration, Abortable};

use crate::net::ApiError;

#[derive(Default)]
struct ScopeInner {
    handles: RefCell<Vec<(u64, AbortHandle)>>,
    next_id: Cell<u64>,
    cancelled: Cell<bool>,
}

impl ScopeInner {
    fn register(&self) -> Option<(u64, AbortRegistration)> {
        if self.cancelled.get() {
            return None;
        }
        let (handle, registration) = AbortHandle::new_pair();
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.handles.borrow_mut().push((id, handle));
        Some((id, registration))
    }

    fn forget(&self, id: u64) {
        self.handles.borrow_mut().retain(|(i, _)| *i != id);
    }

    fn abort_all(&self) {
        for (_, handle) in self.handles.borrow_mut().drain(..) {
            handle.abort();
        }
    }
}

impl Drop for ScopeInner {
    fn drop(&mut self) {
        for (_, handle) in self.handles.get_mut().drain(..) {
            handle.abort();
        }
    }
}

/// Shared handle; clones refer to the same scope.
#[derive(Clone, Default)]
pub struct RequestScope {
    inner: Rc<ScopeInner>,
}

impl RequestScope {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `fut` under this scope. The returned future does not keep the
    /// scope alive.
    pub fn run<F, T, E>(&self, fut: F) -> impl Future<Output = Result<T, E>> + use<F, T, E>
    where
        F: Future<Output = Result<T, E>>,
        E: From<ApiError>,
    {
        let registration = self.inner.register();
        let scope = Rc::downgrade(&self.inner);
        async move {
            let Some((id, registration)) = registration else {
                return Err(ApiError::Cancelled.into());
            };
            let outcome = Abortable::new(fut, registration).await;
            if let Some(scope) = scope.upgrade() {
                scope.forget(id);
            }
            outcome.unwrap_or_else(|_| Err(ApiError::Cancelled.into()))
        }
    }

    /// Abort everything in flight and refuse new work.
    pub fn cancel_all(&self) {
        self.inner.cancelled.set(true);
        let pending = self.inner.handles.borrow().len();
        self.inner.abort_all();
        if pending > 0 {
            tracing::debug!(pending, "cancelled in-flight requests");
        }
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.inner.cancelled.get()
    }

    /// Number of requests started under this scope that have not finished.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.inner.handles.borrow().len()
    }
}
