//! Handles to operations running asynchronously.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::future::{BoxFuture, FutureExt};
use tracing::{trace_span, Instrument, Span};

use crate::errors::OperationError;
use crate::response::ResultSet;
use crate::utils::RecordError;

/// The eventual outcome of an asynchronous operation.
///
/// Nothing is submitted to the session until the handle is first polled, either by an
/// executor or through [`wait`](OperationFuture::wait). Dropping the handle abandons the
/// operation. Every failure of the operation, including ones in resolving its
/// statement, is delivered as the output of the handle.
#[must_use = "operations do nothing unless awaited or waited for"]
pub struct OperationFuture<T> {
    inner: BoxFuture<'static, Result<T, OperationError>>,
}

/// Handle to a raw result set.
pub type ResultSetFuture = OperationFuture<ResultSet>;

impl<T: Send + 'static> OperationFuture<T> {
    pub(crate) fn new<F>(fut: F) -> Self
    where
        F: Future<Output = Result<T, OperationError>> + Send + 'static,
    {
        let span = trace_span!("cql_ops.operation", error = tracing::field::Empty);
        let inner = async move { fut.await.record_error(&Span::current()) }
            .instrument(span)
            .boxed();
        OperationFuture { inner }
    }

    /// A handle that is already complete.
    pub fn ready(result: Result<T, OperationError>) -> Self {
        OperationFuture {
            inner: futures::future::ready(result).boxed(),
        }
    }

    /// Blocks the current thread until the operation completes.
    ///
    /// Must not be called from within an asynchronous context.
    pub fn wait(self) -> Result<T, OperationError> {
        futures::executor::block_on(self)
    }

    /// Transforms the successful outcome once it is available.
    pub fn map<U, F>(self, f: F) -> OperationFuture<U>
    where
        U: Send + 'static,
        F: FnOnce(T) -> U + Send + 'static,
    {
        OperationFuture {
            inner: self.inner.map(|result| result.map(f)).boxed(),
        }
    }

    /// Continues with a fallible step once the outcome is available.
    pub fn and_then<U, F>(self, f: F) -> OperationFuture<U>
    where
        U: Send + 'static,
        F: FnOnce(T) -> Result<U, OperationError> + Send + 'static,
    {
        OperationFuture {
            inner: self.inner.map(|result| result.and_then(f)).boxed(),
        }
    }
}

impl<T> Future for OperationFuture<T> {
    type Output = Result<T, OperationError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.inner.as_mut().poll(cx)
    }
}

impl<T> std::fmt::Debug for OperationFuture<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OperationFuture").finish_non_exhaustive()
    }
}
