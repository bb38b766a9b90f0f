use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use crate::operation::Operation;
use crate::outcome::Outcome;

/// A spawned tokio task. An aborted task surfaces as [`Outcome::Canceled`],
/// a panicked one as [`Outcome::Failed`] carrying the `JoinError` with the
/// panic payload.
impl<T> Operation for tokio::task::JoinHandle<T> {
    type Value = T;
    type Failure = tokio::task::JoinError;

    fn is_terminal(&self) -> bool {
        self.is_finished()
    }

    fn poll_outcome(
        self: Pin<&mut Self>,
        cx: &mut Context,
    ) -> Poll<Outcome<T, tokio::task::JoinError>> {
        match Future::poll(self, cx) {
            Poll::Ready(Ok(value)) => Poll::Ready(Outcome::Completed(value)),
            Poll::Ready(Err(e)) if e.is_cancelled() => Poll::Ready(Outcome::Canceled),
            Poll::Ready(Err(e)) => Poll::Ready(Outcome::Failed(e)),
            Poll::Pending => Poll::Pending,
        }
    }
}
