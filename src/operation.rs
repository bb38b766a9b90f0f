use pin_project::pin_project;

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use crate::outcome::Outcome;

#[cfg(feature = "tokio")]
mod tokio;

/// An already-running asynchronous operation with three terminal outcomes.
///
/// This crate never starts source operations itself; it only consumes
/// handles created elsewhere. The canonical implementor is
/// `tokio::task::JoinHandle`, for which dropping the handle detaches the
/// task instead of aborting it, which is the behavior the deadline wrappers
/// rely on when the source loses the race.
pub trait Operation {
    /// Value produced on successful completion. `()` for operations that
    /// produce no value.
    type Value;

    /// Cause carried by a failed operation.
    type Failure;

    /// Whether the operation has already reached a terminal state.
    fn is_terminal(&self) -> bool;

    /// Polls the operation through to its terminal outcome.
    fn poll_outcome(
        self: Pin<&mut Self>,
        cx: &mut Context,
    ) -> Poll<Outcome<Self::Value, Self::Failure>>;

    /// Adapts the operation into a future resolving to its outcome.
    fn into_outcome(self) -> OutcomeFuture<Self>
    where
        Self: Sized,
    {
        OutcomeFuture { operation: self }
    }
}

/// Future for awaiting an [`Operation`]'s terminal outcome.
///
/// This future is created by [`Operation::into_outcome`].
#[must_use = "futures do nothing unless polled"]
#[pin_project]
pub struct OutcomeFuture<S> {
    #[pin]
    operation: S,
}

impl<S> Future for OutcomeFuture<S>
where
    S: Operation,
{
    type Output = Outcome<S::Value, S::Failure>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context) -> Poll<Self::Output> {
        self.project().operation.poll_outcome(cx)
    }
}
