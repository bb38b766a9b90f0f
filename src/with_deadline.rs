use pin_project::pin_project;

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Duration;

use crate::cell::ProxyCell;
use crate::operation::Operation;
use crate::outcome::{self, Outcome};
use crate::timer::DeadlineTimer;
use crate::DeadlineError;

/// Imposes a deadline on `source` without cancelling it.
///
/// The returned proxy resolves to the source's own outcome when it reaches a
/// terminal state within `duration`, and to [`DeadlineError::Elapsed`]
/// otherwise. The source is never aborted: when the deadline wins, the
/// operation keeps running in the background and its eventual outcome is
/// discarded.
///
/// Two cases short-circuit. An already-terminal source or a duration of
/// `Duration::MAX` returns the source's outcome directly, with no timer and
/// no proxy slot. `Duration::ZERO` is an immediate deadline failure; again
/// no timer is armed.
///
/// Otherwise the call allocates a shared result slot, arms a
/// [`DeadlineTimer`] that fails the slot on expiry, and spawns a completion
/// watcher that disarms the timer and marshals the source's outcome into the
/// slot. Whichever side resolves the slot first is final; the loser's write
/// is a no-op.
///
/// # Panics
/// Panics when called outside of a tokio runtime, unless one of the
/// short-circuits applies.
pub fn with_deadline<S>(source: S, duration: Duration) -> Deadline<S>
where
    S: Operation + Send + 'static,
    S::Value: Send + 'static,
    S::Failure: Send + 'static,
{
    if source.is_terminal() || duration == Duration::MAX {
        // either the outcome is already available or the deadline can never
        // fire; no proxy necessary
        return Deadline {
            state: State::Passthrough { source },
        };
    }

    if duration == Duration::ZERO {
        // already timed out
        return Deadline {
            state: State::Expired { taken: false },
        };
    }

    let cell = Arc::new(ProxyCell::new());

    let timer = {
        let cell = cell.clone();
        DeadlineTimer::arm(duration, move || {
            cell.try_resolve(Outcome::Failed(DeadlineError::Elapsed));
        })
    };

    // completion watcher: dispose of the timer first, then marshal the
    // outcome into the proxy
    let proxy = cell.clone();
    tokio::spawn(async move {
        let result = source.into_outcome().await;

        timer.disarm();
        outcome::marshal(result, &proxy);
    });

    Deadline {
        state: State::Proxy { cell },
    }
}

/// Proxy returned by [`with_deadline`].
#[must_use = "futures do nothing unless polled"]
#[pin_project]
pub struct Deadline<S>
where
    S: Operation,
{
    #[pin]
    state: State<S>,
}

#[pin_project(project = StateProj)]
enum State<S>
where
    S: Operation,
{
    Passthrough {
        #[pin]
        source: S,
    },
    Expired {
        taken: bool,
    },
    Proxy {
        cell: Arc<ProxyCell<S::Value, S::Failure>>,
    },
}

impl<S> Future for Deadline<S>
where
    S: Operation,
{
    type Output = Outcome<S::Value, DeadlineError<S::Failure>>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context) -> Poll<Self::Output> {
        match self.project().state.project() {
            StateProj::Passthrough { source } => source
                .poll_outcome(cx)
                .map(|outcome| outcome.map_failure(DeadlineError::Source)),
            StateProj::Expired { taken } => {
                if *taken {
                    panic!("proxy polled after completion");
                }
                *taken = true;
                Poll::Ready(Outcome::Failed(DeadlineError::Elapsed))
            }
            StateProj::Proxy { cell } => cell.poll_take(cx),
        }
    }
}
