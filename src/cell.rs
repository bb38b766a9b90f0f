use parking_lot::Mutex;

use std::task::{Context, Poll, Waker};

use crate::outcome::Outcome;
use crate::DeadlineError;

pub(crate) type ProxyCell<T, E> = ResultCell<Outcome<T, DeadlineError<E>>>;

/// Shared result slot, resolved by whichever side of the race writes first.
///
/// The deadline callback and the completion watcher may attempt resolution
/// concurrently from different worker threads; the mutex arbitrates so that
/// exactly one attempt wins.
pub(crate) struct ResultCell<O> {
    slot: Mutex<Slot<O>>,
}

struct Slot<O> {
    resolved: bool,
    outcome: Option<O>,
    waker: Option<Waker>,
}

impl<O> ResultCell<O> {
    pub(crate) fn new() -> Self {
        ResultCell {
            slot: Mutex::new(Slot {
                resolved: false,
                outcome: None,
                waker: None,
            }),
        }
    }

    /// Attempts to resolve the cell. The first writer wins; later attempts
    /// return `false` and leave the stored outcome untouched.
    pub(crate) fn try_resolve(&self, outcome: O) -> bool {
        let waker = {
            let mut slot = self.slot.lock();

            if slot.resolved {
                return false;
            }

            slot.resolved = true;
            slot.outcome = Some(outcome);
            slot.waker.take()
        };

        // wake outside the lock
        if let Some(waker) = waker {
            waker.wake();
        }

        true
    }

    /// Takes the resolved outcome, or registers the consumer for a wake-up.
    pub(crate) fn poll_take(&self, cx: &mut Context) -> Poll<O> {
        let mut slot = self.slot.lock();

        if let Some(outcome) = slot.outcome.take() {
            return Poll::Ready(outcome);
        }

        if slot.resolved {
            panic!("proxy polled after completion");
        }

        slot.waker = Some(cx.waker().clone());
        Poll::Pending
    }
}
