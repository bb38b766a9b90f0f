use crate::cell::ProxyCell;
use crate::DeadlineError;

/// Terminal state of an asynchronous operation.
///
/// An operation transitions from pending to exactly one of these states and
/// is immutable afterwards. Operations that produce no value use
/// `Outcome<(), E>`.
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome<T, E> {
    /// The operation ran to completion and produced a value.
    Completed(T),
    /// The operation failed with the given cause.
    Failed(E),
    /// The operation was cancelled before reaching a result.
    Canceled,
}

impl<T, E> Outcome<T, E> {
    /// Maps the failure cause, leaving the other states untouched.
    pub fn map_failure<F, M>(self, map: M) -> Outcome<T, F>
    where
        M: FnOnce(E) -> F,
    {
        match self {
            Outcome::Completed(value) => Outcome::Completed(value),
            Outcome::Failed(cause) => Outcome::Failed(map(cause)),
            Outcome::Canceled => Outcome::Canceled,
        }
    }
}

/// Copies a terminal outcome into the proxy cell.
///
/// Try-set semantics throughout: if the deadline already resolved the proxy,
/// every arm is a silent no-op. A failure cause is moved through unchanged,
/// never wrapped or replaced.
pub(crate) fn marshal<T, E>(outcome: Outcome<T, E>, proxy: &ProxyCell<T, E>) {
    match outcome {
        Outcome::Completed(value) => {
            proxy.try_resolve(Outcome::Completed(value));
        }
        Outcome::Failed(cause) => {
            proxy.try_resolve(Outcome::Failed(DeadlineError::Source(cause)));
        }
        Outcome::Canceled => {
            proxy.try_resolve(Outcome::Canceled);
        }
    }
}
