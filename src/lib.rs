//! Deadline proxies for already-running asynchronous operations.
//!
//! [`with_deadline`] and [`with_deadline_via_race`] impose a time limit on an
//! operation that is already in flight, without cancelling it: when the
//! deadline wins the race, the caller observes [`DeadlineError::Elapsed`]
//! while the operation keeps running in the background.

use std::error::Error;
use std::fmt;

pub mod delay;
pub mod operation;
pub mod outcome;
#[cfg(feature = "tokio")]
pub mod timer;

mod cell;
#[cfg(feature = "tokio")]
mod with_deadline;
#[cfg(feature = "tokio")]
mod with_race;

/// Failure reported by a deadline-wrapped operation.
#[derive(Debug, PartialEq, Eq)]
pub enum DeadlineError<E> {
    /// The deadline elapsed before the source operation completed.
    Elapsed,
    /// The source operation itself failed; the original cause, unchanged.
    Source(E),
}

impl<E: fmt::Display> fmt::Display for DeadlineError<E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DeadlineError::Elapsed => write!(f, "deadline elapsed before the operation completed"),
            DeadlineError::Source(cause) => write!(f, "{}", cause),
        }
    }
}

impl<E: Error + 'static> Error for DeadlineError<E> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            DeadlineError::Elapsed => None,
            DeadlineError::Source(cause) => Some(cause),
        }
    }
}

pub use operation::Operation;
pub use outcome::Outcome;
#[cfg(feature = "tokio")]
pub use with_deadline::{with_deadline, Deadline};
#[cfg(feature = "tokio")]
pub use with_race::with_deadline_via_race;
