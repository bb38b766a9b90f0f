use futures::future::{self, Either};
use futures::pin_mut;

use std::time::Duration;

use crate::operation::Operation;
use crate::outcome::Outcome;
use crate::DeadlineError;

/// Imposes a deadline on `source` by racing it against a delay.
///
/// Same contract as [`with_deadline`], expressed as a first-completion race
/// instead of timer wiring: the call suspends on a `select` over the source
/// and a sleep of `duration`. When the source wins, the pending sleep is
/// dropped, which deregisters its timer entry. When the sleep wins, the call
/// fails with [`DeadlineError::Elapsed`] and the source is left running.
///
/// Costs one scheduled delay and one extra suspension point per call
/// compared to [`with_deadline`].
///
/// [`with_deadline`]: crate::with_deadline()
pub async fn with_deadline_via_race<S>(
    source: S,
    duration: Duration,
) -> Outcome<S::Value, DeadlineError<S::Failure>>
where
    S: Operation,
{
    let source = source.into_outcome();
    pin_mut!(source);

    // owned, so losing the race drops it and releases its timer entry
    let delay = Box::pin(tokio::time::sleep(duration));

    match future::select(source, delay).await {
        Either::Left((outcome, delay)) => {
            // the delay lost; cancel it before reading the outcome through
            drop(delay);
            outcome.map_failure(DeadlineError::Source)
        }
        // dropping the source handle detaches the operation, it is not
        // aborted
        Either::Right(((), _source)) => Outcome::Failed(DeadlineError::Elapsed),
    }
}
