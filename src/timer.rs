use futures::future::{self, Either};
use futures::pin_mut;
use futures_intrusive::sync::ManualResetEvent;

use std::sync::Arc;
use std::time::Duration;

/// One-shot deadline callback.
///
/// [`arm`] schedules `on_expire` to run once after `duration` unless the
/// timer is disarmed first. Disarming is idempotent and remains safe after
/// the timer has fired; firing disposes of the timer on its own, so every
/// timer is released exactly once no matter which side of the race wins.
///
/// [`arm`]: DeadlineTimer::arm
pub struct DeadlineTimer {
    disarm: Arc<ManualResetEvent>,
}

impl DeadlineTimer {
    /// Arms a timer on the current tokio runtime.
    ///
    /// # Panics
    /// Panics when called outside of a tokio runtime.
    pub fn arm<F>(duration: Duration, on_expire: F) -> DeadlineTimer
    where
        F: FnOnce() + Send + 'static,
    {
        let disarm = Arc::new(ManualResetEvent::new(false));
        let signal = disarm.clone();

        tokio::spawn(async move {
            let disarmed = signal.wait();
            let expired = tokio::time::sleep(duration);
            pin_mut!(disarmed);
            pin_mut!(expired);

            // the disarm side is polled first, so it wins when both are
            // ready at the same poll
            if let Either::Right(_) = future::select(disarmed, expired).await {
                on_expire();
            }
        });

        DeadlineTimer { disarm }
    }

    /// Disarms the timer. A no-op when already disarmed or already fired.
    pub fn disarm(&self) {
        self.disarm.set();
    }
}
