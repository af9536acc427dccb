// SPDX-License-Identifier: MPL-2.0
//! Idle-hide timer for the control overlay.
//!
//! The timer owns a single slot: arming it always aborts the previous arm
//! first, so two tickers never run at once. Every arm carries a fresh
//! [`TimerId`]; the playback state remembers the identity it armed and
//! drops ticks from any other arm, which covers ticks that were already
//! queued when the old arm was aborted.

use std::time::Duration;
use tokio::sync::mpsc::WeakUnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

/// Identity of one armed timer instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TimerId(u64);

impl TimerId {
    /// Returns the identity following this one.
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }

    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Cancellable periodic ticker with a single logical slot.
#[derive(Debug)]
pub struct IdleTimer {
    period: Duration,
    slot: Option<(TimerId, JoinHandle<()>)>,
}

impl IdleTimer {
    pub fn new(period: Duration) -> Self {
        Self { period, slot: None }
    }

    /// Identity of the running arm, if any.
    pub fn armed(&self) -> Option<TimerId> {
        self.slot.as_ref().map(|(id, _)| *id)
    }

    /// Starts ticking for `id`, replacing any previous arm.
    ///
    /// The first tick fires one period after arming. The ticker holds only a
    /// weak sender and stops once the receiving side is gone.
    pub fn arm<T>(&mut self, id: TimerId, events: WeakUnboundedSender<T>, wrap: fn(TimerId) -> T)
    where
        T: Send + 'static,
    {
        self.cancel();
        let period = self.period;
        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let Some(events) = events.upgrade() else {
                    break;
                };
                if events.send(wrap(id)).is_err() {
                    break;
                }
            }
        });
        log::trace!("Idle timer armed ({:?})", id);
        self.slot = Some((id, task));
    }

    /// Stops the running arm. No-op when disarmed.
    pub fn cancel(&mut self) {
        if let Some((id, task)) = self.slot.take() {
            task.abort();
            log::trace!("Idle timer cancelled ({:?})", id);
        }
    }
}

impl Drop for IdleTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}
