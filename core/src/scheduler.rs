//! Virtual-time timer queue.
//!
//! Replaces fire-and-forget timeouts. Every timer is tagged with the session epoch
//! that was current when it was scheduled; the owner drops fired timers whose epoch
//! no longer matches, and cancels outstanding timers explicitly on scenario change.
//! Time only moves when the host calls [`Scheduler::advance`], so runs are
//! reproducible for a fixed tick sequence.

use std::time::Duration;

use fairwalk_types::Epoch;

/// What a timer means when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// Waiting at the chosen option is over; walk back home.
    Dwell,
    /// Post-return settle delay is over; advance the scenario.
    Settle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FiredTimer {
    pub handle: TimerHandle,
    pub kind: TimerKind,
    pub epoch: Epoch,
    pub due: Duration,
}

#[derive(Debug, Clone, Copy)]
struct PendingTimer {
    handle: TimerHandle,
    kind: TimerKind,
    epoch: Epoch,
    due: Duration,
}

#[derive(Debug, Default)]
pub struct Scheduler {
    now: Duration,
    next_handle: u64,
    pending: Vec<PendingTimer>,
}

impl Scheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulated time elapsed since the scheduler was created.
    #[inline]
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    #[inline]
    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.pending.iter().any(|timer| timer.handle == handle)
    }

    pub fn schedule(&mut self, delay: Duration, epoch: Epoch, kind: TimerKind) -> TimerHandle {
        let handle = TimerHandle(self.next_handle);
        self.next_handle = self.next_handle.wrapping_add(1);
        self.pending.push(PendingTimer {
            handle,
            kind,
            epoch,
            due: self.now.saturating_add(delay),
        });
        handle
    }

    /// Returns `true` if the timer was still pending.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.pending.len();
        self.pending.retain(|timer| timer.handle != handle);
        self.pending.len() != before
    }

    /// Drop every timer scheduled under an epoch other than `current`.
    pub fn cancel_stale(&mut self, current: Epoch) -> usize {
        let before = self.pending.len();
        self.pending.retain(|timer| timer.epoch == current);
        before - self.pending.len()
    }

    pub fn cancel_all(&mut self) -> usize {
        let count = self.pending.len();
        self.pending.clear();
        count
    }

    /// Move the clock forward and return every timer now due, ordered by due time and
    /// then by scheduling order.
    pub fn advance(&mut self, dt: Duration) -> Vec<FiredTimer> {
        self.now = self.now.saturating_add(dt);
        let now = self.now;

        let mut fired: Vec<FiredTimer> = Vec::new();
        self.pending.retain(|timer| {
            if timer.due <= now {
                fired.push(FiredTimer {
                    handle: timer.handle,
                    kind: timer.kind,
                    epoch: timer.epoch,
                    due: timer.due,
                });
                false
            } else {
                true
            }
        });
        fired.sort_by_key(|timer| (timer.due, timer.handle.0));
        fired
    }
}
