//! At-most-once scenario advancement.

use std::time::Duration;

use fairwalk_types::Epoch;

use crate::scheduler::{Scheduler, TimerHandle, TimerKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardOutcome {
    /// First request for this scenario; the settle timer is running.
    Armed(TimerHandle),
    /// A transition is already in flight (or the session is over); request dropped.
    Absorbed,
}

/// One boolean lock per scenario lifecycle.
///
/// The first [`advance`](TransitionGuard::advance) locks and schedules the settle
/// timer; every later request is absorbed until [`release`](TransitionGuard::release)
/// is called for the next scenario.
#[derive(Debug, Default)]
pub struct TransitionGuard {
    locked: bool,
    pending: Option<TimerHandle>,
}

impl TransitionGuard {
    #[inline]
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn advance(
        &mut self,
        scheduler: &mut Scheduler,
        epoch: Epoch,
        settle: Duration,
    ) -> GuardOutcome {
        if self.locked {
            return GuardOutcome::Absorbed;
        }
        self.locked = true;
        let handle = scheduler.schedule(settle, epoch, TimerKind::Settle);
        self.pending = Some(handle);
        GuardOutcome::Armed(handle)
    }

    /// The settle timer fired; it is no longer cancellable.
    pub(crate) fn settled(&mut self) {
        self.pending = None;
    }

    /// A new scenario is current. Cancels an unfired settle timer and unlocks.
    pub fn release(&mut self, scheduler: &mut Scheduler) {
        if let Some(handle) = self.pending.take() {
            scheduler.cancel(handle);
        }
        self.locked = false;
    }
}
