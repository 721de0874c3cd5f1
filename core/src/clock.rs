//! Wall-clock source for record and export timestamps.
//!
//! Simulated time (latency, dwell, settle) never comes from here; it is accumulated
//! from host ticks by the [`Scheduler`](crate::Scheduler).

use chrono::{DateTime, Utc};

pub trait WallClock: Send {
    fn now(&self) -> DateTime<Utc>;
}

/// Reads the system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl WallClock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always reports the same instant. Makes exports byte-for-byte reproducible.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(DateTime<Utc>);

impl FixedClock {
    #[must_use]
    pub const fn new(at: DateTime<Utc>) -> Self {
        Self(at)
    }
}

impl WallClock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
