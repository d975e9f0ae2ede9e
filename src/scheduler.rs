/// Cancellable repeating timers for the host loop.
///
/// The loop owns one `Interval` per periodic job (tick, spawn) and polls them
/// with the current time.  An interval fires only while armed, and
/// `Timers::sync` keeps both armed exactly while the game is running, so a
/// run that ends stops its timers before they can touch stale state.

use std::time::{Duration, Instant};

use crate::config::Tuning;
use crate::entities::Phase;

#[derive(Clone, Debug)]
pub struct Interval {
    period: Duration,
    next_due: Option<Instant>,
}

impl Interval {
    pub fn new(period: Duration) -> Self {
        Interval {
            period,
            next_due: None,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Start firing one period from `now`.  Re-arming an armed interval keeps
    /// its current schedule.
    pub fn arm(&mut self, now: Instant) {
        if self.next_due.is_none() {
            self.next_due = Some(now + self.period);
        }
    }

    pub fn cancel(&mut self) {
        self.next_due = None;
    }

    pub fn is_armed(&self) -> bool {
        self.next_due.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.next_due
    }

    /// Report whether the interval is due at `now` and schedule the next
    /// firing.  A caller that fell more than a period behind gets one firing,
    /// not a burst: missed periods are skipped.
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(due) = self.next_due else {
            return false;
        };
        if now < due {
            return false;
        }
        let next = due + self.period;
        self.next_due = Some(if next <= now { now + self.period } else { next });
        true
    }
}

/// The two periodic jobs of a running game.
#[derive(Clone, Debug)]
pub struct Timers {
    pub tick: Interval,
    pub spawn: Interval,
}

impl Timers {
    pub fn new(tuning: &Tuning) -> Self {
        Timers {
            tick: Interval::new(tuning.tick_interval),
            spawn: Interval::new(tuning.spawn_interval),
        }
    }

    /// Arm both timers while `phase` is running, cancel both otherwise.
    pub fn sync(&mut self, phase: Phase, now: Instant) {
        if phase == Phase::Running {
            self.tick.arm(now);
            self.spawn.arm(now);
        } else {
            self.cancel();
        }
    }

    pub fn cancel(&mut self) {
        self.tick.cancel();
        self.spawn.cancel();
    }

    /// The earliest pending deadline, if any timer is armed.
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.tick.deadline(), self.spawn.deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }
}
