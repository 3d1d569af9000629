//! Auto-advance timer as an owned resource.
//!
//! The timer lives inside the controller task, so it cannot outlive the
//! mounted carousel. It is re-created (not resumed) whenever one of its
//! dependencies changes: a fresh arm always waits one full period before the
//! first tick.

use std::time::Duration;

use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};
use tracing::trace;

#[derive(Debug, Default)]
pub struct AdvanceTimer {
    interval: Option<Interval>,
}

impl AdvanceTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or restart) ticking every `period`, first tick one period from
    /// now. Any previous schedule is dropped.
    pub fn arm(&mut self, period: Duration) {
        let mut interval = interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.interval = Some(interval);
        trace!("auto-advance armed ({period:?})");
    }

    pub fn disarm(&mut self) {
        if self.interval.take().is_some() {
            trace!("auto-advance disarmed");
        }
    }

    pub fn is_armed(&self) -> bool {
        self.interval.is_some()
    }

    pub fn period(&self) -> Option<Duration> {
        self.interval.as_ref().map(Interval::period)
    }

    /// Resolves on the next tick. Never resolves while disarmed, so it can
    /// sit in a `select!` unconditionally.
    pub async fn tick(&mut self) -> Instant {
        match self.interval.as_mut() {
            Some(interval) => interval.tick().await,
            None => std::future::pending().await,
        }
    }
}

/// Inputs the timer schedule depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdvanceDeps {
    pub hovering: bool,
    pub max_index: usize,
    pub item_count: usize,
}

impl AdvanceDeps {
    /// Auto-advance only runs while nobody is hovering and there is
    /// something to show.
    pub fn should_run(&self) -> bool {
        !self.hovering && self.item_count > 0
    }
}

/// Tracks the last dependency set the timer was armed for.
#[derive(Debug, Default)]
pub struct AdvanceGate {
    last: Option<AdvanceDeps>,
}

impl AdvanceGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `deps`; true when they differ from the previous call (or on
    /// the first call), meaning the timer must be torn down and rebuilt.
    pub fn update(&mut self, deps: AdvanceDeps) -> bool {
        let changed = self.last != Some(deps);
        self.last = Some(deps);
        changed
    }

    /// Bring `timer` in line with `deps`. Returns true if the timer was
    /// re-armed or disarmed.
    pub fn sync(
        &mut self,
        deps: AdvanceDeps,
        period: Option<Duration>,
        timer: &mut AdvanceTimer,
    ) -> bool {
        if !self.update(deps) {
            return false;
        }
        match period {
            Some(period) if deps.should_run() => timer.arm(period),
            _ => timer.disarm(),
        }
        true
    }
}
