use std::time::Duration;

/// Fixed-rate tick scheduler.
///
/// Wall-clock time is injected by the host; the scheduler only counts how
/// many whole tick intervals it covers, so pacing is independent of how fast
/// the host can run a tick.
pub struct TickScheduler {
    interval: Duration,
    max_ticks: u32,
    backlog: Duration,
}

impl TickScheduler {
    pub fn new(interval: Duration, max_ticks: u32) -> Self {
        Self {
            interval: interval.max(Duration::from_nanos(1)),
            max_ticks: max_ticks.max(1),
            backlog: Duration::ZERO,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Add `elapsed` to the backlog and take out the ticks now due.
    ///
    /// At most `max_ticks` are returned; older backlog beyond that is dropped.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.backlog += elapsed;
        let due = self.backlog.as_nanos() / self.interval.as_nanos();
        if due > self.max_ticks as u128 {
            log::debug!(
                "tick backlog of {} exceeds {}, dropping {:?}",
                due,
                self.max_ticks,
                self.backlog.saturating_sub(self.interval * self.max_ticks)
            );
            self.backlog = Duration::ZERO;
            return self.max_ticks;
        }
        let due = due as u32;
        self.backlog -= self.interval * due;
        due
    }

    pub fn reset(&mut self) {
        self.backlog = Duration::ZERO;
    }
}

/// Limits frame emission to one per interval.
pub struct FrameThrottle {
    interval: Duration,
    last_emit: Duration,
}

impl FrameThrottle {
    pub fn new(interval: Duration) -> Self {
        Self { interval, last_emit: Duration::ZERO }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Returns true and records `now` when at least one interval has passed
    /// since the last emission.
    pub fn ready(&mut self, now: Duration) -> bool {
        if now.saturating_sub(self.last_emit) >= self.interval {
            self.last_emit = now;
            true
        } else {
            false
        }
    }
}
