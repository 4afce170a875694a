use embassy_time::{Duration, Instant};

/// Lets an action through at most once per `interval`
///
/// The first call to [`ready`](Self::ready) always passes. A zero interval
/// passes every call.
#[derive(Debug, Clone, Copy)]
pub struct IntervalGate {
    interval: Duration,
    last: Option<Instant>,
}

impl IntervalGate {
    pub const fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    /// Whether the action is due at `now`; if so, start a new interval
    pub fn ready(&mut self, now: Instant) -> bool {
        if !self.is_due(now) {
            return false;
        }
        self.last = Some(now);
        true
    }

    /// Whether the action is due at `now`, without consuming it
    pub fn is_due(&self, now: Instant) -> bool {
        match self.last {
            None => true,
            Some(last) => now.saturating_duration_since(last) >= self.interval,
        }
    }

    /// Forget the last pass so the next call is due immediately
    pub fn reset(&mut self) {
        self.last = None;
    }

    pub const fn interval(&self) -> Duration {
        self.interval
    }
}
