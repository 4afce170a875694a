//! Active/idle arbitration
//!
//! The installation is ACTIVE while strikes keep arriving and falls back to
//! IDLE once no strike has been seen for longer than the idle threshold.
//! Any strike snaps it back to ACTIVE immediately.

use embassy_time::{Duration, Instant};

#[cfg(feature = "esp32-log")]
use esp_println::println;

/// Operating mode of a rig
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Reactive animation is shown
    Active,
    /// Ambient sweep is shown
    Idle,
}

/// Tracks time since the last strike
#[derive(Debug, Clone)]
pub struct ActivityMonitor {
    last_trigger: Instant,
    idle_threshold: Duration,
    mode: Mode,
}

impl ActivityMonitor {
    /// Start in `Active`, as if a strike happened at `started`
    pub const fn new(idle_threshold: Duration, started: Instant) -> Self {
        Self {
            last_trigger: started,
            idle_threshold,
            mode: Mode::Active,
        }
    }

    /// Record a strike at `now` and force `Active`
    pub fn note_trigger(&mut self, now: Instant) {
        self.last_trigger = now;
        #[cfg(feature = "esp32-log")]
        if self.mode == Mode::Idle {
            println!("[ActivityMonitor] strike, leaving idle");
        }
        self.mode = Mode::Active;
    }

    /// Recompute the mode for `now`
    pub fn tick(&mut self, now: Instant) -> Mode {
        let quiet_for = now.saturating_duration_since(self.last_trigger);
        let mode = if quiet_for > self.idle_threshold {
            Mode::Idle
        } else {
            Mode::Active
        };
        #[cfg(feature = "esp32-log")]
        if mode != self.mode {
            println!("[ActivityMonitor] {:?} -> {:?}", self.mode, mode);
        }
        self.mode = mode;
        mode
    }

    /// Mode as of the last `tick` or `note_trigger`
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    pub const fn last_trigger(&self) -> Instant {
        self.last_trigger
    }

    pub const fn idle_threshold(&self) -> Duration {
        self.idle_threshold
    }
}
