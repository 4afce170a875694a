//! Multi-rig coordination and frame pacing
//!
//! An [`Installation`] drives any number of independent rigs off one frame
//! clock. Rigs never see each other: each frame they are ticked in order,
//! and a halted rig only ever shows its own fault.
//!
//! The installation does not sleep. The caller waits for the returned
//! deadline with whatever timer the platform offers.
//!
//! # Usage
//!
//! ```ignore
//! let mut installation = Installation::<2, 8>::new(&InstallationConfig::default())?;
//! installation.add_rig(&mut beam_rig)?;
//! installation.add_rig(&mut drum_rig)?;
//! installation.start()?;
//!
//! loop {
//!     let result = installation.tick(Instant::now());
//!     Timer::after(result.sleep_duration).await;
//! }
//! ```

use core::fmt;

use embassy_time::{Duration, Instant};
use heapless::Vec;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::activity::Mode;
use crate::channel::StrikeReceiver;
use crate::config::{ConfigError, InstallationConfig};
use crate::rig::{RigDriver, StartupError};

/// Result of a frame tick operation.
#[derive(Debug, Clone, Copy)]
pub struct FrameResult {
    /// The deadline for the next frame.
    pub next_deadline: Instant,
    /// How long to wait until the next frame (may be zero if behind schedule).
    pub sleep_duration: Duration,
}

/// A rig of the installation failed to start
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstallationError {
    /// Index of the rig, in the order rigs were added
    pub rig: usize,
    pub error: StartupError,
}

impl fmt::Display for InstallationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rig {}: {}", self.rig, self.error)
    }
}

/// Up to `RIGS` rigs sharing a frame clock, plus a queue of up to
/// `STRIKES` external strikes
pub struct Installation<'a, const RIGS: usize, const STRIKES: usize> {
    rigs: Vec<&'a mut dyn RigDriver, RIGS>,
    strikes: Option<StrikeReceiver<'a, STRIKES>>,
    next_frame: Instant,
    frame_duration: Duration,
}

impl<'a, const RIGS: usize, const STRIKES: usize> Installation<'a, RIGS, STRIKES> {
    pub fn new(config: &InstallationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            rigs: Vec::new(),
            strikes: None,
            next_frame: Instant::from_millis(0),
            frame_duration: config.frame_duration(),
        })
    }

    /// Drain external strikes from `receiver` at the start of every frame
    #[must_use]
    pub fn with_strikes(mut self, receiver: StrikeReceiver<'a, STRIKES>) -> Self {
        self.strikes = Some(receiver);
        self
    }

    /// Add a rig and return its index
    pub fn add_rig(&mut self, rig: &'a mut dyn RigDriver) -> Result<usize, ConfigError> {
        self.rigs
            .push(rig)
            .map_err(|_| ConfigError::TooManyRigs { capacity: RIGS })?;
        Ok(self.rigs.len() - 1)
    }

    /// Start every rig
    ///
    /// All rigs are started even after a failure. Returns the first
    /// failure; the installation keeps running afterwards, with each failed
    /// rig showing its fault while the healthy ones animate.
    pub fn start(&mut self) -> Result<(), InstallationError> {
        let mut first_error = None;
        for (index, rig) in self.rigs.iter_mut().enumerate() {
            if let Err(error) = rig.start() {
                #[cfg(feature = "esp32-log")]
                println!("[Installation] rig {} halted: {}", index, error);
                first_error.get_or_insert(InstallationError { rig: index, error });
            }
        }
        match first_error {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    /// Process one frame and return timing information.
    ///
    /// This method:
    /// 1. Applies drift correction if we've fallen too far behind
    /// 2. Delivers queued external strikes
    /// 3. Runs one frame on every rig
    /// 4. Returns the deadline for the next frame
    pub fn tick(&mut self, now: Instant) -> FrameResult {
        // More than two frames behind: skip the backlog instead of bursting
        let max_drift = self.frame_duration * 2;
        if now > self.next_frame + max_drift {
            #[cfg(feature = "esp32-log")]
            if self.next_frame.as_millis() > 0 {
                println!("[Installation] skipped frames, resyncing");
            }
            self.next_frame = now;
        }

        self.deliver_strikes(now);
        for rig in &mut self.rigs {
            rig.frame(now);
        }

        self.next_frame += self.frame_duration;

        FrameResult {
            next_deadline: self.next_frame,
            sleep_duration: self.next_frame.saturating_duration_since(now),
        }
    }

    fn deliver_strikes(&mut self, now: Instant) {
        let Some(strikes) = self.strikes else {
            return;
        };
        while let Some(strike) = strikes.try_receive() {
            // Strikes for unknown rigs are dropped
            if let Some(rig) = self.rigs.get_mut(usize::from(strike.rig)) {
                rig.strike(now, strike.binding);
            }
        }
    }

    pub fn rig_count(&self) -> usize {
        self.rigs.len()
    }

    /// Mode of rig `index`
    pub fn mode(&self, index: usize) -> Option<Mode> {
        self.rigs.get(index).map(|rig| rig.mode())
    }

    pub const fn frame_duration(&self) -> Duration {
        self.frame_duration
    }
}
