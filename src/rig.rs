//! Rig: an engine wired to its hardware
//!
//! Binds a [`LightingSystem`] to the sensors it polls, the two pixel sinks
//! it drives and the optional status LED. The rig is where startup faults
//! are caught: a sensor that fails to initialize halts the rig in a
//! visible fault state instead of leaving it silently unresponsive.

use core::fmt;

use embassy_time::Instant;
use heapless::Vec;
use rand::RngCore;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::activity::Mode;
use crate::config::{ConfigError, MAX_SENSORS, SensorBinding};
use crate::system::{Frame, LightingSystem};
use crate::{IndicatorPin, OutputDriver, SensorError, SensorSource};

/// A sensor failed to initialize
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartupError {
    /// Index of the failing sensor in the rig configuration
    pub sensor: usize,
    pub cause: SensorError,
}

impl fmt::Display for StartupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sensor {} failed to start: {}", self.sensor, self.cause)
    }
}

/// Lifecycle of a rig
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RigState {
    /// Built, sensors not yet initialized
    Ready,
    /// Animating
    Running,
    /// Startup failed; only the fault frame is shown
    Halted,
}

/// Object-safe view of a rig, used by the installation
pub trait RigDriver {
    /// Initialize every sensor
    fn start(&mut self) -> Result<(), StartupError>;

    /// Poll, animate and show one frame
    fn frame(&mut self, now: Instant);

    /// Strike the rig from outside the sensor loop
    fn strike(&mut self, now: Instant, binding: SensorBinding);

    fn mode(&self) -> Mode;

    fn state(&self) -> RigState;
}

/// Indicator for rigs without a status LED
#[derive(Debug, Clone, Copy, Default)]
pub struct NoIndicator;

impl IndicatorPin for NoIndicator {
    fn set(&mut self, _pin: u8, _level: bool) {}
}

/// One physical rig
pub struct Rig<R, S, O, I, const N: usize>
where
    R: RngCore,
    S: SensorSource,
    O: OutputDriver,
    I: IndicatorPin,
{
    system: LightingSystem<R, N>,
    sensors: Vec<S, MAX_SENSORS>,
    readings: Vec<u16, MAX_SENSORS>,
    beam_output: O,
    drum_output: O,
    indicator: I,
    state: RigState,
}

impl<R, S, O, I, const N: usize> Rig<R, S, O, I, N>
where
    R: RngCore,
    S: SensorSource,
    O: OutputDriver,
    I: IndicatorPin,
{
    /// Wire an engine to its sensors and outputs
    ///
    /// Sensors are matched to the configured channels by position.
    pub fn new(
        system: LightingSystem<R, N>,
        sensors: impl IntoIterator<Item = S>,
        beam_output: O,
        drum_output: O,
        indicator: I,
    ) -> Result<Self, ConfigError> {
        let mut bound = Vec::new();
        let mut requested = 0;
        for sensor in sensors {
            requested += 1;
            if bound.push(sensor).is_err() {
                return Err(ConfigError::TooManySensors { requested });
            }
        }
        if bound.len() != system.sensor_count() {
            return Err(ConfigError::SensorCountMismatch {
                expected: system.sensor_count(),
                actual: bound.len(),
            });
        }
        Ok(Self {
            system,
            sensors: bound,
            readings: Vec::new(),
            beam_output,
            drum_output,
            indicator,
            state: RigState::Ready,
        })
    }

    /// Initialize every sensor
    ///
    /// The first failure halts the rig and shows the fault frame.
    pub fn start(&mut self) -> Result<(), StartupError> {
        let failure = self
            .sensors
            .iter_mut()
            .enumerate()
            .find_map(|(sensor, source)| {
                source
                    .init()
                    .err()
                    .map(|cause| StartupError { sensor, cause })
            });
        if let Some(error) = failure {
            #[cfg(feature = "esp32-log")]
            println!("[Rig] {}", error);
            self.state = RigState::Halted;
            self.show_fault();
            return Err(error);
        }
        self.state = RigState::Running;
        Ok(())
    }

    /// Run one frame
    ///
    /// A rig that has not been started shows nothing; a halted rig keeps
    /// showing its fault frame.
    pub fn frame(&mut self, now: Instant) {
        match self.state {
            RigState::Ready => return,
            RigState::Halted => {
                self.show_fault();
                return;
            }
            RigState::Running => {}
        }

        let sampled = self.system.sample_due(now);
        if sampled {
            self.readings.clear();
            for sensor in &mut self.sensors {
                // Both vectors share the same capacity
                let _ = self.readings.push(sensor.read());
            }
        }
        let readings = sampled.then_some(self.readings.as_slice());
        let Ok(frame) = self.system.frame(now, readings) else {
            return;
        };
        show(
            &frame,
            &mut self.beam_output,
            &mut self.drum_output,
            &mut self.indicator,
        );
    }

    pub fn strike(&mut self, now: Instant, binding: SensorBinding) {
        if self.state == RigState::Running {
            self.system.strike(now, binding);
        }
    }

    fn show_fault(&mut self) {
        let frame = self.system.fault_frame();
        show(
            &frame,
            &mut self.beam_output,
            &mut self.drum_output,
            &mut self.indicator,
        );
    }

    pub fn system(&self) -> &LightingSystem<R, N> {
        &self.system
    }

    pub const fn state(&self) -> RigState {
        self.state
    }

    pub fn beam_output(&self) -> &O {
        &self.beam_output
    }

    pub fn drum_output(&self) -> &O {
        &self.drum_output
    }

    pub fn indicator(&self) -> &I {
        &self.indicator
    }
}

/// Hand a finished frame to the sinks
fn show<O: OutputDriver, I: IndicatorPin>(
    frame: &Frame<'_>,
    beam: &mut O,
    drum: &mut O,
    indicator: &mut I,
) {
    if !frame.beam.is_empty() {
        beam.write(frame.beam);
    }
    if !frame.drum.is_empty() {
        drum.write(frame.drum);
    }
    if let Some(update) = frame.indicator {
        indicator.set(update.pin, update.level);
    }
}

impl<R, S, O, I, const N: usize> RigDriver for Rig<R, S, O, I, N>
where
    R: RngCore,
    S: SensorSource,
    O: OutputDriver,
    I: IndicatorPin,
{
    fn start(&mut self) -> Result<(), StartupError> {
        Rig::start(self)
    }

    fn frame(&mut self, now: Instant) {
        Rig::frame(self, now);
    }

    fn strike(&mut self, now: Instant, binding: SensorBinding) {
        Rig::strike(self, now, binding);
    }

    fn mode(&self) -> Mode {
        self.system.mode()
    }

    fn state(&self) -> RigState {
        self.state
    }
}
