//! One rig's animation engine
//!
//! A [`LightingSystem`] owns everything a physical rig animates: the beam
//! and drum pixel groups with their trigger buffers, the debounced sensor
//! channels, the activity monitor and the idle sweep. It does no I/O; the
//! caller feeds it readings and a timestamp and ships the returned frame.

use embassy_time::Instant;
use heapless::Vec;
use rand::RngCore;

use crate::activity::{ActivityMonitor, Mode};
use crate::color::{BLACK, ColorCell, Rgb, cells_to_rgb, fill_rgb};
use crate::config::{
    BeamIdleBehavior, ConfigError, GroupConfig, MAX_SENSORS, RigConfig, SensorBinding, Spread,
};
use crate::decay::DecayModel;
use crate::detector::{Edge, TriggerDetector};
use crate::filter::OutputFilters;
use crate::idle::IdleAnimator;
use crate::interval::IntervalGate;
use crate::trigger_buffer::TriggerBuffer;

/// Color shown on every pixel of a halted rig
pub const FAULT_COLOR: Rgb = Rgb { r: 32, g: 0, b: 0 };

/// One addressable pixel array with its trigger buffer
#[derive(Debug, Clone)]
pub struct PixelGroup<const N: usize> {
    cells: Vec<ColorCell, N>,
    buffer: TriggerBuffer<N>,
    /// Strike waiting for the next tick
    pending: bool,
    decay: DecayModel,
    spread: Spread,
    /// Pixels per flash segment
    segment_len: usize,
    /// Flash segments struck since the last recolor, one bit per segment
    struck: u32,
    filters: OutputFilters,
    rgb: [Rgb; N],
}

impl<const N: usize> PixelGroup<N> {
    pub fn new(config: &GroupConfig) -> Result<Self, ConfigError> {
        config.validate(N)?;
        let mut cells = Vec::new();
        let buffer = TriggerBuffer::new(config.leds);
        let (Ok(()), Some(buffer)) = (cells.resize(config.leds, ColorCell::OFF), buffer) else {
            return Err(ConfigError::TooManyLeds {
                requested: config.leds,
                capacity: N,
            });
        };
        let segments = usize::from(config.segments()).max(1);
        Ok(Self {
            cells,
            buffer,
            pending: false,
            decay: config.decay,
            spread: config.spread,
            segment_len: (config.leds / segments).max(1),
            struck: 0,
            filters: OutputFilters::new(&config.output),
            rgb: [BLACK; N],
        })
    }

    /// Register a strike
    ///
    /// The strike is held until the next tick. Flash groups also remember
    /// which segments it covers.
    pub fn ignite(&mut self, binding: SensorBinding) {
        self.pending = true;
        self.struck |= match binding {
            SensorBinding::Whole => u32::MAX,
            SensorBinding::Segment(segment) => {
                1u32.checked_shl(u32::from(segment)).unwrap_or(0)
            }
        };
    }

    /// Propagate the trigger buffer by one slot
    ///
    /// A held strike then lights slot 0, winning over the value shifted in.
    pub fn tick(&mut self) {
        self.buffer.tick();
        if core::mem::take(&mut self.pending) {
            self.buffer.ignite();
        }
    }

    /// Run the decay model over every pixel
    pub fn recolor<R: RngCore>(&mut self, rng: &mut R) {
        match self.spread {
            Spread::Travel => self.decay.apply(&self.buffer, &mut self.cells, rng),
            Spread::Flash { segments } => {
                let struck = if self.buffer.is_lit(0) { self.struck } else { 0 };
                let segment_len = self.segment_len;
                let last = usize::from(segments.max(1)) - 1;
                self.decay.apply_with(
                    &mut self.cells,
                    |i| struck & (1 << (i / segment_len).min(last)) != 0,
                    rng,
                );
            }
        }
        self.struck = 0;
    }

    /// Convert to RGB and run the output filters
    ///
    /// A blanked group renders black.
    fn render(&mut self, blank: bool) -> &[Rgb] {
        let len = self.cells.len();
        if blank {
            fill_rgb(&mut self.rgb[..len], BLACK);
        } else {
            let frame = cells_to_rgb(&self.cells, &mut self.rgb[..len]);
            self.filters.apply(frame);
        }
        &self.rgb[..len]
    }

    fn render_fault(&mut self) -> &[Rgb] {
        let len = self.cells.len();
        fill_rgb(&mut self.rgb[..len], FAULT_COLOR);
        &self.rgb[..len]
    }

    pub fn cells(&self) -> &[ColorCell] {
        &self.cells
    }

    pub fn buffer(&self) -> &TriggerBuffer<N> {
        &self.buffer
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Debounced sensor channel and the drum pixels it strikes
#[derive(Debug, Clone)]
struct SensorChannel {
    detector: TriggerDetector,
    binding: SensorBinding,
}

/// Output of one frame
#[derive(Debug)]
pub struct Frame<'a> {
    pub beam: &'a [Rgb],
    pub drum: &'a [Rgb],
    pub mode: Mode,
    /// Status LED level to write, present only when it changed
    pub indicator: Option<IndicatorUpdate>,
}

/// Level change for the status LED
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndicatorUpdate {
    pub pin: u8,
    pub level: bool,
}

/// Reactive/idle animation engine of a single rig
pub struct LightingSystem<R: RngCore, const N: usize> {
    beam: PixelGroup<N>,
    drum: PixelGroup<N>,
    sensors: Vec<SensorChannel, MAX_SENSORS>,
    activity: ActivityMonitor,
    mode: Mode,
    idle: IdleAnimator,
    idle_canvas: Vec<ColorCell, N>,
    idle_gate: IntervalGate,
    sample_gate: IntervalGate,
    beam_when_idle: BeamIdleBehavior,
    indicator_pin: Option<u8>,
    indicator_level: Option<bool>,
    rng: R,
}

impl<R: RngCore, const N: usize> LightingSystem<R, N> {
    /// Build the engine for a rig that starts up at `now`
    pub fn new(config: &RigConfig, rng: R, now: Instant) -> Result<Self, ConfigError> {
        config.validate(N)?;

        let mut sensors = Vec::new();
        for sensor in &config.sensors {
            let channel = SensorChannel {
                detector: TriggerDetector::new(sensor.detector)?,
                binding: sensor.binding,
            };
            sensors
                .push(channel)
                .map_err(|_| ConfigError::TooManySensors {
                    requested: config.sensors.len(),
                })?;
        }

        let drum = PixelGroup::new(&config.drum)?;
        let idle_canvas = drum.cells.clone();

        Ok(Self {
            beam: PixelGroup::new(&config.beam)?,
            drum,
            sensors,
            activity: ActivityMonitor::new(config.idle_threshold, now),
            mode: Mode::Active,
            idle: IdleAnimator::new(config.idle),
            idle_canvas,
            idle_gate: IntervalGate::new(config.idle.step_interval),
            sample_gate: IntervalGate::new(config.sample_interval),
            beam_when_idle: config.beam_when_idle,
            indicator_pin: config.indicator_pin,
            indicator_level: None,
            rng,
        })
    }

    /// Whether the sensors should be read for the frame at `now`
    pub fn sample_due(&self, now: Instant) -> bool {
        self.sample_gate.is_due(now)
    }

    /// Feed one reading per sensor, in configuration order
    ///
    /// Every rising edge strikes the rig. Returns the number of strikes.
    pub fn poll(&mut self, now: Instant, readings: &[u16]) -> Result<usize, ConfigError> {
        if readings.len() != self.sensors.len() {
            return Err(ConfigError::SensorCountMismatch {
                expected: self.sensors.len(),
                actual: readings.len(),
            });
        }
        let mut strikes = 0;
        for i in 0..self.sensors.len() {
            let channel = &mut self.sensors[i];
            if channel.detector.update(readings[i]) == Some(Edge::Rose) {
                let binding = channel.binding;
                self.strike(now, binding);
                strikes += 1;
            }
        }
        Ok(strikes)
    }

    /// Strike the rig as if a sensor with `binding` rose at `now`
    pub fn strike(&mut self, now: Instant, binding: SensorBinding) {
        self.beam.ignite(binding);
        self.drum.ignite(binding);
        self.activity.note_trigger(now);
    }

    /// Run one frame
    ///
    /// `readings` are applied only when the sample interval has elapsed;
    /// pass `None` when the sensors were not read this frame.
    pub fn frame(
        &mut self,
        now: Instant,
        readings: Option<&[u16]>,
    ) -> Result<Frame<'_>, ConfigError> {
        if let Some(readings) = readings {
            if self.sample_gate.ready(now) {
                self.poll(now, readings)?;
            }
        }
        Ok(self.advance(now))
    }

    /// Propagate, recolor, arbitrate and render
    pub fn advance(&mut self, now: Instant) -> Frame<'_> {
        self.beam.tick();
        self.drum.tick();

        self.beam.recolor(&mut self.rng);
        self.drum.recolor(&mut self.rng);

        let mode = self.activity.tick(now);
        if mode == Mode::Idle {
            if self.mode == Mode::Active {
                self.enter_idle();
            }
            if self.idle_gate.ready(now) {
                self.idle.tick(&mut self.idle_canvas, &mut self.rng);
            }
            self.drum.cells.clone_from(&self.idle_canvas);
        }
        self.mode = mode;

        let indicator = self.indicator_update();
        let blank_beam = mode == Mode::Idle && self.beam_when_idle == BeamIdleBehavior::Blank;
        Frame {
            beam: self.beam.render(blank_beam),
            drum: self.drum.render(false),
            mode,
            indicator,
        }
    }

    /// Frame shown by a rig that failed to start
    pub fn fault_frame(&mut self) -> Frame<'_> {
        let indicator = self.indicator_pin.map(|pin| IndicatorUpdate { pin, level: true });
        Frame {
            beam: self.beam.render_fault(),
            drum: self.drum.render_fault(),
            mode: self.mode,
            indicator,
        }
    }

    fn enter_idle(&mut self) {
        self.idle_canvas.clone_from(&self.drum.cells);
        self.idle.reset();
        self.idle_gate.reset();
    }

    fn indicator_update(&mut self) -> Option<IndicatorUpdate> {
        let pin = self.indicator_pin?;
        let level = self.sensors.iter().any(|s| s.detector.is_triggered());
        if self.indicator_level == Some(level) {
            return None;
        }
        self.indicator_level = Some(level);
        Some(IndicatorUpdate { pin, level })
    }

    pub fn beam(&self) -> &PixelGroup<N> {
        &self.beam
    }

    pub fn drum(&self) -> &PixelGroup<N> {
        &self.drum
    }

    /// Mode as of the last frame
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    pub fn activity(&self) -> &ActivityMonitor {
        &self.activity
    }

    pub fn idle(&self) -> &IdleAnimator {
        &self.idle
    }

    /// Debounced flag of sensor `index`
    pub fn is_triggered(&self, index: usize) -> Option<bool> {
        self.sensors.get(index).map(|s| s.detector.is_triggered())
    }

    pub fn sensor_count(&self) -> usize {
        self.sensors.len()
    }
}
